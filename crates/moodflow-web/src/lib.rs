#![cfg(target_arch = "wasm32")]
use moodflow_core::{MoodSession, SessionConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod canvas;
mod dom;
mod events;
mod frame;
mod transport;
mod ui;

const PARTICLE_CANVAS_ID: &str = "vibeCanvas";
const WAVE_CANVAS_ID: &str = "waveCanvas";
const CONFIG_SCRIPT_ID: &str = "moodflow-config";

thread_local! {
    static LOOP: RefCell<Option<frame::LoopHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("moodflow-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear the session down: both render cycles stop requesting frames.
#[wasm_bindgen]
pub fn stop() {
    LOOP.with(|slot| {
        if let Some(handle) = slot.borrow_mut().take() {
            handle.stop();
            log::info!("moodflow-web stopped");
        }
    });
}

fn load_config(document: &web::Document) -> SessionConfig {
    let Some(doc) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return SessionConfig::default();
    };
    SessionConfig::from_json(&doc).unwrap_or_else(|e| {
        log::warn!("[config] {e}; using defaults");
        SessionConfig::default()
    })
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let particle_canvas = dom::canvas_by_id(&document, PARTICLE_CANVAS_ID)?;
    let wave_canvas = dom::canvas_by_id(&document, WAVE_CANVAS_ID)?;
    let particle_surface = canvas::CanvasSurface::new(particle_canvas.clone())?;
    let wave_surface = canvas::CanvasSurface::new(wave_canvas.clone())?;

    let config = load_config(&document);
    let session = MoodSession::new(config, StdRng::from_entropy())?;

    let app = app::App {
        document: document.clone(),
        session: Rc::new(RefCell::new(session)),
        transport: Rc::new(RefCell::new(transport::WebTransport::detect(&window))),
    };

    events::wire_resize(&app, &particle_canvas, &wave_canvas);
    {
        let inbound = app.clone();
        app.transport.borrow().listen(move |msg| inbound.receive(msg));
        let presence = app.clone();
        app.transport
            .borrow()
            .listen_presence(move || presence.refresh_presence());
    }
    app.join();

    events::wire_vibe_buttons(&app);
    events::wire_room_buttons(&app);
    events::wire_canvas_click(&app, &particle_canvas);

    let handle = frame::start_loop(
        app.session.clone(),
        document.clone(),
        particle_surface,
        wave_surface,
    );
    LOOP.with(|slot| *slot.borrow_mut() = Some(handle));

    let on_hide = Closure::wrap(Box::new(stop) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();
    Ok(())
}
