use crate::app::App;
use crate::dom;
use glam::Vec2;
use moodflow_core::Mood;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const ROOM_ACTIVE_CLASS: &str = "active";

/// Map a pointer event to canvas backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w > 0.0 && h > 0.0 {
        Vec2::new(
            x_css / w * canvas.width() as f32,
            y_css / h * canvas.height() as f32,
        )
    } else {
        Vec2::new(x_css, y_css)
    }
}

/// `.vibe-btn` elements carry `data-vibe` (glyph) and `data-color`; their
/// text is the label.
pub fn wire_vibe_buttons(app: &App) {
    let app = app.clone();
    let document = app.document.clone();
    dom::add_click_listeners(&document, ".vibe-btn", move |btn| {
        let label = btn.text_content().unwrap_or_default().trim().to_string();
        let glyph = dom::data_attr(&btn, "vibe");
        let color = dom::data_attr(&btn, "color");
        let (Some(glyph), Some(color)) = (glyph, color) else {
            log::warn!("[events] vibe button without data-vibe/data-color");
            return;
        };
        app.publish(Mood::new(label, color, glyph));
    });
}

/// `.room-btn` elements carry `data-room`; the clicked one becomes active.
pub fn wire_room_buttons(app: &App) {
    let app = app.clone();
    let document = app.document.clone();
    dom::add_click_listeners(&document, ".room-btn", move |btn| {
        let Some(room) = dom::data_attr(&btn, "room") else {
            return;
        };
        if let Ok(all) = app.document.query_selector_all(".room-btn") {
            for i in 0..all.length() {
                if let Some(el) = all.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                    _ = el.class_list().remove_1(ROOM_ACTIVE_CLASS);
                }
            }
        }
        _ = btn.class_list().add_1(ROOM_ACTIVE_CLASS);
        app.switch_room(&room);
    });
}

pub fn wire_canvas_click(app: &App, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        app.click_burst(pointer_canvas_px(&ev, &target));
    }) as Box<dyn FnMut(web::MouseEvent)>);
    _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Keep both canvases matched to their layout size, now and on every
/// window resize.
pub fn wire_resize(
    app: &App,
    particle_canvas: &web::HtmlCanvasElement,
    wave_canvas: &web::HtmlCanvasElement,
) {
    let sync = {
        let app = app.clone();
        let pc = particle_canvas.clone();
        let wc = wave_canvas.clone();
        move || {
            let p = dom::sync_canvas_backing_size(&pc);
            let w = dom::sync_canvas_backing_size(&wc);
            app.resize(p, w);
        }
    };
    sync();
    let closure = Closure::wrap(Box::new(sync) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
