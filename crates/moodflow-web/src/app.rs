use crate::dom;
use crate::transport::{self, WebTransport};
use crate::ui;
use glam::Vec2;
use moodflow_core::{Dimensions, Mood, MoodSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Cheap-to-clone handle the DOM callbacks share.
#[derive(Clone)]
pub struct App {
    pub document: web::Document,
    pub session: Rc<RefCell<MoodSession>>,
    pub transport: Rc<RefCell<WebTransport>>,
}

impl App {
    pub fn join(&self) {
        let result = self.session.borrow_mut().join(&mut *self.transport.borrow_mut());
        if let Err(e) = result {
            log::error!("[app] join {}: {e}", self.session.borrow().room());
        }
        self.refresh_presence();
    }

    /// Ask the transport how many sessions share the current room and show
    /// it. A reply for a room we already left is ignored.
    pub fn refresh_presence(&self) {
        let channel = self.session.borrow().channel();
        let pending = self.transport.borrow().begin_occupancy(&channel);
        let app = self.clone();
        spawn_local(async move {
            match pending.count().await {
                Ok(n) if app.session.borrow().channel() == channel => {
                    dom::set_text(&app.document, ui::ONLINE_COUNT_ID, &n.to_string());
                }
                Ok(_) => {}
                Err(e) => log::warn!("[app] presence: {e}"),
            }
        });
    }

    /// Publish, then give local feedback once the transport accepts.
    pub fn publish(&self, mood: Mood) {
        let now = js_sys::Date::now();
        let out = match self.session.borrow().compose(mood, now) {
            Ok(o) => o,
            Err(e) => {
                log::warn!("[app] not publishing: {e}");
                return;
            }
        };
        // registered first: the host may deliver the echo before it settles
        self.session.borrow_mut().expect_echo(&out.event);
        let begun = self.transport.borrow_mut().begin_publish(&out);
        let pending = match begun {
            Ok(p) => p,
            Err(e) => {
                log::error!("[app] publish error: {e}");
                self.session.borrow_mut().cancel_echo(&out.event);
                return;
            }
        };
        let app = self.clone();
        spawn_local(async move {
            if let Err(e) = pending.settle().await {
                log::error!("[app] publish error: {e}");
                app.session.borrow_mut().cancel_echo(&out.event);
                return;
            }
            if let Err(e) = app.session.borrow_mut().confirm_published(&out.event) {
                log::warn!("[app] local feedback skipped: {e}");
            }
            let echoes = app.transport.borrow_mut().drain_echoes();
            for raw in echoes {
                app.receive_raw(&raw);
            }
            app.refresh_feed();
        });
    }

    pub fn receive(&self, msg: JsValue) {
        match transport::message_json(&msg) {
            Some(raw) => self.receive_raw(&raw),
            None => log::warn!("[app] dropping unreadable message"),
        }
        self.refresh_feed();
    }

    // Failures are already logged by the session.
    fn receive_raw(&self, raw: &str) {
        _ = self.session.borrow_mut().receive(raw);
    }

    pub fn switch_room(&self, room: &str) {
        let result = self
            .session
            .borrow_mut()
            .switch_room(&mut *self.transport.borrow_mut(), room);
        if let Err(e) = result {
            log::error!("[app] switching to {room}: {e}");
        }
        self.refresh_feed();
        self.refresh_presence();
    }

    pub fn click_burst(&self, at: Vec2) {
        self.session.borrow_mut().click_burst(at);
    }

    pub fn resize(&self, particle_dims: Dimensions, wave_dims: Dimensions) {
        self.session.borrow_mut().resize(particle_dims, wave_dims);
    }

    pub fn refresh_feed(&self) {
        ui::render_feed(&self.document, self.session.borrow().feed());
    }
}
