use moodflow_core::{
    displayed_occupancy, LoopbackTransport, MoodError, MoodPublisher, Outbound, RoomTransport,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

// The pub/sub client lives in the host page and is exposed as
// `window.moodflowTransport`.
#[wasm_bindgen]
extern "C" {
    pub type HostTransport;

    #[wasm_bindgen(method, catch)]
    fn subscribe(this: &HostTransport, channel: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn unsubscribe(this: &HostTransport, channel: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn publish(
        this: &HostTransport,
        channel: &str,
        message: &JsValue,
    ) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, js_name = onMessage)]
    fn on_message(this: &HostTransport, handler: &js_sys::Function);

    // Resolves to the channel's occupancy as a number.
    #[wasm_bindgen(method, catch, js_name = hereNow)]
    fn here_now(this: &HostTransport, channel: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, js_name = onPresence)]
    fn on_presence(this: &HostTransport, handler: &js_sys::Function);
}

const HOST_GLOBAL: &str = "moodflowTransport";

fn js_failure(op: &str, e: JsValue) -> MoodError {
    MoodError::transport(format!("{op}: {:?}", e))
}

pub enum WebTransport {
    Host(HostTransport),
    /// No host client on the page: publishes echo back locally.
    Offline(LoopbackTransport),
}

/// Resolves once the transport has accepted (or refused) a publish.
pub enum PendingPublish {
    Host(JsFuture),
    Settled,
}

impl PendingPublish {
    pub async fn settle(self) -> moodflow_core::Result<()> {
        match self {
            PendingPublish::Host(fut) => {
                fut.await.map(|_| ()).map_err(|e| js_failure("publish", e))
            }
            PendingPublish::Settled => Ok(()),
        }
    }
}

/// An occupancy query in flight.
pub enum PendingOccupancy {
    Host(JsFuture),
    Known(Option<f64>),
}

impl PendingOccupancy {
    pub async fn count(self) -> moodflow_core::Result<u32> {
        let reported = match self {
            PendingOccupancy::Host(fut) => {
                fut.await.map_err(|e| js_failure("hereNow", e))?.as_f64()
            }
            PendingOccupancy::Known(n) => n,
        };
        Ok(displayed_occupancy(reported))
    }
}

impl WebTransport {
    pub fn detect(window: &web::Window) -> Self {
        match js_sys::Reflect::get(window, &JsValue::from_str(HOST_GLOBAL)) {
            Ok(v) if v.is_object() => {
                log::info!("[transport] using host transport");
                WebTransport::Host(v.unchecked_into::<HostTransport>())
            }
            _ => {
                log::warn!("[transport] window.{HOST_GLOBAL} missing, running offline");
                WebTransport::Offline(LoopbackTransport::new())
            }
        }
    }

    /// Register the inbound message handler. Offline mode has no inbound
    /// side beyond [`WebTransport::drain_echoes`].
    pub fn listen(&self, handler: impl FnMut(JsValue) + 'static) {
        if let WebTransport::Host(host) = self {
            let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
            host.on_message(closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Register the presence-change handler. Offline occupancy never changes.
    pub fn listen_presence(&self, mut handler: impl FnMut() + 'static) {
        if let WebTransport::Host(host) = self {
            let closure =
                Closure::wrap(Box::new(move |_ev: JsValue| handler()) as Box<dyn FnMut(JsValue)>);
            host.on_presence(closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn begin_occupancy(&self, channel: &str) -> PendingOccupancy {
        match self {
            WebTransport::Host(host) => match host.here_now(channel) {
                Ok(promise) => PendingOccupancy::Host(JsFuture::from(promise)),
                Err(e) => {
                    log::warn!("[transport] hereNow {channel}: {:?}", e);
                    PendingOccupancy::Known(None)
                }
            },
            WebTransport::Offline(lb) => PendingOccupancy::Known(lb.occupancy(channel)),
        }
    }

    /// Hand `out` to the transport. The returned value settles without
    /// holding any borrow of `self`.
    pub fn begin_publish(&mut self, out: &Outbound) -> moodflow_core::Result<PendingPublish> {
        match self {
            WebTransport::Host(host) => {
                let message = js_sys::JSON::parse(&out.event.to_json()?)
                    .map_err(|e| js_failure("encode", e))?;
                let promise = host
                    .publish(&out.channel, &message)
                    .map_err(|e| js_failure("publish", e))?;
                Ok(PendingPublish::Host(JsFuture::from(promise)))
            }
            WebTransport::Offline(lb) => {
                lb.publish(&out.channel, &out.event)?;
                Ok(PendingPublish::Settled)
            }
        }
    }

    pub fn drain_echoes(&mut self) -> Vec<String> {
        match self {
            WebTransport::Host(_) => Vec::new(),
            WebTransport::Offline(lb) => lb.drain_echoes(),
        }
    }
}

impl RoomTransport for WebTransport {
    fn subscribe(&mut self, channel: &str) -> moodflow_core::Result<()> {
        match self {
            WebTransport::Host(host) => host
                .subscribe(channel)
                .map_err(|e| js_failure("subscribe", e)),
            WebTransport::Offline(lb) => lb.subscribe(channel),
        }
    }

    fn unsubscribe(&mut self, channel: &str) -> moodflow_core::Result<()> {
        match self {
            WebTransport::Host(host) => host
                .unsubscribe(channel)
                .map_err(|e| js_failure("unsubscribe", e)),
            WebTransport::Offline(lb) => lb.unsubscribe(channel),
        }
    }
}

/// Wire JSON for an inbound host message object.
pub fn message_json(msg: &JsValue) -> Option<String> {
    if let Some(s) = msg.as_string() {
        return Some(s);
    }
    js_sys::JSON::stringify(msg).ok().map(String::from)
}
