use moodflow_core::Dimensions;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} is not a canvas: {:?}", e)))
}

/// Run `handler` for every element matching `selector`, passing the element.
pub fn add_click_listeners(
    document: &web::Document,
    selector: &str,
    handler: impl Fn(web::HtmlElement) + Clone + 'static,
) {
    let Ok(nodes) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {selector}");
        return;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) else {
            continue;
        };
        let handler = handler.clone();
        let target = el.clone();
        let closure = Closure::wrap(Box::new(move || handler(target.clone())) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn data_attr(el: &web::HtmlElement, key: &str) -> Option<String> {
    el.dataset().get(key).filter(|v| !v.is_empty())
}

/// Match the canvas backing store to its laid-out CSS size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Dimensions {
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() as u32).max(1);
    let h_px = (rect.height() as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    Dimensions::new(w_px as f32, h_px as f32)
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}
