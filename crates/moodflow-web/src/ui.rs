use moodflow_core::{FeedEntry, MoodFeed};
use wasm_bindgen::JsValue;
use web_sys as web;

pub const ACTIVE_COUNT_ID: &str = "activeVibes";
pub const FEED_LIST_ID: &str = "messageList";
pub const ONLINE_COUNT_ID: &str = "onlineCount";

/// Rebuild the feed list, newest on top.
pub fn render_feed(document: &web::Document, feed: &MoodFeed) {
    let Some(list) = document.get_element_by_id(FEED_LIST_ID) else {
        return;
    };
    list.set_inner_html("");
    for entry in feed.entries() {
        if let Some(row) = feed_row(document, entry) {
            _ = list.append_child(&row);
        }
    }
}

fn feed_row(document: &web::Document, entry: &FeedEntry) -> Option<web::Element> {
    let row = document.create_element("div").ok()?;
    row.set_class_name("message");
    _ = row.set_attribute("style", &format!("border-left-color: {}", entry.color.to_hex()));

    let time: String = js_sys::Date::new(&JsValue::from_f64(entry.timestamp))
        .to_locale_time_string("default")
        .into();
    for (class, text) in [
        ("message-emoji", entry.glyph.clone()),
        ("message-text", entry.caption()),
        ("message-time", time),
    ] {
        let span = document.create_element("span").ok()?;
        span.set_class_name(class);
        span.set_text_content(Some(&text));
        _ = row.append_child(&span);
    }
    Some(row)
}
