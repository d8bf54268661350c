//! In-page anchors scroll smoothly instead of jumping.

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;

pub fn start(doc: &Document) -> Result<(), JsValue> {
    for anchor in dom::query_all::<Element>(doc, r##"a[href^="#"]"##) {
        let page = doc.clone();
        let link = anchor.clone();
        EventListener::new_with_options(&anchor, "click", EventListenerOptions::enable_prevent_default(), move |e| {
            e.prevent_default();
            let Some(href) = link.get_attribute("href") else { return };
            // A bare "#" is not a valid selector; query_selector reports it as an error.
            if let Ok(Some(target)) = page.query_selector(&href) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })
        .forget();
    }
    Ok(())
}
