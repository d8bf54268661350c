//! Fade-in-zoom on scroll. Elements marked `.fade-in-zoom` gain `visible` the
//! first time they enter the viewport; with reduced motion they are shown at once.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;

const SELECTOR: &str = ".fade-in-zoom";
const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

fn prefers_reduced_motion() -> bool {
    dom::window()
        .ok()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|mq| mq.matches())
}

pub fn start(doc: &Document) -> Result<(), JsValue> {
    let targets: Vec<Element> = dom::query_all(doc, SELECTOR);
    if targets.is_empty() {
        return Ok(());
    }
    if prefers_reduced_motion() {
        for el in &targets {
            dom::set_class(el, "visible", true);
        }
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
            if entry.is_intersecting() {
                dom::set_class(&entry.target(), "visible", true);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for el in &targets {
        observer.observe(el);
    }
    callback.forget();
    Ok(())
}
