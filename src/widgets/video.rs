//! Promo video: play while at least half visible, pause otherwise or when the tab is hidden.

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlVideoElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;

const VISIBLE_THRESHOLD: f64 = 0.5;

fn play(video: &HtmlVideoElement) {
    let Ok(promise) = video.play() else { return };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = JsFuture::from(promise).await {
            gloo::console::log!("Autoplay prevented:", dom::js_error_message(&err));
        }
    });
}

pub fn start(doc: &Document) -> Result<(), JsValue> {
    let Some(video) = dom::by_id::<HtmlVideoElement>(doc, "promo-video") else {
        return Ok(());
    };

    let target = video.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
            if entry.is_intersecting() {
                play(&target);
            } else {
                let _ = target.pause();
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(VISIBLE_THRESHOLD));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(&video);
    callback.forget();

    let page = doc.clone();
    EventListener::new(doc, "visibilitychange", move |_| {
        if page.hidden() {
            let _ = video.pause();
        }
    })
    .forget();
    Ok(())
}
