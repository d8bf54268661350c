//! Payment QR menu: toggle, click-away close and download.

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlImageElement};

use crate::dom;

pub const DOWNLOAD_NAME: &str = "midnight-anarchy-payment-qr.png";
const NOT_READY: &str = "QR code image not yet available. Check back soon!";

pub fn start(doc: &Document) -> Result<(), JsValue> {
    let (Some(button), Some(menu)) = (
        doc.get_element_by_id("qr-menu-btn"),
        doc.get_element_by_id("qr-menu"),
    ) else {
        return Ok(());
    };

    {
        let menu = menu.clone();
        EventListener::new(&button, "click", move |e| {
            e.stop_propagation();
            dom::toggle_class(&menu, "active");
        })
        .forget();
    }
    {
        let menu = menu.clone();
        EventListener::new(doc, "click", move |_| dom::set_class(&menu, "active", false)).forget();
    }

    if let (Some(download), Some(image)) = (
        doc.get_element_by_id("qr-download"),
        doc.get_element_by_id("qr-image"),
    ) {
        EventListener::new(&download, "click", move |_| {
            dom::set_class(&menu, "active", false);
            if let Err(err) = download_image(&image) {
                gloo::console::error!(format!("QR download failed: {}", dom::js_error_message(&err)));
            }
        })
        .forget();
    }
    Ok(())
}

/// Save the QR image through a temporary link, or explain it is not ready yet.
fn download_image(image: &Element) -> Result<(), JsValue> {
    let src = image
        .dyn_ref::<HtmlImageElement>()
        .map(|img| img.src())
        .filter(|src| !src.is_empty());
    let Some(src) = src else {
        dom::alert(NOT_READY);
        return Ok(());
    };
    let doc = dom::document()?;
    let body = dom::body(&doc)?;
    let link: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    link.set_download(DOWNLOAD_NAME);
    link.set_href(&src);
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    Ok(())
}
