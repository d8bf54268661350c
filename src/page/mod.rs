//! Page bootstrap and ticket form wiring.
//!
//! Order matters: the theme goes first (it drives visuals), then the sold-out
//! gate decides whether any purchase listeners are attached. Ambient widgets
//! start regardless.

pub mod web_form;
pub mod web_theme;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, DragEvent, HtmlButtonElement, HtmlElement};

use crate::cache::Field;
use crate::config::{ENDPOINT, FOCUS_DELAY_MS, SUBMIT_REVERT_MS, TICKETS, TicketConfig};
use crate::error::ReceiptError;
use crate::form::{FormState, TicketForm};
use crate::receipt::{ReceiptEntry, ReceiptMeta};
use crate::submission::{self, SubmissionStamp};
use crate::surface::FormSurface;
use crate::widgets::{countdown, qr_menu, reveal, shimmer, smooth_scroll, video};
use crate::{dom, rng};

use self::web_form::WebForm;

/// The single ticket session for this page load.
type Session = Rc<RefCell<TicketForm<WebForm>>>;

/// Run [`init`] once the document has been parsed.
pub fn start() -> Result<(), JsValue> {
    let doc = dom::document()?;
    if doc.ready_state() == "loading" {
        EventListener::once(&doc, "DOMContentLoaded", |_| report("init", init())).forget();
        Ok(())
    } else {
        init()
    }
}

fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        console::error!(format!("{what} failed: {}", dom::js_error_message(&err)));
    }
}

pub fn init() -> Result<(), JsValue> {
    console::log!("Midnight Anarchy - Initializing...");
    let doc = dom::document()?;

    report("theme", web_theme::start(&doc));
    let sold_out = show_sold_out(&doc, &TICKETS);

    report("shimmer", shimmer::render(&doc).and_then(|_| shimmer::watch_resize()));
    report("scroll reveal", reveal::start(&doc));
    report("video", video::start(&doc));
    report("smooth scroll", smooth_scroll::start(&doc));
    report("countdown", countdown::start(&doc));
    report("qr menu", qr_menu::start(&doc));

    if !sold_out {
        wire_ticket_form(&doc)?;
    }

    dom::body(&doc)?.class_list().add_1("loaded")?;
    console::log!("Midnight Anarchy - Ready");
    Ok(())
}

/// Reflect a sold-out configuration on the page. Returns whether sales are closed.
fn show_sold_out(doc: &Document, config: &TicketConfig) -> bool {
    if !config.sold_out {
        return false;
    }
    if let Some(banner) = dom::by_id::<HtmlElement>(doc, "sold-out-banner") {
        banner.set_hidden(false);
    }
    if let Some(toggle) = dom::by_id::<HtmlButtonElement>(doc, "ticket-toggle") {
        dom::set_class(&toggle, "sold-out", true);
        toggle.set_disabled(true);
        toggle.set_text_content(Some("Sold Out"));
    }
    if let Some(container) = doc.get_element_by_id("ticket-form-container") {
        dom::set_class(&container, "active", false);
    }
    true
}

// --- Ticket form --------------------------------------------------------------------

fn wire_ticket_form(doc: &Document) -> Result<(), JsValue> {
    let web = WebForm::new(doc);
    let user_agent = dom::window()?.navigator().user_agent().unwrap_or_default();
    let session: Session = Rc::new(RefCell::new(TicketForm::new(TICKETS, user_agent, web.clone())));

    wire_receipt(&web, &session);
    wire_field_cache(&web, &session);
    wire_price(&web, &session);
    wire_submit(&web, &session);
    wire_toggle(&web, &session);
    Ok(())
}

fn wire_toggle(web: &WebForm, session: &Session) {
    let (Some(toggle), Some(_)) = (&web.toggle, &web.container) else {
        console::error!("Ticket form elements not found");
        return;
    };
    let session = session.clone();
    let focus = web.clone();
    EventListener::new(toggle, "click", move |_| {
        let state = session.borrow_mut().toggle();
        if state == Some(FormState::Open) {
            let focus = focus.clone();
            Timeout::new(FOCUS_DELAY_MS, move || focus.focus_first_input()).forget();
        }
    })
    .forget();
    console::log!("Ticket toggle initialized");
}

fn wire_field_cache(web: &WebForm, session: &Session) {
    for (field, input) in web.text_inputs() {
        for event in ["input", "change"] {
            let session = session.clone();
            let source = input.clone();
            EventListener::new(&input, event, move |_| {
                session.borrow_mut().set_field(field, &source.value());
            })
            .forget();
        }
    }
    for radio in web.confirmation_radios() {
        let session = session.clone();
        let source = radio.clone();
        EventListener::new(&radio, "change", move |_| {
            session.borrow_mut().set_field(Field::ConfirmationMethod, &source.value());
        })
        .forget();
    }
}

fn wire_price(web: &WebForm, session: &Session) {
    session.borrow_mut().select_quantity("0");
    let Some(select) = web.quantity.clone() else { return };
    let session = session.clone();
    let source = select.clone();
    EventListener::new(&select, "change", move |_| {
        session.borrow_mut().select_quantity(&source.value());
    })
    .forget();
}

// --- Receipt upload -------------------------------------------------------------------

fn stage_receipt(session: &Session, file: web_sys::File, entry: ReceiptEntry) {
    let file = gloo::file::File::from(file);
    let meta = ReceiptMeta { name: file.name(), mime: file.raw_mime_type(), size: file.size() };
    let Some(pending) = session.borrow_mut().accept_receipt(meta, entry) else {
        return;
    };
    let session = session.clone();
    spawn_local(async move {
        match gloo::file::futures::read_as_data_url(&file).await {
            Ok(data_url) => {
                session.borrow_mut().complete_receipt(pending, data_url);
            }
            Err(err) => {
                let err = ReceiptError::Decode(err.to_string());
                console::error!(err.to_string());
                session.borrow().surface().alert(&err.to_string());
            }
        }
    });
}

fn wire_receipt(web: &WebForm, session: &Session) {
    let Some(input) = web.file_input.clone() else { return };

    {
        let session = session.clone();
        let source = input.clone();
        EventListener::new(&input, "change", move |_| {
            if let Some(file) = source.files().and_then(|files| files.get(0)) {
                stage_receipt(&session, file, ReceiptEntry::Picker);
            }
        })
        .forget();
    }

    if let Some(upload) = web.upload.clone() {
        {
            let target = upload.clone();
            EventListener::new_with_options(&upload, "dragover", EventListenerOptions::enable_prevent_default(), move |e| {
                e.prevent_default();
                dom::set_class(&target, "dragover", true);
            })
            .forget();
        }
        {
            let target = upload.clone();
            EventListener::new(&upload, "dragleave", move |_| dom::set_class(&target, "dragover", false)).forget();
        }
        let session = session.clone();
        let target = upload.clone();
        EventListener::new_with_options(&upload, "drop", EventListenerOptions::enable_prevent_default(), move |e| {
            e.prevent_default();
            dom::set_class(&target, "dragover", false);
            let file = e
                .dyn_ref::<DragEvent>()
                .and_then(|drag| drag.data_transfer())
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                stage_receipt(&session, file, ReceiptEntry::Drop);
            }
        })
        .forget();
    }

    if let Some(remove) = &web.remove_button {
        let session = session.clone();
        EventListener::new(remove, "click", move |_| session.borrow_mut().clear_receipt()).forget();
    }
}

// --- Submit -----------------------------------------------------------------------------

fn submit(session: &Session) {
    let prepared = session.borrow_mut().prepare_submission(SubmissionStamp::now(), rng::next_u64());
    let Ok((attempt, record)) = prepared else {
        return;
    };
    let session = session.clone();
    spawn_local(async move {
        let outcome = submission::dispatch(&ENDPOINT, record).await;
        if let Err(err) = &outcome {
            console::error!(format!("Form submission error: {err}"));
        }
        session.borrow_mut().finish_submission(attempt, &outcome);
        Timeout::new(SUBMIT_REVERT_MS, move || {
            session.borrow_mut().revert_submit(attempt);
        })
        .forget();
    });
}

fn wire_submit(web: &WebForm, session: &Session) {
    let Some(form) = &web.form else { return };
    let session = session.clone();
    EventListener::new_with_options(form, "submit", EventListenerOptions::enable_prevent_default(), move |e| {
        e.prevent_default();
        // Without a button there is nothing to lock out repeat submissions.
        if !session.borrow().surface().has_submit_control() {
            console::error!("Submit button not found");
            return;
        }
        submit(&session);
    })
    .forget();
}
