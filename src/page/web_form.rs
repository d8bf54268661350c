//! `FormSurface` over the real ticket form markup.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement,
    HtmlSelectElement,
};

use crate::cache::Field;
use crate::dom;
use crate::price::PriceQuote;
use crate::surface::{FormSurface, SubmitPhase};

const CONFIRMATION_RADIOS: &str = r#"input[name="confirmationMethod"]"#;
const CHECKED_CONFIRMATION: &str = r#"input[name="confirmationMethod"]:checked"#;

pub const LABEL_CLOSED: &str = "Buy Tickets";
pub const LABEL_OPEN: &str = "Close";
const LABEL_SUBMITTING: &str = "Submitting...";
const LABEL_SUBMITTED: &str = "Submitted!";
const LABEL_FAILED: &str = "Error - Try Again";
const SUCCESS_BACKGROUND: &str = "linear-gradient(135deg, #2ecc71, #27ae60)";
const ERROR_BACKGROUND: &str = "linear-gradient(135deg, #e74c3c, #c0392b)";

/// Handles to the form's elements, looked up once. Missing elements are skipped.
#[derive(Clone)]
pub struct WebForm {
    doc: Document,
    pub toggle: Option<HtmlElement>,
    pub container: Option<Element>,
    pub form: Option<HtmlFormElement>,
    pub quantity: Option<HtmlSelectElement>,
    unit_price: Option<Element>,
    qty_display: Option<Element>,
    total_display: Option<Element>,
    pub upload: Option<Element>,
    preview: Option<Element>,
    preview_img: Option<HtmlImageElement>,
    pub file_input: Option<HtmlInputElement>,
    pub remove_button: Option<Element>,
    submit: Option<HtmlButtonElement>,
    submit_label: String, // label to restore after a submit attempt
}

impl WebForm {
    pub fn new(doc: &Document) -> Self {
        let submit: Option<HtmlButtonElement> = dom::by_id(doc, "form-submit");
        let submit_label = submit
            .as_ref()
            .and_then(|b| b.text_content())
            .unwrap_or_else(|| "Submit".to_string());
        Self {
            doc: doc.clone(),
            toggle: dom::by_id(doc, "ticket-toggle"),
            container: dom::by_id(doc, "ticket-form-container"),
            form: dom::by_id(doc, "ticket-form"),
            quantity: dom::by_id(doc, "ticket-qty"),
            unit_price: dom::by_id(doc, "price-per-ticket"),
            qty_display: dom::by_id(doc, "qty-display"),
            total_display: dom::by_id(doc, "total-price"),
            upload: dom::by_id(doc, "image-upload-container"),
            preview: dom::by_id(doc, "image-preview"),
            preview_img: dom::by_id(doc, "preview-img"),
            file_input: dom::by_id(doc, "receipt-image"),
            remove_button: dom::by_id(doc, "remove-image"),
            submit,
            submit_label,
        }
    }

    fn text_input(&self, field: Field) -> Option<HtmlInputElement> {
        dom::by_id(&self.doc, field.element_id()?)
    }

    pub fn text_inputs(&self) -> Vec<(Field, HtmlInputElement)> {
        Field::TEXT
            .into_iter()
            .filter_map(|f| Some((f, self.text_input(f)?)))
            .collect()
    }

    pub fn confirmation_radios(&self) -> Vec<HtmlInputElement> {
        dom::query_all(&self.doc, CONFIRMATION_RADIOS)
    }

    /// Whether the page has a submit button to lock while a request is out.
    pub fn has_submit_control(&self) -> bool {
        self.submit.is_some()
    }

    pub fn focus_first_input(&self) {
        let first = self
            .container
            .as_ref()
            .and_then(|c| c.query_selector(r#"input[type="text"]"#).ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(input) = first {
            let _ = input.focus();
        }
    }
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

impl FormSurface for WebForm {
    fn read_field(&self, field: Field) -> String {
        match field {
            Field::ConfirmationMethod => self
                .doc
                .query_selector(CHECKED_CONFIRMATION)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|radio| radio.value())
                .unwrap_or_default(),
            _ => self.text_input(field).map(|i| i.value()).unwrap_or_default(),
        }
    }

    fn write_field(&mut self, field: Field, value: &str) {
        match field {
            Field::ConfirmationMethod => {
                if let Some(radio) = self.confirmation_radios().into_iter().find(|r| r.value() == value) {
                    radio.set_checked(true);
                }
            }
            _ => {
                if let Some(input) = self.text_input(field) {
                    input.set_value(value);
                }
            }
        }
    }

    fn read_quantity(&self) -> String {
        self.quantity.as_ref().map(|q| q.value()).unwrap_or_default()
    }

    fn write_quantity(&mut self, quantity: u32) {
        if let Some(select) = &self.quantity {
            select.set_value(&quantity.to_string());
        }
    }

    fn render_price(&mut self, quote: &PriceQuote) {
        set_text(&self.unit_price, &quote.unit_formatted);
        set_text(&self.qty_display, &quote.quantity.to_string());
        set_text(&self.total_display, &quote.total_formatted);
    }

    fn show_receipt(&mut self, data_url: &str) {
        if let Some(img) = &self.preview_img {
            img.set_src(data_url);
        }
        if let Some(preview) = &self.preview {
            dom::set_class(preview, "active", true);
        }
        if let Some(upload) = &self.upload {
            dom::set_class(upload, "has-image", true);
        }
    }

    fn clear_receipt(&mut self) {
        if let Some(img) = &self.preview_img {
            img.set_src("");
        }
        if let Some(preview) = &self.preview {
            dom::set_class(preview, "active", false);
        }
        if let Some(upload) = &self.upload {
            dom::set_class(upload, "has-image", false);
        }
        // Lets the same file be picked again.
        if let Some(input) = &self.file_input {
            input.set_value("");
        }
    }

    fn set_open(&mut self, open: bool) {
        if let Some(container) = &self.container {
            dom::set_class(container, "active", open);
        }
        if let Some(toggle) = &self.toggle {
            let _ = toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });
            toggle.set_text_content(Some(if open { LABEL_OPEN } else { LABEL_CLOSED }));
        }
    }

    fn render_submit(&mut self, phase: SubmitPhase) {
        let Some(button) = &self.submit else { return };
        let (label, background, disabled) = match phase {
            SubmitPhase::Idle => (self.submit_label.as_str(), None, false),
            SubmitPhase::Submitting => (LABEL_SUBMITTING, None, true),
            SubmitPhase::Succeeded => (LABEL_SUBMITTED, Some(SUCCESS_BACKGROUND), true),
            SubmitPhase::Failed => (LABEL_FAILED, Some(ERROR_BACKGROUND), false),
        };
        button.set_text_content(Some(label));
        button.set_disabled(disabled);
        let style = button.style();
        let _ = match background {
            Some(bg) => style.set_property("background", bg),
            None => style.remove_property("background").map(|_| ()),
        };
    }

    fn reset_fields(&mut self) {
        if let Some(form) = &self.form {
            form.reset();
        }
    }

    fn alert(&self, message: &str) {
        dom::alert(message);
    }
}
