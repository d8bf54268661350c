// Integration tests (native) for the `midnight-anarchy` crate.
// These tests avoid wasm-specific functionality and drive the ticket and theme
// logic through in-memory surfaces so they can run under `cargo test` on the host.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use midnight_anarchy::cache::Field;
use midnight_anarchy::config::{TICKETS, TicketConfig};
use midnight_anarchy::error::{TransportError, ValidationError};
use midnight_anarchy::form::{FormState, TicketForm};
use midnight_anarchy::price::PriceQuote;
use midnight_anarchy::receipt::{ReceiptEntry, ReceiptMeta};
use midnight_anarchy::submission::SubmissionStamp;
use midnight_anarchy::surface::{FormSurface, PreferenceStore, SubmitPhase, ThemeSurface};
use midnight_anarchy::theme::{self, Theme, ThemeManager};

#[derive(Default)]
struct Form {
    fields: HashMap<String, String>,
    quantity: String,
    price: Option<PriceQuote>,
    preview: Option<String>,
    open: bool,
    phases: Vec<SubmitPhase>,
    alerts: RefCell<Vec<String>>,
}

impl Form {
    fn type_in(&mut self, field: Field, value: &str) {
        self.fields.insert(format!("{field:?}"), value.to_string());
    }
}

impl FormSurface for Form {
    fn read_field(&self, field: Field) -> String {
        self.fields.get(&format!("{field:?}")).cloned().unwrap_or_default()
    }
    fn write_field(&mut self, field: Field, value: &str) {
        self.type_in(field, value);
    }
    fn read_quantity(&self) -> String {
        self.quantity.clone()
    }
    fn write_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.to_string();
    }
    fn render_price(&mut self, quote: &PriceQuote) {
        self.price = Some(quote.clone());
    }
    fn show_receipt(&mut self, data_url: &str) {
        self.preview = Some(data_url.to_string());
    }
    fn clear_receipt(&mut self) {
        self.preview = None;
    }
    fn set_open(&mut self, open: bool) {
        self.open = open;
    }
    fn render_submit(&mut self, phase: SubmitPhase) {
        self.phases.push(phase);
    }
    fn reset_fields(&mut self) {
        self.fields.clear();
        self.quantity.clear();
    }
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

fn png(size: u64) -> ReceiptMeta {
    ReceiptMeta { name: "receipt.png".into(), mime: "image/png".into(), size }
}

fn stamp() -> SubmissionStamp {
    let utc = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    SubmissionStamp::at(utc, &Utc)
}

fn filled_form() -> TicketForm<Form> {
    let mut form = TicketForm::new(TICKETS, "test-agent", Form::default());
    form.toggle();
    let pending = form.accept_receipt(png(1024), ReceiptEntry::Picker).unwrap();
    assert!(form.complete_receipt(pending, "data:image/png;base64,AAAA".into()));
    form.select_quantity("3");
    let surface = form.surface_mut();
    surface.type_in(Field::FullName, "Jane Doe");
    surface.type_in(Field::Email, "jane@example.com");
    surface.type_in(Field::ConfirmationMethod, "email");
    surface.quantity = "3".into();
    form
}

// Happy path: a complete form produces one pending record and then clears.
#[test]
fn complete_order_is_recorded_and_cleared() {
    let mut form = filled_form();
    let (attempt, record) = form.prepare_submission(stamp(), 1_215_541_621).unwrap();

    let id = &record.submission_id;
    let parts: Vec<&str> = id.split('-').collect();
    assert_eq!(parts.len(), 3, "unexpected id {id}");
    assert_eq!(parts[0], "MA");
    assert!(parts[1].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    assert_eq!(parts[2], "K3P9X1");
    assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));

    assert_eq!(record.full_name, "Jane Doe");
    assert_eq!(record.ticket_qty, 3);
    assert_eq!(record.total_amount, 150.0);
    assert_eq!(record.total_formatted, "RM 150.00");
    assert_eq!(record.phone, "Not provided");
    assert_eq!(record.status, "Pending");
    assert_eq!(record.timestamp, "2026-10-16T12:00:00.000Z");
    assert_eq!(form.submit_phase(), SubmitPhase::Submitting);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["totalFormatted"], "RM 150.00");
    assert_eq!(json["confirmationMethod"], "email");

    form.finish_submission(attempt, &Ok(()));
    assert_eq!(form.submit_phase(), SubmitPhase::Succeeded);
    assert!(form.cache().receipt().is_none());
    assert_eq!(form.cache().ticket_qty(), 0);
    assert_eq!(form.cache().full_name, "");
    assert_eq!(form.surface().price.as_ref().map(|q| q.total_formatted.as_str()), Some("RM 0.00"));
    assert!(form.surface().preview.is_none());

    assert!(form.revert_submit(attempt));
    assert_eq!(form.submit_phase(), SubmitPhase::Idle);
}

#[test]
fn failed_dispatch_keeps_the_form() {
    let mut form = filled_form();
    let (attempt, _) = form.prepare_submission(stamp(), 0).unwrap();
    form.finish_submission(attempt, &Err(TransportError::Request("offline".into())));
    assert_eq!(form.submit_phase(), SubmitPhase::Failed);
    assert!(form.cache().receipt().is_some());
    assert_eq!(form.surface().read_field(Field::FullName), "Jane Doe");
}

#[test]
fn validation_failures_alert_in_order() {
    let mut form = TicketForm::new(TICKETS, "test-agent", Form::default());
    assert_eq!(form.prepare_submission(stamp(), 0).unwrap_err(), ValidationError::MissingContact);

    form.surface_mut().type_in(Field::FullName, "Jane");
    form.surface_mut().type_in(Field::Email, "jane@example.com");
    form.surface_mut().quantity = "9".into();
    assert_eq!(
        form.prepare_submission(stamp(), 0).unwrap_err(),
        ValidationError::QuantityOutOfRange { max: 5 }
    );

    form.surface_mut().quantity = "2".into();
    assert_eq!(form.prepare_submission(stamp(), 0).unwrap_err(), ValidationError::MissingReceipt);

    let alerts = form.surface().alerts.borrow().clone();
    assert_eq!(
        alerts,
        vec![
            "Please fill in your name and email.".to_string(),
            "Please select between 1 and 5 tickets.".to_string(),
            "Please upload your payment receipt screenshot.".to_string(),
        ]
    );
    assert!(form.surface().phases.is_empty());
}

// Values typed before closing the form come back when it is reopened.
#[test]
fn cache_survives_close_and_reopen() {
    let mut form = TicketForm::new(TICKETS, "test-agent", Form::default());
    assert_eq!(form.toggle(), Some(FormState::Open));
    form.set_field(Field::FullName, "Jane Doe");
    form.set_field(Field::Phone, "+60 12 345 6789");
    form.set_field(Field::ConfirmationMethod, "whatsapp");
    form.select_quantity("4");
    assert_eq!(form.toggle(), Some(FormState::Closed));

    form.surface_mut().fields.clear();
    form.surface_mut().quantity.clear();

    assert_eq!(form.toggle(), Some(FormState::Open));
    let surface = form.surface();
    assert!(surface.open);
    assert_eq!(surface.read_field(Field::FullName), "Jane Doe");
    assert_eq!(surface.read_field(Field::Phone), "+60 12 345 6789");
    assert_eq!(surface.read_field(Field::ConfirmationMethod), "whatsapp");
    assert_eq!(surface.read_quantity(), "4");
    assert_eq!(form.cache().total_amount(), 200.0);
}

#[test]
fn sold_out_blocks_toggle_and_submit() {
    let config = TicketConfig { sold_out: true, ..TICKETS };
    let mut form = TicketForm::new(config, "test-agent", Form::default());
    assert_eq!(form.toggle(), None);
    assert_eq!(form.state(), FormState::Closed);
    assert!(!form.surface().open);
    assert_eq!(form.validate().unwrap_err(), ValidationError::SoldOut);
}

#[test]
fn oversized_and_dropped_non_images() {
    let mut form = TicketForm::new(TICKETS, "test-agent", Form::default());
    assert!(form.accept_receipt(png(6 * 1024 * 1024), ReceiptEntry::Drop).is_none());
    let pdf = ReceiptMeta { name: "receipt.pdf".into(), mime: "application/pdf".into(), size: 10 };
    assert!(form.accept_receipt(pdf, ReceiptEntry::Drop).is_none());
    assert_eq!(
        *form.surface().alerts.borrow(),
        vec!["Image too large. Please upload an image smaller than 5MB.".to_string()]
    );
}

#[test]
fn removing_a_receipt_discards_an_inflight_decode() {
    let mut form = TicketForm::new(TICKETS, "test-agent", Form::default());
    let pending = form.accept_receipt(png(10), ReceiptEntry::Picker).unwrap();
    form.clear_receipt();
    assert!(!form.complete_receipt(pending, "data:image/png;base64,AAAA".into()));
    assert!(form.cache().receipt().is_none());
    assert!(form.surface().preview.is_none());
}

// --- Themes ---------------------------------------------------------------------

#[derive(Default)]
struct Prefs(HashMap<String, String>);

impl PreferenceStore for Prefs {
    fn load(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
    fn save(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

#[derive(Default)]
struct Page {
    declared: Option<String>,
    active: Option<String>,
    logo: String,
    shimmer_builds: u32,
}

impl ThemeSurface for Page {
    fn page_default(&self) -> Option<String> {
        self.declared.clone()
    }
    fn active(&self) -> Option<String> {
        self.active.clone()
    }
    fn set_active(&mut self, theme: Theme) {
        self.active = Some(theme.as_str().to_string());
    }
    fn set_logo(&mut self, src: &str) {
        self.logo = src.to_string();
    }
    fn regenerate_shimmer(&mut self) {
        self.shimmer_builds += 1;
    }
}

#[test]
fn unknown_saved_theme_falls_back_to_diamond() {
    let mut prefs = Prefs::default();
    prefs.save(theme::STORAGE_KEY, "neon");
    let mut themes = ThemeManager::new(prefs, Page::default());
    assert_eq!(themes.init(), Theme::Diamond);
    assert_eq!(themes.current(), Theme::Diamond);
    assert_eq!(themes.store().load(theme::STORAGE_KEY).as_deref(), Some("diamond"));
}

#[test]
fn page_default_used_without_saved_choice() {
    let page = Page { declared: Some("rosegold".into()), ..Page::default() };
    let mut themes = ThemeManager::new(Prefs::default(), page);
    assert_eq!(themes.init(), Theme::RoseGold);
    assert_eq!(themes.surface().logo, "img/midnightanarchy-rosegold-nobg.png");

    assert_eq!(themes.apply("cream"), Theme::Cream);
    assert_eq!(themes.surface().logo, "img/midnightanarchy-gold-nobg.png");
    assert_eq!(themes.surface().shimmer_builds, 2);
    assert_eq!(themes.store().load(theme::STORAGE_KEY).as_deref(), Some("cream"));
}
