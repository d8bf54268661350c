//! Capability seams between the ticket/theme logic and the page.
//!
//! The browser implementations live in `page`; tests drive the same logic with
//! in-memory fakes.

use crate::cache::Field;
use crate::price::PriceQuote;
use crate::theme::Theme;

/// Presentation of the submit control for one attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,       // original label, enabled
    Submitting, // in-progress label, disabled
    Succeeded,  // success label/style, disabled until the revert fires
    Failed,     // error label/style, enabled for retry
}

/// The live ticket form: its fields, price display, receipt preview and controls.
pub trait FormSurface {
    /// Current value of a control. `ConfirmationMethod` yields the checked radio
    /// value or an empty string.
    fn read_field(&self, field: Field) -> String;
    fn write_field(&mut self, field: Field, value: &str);
    fn read_quantity(&self) -> String;
    fn write_quantity(&mut self, quantity: u32);
    fn render_price(&mut self, quote: &PriceQuote);
    fn show_receipt(&mut self, data_url: &str);
    /// Drop the preview and the "has image" marker, and empty the file picker.
    fn clear_receipt(&mut self);
    fn set_open(&mut self, open: bool);
    fn render_submit(&mut self, phase: SubmitPhase);
    fn reset_fields(&mut self);
    fn alert(&self, message: &str);
}

/// Where the active theme is shown.
pub trait ThemeSurface {
    /// Theme declared by the page markup, if any.
    fn page_default(&self) -> Option<String>;
    fn active(&self) -> Option<String>;
    fn set_active(&mut self, theme: Theme);
    fn set_logo(&mut self, src: &str);
    fn regenerate_shimmer(&mut self);
}

/// Durable key/value preference storage.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}
