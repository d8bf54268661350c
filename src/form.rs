//! Ticket form controller.
//!
//! Owns the session cache, the receipt slot and the live form surface, and drives
//! them through two flows:
//! - the open/close toggle (`Closed` ⇄ `Open`, gated by `sold_out`)
//! - submit: validate → build a [`SubmissionRecord`] → dispatch → success/error
//!   presentation → delayed label revert keyed to the attempt number.

use crate::cache::{Field, FormCache};
use crate::config::TicketConfig;
use crate::error::{TransportError, ValidationError};
use crate::price::{self, PriceQuote};
use crate::receipt::{self, PendingDecode, ReceiptEntry, ReceiptMeta, ReceiptSlot};
use crate::submission::{Order, SubmissionRecord, SubmissionStamp, submission_id};
use crate::surface::{FormSurface, SubmitPhase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Closed,
    Open,
}

/// Identifies one submit attempt so late reverts from older attempts are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attempt(u64);

pub struct TicketForm<S: FormSurface> {
    config: TicketConfig,
    cache: FormCache,
    receipts: ReceiptSlot,
    surface: S,
    state: FormState,
    attempt: u64,
    phase: SubmitPhase,
}

impl<S: FormSurface> TicketForm<S> {
    pub fn new(config: TicketConfig, user_agent: impl Into<String>, surface: S) -> Self {
        Self {
            cache: FormCache::new(&config, user_agent),
            receipts: ReceiptSlot::new(),
            config,
            surface,
            state: FormState::Closed,
            attempt: 0,
            phase: SubmitPhase::Idle,
        }
    }

    pub fn config(&self) -> &TicketConfig {
        &self.config
    }

    pub fn cache(&self) -> &FormCache {
        &self.cache
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submit_phase(&self) -> SubmitPhase {
        self.phase
    }

    // --- Toggle ------------------------------------------------------------------

    /// Flip between closed and open. Returns the new state, or `None` when sales
    /// are closed and nothing happened. Opening restores the cached values.
    pub fn toggle(&mut self) -> Option<FormState> {
        if self.config.sold_out {
            return None;
        }
        self.state = match self.state {
            FormState::Closed => {
                self.surface.set_open(true);
                self.cache.restore(&self.config, &mut self.surface);
                FormState::Open
            }
            FormState::Open => {
                self.surface.set_open(false);
                FormState::Closed
            }
        };
        Some(self.state)
    }

    // --- Field caching -----------------------------------------------------------

    pub fn set_field(&mut self, field: Field, value: &str) {
        self.cache.set_field(field, value);
    }

    /// Re-price from a raw quantity value and remember it.
    pub fn select_quantity(&mut self, raw: &str) -> PriceQuote {
        let quote = price::quote(&self.config, raw);
        self.show_quote(quote)
    }

    fn show_quote(&mut self, quote: PriceQuote) -> PriceQuote {
        self.surface.render_price(&quote);
        self.cache.set_ticket_qty(quote.quantity);
        quote
    }

    // --- Receipt -----------------------------------------------------------------

    /// Check a selected file and start its decode. Refusals are reported to the
    /// visitor (except quiet non-image drops) and leave everything unchanged.
    pub fn accept_receipt(&mut self, meta: ReceiptMeta, entry: ReceiptEntry) -> Option<PendingDecode> {
        match self.receipts.accept(meta) {
            Ok(pending) => Some(pending),
            Err(err) => {
                if receipt::should_alert(&err, entry) {
                    self.surface.alert(&err.to_string());
                }
                None
            }
        }
    }

    /// Finish a decode started by [`Self::accept_receipt`]. Stale decodes are dropped.
    pub fn complete_receipt(&mut self, pending: PendingDecode, data_url: String) -> bool {
        self.receipts.complete(pending, data_url, &mut self.cache, &mut self.surface)
    }

    pub fn clear_receipt(&mut self) {
        self.receipts.clear(&mut self.cache, &mut self.surface);
    }

    // --- Submit ------------------------------------------------------------------

    /// Read the live form and check it, first failure wins.
    pub fn validate(&self) -> Result<Order, ValidationError> {
        if self.config.sold_out {
            return Err(ValidationError::SoldOut);
        }
        let full_name = self.surface.read_field(Field::FullName).trim().to_string();
        let email = self.surface.read_field(Field::Email).trim().to_string();
        let phone = self.surface.read_field(Field::Phone).trim().to_string();
        let ticket_qty = price::parse_quantity(&self.surface.read_quantity());
        let confirmation_method = self.surface.read_field(Field::ConfirmationMethod);

        if full_name.is_empty() || email.is_empty() {
            return Err(ValidationError::MissingContact);
        }
        let max = self.config.max_tickets_per_request;
        if !(1..=max).contains(&ticket_qty) {
            return Err(ValidationError::QuantityOutOfRange { max });
        }
        if self.cache.receipt().is_none() {
            return Err(ValidationError::MissingReceipt);
        }
        if confirmation_method.is_empty() {
            return Err(ValidationError::MissingConfirmation);
        }
        Ok(Order { full_name, email, phone, ticket_qty, confirmation_method })
    }

    /// Validate and build the outbound record. On success the submit control is
    /// put into its in-progress state; on failure the visitor is told why and
    /// nothing changes.
    pub fn prepare_submission(
        &mut self,
        stamp: SubmissionStamp,
        entropy: u64,
    ) -> Result<(Attempt, SubmissionRecord), ValidationError> {
        if self.phase == SubmitPhase::Submitting {
            return Err(ValidationError::InFlight);
        }
        let order = match self.validate() {
            Ok(order) => order,
            Err(err) => {
                self.surface.alert(&err.to_string());
                return Err(err);
            }
        };
        let Some(receipt) = self.cache.receipt() else {
            return Err(ValidationError::MissingReceipt);
        };
        let id = submission_id(stamp.millis, entropy);
        let record = SubmissionRecord::new(order, &self.config, receipt, id.clone(), &stamp);
        self.cache.submission_id = id;
        self.cache.timestamp = stamp.iso;

        self.attempt += 1;
        self.set_phase(SubmitPhase::Submitting);
        Ok((Attempt(self.attempt), record))
    }

    /// Apply the dispatch outcome of `attempt`. Success clears the form and the cache.
    pub fn finish_submission(&mut self, attempt: Attempt, outcome: &Result<(), TransportError>) {
        if attempt.0 != self.attempt {
            return;
        }
        match outcome {
            Ok(()) => {
                self.set_phase(SubmitPhase::Succeeded);
                self.surface.reset_fields();
                self.clear_receipt();
                self.show_quote(price::quote_quantity(&self.config, 0));
                self.cache.reset(&self.config);
            }
            Err(_) => self.set_phase(SubmitPhase::Failed),
        }
    }

    /// Restore the submit control after the post-submit delay. Returns false for
    /// a revert that belongs to an older attempt.
    pub fn revert_submit(&mut self, attempt: Attempt) -> bool {
        if attempt.0 != self.attempt || self.phase == SubmitPhase::Submitting {
            return false;
        }
        self.set_phase(SubmitPhase::Idle);
        true
    }

    fn set_phase(&mut self, phase: SubmitPhase) {
        self.phase = phase;
        self.surface.render_submit(phase);
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// In-memory stand-in for the live form.
    #[derive(Debug, Default)]
    pub struct FakeForm {
        pub fields: std::collections::HashMap<&'static str, String>,
        pub quantity: String,
        pub price_shown: Option<PriceQuote>,
        pub preview: Option<String>,
        pub open: bool,
        pub submit: Vec<SubmitPhase>,
        pub alerts: std::cell::RefCell<Vec<String>>,
        pub resets: u32,
    }

    fn key(field: Field) -> &'static str {
        match field {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::ConfirmationMethod => "confirmationMethod",
        }
    }

    impl FakeForm {
        pub fn typed(&mut self, field: Field, value: &str) {
            self.fields.insert(key(field), value.to_string());
        }
    }

    impl FormSurface for FakeForm {
        fn read_field(&self, field: Field) -> String {
            self.fields.get(key(field)).cloned().unwrap_or_default()
        }
        fn write_field(&mut self, field: Field, value: &str) {
            self.typed(field, value);
        }
        fn read_quantity(&self) -> String {
            self.quantity.clone()
        }
        fn write_quantity(&mut self, quantity: u32) {
            self.quantity = quantity.to_string();
        }
        fn render_price(&mut self, quote: &PriceQuote) {
            self.price_shown = Some(quote.clone());
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
            self.submit.push(phase);
        }
        fn reset_fields(&mut self) {
            self.fields.clear();
            self.quantity.clear();
            self.resets += 1;
        }
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }
}
