//! In-session mirror of the ticket form.
//!
//! The cache survives closing and reopening the form but is never written to
//! durable storage, so receipt images are not kept past the page session.

use crate::config::TicketConfig;
use crate::price;
use crate::surface::FormSurface;

/// Form values the visitor edits directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Phone,
    ConfirmationMethod,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::FullName, Field::Email, Field::Phone, Field::ConfirmationMethod];
    pub const TEXT: [Field; 3] = [Field::FullName, Field::Email, Field::Phone];

    /// Element id of the text input backing this field (radios have none).
    pub fn element_id(self) -> Option<&'static str> {
        match self {
            Field::FullName => Some("full-name"),
            Field::Email => Some("email"),
            Field::Phone => Some("phone"),
            Field::ConfirmationMethod => None,
        }
    }

    pub fn from_element_id(id: &str) -> Option<Field> {
        Field::TEXT.into_iter().find(|f| f.element_id() == Some(id))
    }
}

/// A decoded receipt image ready for display and transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiptImage {
    pub data_url: String,
    pub file_name: String,
    pub file_type: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormCache {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    ticket_qty: u32,
    pub event_name: String,
    pub price_per_ticket: f64,
    total_amount: f64, // always ticket_qty * price_per_ticket
    receipt: Option<ReceiptImage>,
    pub confirmation_method: String,
    // Filled in when a submission is prepared.
    pub timestamp: String,
    pub user_agent: String,
    pub submission_id: String,
}

impl FormCache {
    pub fn new(config: &TicketConfig, user_agent: impl Into<String>) -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            ticket_qty: 0,
            event_name: config.event_name.to_string(),
            price_per_ticket: config.price_per_ticket,
            total_amount: 0.0,
            receipt: None,
            confirmation_method: String::new(),
            timestamp: String::new(),
            user_agent: user_agent.into(),
            submission_id: String::new(),
        }
    }

    /// Fresh defaults for `config`, keeping the browser's user agent.
    pub fn reset(&mut self, config: &TicketConfig) {
        let user_agent = std::mem::take(&mut self.user_agent);
        *self = FormCache::new(config, user_agent);
    }

    pub fn set_field(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::ConfirmationMethod => &mut self.confirmation_method,
        };
        slot.clear();
        slot.push_str(value);
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::ConfirmationMethod => &self.confirmation_method,
        }
    }

    pub fn ticket_qty(&self) -> u32 {
        self.ticket_qty
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn set_ticket_qty(&mut self, qty: u32) {
        self.ticket_qty = qty;
        self.total_amount = qty as f64 * self.price_per_ticket;
    }

    pub fn receipt(&self) -> Option<&ReceiptImage> {
        self.receipt.as_ref()
    }

    pub fn receipt_file_name(&self) -> &str {
        self.receipt.as_ref().map_or("", |r| r.file_name.as_str())
    }

    pub fn receipt_file_type(&self) -> &str {
        self.receipt.as_ref().map_or("", |r| r.file_type.as_str())
    }

    pub fn set_receipt(&mut self, receipt: ReceiptImage) {
        self.receipt = Some(receipt);
    }

    pub fn clear_receipt(&mut self) {
        self.receipt = None;
    }

    /// Write every non-empty cached value back into the live form.
    pub fn restore<S: FormSurface>(&mut self, config: &TicketConfig, surface: &mut S) {
        for field in Field::ALL {
            let value = self.field(field);
            if !value.is_empty() {
                surface.write_field(field, value);
            }
        }
        if self.ticket_qty != 0 {
            surface.write_quantity(self.ticket_qty);
            let quote = price::quote_quantity(config, self.ticket_qty);
            self.set_ticket_qty(quote.quantity);
            surface.render_price(&quote);
        }
        if let Some(receipt) = &self.receipt {
            surface.show_receipt(&receipt.data_url);
        }
    }
}
