//! Admin configuration for ticket sales, the submission endpoint and UI timing.
//! Edit these values to control the page; nothing here changes at runtime.

/// Ticket sale settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TicketConfig {
    pub sold_out: bool,                // true disables ticket sales entirely
    pub max_tickets_per_request: u32,  // upper bound accepted by the form
    pub max_attendance: u32,           // display only
    pub price_per_ticket: f64,         // in `currency`
    pub currency: &'static str,
    pub event_name: &'static str,
}

pub static TICKETS: TicketConfig = TicketConfig {
    sold_out: false,
    max_tickets_per_request: 5,
    max_attendance: 200,
    price_per_ticket: 50.00,
    currency: "RM",
    event_name: "Midnight Anarchy: Genesis",
};

/// Remote sheet-backed web app receiving submissions.
#[derive(Clone, Copy, Debug)]
pub struct EndpointConfig {
    pub web_app_url: &'static str,
    pub enabled: bool,
}

impl EndpointConfig {
    /// The URL to POST to, or `None` when submissions should only be traced.
    pub fn url(&self) -> Option<&'static str> {
        (self.enabled && !self.web_app_url.is_empty()).then_some(self.web_app_url)
    }
}

pub static ENDPOINT: EndpointConfig = EndpointConfig {
    web_app_url: "https://script.google.com/macros/s/AKfycbxRE7U1idaVDzMZyQiDRhVt93IFtZxrjGYzzCZQMxGeEVLwOD4xwlX_ZuWfcsNJJbjfvw/exec",
    enabled: true,
};

// --- Limits & timing ----------------------------------------------------------

pub const MAX_RECEIPT_BYTES: u64 = 5 * 1024 * 1024;
pub const SUBMISSION_ID_PREFIX: &str = "MA";

pub const FOCUS_DELAY_MS: u32 = 350;
pub const SUBMIT_REVERT_MS: u32 = 3_000;
pub const SIMULATED_SEND_MS: u32 = 1_000;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;
pub const THEME_MENU_CLOSE_MS: u32 = 200;
pub const COUNTDOWN_TICK_MS: u32 = 1_000;
