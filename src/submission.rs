//! Outbound submission: the record sent to the sheet endpoint and the client that sends it.
//!
//! Dispatch is fire-and-forget. The endpoint only accepts opaque (`no-cors`)
//! requests, so `Ok(())` means the request left the browser, not that the sheet
//! stored it.

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use gloo::console;
use gloo::net::http::Request;
use gloo::timers::future::TimeoutFuture;
use serde::Serialize;
use web_sys::RequestMode;

use crate::cache::ReceiptImage;
use crate::config::{EndpointConfig, SIMULATED_SEND_MS, SUBMISSION_ID_PREFIX, TicketConfig};
use crate::error::TransportError;
use crate::price::format_price;

pub const PENDING_STATUS: &str = "Pending";
pub const PHONE_NOT_PROVIDED: &str = "Not provided";

/// Validated visitor input for one attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub ticket_qty: u32,
    pub confirmation_method: String,
}

/// Wall-clock moment a submission was prepared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionStamp {
    pub millis: i64,
    pub iso: String,   // 2026-10-16T12:00:00.000Z
    pub local: String, // 10/16/2026, 8:00:00 PM
}

impl SubmissionStamp {
    pub fn now() -> Self {
        Self::at(Utc::now(), &Local)
    }

    pub fn at<Tz: TimeZone>(utc: DateTime<Utc>, zone: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            millis: utc.timestamp_millis(),
            iso: utc.to_rfc3339_opts(SecondsFormat::Millis, true),
            local: utc.with_timezone(zone).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        }
    }
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

const SUFFIX_LEN: u32 = 6;

/// `MA-<base36 millis>-<6 random base36 chars>`, upper-cased. The suffix is
/// `entropy` reduced modulo 36^6, zero-padded.
pub fn submission_id(millis: i64, entropy: u64) -> String {
    let suffix = to_base36(entropy % 36u64.pow(SUFFIX_LEN));
    format!(
        "{SUBMISSION_ID_PREFIX}-{}-{suffix:0>6}",
        to_base36(millis.max(0) as u64)
    )
    .to_uppercase()
}

/// One outbound submission. Built once per attempt and consumed by [`dispatch`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    // Personal information
    pub full_name: String,
    pub email: String,
    pub phone: String,
    // Ticket details
    pub event_name: String,
    pub ticket_qty: u32,
    pub price_per_ticket: f64,
    pub currency: String,
    pub total_amount: f64,
    pub total_formatted: String,
    // Payment proof
    pub receipt_image: String,
    pub receipt_file_name: String,
    pub receipt_file_type: String,
    pub confirmation_method: String,
    // Metadata
    pub submission_id: String,
    pub timestamp: String,
    pub timestamp_local: String,
    pub status: &'static str,
}

impl SubmissionRecord {
    pub fn new(
        order: Order,
        config: &TicketConfig,
        receipt: &ReceiptImage,
        submission_id: String,
        stamp: &SubmissionStamp,
    ) -> Self {
        let total = order.ticket_qty as f64 * config.price_per_ticket;
        let phone = if order.phone.is_empty() { PHONE_NOT_PROVIDED.to_string() } else { order.phone };
        Self {
            full_name: order.full_name,
            email: order.email,
            phone,
            event_name: config.event_name.to_string(),
            ticket_qty: order.ticket_qty,
            price_per_ticket: config.price_per_ticket,
            currency: config.currency.to_string(),
            total_amount: total,
            total_formatted: format_price(config.currency, total),
            receipt_image: receipt.data_url.clone(),
            receipt_file_name: receipt.file_name.clone(),
            receipt_file_type: receipt.file_type.clone(),
            confirmation_method: order.confirmation_method,
            submission_id,
            timestamp: stamp.iso.clone(),
            timestamp_local: stamp.local.clone(),
            status: PENDING_STATUS,
        }
    }
}

// --- Client ---------------------------------------------------------------------

/// Send `record` to the configured endpoint, or trace it and wait a moment when
/// no endpoint is configured.
pub async fn dispatch(endpoint: &EndpointConfig, record: SubmissionRecord) -> Result<(), TransportError> {
    match endpoint.url() {
        Some(url) => post(url, &record).await,
        None => {
            trace(&record);
            TimeoutFuture::new(SIMULATED_SEND_MS).await;
            Ok(())
        }
    }
}

async fn post(url: &str, record: &SubmissionRecord) -> Result<(), TransportError> {
    let body = serde_json::to_string(record)?;
    Request::post(url)
        .mode(RequestMode::NoCors)
        .header("Content-Type", "application/json")
        .body(body)
        .map_err(|e| TransportError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| TransportError::Request(e.to_string()))?;
    // Opaque response: nothing to read.
    Ok(())
}

fn trace(record: &SubmissionRecord) {
    console::log!("=== TICKET SUBMISSION DATA ===");
    console::log!("Submission ID:", record.submission_id.as_str());
    console::log!("--- Personal Info ---");
    console::log!("Name:", record.full_name.as_str());
    console::log!("Email:", record.email.as_str());
    console::log!("Phone:", record.phone.as_str());
    console::log!("--- Ticket Details ---");
    console::log!("Event:", record.event_name.as_str());
    console::log!("Quantity:", record.ticket_qty);
    console::log!("Price per ticket:", format_price(&record.currency, record.price_per_ticket));
    console::log!("Total:", record.total_formatted.as_str());
    console::log!("--- Preferences ---");
    console::log!("Confirmation via:", record.confirmation_method.as_str());
    console::log!("--- Receipt ---");
    console::log!("File:", record.receipt_file_name.as_str());
    console::log!("Type:", record.receipt_file_type.as_str());
    console::log!("Image included:", !record.receipt_image.is_empty());
    console::log!("==============================");
}
