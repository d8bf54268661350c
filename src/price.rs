//! Quantity → unit/total price strings.

use crate::config::TicketConfig;

/// Result of pricing one quantity selection.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceQuote {
    pub quantity: u32,
    pub unit: f64,
    pub total: f64,
    pub unit_formatted: String,
    pub total_formatted: String,
}

/// "<currency> <amount with 2 decimals>", e.g. `RM 150.00`.
pub fn format_price(currency: &str, amount: f64) -> String {
    format!("{currency} {amount:.2}")
}

/// Coerce a select/input value into a ticket count. Leading digits are honoured
/// (`"3 tickets"` → 3); anything unparsable or negative becomes 0.
pub fn parse_quantity(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut qty: u32 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        seen = true;
        qty = qty.saturating_mul(10).saturating_add(d);
    }
    if !seen || negative { 0 } else { qty }
}

/// Price a raw quantity against the configured unit price.
pub fn quote(config: &TicketConfig, raw: &str) -> PriceQuote {
    quote_quantity(config, parse_quantity(raw))
}

pub fn quote_quantity(config: &TicketConfig, quantity: u32) -> PriceQuote {
    let unit = config.price_per_ticket;
    let total = quantity as f64 * unit;
    PriceQuote {
        quantity,
        unit,
        total,
        unit_formatted: format_price(config.currency, unit),
        total_formatted: format_price(config.currency, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TICKETS;

    #[test]
    fn totals_scale_with_quantity() {
        for q in 0..=TICKETS.max_tickets_per_request {
            let p = quote_quantity(&TICKETS, q);
            assert_eq!(p.total, q as f64 * TICKETS.price_per_ticket);
            assert_eq!(p.total_formatted, format!("RM {:.2}", q as f64 * 50.0));
        }
        assert_eq!(quote(&TICKETS, "3").total_formatted, "RM 150.00");
        assert_eq!(quote(&TICKETS, "3").unit_formatted, "RM 50.00");
    }

    #[test]
    fn junk_quantities_are_zero() {
        for raw in ["", "  ", "abc", "-2", "-", "+", "NaN"] {
            let p = quote(&TICKETS, raw);
            assert_eq!(p.quantity, 0, "raw {raw:?}");
            assert_eq!(p.total_formatted, "RM 0.00");
        }
    }

    #[test]
    fn parse_takes_leading_digits() {
        assert_eq!(parse_quantity(" 4"), 4);
        assert_eq!(parse_quantity("2x"), 2);
        assert_eq!(parse_quantity("+5"), 5);
        assert_eq!(parse_quantity("99999999999999"), u32::MAX);
    }
}
