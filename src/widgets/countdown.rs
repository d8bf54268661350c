//! Countdown to the upcoming event declared on `#upcoming-event`
//! (`data-event-date`, `data-event-time`, `data-event-location`).

use chrono::{NaiveDate, NaiveTime};
use gloo::timers::callback::Interval;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::config::COUNTDOWN_TICK_MS;
use crate::dom;

const DEFAULT_TIME: &str = "00:00";
const DEFAULT_LOCATION: &str = "TBA";

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpcomingEvent {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
}

impl UpcomingEvent {
    /// Date is required (`YYYY-MM-DD`); time (`HH:MM`) and location fall back
    /// to midnight and "TBA". Empty attributes count as missing.
    pub fn parse(date: Option<&str>, time: Option<&str>, location: Option<&str>) -> Option<Self> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }
        let date = NaiveDate::parse_from_str(present(date)?, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(present(time).unwrap_or(DEFAULT_TIME), "%H:%M").ok()?;
        let location = present(location).unwrap_or(DEFAULT_LOCATION).to_string();
        Some(Self { date, time, location })
    }

    /// Local wall-clock start, in the form `Date` parses as local time.
    pub fn local_start(&self) -> String {
        format!("{}T{}:00", self.date.format("%Y-%m-%d"), self.time.format("%H:%M"))
    }

    /// e.g. "December 31, 2026"
    pub fn date_label(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// e.g. "9:30 PM"
    pub fn time_label(&self) -> String {
        self.time.format("%-I:%M %p").to_string()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Split a millisecond distance into units. Past targets read as all zeros.
    pub fn from_millis(distance: i64) -> Self {
        if distance < 0 {
            return Self::default();
        }
        Self {
            days: distance / MS_PER_DAY,
            hours: (distance % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Days, hours, minutes, seconds, each at least two digits.
    pub fn padded(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|v| format!("{v:02}"))
    }
}

struct CountdownView {
    units: [Option<Element>; 4],
}

impl CountdownView {
    fn new(doc: &Document) -> Self {
        let units = ["countdown-days", "countdown-hours", "countdown-minutes", "countdown-seconds"]
            .map(|id| doc.get_element_by_id(id));
        Self { units }
    }

    fn render(&self, target_ms: f64) {
        let distance = (target_ms - js_sys::Date::now()) as i64;
        let text = Remaining::from_millis(distance).padded();
        for (el, value) in self.units.iter().zip(text.iter()) {
            if let Some(el) = el {
                el.set_text_content(Some(value));
            }
        }
    }
}

/// Fill in the event labels and tick the countdown once a second.
pub fn start(doc: &Document) -> Result<(), JsValue> {
    let Some(host) = doc.get_element_by_id("upcoming-event") else {
        return Ok(());
    };
    let attr = |name: &str| host.get_attribute(name);
    let Some(event) = UpcomingEvent::parse(
        attr("data-event-date").as_deref(),
        attr("data-event-time").as_deref(),
        attr("data-event-location").as_deref(),
    ) else {
        return Ok(());
    };

    let target_ms = js_sys::Date::new(&JsValue::from_str(&event.local_start())).get_time();
    if target_ms.is_nan() {
        return Ok(());
    }

    for (id, text) in [
        ("event-date-display", event.date_label()),
        ("event-time-display", event.time_label()),
        ("event-location-display", event.location.clone()),
    ] {
        if let Some(el) = dom::by_id::<Element>(doc, id) {
            el.set_text_content(Some(&text));
        }
    }

    let view = CountdownView::new(doc);
    view.render(target_ms);
    Interval::new(COUNTDOWN_TICK_MS, move || view.render(target_ms)).forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_applies_defaults() {
        let ev = UpcomingEvent::parse(Some("2026-12-31"), None, Some("")).unwrap();
        assert_eq!(ev.local_start(), "2026-12-31T00:00:00");
        assert_eq!(ev.location, "TBA");
        assert_eq!(ev.time_label(), "12:00 AM");
    }

    #[test]
    fn parse_trims_attribute_values() {
        let ev = UpcomingEvent::parse(Some(" 2026-12-31 "), Some(" 21:00 "), Some("  Bukit Bintang ")).unwrap();
        assert_eq!(ev.local_start(), "2026-12-31T21:00:00");
        assert_eq!(ev.location, "Bukit Bintang");
        assert_eq!(UpcomingEvent::parse(Some("2026-12-31"), Some("   "), Some("  ")).unwrap().location, "TBA");
    }

    #[test]
    fn parse_requires_valid_date() {
        assert!(UpcomingEvent::parse(None, Some("21:00"), None).is_none());
        assert!(UpcomingEvent::parse(Some("31/12/2026"), None, None).is_none());
        assert!(UpcomingEvent::parse(Some("2026-12-31"), Some("9pm"), None).is_none());
    }

    #[test]
    fn labels_read_like_us_english() {
        let ev = UpcomingEvent::parse(Some("2026-03-07"), Some("21:30"), Some("KL")).unwrap();
        assert_eq!(ev.date_label(), "March 7, 2026");
        assert_eq!(ev.time_label(), "9:30 PM");
        assert_eq!(ev.location, "KL");
    }

    #[test]
    fn remaining_splits_units() {
        let d = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * MS_PER_MINUTE + 5 * MS_PER_SECOND + 999;
        let r = Remaining::from_millis(d);
        assert_eq!(r, Remaining { days: 2, hours: 3, minutes: 4, seconds: 5 });
        assert_eq!(r.padded(), ["02", "03", "04", "05"].map(String::from));
        assert_eq!(Remaining::from_millis(120 * MS_PER_DAY).padded()[0], "120");
    }

    #[test]
    fn past_event_reads_zero() {
        assert_eq!(Remaining::from_millis(-1).padded(), ["00", "00", "00", "00"].map(String::from));
    }
}
