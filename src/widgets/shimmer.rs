//! Diamond shimmer background. Particle geometry is random; colours come from the
//! active theme's stylesheet, so a theme change only needs a rebuild.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::config::RESIZE_DEBOUNCE_MS;
use crate::{dom, rng};

pub const MAX_SHIMMERS: usize = 30;
const PX_PER_SHIMMER: f64 = 50.0;

/// One particle, in CSS units.
#[derive(Clone, Debug, PartialEq)]
pub struct Shimmer {
    pub left_pct: f64,
    pub top_pct: f64,
    pub delay_s: f64,    // 0..5
    pub duration_s: f64, // 3..7
    pub scale: f64,      // 0.5..1.5
}

pub fn shimmer_count(viewport_width: f64) -> usize {
    let n = (viewport_width / PX_PER_SHIMMER).floor();
    if n.is_finite() && n > 0.0 { (n as usize).min(MAX_SHIMMERS) } else { 0 }
}

/// Lay out particles for a viewport, drawing uniform `[0, 1)` samples from `next`.
pub fn layout(viewport_width: f64, mut next: impl FnMut() -> f64) -> Vec<Shimmer> {
    (0..shimmer_count(viewport_width))
        .map(|_| Shimmer {
            left_pct: next() * 100.0,
            top_pct: next() * 100.0,
            delay_s: next() * 5.0,
            duration_s: 3.0 + next() * 4.0,
            scale: 0.5 + next(),
        })
        .collect()
}

/// Replace the contents of `#shimmer-bg` with a fresh set of particles.
pub fn render(doc: &Document) -> Result<(), JsValue> {
    let Some(container) = doc.get_element_by_id("shimmer-bg") else {
        return Ok(());
    };
    let width = dom::window()?.inner_width()?.as_f64().unwrap_or(0.0);
    container.set_inner_html("");
    for s in layout(width, rng::unit) {
        let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
        el.set_class_name("shimmer");
        let style = el.style();
        style.set_property("left", &format!("{}%", s.left_pct))?;
        style.set_property("top", &format!("{}%", s.top_pct))?;
        style.set_property("animation-delay", &format!("{}s", s.delay_s))?;
        style.set_property("animation-duration", &format!("{}s", s.duration_s))?;
        style.set_property("transform", &format!("scale({})", s.scale))?;
        container.append_child(&el)?;
    }
    Ok(())
}

/// Rebuild the shimmer after the window stops resizing.
pub fn watch_resize() -> Result<(), JsValue> {
    let win = dom::window()?;
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    EventListener::new(&win, "resize", move |_| {
        // Replacing the handle drops (cancels) the previous timeout.
        *pending.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, || {
            if let Ok(doc) = dom::document() {
                let _ = render(&doc);
            }
        }));
    })
    .forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_capped() {
        assert_eq!(shimmer_count(0.0), 0);
        assert_eq!(shimmer_count(49.0), 0);
        assert_eq!(shimmer_count(375.0), 7);
        assert_eq!(shimmer_count(1500.0), 30);
        assert_eq!(shimmer_count(3840.0), 30);
        assert_eq!(shimmer_count(f64::NAN), 0);
    }

    #[test]
    fn layout_ranges() {
        let lo = layout(1000.0, || 0.0);
        assert_eq!(lo.len(), 20);
        assert_eq!(lo[0], Shimmer { left_pct: 0.0, top_pct: 0.0, delay_s: 0.0, duration_s: 3.0, scale: 0.5 });
        let hi = layout(1000.0, || 0.999);
        for s in hi {
            assert!(s.left_pct < 100.0 && s.top_pct < 100.0);
            assert!(s.delay_s < 5.0 && s.duration_s < 7.0 && s.scale < 1.5);
        }
    }
}
