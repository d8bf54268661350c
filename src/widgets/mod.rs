//! Ambient page widgets. Each one is independent: it looks up its own elements,
//! does nothing when they are missing, and owns its own listeners and timers.

pub mod countdown;
pub mod qr_menu;
pub mod reveal;
pub mod shimmer;
pub mod smooth_scroll;
pub mod video;
