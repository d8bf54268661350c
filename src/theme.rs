//! Visual themes: resolution, persistence and logo swapping.

use std::fmt;
use std::str::FromStr;

use crate::surface::{PreferenceStore, ThemeSurface};

pub const STORAGE_KEY: &str = "midnight-anarchy-theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    Diamond,
    Gold,
    RoseGold,
    Cream,
}

/// Used whenever a stored or requested name is not a known theme.
pub const DEFAULT_THEME: Theme = Theme::Diamond;

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Diamond, Theme::Gold, Theme::RoseGold, Theme::Cream];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Diamond => "diamond",
            Theme::Gold => "gold",
            Theme::RoseGold => "rosegold",
            Theme::Cream => "cream",
        }
    }

    pub fn logo(self) -> &'static str {
        match self {
            Theme::Diamond => "img/midnightanarchy-diamond-nobg.png",
            Theme::Gold | Theme::Cream => "img/midnightanarchy-gold-nobg.png", // cream reuses gold
            Theme::RoseGold => "img/midnightanarchy-rosegold-nobg.png",
        }
    }

    /// Known theme for `name`, or the default.
    pub fn or_default(name: &str) -> Theme {
        name.parse().unwrap_or(DEFAULT_THEME)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Startup choice: saved preference, then the page's declared theme, then the default.
/// Empty values count as absent.
pub fn resolve(saved: Option<&str>, page_default: Option<&str>) -> Theme {
    let pick = [saved, page_default].into_iter().flatten().find(|s| !s.is_empty());
    pick.map_or(DEFAULT_THEME, Theme::or_default)
}

pub struct ThemeManager<P: PreferenceStore, S: ThemeSurface> {
    store: P,
    surface: S,
}

impl<P: PreferenceStore, S: ThemeSurface> ThemeManager<P, S> {
    pub fn new(store: P, surface: S) -> Self {
        Self { store, surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Apply whatever theme the visitor last chose (or the page default).
    pub fn init(&mut self) -> Theme {
        let saved = self.store.load(STORAGE_KEY);
        let page = self.surface.page_default();
        let theme = resolve(saved.as_deref(), page.as_deref());
        self.apply(theme.as_str())
    }

    /// Activate `name` (unknown names fall back to the default), swap the logo,
    /// persist the choice and rebuild the shimmer so it picks up the new colours.
    pub fn apply(&mut self, name: &str) -> Theme {
        let theme = Theme::or_default(name);
        self.surface.set_active(theme);
        self.surface.set_logo(theme.logo());
        self.store.save(STORAGE_KEY, theme.as_str());
        self.surface.regenerate_shimmer();
        theme
    }

    pub fn current(&self) -> Theme {
        self.surface.active().as_deref().map_or(DEFAULT_THEME, Theme::or_default)
    }
}
