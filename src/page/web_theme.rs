//! Theme manager bound to the page: `body[data-theme]`, `#theme-logo`,
//! `localStorage`, plus the floating theme switcher menu.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlImageElement, KeyboardEvent, Node};

use crate::config::THEME_MENU_CLOSE_MS;
use crate::dom;
use crate::surface::{PreferenceStore, ThemeSurface};
use crate::theme::{DEFAULT_THEME, Theme, ThemeManager};
use crate::widgets::shimmer;

const THEME_ATTR: &str = "data-theme";
pub const GLOBAL_NAME: &str = "MidnightAnarchy";

pub struct WebTheme {
    doc: Document,
}

impl WebTheme {
    pub fn new(doc: &Document) -> Self {
        Self { doc: doc.clone() }
    }
}

impl ThemeSurface for WebTheme {
    fn page_default(&self) -> Option<String> {
        self.doc.body()?.get_attribute(THEME_ATTR)
    }

    fn active(&self) -> Option<String> {
        self.doc.body()?.get_attribute(THEME_ATTR)
    }

    fn set_active(&mut self, theme: Theme) {
        if let Some(body) = self.doc.body() {
            let _ = body.set_attribute(THEME_ATTR, theme.as_str());
        }
    }

    fn set_logo(&mut self, src: &str) {
        if let Some(logo) = dom::by_id::<HtmlImageElement>(&self.doc, "theme-logo") {
            logo.set_src(src);
        }
    }

    fn regenerate_shimmer(&mut self) {
        if let Err(err) = shimmer::render(&self.doc) {
            console::error!(format!("shimmer: {}", dom::js_error_message(&err)));
        }
    }
}

/// `window.localStorage`, silently absent when the browser refuses it.
pub struct LocalPreferences;

impl LocalPreferences {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl PreferenceStore for LocalPreferences {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

type PageThemes = ThemeManager<LocalPreferences, WebTheme>;

thread_local! {
    static THEMES: RefCell<Option<PageThemes>> = const { RefCell::new(None) };
}

/// Apply the saved/page theme and wire the switcher menu.
pub fn start(doc: &Document) -> Result<(), JsValue> {
    let mut manager = ThemeManager::new(LocalPreferences, WebTheme::new(doc));
    let theme = manager.init();
    console::log!(format!("Theme applied: {theme}"));
    THEMES.with(|cell| cell.replace(Some(manager)));
    start_switcher(doc)
}

/// Switch to `name` (unknown names become the default theme).
pub fn apply(name: &str) -> Theme {
    let theme = THEMES.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let doc = dom::document().ok()?;
            *slot = Some(ThemeManager::new(LocalPreferences, WebTheme::new(&doc)));
        }
        slot.as_mut().map(|manager| manager.apply(name))
    });
    let theme = theme.unwrap_or(DEFAULT_THEME);
    console::log!(format!("Theme applied: {theme}"));
    theme
}

pub fn current() -> Theme {
    THEMES
        .with(|cell| cell.borrow().as_ref().map(|manager| manager.current()))
        .unwrap_or(DEFAULT_THEME)
}

/// Known theme names, as a JS array.
pub fn names() -> js_sys::Array {
    Theme::ALL.iter().map(|t| JsValue::from_str(t.as_str())).collect()
}

/// Publish `window.MidnightAnarchy = { setTheme, getTheme, themes }` for inline
/// page scripts.
pub fn install_global() -> Result<(), JsValue> {
    let api = js_sys::Object::new();

    let set = Closure::wrap(Box::new(|name: String| apply(&name).as_str().to_string()) as Box<dyn Fn(String) -> String>);
    js_sys::Reflect::set(&api, &JsValue::from_str("setTheme"), set.as_ref())?;
    set.forget();

    let get = Closure::wrap(Box::new(|| current().as_str().to_string()) as Box<dyn Fn() -> String>);
    js_sys::Reflect::set(&api, &JsValue::from_str("getTheme"), get.as_ref())?;
    get.forget();

    js_sys::Reflect::set(&api, &JsValue::from_str("themes"), &names())?;

    js_sys::Reflect::set(&dom::window()?.into(), &JsValue::from_str(GLOBAL_NAME), &api)?;
    Ok(())
}

// --- Switcher menu ----------------------------------------------------------------

fn mark_active(options: &[Element]) {
    let current = current();
    for option in options {
        let is_current = option.get_attribute(THEME_ATTR).as_deref() == Some(current.as_str());
        dom::set_class(option, "active", is_current);
    }
}

fn start_switcher(doc: &Document) -> Result<(), JsValue> {
    let (Some(switcher), Some(toggle), Some(_menu)) = (
        doc.get_element_by_id("theme-switcher"),
        doc.get_element_by_id("theme-toggle"),
        doc.get_element_by_id("theme-menu"),
    ) else {
        return Ok(());
    };
    let options: Rc<Vec<Element>> = Rc::new(dom::query_all(doc, ".theme-option"));

    {
        let switcher = switcher.clone();
        let options = options.clone();
        EventListener::new(&toggle, "click", move |e| {
            e.stop_propagation();
            dom::toggle_class(&switcher, "open");
            mark_active(&options);
        })
        .forget();
    }

    for option in options.iter() {
        let switcher = switcher.clone();
        let options = options.clone();
        let name = option.get_attribute(THEME_ATTR).unwrap_or_default();
        EventListener::new(option, "click", move |_| {
            apply(&name);
            mark_active(&options);
            let switcher = switcher.clone();
            Timeout::new(THEME_MENU_CLOSE_MS, move || dom::set_class(&switcher, "open", false)).forget();
        })
        .forget();
    }

    {
        let switcher = switcher.clone();
        EventListener::new(doc, "click", move |e| {
            let inside = e
                .target()
                .and_then(|t| t.dyn_into::<Node>().ok())
                .is_some_and(|node| switcher.contains(Some(&node)));
            if !inside {
                dom::set_class(&switcher, "open", false);
            }
        })
        .forget();
    }

    EventListener::new(doc, "keydown", move |e| {
        if e.dyn_ref::<KeyboardEvent>().is_some_and(|k| k.key() == "Escape") {
            dom::set_class(&switcher, "open", false);
        }
    })
    .forget();

    mark_active(&options);
    Ok(())
}
