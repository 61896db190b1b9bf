//! `web-sys` implementations of the page ports, plus the wasm entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only compiled with the `browser` feature. Everything else in the crate is
//! written against `crate::ports`, so this is the only module that touches
//! browser globals.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};

use crate::config::PageConfig;
use crate::error::PortError;
use crate::ports::{Document, Element, Navigator, PageEnv, PreferenceStore, ScheduledTask, Scheduler, ThemeSurface, Tick};
use crate::startup;

const CONFIG_ATTRIBUTE: &str = "data-page-config";

fn dom_error(err: &JsValue) -> PortError {
    PortError::Dom(format!("{err:?}"))
}

// =============================================================
// Document / elements
// =============================================================

pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for BrowserDocument {
    fn element(&self, id: &str) -> Option<Rc<dyn Element>> {
        let el = self.document.get_element_by_id(id)?;
        Some(Rc::new(BrowserElement { el }))
    }
}

pub struct BrowserElement {
    el: web_sys::Element,
}

impl Element for BrowserElement {
    fn set_text(&self, text: &str) -> Result<(), PortError> {
        self.el.set_text_content(Some(text));
        Ok(())
    }

    fn on_click(&self, mut handler: Box<dyn FnMut()>) -> Result<(), PortError> {
        let cb = Closure::<dyn FnMut()>::new(move || handler());
        self.el
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .map_err(|e| dom_error(&e))?;
        // Listener lives as long as the page.
        cb.forget();
        Ok(())
    }
}

// =============================================================
// Body class list
// =============================================================

pub struct BodyClassList {
    body: web_sys::HtmlElement,
}

impl BodyClassList {
    pub fn new(body: web_sys::HtmlElement) -> Self {
        Self { body }
    }
}

impl ThemeSurface for BodyClassList {
    fn contains(&self, class: &str) -> bool {
        self.body.class_list().contains(class)
    }

    fn add(&self, class: &str) -> Result<(), PortError> {
        self.body.class_list().add_1(class).map_err(|e| dom_error(&e))
    }

    fn toggle(&self, class: &str) -> Result<bool, PortError> {
        self.body.class_list().toggle(class).map_err(|e| dom_error(&e))
    }
}

// =============================================================
// localStorage
// =============================================================

/// `window.localStorage`, looked up per call so a storage-disabled browser
/// degrades to [`PortError::StorageUnavailable`].
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, PortError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(PortError::StorageUnavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| PortError::StorageUnavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| PortError::StorageUnavailable)
    }
}

// =============================================================
// Navigation
// =============================================================

pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, path: &str) -> Result<(), PortError> {
        let window = web_sys::window().ok_or_else(|| PortError::Navigation("no window".to_owned()))?;
        window
            .location()
            .set_href(path)
            .map_err(|e| PortError::Navigation(format!("{e:?}")))
    }
}

// =============================================================
// Scheduler
// =============================================================

/// `setInterval`-backed scheduler. The interval is cleared by dropping it
/// once the task stops or its handle is cancelled.
pub struct IntervalScheduler;

impl Scheduler for IntervalScheduler {
    fn every(&self, period: Duration, mut task: Box<dyn FnMut() -> Tick>) -> Result<ScheduledTask, PortError> {
        // Interval takes u32 but the browser delay is an i32.
        let millis = i32::try_from(period.as_millis())
            .ok()
            .filter(|ms| *ms > 0)
            .and_then(|ms| u32::try_from(ms).ok())
            .ok_or_else(|| PortError::Schedule(format!("unsupported period {period:?}")))?;

        let handle = ScheduledTask::new();
        let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
        let slot_for_cb = Rc::clone(&slot);
        let handle_for_cb = handle.clone();
        let interval = Interval::new(millis, move || {
            if handle_for_cb.is_cancelled() || task() == Tick::Stop {
                handle_for_cb.cancel();
                slot_for_cb.borrow_mut().take();
            }
        });
        *slot.borrow_mut() = Some(interval);
        Ok(handle)
    }
}

// =============================================================
// Entry point
// =============================================================

impl PageEnv {
    /// Ports bound to the current window. `None` outside a document with a
    /// `<body>`.
    pub fn browser() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let body = document.body()?;
        Some(Self {
            document: Rc::new(BrowserDocument::new(document)),
            surface: Rc::new(BodyClassList::new(body)),
            store: Rc::new(LocalStorage),
            navigator: Rc::new(LocationNavigator),
            scheduler: Rc::new(IntervalScheduler),
        })
    }
}

fn page_config(document: &web_sys::Document) -> PageConfig {
    let raw = document.body().and_then(|b| b.get_attribute(CONFIG_ATTRIBUTE));
    PageConfig::from_json_or_default(raw.as_deref())
}

fn run() {
    let Some(env) = PageEnv::browser() else {
        log::warn!("page behaviors skipped: no document body");
        return;
    };
    let config = web_sys::window()
        .and_then(|w| w.document())
        .map(|d| page_config(&d))
        .unwrap_or_default();
    startup::start(&env, &config);
}

/// Wasm entry point: install the panic hook and logger, then start the page
/// behaviors once the document is parsed.
#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() != "loading" {
        run();
        return;
    }

    let cb = Closure::<dyn FnMut()>::new(run);
    if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref()) {
        log::warn!("page behaviors skipped: {}", dom_error(&e));
        return;
    }
    cb.forget();
}
