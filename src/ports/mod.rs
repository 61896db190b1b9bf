//! Injectable seams over browser globals.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page behaviors only talk to these traits. `crate::web` implements them over
//! `web-sys`; [`memory`] implements them in-process so behaviors can be driven
//! in native tests with a logical clock.
//!
//! Everything here is single-threaded (`Rc`, `Cell`), matching the browser
//! event loop.

pub mod memory;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::error::PortError;

/// A DOM element the behaviors write to or listen on.
pub trait Element {
    /// Replace the element's text content.
    fn set_text(&self, text: &str) -> Result<(), PortError>;
    /// Register a click listener for the lifetime of the page.
    fn on_click(&self, handler: Box<dyn FnMut()>) -> Result<(), PortError>;
}

/// Element lookup by id.
pub trait Document {
    fn element(&self, id: &str) -> Option<Rc<dyn Element>>;
}

/// The document-level visual state (the `<body>` class list).
pub trait ThemeSurface {
    fn contains(&self, class: &str) -> bool;
    fn add(&self, class: &str) -> Result<(), PortError>;
    /// Flip `class` and report whether it is now present.
    fn toggle(&self, class: &str) -> Result<bool, PortError>;
}

/// Origin-scoped string key-value storage (`localStorage`).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PortError>;
}

/// Full-page navigation.
pub trait Navigator {
    fn navigate(&self, path: &str) -> Result<(), PortError>;
}

/// What a repeating task wants after a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

/// Repeating task scheduler.
///
/// The task runs once per `period` until it returns [`Tick::Stop`] or its
/// [`ScheduledTask`] handle is cancelled. The first run happens one period
/// after scheduling.
pub trait Scheduler {
    fn every(&self, period: Duration, task: Box<dyn FnMut() -> Tick>) -> Result<ScheduledTask, PortError>;
}

/// Cancellation handle shared between a scheduler and its caller.
#[derive(Clone, Debug, Default)]
pub struct ScheduledTask {
    cancelled: Rc<Cell<bool>>,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop future runs. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// One instance of every port, handed to the behaviors at startup.
#[derive(Clone)]
pub struct PageEnv {
    pub document: Rc<dyn Document>,
    pub surface: Rc<dyn ThemeSurface>,
    pub store: Rc<dyn PreferenceStore>,
    pub navigator: Rc<dyn Navigator>,
    pub scheduler: Rc<dyn Scheduler>,
}
