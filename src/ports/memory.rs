//! In-memory port implementations.
//!
//! Used by native tests and by anything that wants to drive the page
//! behaviors without a browser. [`ManualScheduler`] keeps a logical clock, so
//! interval behavior is exercised without real delays.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

use super::{Document, Element, Navigator, PageEnv, PreferenceStore, ScheduledTask, Scheduler, ThemeSurface, Tick};
use crate::error::PortError;

// =============================================================
// Storage
// =============================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    /// A store that fails every call, like `localStorage` in a locked-down
    /// browser profile.
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        if self.unavailable {
            return Err(PortError::StorageUnavailable);
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        if self.unavailable {
            return Err(PortError::StorageUnavailable);
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// =============================================================
// Body class list
// =============================================================

#[derive(Debug, Default)]
pub struct MemorySurface {
    classes: RefCell<BTreeSet<String>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }
}

impl ThemeSurface for MemorySurface {
    fn contains(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn add(&self, class: &str) -> Result<(), PortError> {
        self.classes.borrow_mut().insert(class.to_owned());
        Ok(())
    }

    fn toggle(&self, class: &str) -> Result<bool, PortError> {
        let mut classes = self.classes.borrow_mut();
        if classes.remove(class) {
            Ok(false)
        } else {
            classes.insert(class.to_owned());
            Ok(true)
        }
    }
}

// =============================================================
// Document / elements
// =============================================================

/// Element that records every text write and holds its click listeners.
#[derive(Default)]
pub struct MemoryElement {
    texts: RefCell<Vec<String>>,
    handlers: RefCell<Vec<Box<dyn FnMut()>>>,
}

impl MemoryElement {
    /// Every text value written, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.texts.borrow().clone()
    }

    /// Current text content.
    pub fn text(&self) -> Option<String> {
        self.texts.borrow().last().cloned()
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Dispatch a click to every registered listener.
    pub fn click(&self) {
        let mut running = self.handlers.take();
        for handler in &mut running {
            handler();
        }
        // Keep listeners registered during dispatch after the existing ones.
        let mut handlers = self.handlers.borrow_mut();
        running.append(&mut handlers);
        *handlers = running;
    }
}

impl Element for MemoryElement {
    fn set_text(&self, text: &str) -> Result<(), PortError> {
        self.texts.borrow_mut().push(text.to_owned());
        Ok(())
    }

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Result<(), PortError> {
        self.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDocument {
    elements: RefCell<HashMap<String, Rc<MemoryElement>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element with `id` (or return the existing one).
    pub fn insert(&self, id: &str) -> Rc<MemoryElement> {
        Rc::clone(self.elements.borrow_mut().entry(id.to_owned()).or_default())
    }
}

impl Document for MemoryDocument {
    fn element(&self, id: &str) -> Option<Rc<dyn Element>> {
        self.elements
            .borrow()
            .get(id)
            .map(|el| Rc::clone(el) as Rc<dyn Element>)
    }
}

// =============================================================
// Navigation
// =============================================================

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) -> Result<(), PortError> {
        self.visits.borrow_mut().push(path.to_owned());
        Ok(())
    }
}

// =============================================================
// Scheduler
// =============================================================

struct Entry {
    period: Duration,
    due: Duration,
    task: Box<dyn FnMut() -> Tick>,
    handle: ScheduledTask,
}

/// Scheduler driven by [`ManualScheduler::advance`] instead of wall time.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    entries: RefCell<Vec<Entry>>,
    scheduled: Cell<usize>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Tasks that are still live.
    pub fn pending(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| !e.handle.is_cancelled())
            .count()
    }

    /// Total number of `every` calls accepted.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.get()
    }

    /// Move the clock forward by `by`, running every task that falls due in
    /// order of due time.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut entries = self.entries.borrow_mut();
                entries.retain(|e| !e.handle.is_cancelled());
                let idx = entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target)
                    .min_by_key(|(_, e)| e.due)
                    .map(|(i, _)| i);
                idx.map(|i| entries.remove(i))
            };
            let Some(mut entry) = next else {
                break;
            };
            self.now.set(entry.due);
            // Tasks run without the entry list borrowed so they may schedule.
            let tick = (entry.task)();
            if tick == Tick::Stop {
                entry.handle.cancel();
            }
            if !entry.handle.is_cancelled() {
                entry.due += entry.period;
                self.entries.borrow_mut().push(entry);
            }
        }
        self.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, period: Duration, task: Box<dyn FnMut() -> Tick>) -> Result<ScheduledTask, PortError> {
        if period.is_zero() {
            return Err(PortError::Schedule("period must be non-zero".to_owned()));
        }
        let handle = ScheduledTask::new();
        self.entries.borrow_mut().push(Entry {
            period,
            due: self.now.get() + period,
            task,
            handle: handle.clone(),
        });
        self.scheduled.set(self.scheduled.get() + 1);
        Ok(handle)
    }
}

// =============================================================
// Bundle
// =============================================================

/// Concrete handles to every fake behind a [`PageEnv`].
#[derive(Clone)]
pub struct MemoryPage {
    pub document: Rc<MemoryDocument>,
    pub surface: Rc<MemorySurface>,
    pub store: Rc<MemoryStore>,
    pub navigator: Rc<RecordingNavigator>,
    pub scheduler: Rc<ManualScheduler>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self {
            document: Rc::new(MemoryDocument::new()),
            surface: Rc::new(MemorySurface::new()),
            store: Rc::new(store),
            navigator: Rc::new(RecordingNavigator::new()),
            scheduler: Rc::new(ManualScheduler::new()),
        }
    }

    pub fn env(&self) -> PageEnv {
        PageEnv {
            document: self.document.clone(),
            surface: self.surface.clone(),
            store: self.store.clone(),
            navigator: self.navigator.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}
