use std::time::Duration;

use super::*;
use crate::ports::ThemeSurface;
use crate::ports::memory::{MemoryPage, MemoryStore};

#[test]
fn empty_page_starts_nothing() {
    let page = MemoryPage::new();
    let started = start(&page.env(), &PageConfig::default());
    assert!(!started.theme_toggle);
    assert!(started.countdown.is_none());
    assert_eq!(page.scheduler.scheduled_count(), 0);
    assert_eq!(page.store.write_count(), 0);
}

#[test]
fn toggle_only_page_has_no_timer() {
    let page = MemoryPage::with_store(MemoryStore::with_entry("theme", "light"));
    page.document.insert("theme-toggle");
    let started = start(&page.env(), &PageConfig::default());
    assert!(started.theme_toggle);
    assert!(started.countdown.is_none());
    assert!(page.surface.contains("light-mode"));
    assert_eq!(page.scheduler.scheduled_count(), 0);
}

#[test]
fn full_page_runs_both_behaviors_independently() {
    let page = MemoryPage::new();
    let control = page.document.insert("theme-toggle");
    let display = page.document.insert("countdown");
    let started = start(&page.env(), &PageConfig::default());
    assert!(started.theme_toggle);
    assert!(started.countdown.is_some());

    control.click();
    page.scheduler.advance(Duration::from_secs(5));
    assert_eq!(page.store.value("theme").as_deref(), Some("light"));
    assert_eq!(display.text().as_deref(), Some("0"));
    assert_eq!(page.navigator.visits(), vec!["/"]);
}

#[test]
fn countdown_start_value_comes_from_config() {
    let config = PageConfig { countdown_seconds: 2, ..PageConfig::default() };
    let page = MemoryPage::new();
    let display = page.document.insert("countdown");
    start(&page.env(), &config);
    page.scheduler.advance(Duration::from_secs(2));
    assert_eq!(display.texts(), vec!["2", "1", "0"]);
    assert_eq!(page.navigator.visits(), vec!["/"]);
}
