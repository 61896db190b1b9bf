use std::time::Duration;

use super::*;
use crate::ports::memory::MemoryPage;

const SECOND: Duration = Duration::from_secs(1);

// =============================================================
// CountdownState
// =============================================================

#[test]
fn state_counts_down_then_expires() {
    let mut state = CountdownState::new(3);
    assert_eq!(state.tick(), Step::Counting(2));
    assert_eq!(state.tick(), Step::Counting(1));
    assert_eq!(state.tick(), Step::Expired(0));
    assert_eq!(state.remaining(), 0);
}

#[test]
fn state_from_zero_expires_below_zero() {
    let mut state = CountdownState::new(0);
    assert_eq!(state.tick(), Step::Expired(-1));
}

// =============================================================
// start_countdown
// =============================================================

#[test]
fn renders_start_value_immediately() {
    let page = MemoryPage::new();
    let display = page.document.insert("countdown");
    start_countdown(&page.env(), &PageConfig::default(), 5).expect("scheduled");
    assert_eq!(display.texts(), vec!["5"]);
    assert!(page.navigator.visits().is_empty());
}

#[test]
fn five_second_countdown_sequence_then_redirect() {
    let page = MemoryPage::new();
    let display = page.document.insert("countdown");
    let handle = start_countdown(&page.env(), &PageConfig::default(), 5).expect("scheduled");

    for (elapsed, expected) in [(1, "4"), (2, "3"), (3, "2"), (4, "1")] {
        page.scheduler.advance(SECOND);
        assert_eq!(display.text().as_deref(), Some(expected), "after {elapsed}s");
        assert!(page.navigator.visits().is_empty());
    }

    page.scheduler.advance(SECOND);
    assert_eq!(display.texts(), vec!["5", "4", "3", "2", "1", "0"]);
    assert_eq!(page.navigator.visits(), vec!["/"]);
    assert!(handle.is_cancelled());

    page.scheduler.advance(SECOND * 10);
    assert_eq!(display.texts().len(), 6);
    assert_eq!(page.navigator.visits().len(), 1);
    assert_eq!(page.scheduler.pending(), 0);
}

#[test]
fn nothing_happens_between_ticks() {
    let page = MemoryPage::new();
    let display = page.document.insert("countdown");
    start_countdown(&page.env(), &PageConfig::default(), 5).expect("scheduled");
    page.scheduler.advance(Duration::from_millis(999));
    assert_eq!(display.texts(), vec!["5"]);
}

#[test]
fn zero_start_renders_then_redirects_on_first_tick() {
    let page = MemoryPage::new();
    let display = page.document.insert("countdown");
    start_countdown(&page.env(), &PageConfig::default(), 0).expect("scheduled");
    assert_eq!(display.texts(), vec!["0"]);
    assert!(page.navigator.visits().is_empty());

    page.scheduler.advance(SECOND);
    assert_eq!(page.navigator.visits(), vec!["/"]);
    assert_eq!(display.texts(), vec!["0", "-1"]);
    assert_eq!(page.scheduler.pending(), 0);
}

#[test]
fn missing_display_schedules_nothing() {
    let page = MemoryPage::new();
    assert!(start_countdown(&page.env(), &PageConfig::default(), 5).is_none());
    assert_eq!(page.scheduler.scheduled_count(), 0);
    page.scheduler.advance(SECOND * 10);
    assert!(page.navigator.visits().is_empty());
}

#[test]
fn cancelling_handle_prevents_redirect() {
    let page = MemoryPage::new();
    let display = page.document.insert("countdown");
    let handle = start_countdown(&page.env(), &PageConfig::default(), 5).expect("scheduled");
    page.scheduler.advance(SECOND * 2);
    handle.cancel();
    page.scheduler.advance(SECOND * 10);
    assert_eq!(display.texts(), vec!["5", "4", "3"]);
    assert!(page.navigator.visits().is_empty());
}

#[test]
fn custom_tick_and_redirect_path() {
    let config = PageConfig {
        tick_ms: 250,
        redirect_path: "/done".to_owned(),
        ..PageConfig::default()
    };
    let page = MemoryPage::new();
    page.document.insert("countdown");
    start_countdown(&page.env(), &config, 2).expect("scheduled");
    page.scheduler.advance(Duration::from_millis(500));
    assert_eq!(page.navigator.visits(), vec!["/done"]);
}
