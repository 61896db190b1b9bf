//! Redirect countdown.
//!
//! Renders the starting value into the countdown element, then once per tick
//! decrements and re-renders. The tick that brings the value to zero or below
//! cancels the task and navigates to `config.redirect_path`.
//!
//! A start value of zero or less is not short-circuited: it is rendered,
//! and the first tick still decrements, renders, and navigates.

#[cfg(test)]
#[path = "countdown_test.rs"]
mod countdown_test;

use std::rc::Rc;

use crate::config::PageConfig;
use crate::ports::{Element, PageEnv, ScheduledTask, Tick};

/// Outcome of one countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Still counting; render the value.
    Counting(i64),
    /// Reached zero or below; render the value, then redirect.
    Expired(i64),
}

impl Step {
    pub fn value(self) -> i64 {
        match self {
            Self::Counting(n) | Self::Expired(n) => n,
        }
    }
}

/// Seconds remaining, owned by a single countdown task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownState {
    remaining: i64,
}

impl CountdownState {
    pub fn new(seconds: i64) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(self) -> i64 {
        self.remaining
    }

    pub fn tick(&mut self) -> Step {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining <= 0 {
            Step::Expired(self.remaining)
        } else {
            Step::Counting(self.remaining)
        }
    }
}

/// Start the countdown in `config.countdown_id`.
///
/// Returns `None` (and schedules nothing) when the element is missing or the
/// scheduler refuses the task.
pub fn start_countdown(env: &PageEnv, config: &PageConfig, seconds: i64) -> Option<ScheduledTask> {
    let Some(display) = env.document.element(&config.countdown_id) else {
        log::debug!("countdown: no #{} on page", config.countdown_id);
        return None;
    };

    render(display.as_ref(), seconds);

    let mut state = CountdownState::new(seconds);
    let navigator = Rc::clone(&env.navigator);
    let redirect = config.redirect_path.clone();
    let task = Box::new(move || {
        let step = state.tick();
        render(display.as_ref(), step.value());
        match step {
            Step::Counting(_) => Tick::Continue,
            Step::Expired(_) => {
                log::info!("countdown: expired, redirecting to {redirect}");
                if let Err(e) = navigator.navigate(&redirect) {
                    log::warn!("countdown: redirect failed: {e}");
                }
                Tick::Stop
            }
        }
    });

    match env.scheduler.every(config.tick_period(), task) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("countdown: {e}");
            None
        }
    }
}

fn render(display: &dyn Element, value: i64) {
    if let Err(e) = display.set_text(&value.to_string()) {
        log::warn!("countdown: render failed: {e}");
    }
}
