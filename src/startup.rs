//! Page-ready wiring for both behaviors.

#[cfg(test)]
#[path = "startup_test.rs"]
mod startup_test;

use crate::config::PageConfig;
use crate::countdown::start_countdown;
use crate::ports::{PageEnv, ScheduledTask};
use crate::theme::init_theme_toggle;

/// What [`start`] activated on this page.
#[derive(Debug, Default)]
pub struct Started {
    pub theme_toggle: bool,
    pub countdown: Option<ScheduledTask>,
}

/// Initialize the theme toggle and, if the page has a countdown element, the
/// redirect countdown. The two are independent.
pub fn start(env: &PageEnv, config: &PageConfig) -> Started {
    let theme_toggle = init_theme_toggle(env, config);
    let countdown = if env.document.element(&config.countdown_id).is_some() {
        start_countdown(env, config, config.countdown_seconds)
    } else {
        None
    };
    log::debug!(
        "page behaviors started: theme_toggle={theme_toggle} countdown={}",
        countdown.is_some()
    );
    Started { theme_toggle, countdown }
}
