//! Light/dark theme toggle.
//!
//! Dark is the default and has no body class. Light mode adds
//! `config.light_class` to `<body>`. The choice is persisted as `light` or
//! `dark` under `config.storage_key`.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: storage failures are logged and the visual
//! toggle still works for the current page.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::rc::Rc;

use crate::config::PageConfig;
use crate::ports::{PageEnv, PreferenceStore, ThemeSurface};

/// Persisted visual mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    /// Normalize a stored value. Only exactly `light` selects light mode.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn from_light_active(active: bool) -> Self {
        if active { Self::Light } else { Self::Dark }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Read the stored preference, treating storage failures as the default.
pub fn read_preference(store: &dyn PreferenceStore, key: &str) -> ThemePreference {
    match store.get(key) {
        Ok(raw) => ThemePreference::from_stored(raw.as_deref()),
        Err(e) => {
            log::warn!("theme: reading preference failed: {e}");
            ThemePreference::default()
        }
    }
}

/// Flip the body class and persist the resulting preference.
pub fn toggle(surface: &dyn ThemeSurface, store: &dyn PreferenceStore, config: &PageConfig) -> ThemePreference {
    let light = match surface.toggle(&config.light_class) {
        Ok(active) => active,
        Err(e) => {
            log::warn!("theme: toggling body class failed: {e}");
            surface.contains(&config.light_class)
        }
    };
    let next = ThemePreference::from_light_active(light);
    if let Err(e) = store.set(&config.storage_key, next.as_str()) {
        log::warn!("theme: saving preference failed: {e}");
    }
    log::debug!("theme: switched to {}", next.as_str());
    next
}

/// Apply the stored preference and wire the toggle control.
///
/// Returns `false` when the control is not on the page; nothing is read or
/// written in that case.
pub fn init_theme_toggle(env: &PageEnv, config: &PageConfig) -> bool {
    let Some(control) = env.document.element(&config.toggle_id) else {
        log::debug!("theme: no #{} on page", config.toggle_id);
        return false;
    };

    if read_preference(env.store.as_ref(), &config.storage_key) == ThemePreference::Light {
        if let Err(e) = env.surface.add(&config.light_class) {
            log::warn!("theme: applying light mode failed: {e}");
        }
    }

    let surface = Rc::clone(&env.surface);
    let store = Rc::clone(&env.store);
    let config = config.clone();
    let handler = Box::new(move || {
        toggle(surface.as_ref(), store.as_ref(), &config);
    });
    if let Err(e) = control.on_click(handler) {
        log::warn!("theme: registering click handler failed: {e}");
        return false;
    }
    true
}
