//! Error types for port adapters and configuration.
//!
//! Page behaviors never surface these to the page. They are logged and the
//! affected feature quietly stays inactive.

/// Failure reported by a port adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// `localStorage` is missing or access was denied.
    #[error("local storage unavailable")]
    StorageUnavailable,
    /// A DOM call failed.
    #[error("dom operation failed: {0}")]
    Dom(String),
    /// Setting the location failed.
    #[error("navigation failed: {0}")]
    Navigation(String),
    /// The timer could not be scheduled.
    #[error("failed to schedule task: {0}")]
    Schedule(String),
}

/// Error returned by [`crate::config::PageConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tick_ms must be greater than zero")]
    ZeroTick,
    #[error("tick_ms {0} exceeds the browser timer limit")]
    TickTooLarge(u64),
}
