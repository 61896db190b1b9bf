//! # page-scripts
//!
//! Small WASM page behaviors for server-rendered pages: a persisted
//! light/dark theme toggle and a countdown that redirects when it expires.
//!
//! Browser globals (body class list, `localStorage`, location, timers) sit
//! behind the traits in [`ports`]. The `browser` feature provides `web-sys`
//! adapters and the wasm entry point; native builds use the in-memory fakes
//! in [`ports::memory`].

pub mod config;
pub mod countdown;
pub mod error;
pub mod ports;
pub mod startup;
pub mod theme;
#[cfg(feature = "browser")]
pub mod web;
