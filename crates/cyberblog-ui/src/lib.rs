#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Cyberblog browser front-end.
//!
//! Progressive enhancement over server-rendered pages: like and subscribe
//! toggles, the markdown editor toolbar, theme switching with the cyber effect
//! bundle, alerts, page chrome and synthesized sound cues.
//!
//! # Design
//! - `core` and `i18n` hold every decision and compile natively, so they are
//!   unit-tested with plain `cargo test`.
//! - The DOM, Web Audio, storage and fetch glue lives in wasm32-only modules and
//!   only translates events into `core` calls and `core` results into DOM edits.
//! - Page scripts reach the running app through `showNotification`,
//!   `playSound` and `shutdownApp`; the module starts itself on load.

pub mod core;
pub mod i18n;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod features;
#[cfg(target_arch = "wasm32")]
mod services;

#[cfg(target_arch = "wasm32")]
pub use app::{play_sound, run_app, show_notification, shutdown_app};
