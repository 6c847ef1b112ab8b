//! Core, DOM-free primitives and helpers for the Web UI.
pub mod chrome;
pub mod config;
pub mod cookie;
pub mod error;
pub mod markdown;
pub mod notify;
pub mod sound;
pub mod theme;
pub mod toggle;
