//! DOM bindings for each page feature.

pub(crate) mod chrome;
pub(crate) mod editor;
pub(crate) mod likes;
pub(crate) mod notify;
pub(crate) mod sound;
pub(crate) mod subscribe;
pub(crate) mod theme;
