//! Theme state and the effect bundle that follows it.
//!
//! # Design
//! - [`ThemeManager`] owns the current [`Theme`] and is the only writer of the
//!   root `data-theme` attribute and the persisted `theme` key.
//! - DOM access goes through [`ThemeHost`] so the state machine is testable
//!   without a browser.
//! - The `cyber` effect bundle is declarative: a class on the root element
//!   activates the keyframe rules shipped in `static/effects.css`, plus one
//!   presence-checked overlay element and an owned glitch ticker. Leaving
//!   `cyber` drops the ticker, which cancels it.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Attribute on `<html>` the stylesheets key off.
pub const THEME_ATTRIBUTE: &str = "data-theme";
/// `localStorage` key holding the last applied theme.
pub const THEME_STORAGE_KEY: &str = "theme";
/// Root class enabling the `cyber` keyframe rules.
pub const EFFECTS_CLASS: &str = "cyber-effects";
/// Identifier of the scanline overlay element.
pub const SCANLINES_ID: &str = "cyber-scanlines";
/// Settings-page theme picker.
pub const THEME_SELECT_SELECTOR: &str = "select[name=\"theme\"]";

/// Site themes, in cycle order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
    /// Neon theme with scanlines and glitches.
    Cyber,
}

impl Theme {
    /// All themes in cycle order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Light, Self::Dark, Self::Cyber]
    }

    /// String identifier used in CSS datasets and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Cyber => "cyber",
        }
    }

    /// Next theme in `light → dark → cyber → light` order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Cyber,
            Self::Cyber => Self::Light,
        }
    }

    /// Whether the theme carries the effect bundle.
    #[must_use]
    pub const fn has_effects(self) -> bool {
        matches!(self, Self::Cyber)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme name outside the supported set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::all()
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTheme(value.to_string()))
    }
}

/// Resolve the startup theme: root attribute, then storage, then light.
/// Unrecognised values are skipped rather than applied.
#[must_use]
pub fn resolve_initial(root_attribute: Option<&str>, stored: Option<&str>) -> Theme {
    root_attribute
        .and_then(|value| value.parse().ok())
        .or_else(|| stored.and_then(|value| value.parse().ok()))
        .unwrap_or_default()
}

/// `Ctrl+Shift+T` cycles the theme from anywhere on the page.
#[must_use]
pub fn is_cycle_shortcut(key: &str, ctrl: bool, shift: bool) -> bool {
    ctrl && shift && matches!(key, "T" | "t")
}

/// Document seam used by [`ThemeManager`].
pub trait ThemeHost {
    /// Handle of a running glitch ticker; dropping it stops the ticker.
    type Ticker;

    /// Current `data-theme` attribute of the root element.
    fn root_theme(&self) -> Option<String>;
    /// Persisted theme value.
    fn stored_theme(&self) -> Option<String>;
    /// Write the `data-theme` attribute.
    fn write_root_theme(&mut self, theme: Theme);
    /// Persist the theme.
    fn persist_theme(&mut self, theme: Theme);
    /// Add or remove [`EFFECTS_CLASS`] on the root element.
    fn set_effects_class(&mut self, enabled: bool);
    /// Whether the element with [`SCANLINES_ID`] exists.
    fn has_overlay(&self) -> bool;
    /// Append the scanline overlay.
    fn insert_overlay(&mut self);
    /// Remove the scanline overlay if present.
    fn remove_overlay(&mut self);
    /// Start the periodic glitch sampler.
    fn start_glitch(&mut self) -> Self::Ticker;
}

/// Theme state machine over a [`ThemeHost`].
pub struct ThemeManager<H: ThemeHost> {
    host: H,
    current: Theme,
    glitch: Option<H::Ticker>,
}

impl<H: ThemeHost> fmt::Debug for ThemeManager<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeManager")
            .field("current", &self.current)
            .field("glitch_running", &self.glitch.is_some())
            .finish_non_exhaustive()
    }
}

impl<H: ThemeHost> ThemeManager<H> {
    /// Resolve the startup theme from the host and apply it.
    pub fn new(host: H) -> Self {
        let current = resolve_initial(host.root_theme().as_deref(), host.stored_theme().as_deref());
        let mut manager = Self {
            host,
            current,
            glitch: None,
        };
        manager.apply(current);
        manager
    }

    /// Theme most recently applied.
    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Whether the glitch ticker is running.
    #[must_use]
    pub const fn effects_running(&self) -> bool {
        self.glitch.is_some()
    }

    /// Borrow the host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Apply a theme: attribute, storage, state, then effects.
    pub fn apply(&mut self, theme: Theme) {
        self.host.write_root_theme(theme);
        self.host.persist_theme(theme);
        self.current = theme;
        if theme.has_effects() {
            self.enable_effects();
        } else {
            self.disable_effects();
        }
    }

    /// Advance to the next theme and return it.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.next();
        self.apply(next);
        next
    }

    fn enable_effects(&mut self) {
        self.host.set_effects_class(true);
        if !self.host.has_overlay() {
            self.host.insert_overlay();
        }
        if self.glitch.is_none() {
            self.glitch = Some(self.host.start_glitch());
        }
    }

    fn disable_effects(&mut self) {
        self.glitch = None;
        self.host.set_effects_class(false);
        if self.host.has_overlay() {
            self.host.remove_overlay();
        }
    }
}
