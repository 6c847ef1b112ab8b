//! Transient notification model.

use std::fmt;
use std::str::FromStr;

/// Container the notifications are appended to.
pub const CONTAINER_CLASS: &str = "messages-container";
/// Class of every notification element, server-rendered ones included.
pub const ALERT_CLASS: &str = "alert";
/// Close button inside a notification.
pub const CLOSE_CLASS: &str = "alert-close";
/// Animation applied before removal.
pub const EXIT_ANIMATION: &str = "slideOut 0.3s ease";

/// Style tag of a notification. The set is open: unknown tags are kept
/// verbatim and rendered as `alert-{tag}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Neutral information.
    #[default]
    Info,
    /// Completed action.
    Success,
    /// Degraded outcome.
    Warning,
    /// Failed action.
    Error,
    /// Any other style tag.
    Custom(String),
}

impl NotificationKind {
    /// Style tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Custom(tag) => tag,
        }
    }

    /// Full class list of the notification element.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("{ALERT_CLASS} {ALERT_CLASS}-{}", self.tag())
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NotificationKind {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim() {
            "" | "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            other => Self::Custom(other.to_string()),
        })
    }
}

/// Lifecycle of a single notification element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dismissal {
    /// On screen.
    #[default]
    Visible,
    /// Exit animation running; removal scheduled.
    Leaving,
}

impl Dismissal {
    /// Start dismissing. Returns `true` only for the first caller, so the
    /// close button and the auto-dismiss timer never schedule two removals.
    pub const fn begin(&mut self) -> bool {
        if matches!(self, Self::Visible) {
            *self = Self::Leaving;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_uses_style_tag() {
        assert_eq!(NotificationKind::Success.class_name(), "alert alert-success");
        assert_eq!(
            NotificationKind::Custom("debug".into()).class_name(),
            "alert alert-debug"
        );
    }

    #[test]
    fn tags_parse_into_open_set() {
        assert_eq!("error".parse::<NotificationKind>(), Ok(NotificationKind::Error));
        assert_eq!("".parse::<NotificationKind>(), Ok(NotificationKind::Info));
        assert_eq!(
            "promo".parse::<NotificationKind>(),
            Ok(NotificationKind::Custom("promo".into()))
        );
        assert_eq!(NotificationKind::Warning.to_string(), "warning");
    }

    #[test]
    fn manual_close_then_timer_schedules_one_removal() {
        let mut state = Dismissal::default();
        assert!(state.begin());
        assert_eq!(state, Dismissal::Leaving);
        assert!(!state.begin());
        assert!(!state.begin());
    }
}
