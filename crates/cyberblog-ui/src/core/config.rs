//! Page-provided user settings and fixed UI timings.

use serde::Deserialize;

/// Settings the server renders into `window.userSettings`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Explicit sound preference; absent means enabled.
    pub sound_enabled: Option<bool>,
    /// Preferred locale tag.
    pub locale: Option<String>,
}

impl UserSettings {
    /// Parse the JSON form of the settings object; malformed input yields defaults.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Sound is on unless the user explicitly turned it off.
    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled != Some(false)
    }
}

/// Probability gate for sampled effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chance(pub f64);

impl Chance {
    /// Whether a uniform sample in `[0, 1)` triggers the event.
    #[must_use]
    pub fn hits(self, sample: f64) -> bool {
        sample < self.0
    }
}

/// Delays and sampling rates for timers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UiTimings {
    /// Notification lifetime before auto-dismiss.
    pub notification_ttl_ms: u32,
    /// Length of the slide-out animation before removal.
    pub notification_exit_ms: u32,
    /// Screen glitch sampling period under `cyber`.
    pub glitch_interval_ms: u32,
    /// Screen glitch probability per sample.
    pub glitch_chance: Chance,
    /// Duration of one screen glitch.
    pub glitch_duration_ms: u32,
    /// Ambient glitch-sound sampling period under `cyber`.
    pub ambient_interval_ms: u32,
    /// Ambient glitch-sound probability per sample.
    pub ambient_chance: Chance,
    /// Follower counter pulse length.
    pub counter_pulse_ms: u32,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            notification_ttl_ms: 5_000,
            notification_exit_ms: 300,
            glitch_interval_ms: 3_000,
            glitch_chance: Chance(0.1),
            glitch_duration_ms: 100,
            ambient_interval_ms: 1_000,
            ambient_chance: Chance(0.05),
            counter_pulse_ms: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_defaults_to_enabled() {
        assert!(UserSettings::default().sound_enabled());
        assert!(UserSettings::from_json("{}").sound_enabled());
        assert!(UserSettings::from_json(r#"{"soundEnabled": true}"#).sound_enabled());
        assert!(!UserSettings::from_json(r#"{"soundEnabled": false}"#).sound_enabled());
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        assert_eq!(UserSettings::from_json("undefined"), UserSettings::default());
        assert_eq!(
            UserSettings::from_json(r#"{"soundEnabled": "yes"}"#),
            UserSettings::default()
        );
    }

    #[test]
    fn locale_is_read() {
        let settings = UserSettings::from_json(r#"{"locale": "ru", "extra": 1}"#);
        assert_eq!(settings.locale.as_deref(), Some("ru"));
    }

    #[test]
    fn chance_is_strict_upper_bound() {
        let chance = Chance(0.1);
        assert!(chance.hits(0.0));
        assert!(chance.hits(0.099));
        assert!(!chance.hits(0.1));
        assert!(!Chance(0.0).hits(0.0));
    }

    #[test]
    fn default_timings_match_page_behaviour() {
        let timings = UiTimings::default();
        assert_eq!(timings.notification_ttl_ms, 5_000);
        assert_eq!(timings.notification_exit_ms, 300);
        assert_eq!(timings.glitch_interval_ms, 3_000);
        assert_eq!(timings.ambient_interval_ms, 1_000);
    }
}
