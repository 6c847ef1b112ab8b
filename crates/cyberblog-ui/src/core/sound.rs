//! Synthesized interface sounds.
//!
//! # Design
//! - Each [`SoundCue`] expands to a short list of [`ScheduledTone`]s; composite
//!   cues are two tones 100 ms apart.
//! - [`SoundManager`] gates every cue on the enabled flag and on the audio
//!   backend having initialised. Both failures make `play` a no-op.

use std::str::FromStr;
use thiserror::Error;

/// Delay between the two halves of a composite cue.
pub const COMPOSITE_GAP_MS: u32 = 100;
/// Frequencies the keypress cue picks from.
pub const KEYPRESS_FREQUENCIES: [f32; 5] = [400.0, 450.0, 500.0, 550.0, 600.0];
/// Elements that chirp on hover.
pub const HOVER_SELECTOR: &str = ".btn, .nav-link, .dropdown-item, .post-title a";
/// Elements that click when pressed.
pub const CLICK_SELECTOR: &str = ".btn, .nav-link";
/// Inputs that tick while typing.
pub const TYPING_SELECTOR: &str = "input[type=\"text\"], input[type=\"email\"], textarea";
/// Settings checkbox controlling the enabled flag.
pub const SOUND_TOGGLE_SELECTOR: &str = "input[name=\"sound_enabled\"]";

/// Oscillator shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    /// Sine wave.
    Sine,
    /// Square wave.
    Square,
    /// Sawtooth wave.
    Sawtooth,
    /// Triangle wave.
    Triangle,
}

impl Waveform {
    /// Web Audio `OscillatorType` name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Square => "square",
            Self::Sawtooth => "sawtooth",
            Self::Triangle => "triangle",
        }
    }
}

/// A single oscillator burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    /// Oscillator frequency.
    pub frequency_hz: f32,
    /// Playback length in seconds.
    pub duration_s: f32,
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Gain in `[0, 1]`.
    pub volume: f32,
}

impl Tone {
    const fn sine(frequency_hz: f32, duration_s: f32, volume: f32) -> Self {
        Self {
            frequency_hz,
            duration_s,
            waveform: Waveform::Sine,
            volume,
        }
    }
}

/// Tone plus its start delay relative to the cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledTone {
    /// The tone to play.
    pub tone: Tone,
    /// Start delay in milliseconds.
    pub delay_ms: u32,
}

impl ScheduledTone {
    const fn now(tone: Tone) -> Self {
        Self { tone, delay_ms: 0 }
    }

    const fn after_gap(tone: Tone) -> Self {
        Self {
            tone,
            delay_ms: COMPOSITE_GAP_MS,
        }
    }
}

/// Interface events that make a sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// Pointer entered an interactive element.
    Hover,
    /// Button press.
    Click,
    /// Typing in a text field.
    Keypress,
    /// Completed action.
    Success,
    /// Failed action.
    Error,
    /// Incoming notice.
    Notification,
    /// Ambient `cyber` theme glitch.
    Glitch,
}

/// Cue name outside the supported set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown sound cue `{0}`")]
pub struct UnknownCue(pub String);

impl SoundCue {
    /// Every cue.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Hover,
            Self::Click,
            Self::Keypress,
            Self::Success,
            Self::Error,
            Self::Notification,
            Self::Glitch,
        ]
    }

    /// Name used by page scripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Click => "click",
            Self::Keypress => "keypress",
            Self::Success => "success",
            Self::Error => "error",
            Self::Notification => "notification",
            Self::Glitch => "glitch",
        }
    }

    /// Expand the cue into tones. `sample` is a uniform value in `[0, 1)`
    /// used by the randomised cues.
    #[must_use]
    pub fn tones(self, sample: f64) -> Vec<ScheduledTone> {
        match self {
            Self::Hover => vec![ScheduledTone::now(Tone::sine(600.0, 0.05, 0.05))],
            Self::Click => vec![ScheduledTone::now(Tone::sine(800.0, 0.1, 0.1))],
            Self::Keypress => vec![ScheduledTone::now(Tone::sine(
                keypress_frequency(sample),
                0.05,
                0.03,
            ))],
            Self::Success => vec![
                ScheduledTone::now(Tone::sine(800.0, 0.1, 0.1)),
                ScheduledTone::after_gap(Tone::sine(1000.0, 0.15, 0.1)),
            ],
            Self::Error => vec![ScheduledTone::now(Tone {
                frequency_hz: 200.0,
                duration_s: 0.2,
                waveform: Waveform::Sawtooth,
                volume: 0.1,
            })],
            Self::Notification => vec![
                ScheduledTone::now(Tone::sine(1000.0, 0.1, 0.08)),
                ScheduledTone::after_gap(Tone::sine(800.0, 0.1, 0.08)),
            ],
            Self::Glitch => vec![ScheduledTone::now(Tone {
                frequency_hz: glitch_frequency(sample),
                duration_s: 0.02,
                waveform: Waveform::Square,
                volume: 0.02,
            })],
        }
    }
}

impl FromStr for SoundCue {
    type Err = UnknownCue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::all()
            .into_iter()
            .find(|cue| cue.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCue(value.to_string()))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn keypress_frequency(sample: f64) -> f32 {
    let scaled = (sample.clamp(0.0, 0.999_999) * KEYPRESS_FREQUENCIES.len() as f64) as usize;
    KEYPRESS_FREQUENCIES[scaled.min(KEYPRESS_FREQUENCIES.len() - 1)]
}

#[allow(clippy::cast_possible_truncation)]
fn glitch_frequency(sample: f64) -> f32 {
    sample.clamp(0.0, 1.0).mul_add(1000.0, 500.0) as f32
}

/// Source of uniform samples in `[0, 1)`.
pub trait Sampler {
    /// Draw one sample.
    fn sample(&self) -> f64;
}

impl<F: Fn() -> f64> Sampler for F {
    fn sample(&self) -> f64 {
        self()
    }
}

/// Output device for tones.
pub trait AudioBackend {
    /// Schedule a tone relative to now.
    fn schedule(&self, tone: ScheduledTone);
}

/// Enabled-flag gate in front of an optional audio backend.
#[derive(Debug)]
pub struct SoundManager<B, R> {
    enabled: bool,
    backend: Option<B>,
    sampler: R,
}

impl<B: AudioBackend, R: Sampler> SoundManager<B, R> {
    /// Build a manager. `backend` is `None` when audio failed to initialise.
    pub const fn new(enabled: bool, backend: Option<B>, sampler: R) -> Self {
        Self {
            enabled,
            backend,
            sampler,
        }
    }

    /// Current enabled flag.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Update the enabled flag.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether an audio backend is present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Draw a sample from the manager's sampler.
    #[must_use]
    pub fn sample(&self) -> f64 {
        self.sampler.sample()
    }

    /// Play a cue; returns whether anything was scheduled.
    pub fn play(&self, cue: SoundCue) -> bool {
        let Some(backend) = self.backend.as_ref().filter(|_| self.enabled) else {
            return false;
        };
        for tone in cue.tones(self.sampler.sample()) {
            backend.schedule(tone);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<ScheduledTone>>>);

    impl AudioBackend for Recorder {
        fn schedule(&self, tone: ScheduledTone) {
            self.0.borrow_mut().push(tone);
        }
    }

    fn manager(enabled: bool, sample: f64) -> (SoundManager<Recorder, impl Sampler>, Recorder) {
        let recorder = Recorder::default();
        (
            SoundManager::new(enabled, Some(recorder.clone()), move || sample),
            recorder,
        )
    }

    #[test]
    fn disabled_manager_is_silent() {
        let (mut sounds, recorder) = manager(false, 0.5);
        assert!(!sounds.play(SoundCue::Click));
        assert!(recorder.0.borrow().is_empty());
        sounds.set_enabled(true);
        assert!(sounds.play(SoundCue::Click));
        assert_eq!(recorder.0.borrow().len(), 1);
    }

    #[test]
    fn missing_backend_is_a_no_op() {
        let sounds: SoundManager<Recorder, _> = SoundManager::new(true, None, || 0.0);
        assert!(!sounds.is_available());
        assert!(!sounds.play(SoundCue::Success));
    }

    #[test]
    fn composite_cues_are_two_tones_with_gap() {
        let (sounds, recorder) = manager(true, 0.0);
        sounds.play(SoundCue::Success);
        let tones = recorder.0.borrow();
        assert_eq!(tones.len(), 2);
        assert_eq!(tones[0].delay_ms, 0);
        assert_eq!(tones[1].delay_ms, COMPOSITE_GAP_MS);
        assert!((tones[0].tone.frequency_hz - 800.0).abs() < f32::EPSILON);
        assert!((tones[1].tone.frequency_hz - 1000.0).abs() < f32::EPSILON);

        let notification = SoundCue::Notification.tones(0.0);
        assert_eq!(notification.len(), 2);
        assert!((notification[1].tone.frequency_hz - 800.0).abs() < f32::EPSILON);
    }

    #[test]
    fn error_cue_uses_sawtooth() {
        let tones = SoundCue::Error.tones(0.0);
        assert_eq!(tones[0].tone.waveform, Waveform::Sawtooth);
        assert!((tones[0].tone.frequency_hz - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn keypress_picks_from_fixed_frequencies() {
        let pick = |sample| SoundCue::Keypress.tones(sample)[0].tone.frequency_hz;
        assert!((pick(0.0) - 400.0).abs() < f32::EPSILON);
        assert!((pick(0.45) - 500.0).abs() < f32::EPSILON);
        assert!((pick(0.999) - 600.0).abs() < f32::EPSILON);
        assert!((pick(1.0) - 600.0).abs() < f32::EPSILON);
    }

    #[test]
    fn glitch_frequency_spans_500_to_1500() {
        let low = SoundCue::Glitch.tones(0.0)[0].tone;
        let high = SoundCue::Glitch.tones(0.5)[0].tone;
        assert!((low.frequency_hz - 500.0).abs() < f32::EPSILON);
        assert!((high.frequency_hz - 1000.0).abs() < f32::EPSILON);
        assert_eq!(low.waveform, Waveform::Square);
    }

    #[test]
    fn waveform_names_match_web_audio() {
        assert_eq!(Waveform::Sine.as_str(), "sine");
        assert_eq!(Waveform::Sawtooth.as_str(), "sawtooth");
    }

    #[test]
    fn page_scripts_name_cues() {
        for cue in SoundCue::all() {
            assert_eq!(cue.name().parse::<SoundCue>(), Ok(cue));
        }
        assert_eq!(" Notification ".parse::<SoundCue>(), Ok(SoundCue::Notification));
        let err = "beep".parse::<SoundCue>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sound cue `beep`");
    }
}
