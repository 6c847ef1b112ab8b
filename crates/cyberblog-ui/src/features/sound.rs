//! Web Audio playback and document-wide sound bindings.

use crate::app::dom::{closest_target, select};
use crate::core::config::UserSettings;
use crate::core::sound::{
    AudioBackend, CLICK_SELECTOR, HOVER_SELECTOR, SOUND_TOGGLE_SELECTOR, ScheduledTone, SoundCue,
    SoundManager, TYPING_SELECTOR, Waveform,
};
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::document;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AudioContext, AudioContextState, HtmlInputElement, MouseEvent, Node, OscillatorType};

/// Oscillator-per-tone backend over one `AudioContext`.
pub(crate) struct WebAudio {
    context: AudioContext,
}

impl WebAudio {
    fn new() -> Option<Self> {
        match AudioContext::new() {
            Ok(context) => Some(Self { context }),
            Err(err) => {
                console::warn!("web audio unavailable; sounds disabled", err);
                None
            }
        }
    }

    fn start(&self, scheduled: ScheduledTone) -> Result<(), JsValue> {
        if self.context.state() == AudioContextState::Suspended {
            self.context.resume()?;
        }
        let tone = scheduled.tone;
        let oscillator = self.context.create_oscillator()?;
        let gain = self.context.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.context.destination())?;
        oscillator.set_type(oscillator_type(tone.waveform));
        oscillator.frequency().set_value(tone.frequency_hz);
        gain.gain().set_value(tone.volume);
        let at = self.context.current_time() + f64::from(scheduled.delay_ms) / 1000.0;
        oscillator.start_with_when(at)?;
        oscillator.stop_with_when(at + f64::from(tone.duration_s))
    }
}

impl AudioBackend for WebAudio {
    fn schedule(&self, tone: ScheduledTone) {
        if let Err(err) = self.start(tone) {
            console::error!("tone scheduling failed", err);
        }
    }
}

const fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

type WebSoundManager = SoundManager<WebAudio, fn() -> f64>;

/// Shared handle to the page's sound manager.
#[derive(Clone)]
pub(crate) struct SoundHandle(Rc<RefCell<WebSoundManager>>);

impl SoundHandle {
    pub(crate) fn new(settings: &UserSettings) -> Self {
        let sampler: fn() -> f64 = js_sys::Math::random;
        let manager = SoundManager::new(settings.sound_enabled(), WebAudio::new(), sampler);
        Self(Rc::new(RefCell::new(manager)))
    }

    /// Play a cue if sound is enabled and audio is available.
    pub(crate) fn play(&self, cue: SoundCue) {
        self.0.borrow().play(cue);
    }

    /// Whether cues would currently be heard.
    #[must_use]
    pub(crate) fn is_available(&self) -> bool {
        let manager = self.0.borrow();
        manager.is_available() && manager.is_enabled()
    }

    #[must_use]
    pub(crate) fn sample(&self) -> f64 {
        self.0.borrow().sample()
    }

    fn set_enabled(&self, enabled: bool) {
        self.0.borrow_mut().set_enabled(enabled);
    }
}

/// Hover, click and typing sounds, plus the settings checkbox.
pub(crate) fn mount(sounds: &SoundHandle) -> Vec<EventListener> {
    let doc = document();
    let mut listeners = Vec::with_capacity(4);

    let hover = sounds.clone();
    listeners.push(EventListener::new(&doc, "mouseover", move |event| {
        let Some(entered) = closest_target(event, HOVER_SELECTOR) else {
            return;
        };
        let from_inside = event
            .dyn_ref::<MouseEvent>()
            .and_then(MouseEvent::related_target)
            .and_then(|related| related.dyn_into::<Node>().ok())
            .is_some_and(|node| entered.contains(Some(&node)));
        if !from_inside {
            hover.play(SoundCue::Hover);
        }
    }));

    let click = sounds.clone();
    listeners.push(EventListener::new(&doc, "click", move |event| {
        if closest_target(event, CLICK_SELECTOR).is_some() {
            click.play(SoundCue::Click);
        }
    }));

    let typing = sounds.clone();
    listeners.push(EventListener::new(&doc, "keypress", move |event| {
        if closest_target(event, TYPING_SELECTOR).is_some() {
            typing.play(SoundCue::Keypress);
        }
    }));

    if let Some(toggle) = select(SOUND_TOGGLE_SELECTOR)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    {
        let handle = sounds.clone();
        let input = toggle.clone();
        listeners.push(EventListener::new(&toggle, "change", move |_| {
            let enabled = input.checked();
            handle.set_enabled(enabled);
            if enabled {
                handle.play(SoundCue::Success);
            }
        }));
    }

    listeners
}
