//! Application shell: builds the shared context and owns every binding.

use crate::core::config::UiTimings;
use crate::core::notify::NotificationKind;
use crate::core::sound::SoundCue;
use crate::features::notify::Notifier;
use crate::features::sound::SoundHandle;
use crate::features::theme::SharedTheme;
use crate::features::{chrome, editor, likes, sound, subscribe, theme};
use crate::i18n::TranslationBundle;
use crate::services::api::ApiClient;
use context::UiContext;
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::document;
use preferences::{current_locale, load_user_settings};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::wasm_bindgen;

pub(crate) mod context;
pub(crate) mod dom;
pub(crate) mod preferences;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Everything the page enhancement keeps alive. Dropping it detaches all
/// listeners and cancels all timers.
struct App {
    _listeners: Vec<EventListener>,
    _theme: SharedTheme,
    notifier: Notifier,
    sounds: SoundHandle,
}

impl App {
    fn mount() -> Self {
        let settings = load_user_settings();
        let bundle = Rc::new(TranslationBundle::new(current_locale(&settings)));
        let timings = UiTimings::default();
        let notifier = Notifier::new(timings, bundle.text("notify.close", "Close"));
        let ctx = UiContext {
            sounds: SoundHandle::new(&settings),
            notifier: notifier.clone(),
            api: ApiClient::same_origin(),
            bundle,
            timings,
        };

        notifier.adopt_existing();
        let (shared_theme, mut listeners) = theme::mount(&ctx);
        listeners.extend(sound::mount(&ctx.sounds));
        listeners.extend(likes::mount(&ctx));
        listeners.extend(subscribe::mount(&ctx));
        listeners.extend(editor::mount(&ctx));
        listeners.extend(chrome::mount());
        console::log!("cyberblog ui ready", listeners.len());

        Self {
            _listeners: listeners,
            _theme: shared_theme,
            notifier,
            sounds: ctx.sounds,
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.notifier.clear();
    }
}

fn with_app(action: impl FnOnce(&App)) -> bool {
    APP.with(|slot| slot.borrow().as_ref().map(action).is_some())
}

fn start() {
    let app = App::mount();
    APP.with(|slot| {
        let previous = slot.borrow_mut().replace(app);
        drop(previous);
    });
}

/// Entry point, run when the wasm module is instantiated: enhance the page
/// once the document has been parsed.
#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    let doc = document();
    if doc.ready_state() == "loading" {
        EventListener::once(&doc, "DOMContentLoaded", |_| start()).forget();
    } else {
        start();
    }
}

/// Detach every listener and cancel every timer installed by [`run_app`].
#[wasm_bindgen(js_name = shutdownApp)]
pub fn shutdown_app() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    drop(app);
}

/// Show a notification from page scripts. `kind` is a style tag such as
/// `success`; unknown tags render as `alert-{kind}`.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: &str) {
    let kind: NotificationKind = kind.parse().unwrap_or_default();
    if !with_app(|app| app.notifier.show(message, &kind)) {
        console::warn!("notification before mount", message);
    }
}

/// Play a named cue from page scripts; returns whether it was played.
#[wasm_bindgen(js_name = playSound)]
pub fn play_sound(cue: &str) -> bool {
    let cue = match cue.parse::<SoundCue>() {
        Ok(cue) => cue,
        Err(err) => {
            console::warn!("ignoring sound request", err.to_string());
            return false;
        }
    };
    let mut played = false;
    with_app(|app| {
        if app.sounds.is_available() {
            app.sounds.play(cue);
            played = true;
        }
    });
    played
}
