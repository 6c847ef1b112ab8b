//! Theme selector, keyboard cycling and the cyber effect bundle.

use crate::app::context::UiContext;
use crate::app::dom::{by_id, js_error, select};
use crate::app::preferences;
use crate::core::config::UiTimings;
use crate::core::notify::NotificationKind;
use crate::core::sound::SoundCue;
use crate::core::theme::{
    EFFECTS_CLASS, SCANLINES_ID, THEME_ATTRIBUTE, THEME_SELECT_SELECTOR, Theme, ThemeHost,
    ThemeManager, is_cycle_shortcut,
};
use crate::features::sound::SoundHandle;
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::document;
use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlSelectElement, KeyboardEvent};

pub(crate) type SharedTheme = Rc<RefCell<ThemeManager<DomThemeHost>>>;

/// Timers owned by the running effect bundle; dropping cancels both.
pub(crate) struct EffectTickers {
    _glitch: Interval,
    _ambient: Interval,
}

/// `ThemeHost` over `<html>`, `localStorage` and the page timers.
pub(crate) struct DomThemeHost {
    timings: UiTimings,
    sounds: SoundHandle,
}

impl ThemeHost for DomThemeHost {
    type Ticker = EffectTickers;

    fn root_theme(&self) -> Option<String> {
        preferences::root_theme()
    }

    fn stored_theme(&self) -> Option<String> {
        preferences::load_stored_theme()
    }

    fn write_root_theme(&mut self, theme: Theme) {
        if let Some(root) = document().document_element()
            && let Err(err) = root.set_attribute(THEME_ATTRIBUTE, theme.as_str())
        {
            console::error!("theme attribute update failed", err);
        }
    }

    fn persist_theme(&mut self, theme: Theme) {
        preferences::persist_theme(theme);
    }

    fn set_effects_class(&mut self, enabled: bool) {
        if let Some(root) = document().document_element()
            && let Err(err) = root.class_list().toggle_with_force(EFFECTS_CLASS, enabled)
        {
            console::error!("effects class update failed", err);
        }
    }

    fn has_overlay(&self) -> bool {
        by_id(SCANLINES_ID).is_some()
    }

    fn insert_overlay(&mut self) {
        if let Err(err) = insert_scanlines() {
            console::error!("scanline overlay failed", err.to_string());
        }
    }

    fn remove_overlay(&mut self) {
        if let Some(overlay) = by_id(SCANLINES_ID) {
            overlay.remove();
        }
    }

    fn start_glitch(&mut self) -> EffectTickers {
        let timings = self.timings;
        let glitch = Interval::new(timings.glitch_interval_ms, move || {
            if timings.glitch_chance.hits(js_sys::Math::random()) {
                glitch_screen(timings.glitch_duration_ms);
            }
        });
        let sounds = self.sounds.clone();
        let ambient = Interval::new(timings.ambient_interval_ms, move || {
            if sounds.is_available() && timings.ambient_chance.hits(sounds.sample()) {
                sounds.play(SoundCue::Glitch);
            }
        });
        EffectTickers {
            _glitch: glitch,
            _ambient: ambient,
        }
    }
}

fn insert_scanlines() -> anyhow::Result<()> {
    let doc = document();
    let overlay = doc.create_element("div").map_err(js_error)?;
    overlay.set_id(SCANLINES_ID);
    doc.body()
        .ok_or_else(|| anyhow::anyhow!("document has no body"))?
        .append_child(&overlay)
        .map_err(js_error)?;
    Ok(())
}

fn glitch_screen(duration_ms: u32) {
    let Some(body) = document().body() else {
        return;
    };
    let animation = format!("glitch {duration_ms}ms");
    if let Err(err) = body.style().set_property("animation", &animation) {
        console::warn!("glitch animation failed", err);
        return;
    }
    spawn_local(async move {
        TimeoutFuture::new(duration_ms).await;
        if let Err(err) = body.style().remove_property("animation") {
            console::warn!("glitch reset failed", err);
        }
    });
}

fn theme_select() -> Option<HtmlSelectElement> {
    select(THEME_SELECT_SELECTOR).and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
}

fn announce(ctx: &UiContext) {
    ctx.notifier
        .show(&ctx.text("toast.theme_changed"), &NotificationKind::Success);
}

/// Resolve and apply the startup theme, then bind the selector and shortcut.
pub(crate) fn mount(ctx: &UiContext) -> (SharedTheme, Vec<EventListener>) {
    let host = DomThemeHost {
        timings: ctx.timings,
        sounds: ctx.sounds.clone(),
    };
    let manager: SharedTheme = Rc::new(RefCell::new(ThemeManager::new(host)));
    let mut listeners = Vec::with_capacity(2);

    if let Some(selector) = theme_select() {
        selector.set_value(manager.borrow().current().as_str());
        let theme = Rc::clone(&manager);
        let ctx = ctx.clone();
        let source = selector.clone();
        listeners.push(EventListener::new(&selector, "change", move |_| {
            match source.value().parse::<Theme>() {
                Ok(next) => {
                    theme.borrow_mut().apply(next);
                    if ctx.sounds.is_available() {
                        ctx.sounds.play(SoundCue::Success);
                    }
                    announce(&ctx);
                }
                Err(err) => console::warn!("ignoring theme selection", err.to_string()),
            }
        }));
    }

    let theme = Rc::clone(&manager);
    let ctx = ctx.clone();
    listeners.push(EventListener::new(&document(), "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if !is_cycle_shortcut(&key.key(), key.ctrl_key(), key.shift_key()) {
            return;
        }
        event.prevent_default();
        let next = theme.borrow_mut().toggle();
        if let Some(selector) = theme_select() {
            selector.set_value(next.as_str());
        }
        announce(&ctx);
    }));

    (manager, listeners)
}
