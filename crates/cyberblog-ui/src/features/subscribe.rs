//! Subscribe buttons and the profile followers counter.

use crate::app::context::UiContext;
use crate::app::dom::{select_all, select_in};
use crate::core::toggle::{
    BusyGuard, BusyTarget, STAT_ITEM_SELECTOR, STAT_LABEL_SELECTOR, STAT_VALUE_SELECTOR,
    SUBSCRIBE_BUTTON_SELECTOR, SUBSCRIBE_TEXT_SELECTOR, SUBSCRIBED_CLASS, SubscribeEffect,
    USERNAME_ATTR, is_followers_caption, plan_subscribe, trigger_id,
};
use crate::i18n::texts_in_every_locale;
use gloo::console;
use gloo::events::EventListener;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

const PULSE_CLASS: &str = "pulse";

/// Disables a button through its `disabled` attribute.
struct DisabledButton(Element);

impl BusyTarget for DisabledButton {
    fn set_busy(&self, busy: bool) {
        let result = if busy {
            self.0.set_attribute("disabled", "")
        } else {
            self.0.remove_attribute("disabled")
        };
        if let Err(err) = result {
            console::error!("subscribe button state failed", err);
        }
    }
}

pub(crate) fn mount(ctx: &UiContext) -> Vec<EventListener> {
    select_all(SUBSCRIBE_BUTTON_SELECTOR)
        .into_iter()
        .map(|button| bind(ctx, button))
        .collect()
}

fn bind(ctx: &UiContext, button: Element) -> EventListener {
    let ctx = ctx.clone();
    let target = button.clone();
    EventListener::new(&target, "click", move |event| {
        event.prevent_default();
        let Some(username) = trigger_id(button.get_attribute(USERNAME_ATTR)) else {
            return;
        };
        let guard = BusyGuard::new(DisabledButton(button.clone()));
        let ctx = ctx.clone();
        let button = button.clone();
        spawn_local(async move {
            let _guard = guard;
            let result = ctx.api.toggle_subscribe(&username).await;
            if let Err(err) = &result {
                console::error!("subscribe request failed", username.as_str(), err.to_string());
            }
            render(&ctx, &button, plan_subscribe(result));
        });
    })
}

fn render(ctx: &UiContext, button: &Element, effect: SubscribeEffect) {
    match effect {
        SubscribeEffect::Updated {
            subscribed,
            label_key,
            followers,
            notice,
            sound,
        } => {
            if let Err(err) = button
                .class_list()
                .toggle_with_force(SUBSCRIBED_CLASS, subscribed)
            {
                console::error!("subscribe class update failed", err);
            }
            if let Some(label) = select_in(button, SUBSCRIBE_TEXT_SELECTOR) {
                label.set_text_content(Some(&ctx.text(label_key)));
            }
            ctx.notify(&notice);
            if let Some(cue) = sound {
                ctx.sounds.play(cue);
            }
            update_followers(ctx, &followers);
        }
        SubscribeEffect::Failed { notice, sound } => {
            ctx.notify(&notice);
            ctx.sounds.play(sound);
        }
    }
}

fn update_followers(ctx: &UiContext, count: &str) {
    let labels = texts_in_every_locale("stats.followers");
    for item in select_all(STAT_ITEM_SELECTOR) {
        let caption = select_in(&item, STAT_LABEL_SELECTOR)
            .and_then(|label| label.text_content())
            .unwrap_or_default();
        if !is_followers_caption(&caption, &labels) {
            continue;
        }
        if let Some(value) = select_in(&item, STAT_VALUE_SELECTOR) {
            value.set_text_content(Some(count));
            pulse(value, ctx.timings.counter_pulse_ms);
        }
    }
}

fn pulse(value: Element, duration_ms: u32) {
    if let Err(err) = value.class_list().add_1(PULSE_CLASS) {
        console::warn!("counter pulse failed", err);
        return;
    }
    spawn_local(async move {
        TimeoutFuture::new(duration_ms).await;
        if let Err(err) = value.class_list().remove_1(PULSE_CLASS) {
            console::warn!("counter pulse reset failed", err);
        }
    });
}
