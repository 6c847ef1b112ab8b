//! Like buttons.

use crate::app::context::UiContext;
use crate::app::dom::{select_all, select_in};
use crate::core::toggle::{
    LIKE_BUTTON_SELECTOR, LIKE_COUNT_SELECTOR, LIKED_CLASS, LikeEffect, POST_ID_ATTR,
    RequestGate, plan_like, trigger_id,
};
use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub(crate) fn mount(ctx: &UiContext) -> Vec<EventListener> {
    select_all(LIKE_BUTTON_SELECTOR)
        .into_iter()
        .map(|button| bind(ctx, button))
        .collect()
}

fn bind(ctx: &UiContext, button: Element) -> EventListener {
    let gate = RequestGate::default();
    let ctx = ctx.clone();
    let target = button.clone();
    EventListener::new(&target, "click", move |event| {
        event.prevent_default();
        let Some(post_id) = trigger_id(button.get_attribute(POST_ID_ATTR)) else {
            return;
        };
        let Some(pass) = gate.try_acquire() else {
            return;
        };
        let ctx = ctx.clone();
        let button = button.clone();
        spawn_local(async move {
            let _pass = pass;
            let result = ctx.api.toggle_like(&post_id).await;
            if let Err(err) = &result {
                console::error!("like request failed", post_id.as_str(), err.to_string());
            }
            render(&ctx, &button, plan_like(result));
        });
    })
}

fn render(ctx: &UiContext, button: &Element, effect: LikeEffect) {
    match effect {
        LikeEffect::Updated {
            count,
            liked,
            sound,
        } => {
            if let Some(counter) = select_in(button, LIKE_COUNT_SELECTOR) {
                counter.set_text_content(Some(&count));
            }
            if let Err(err) = button.class_list().toggle_with_force(LIKED_CLASS, liked) {
                console::error!("like class update failed", err);
            }
            if let Some(cue) = sound {
                ctx.sounds.play(cue);
            }
        }
        LikeEffect::Failed { notice, sound } => {
            ctx.notify(&notice);
            ctx.sounds.play(sound);
        }
    }
}
