//! Mobile menu, account dropdown and the markdown guide modal.

use crate::app::dom::{by_id, select_in, target_is, target_within};
use crate::core::chrome::{
    ACCOUNT_BUTTON_ID, ACCOUNT_DROPDOWN_ID, ACTIVE_CLASS, ClickTarget, GUIDE_BUTTON_ID,
    GUIDE_MODAL_ID, MOBILE_TOGGLE_ID, MODAL_CLOSE_SELECTOR, ModalEvent, NAVBAR_MENU_ID,
    SHOW_CLASS, dropdown_should_close, modal_should_close,
};
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

pub(crate) fn mount() -> Vec<EventListener> {
    let mut listeners = Vec::new();
    listeners.extend(mobile_menu());
    listeners.extend(account_dropdown());
    listeners.extend(guide_modal());
    listeners
}

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        console::warn!("class update failed", class, err);
    }
}

fn toggle_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().toggle(class) {
        console::warn!("class update failed", class, err);
    }
}

fn mobile_menu() -> Option<EventListener> {
    let toggle = by_id(MOBILE_TOGGLE_ID)?;
    let menu = by_id(NAVBAR_MENU_ID)?;
    let button = toggle.clone();
    Some(EventListener::new(&toggle, "click", move |_| {
        toggle_class(&button, ACTIVE_CLASS);
        toggle_class(&menu, ACTIVE_CLASS);
    }))
}

fn account_dropdown() -> Vec<EventListener> {
    let (Some(button), Some(dropdown)) = (by_id(ACCOUNT_BUTTON_ID), by_id(ACCOUNT_DROPDOWN_ID))
    else {
        return Vec::new();
    };

    let panel = dropdown.clone();
    let open = EventListener::new(&button, "click", move |event| {
        event.stop_propagation();
        toggle_class(&panel, SHOW_CLASS);
    });

    let outside = EventListener::new(&document(), "click", move |event| {
        let target = ClickTarget {
            in_button: target_within(event, &button),
            in_menu: target_within(event, &dropdown),
        };
        if dropdown_should_close(target) {
            set_class(&dropdown, SHOW_CLASS, false);
        }
    });

    vec![open, outside]
}

fn guide_modal() -> Vec<EventListener> {
    let (Some(trigger), Some(modal)) = (by_id(GUIDE_BUTTON_ID), by_id(GUIDE_MODAL_ID)) else {
        return Vec::new();
    };
    let mut listeners = Vec::with_capacity(4);

    let target = modal.clone();
    listeners.push(EventListener::new(&trigger, "click", move |event| {
        event.prevent_default();
        set_class(&target, ACTIVE_CLASS, true);
    }));

    if let Some(close) = select_in(&modal, MODAL_CLOSE_SELECTOR) {
        let target = modal.clone();
        listeners.push(EventListener::new(&close, "click", move |_| {
            if modal_should_close(ModalEvent::CloseButton, true) {
                set_class(&target, ACTIVE_CLASS, false);
            }
        }));
    }

    let target = modal.clone();
    listeners.push(EventListener::new(&modal, "click", move |event| {
        let on_backdrop = target_is(event, &target);
        if modal_should_close(ModalEvent::Click { on_backdrop }, true) {
            set_class(&target, ACTIVE_CLASS, false);
        }
    }));

    listeners.push(EventListener::new(&document(), "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let is_open = modal.class_list().contains(ACTIVE_CLASS);
        if modal_should_close(ModalEvent::Key(&key.key()), is_open) {
            set_class(&modal, ACTIVE_CLASS, false);
        }
    }));

    listeners
}
