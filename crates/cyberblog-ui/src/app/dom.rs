//! Small DOM lookup helpers shared by the feature bindings.

use gloo::utils::document;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, Node, NodeList};

pub(crate) fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub(crate) fn select(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

pub(crate) fn select_all(selector: &str) -> Vec<Element> {
    document()
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub(crate) fn select_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub(crate) fn closest_target(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
}

/// Whether the event target sits inside `container`.
pub(crate) fn target_within(event: &Event, container: &Element) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Node>().ok())
        .is_some_and(|node| container.contains(Some(&node)))
}

/// Whether the event target is `element` itself.
pub(crate) fn target_is(event: &Event, element: &Element) -> bool {
    event.target().is_some_and(|target| {
        let target: &JsValue = target.as_ref();
        let element: &JsValue = element.as_ref();
        target == element
    })
}

/// Convert a JS exception into an `anyhow` error.
pub(crate) fn js_error(err: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{err:?}")
}
