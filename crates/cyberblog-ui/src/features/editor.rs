//! Markdown toolbar, shortcuts and preview toggle for `textarea.markdown-editor`.

use crate::app::context::UiContext;
use crate::app::dom::{js_error, select_all};
use crate::core::markdown::{
    EDITOR_SELECTOR, EditorCommand, MarkdownAction, PREVIEW_BUTTON_CLASS, PREVIEW_PANEL_CLASS,
    PreviewState, TOOL_BUTTON_CLASS, TOOLBAR_CLASS,
};
use crate::core::sound::SoundCue;
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::document;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlTextAreaElement, KeyboardEvent, Node};

pub(crate) fn mount(ctx: &UiContext) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    for element in select_all(EDITOR_SELECTOR) {
        let Ok(textarea) = element.dyn_into::<HtmlTextAreaElement>() else {
            continue;
        };
        match enhance(ctx, &textarea) {
            Ok(mut bound) => listeners.append(&mut bound),
            Err(err) => console::error!("markdown editor setup failed", err.to_string()),
        }
    }
    listeners
}

fn enhance(ctx: &UiContext, textarea: &HtmlTextAreaElement) -> anyhow::Result<Vec<EventListener>> {
    let mut listeners = Vec::new();
    let parent = textarea
        .parent_node()
        .ok_or_else(|| anyhow::anyhow!("editor is detached"))?;

    let toolbar = document().create_element("div").map_err(js_error)?;
    toolbar.set_class_name(TOOLBAR_CLASS);
    for action in MarkdownAction::all() {
        let button = tool_button(ctx, action)?;
        toolbar.append_child(&button).map_err(js_error)?;
        let editor = textarea.clone();
        let sounds = ctx.sounds.clone();
        let source = button.clone();
        listeners.push(EventListener::new(&button, "click", move |event| {
            event.prevent_default();
            let Some(action) = source
                .get_attribute("data-action")
                .and_then(|tag| tag.parse::<MarkdownAction>().ok())
            else {
                return;
            };
            edit(&editor, EditorCommand::Format(action));
            sounds.play(SoundCue::Click);
        }));
    }
    let anchor: &Node = textarea;
    parent
        .insert_before(&toolbar, Some(anchor))
        .map_err(js_error)?;

    let editor = textarea.clone();
    listeners.push(EventListener::new(textarea, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(command) = EditorCommand::from_key(&key.key(), key.ctrl_key()) {
            event.prevent_default();
            edit(&editor, command);
        }
    }));

    listeners.push(preview(ctx, textarea, &parent)?);
    Ok(listeners)
}

fn tool_button(ctx: &UiContext, action: MarkdownAction) -> anyhow::Result<Element> {
    let doc = document();
    let button = doc.create_element("button").map_err(js_error)?;
    button.set_attribute("type", "button").map_err(js_error)?;
    button.set_class_name(TOOL_BUTTON_CLASS);
    button
        .set_attribute("data-action", action.tag())
        .map_err(js_error)?;
    button
        .set_attribute("title", &ctx.text(&format!("editor.{}", action.tag())))
        .map_err(js_error)?;
    let face = match action {
        MarkdownAction::Bold => Some("strong"),
        MarkdownAction::Italic => Some("em"),
        _ => None,
    };
    if let Some(tag) = face {
        let inner = doc.create_element(tag).map_err(js_error)?;
        inner.set_text_content(Some(action.glyph()));
        button.append_child(&inner).map_err(js_error)?;
    } else {
        button.set_text_content(Some(action.glyph()));
    }
    Ok(button)
}

/// Run a command against the live selection and put the caret where it asks.
fn edit(textarea: &HtmlTextAreaElement, command: EditorCommand) {
    let start = textarea.selection_start().ok().flatten().unwrap_or(0);
    let end = textarea.selection_end().ok().flatten().unwrap_or(start);
    let result = command.apply(&textarea.value(), start, end);
    textarea.set_value(&result.text);
    if let Err(err) = textarea.focus() {
        console::warn!("editor focus failed", err);
    }
    if let Err(err) = textarea.set_selection_range(result.caret, result.caret) {
        console::warn!("caret update failed", err);
    }
}

fn preview(
    ctx: &UiContext,
    textarea: &HtmlTextAreaElement,
    parent: &Node,
) -> anyhow::Result<EventListener> {
    let doc = document();
    let state = Rc::new(Cell::new(PreviewState::default()));

    let button = doc
        .create_element("button")
        .map_err(js_error)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow::anyhow!("button is not an HTML element"))?;
    button.set_attribute("type", "button").map_err(js_error)?;
    button.set_class_name(PREVIEW_BUTTON_CLASS);
    button.set_text_content(Some(&ctx.text(state.get().label_key())));

    let panel = doc
        .create_element("div")
        .map_err(js_error)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow::anyhow!("panel is not an HTML element"))?;
    panel.set_class_name(PREVIEW_PANEL_CLASS);
    panel.set_hidden(true);

    let next = textarea.next_sibling();
    parent
        .insert_before(&button, next.as_ref())
        .map_err(js_error)?;
    parent
        .insert_before(&panel, button.next_sibling().as_ref())
        .map_err(js_error)?;

    let ctx = ctx.clone();
    let editor = textarea.clone();
    let label = button.clone();
    Ok(EventListener::new(&button, "click", move |event| {
        event.prevent_default();
        let mut current = state.get();
        let active = current.toggle();
        state.set(current);
        editor.set_hidden(active);
        panel.set_hidden(!active);
        if active {
            render_placeholder(&panel, &ctx.text("editor.preview_unavailable"));
        }
        label.set_text_content(Some(&ctx.text(current.label_key())));
        ctx.sounds.play(SoundCue::Click);
    }))
}

fn render_placeholder(panel: &HtmlElement, message: &str) {
    panel.set_text_content(None);
    let note = match document().create_element("em") {
        Ok(note) => note,
        Err(err) => {
            console::warn!("preview placeholder failed", err);
            return;
        }
    };
    note.set_text_content(Some(message));
    if let Err(err) = panel.append_child(&note) {
        console::warn!("preview placeholder failed", err);
    }
}
