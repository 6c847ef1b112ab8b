//! Notification stack: transient alerts and server-rendered messages.

use crate::app::dom::{js_error, select, select_all, select_in};
use crate::core::config::UiTimings;
use crate::core::notify::{
    ALERT_CLASS, CLOSE_CLASS, CONTAINER_CLASS, Dismissal, EXIT_ANIMATION, NotificationKind,
};
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::document;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement};

struct Entry {
    element: Element,
    state: Dismissal,
    _close: Option<EventListener>,
    auto: Option<Timeout>,
}

struct Inner {
    timings: UiTimings,
    close_label: String,
    container: RefCell<Option<Element>>,
    next_id: Cell<u64>,
    entries: RefCell<HashMap<u64, Entry>>,
}

/// Shared handle to the page's alert stack.
#[derive(Clone)]
pub(crate) struct Notifier(Rc<Inner>);

impl Notifier {
    pub(crate) fn new(timings: UiTimings, close_label: String) -> Self {
        Self(Rc::new(Inner {
            timings,
            close_label,
            container: RefCell::new(None),
            next_id: Cell::new(0),
            entries: RefCell::new(HashMap::new()),
        }))
    }

    /// Append a transient alert; failures are logged.
    pub(crate) fn show(&self, message: &str, kind: &NotificationKind) {
        if let Err(err) = self.try_show(message, kind) {
            console::error!("notification failed", err.to_string());
        }
    }

    /// Wire close buttons and auto-dismiss on alerts rendered by the server.
    pub(crate) fn adopt_existing(&self) {
        for alert in select_all(&format!(".{ALERT_CLASS}")) {
            self.track(alert);
        }
    }

    /// Forget every pending alert, cancelling its timers and listeners.
    pub(crate) fn clear(&self) {
        let entries = std::mem::take(&mut *self.0.entries.borrow_mut());
        drop(entries);
    }

    fn try_show(&self, message: &str, kind: &NotificationKind) -> anyhow::Result<()> {
        let doc = document();
        let alert = doc.create_element("div").map_err(js_error)?;
        alert.set_class_name(&kind.class_name());

        let text = doc.create_element("span").map_err(js_error)?;
        text.set_text_content(Some(message));
        alert.append_child(&text).map_err(js_error)?;

        let close = doc.create_element("button").map_err(js_error)?;
        close.set_class_name(CLOSE_CLASS);
        close.set_attribute("type", "button").map_err(js_error)?;
        close
            .set_attribute("aria-label", &self.0.close_label)
            .map_err(js_error)?;
        close.set_text_content(Some("\u{d7}"));
        alert.append_child(&close).map_err(js_error)?;

        self.container()?.append_child(&alert).map_err(js_error)?;
        self.track(alert);
        Ok(())
    }

    fn container(&self) -> anyhow::Result<Element> {
        if let Some(existing) = self.0.container.borrow().as_ref() {
            return Ok(existing.clone());
        }
        let container = if let Some(found) = select(&format!(".{CONTAINER_CLASS}")) {
            found
        } else {
            let doc = document();
            let created = doc.create_element("div").map_err(js_error)?;
            created.set_class_name(CONTAINER_CLASS);
            doc.body()
                .ok_or_else(|| anyhow::anyhow!("document has no body"))?
                .append_child(&created)
                .map_err(js_error)?;
            created
        };
        *self.0.container.borrow_mut() = Some(container.clone());
        Ok(container)
    }

    fn track(&self, element: Element) {
        let id = self.0.next_id.get();
        self.0.next_id.set(id + 1);

        let close = select_in(&element, &format!(".{CLOSE_CLASS}")).map(|button| {
            let notifier = self.clone();
            EventListener::new(&button, "click", move |_| notifier.dismiss(id, true))
        });
        let notifier = self.clone();
        let auto = Timeout::new(self.0.timings.notification_ttl_ms, move || {
            notifier.dismiss(id, false);
        });

        self.0.entries.borrow_mut().insert(
            id,
            Entry {
                element,
                state: Dismissal::default(),
                _close: close,
                auto: Some(auto),
            },
        );
    }

    /// Start the exit animation once; `manual` also cancels the pending auto-dismiss.
    fn dismiss(&self, id: u64, manual: bool) {
        let cancelled = {
            let mut entries = self.0.entries.borrow_mut();
            let Some(entry) = entries.get_mut(&id) else {
                return;
            };
            if !entry.state.begin() {
                return;
            }
            if let Some(html) = entry.element.dyn_ref::<HtmlElement>()
                && let Err(err) = html.style().set_property("animation", EXIT_ANIMATION)
            {
                console::warn!("exit animation failed", err);
            }
            if manual { entry.auto.take() } else { None }
        };
        drop(cancelled);

        let notifier = self.clone();
        let exit_ms = self.0.timings.notification_exit_ms;
        spawn_local(async move {
            TimeoutFuture::new(exit_ms).await;
            notifier.finish(id);
        });
    }

    fn finish(&self, id: u64) {
        let removed = self.0.entries.borrow_mut().remove(&id);
        if let Some(entry) = removed
            && entry.element.is_connected()
        {
            entry.element.remove();
        }
    }
}
