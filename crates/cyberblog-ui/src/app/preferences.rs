//! Persistence and environment helpers for the app shell.

use crate::core::config::UserSettings;
use crate::core::theme::{THEME_ATTRIBUTE, THEME_STORAGE_KEY, Theme};
use crate::i18n::{LocaleCode, negotiate};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::{document, window};
use wasm_bindgen::JsValue;

const USER_SETTINGS_GLOBAL: &str = "userSettings";

/// Raw `localStorage["theme"]`, shared with inline page scripts as a plain string.
pub(crate) fn load_stored_theme() -> Option<String> {
    match LocalStorage::raw().get_item(THEME_STORAGE_KEY) {
        Ok(value) => value,
        Err(err) => {
            log_storage_error("get", THEME_STORAGE_KEY, &format!("{err:?}"));
            None
        }
    }
}

pub(crate) fn persist_theme(theme: Theme) {
    if let Err(err) = LocalStorage::raw().set_item(THEME_STORAGE_KEY, theme.as_str()) {
        log_storage_error("set", THEME_STORAGE_KEY, &format!("{err:?}"));
    }
}

pub(crate) fn root_theme() -> Option<String> {
    document()
        .document_element()
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE))
}

/// `window.userSettings`, or defaults when the page did not render one.
pub(crate) fn load_user_settings() -> UserSettings {
    let value = js_sys::Reflect::get(&window(), &JsValue::from_str(USER_SETTINGS_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);
    if value.is_undefined() || value.is_null() {
        return UserSettings::default();
    }
    js_sys::JSON::stringify(&value)
        .ok()
        .and_then(|raw| raw.as_string())
        .map(|raw| UserSettings::from_json(&raw))
        .unwrap_or_default()
}

/// Settings locale, then `<html lang>`, then the site default. The browser
/// language is ignored: the server renders the page in one language.
pub(crate) fn current_locale(settings: &UserSettings) -> LocaleCode {
    let html_lang = document()
        .document_element()
        .and_then(|root| root.get_attribute("lang"));
    negotiate([settings.locale.as_deref(), html_lang.as_deref()])
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
