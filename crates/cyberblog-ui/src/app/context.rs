//! Shared services handed to every feature binding.

use crate::core::config::UiTimings;
use crate::core::toggle::Notice;
use crate::features::notify::Notifier;
use crate::features::sound::SoundHandle;
use crate::i18n::TranslationBundle;
use crate::services::api::ApiClient;
use std::rc::Rc;

#[derive(Clone)]
pub(crate) struct UiContext {
    pub(crate) bundle: Rc<TranslationBundle>,
    pub(crate) notifier: Notifier,
    pub(crate) sounds: SoundHandle,
    pub(crate) api: ApiClient,
    pub(crate) timings: UiTimings,
}

impl UiContext {
    /// Translated text for a dotted key; the key itself when untranslated.
    pub(crate) fn text(&self, key: &str) -> String {
        self.bundle.text(key, key)
    }

    pub(crate) fn notify(&self, notice: &Notice) {
        self.notifier.show(&self.text(notice.message_key), &notice.kind);
    }
}
