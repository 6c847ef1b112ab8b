//! Lightweight JSON-backed translations with per-locale bundles.

use serde_json::Value;
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocaleCode {
    /// English.
    En,
    /// Russian.
    Ru,
}

impl LocaleCode {
    #[must_use]
    /// All supported locales in display order.
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Ru]
    }

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    /// Map an arbitrary language tag (`ru-RU`, `en_US`) to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Locale of the site's own markup, used when the page names none.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::Ru;

/// Pick the first supported locale among the candidates, in order.
#[must_use]
pub fn negotiate<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> LocaleCode {
    candidates
        .into_iter()
        .flatten()
        .find_map(LocaleCode::from_lang_tag)
        .unwrap_or(DEFAULT_LOCALE)
}

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build a translation bundle for the given locale.
    ///
    /// The bundle will gracefully degrade to English strings when a key is missing.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with English fallback and caller default.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }
}

/// The text at `path` in every bundle, for matching server-rendered copy
/// regardless of the negotiated locale.
#[must_use]
pub fn texts_in_every_locale(path: &str) -> Vec<String> {
    LocaleCode::all()
        .into_iter()
        .filter_map(|locale| resolve(&TranslationBundle::new(locale).tree, path))
        .collect()
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::Ru => include_str!("../../i18n/ru.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USED_KEYS: [&str; 14] = [
        "toast.theme_changed",
        "toast.like_failed",
        "toast.subscribed",
        "toast.unsubscribed",
        "toast.subscribe_failed",
        "subscribe.follow",
        "subscribe.unfollow",
        "stats.followers",
        "editor.preview",
        "editor.edit",
        "editor.preview_unavailable",
        "editor.bold",
        "editor.link",
        "notify.close",
    ];

    #[test]
    fn missing_key_falls_back_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::Ru);
        assert_eq!(bundle.text("nonexistent.key", "fallback"), "fallback");
    }

    #[test]
    fn bundles_cover_every_used_key() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            for key in USED_KEYS {
                assert!(
                    resolve(&bundle.tree, key).is_some(),
                    "{} missing {key}",
                    locale.code()
                );
            }
        }
    }

    #[test]
    fn russian_bundle_matches_site_copy() {
        let bundle = TranslationBundle::new(LocaleCode::Ru);
        assert_eq!(bundle.text("toast.theme_changed", ""), "Тема изменена!");
        assert_eq!(bundle.text("stats.followers", ""), "Подписчиков");
    }

    #[test]
    fn lang_tags_negotiate_in_order() {
        assert_eq!(LocaleCode::from_lang_tag("ru-RU"), Some(LocaleCode::Ru));
        assert_eq!(LocaleCode::from_lang_tag("EN_us"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("fr"), None);
        assert_eq!(negotiate([None, Some("fr"), Some("ru")]), LocaleCode::Ru);
        assert_eq!(negotiate([None, None]), DEFAULT_LOCALE);
    }

    #[test]
    fn unnamed_locale_defaults_to_site_language() {
        assert_eq!(negotiate([None, None]), LocaleCode::Ru);
    }

    #[test]
    fn every_locale_contributes_its_label() {
        let labels = texts_in_every_locale("stats.followers");
        assert_eq!(labels, vec!["Followers".to_string(), "Подписчиков".to_string()]);
        assert!(texts_in_every_locale("nonexistent.key").is_empty());
    }
}
