//! Like and subscribe toggles: request guards and response handling.
//!
//! # Design
//! - The server owns the toggle state; a response is rendered as-is and a
//!   failure leaves the page untouched apart from a notification.
//! - Like buttons stay clickable but ignore clicks while their request is in
//!   flight ([`RequestGate`]). Subscribe buttons are disabled for the duration
//!   of the request ([`BusyGuard`]); both release on every exit path via `Drop`.

use crate::core::error::ApiError;
use crate::core::notify::NotificationKind;
use crate::core::sound::SoundCue;
use cyberblog_api_models::{LikeResponse, SubscribeResponse};
use std::cell::Cell;
use std::rc::Rc;

/// Like buttons.
pub const LIKE_BUTTON_SELECTOR: &str = ".like-btn";
/// Counter inside a like button.
pub const LIKE_COUNT_SELECTOR: &str = ".like-count";
/// Class on a liked button.
pub const LIKED_CLASS: &str = "liked";
/// Attribute carrying the post identifier.
pub const POST_ID_ATTR: &str = "data-post-id";
/// Subscribe buttons.
pub const SUBSCRIBE_BUTTON_SELECTOR: &str = ".subscribe-btn";
/// Label inside a subscribe button.
pub const SUBSCRIBE_TEXT_SELECTOR: &str = ".subscribe-text";
/// Class on a button whose author is followed.
pub const SUBSCRIBED_CLASS: &str = "subscribed";
/// Attribute carrying the author name.
pub const USERNAME_ATTR: &str = "data-username";
/// Profile statistics block.
pub const STAT_ITEM_SELECTOR: &str = ".stat-item";
/// Caption of a statistic.
pub const STAT_LABEL_SELECTOR: &str = ".stat-label";
/// Value of a statistic.
pub const STAT_VALUE_SELECTOR: &str = ".stat-value";

/// User-facing message produced by a toggle, as a translation key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Translation key of the message.
    pub message_key: &'static str,
    /// Style of the notification.
    pub kind: NotificationKind,
}

impl Notice {
    const fn new(message_key: &'static str, kind: NotificationKind) -> Self {
        Self { message_key, kind }
    }
}

/// DOM changes after a like request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LikeEffect {
    /// Render the server state.
    Updated {
        /// Text for the like counter.
        count: String,
        /// Whether the `liked` class is present.
        liked: bool,
        /// Cue to play.
        sound: Option<SoundCue>,
    },
    /// Leave the button alone and report the failure.
    Failed {
        /// Error notification.
        notice: Notice,
        /// Cue to play.
        sound: SoundCue,
    },
}

/// Map a like response to its DOM changes.
#[must_use]
pub fn plan_like(result: Result<LikeResponse, ApiError>) -> LikeEffect {
    match result {
        Ok(response) => LikeEffect::Updated {
            count: response.total_likes.to_string(),
            liked: response.liked,
            sound: response.liked.then_some(SoundCue::Success),
        },
        Err(_) => LikeEffect::Failed {
            notice: Notice::new("toast.like_failed", NotificationKind::Error),
            sound: SoundCue::Error,
        },
    }
}

/// DOM changes after a subscribe request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubscribeEffect {
    /// Render the server state.
    Updated {
        /// Whether the `subscribed` class is present.
        subscribed: bool,
        /// Translation key of the button label.
        label_key: &'static str,
        /// Text for the followers counter.
        followers: String,
        /// Confirmation notification.
        notice: Notice,
        /// Cue to play.
        sound: Option<SoundCue>,
    },
    /// Leave the page alone and report the failure.
    Failed {
        /// Error notification.
        notice: Notice,
        /// Cue to play.
        sound: SoundCue,
    },
}

/// Map a subscribe response to its DOM changes.
#[must_use]
pub fn plan_subscribe(result: Result<SubscribeResponse, ApiError>) -> SubscribeEffect {
    match result {
        Ok(response) if response.subscribed => SubscribeEffect::Updated {
            subscribed: true,
            label_key: "subscribe.unfollow",
            followers: response.followers_count.to_string(),
            notice: Notice::new("toast.subscribed", NotificationKind::Success),
            sound: Some(SoundCue::Success),
        },
        Ok(response) => SubscribeEffect::Updated {
            subscribed: false,
            label_key: "subscribe.follow",
            followers: response.followers_count.to_string(),
            notice: Notice::new("toast.unsubscribed", NotificationKind::Info),
            sound: None,
        },
        Err(_) => SubscribeEffect::Failed {
            notice: Notice::new("toast.subscribe_failed", NotificationKind::Error),
            sound: SoundCue::Error,
        },
    }
}

/// Whether a `.stat-label` caption names the followers statistic.
#[must_use]
pub fn is_followers_label(caption: &str, followers_label: &str) -> bool {
    !followers_label.is_empty() && caption.contains(followers_label)
}

/// Whether a caption names the followers statistic in any of `labels`.
#[must_use]
pub fn is_followers_caption(caption: &str, labels: &[String]) -> bool {
    labels.iter().any(|label| is_followers_label(caption, label))
}

/// Read a trigger's identifying data attribute; blank means "do nothing".
#[must_use]
pub fn trigger_id(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// At-most-one-outstanding guard for a control that stays clickable.
#[derive(Clone, Debug, Default)]
pub struct RequestGate {
    busy: Rc<Cell<bool>>,
}

impl RequestGate {
    /// Claim the gate; `None` while another request holds it.
    #[must_use]
    pub fn try_acquire(&self) -> Option<GatePass> {
        if self.busy.replace(true) {
            return None;
        }
        Some(GatePass {
            busy: Rc::clone(&self.busy),
        })
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Held for the lifetime of a request; releases the gate on drop.
#[derive(Debug)]
pub struct GatePass {
    busy: Rc<Cell<bool>>,
}

impl Drop for GatePass {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

/// Something that can be put in a busy (disabled) state.
pub trait BusyTarget {
    /// Enter or leave the busy state.
    fn set_busy(&self, busy: bool);
}

/// Marks a target busy until dropped.
#[derive(Debug)]
pub struct BusyGuard<T: BusyTarget> {
    target: T,
}

impl<T: BusyTarget> BusyGuard<T> {
    /// Mark `target` busy.
    pub fn new(target: T) -> Self {
        target.set_busy(true);
        Self { target }
    }
}

impl<T: BusyTarget> Drop for BusyGuard<T> {
    fn drop(&mut self) {
        self.target.set_busy(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LocaleCode, TranslationBundle, texts_in_every_locale};

    #[derive(Clone, Default)]
    struct Flag(Rc<Cell<bool>>);

    impl BusyTarget for Flag {
        fn set_busy(&self, busy: bool) {
            self.0.set(busy);
        }
    }

    #[test]
    fn like_response_drives_count_and_class() {
        assert_eq!(
            plan_like(Ok(LikeResponse {
                total_likes: 5,
                liked: true
            })),
            LikeEffect::Updated {
                count: "5".into(),
                liked: true,
                sound: Some(SoundCue::Success),
            }
        );
        assert_eq!(
            plan_like(Ok(LikeResponse {
                total_likes: 4,
                liked: false
            })),
            LikeEffect::Updated {
                count: "4".into(),
                liked: false,
                sound: None,
            }
        );
    }

    #[test]
    fn like_failure_only_reports() {
        let effect = plan_like(Err(ApiError::Status { status: 500 }));
        assert_eq!(
            effect,
            LikeEffect::Failed {
                notice: Notice::new("toast.like_failed", NotificationKind::Error),
                sound: SoundCue::Error,
            }
        );
    }

    #[test]
    fn subscribe_direction_picks_label_and_notice() {
        let on = plan_subscribe(Ok(SubscribeResponse {
            subscribed: true,
            followers_count: 10,
        }));
        let SubscribeEffect::Updated {
            subscribed,
            label_key,
            followers,
            notice,
            sound,
        } = on
        else {
            panic!("expected update");
        };
        assert!(subscribed);
        assert_eq!(label_key, "subscribe.unfollow");
        assert_eq!(followers, "10");
        assert_eq!(notice.kind, NotificationKind::Success);
        assert_eq!(sound, Some(SoundCue::Success));

        let off = plan_subscribe(Ok(SubscribeResponse {
            subscribed: false,
            followers_count: 9,
        }));
        assert!(matches!(
            off,
            SubscribeEffect::Updated {
                subscribed: false,
                label_key: "subscribe.follow",
                notice: Notice {
                    kind: NotificationKind::Info,
                    ..
                },
                sound: None,
                ..
            }
        ));
    }

    #[test]
    fn subscribe_failure_only_reports() {
        let effect = plan_subscribe(Err(ApiError::Transport("offline".into())));
        assert!(matches!(
            effect,
            SubscribeEffect::Failed {
                sound: SoundCue::Error,
                ..
            }
        ));
    }

    #[test]
    fn followers_label_matching() {
        assert!(is_followers_label("Подписчиков", "Подписчиков"));
        assert!(is_followers_label("  Followers ", "Followers"));
        assert!(!is_followers_label("Posts", "Followers"));
        assert!(!is_followers_label("Posts", ""));
    }

    #[test]
    fn russian_caption_matches_under_english_locale() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        let negotiated = bundle.text("stats.followers", "");
        assert_eq!(negotiated, "Followers");
        assert!(!is_followers_label("Подписчиков", &negotiated));

        let labels = texts_in_every_locale("stats.followers");
        assert!(is_followers_caption("Подписчиков", &labels));
        assert!(is_followers_caption("Followers", &labels));
        assert!(!is_followers_caption("Публикаций", &labels));
    }

    #[test]
    fn blank_trigger_ids_are_ignored() {
        assert_eq!(trigger_id(None), None);
        assert_eq!(trigger_id(Some("  ".into())), None);
        assert_eq!(trigger_id(Some("42".into())).as_deref(), Some("42"));
    }

    #[test]
    fn gate_admits_one_request_at_a_time() {
        let gate = RequestGate::default();
        let pass = gate.try_acquire();
        assert!(pass.is_some());
        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());
        drop(pass);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn busy_guard_restores_target_on_every_path() {
        fn request(target: Flag, fail: bool) -> Result<(), ApiError> {
            let _guard = BusyGuard::new(target.clone());
            assert!(target.0.get());
            if fail {
                Err(ApiError::Status { status: 502 })?;
            }
            Ok(())
        }

        let flag = Flag::default();
        assert!(request(flag.clone(), true).is_err());
        assert!(!flag.0.get());
        assert!(request(flag.clone(), false).is_ok());
        assert!(!flag.0.get());
    }
}
