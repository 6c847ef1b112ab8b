#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Shared HTTP DTOs for the blog's toggle endpoints.
//!
//! Both endpoints flip a binary relationship (post liked, author followed) and
//! answer with the new state plus an updated count. The server is the only
//! source of truth; clients render whatever comes back.
use serde::{Deserialize, Serialize};

/// Response body of `POST /post/{id}/like/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeResponse {
    /// Like count after the toggle.
    pub total_likes: u64,
    /// Whether the current user likes the post after the toggle.
    pub liked: bool,
}

/// Response body of `POST /user/{username}/subscribe/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscribeResponse {
    /// Whether the current user follows the author after the toggle.
    pub subscribed: bool,
    /// Follower count of the author after the toggle.
    pub followers_count: u64,
}

/// Path of the like toggle endpoint for a post.
#[must_use]
pub fn like_path(post_id: &str) -> String {
    format!("/post/{}/like/", urlencoding::encode(post_id))
}

/// Path of the subscribe toggle endpoint for an author.
#[must_use]
pub fn subscribe_path(username: &str) -> String {
    format!("/user/{}/subscribe/", urlencoding::encode(username))
}
