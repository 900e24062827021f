//! # Post Status — Persisted Lifecycle of a Post
//!
//! Defines the `PostStatus` enum, the closed set of lifecycle states a post
//! can be persisted in. Every `match` on `PostStatus` is exhaustive, so
//! adding a status forces every consumer to decide how to treat it.
//!
//! ## Wire Names
//!
//! | Variant         | Name      |
//! |-----------------|-----------|
//! | `Draft`         | `draft`   |
//! | `PendingReview` | `pending` |
//! | `Publish`       | `publish` |
//! | `Scheduled`     | `future`  |
//! | `Private`       | `private` |
//! | `Trash`         | `trash`   |
//!
//! The names match what blog backends store, so a status loaded from a
//! post record or a recorded session parses without translation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::QuillError;

/// The persisted lifecycle status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostStatus {
    /// Work in progress, not visible to readers.
    #[serde(rename = "draft")]
    Draft,
    /// Submitted by a contributor and waiting for an editor.
    #[serde(rename = "pending")]
    PendingReview,
    /// Publicly visible.
    #[serde(rename = "publish")]
    Publish,
    /// Will become public at its publish date.
    #[serde(rename = "future")]
    Scheduled,
    /// Visible only to privileged users.
    #[serde(rename = "private")]
    Private,
    /// Deleted, recoverable from the trash.
    #[serde(rename = "trash")]
    Trash,
}

/// Total number of post statuses.
pub const POST_STATUS_COUNT: usize = 6;

impl PostStatus {
    /// All statuses, in declaration order.
    pub fn all() -> &'static [PostStatus] {
        &[
            Self::Draft,
            Self::PendingReview,
            Self::Publish,
            Self::Scheduled,
            Self::Private,
            Self::Trash,
        ]
    }

    /// Canonical wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending",
            Self::Publish => "publish",
            Self::Scheduled => "future",
            Self::Private => "private",
            Self::Trash => "trash",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::PendingReview),
            "publish" => Ok(Self::Publish),
            "future" => Ok(Self::Scheduled),
            "private" => Ok(Self::Private),
            "trash" => Ok(Self::Trash),
            other => Err(QuillError::UnknownStatus(other.to_string())),
        }
    }
}
