//! # Publish Actions
//!
//! The closed set of things the editor's commit control can do, together
//! with the text an editor shows for each of them.
//!
//! | Action            | Label               | In flight                  |
//! |-------------------|---------------------|----------------------------|
//! | `Save`            | Save                | Saving...                  |
//! | `Update`          | Update              | Updating...                |
//! | `Publish`         | Publish             | Publishing...              |
//! | `Schedule`        | Schedule            | Scheduling...              |
//! | `SubmitForReview` | Submit for Review   | Submitting for Review...   |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use quill_core::QuillError;

/// The primary action the commit control performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishAction {
    /// Persist without changing visibility.
    Save,
    /// Persist changes to a post that already exists on the server.
    Update,
    /// Make the post public now.
    Publish,
    /// Make the post public at its future publish date.
    Schedule,
    /// Hand the post to an editor; the user lacks publish rights.
    SubmitForReview,
}

impl PublishAction {
    /// All actions, in declaration order.
    pub fn all() -> &'static [PublishAction] {
        &[
            Self::Save,
            Self::Update,
            Self::Publish,
            Self::Schedule,
            Self::SubmitForReview,
        ]
    }

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Update => "update",
            Self::Publish => "publish",
            Self::Schedule => "schedule",
            Self::SubmitForReview => "submit_for_review",
        }
    }

    /// Title of the commit control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Save => "Save",
            Self::Update => "Update",
            Self::Publish => "Publish",
            Self::Schedule => "Schedule",
            Self::SubmitForReview => "Submit for Review",
        }
    }

    /// Title of the commit control while the action is in flight.
    pub fn progress_label(&self) -> &'static str {
        match self {
            Self::Save => "Saving...",
            Self::Update => "Updating...",
            Self::Publish => "Publishing...",
            Self::Schedule => "Scheduling...",
            Self::SubmitForReview => "Submitting for Review...",
        }
    }

    /// Notice shown when the action fails.
    pub fn failure_label(&self) -> &'static str {
        match self {
            Self::Save => "Error occurred during saving",
            Self::Update => "Error occurred during updating",
            Self::Publish | Self::SubmitForReview => "Error occurred during publishing",
            Self::Schedule => "Error occurred during scheduling",
        }
    }

    /// The alternate offered next to this action, if any.
    ///
    /// A plain save has nothing useful to offer beside it; every other
    /// action can be paired with saving the post as it is.
    pub fn secondary_action(&self) -> Option<PublishAction> {
        match self {
            Self::Save => None,
            Self::Update | Self::Publish | Self::Schedule | Self::SubmitForReview => {
                Some(Self::Save)
            }
        }
    }
}

impl std::fmt::Display for PublishAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishAction {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "save" => Ok(Self::Save),
            "update" => Ok(Self::Update),
            "publish" => Ok(Self::Publish),
            "schedule" => Ok(Self::Schedule),
            "submit_for_review" => Ok(Self::SubmitForReview),
            other => Err(QuillError::UnknownAction(other.to_string())),
        }
    }
}
