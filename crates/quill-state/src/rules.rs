//! # Publish Rules — the Decision Table
//!
//! Pure functions from a snapshot of editor inputs (plus the current
//! instant) to the derived publish state. `PublishActionContext` calls
//! these on every mutation; they are public so a caller holding a bare
//! snapshot can evaluate it without building a context.
//!
//! ## Action Resolution
//!
//! A single ordered chain, first match wins:
//!
//! ```text
//! 1. original == Scheduled    ──▶ date <= now ? Publish : Update
//! 2. date > now, effective != Scheduled ──▶ Schedule
//! 3. original == None         ──▶ current == Draft ? Save : Publish
//! 4. otherwise                ──▶ can publish ? Update : SubmitForReview
//! ```
//!
//! where `effective = current ?? original ?? Draft`. The order is the
//! precedence: having been scheduled is sticky history that beats
//! everything, a future date beats the new/existing split, and only then
//! does authorization matter.

use serde::{Deserialize, Serialize};

use quill_core::{PostStatus, Timestamp};

use crate::action::PublishAction;

/// Every input the publish decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishInputs {
    /// Status the post had when editing began. `None` for a never-saved post.
    pub original_status: Option<PostStatus>,
    /// Status explicitly picked during this session. `None` means no
    /// override, which is not the same as `Some(Draft)`.
    pub current_status: Option<PostStatus>,
    /// Scheduled publish instant. `None` means publish immediately.
    pub publish_date: Option<Timestamp>,
    /// Whether the post body is non-empty.
    pub has_content: bool,
    /// Whether a save/publish request is in flight.
    pub is_being_published: bool,
    /// Whether the user may publish, fixed for the session.
    pub user_can_publish: bool,
}

impl PublishInputs {
    /// Inputs at the start of an editing session.
    pub fn new(original_status: Option<PostStatus>, user_can_publish: bool) -> Self {
        Self {
            original_status,
            current_status: None,
            publish_date: None,
            has_content: false,
            is_being_published: false,
            user_can_publish,
        }
    }

    /// The status the post would be saved with right now.
    pub fn effective_status(&self) -> PostStatus {
        self.current_status
            .or(self.original_status)
            .unwrap_or(PostStatus::Draft)
    }

    /// Evaluate every derived value at `now`.
    pub fn resolve(&self, now: Timestamp) -> PublishState {
        let action = resolve_action(self, now);
        PublishState {
            action,
            primary_enabled: is_primary_enabled(self),
            secondary_shown: is_secondary_shown(self, action),
        }
    }
}

/// The derived outputs for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishState {
    /// What the commit control does.
    pub action: PublishAction,
    /// Whether the commit control can be triggered.
    pub primary_enabled: bool,
    /// Whether the alternate control is offered beside it.
    pub secondary_shown: bool,
}

/// Resolve the primary action.
pub fn resolve_action(inputs: &PublishInputs, now: Timestamp) -> PublishAction {
    if inputs.original_status == Some(PostStatus::Scheduled) {
        return match inputs.publish_date {
            Some(date) if date <= now => PublishAction::Publish,
            _ => PublishAction::Update,
        };
    }

    if let Some(date) = inputs.publish_date {
        if date > now && inputs.effective_status() != PostStatus::Scheduled {
            return PublishAction::Schedule;
        }
    }

    if inputs.original_status.is_none() {
        return match inputs.current_status {
            Some(PostStatus::Draft) => PublishAction::Save,
            _ => PublishAction::Publish,
        };
    }

    if !inputs.user_can_publish {
        return PublishAction::SubmitForReview;
    }

    PublishAction::Update
}

/// Whether the commit control can be triggered.
pub fn is_primary_enabled(inputs: &PublishInputs) -> bool {
    !inputs.is_being_published && inputs.has_content
}

/// Whether the alternate control is offered beside `action`.
pub fn is_secondary_shown(inputs: &PublishInputs, action: PublishAction) -> bool {
    inputs.has_content && action.secondary_action().is_some()
}
