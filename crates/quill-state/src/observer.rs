//! # Observer Seam
//!
//! The editor learns about changes to the derived publish state through a
//! [`PublishObserver`]. Notifications are synchronous and fire only when a
//! value actually changes, at most once per output per mutator call.

use serde::{Deserialize, Serialize};

use crate::action::PublishAction;

/// Receives change notifications from a `PublishActionContext`.
pub trait PublishObserver {
    /// The primary action changed; the editor should relabel the commit control.
    fn action_changed(&mut self, action: PublishAction);

    /// The commit control became enabled or disabled.
    fn publishability_changed(&mut self, enabled: bool);
}

impl<O: PublishObserver + ?Sized> PublishObserver for &mut O {
    fn action_changed(&mut self, action: PublishAction) {
        (**self).action_changed(action);
    }

    fn publishability_changed(&mut self, enabled: bool) {
        (**self).publishability_changed(enabled);
    }
}

impl<O: PublishObserver + ?Sized> PublishObserver for Box<O> {
    fn action_changed(&mut self, action: PublishAction) {
        (**self).action_changed(action);
    }

    fn publishability_changed(&mut self, enabled: bool) {
        (**self).publishability_changed(enabled);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PublishObserver for NoopObserver {
    fn action_changed(&mut self, _action: PublishAction) {}

    fn publishability_changed(&mut self, _enabled: bool) {}
}

/// A single change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// See [`PublishObserver::action_changed`].
    ActionChanged {
        /// The new action.
        action: PublishAction,
    },
    /// See [`PublishObserver::publishability_changed`].
    PublishabilityChanged {
        /// Whether the commit control is now enabled.
        enabled: bool,
    },
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActionChanged { action } => write!(f, "action -> {action}"),
            Self::PublishabilityChanged { enabled } => write!(f, "publishable -> {enabled}"),
        }
    }
}

/// Observer that keeps an ordered log of every notification it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    log: Vec<Notification>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.log
    }

    /// Take every notification received so far, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.log)
    }

    /// Number of notifications received.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether no notification has been received.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

impl PublishObserver for RecordingObserver {
    fn action_changed(&mut self, action: PublishAction) {
        self.log.push(Notification::ActionChanged { action });
    }

    fn publishability_changed(&mut self, enabled: bool) {
        self.log.push(Notification::PublishabilityChanged { enabled });
    }
}
