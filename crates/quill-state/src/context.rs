//! # Publish Action Context
//!
//! The stateful half of the publish state machine. One context lives for
//! one editing session: it owns the decision inputs, recomputes the
//! derived publish state after every mutation, and tells its observer
//! when the action or the commit control's enablement changes.
//!
//! ## Mutation Contract
//!
//! Every mutator updates exactly one input and then recomputes all three
//! derived values before notifying anyone, so an observer never sees a
//! half-updated context. After recomputation:
//!
//! 1. If the action changed, `action_changed` fires.
//! 2. If the primary enablement changed, `publishability_changed` fires.
//!
//! Both checks run after every mutator. Setting an input to the value it
//! already has produces no notification.
//!
//! ## Concurrency
//!
//! Mutators take `&mut self`; the single-writer requirement is enforced by
//! the borrow checker rather than by locking.

use quill_core::{Clock, PostStatus, SystemClock, Timestamp};

use crate::action::PublishAction;
use crate::observer::PublishObserver;
use crate::rules::{PublishInputs, PublishState};

/// Publish state machine for one editing session.
#[derive(Debug)]
pub struct PublishActionContext<O, C = SystemClock> {
    inputs: PublishInputs,
    state: PublishState,
    observer: O,
    clock: C,
}

impl<O: PublishObserver> PublishActionContext<O, SystemClock> {
    /// Start a session reading time from the wall clock.
    ///
    /// `original_status` is `None` for a post that has never been saved.
    /// The initial state is computed but not reported to `observer`.
    pub fn new(original_status: Option<PostStatus>, user_can_publish: bool, observer: O) -> Self {
        Self::with_clock(original_status, user_can_publish, observer, SystemClock)
    }
}

impl<O: PublishObserver, C: Clock> PublishActionContext<O, C> {
    /// Start a session reading time from `clock`.
    pub fn with_clock(
        original_status: Option<PostStatus>,
        user_can_publish: bool,
        observer: O,
        clock: C,
    ) -> Self {
        let inputs = PublishInputs::new(original_status, user_can_publish);
        let state = inputs.resolve(clock.now());
        tracing::trace!(
            original_status = ?original_status,
            user_can_publish,
            action = %state.action,
            "publish context created"
        );
        Self {
            inputs,
            state,
            observer,
            clock,
        }
    }

    /// The post body became empty or non-empty.
    pub fn set_content(&mut self, has_content: bool) {
        self.inputs.has_content = has_content;
        self.recompute();
    }

    /// The user picked a status.
    pub fn set_status(&mut self, status: PostStatus) {
        self.inputs.current_status = Some(status);
        self.recompute();
    }

    /// The user picked a publish date, or cleared it with `None`.
    pub fn set_publish_date(&mut self, date: Option<Timestamp>) {
        self.inputs.publish_date = date;
        self.recompute();
    }

    /// A save/publish request started or finished.
    pub fn set_publishing(&mut self, in_progress: bool) {
        self.inputs.is_being_published = in_progress;
        self.recompute();
    }

    /// Re-evaluate against the clock without changing any input.
    ///
    /// A publish date can pass while the editor is open; calling this
    /// periodically lets the action move from `Update` to `Publish` (or
    /// from `Schedule` back to the immediate action) on its own.
    pub fn refresh(&mut self) {
        self.recompute();
    }

    fn recompute(&mut self) {
        let next = self.inputs.resolve(self.clock.now());
        let previous = std::mem::replace(&mut self.state, next);

        tracing::trace!(
            action = %next.action,
            primary_enabled = next.primary_enabled,
            secondary_shown = next.secondary_shown,
            "publish state recomputed"
        );

        if previous.action != next.action {
            tracing::debug!(from = %previous.action, to = %next.action, "publish action changed");
            self.observer.action_changed(next.action);
        }
        if previous.primary_enabled != next.primary_enabled {
            tracing::debug!(
                from = previous.primary_enabled,
                to = next.primary_enabled,
                "publishability changed"
            );
            self.observer.publishability_changed(next.primary_enabled);
        }
    }
}

impl<O, C> PublishActionContext<O, C> {
    /// The action the commit control performs.
    pub fn action(&self) -> PublishAction {
        self.state.action
    }

    /// Whether the commit control can be triggered.
    pub fn is_primary_button_enabled(&self) -> bool {
        self.state.primary_enabled
    }

    /// Whether the alternate control is offered.
    pub fn is_secondary_button_shown(&self) -> bool {
        self.state.secondary_shown
    }

    /// The alternate action, when the alternate control is shown.
    pub fn secondary_action(&self) -> Option<PublishAction> {
        if self.state.secondary_shown {
            self.state.action.secondary_action()
        } else {
            None
        }
    }

    /// All derived values at once.
    pub fn snapshot(&self) -> PublishState {
        self.state
    }

    /// All inputs at once.
    pub fn inputs(&self) -> &PublishInputs {
        &self.inputs
    }

    pub fn original_status(&self) -> Option<PostStatus> {
        self.inputs.original_status
    }

    pub fn current_status(&self) -> Option<PostStatus> {
        self.inputs.current_status
    }

    pub fn publish_date(&self) -> Option<Timestamp> {
        self.inputs.publish_date
    }

    pub fn has_content(&self) -> bool {
        self.inputs.has_content
    }

    pub fn is_being_published(&self) -> bool {
        self.inputs.is_being_published
    }

    pub fn user_can_publish(&self) -> bool {
        self.inputs.user_can_publish
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// End the session, handing back the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }
}
