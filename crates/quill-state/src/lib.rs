//! # quill-state — Publish-Action State Machine
//!
//! Decides what the editor's commit control does and whether it can be
//! pressed. Given the post's original status, the status the user picked,
//! the publish date, whether the user may publish, and the transient
//! editor flags, it derives:
//!
//! - the primary [`PublishAction`] (save, update, publish, schedule, or
//!   submit for review),
//! - whether the primary control is enabled,
//! - whether the secondary control is shown.
//!
//! ## Modules
//!
//! - **Rules** (`rules.rs`): the pure decision table over a
//!   [`PublishInputs`] snapshot.
//! - **Context** (`context.rs`): [`PublishActionContext`], the per-session
//!   state machine that recomputes on every mutation and reports changes.
//! - **Observer** (`observer.rs`): the [`PublishObserver`] seam, plus
//!   [`NoopObserver`] and [`RecordingObserver`].
//! - **Action** (`action.rs`): [`PublishAction`] and its labels.
//!
//! ## Example
//!
//! ```
//! use quill_core::{PostStatus, Timestamp};
//! use quill_state::{PublishAction, PublishActionContext, RecordingObserver};
//!
//! let mut ctx = PublishActionContext::new(None, true, RecordingObserver::new());
//! assert_eq!(ctx.action(), PublishAction::Publish);
//!
//! ctx.set_content(true);
//! ctx.set_publish_date(Some(Timestamp::distant_future()));
//! assert_eq!(ctx.action(), PublishAction::Schedule);
//!
//! ctx.set_status(PostStatus::Draft);
//! ctx.set_publish_date(None);
//! assert_eq!(ctx.action(), PublishAction::Save);
//! assert!(!ctx.is_secondary_button_shown());
//! ```

pub mod action;
pub mod context;
pub mod observer;
pub mod rules;

pub use action::PublishAction;
pub use context::PublishActionContext;
pub use observer::{NoopObserver, Notification, PublishObserver, RecordingObserver};
pub use rules::{is_primary_enabled, is_secondary_shown, resolve_action, PublishInputs, PublishState};
