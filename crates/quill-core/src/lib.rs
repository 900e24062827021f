//! # quill-core — Foundational Types for the Quill Editor Core
//!
//! Leaf crate of the workspace. It defines the value types the publish
//! state machine is built from and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed status set.** `PostStatus` is a single exhaustive enum with
//!    canonical wire names. Adding a status forces every consumer to decide
//!    how to treat it.
//!
//! 2. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision, so
//!    publish dates and clock readings compare without timezone ambiguity.
//!
//! 3. **Injected time.** Code that needs "now" takes a `Clock`. Production
//!    uses `SystemClock`; tests and session replay use `FixedClock` or
//!    `ManualClock` for deterministic results.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `quill-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod status;
pub mod temporal;

pub use error::QuillError;
pub use status::{PostStatus, POST_STATUS_COUNT};
pub use temporal::{Clock, FixedClock, ManualClock, SystemClock, Timestamp};
