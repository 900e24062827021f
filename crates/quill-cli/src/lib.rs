//! # quill-cli — Command-Line Front End for the Quill Editor Core
//!
//! Exposes the publish state machine outside an editor, for support
//! investigations and for checking editor event logs.
//!
//! ## Subcommands
//!
//! - `quill evaluate`: derive the publish state for one set of inputs.
//! - `quill replay`: replay a recorded editor session file event by event.
//!
//! ```bash
//! quill evaluate --original future --publish-date 2026-01-01T00:00:00Z --has-content
//! quill replay sessions/new-post.yaml --format json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; every decision is delegated to
//!   `quill-state`.
//! - Results go to stdout; logs go to stderr.

pub mod evaluate;
pub mod replay;

use clap::ValueEnum;

/// Output format shared by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}
