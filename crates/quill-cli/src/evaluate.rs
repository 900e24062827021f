//! # Evaluate Subcommand
//!
//! Derives the publish state for one set of editor inputs given as flags.
//!
//! ```bash
//! # A contributor's existing draft:
//! quill evaluate --original draft --cannot-publish --has-content
//!
//! # A scheduled post whose date has passed, evaluated at a pinned instant:
//! quill evaluate --original future --publish-date 2026-01-01T00:00:00Z \
//!     --now 2026-01-02T00:00:00Z --format json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use quill_core::{FixedClock, PostStatus, Timestamp};
use quill_state::{PublishAction, PublishActionContext, PublishInputs, PublishState, RecordingObserver};

use crate::OutputFormat;

/// Arguments for the evaluate subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Status the post was loaded with (draft, pending, publish, future,
    /// private, trash). Omit for a post that has never been saved.
    #[arg(long)]
    pub original: Option<PostStatus>,

    /// Status picked in the editor during this session.
    #[arg(long)]
    pub status: Option<PostStatus>,

    /// Publish date (RFC 3339). Omit to publish immediately.
    #[arg(long)]
    pub publish_date: Option<Timestamp>,

    /// The post body is non-empty.
    #[arg(long)]
    pub has_content: bool,

    /// A save/publish request is in flight.
    #[arg(long)]
    pub publishing: bool,

    /// The user lacks publish rights.
    #[arg(long)]
    pub cannot_publish: bool,

    /// Evaluate at this instant (RFC 3339) instead of the wall clock.
    #[arg(long)]
    pub now: Option<Timestamp>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Result of evaluating one set of inputs.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// The instant the inputs were evaluated at.
    pub now: Timestamp,
    /// Inputs the state was derived from.
    pub inputs: PublishInputs,
    /// Derived action and control state.
    pub state: PublishState,
    /// Title of the commit control.
    pub label: &'static str,
    /// Title while the action is in flight.
    pub progress_label: &'static str,
    /// Notice shown if the action fails.
    pub failure_label: &'static str,
    /// Alternate action offered beside the commit control, if shown.
    pub secondary_action: Option<PublishAction>,
}

/// Execute the evaluate subcommand.
pub fn run_evaluate(args: &EvaluateArgs) -> Result<u8> {
    let evaluation = evaluate(args);
    tracing::info!(action = %evaluation.state.action, now = %evaluation.now, "evaluated publish state");

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&evaluation)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&evaluation)
                .context("failed to serialize evaluation")?;
            println!("{json}");
        }
    }
    Ok(0)
}

/// Build a context from `args` and read back its derived state.
pub fn evaluate(args: &EvaluateArgs) -> Evaluation {
    let now = args.now.unwrap_or_else(Timestamp::now);
    let mut ctx = PublishActionContext::with_clock(
        args.original,
        !args.cannot_publish,
        RecordingObserver::new(),
        FixedClock(now),
    );
    if let Some(status) = args.status {
        ctx.set_status(status);
    }
    ctx.set_publish_date(args.publish_date);
    ctx.set_content(args.has_content);
    ctx.set_publishing(args.publishing);

    let state = ctx.snapshot();
    Evaluation {
        now,
        inputs: *ctx.inputs(),
        state,
        label: state.action.label(),
        progress_label: state.action.progress_label(),
        failure_label: state.action.failure_label(),
        secondary_action: ctx.secondary_action(),
    }
}

/// Human-readable rendering of an evaluation.
pub fn render_text(evaluation: &Evaluation) -> String {
    let secondary = match evaluation.secondary_action {
        Some(action) => format!("shown ({})", action.label()),
        None => "hidden".to_string(),
    };
    let primary = if evaluation.state.primary_enabled {
        "enabled"
    } else {
        "disabled"
    };
    format!(
        "  evaluated at:  {}\n  action:        {} ({:?})\n  in flight:     {:?}\n  on failure:    {:?}\n  primary:       {}\n  secondary:     {}\n",
        evaluation.now,
        evaluation.state.action,
        evaluation.label,
        evaluation.progress_label,
        evaluation.failure_label,
        primary,
        secondary,
    )
}
