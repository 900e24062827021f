//! # Replay Subcommand
//!
//! Replays a recorded editor session through the publish state machine
//! and prints, for every event, the notifications the editor would have
//! received and the resulting state.
//!
//! ## Session File
//!
//! YAML (or JSON, by `.json` extension):
//!
//! ```yaml
//! original_status: future      # omit for a never-saved post
//! user_can_publish: true       # default true
//! now: 2026-01-15T12:00:00Z    # clock at session start; default wall clock
//! events:
//!   - event: content
//!     has_content: true
//!   - event: status
//!     status: draft
//!   - event: publish_date
//!     date: 2026-01-15T13:00:00Z   # omit or null to clear
//!   - event: publishing
//!     in_progress: true
//!   - event: tick                   # move the clock and re-evaluate
//!     now: 2026-01-15T13:00:00Z
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use quill_core::{Clock, ManualClock, PostStatus, Timestamp};
use quill_state::{
    Notification, PublishActionContext, PublishObserver, PublishState, RecordingObserver,
};

use crate::OutputFormat;

/// Arguments for the replay subcommand.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Session file (.yaml, .yml, or .json).
    pub session: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// A recorded editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Status when editing began; `None` for a never-saved post.
    #[serde(default)]
    pub original_status: Option<PostStatus>,
    /// Whether the editing user may publish directly.
    #[serde(default = "default_user_can_publish")]
    pub user_can_publish: bool,
    /// Clock reading at session start.
    #[serde(default)]
    pub now: Option<Timestamp>,
    /// Events in the order the editor produced them.
    #[serde(default)]
    pub events: Vec<EditorEvent>,
}

fn default_user_can_publish() -> bool {
    true
}

/// One editor event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    Content {
        has_content: bool,
    },
    Status {
        status: PostStatus,
    },
    PublishDate {
        #[serde(default)]
        date: Option<Timestamp>,
    },
    Publishing {
        in_progress: bool,
    },
    /// Time passed; the clock now reads `now`.
    Tick {
        now: Timestamp,
    },
}

impl std::fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Content { has_content } => write!(f, "content {has_content}"),
            Self::Status { status } => write!(f, "status {status}"),
            Self::PublishDate { date: Some(date) } => write!(f, "publish_date {date}"),
            Self::PublishDate { date: None } => f.write_str("publish_date cleared"),
            Self::Publishing { in_progress } => write!(f, "publishing {in_progress}"),
            Self::Tick { now } => write!(f, "tick {now}"),
        }
    }
}

/// Outcome of one replayed event.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    /// 1-based position in the session.
    pub index: usize,
    /// The event that was applied.
    pub event: EditorEvent,
    /// Notifications fired by this event, in order.
    pub notifications: Vec<Notification>,
    /// State after the event.
    pub state: PublishState,
}

/// Outcome of a whole session.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Clock reading when the session was constructed.
    pub started_at: Timestamp,
    /// State before the first event.
    pub initial: PublishState,
    /// One entry per event.
    pub steps: Vec<ReplayStep>,
}

impl ReplayReport {
    /// State after the last event.
    pub fn final_state(&self) -> PublishState {
        self.steps.last().map(|s| s.state).unwrap_or(self.initial)
    }
}

/// Execute the replay subcommand.
pub fn run_replay(args: &ReplayArgs) -> Result<u8> {
    let session = load_session(&args.session)?;
    tracing::info!(
        path = %args.session.display(),
        events = session.events.len(),
        "loaded session"
    );

    let report = replay(&session);
    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialize replay report")?;
            println!("{json}");
        }
    }
    Ok(0)
}

/// Read and decode a session file.
pub fn load_session(path: &Path) -> Result<Session> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file: {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON session: {}", path.display()))
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid YAML session: {}", path.display()))
    }
}

/// Replay every event of `session` on a manual clock.
pub fn replay(session: &Session) -> ReplayReport {
    let started_at = session.now.unwrap_or_else(Timestamp::now);
    let mut ctx = PublishActionContext::with_clock(
        session.original_status,
        session.user_can_publish,
        RecordingObserver::new(),
        ManualClock::new(started_at),
    );
    let initial = ctx.snapshot();

    let mut steps = Vec::with_capacity(session.events.len());
    for (i, event) in session.events.iter().enumerate() {
        apply_event(&mut ctx, event);
        let notifications = ctx.observer_mut().drain();
        tracing::debug!(step = i + 1, %event, notified = notifications.len(), "replayed event");
        steps.push(ReplayStep {
            index: i + 1,
            event: event.clone(),
            notifications,
            state: ctx.snapshot(),
        });
    }

    ReplayReport {
        started_at,
        initial,
        steps,
    }
}

/// Feed one editor event into the context.
pub fn apply_event<O: PublishObserver>(
    ctx: &mut PublishActionContext<O, ManualClock>,
    event: &EditorEvent,
) {
    match event {
        EditorEvent::Content { has_content } => ctx.set_content(*has_content),
        EditorEvent::Status { status } => ctx.set_status(*status),
        EditorEvent::PublishDate { date } => ctx.set_publish_date(*date),
        EditorEvent::Publishing { in_progress } => ctx.set_publishing(*in_progress),
        EditorEvent::Tick { now } => {
            if *now < ctx.clock().now() {
                tracing::warn!(%now, "tick moves the clock backwards");
            }
            ctx.clock().set(*now);
            ctx.refresh();
        }
    }
}

/// Human-readable rendering of a replay.
pub fn render_text(report: &ReplayReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("  started at:  {}\n", report.started_at));
    out.push_str(&format!("  initial:     {}\n", describe(&report.initial)));
    for step in &report.steps {
        out.push_str(&format!("  [{}] {}\n", step.index, step.event));
        for notification in &step.notifications {
            out.push_str(&format!("        notify  {notification}\n"));
        }
        out.push_str(&format!("        state   {}\n", describe(&step.state)));
    }
    out
}

fn describe(state: &PublishState) -> String {
    format!(
        "{} (primary {}, secondary {})",
        state.action,
        if state.primary_enabled { "enabled" } else { "disabled" },
        if state.secondary_shown { "shown" } else { "hidden" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_state::PublishAction;

    const NEW_POST_SESSION: &str = include_str!("../sessions/new-post.yaml");
    const SCHEDULED_POST_SESSION: &str = include_str!("../sessions/scheduled-post.yaml");

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn parse_new_post_session() {
        let session: Session = serde_yaml::from_str(NEW_POST_SESSION).unwrap();
        assert_eq!(session.original_status, None);
        assert!(session.user_can_publish);
        assert_eq!(session.now, Some(ts("2026-01-15T12:00:00Z")));
        assert_eq!(
            session.events[0],
            EditorEvent::Content { has_content: true }
        );
    }

    #[test]
    fn replay_new_post_session() {
        let session: Session = serde_yaml::from_str(NEW_POST_SESSION).unwrap();
        let report = replay(&session);
        assert_eq!(report.initial.action, PublishAction::Publish);

        let actions: Vec<PublishAction> = report.steps.iter().map(|s| s.state.action).collect();
        assert_eq!(
            actions,
            vec![
                PublishAction::Publish,
                PublishAction::Save,
                PublishAction::Schedule,
                PublishAction::Save,
                PublishAction::Save,
            ]
        );
        assert_eq!(
            report.steps[0].notifications,
            vec![Notification::PublishabilityChanged { enabled: true }]
        );
        assert!(!report.final_state().primary_enabled);
    }

    #[test]
    fn replay_scheduled_post_goes_live_on_tick() {
        let session: Session = serde_yaml::from_str(SCHEDULED_POST_SESSION).unwrap();
        let report = replay(&session);
        assert_eq!(report.initial.action, PublishAction::Update);
        let last = report.steps.last().unwrap();
        assert!(matches!(last.event, EditorEvent::Tick { .. }));
        assert_eq!(
            last.notifications,
            vec![Notification::ActionChanged {
                action: PublishAction::Publish
            }]
        );
    }

    #[test]
    fn subsecond_publish_date_is_due_within_its_second() {
        let yaml = "original_status: future\n\
                    now: 2026-01-15T12:00:00Z\n\
                    events:\n\
                    \x20 - event: publish_date\n\
                    \x20   date: 2026-01-15T12:30:00.500Z\n\
                    \x20 - event: tick\n\
                    \x20   now: 2026-01-15T12:30:00Z\n";
        let session: Session = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            session.events[0],
            EditorEvent::PublishDate {
                date: Some(ts("2026-01-15T12:30:00Z"))
            }
        );
        let report = replay(&session);
        assert_eq!(report.steps[0].state.action, PublishAction::Update);
        assert_eq!(report.final_state().action, PublishAction::Publish);
    }

    #[test]
    fn session_defaults() {
        let session: Session = serde_yaml::from_str("original_status: draft\n").unwrap();
        assert!(session.user_can_publish);
        assert!(session.events.is_empty());
        let report = replay(&session);
        assert_eq!(report.final_state(), report.initial);
        assert_eq!(report.initial.action, PublishAction::Update);
    }

    #[test]
    fn publish_date_event_without_date_clears() {
        let session: Session = serde_yaml::from_str("events:\n  - event: publish_date\n").unwrap();
        assert_eq!(session.events, vec![EditorEvent::PublishDate { date: None }]);
    }

    #[test]
    fn unknown_event_is_rejected() {
        let result: Result<Session, _> = serde_yaml::from_str("events:\n  - event: delete\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_session_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("session.json");
        std::fs::write(
            &json_path,
            r#"{"original_status":"draft","user_can_publish":false,"events":[{"event":"content","has_content":true}]}"#,
        )
        .unwrap();
        let from_json = load_session(&json_path).unwrap();
        assert!(!from_json.user_can_publish);
        assert_eq!(replay(&from_json).final_state().action, PublishAction::SubmitForReview);

        let yaml_path = dir.path().join("session.yml");
        std::fs::write(&yaml_path, NEW_POST_SESSION).unwrap();
        assert_eq!(load_session(&yaml_path).unwrap().events.len(), 5);
    }

    #[test]
    fn load_session_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_session(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read session file"));
    }

    #[test]
    fn render_text_shows_notifications() {
        let session: Session = serde_yaml::from_str(NEW_POST_SESSION).unwrap();
        let text = render_text(&replay(&session));
        assert!(text.contains("  initial:     publish (primary disabled, secondary hidden)"));
        assert!(text.contains("  [2] status draft"));
        assert!(text.contains("        notify  action -> save"));
    }
}
