//! Replaying recorded UI events against a filter session.
//!
//! A script is JSON lines, one timed event per line:
//!
//! ```text
//! {"at_ms": 0,   "event": "type", "text": "chi"}
//! {"at_ms": 120, "event": "type", "text": "chicken"}
//! {"at_ms": 900, "event": "stage_min", "field": "calories", "value": "400"}
//! {"at_ms": 950, "event": "apply"}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Time is synthetic:
//! debounced search commits fire at their deadline, between events.

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use meal_filter::{FilterSession, Record};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// The search box now shows `text`.
    Type { text: String },
    StageMin { field: String, value: String },
    StageMax { field: String, value: String },
    Apply,
    /// The range panel's Clear button.
    Clear,
    /// The search box's clear button.
    ClearSearch,
    /// Advance time without input.
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: ReplayEvent,
}

pub fn parse_script(content: &str) -> Result<Vec<ScriptStep>> {
    let mut steps: Vec<ScriptStep> = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step: ScriptStep = serde_json::from_str(line)
            .with_context(|| format!("line {}: invalid event", number + 1))?;
        if let Some(previous) = steps.last()
            && step.at_ms < previous.at_ms
        {
            bail!(
                "line {}: at_ms {} is earlier than the previous event ({})",
                number + 1,
                step.at_ms,
                previous.at_ms
            );
        }
        steps.push(step);
    }
    Ok(steps)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommitKind {
    Search { text: String },
    Ranges,
    Clear,
}

/// A change to the committed filters observed during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub at_ms: u64,
    #[serde(flatten)]
    pub kind: CommitKind,
    pub shown: usize,
    pub total: usize,
    pub active: usize,
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6}ms ", self.at_ms)?;
        match &self.kind {
            CommitKind::Search { text } => write!(f, "search {text:?}")?,
            CommitKind::Ranges => write!(f, "ranges")?,
            CommitKind::Clear => write!(f, "clear")?,
        }
        write!(f, " -> {}/{} ({} active)", self.shown, self.total, self.active)
    }
}

/// Feed `steps` through `session`, returning every commit in order.
pub fn replay<R: Record>(
    session: &mut FilterSession<R>,
    steps: &[ScriptStep],
) -> Vec<CommitRecord> {
    let base = Instant::now();
    let mut commits = Vec::new();
    for step in steps {
        let now = base + Duration::from_millis(step.at_ms);
        fire_due_search(session, base, now, &mut commits);
        debug!(at_ms = step.at_ms, event = ?step.event, "replaying event");
        match &step.event {
            ReplayEvent::Type { text } => session.type_search(text.as_str(), now),
            ReplayEvent::StageMin { field, value } => session.stage_min(field, value),
            ReplayEvent::StageMax { field, value } => session.stage_max(field, value),
            ReplayEvent::Apply => {
                if session.apply_ranges() {
                    commits.push(record(session, step.at_ms, CommitKind::Ranges));
                }
            }
            ReplayEvent::Clear => {
                session.clear();
                commits.push(record(session, step.at_ms, CommitKind::Clear));
            }
            ReplayEvent::ClearSearch => {
                session.clear_search();
                let kind = CommitKind::Search {
                    text: String::new(),
                };
                commits.push(record(session, step.at_ms, kind));
            }
            ReplayEvent::Tick => {}
        }
    }
    if let Some(deadline) = session.search().deadline() {
        fire_due_search(session, base, deadline, &mut commits);
    }
    commits
}

/// Fire a pending search commit whose deadline falls at or before `now`.
fn fire_due_search<R: Record>(
    session: &mut FilterSession<R>,
    base: Instant,
    now: Instant,
    commits: &mut Vec<CommitRecord>,
) {
    let Some(deadline) = session.search().deadline() else {
        return;
    };
    if deadline > now || !session.tick(deadline) {
        return;
    }
    let at_ms = deadline.duration_since(base).as_millis() as u64;
    let kind = CommitKind::Search {
        text: session.engine().search_text().to_string(),
    };
    commits.push(record(session, at_ms, kind));
}

fn record<R: Record>(session: &FilterSession<R>, at_ms: u64, kind: CommitKind) -> CommitRecord {
    let (shown, total) = session.counts();
    CommitRecord {
        at_ms,
        kind,
        shown,
        total,
        active: session.active_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_events_and_skips_comments() {
        let steps = parse_script(
            "# warm up\n\
             {\"at_ms\": 0, \"event\": \"type\", \"text\": \"ch\"}\n\
             \n\
             {\"at_ms\": 10, \"event\": \"stage_max\", \"field\": \"fat\", \"value\": \"20\"}\n\
             {\"at_ms\": 10, \"event\": \"apply\"}\n",
        )
        .unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps[0].event,
            ReplayEvent::Type {
                text: "ch".to_string()
            }
        );
        assert_eq!(steps[2].event, ReplayEvent::Apply);
    }

    #[test]
    fn rejects_time_going_backwards() {
        let err = parse_script(
            "{\"at_ms\": 50, \"event\": \"tick\"}\n{\"at_ms\": 10, \"event\": \"tick\"}\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn unknown_event_reports_line() {
        let err = parse_script("{\"at_ms\": 0, \"event\": \"explode\"}").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
