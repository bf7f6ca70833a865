//! Debounced search input.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::engine::FilterEngine;
use crate::record::Record;

/// Quiet interval before typed search text is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Search box state with a single pending commit.
///
/// Each keystroke reschedules the commit, cancelling the previous one, so a
/// burst of input commits once with its final value. Time is passed in by the
/// caller; whoever drives the event loop calls [`SearchDebouncer::poll`].
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    text: String,
    quiet: Duration,
    pending: Option<Instant>,
    synced_revision: u64,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            text: String::new(),
            quiet,
            pending: None,
            synced_revision: 0,
        }
    }

    /// Debouncer showing the engine's committed search text.
    pub fn from_engine<R>(engine: &FilterEngine<R>, quiet: Duration) -> Self {
        Self {
            text: engine.search_text().to_string(),
            quiet,
            pending: None,
            synced_revision: engine.search_revision(),
        }
    }

    /// Text currently shown in the input.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending commit fires, if one is scheduled.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Record a keystroke and restart the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        if self.pending.is_some() {
            trace!("search commit superseded");
        }
        self.pending = Some(now + self.quiet);
    }

    /// Commit the typed text if the quiet period has elapsed.
    ///
    /// Returns true when a commit happened. A pending commit is cancelled,
    /// not fired, if the engine's search text changed in the meantime.
    pub fn poll<R: Record>(&mut self, now: Instant, engine: &mut FilterEngine<R>) -> bool {
        if self.sync(engine) {
            return false;
        }
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.commit(engine);
                true
            }
            _ => false,
        }
    }

    /// Commit a pending value right away.
    pub fn flush<R: Record>(&mut self, engine: &mut FilterEngine<R>) -> bool {
        if self.sync(engine) || self.pending.is_none() {
            return false;
        }
        self.commit(engine);
        true
    }

    /// The clear button: empties the input and commits immediately.
    pub fn clear<R: Record>(&mut self, engine: &mut FilterEngine<R>) {
        self.text.clear();
        self.commit(engine);
    }

    /// Adopt the committed search text if it changed outside this input.
    /// Returns true when the local text was overwritten.
    pub fn sync<R>(&mut self, engine: &FilterEngine<R>) -> bool {
        if engine.search_revision() == self.synced_revision {
            return false;
        }
        self.reset(engine);
        true
    }

    /// Show the committed text and cancel any pending commit.
    pub fn reset<R>(&mut self, engine: &FilterEngine<R>) {
        self.text = engine.search_text().to_string();
        self.pending = None;
        self.synced_revision = engine.search_revision();
    }

    fn commit<R: Record>(&mut self, engine: &mut FilterEngine<R>) {
        self.pending = None;
        trace!(text = %self.text, "committing search text");
        engine.set_search_text(self.text.as_str());
        self.synced_revision = engine.search_revision();
    }
}
