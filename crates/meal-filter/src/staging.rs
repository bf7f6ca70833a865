//! Staged range input.
//!
//! Edits to min/max inputs land in a staging map and only reach the engine
//! when applied, all fields in one recomputation. Clearing bypasses staging
//! and commits immediately.

use std::collections::BTreeMap;

use tracing::trace;

use crate::engine::FilterEngine;
use crate::filter::RangeSpec;
use crate::record::Record;

/// Where the range panel is in its edit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelPhase {
    /// Staging mirrors the committed ranges.
    #[default]
    Idle,
    /// Staging holds edits not yet applied.
    Editing,
}

/// Coerce raw input text to a bound.
///
/// Empty, non-numeric and non-finite input is absent rather than zero, so a
/// blank field means unbounded.
pub fn parse_bound(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// In-progress range edits for one engine.
#[derive(Debug, Clone, Default)]
pub struct RangeStaging {
    staged: BTreeMap<String, RangeSpec>,
    phase: PanelPhase,
    synced_revision: u64,
}

impl RangeStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Staging that starts from the engine's committed ranges.
    pub fn from_engine<R>(engine: &FilterEngine<R>) -> Self {
        Self {
            staged: engine.ranges().clone(),
            phase: PanelPhase::Idle,
            synced_revision: engine.ranges_revision(),
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn staged(&self) -> &BTreeMap<String, RangeSpec> {
        &self.staged
    }

    pub fn staged_range(&self, field: &str) -> RangeSpec {
        self.staged.get(field).copied().unwrap_or_default()
    }

    pub fn is_editing(&self) -> bool {
        self.phase == PanelPhase::Editing
    }

    pub fn stage_min(&mut self, field: &str, raw: &str) {
        let range = RangeSpec {
            min: parse_bound(raw),
            ..self.staged_range(field)
        };
        self.stage_range(field, range);
    }

    pub fn stage_max(&mut self, field: &str, raw: &str) {
        let range = RangeSpec {
            max: parse_bound(raw),
            ..self.staged_range(field)
        };
        self.stage_range(field, range);
    }

    pub fn stage_range(&mut self, field: &str, range: RangeSpec) {
        let range = RangeSpec::new(range.min, range.max);
        if range.is_active() {
            self.staged.insert(field.to_string(), range);
        } else {
            self.staged.remove(field);
        }
        self.phase = PanelPhase::Editing;
    }

    /// Commit every staged range in one recomputation.
    ///
    /// Returns false without committing when the engine's ranges changed
    /// since the last sync; the unapplied edits are dropped in favour of the
    /// committed state.
    pub fn apply<R: Record>(&mut self, engine: &mut FilterEngine<R>) -> bool {
        if self.sync(engine) {
            return false;
        }
        trace!(fields = self.staged.len(), "applying staged ranges");
        engine.replace_ranges(self.staged.clone());
        self.reset(engine);
        true
    }

    /// Drop staged edits and commit an empty filter state.
    pub fn clear<R: Record>(&mut self, engine: &mut FilterEngine<R>) {
        trace!("clearing range filters");
        engine.clear_all();
        self.reset(engine);
    }

    /// Adopt the committed ranges if they changed outside this panel.
    /// Returns true when staging was overwritten.
    pub fn sync<R>(&mut self, engine: &FilterEngine<R>) -> bool {
        if engine.ranges_revision() == self.synced_revision {
            return false;
        }
        if self.is_editing() {
            trace!("discarding unapplied range edits after external change");
        }
        self.reset(engine);
        true
    }

    /// Mirror the committed ranges, discarding any staged edits.
    pub fn reset<R>(&mut self, engine: &FilterEngine<R>) {
        self.staged = engine.ranges().clone();
        self.synced_revision = engine.ranges_revision();
        self.phase = PanelPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn engine() -> FilterEngine<Value> {
        let table = vec![
            json!({"name": "a", "calories": 300, "protein": 30}),
            json!({"name": "b", "calories": 500, "protein": 15}),
            json!({"name": "c", "calories": 700, "protein": 40}),
        ];
        FilterEngine::new(table, vec!["name".into()])
    }

    #[test]
    fn parse_bound_coerces_bad_input_to_absent() {
        assert_eq!(parse_bound(""), None);
        assert_eq!(parse_bound("   "), None);
        assert_eq!(parse_bound("abc"), None);
        assert_eq!(parse_bound("NaN"), None);
        assert_eq!(parse_bound("inf"), None);
        assert_eq!(parse_bound(" 12.5 "), Some(12.5));
        assert_eq!(parse_bound("0"), Some(0.0));
    }

    #[test]
    fn staged_edits_do_not_touch_engine() {
        let mut engine = engine();
        let mut staging = RangeStaging::from_engine(&engine);
        staging.stage_min("calories", "400");
        staging.stage_max("calories", "800");

        assert!(staging.is_editing());
        assert_eq!(staging.staged_range("calories"), RangeSpec::between(400.0, 800.0));
        assert!(engine.ranges().is_empty());
        assert_eq!(engine.filtered_count(), 3);

        assert!(staging.apply(&mut engine));
        assert_eq!(engine.filtered_count(), 2);
        assert_eq!(staging.phase(), PanelPhase::Idle);
    }

    #[test]
    fn apply_commits_all_fields_in_one_recompute() {
        let mut engine = engine();
        let mut staging = RangeStaging::from_engine(&engine);
        staging.stage_max("calories", "600");
        staging.stage_min("protein", "20");

        let before = engine.recompute_count();
        staging.apply(&mut engine);
        assert_eq!(engine.recompute_count(), before + 1);
        assert_eq!(engine.ranges().len(), 2);
        assert_eq!(engine.filtered_count(), 1);
    }

    #[test]
    fn blanking_both_bounds_unstages_field() {
        let mut engine = engine();
        let mut staging = RangeStaging::from_engine(&engine);
        staging.stage_min("calories", "400");
        staging.apply(&mut engine);

        staging.stage_min("calories", "");
        assert!(staging.staged().is_empty());
        staging.apply(&mut engine);
        assert!(engine.ranges().is_empty());
    }

    #[test]
    fn invalid_text_means_unbounded() {
        let mut engine = engine();
        let mut staging = RangeStaging::from_engine(&engine);
        staging.stage_min("calories", "lots");
        staging.stage_max("calories", "600");
        staging.apply(&mut engine);

        assert_eq!(engine.ranges()["calories"], RangeSpec::at_most(600.0));
        assert_eq!(engine.filtered_count(), 2);
    }

    #[test]
    fn clear_commits_immediately() {
        let mut engine = engine();
        engine.set_search_text("a");
        let mut staging = RangeStaging::from_engine(&engine);
        staging.stage_min("calories", "400");
        staging.apply(&mut engine);
        staging.stage_max("protein", "10");

        staging.clear(&mut engine);
        assert!(staging.staged().is_empty());
        assert_eq!(staging.phase(), PanelPhase::Idle);
        assert_eq!(engine.active_count(), 0);
        assert_eq!(engine.filtered_count(), 3);
    }

    #[test]
    fn external_reset_overrides_unapplied_edits() {
        let mut engine = engine();
        let mut staging = RangeStaging::from_engine(&engine);
        staging.stage_min("calories", "400");
        staging.apply(&mut engine);

        staging.stage_max("protein", "35");
        engine.clear_all();

        assert!(staging.sync(&engine));
        assert!(staging.staged().is_empty());
        assert!(!staging.is_editing());
        assert!(!staging.sync(&engine));
    }

    #[test]
    fn clear_all_on_empty_state_drops_edits() {
        let mut engine = engine();
        let mut staging = RangeStaging::from_engine(&engine);
        staging.stage_min("calories", "400");

        engine.clear_all();
        assert!(!staging.apply(&mut engine));
        assert!(staging.staged().is_empty());
        assert!(engine.ranges().is_empty());
        assert_eq!(engine.filtered_count(), 3);
    }

    #[test]
    fn stale_apply_is_refused() {
        let mut engine = engine();
        let mut staging = RangeStaging::from_engine(&engine);
        staging.stage_min("calories", "400");
        engine.set_numeric_range("protein", Some(20.0), None);

        assert!(!staging.apply(&mut engine));
        assert_eq!(staging.staged_range("protein"), RangeSpec::at_least(20.0));
        assert_eq!(staging.staged_range("calories"), RangeSpec::default());
        assert_eq!(engine.ranges().len(), 1);
    }
}
