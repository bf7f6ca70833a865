//! A filter session: the engine plus the two staged inputs that feed it.

use std::time::{Duration, Instant};

use crate::config::FilterConfig;
use crate::debounce::SearchDebouncer;
use crate::engine::FilterEngine;
use crate::filter::RangeSpec;
use crate::record::Record;
use crate::staging::RangeStaging;

/// Everything one filterable screen holds: committed state, the search box
/// and the range panel, kept consistent with each other.
#[derive(Debug, Clone)]
pub struct FilterSession<R> {
    engine: FilterEngine<R>,
    search: SearchDebouncer,
    ranges: RangeStaging,
}

impl<R: Record> FilterSession<R> {
    pub fn new(table: Vec<R>, config: &FilterConfig) -> Self {
        Self::with_fields(table, config.search_fields.clone(), config.debounce())
    }

    pub fn with_fields(table: Vec<R>, search_fields: Vec<String>, quiet: Duration) -> Self {
        let engine = FilterEngine::new(table, search_fields);
        let search = SearchDebouncer::from_engine(&engine, quiet);
        let ranges = RangeStaging::from_engine(&engine);
        Self {
            engine,
            search,
            ranges,
        }
    }

    pub fn engine(&self) -> &FilterEngine<R> {
        &self.engine
    }

    pub fn search(&self) -> &SearchDebouncer {
        &self.search
    }

    pub fn ranges(&self) -> &RangeStaging {
        &self.ranges
    }

    /// A keystroke in the search box.
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Advance time; commits the search text once it has settled.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.search.poll(now, &mut self.engine)
    }

    pub fn flush_search(&mut self) -> bool {
        self.search.flush(&mut self.engine)
    }

    pub fn clear_search(&mut self) {
        self.search.clear(&mut self.engine);
    }

    pub fn stage_min(&mut self, field: &str, raw: &str) {
        self.ranges.stage_min(field, raw);
    }

    pub fn stage_max(&mut self, field: &str, raw: &str) {
        self.ranges.stage_max(field, raw);
    }

    pub fn stage_range(&mut self, field: &str, range: RangeSpec) {
        self.ranges.stage_range(field, range);
    }

    /// The Apply button.
    pub fn apply_ranges(&mut self) -> bool {
        self.ranges.apply(&mut self.engine)
    }

    /// The range panel's Clear button. Like [`FilterSession::clear_all`],
    /// it resets the search text too.
    pub fn clear(&mut self) {
        self.ranges.clear(&mut self.engine);
        self.search.reset(&self.engine);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.engine.set_search_text(text);
        self.search.sync(&self.engine);
    }

    pub fn set_numeric_range(&mut self, field: &str, min: Option<f64>, max: Option<f64>) {
        self.engine.set_numeric_range(field, min, max);
        self.ranges.sync(&self.engine);
    }

    /// Reset committed filters; pending search input and unapplied range
    /// edits are discarded.
    pub fn clear_all(&mut self) {
        self.engine.clear_all();
        self.search.reset(&self.engine);
        self.ranges.reset(&self.engine);
    }

    pub fn set_table(&mut self, table: Vec<R>) {
        self.engine.set_table(table);
    }

    pub fn derived_records(&self) -> Vec<&R> {
        self.engine.derived_records()
    }

    pub fn active_count(&self) -> usize {
        self.engine.active_count()
    }

    /// `shown / total` for the results header.
    pub fn counts(&self) -> (usize, usize) {
        (self.engine.filtered_count(), self.engine.total_count())
    }
}
