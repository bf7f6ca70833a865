//! The filter engine: a table, a committed [`FilterState`], and the derived
//! view recomputed from both on every change.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::filter::{FilterState, RangeSpec, filter_indices};
use crate::record::Record;

/// Live query over an in-memory table.
///
/// Every mutator recomputes the view before returning, so the view read right
/// after a call always reflects exactly the state that call produced.
#[derive(Debug, Clone)]
pub struct FilterEngine<R> {
    table: Vec<R>,
    search_fields: Vec<String>,
    state: FilterState,
    visible: Vec<usize>,
    search_revision: u64,
    ranges_revision: u64,
    recomputes: u64,
}

impl<R: Record> FilterEngine<R> {
    pub fn new(table: Vec<R>, search_fields: Vec<String>) -> Self {
        let mut engine = Self {
            table,
            search_fields,
            state: FilterState::new(),
            visible: Vec::new(),
            search_revision: 0,
            ranges_revision: 0,
            recomputes: 0,
        };
        engine.recompute();
        engine
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let changed = self.state.set_search_text(text);
        self.search_revision += 1;
        trace!(changed, "search text written");
        self.recompute();
    }

    /// Replace the range on `field` wholesale. Passing no bounds clears it.
    pub fn set_numeric_range(
        &mut self,
        field: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
    ) {
        let field = field.into();
        let changed = self.state.set_range(field.as_str(), RangeSpec::new(min, max));
        self.ranges_revision += 1;
        trace!(%field, changed, "range written");
        self.recompute();
    }

    /// Replace every range in a single recomputation.
    pub fn replace_ranges(&mut self, ranges: BTreeMap<String, RangeSpec>) {
        let changed = self.state.replace_ranges(ranges);
        self.ranges_revision += 1;
        trace!(changed, "ranges replaced");
        self.recompute();
    }

    /// Reset search text and ranges. Both revisions move even when the state
    /// was already empty, so staged inputs always drop their edits.
    pub fn clear_all(&mut self) {
        let (search, ranges) = self.state.clear();
        self.search_revision += 1;
        self.ranges_revision += 1;
        trace!(search, ranges, "filters cleared");
        self.recompute();
    }

    /// Swap in a freshly loaded table, keeping the committed filters.
    pub fn set_table(&mut self, table: Vec<R>) {
        self.table = table;
        self.recompute();
    }

    pub fn set_search_fields(&mut self, fields: Vec<String>) {
        self.search_fields = fields;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = filter_indices(&self.table, &self.search_fields, &self.state);
        self.recomputes += 1;
        debug!(
            total = self.table.len(),
            visible = self.visible.len(),
            active = self.state.active_count(),
            "recomputed filtered view"
        );
    }
}

impl<R> FilterEngine<R> {
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn search_text(&self) -> &str {
        self.state.search_text()
    }

    pub fn ranges(&self) -> &BTreeMap<String, RangeSpec> {
        self.state.ranges()
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn table(&self) -> &[R] {
        &self.table
    }

    /// Recounted from the committed state on every call.
    pub fn active_count(&self) -> usize {
        self.state.active_count()
    }

    pub fn derived_view(&self) -> impl Iterator<Item = &R> + '_ {
        self.visible.iter().map(|&index| &self.table[index])
    }

    pub fn derived_records(&self) -> Vec<&R> {
        self.derived_view().collect()
    }

    /// Positions of the visible records in the table.
    pub fn derived_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn total_count(&self) -> usize {
        self.table.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// Bumped on every write to the search text, including no-op writes.
    pub fn search_revision(&self) -> u64 {
        self.search_revision
    }

    /// Bumped on every write to the range map, including no-op writes.
    pub fn ranges_revision(&self) -> u64 {
        self.ranges_revision
    }

    pub fn revision(&self) -> u64 {
        self.search_revision + self.ranges_revision
    }

    /// How many times the view has been recomputed, construction included.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}
