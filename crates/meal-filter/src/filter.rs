//! Committed filter state and the pure evaluation over a table.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::record::Record;

/// Inclusive numeric bounds on one field. A missing bound is unbounded.
///
/// Non-finite bounds are dropped on deserialization and whenever a range is
/// stored in a [`FilterState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RangeBounds")]
pub struct RangeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Deserialize)]
struct RangeBounds {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

impl From<RangeBounds> for RangeSpec {
    fn from(bounds: RangeBounds) -> Self {
        Self::new(bounds.min, bounds.max)
    }
}

impl RangeSpec {
    /// Build a range, dropping non-finite bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: min.filter(|value| value.is_finite()),
            max: max.filter(|value| value.is_finite()),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    pub fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// A range only constrains anything once a bound is set.
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// Absent values pass: a range cannot exclude a record that has no
    /// value for the field.
    pub fn admits(&self, value: Option<f64>) -> bool {
        value.is_none_or(|value| self.contains(value))
    }
}

/// The committed predicate state driving a filtered view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    search_text: String,
    #[serde(default, deserialize_with = "active_ranges")]
    ranges: BTreeMap<String, RangeSpec>,
}

fn active_ranges<'de, D>(deserializer: D) -> Result<BTreeMap<String, RangeSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut ranges = BTreeMap::<String, RangeSpec>::deserialize(deserializer)?;
    ranges.retain(|_, range| range.is_active());
    Ok(ranges)
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Active ranges keyed by field. Inactive ranges are never stored.
    pub fn ranges(&self) -> &BTreeMap<String, RangeSpec> {
        &self.ranges
    }

    pub fn range(&self, field: &str) -> Option<&RangeSpec> {
        self.ranges.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.ranges.is_empty()
    }

    /// Number of predicates currently in force.
    pub fn active_count(&self) -> usize {
        usize::from(!self.search_text.is_empty())
            + self.ranges.values().filter(|range| range.is_active()).count()
    }

    /// Returns true when the search text changed.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.search_text == text {
            return false;
        }
        self.search_text = text;
        true
    }

    /// Replace the range for `field`; an inactive range removes it.
    /// Returns true when the stored range changed.
    pub fn set_range(&mut self, field: impl Into<String>, range: RangeSpec) -> bool {
        let field = field.into();
        let range = RangeSpec::new(range.min, range.max);
        if range.is_active() {
            self.ranges.insert(field, range) != Some(range)
        } else {
            self.ranges.remove(&field).is_some()
        }
    }

    /// Replace every range at once. Returns true when the map changed.
    pub fn replace_ranges(&mut self, ranges: BTreeMap<String, RangeSpec>) -> bool {
        let ranges: BTreeMap<_, _> = ranges
            .into_iter()
            .map(|(field, range)| (field, RangeSpec::new(range.min, range.max)))
            .filter(|(_, range)| range.is_active())
            .collect();
        if self.ranges == ranges {
            return false;
        }
        self.ranges = ranges;
        true
    }

    /// Reset to the empty state. Returns which parts changed as
    /// `(search, ranges)`.
    pub fn clear(&mut self) -> (bool, bool) {
        let search = !self.search_text.is_empty();
        let ranges = !self.ranges.is_empty();
        self.search_text.clear();
        self.ranges.clear();
        (search, ranges)
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R, search_fields: &[String]) -> bool {
        Matcher::new(self, search_fields).matches(record)
    }
}

/// A filter state prepared for evaluation over many records.
struct Matcher<'a> {
    needle: Option<String>,
    search_fields: &'a [String],
    ranges: &'a BTreeMap<String, RangeSpec>,
}

impl<'a> Matcher<'a> {
    fn new(state: &'a FilterState, search_fields: &'a [String]) -> Self {
        let needle = (!state.search_text.is_empty()).then(|| state.search_text.to_lowercase());
        Self {
            needle,
            search_fields,
            ranges: &state.ranges,
        }
    }

    fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.matches_search(record) && self.matches_ranges(record)
    }

    fn matches_search<R: Record + ?Sized>(&self, record: &R) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        self.search_fields.iter().any(|field| {
            record
                .text(field)
                .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
        })
    }

    fn matches_ranges<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.ranges
            .iter()
            .all(|(field, range)| range.admits(record.number(field)))
    }
}

/// Indices of the records in `table` that pass `state`, in table order.
pub fn filter_indices<R: Record>(
    table: &[R],
    search_fields: &[String],
    state: &FilterState,
) -> Vec<usize> {
    let matcher = Matcher::new(state, search_fields);
    table
        .iter()
        .enumerate()
        .filter(|(_, record)| matcher.matches(*record))
        .map(|(index, _)| index)
        .collect()
}
