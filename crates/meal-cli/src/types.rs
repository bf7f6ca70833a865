use std::collections::BTreeMap;

use meal_filter::RangeSpec;
use serde::Serialize;

/// Outcome of a one-shot filter run.
#[derive(Debug, Serialize)]
pub struct FilterReport {
    pub total: usize,
    pub shown: usize,
    pub active_filters: usize,
    pub search_text: String,
    pub ranges: BTreeMap<String, RangeSpec>,
    #[serde(skip)]
    pub headers: Vec<String>,
    #[serde(skip)]
    pub rows: Vec<Vec<String>>,
    pub records: Vec<serde_json::Value>,
}
