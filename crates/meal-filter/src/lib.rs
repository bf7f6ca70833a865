//! Live search and range filtering over in-memory record tables.
//!
//! - [`FilterEngine`] holds a table and the committed [`FilterState`] and
//!   recomputes the filtered view synchronously on every change.
//! - [`SearchDebouncer`] commits typed search text after a quiet period.
//! - [`RangeStaging`] buffers range edits until they are applied together.
//! - [`FilterSession`] bundles the three for one screen.

pub mod config;
pub mod debounce;
pub mod engine;
pub mod fields;
pub mod filter;
pub mod record;
pub mod session;
pub mod staging;

pub use config::{ConfigError, FilterConfig};
pub use debounce::{DEFAULT_DEBOUNCE, SearchDebouncer};
pub use engine::FilterEngine;
pub use fields::{MEAL_FILTER_FIELDS, NumericFieldHint, hint_for};
pub use filter::{FilterState, RangeSpec, filter_indices};
pub use record::Record;
pub use session::FilterSession;
pub use staging::{PanelPhase, RangeStaging, parse_bound};
