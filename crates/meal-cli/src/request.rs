//! One-shot filter requests built from command-line flags.

use std::time::Instant;

use meal_filter::{FilterConfig, FilterSession, RangeSpec, Record, parse_bound};
use tracing::{info, warn};

/// A `--range FIELD=MIN..MAX` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeArg {
    pub field: String,
    pub range: RangeSpec,
}

/// Parse `FIELD=MIN..MAX`; either bound may be left empty (`fat=..30`).
///
/// Unlike the interactive panel, a bound that is present but not a number is
/// rejected here, since a typo on the command line should not silently widen
/// the filter.
pub fn parse_range_arg(raw: &str) -> Result<RangeArg, String> {
    let (field, bounds) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=MIN..MAX, got `{raw}`"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    let (min, max) = bounds
        .split_once("..")
        .ok_or_else(|| format!("expected MIN..MAX after `{field}=`, got `{bounds}`"))?;
    let range = RangeSpec::new(parse_strict(min)?, parse_strict(max)?);
    if !range.is_active() {
        return Err(format!("range for `{field}` has no bounds"));
    }
    if let (Some(min), Some(max)) = (range.min, range.max)
        && min > max
    {
        return Err(format!("range for `{field}` has min {min} above max {max}"));
    }
    Ok(RangeArg {
        field: field.to_string(),
        range,
    })
}

fn parse_strict(raw: &str) -> Result<Option<f64>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_bound(raw)
        .map(Some)
        .ok_or_else(|| format!("`{}` is not a number", raw.trim()))
}

/// Filters requested on the command line.
#[derive(Debug, Clone, Default)]
pub struct FilterRequest {
    pub search: Option<String>,
    pub ranges: Vec<RangeArg>,
}

/// Drive a session the way the screen would: the search text goes through
/// the search box and the ranges through the panel, applied in one batch.
pub fn apply_request<R: Record>(
    session: &mut FilterSession<R>,
    request: &FilterRequest,
    config: &FilterConfig,
) {
    if let Some(text) = &request.search {
        session.type_search(text.as_str(), Instant::now());
        session.flush_search();
    }
    for arg in &request.ranges {
        warn_outside_hint(arg, config);
        session.stage_range(&arg.field, arg.range);
    }
    if !request.ranges.is_empty() && !session.apply_ranges() {
        warn!("staged ranges were superseded before apply");
    }
    let (shown, total) = session.counts();
    info!(shown, total, active = session.active_count(), "filters applied");
}

fn warn_outside_hint(arg: &RangeArg, config: &FilterConfig) {
    let Some(hint) = config.field(&arg.field) else {
        return;
    };
    for bound in [arg.range.min, arg.range.max].into_iter().flatten() {
        if !hint.is_within(bound) {
            warn!(
                field = %arg.field,
                bound,
                min = hint.min,
                max = hint.max,
                "bound outside the suggested range"
            );
        }
    }
}
