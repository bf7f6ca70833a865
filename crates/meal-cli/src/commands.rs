use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use meal_cli::replay::{CommitRecord, ScriptStep, parse_script, replay};
use meal_cli::request::{FilterRequest, apply_request};
use meal_cli::rows::ViewRow;
use meal_filter::{FilterConfig, FilterSession, NumericFieldHint};
use meal_model::{load_json_records, load_meals, load_weekly_menu};

use crate::cli::{FieldsArgs, FilterArgs, ReplayArgs, TableArgs, TableKindArg};
use crate::types::FilterReport;

pub fn run_filter(args: &FilterArgs) -> Result<FilterReport> {
    let span = info_span!("filter", input = %args.table.input.display());
    let _guard = span.enter();
    let config = load_config(&args.table)?;
    let request = FilterRequest {
        search: args.search.clone(),
        ranges: args.ranges.clone(),
    };
    let path = args.table.input.as_path();
    match args.table.kind {
        TableKindArg::Meals => filter_table(load_meals(path)?, &config, &request),
        TableKindArg::Menu => filter_table(load_weekly_menu(path)?.meals, &config, &request),
        TableKindArg::Json => filter_table(load_json_records(path)?, &config, &request),
    }
}

pub fn run_fields(args: &FieldsArgs) -> Result<Vec<NumericFieldHint>> {
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => FilterConfig::default(),
    };
    Ok(config.fields)
}

pub fn run_replay(args: &ReplayArgs) -> Result<Vec<CommitRecord>> {
    let span = info_span!("replay", script = %args.script.display());
    let _guard = span.enter();
    let config = load_config(&args.table)?;
    let content = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script {}", args.script.display()))?;
    let steps = parse_script(&content)
        .with_context(|| format!("parse script {}", args.script.display()))?;
    info!(events = steps.len(), "replaying script");
    let path = args.table.input.as_path();
    let commits = match args.table.kind {
        TableKindArg::Meals => replay_table(load_meals(path)?, &config, &steps),
        TableKindArg::Menu => replay_table(load_weekly_menu(path)?.meals, &config, &steps),
        TableKindArg::Json => replay_table(load_json_records(path)?, &config, &steps),
    };
    Ok(commits)
}

fn filter_table<R: ViewRow>(
    table: Vec<R>,
    config: &FilterConfig,
    request: &FilterRequest,
) -> Result<FilterReport> {
    info!(records = table.len(), "table loaded");
    let mut session = FilterSession::new(table, config);
    apply_request(&mut session, request, config);

    let engine = session.engine();
    let visible = engine.derived_records();
    let headers = R::headers(&visible);
    let rows = visible.iter().map(|record| record.cells(&headers)).collect();
    let records = visible
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .context("serialize filtered records")?;
    Ok(FilterReport {
        total: engine.total_count(),
        shown: engine.filtered_count(),
        active_filters: engine.active_count(),
        search_text: engine.search_text().to_string(),
        ranges: engine.ranges().clone(),
        headers,
        rows,
        records,
    })
}

fn replay_table<R: ViewRow>(
    table: Vec<R>,
    config: &FilterConfig,
    steps: &[ScriptStep],
) -> Vec<CommitRecord> {
    info!(records = table.len(), "table loaded");
    let mut session = FilterSession::new(table, config);
    replay(&mut session, steps)
}

fn load_config(args: &TableArgs) -> Result<FilterConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => FilterConfig::default(),
    };
    if !args.search_fields.is_empty() {
        config.search_fields = args.search_fields.clone();
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<FilterConfig> {
    FilterConfig::load_from(path).with_context(|| format!("load config {}", path.display()))
}
