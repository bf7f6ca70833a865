use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use meal_cli::replay::{CommitKind, CommitRecord};
use meal_filter::NumericFieldHint;

use crate::cli::ViewFormatArg;
use crate::types::FilterReport;

pub fn print_report(report: &FilterReport, format: ViewFormatArg) -> Result<()> {
    match format {
        ViewFormatArg::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize report")?;
            println!("{json}");
        }
        ViewFormatArg::Table => {
            if !report.rows.is_empty() {
                let mut table = Table::new();
                table.set_header(report.headers.iter().map(|h| header_cell(h)));
                apply_table_style(&mut table);
                for row in &report.rows {
                    table.add_row(row.iter().map(|value| value_cell(value)));
                }
                println!("{table}");
            }
            println!("{}", summary_line(report));
        }
    }
    Ok(())
}

pub fn summary_line(report: &FilterReport) -> String {
    let filters = match report.active_filters {
        0 => "no filters".to_string(),
        1 => "1 filter active".to_string(),
        count => format!("{count} filters active"),
    };
    format!("Showing {} of {} records ({filters})", report.shown, report.total)
}

pub fn print_fields(fields: &[NumericFieldHint]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Step"),
    ]);
    apply_table_style(&mut table);
    for hint in fields {
        table.add_row(vec![
            Cell::new(&hint.key).add_attribute(Attribute::Bold),
            Cell::new(hint.display_label()),
            Cell::new(hint.min).set_alignment(CellAlignment::Right),
            Cell::new(hint.max).set_alignment(CellAlignment::Right),
            Cell::new(hint.step_or_default()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

pub fn print_replay(commits: &[CommitRecord]) {
    if commits.is_empty() {
        println!("No commits.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("At (ms)"),
        header_cell("Commit"),
        header_cell("Shown"),
        header_cell("Active"),
    ]);
    apply_table_style(&mut table);
    for commit in commits {
        let label = match &commit.kind {
            CommitKind::Search { text } if text.is_empty() => Cell::new("search cleared"),
            CommitKind::Search { text } => Cell::new(format!("search {text:?}")),
            CommitKind::Ranges => Cell::new("ranges applied").fg(Color::Cyan),
            CommitKind::Clear => Cell::new("cleared").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(commit.at_ms).set_alignment(CellAlignment::Right),
            label,
            Cell::new(format!("{}/{}", commit.shown, commit.total))
                .set_alignment(CellAlignment::Right),
            Cell::new(commit.active).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &str) -> Cell {
    if value == "-" {
        Cell::new(value).add_attribute(Attribute::Dim)
    } else {
        Cell::new(value)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(shown: usize, active_filters: usize) -> FilterReport {
        FilterReport {
            total: 5,
            shown,
            active_filters,
            search_text: String::new(),
            ranges: Default::default(),
            headers: Vec::new(),
            rows: Vec::new(),
            records: Vec::new(),
        }
    }

    #[test]
    fn summary_line_pluralizes() {
        insta::assert_snapshot!(summary_line(&report(5, 0)), @"Showing 5 of 5 records (no filters)");
        insta::assert_snapshot!(summary_line(&report(3, 1)), @"Showing 3 of 5 records (1 filter active)");
        insta::assert_snapshot!(summary_line(&report(1, 2)), @"Showing 1 of 5 records (2 filters active)");
    }
}
