//! Integration tests for script replay and one-shot requests.

use meal_cli::replay::{CommitKind, CommitRecord, parse_script, replay};
use meal_cli::request::{FilterRequest, apply_request, parse_range_arg};
use meal_filter::{FilterConfig, FilterSession};
use meal_model::Meal;

fn meals() -> Vec<Meal> {
    vec![
        Meal::new(1, "Lemon Chicken").with_nutrition(300, 35, 20, 9),
        Meal::new(2, "Beef Bulgogi").with_nutrition(500, 15, 60, 18),
        Meal::new(3, "Falafel Wrap").with_nutrition(700, 22, 80, 25),
        Meal::new(4, "Chicken Alfredo").with_nutrition(900, 40, 95, 38),
        Meal::new(5, "Pork Ramen").with_nutrition(1100, 42, 120, 45),
    ]
}

fn session() -> FilterSession<Meal> {
    FilterSession::new(meals(), &FilterConfig::default())
}

fn commit(at_ms: u64, kind: CommitKind, shown: usize, active: usize) -> CommitRecord {
    CommitRecord {
        at_ms,
        kind,
        shown,
        total: 5,
        active,
    }
}

fn search(text: &str) -> CommitKind {
    CommitKind::Search {
        text: text.to_string(),
    }
}

const SCRIPT: &str = r#"
# typing burst, settles at 200 + 300
{"at_ms": 0, "event": "type", "text": "c"}
{"at_ms": 100, "event": "type", "text": "ch"}
{"at_ms": 200, "event": "type", "text": "chicken"}
{"at_ms": 900, "event": "stage_min", "field": "calories", "value": "400"}
{"at_ms": 950, "event": "stage_max", "field": "calories", "value": "1000"}
{"at_ms": 1000, "event": "apply"}
{"at_ms": 1100, "event": "clear_search"}
{"at_ms": 1200, "event": "clear"}
"#;

#[test]
fn replay_reports_each_commit() {
    let steps = parse_script(SCRIPT).unwrap();
    let mut session = session();

    let commits = replay(&mut session, &steps);

    assert_eq!(
        commits,
        vec![
            commit(500, search("chicken"), 2, 1),
            commit(1000, CommitKind::Ranges, 1, 2),
            commit(1100, search(""), 3, 1),
            commit(1200, CommitKind::Clear, 5, 0),
        ]
    );
    assert_eq!(
        commits[0].to_string(),
        "   500ms search \"chicken\" -> 2/5 (1 active)"
    );
}

#[test]
fn trailing_input_settles_after_last_event() {
    let steps = parse_script(
        r#"{"at_ms": 0, "event": "type", "text": "pork"}
{"at_ms": 100, "event": "type", "text": "beef"}"#,
    )
    .unwrap();
    let mut session = session();

    let commits = replay(&mut session, &steps);

    assert_eq!(commits, vec![commit(400, search("beef"), 1, 1)]);
}

#[test]
fn clear_before_deadline_drops_pending_search() {
    let steps = parse_script(
        r#"{"at_ms": 0, "event": "type", "text": "pork"}
{"at_ms": 100, "event": "clear"}
{"at_ms": 1000, "event": "tick"}"#,
    )
    .unwrap();
    let mut session = session();

    let commits = replay(&mut session, &steps);

    assert_eq!(commits, vec![commit(100, CommitKind::Clear, 5, 0)]);
    assert_eq!(session.engine().search_text(), "");
}

#[test]
fn request_applies_search_and_ranges_together() {
    let mut session = session();
    let request = FilterRequest {
        search: Some("CHICKEN".to_string()),
        ranges: vec![parse_range_arg("protein=36..").unwrap()],
    };

    apply_request(&mut session, &request, &FilterConfig::default());

    let ids: Vec<u64> = session.derived_records().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![4]);
    assert_eq!(session.active_count(), 2);
}

#[test]
fn request_tolerates_bounds_outside_hints() {
    let mut session = session();
    let request = FilterRequest {
        search: None,
        ranges: vec![parse_range_arg("calories=..5000").unwrap()],
    };

    apply_request(&mut session, &request, &FilterConfig::default());

    assert_eq!(session.counts(), (5, 5));
    assert_eq!(session.active_count(), 1);
}
