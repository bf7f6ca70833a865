//! Property tests for the filtered view.

use std::collections::BTreeMap;

use meal_filter::{FilterEngine, FilterState, RangeSpec, filter_indices};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

const NUMERIC_FIELDS: [&str; 2] = ["calories", "protein"];

fn record() -> impl Strategy<Value = Value> {
    (
        "[a-cA-C ]{0,6}",
        proptest::option::of(0u32..1200),
        proptest::option::of(0u32..80),
    )
        .prop_map(|(name, calories, protein)| {
            let mut object = Map::new();
            object.insert("name".into(), json!(name));
            if let Some(calories) = calories {
                object.insert("calories".into(), json!(calories));
            }
            if let Some(protein) = protein {
                object.insert("protein".into(), json!(protein));
            }
            Value::Object(object)
        })
}

fn range() -> impl Strategy<Value = RangeSpec> {
    (
        proptest::option::of(0u32..1200),
        proptest::option::of(0u32..1200),
    )
        .prop_map(|(min, max)| RangeSpec::new(min.map(f64::from), max.map(f64::from)))
}

fn state() -> impl Strategy<Value = FilterState> {
    ("[a-cA-C]{0,2}", range(), range()).prop_map(|(text, calories, protein)| {
        let mut state = FilterState::new();
        state.set_search_text(text);
        state.set_range(NUMERIC_FIELDS[0], calories);
        state.set_range(NUMERIC_FIELDS[1], protein);
        state
    })
}

fn search_fields() -> Vec<String> {
    vec!["name".to_string()]
}

proptest! {
    #[test]
    fn view_is_ordered_subsequence(table in prop::collection::vec(record(), 0..40), state in state()) {
        let indices = filter_indices(&table, &search_fields(), &state);
        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(indices.iter().all(|&index| index < table.len()));
    }

    #[test]
    fn view_is_pure_function_of_state(table in prop::collection::vec(record(), 0..40), state in state()) {
        let first = filter_indices(&table, &search_fields(), &state);
        let second = filter_indices(&table, &search_fields(), &state.clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn records_without_field_pass_its_range(
        table in prop::collection::vec(record(), 0..40),
        calories in range(),
    ) {
        let mut state = FilterState::new();
        state.set_range("calories", calories);
        let indices = filter_indices(&table, &search_fields(), &state);
        for (index, record) in table.iter().enumerate() {
            if record.get("calories").is_none() {
                prop_assert!(indices.contains(&index));
            }
        }
    }

    #[test]
    fn active_count_matches_fresh_recount(
        table in prop::collection::vec(record(), 0..10),
        text in "[a-c]{0,2}",
        ranges in prop::collection::vec((0usize..2, range()), 0..6),
    ) {
        let mut engine = FilterEngine::new(table, search_fields());
        engine.set_search_text(text);
        for (field, range) in ranges {
            engine.set_numeric_range(NUMERIC_FIELDS[field], range.min, range.max);
            let expected = usize::from(!engine.search_text().is_empty())
                + engine.ranges().values().filter(|range| range.is_active()).count();
            prop_assert_eq!(engine.active_count(), expected);
        }
    }

    #[test]
    fn clear_all_restores_full_table(table in prop::collection::vec(record(), 0..40), state in state()) {
        let mut engine = FilterEngine::new(table, search_fields());
        engine.set_search_text(state.search_text());
        engine.replace_ranges(state.ranges().clone());
        engine.clear_all();
        prop_assert_eq!(engine.active_count(), 0);
        prop_assert_eq!(engine.derived_indices().to_vec(), (0..engine.total_count()).collect::<Vec<_>>());
    }

    #[test]
    fn batch_apply_equals_sequential_result(
        table in prop::collection::vec(record(), 0..40),
        calories in range(),
        protein in range(),
    ) {
        let mut batched = FilterEngine::new(table.clone(), search_fields());
        let before = batched.recompute_count();
        batched.replace_ranges(BTreeMap::from([
            ("calories".to_string(), calories),
            ("protein".to_string(), protein),
        ]));
        prop_assert_eq!(batched.recompute_count(), before + 1);

        let mut sequential = FilterEngine::new(table, search_fields());
        sequential.set_numeric_range("calories", calories.min, calories.max);
        sequential.set_numeric_range("protein", protein.min, protein.max);

        prop_assert_eq!(batched.derived_indices(), sequential.derived_indices());
        prop_assert_eq!(batched.state(), sequential.state());
    }
}
