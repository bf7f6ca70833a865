//! Turning filtered records into printable rows.

use meal_filter::Record;
use meal_model::{Meal, WeeklyMenuMeal};
use serde::Serialize;
use serde_json::Value;

/// A record the CLI knows how to print.
pub trait ViewRow: Record + Serialize {
    /// Column headers for a set of rows.
    fn headers(rows: &[&Self]) -> Vec<String>;

    fn cells(&self, headers: &[String]) -> Vec<String>;
}

const MEAL_HEADERS: [&str; 8] = [
    "ID", "Name", "Category", "Calories", "Protein", "Carbs", "Fat", "Price",
];

fn meal_cells(meal: &Meal) -> Vec<String> {
    vec![
        meal.id.to_string(),
        meal.name.clone(),
        meal.category.clone().unwrap_or_else(|| "-".to_string()),
        optional(meal.calories),
        optional(meal.protein),
        optional(meal.carbs),
        optional(meal.fat),
        meal.display_price(),
    ]
}

fn optional(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

impl ViewRow for Meal {
    fn headers(_rows: &[&Self]) -> Vec<String> {
        MEAL_HEADERS.iter().map(ToString::to_string).collect()
    }

    fn cells(&self, _headers: &[String]) -> Vec<String> {
        meal_cells(self)
    }
}

impl ViewRow for WeeklyMenuMeal {
    fn headers(_rows: &[&Self]) -> Vec<String> {
        MEAL_HEADERS
            .iter()
            .map(ToString::to_string)
            .chain(["Stock".to_string()])
            .collect()
    }

    fn cells(&self, _headers: &[String]) -> Vec<String> {
        let mut cells = meal_cells(&self.meal);
        cells.push(format!("{}/{}", self.available_stock, self.initial_stock));
        cells
    }
}

impl ViewRow for Value {
    /// Union of keys across all rows. Keys within an object come out
    /// sorted, and keys first seen in later rows are appended after them.
    fn headers(rows: &[&Self]) -> Vec<String> {
        let mut headers: Vec<String> = Vec::new();
        for row in rows {
            let Some(object) = row.as_object() else {
                continue;
            };
            for key in object.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
        headers
    }

    fn cells(&self, headers: &[String]) -> Vec<String> {
        headers
            .iter()
            .map(|header| match self.get(header) {
                None | Some(Value::Null) => "-".to_string(),
                Some(Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
            })
            .collect()
    }
}
