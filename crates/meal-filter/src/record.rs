//! Field access for filterable records.

use std::borrow::Cow;

use meal_model::{Meal, WeeklyMenuMeal};
use serde_json::Value;

/// A row of a filterable table, addressed by field name.
///
/// `text` feeds the search predicate and `number` feeds range predicates.
/// Returning `None` means the field is absent on this record.
pub trait Record {
    fn text(&self, field: &str) -> Option<Cow<'_, str>>;

    fn number(&self, field: &str) -> Option<f64>;
}

impl<R: Record + ?Sized> Record for &R {
    fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        (**self).text(field)
    }

    fn number(&self, field: &str) -> Option<f64> {
        (**self).number(field)
    }
}

impl Record for Meal {
    fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "name" => Some(Cow::Borrowed(self.name.as_str())),
            "description" => Some(Cow::Borrowed(self.description.as_str())),
            "category" => self.category.as_deref().map(Cow::Borrowed),
            "image_url" => self.image_url.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn number(&self, field: &str) -> Option<f64> {
        match field {
            "id" => Some(self.id as f64),
            "calories" => self.calories.map(f64::from),
            "protein" => self.protein.map(f64::from),
            "carbs" => self.carbs.map(f64::from),
            "fat" => self.fat.map(f64::from),
            // Ranges on price are expressed in currency units, not cents.
            "price" => self.price_units(),
            _ => None,
        }
    }
}

impl Record for WeeklyMenuMeal {
    fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.meal.text(field)
    }

    fn number(&self, field: &str) -> Option<f64> {
        match field {
            "initial_stock" => Some(f64::from(self.initial_stock)),
            "available_stock" => Some(f64::from(self.available_stock)),
            _ => self.meal.number(field),
        }
    }
}

impl Record for Value {
    fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.get(field)? {
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            Value::Number(number) => Some(Cow::Owned(number.to_string())),
            Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meal_exposes_price_in_units() {
        let meal = Meal::new(1, "Bowl").with_price_cents(1299);
        assert_eq!(meal.number("price"), Some(12.99));
        assert_eq!(meal.number("calories"), None);
        assert_eq!(meal.number("unknown"), None);
    }

    #[test]
    fn meal_optional_text_fields_are_absent() {
        let meal = Meal::new(1, "Bowl");
        assert_eq!(meal.text("name").as_deref(), Some("Bowl"));
        assert_eq!(meal.text("category"), None);
    }

    #[test]
    fn menu_entry_adds_stock_fields() {
        let entry = WeeklyMenuMeal {
            meal: Meal::new(4, "Curry").with_nutrition(700, 30, 80, 20),
            initial_stock: 12,
            available_stock: 3,
        };
        assert_eq!(entry.number("available_stock"), Some(3.0));
        assert_eq!(entry.number("calories"), Some(700.0));
        assert_eq!(entry.text("name").as_deref(), Some("Curry"));
    }

    #[test]
    fn json_values_map_by_type() {
        let value = json!({
            "name": "Chili",
            "calories": 540,
            "vegan": false,
            "tags": ["spicy"],
            "fat": null
        });
        assert_eq!(value.text("name").as_deref(), Some("Chili"));
        assert_eq!(value.text("calories").as_deref(), Some("540"));
        assert_eq!(value.text("vegan").as_deref(), Some("false"));
        assert_eq!(value.text("tags"), None);
        assert_eq!(value.number("calories"), Some(540.0));
        assert_eq!(value.number("fat"), None);
        assert_eq!(value.number("name"), None);
        assert_eq!(json!(3).text("name"), None);
    }
}
