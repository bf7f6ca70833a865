//! Meal records as served by the menu API.

use serde::{Deserialize, Serialize};

/// A single meal in the catalogue.
///
/// Nutrition values are whole units (kcal or grams). `price` is stored in
/// cents, the way the backend persists it; use [`Meal::price_units`] for the
/// currency value shown to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub protein: Option<u32>,
    #[serde(default)]
    pub carbs: Option<u32>,
    #[serde(default)]
    pub fat: Option<u32>,
    /// Price in cents.
    #[serde(default)]
    pub price: Option<u32>,
}

impl Meal {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: None,
            image_url: None,
            calories: None,
            protein: None,
            carbs: None,
            fat: None,
            price: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set calories, protein, carbs and fat in one go.
    #[must_use]
    pub fn with_nutrition(mut self, calories: u32, protein: u32, carbs: u32, fat: u32) -> Self {
        self.calories = Some(calories);
        self.protein = Some(protein);
        self.carbs = Some(carbs);
        self.fat = Some(fat);
        self
    }

    #[must_use]
    pub fn with_price_cents(mut self, cents: u32) -> Self {
        self.price = Some(cents);
        self
    }

    /// Price in currency units (cents / 100).
    pub fn price_units(&self) -> Option<f64> {
        self.price.map(|cents| f64::from(cents) / 100.0)
    }

    /// Price formatted for display, e.g. `$12.50`.
    pub fn display_price(&self) -> String {
        match self.price_units() {
            Some(units) => format!("${units:.2}"),
            None => "-".to_string(),
        }
    }
}
