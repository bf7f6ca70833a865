//! Numeric filter fields offered by the meal range panel.
//!
//! The bounds are input hints for a form, not validation: the engine accepts
//! any finite bound.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFieldHint {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Cow<'static, str>>,
}

impl NumericFieldHint {
    const fn meal(
        key: &'static str,
        label: &'static str,
        max: f64,
        step: Option<f64>,
        unit: &'static str,
    ) -> Self {
        Self {
            key: Cow::Borrowed(key),
            label: Cow::Borrowed(label),
            min: 0.0,
            max,
            step,
            unit: Some(Cow::Borrowed(unit)),
        }
    }

    pub fn step_or_default(&self) -> f64 {
        self.step.unwrap_or(1.0)
    }

    /// Whether `value` lies inside the suggested domain.
    pub fn is_within(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Label with the unit appended, e.g. `Protein (g)`.
    pub fn display_label(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} ({unit})", self.label),
            None => self.label.to_string(),
        }
    }
}

pub static MEAL_FILTER_FIELDS: [NumericFieldHint; 5] = [
    NumericFieldHint::meal("calories", "Calories", 1500.0, None, "kcal"),
    NumericFieldHint::meal("protein", "Protein", 150.0, None, "g"),
    NumericFieldHint::meal("carbs", "Carbs", 150.0, None, "g"),
    NumericFieldHint::meal("fat", "Fat", 100.0, None, "g"),
    NumericFieldHint::meal("price", "Price", 50.0, Some(0.01), "$"),
];

pub fn hint_for(key: &str) -> Option<&'static NumericFieldHint> {
    MEAL_FILTER_FIELDS.iter().find(|hint| hint.key == key)
}
