use serde::{Deserialize, Serialize};

use crate::Meal;

/// A meal offered in a weekly menu together with its stock levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMenuMeal {
    pub meal: Meal,
    pub initial_stock: u32,
    pub available_stock: u32,
}

impl WeeklyMenuMeal {
    pub fn is_sold_out(&self) -> bool {
        self.available_stock == 0
    }
}

/// The menu published for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMenu {
    pub id: u64,
    /// ISO date of the first day of the week.
    pub week_start_date: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub meals: Vec<WeeklyMenuMeal>,
}

impl WeeklyMenu {
    /// Meals that still have stock left.
    pub fn available_meals(&self) -> impl Iterator<Item = &WeeklyMenuMeal> {
        self.meals.iter().filter(|entry| !entry.is_sold_out())
    }
}
