pub mod error;
pub mod load;
pub mod meal;
pub mod menu;

pub use error::{MealError, Result};
pub use load::{load_json_records, load_meals, load_weekly_menu};
pub use meal::Meal;
pub use menu::{WeeklyMenu, WeeklyMenuMeal};
