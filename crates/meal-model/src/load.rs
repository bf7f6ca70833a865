//! Loading record tables from disk.
//!
//! Meal tables come either as the JSON array returned by `GET /meals` or as a
//! CSV export with the same column names. Empty CSV cells are absent values.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{MealError, Result};
use crate::{Meal, WeeklyMenu};

/// Load a meal table, picking the format from the file extension.
pub fn load_meals(path: &Path) -> Result<Vec<Meal>> {
    let meals = if is_csv(path) {
        read_csv(path)?
    } else {
        read_json(path)?
    };
    debug!(path = %path.display(), count = meals.len(), "loaded meals");
    Ok(meals)
}

/// Load a weekly menu document.
pub fn load_weekly_menu(path: &Path) -> Result<WeeklyMenu> {
    let menu: WeeklyMenu = read_json(path)?;
    debug!(
        path = %path.display(),
        menu_id = menu.id,
        meals = menu.meals.len(),
        "loaded weekly menu"
    );
    Ok(menu)
}

/// Load an arbitrary JSON array of objects.
pub fn load_json_records(path: &Path) -> Result<Vec<serde_json::Value>> {
    let records: Vec<serde_json::Value> = read_json(path)?;
    if let Some(position) = records.iter().position(|value| !value.is_object()) {
        return Err(MealError::Message(format!(
            "{}: element {position} is not an object",
            path.display()
        )));
    }
    Ok(records)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| MealError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| MealError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let csv_error = |source| MealError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(csv_error)
}
