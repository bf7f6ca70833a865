//! Filter configuration, stored as TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::fields::{MEAL_FILTER_FIELDS, NumericFieldHint};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for a filter session.
///
/// ```toml
/// search_fields = ["name", "description"]
/// debounce_ms = 300
///
/// [[fields]]
/// key = "calories"
/// label = "Calories"
/// min = 0.0
/// max = 1500.0
/// unit = "kcal"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Fields searched by the free-text input.
    pub search_fields: Vec<String>,
    /// Quiet interval before typed search text is committed.
    pub debounce_ms: u64,
    /// Range inputs offered to the user.
    pub fields: Vec<NumericFieldHint>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            search_fields: vec!["name".to_string(), "description".to_string()],
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            fields: MEAL_FILTER_FIELDS.to_vec(),
        }
    }
}

impl FilterConfig {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn field(&self, key: &str) -> Option<&NumericFieldHint> {
        self.fields.iter().find(|hint| hint.key == key)
    }
}
