// Engine settings, loaded from an optional JSON file on top of the defaults
use crate::error::{EngineError, EngineResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub data_path: PathBuf,
    pub delimiter: char,
    pub preview_rows: usize,
    pub histogram_bins: usize,
    pub top_restaurants: usize,
    pub currency_symbol: String,
    pub output: OutputFormat,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_path: PathBuf::from("food_orders_new_delhi.csv"),
            delimiter: ',',
            preview_rows: 5,
            histogram_bins: 30,
            top_restaurants: 10,
            currency_symbol: "₹".to_string(),
            output: OutputFormat::Text,
        }
    }
}

impl EngineSettings {
    /// Reads settings from a JSON file. Keys missing from the file keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.display(), e))
        })?;
        let settings: EngineSettings = serde_json::from_str(&raw).map_err(|e| {
            EngineError::ConfigError(format!("Invalid settings file '{}': {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.histogram_bins == 0 {
            return Err(EngineError::ConfigError("histogram_bins must be greater than 0".to_string()));
        }
        if !self.delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// The delimiter as the single byte the csv reader expects.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII, so the truncation is lossless
        self.delimiter as u8
    }
}
