//! # Settings
//!
//! User-adjustable defaults for a fresh form, plus the storage key for the
//! saved-calculation history. Stored as JSON; every field is optional in
//! the file and falls back to its default.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::Settings;
//!
//! let settings: Settings = serde_json::from_str(r#"{ "default_currency": "USD" }"#).unwrap();
//! assert_eq!(settings.default_psi, 3000);
//! assert_eq!(settings.history_key, "concreteCalculations");
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::water::{NEUTRAL_HUMIDITY_PCT, NEUTRAL_TEMPERATURE_C};
use crate::calculations::Currency;
use crate::errors::{CalcError, CalcResult};
use crate::history::HISTORY_KEY;

/// Calculator defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Currency selected on a fresh form
    pub default_currency: Currency,

    /// PSI class selected on every element tab
    pub default_psi: u32,

    /// Humidity slider start (%)
    pub default_humidity: f64,

    /// Temperature slider start (°C)
    pub default_temperature: f64,

    /// Key the history list is stored under
    pub history_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_currency: Currency::Php,
            default_psi: 3000,
            default_humidity: NEUTRAL_HUMIDITY_PCT,
            default_temperature: NEUTRAL_TEMPERATURE_C,
            history_key: HISTORY_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error so a typo in the file is not silently ignored.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(CalcError::storage_error(
                    "read settings",
                    path.display().to_string(),
                    e.to_string(),
                ))
            }
        };

        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid settings in {}: {}", path.display(), e),
        })
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(CalcError::serialization)?;
        fs::write(path, json).map_err(|e| {
            CalcError::storage_error("write settings", path.display().to_string(), e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_currency, Currency::Php);
        assert_eq!(settings.default_humidity, 50.0);
        assert_eq!(settings.default_temperature, 25.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            default_currency: Currency::Usd,
            default_psi: 4000,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
