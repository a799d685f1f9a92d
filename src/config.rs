//! Recomp configuration constants
//!
//! Every "hardcoded" number in the target formulas lives here: activity
//! multiplier, calorie subtract value, macro ratios and calories-per-gram,
//! the carb cap, and the intake buffer. Values are loaded once (JSON) or
//! taken from the shipped defaults; the calculation core treats them as
//! read-only parameters.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Activity section: maintenance = BMR x multiplier.
///
/// One shared multiplier for every activity level. The profile's stored
/// activity level has no further effect on the math today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityConfig {
    pub multiplier: f64,
}

/// Recomp section: calorie bound and expected-intake buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecompSection {
    /// Subtracted from maintenance to form the upper calorie bound
    pub subtract_value: f64,
    /// Added to the macro floor for the low end of the expected-intake range
    pub intake_buffer_min: f64,
    /// Added to the macro floor for the high end of the expected-intake range
    pub intake_buffer_max: f64,
}

/// Protein section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProteinConfig {
    /// Grams of protein per kg of body weight
    pub ratio_per_kg: f64,
    pub calories_per_gram: f64,
}

/// Fat section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatConfig {
    /// Grams of fat per kg of body weight
    pub ratio_per_kg: f64,
    pub calories_per_gram: f64,
}

/// Carb section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbConfig {
    pub calories_per_gram: f64,
    /// Hard cap on the carb gram target
    pub max: f64,
}

/// Full configuration for target calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecompConfig {
    pub activity: ActivityConfig,
    pub recomp: RecompSection,
    pub protein: ProteinConfig,
    pub fat: FatConfig,
    pub carbs: CarbConfig,
}

impl Default for RecompConfig {
    fn default() -> Self {
        Self {
            activity: ActivityConfig { multiplier: 1.5 },
            recomp: RecompSection {
                subtract_value: 500.0,
                intake_buffer_min: 100.0,
                intake_buffer_max: 200.0,
            },
            protein: ProteinConfig {
                ratio_per_kg: 2.2,
                calories_per_gram: 4.0,
            },
            fat: FatConfig {
                ratio_per_kg: 0.8,
                calories_per_gram: 9.0,
            },
            carbs: CarbConfig {
                calories_per_gram: 4.0,
                max: 300.0,
            },
        }
    }
}

impl RecompConfig {
    /// Load configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::ConfigError(e.to_string()))
    }

    /// Serialize configuration to pretty JSON
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(EngineError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_round_trip() {
        let config = RecompConfig::default();
        let json = config.to_json().unwrap();
        let loaded = RecompConfig::from_json(&json).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_partial_override() {
        let json = r#"{
            "activity": { "multiplier": 1.375 },
            "recomp": { "subtract_value": 400.0, "intake_buffer_min": 50.0, "intake_buffer_max": 150.0 },
            "protein": { "ratio_per_kg": 1.8, "calories_per_gram": 4.0 },
            "fat": { "ratio_per_kg": 0.9, "calories_per_gram": 9.0 },
            "carbs": { "calories_per_gram": 4.0, "max": 250.0 }
        }"#;
        let config = RecompConfig::from_json(json).unwrap();

        assert_eq!(config.activity.multiplier, 1.375);
        assert_eq!(config.carbs.max, 250.0);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = RecompConfig::from_json("{ nope").unwrap_err();
        assert!(err.to_string().contains("config"));
    }
}
