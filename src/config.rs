//! Calculator configuration
//!
//! Every constant the metric formulas use lives in [`MetricsConfig`], which is
//! handed to the calculator at construction time. Files may override any
//! subset of the fields; missing ones keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Average step length in meters
pub const DEFAULT_STEP_LENGTH_M: f64 = 0.65;

/// Constants consumed by [`crate::metrics::StandardCalculator`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Distance covered by one step (meters)
    pub step_length_m: f64,
    /// Meters in a kilometer
    pub meters_per_km: f64,
    /// Minutes in an hour
    pub minutes_per_hour: f64,
    /// Mean speed multiplier in the running formula
    pub running_speed_multiplier: f64,
    /// Mean speed shift in the running formula
    pub running_speed_shift: f64,
    /// Body weight multiplier in the walking formula
    pub walking_weight_multiplier: f64,
    /// Speed/height term multiplier in the walking formula
    pub walking_speed_height_multiplier: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            step_length_m: DEFAULT_STEP_LENGTH_M,
            meters_per_km: 1000.0,
            minutes_per_hour: 60.0,
            running_speed_multiplier: 18.0,
            running_speed_shift: 20.0,
            walking_weight_multiplier: 0.035,
            walking_speed_height_multiplier: 0.029,
        }
    }
}

impl MetricsConfig {
    /// Load configuration from JSON, filling absent fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Divisors must be usable; everything must be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("step_length_m", self.step_length_m),
            ("meters_per_km", self.meters_per_km),
            ("minutes_per_hour", self.minutes_per_hour),
            ("running_speed_multiplier", self.running_speed_multiplier),
            ("running_speed_shift", self.running_speed_shift),
            ("walking_weight_multiplier", self.walking_weight_multiplier),
            (
                "walking_speed_height_multiplier",
                self.walking_speed_height_multiplier,
            ),
        ];

        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: *name,
                reason: "must be finite",
            });
        }

        if self.meters_per_km <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "meters_per_km",
                reason: "must be positive",
            });
        }

        Ok(())
    }
}

/// Body parameters applied to every record of a batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub weight_kg: f64,
    pub height_m: f64,
}

impl UserProfile {
    /// Build a profile, rejecting non-finite or non-positive values
    pub fn new(weight_kg: f64, height_m: f64) -> Result<Self, ConfigError> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "weight_kg",
                reason: "must be a positive number",
            });
        }
        if !(height_m.is_finite() && height_m > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "height_m",
                reason: "must be a positive number",
            });
        }
        Ok(Self {
            weight_kg,
            height_m,
        })
    }
}
