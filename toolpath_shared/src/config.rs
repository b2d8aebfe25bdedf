//! Shared configuration logic for the planner library, the CLI, and tests.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [limits]
//! v_max = { x = 10.0, y = 10.0, z = 10.0 }
//! a_max = { x = 10.0, y = 10.0, z = 10.0 }
//! junction_speed = 10.0
//! junction_deviation = 10.0
//!
//! [planner]
//! initial_velocity = 0.0
//! final_velocity = 0.0
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::PlanOptions;
use crate::vector::Vec3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Per-axis and junction limits of the machine. Built once, then shared
/// read-only by every planning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicLimits {
    /// Maximum velocity per axis (units/s)
    pub v_max: Vec3,
    /// Maximum acceleration per axis (units/s^2)
    pub a_max: Vec3,
    /// Floor for cornering speed (units/s)
    pub junction_speed: f64,
    /// How far the tool may bow off-path at a corner (units)
    pub junction_deviation: f64,
}

impl KinematicLimits {
    pub fn new(
        v_max: Vec3,
        a_max: Vec3,
        junction_speed: f64,
        junction_deviation: f64,
    ) -> Result<Self, ConfigError> {
        let limits = Self { v_max, a_max, junction_speed, junction_deviation };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, axis) in [("v_max", &self.v_max), ("a_max", &self.a_max)] {
            for (label, value) in [("x", axis.x), ("y", axis.y), ("z", axis.z)] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "{}.{} must be a finite value > 0, got {}",
                        name, label, value
                    )));
                }
            }
        }
        if !self.junction_speed.is_finite() || self.junction_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "junction_speed must be a finite value >= 0, got {}",
                self.junction_speed
            )));
        }
        if !self.junction_deviation.is_finite() || self.junction_deviation < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "junction_deviation must be a finite value >= 0, got {}",
                self.junction_deviation
            )));
        }
        Ok(())
    }

    /// Speed cap handed to every position sample before planning.
    pub fn planar_speed_cap(&self) -> f64 {
        self.v_max.x.max(self.v_max.y)
    }
}

impl Default for KinematicLimits {
    fn default() -> Self {
        Self {
            v_max: default_axis_limit(),
            a_max: default_axis_limit(),
            junction_speed: default_junction_speed(),
            junction_deviation: default_junction_deviation(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    #[serde(default = "default_axis_limit")]
    pub v_max: Vec3,
    #[serde(default = "default_axis_limit")]
    pub a_max: Vec3,
    #[serde(default = "default_junction_speed")]
    pub junction_speed: f64,
    #[serde(default = "default_junction_deviation")]
    pub junction_deviation: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            v_max: default_axis_limit(),
            a_max: default_axis_limit(),
            junction_speed: default_junction_speed(),
            junction_deviation: default_junction_deviation(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlannerConfig {
    /// Entry velocity for the forward pass
    #[serde(default)]
    pub initial_velocity: f64,
    /// Exit velocity for the backward pass
    #[serde(default)]
    pub final_velocity: f64,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.kinematic_limits()?;
        for (name, value) in [
            ("initial_velocity", self.planner.initial_velocity),
            ("final_velocity", self.planner.final_velocity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "planner.{} must be a finite value >= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            initial_velocity: self.planner.initial_velocity,
            final_velocity: self.planner.final_velocity,
        }
    }

    pub fn kinematic_limits(&self) -> Result<KinematicLimits, ConfigError> {
        KinematicLimits::new(
            self.limits.v_max,
            self.limits.a_max,
            self.limits.junction_speed,
            self.limits.junction_deviation,
        )
    }
}

fn default_axis_limit() -> Vec3 { Vec3::new(10.0, 10.0, 10.0) }
fn default_junction_speed() -> f64 { 10.0 }
fn default_junction_deviation() -> f64 { 10.0 }

pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let config: Config = match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                return Err(ConfigError::Toml(e));
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            return Err(ConfigError::Io(e));
        }
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
[limits]
junction_deviation = 0.05
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.limits.v_max, Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(config.limits.junction_deviation, 0.05);
        assert_eq!(config.planner.final_velocity, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_axis_limit() {
        let toml_str = r#"
[limits]
a_max = { x = 10.0, y = 0.0, z = 10.0 }
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("a_max.y")));
    }

    #[test]
    fn test_rejects_negative_final_velocity() {
        let mut config = Config::default();
        config.planner.final_velocity = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_planar_speed_cap_takes_faster_horizontal_axis() {
        let limits = KinematicLimits::new(
            Vec3::new(4.0, 7.0, 100.0),
            Vec3::new(1.0, 1.0, 1.0),
            1.0,
            0.1,
        )
        .unwrap();
        assert_eq!(limits.planar_speed_cap(), 7.0);
    }
}
