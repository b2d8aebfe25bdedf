//! # Planner Configuration
//!
//! Machine limits and planner options are read from a TOML file. Every key is
//! optional; missing sections fall back to the defaults shown here.
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
//!
//! ## Example: Rust Usage
//!
//! ```rust
//! use toolpath_rs::config::Config;
//! let toml_str = r#"
//! [limits]
//! junction_deviation = 0.05
//! "#;
//! let config: Config = toml::from_str(toml_str).unwrap();
//! let limits = config.kinematic_limits().unwrap();
//! assert_eq!(limits.junction_deviation, 0.05);
//! assert_eq!(limits.v_max.x, 10.0);
//! ```

pub use toolpath_shared::config::*;

/// Load `path` when given, otherwise use the built-in defaults.
pub fn load_or_default(path: Option<&str>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            load_config(path)
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Ok(Config::default())
        }
    }
}

/// The default configuration rendered as TOML.
pub fn default_config_toml() -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&Config::default())
}
