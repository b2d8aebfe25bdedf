// src/error.rs - Errors surfaced by the planning binary

use thiserror::Error;
use toolpath_shared::config::ConfigError;
use toolpath_shared::trajectory::TrajectoryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Planning error: {0}")]
    Trajectory(#[from] TrajectoryError),
    #[error("Failed to read toolpath '{path}': {source}")]
    Input { path: String, source: std::io::Error },
    #[error("Unknown built-in toolpath '{0}'")]
    UnknownBuiltin(String),
    #[error("No toolpath given: pass --input with --dialect, or --builtin")]
    NoToolpath,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
