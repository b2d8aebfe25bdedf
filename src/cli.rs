// src/cli.rs - Command line arguments for plan-toolpath

use std::path::PathBuf;

use clap::Parser;
use toolpath_shared::ir::{Dialect, Toolpath};

use crate::builtin::builtin_toolpath;
use crate::error::AppError;
use crate::report::Stage;

#[derive(Debug, Parser)]
#[command(name = "plan-toolpath", version, about = "Plan constant-acceleration trajectories for CNC and plotter toolpaths")]
pub struct Args {
    /// TOML file with machine limits and planner options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Toolpath source file
    #[arg(short, long, requires = "dialect", conflicts_with = "builtin")]
    pub input: Option<PathBuf>,

    /// Dialect of the input file (gcode, ebb, sbp)
    #[arg(short, long, value_parser = parse_dialect)]
    pub dialect: Option<Dialect>,

    /// Name of a built-in toolpath (line, rectangle, triangle, star)
    #[arg(short, long)]
    pub builtin: Option<String>,

    /// Stage to print
    #[arg(long, value_enum, default_value_t = Stage::Planned)]
    pub stage: Stage,

    /// Print the selected stage as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    s.parse()
}

impl Args {
    /// Resolve the toolpath to plan from `--input` or `--builtin`.
    pub fn toolpath(&self) -> Result<Toolpath, AppError> {
        if let Some(name) = &self.builtin {
            return builtin_toolpath(name).ok_or_else(|| AppError::UnknownBuiltin(name.clone()));
        }
        match (&self.input, self.dialect) {
            (Some(path), Some(dialect)) => {
                let source = std::fs::read_to_string(path).map_err(|source| AppError::Input {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(Toolpath::from_source(dialect, &source))
            }
            _ => Err(AppError::NoToolpath),
        }
    }
}
