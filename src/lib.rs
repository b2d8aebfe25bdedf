// toolpath-rs: command line front end for the toolpath_shared trajectory planner

pub mod builtin;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;

pub use cli::Args;
pub use error::AppError;
pub use report::Stage;
pub use toolpath_shared::{Dialect, KinematicLimits, PlanOptions, Toolpath, TrajectoryResult, compute_toolpath};

/// Load the configuration named by `args` and plan the selected toolpath.
pub fn run(args: &Args) -> Result<TrajectoryResult, AppError> {
    let config_path = args.config.as_ref().map(|p| p.display().to_string());
    let config = config::load_or_default(config_path.as_deref())?;
    let limits = config.kinematic_limits()?;
    let toolpath = args.toolpath()?;
    tracing::info!(
        "Planning {} {:?} lines (v_max {:?}, a_max {:?}, junction deviation {})",
        toolpath.lines.len(),
        toolpath.dialect,
        limits.v_max,
        limits.a_max,
        limits.junction_deviation
    );
    Ok(compute_toolpath(&toolpath, &limits, config.plan_options())?)
}
