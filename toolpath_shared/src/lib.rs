// toolpath_shared: dialect lowering, kinematic profiles and the two-pass trajectory planner

pub mod config;
pub mod ir;
pub mod motion;
pub mod trajectory;
pub mod vector;

pub use config::{Config, ConfigError, KinematicLimits, load_config};
pub use ir::{Dialect, Instruction, LoweringError, Toolpath};
pub use motion::{KinematicProfile, MotionError, MotionPlanner, PlanOptions, PlanarSegment, PositionSample};
pub use trajectory::{TrajectoryError, TrajectoryResult, TrajectoryStats, compute_toolpath, compute_trajectory};
pub use vector::Vec3;
