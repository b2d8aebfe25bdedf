// toolpath_shared::motion::mod.rs
// Kinematic profile solver, segment geometry, junction speeds and the two-pass planner

pub mod geometry;
pub mod junction;
pub mod planner;
pub mod profile;

pub use geometry::{PlanarSegment, PositionSample, build_segments, extract_samples};
pub use junction::junction_velocity;
pub use planner::{MotionPlanner, PassDirection, PlanOptions, split_segment};
pub use profile::{KinematicProfile, ProfileError, ProfileQuery};

#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
    #[error("Invalid limits: {0}")]
    InvalidLimits(String),
    #[error("Instruction {parent} targets a non-finite position")]
    NonFiniteCoordinate { parent: usize },
}
