// src/trajectory.rs - Shared trajectory planning entry points and result bundle
use serde::Serialize;
use thiserror::Error;

use crate::config::KinematicLimits;
use crate::ir::{self, Instruction, LoweringError, Toolpath};
use crate::motion::{MotionError, MotionPlanner, PlanOptions, PlanarSegment, PositionSample, build_segments, extract_samples};

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("Lowering error: {0}")]
    Lowering(#[from] LoweringError),
    #[error("Motion error: {0}")]
    Motion(#[from] MotionError),
}

/// Every stage of one planning run, kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryResult {
    /// Absolute positions, one per non-null instruction
    pub samples: Vec<PositionSample>,
    /// Unconstrained segments straight from geometry
    pub geometry: Vec<PlanarSegment>,
    /// Segments after the forward pass only
    pub forward: Vec<PlanarSegment>,
    /// Segments after both passes
    pub planned: Vec<PlanarSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryStats {
    pub samples: usize,
    pub geometry_segments: usize,
    pub forward_segments: usize,
    pub planned_segments: usize,
    pub total_time: f64,
    pub total_distance: f64,
    pub peak_velocity: f64,
}

impl TrajectoryResult {
    pub fn total_time(&self) -> f64 {
        self.planned.iter().map(|s| s.profile.t).sum()
    }

    pub fn total_distance(&self) -> f64 {
        self.planned.iter().map(|s| s.profile.x).sum()
    }

    pub fn peak_velocity(&self) -> f64 {
        self.planned
            .iter()
            .map(|s| s.profile.v0.max(s.profile.v))
            .fold(0.0, f64::max)
    }

    /// Start time of each planned segment, measured from the first.
    pub fn timeline(&self) -> Vec<f64> {
        self.planned
            .iter()
            .scan(0.0, |elapsed, segment| {
                let start = *elapsed;
                *elapsed += segment.profile.t;
                Some(start)
            })
            .collect()
    }

    /// Source instruction of any segment, split pieces included.
    pub fn instruction_for<'a>(&self, segment: &'a PlanarSegment) -> &'a Instruction {
        &segment.instruction
    }

    /// Planned pieces that came from instruction `parent`.
    pub fn segments_for(&self, parent: usize) -> impl Iterator<Item = &PlanarSegment> {
        self.planned.iter().filter(move |s| s.parent == parent)
    }

    pub fn stats(&self) -> TrajectoryStats {
        TrajectoryStats {
            samples: self.samples.len(),
            geometry_segments: self.geometry.len(),
            forward_segments: self.forward.len(),
            planned_segments: self.planned.len(),
            total_time: self.total_time(),
            total_distance: self.total_distance(),
            peak_velocity: self.peak_velocity(),
        }
    }
}

/// Plan a lowered instruction stream.
pub fn compute_trajectory(
    instructions: &[Instruction],
    limits: &KinematicLimits,
    options: PlanOptions,
) -> Result<TrajectoryResult, MotionError> {
    let planner = MotionPlanner::new(limits.clone(), options)?;
    let samples = extract_samples(instructions, limits.planar_speed_cap());
    let geometry = build_segments(&samples, limits)?;
    let forward = planner.forward_pass(&geometry)?;
    let planned = planner.backward_pass(&forward)?;
    tracing::debug!(
        "Planned {} instructions: {} samples, {} segments, {} forward, {} planned",
        instructions.len(),
        samples.len(),
        geometry.len(),
        forward.len(),
        planned.len()
    );
    Ok(TrajectoryResult { samples, geometry, forward, planned })
}

/// Lower a toolpath and plan it.
pub fn compute_toolpath(
    toolpath: &Toolpath,
    limits: &KinematicLimits,
    options: PlanOptions,
) -> Result<TrajectoryResult, TrajectoryError> {
    let instructions = ir::lower(toolpath)?;
    Ok(compute_trajectory(&instructions, limits, options)?)
}
