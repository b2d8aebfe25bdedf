// toolpath_shared::motion::geometry - position samples and oriented planar segments

use std::sync::Arc;

use serde::Serialize;

use super::MotionError;
use super::profile::{KinematicProfile, ProfileQuery};
use crate::config::KinematicLimits;
use crate::ir::Instruction;
use crate::vector::Vec3;

/// Planar displacements shorter than this are collapsed into the next move.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-18;

/// An absolute target position taken from one instruction.
#[derive(Debug, Clone, Serialize)]
pub struct PositionSample {
    pub instruction: Arc<Instruction>,
    /// Index of the originating instruction in the lowered stream
    pub parent: usize,
    /// Axis-limited start velocity
    pub start_velocity: f64,
    /// Axis-limited end velocity
    pub end_velocity: f64,
    pub coords: Vec3,
}

/// A straight move between two positions with its velocity profile.
///
/// Segments are values: every planning step that changes a profile or
/// splits a move produces new segments.
#[derive(Debug, Clone, Serialize)]
pub struct PlanarSegment {
    pub instruction: Arc<Instruction>,
    pub parent: usize,
    pub start: Vec3,
    pub end: Vec3,
    /// Direction normalized by the XY length; z is scaled along with it
    pub unit: Vec3,
    /// Largest acceleration along `unit` that respects every axis limit
    pub max_acceleration: f64,
    pub profile: KinematicProfile,
}

impl PlanarSegment {
    /// Build a segment from two positions. Requires a non-degenerate XY
    /// displacement; callers filter those out first.
    pub fn from_geometry(
        instruction: Arc<Instruction>,
        parent: usize,
        start_velocity: f64,
        end_velocity: f64,
        start: Vec3,
        end: Vec3,
        limits: &KinematicLimits,
    ) -> Result<Self, MotionError> {
        let delta = end - start;
        let length = delta.planar_norm();
        let profile = ProfileQuery::MissingAT {
            v0: start_velocity.abs(),
            v: end_velocity.abs(),
            x: length,
        }
        .solve()?;
        let unit = delta.scale(1.0 / length);
        Ok(Self {
            instruction,
            parent,
            start,
            end,
            unit,
            max_acceleration: unit.limit_by_axis(&limits.a_max),
            profile,
        })
    }

    pub fn with_profile(&self, profile: KinematicProfile) -> Self {
        Self { profile, ..self.clone() }
    }

    /// A piece of this segment between two positions on it.
    pub fn sub_segment(&self, start: Vec3, end: Vec3, profile: KinematicProfile) -> Self {
        Self { start, end, profile, ..self.clone() }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).planar_norm()
    }

    /// Fastest speed along this direction that keeps every axis under its
    /// velocity limit.
    pub fn axis_limited_speed(&self, limits: &KinematicLimits) -> f64 {
        self.unit.limit_by_axis(&limits.v_max)
    }
}

/// Turn instructions into absolute target positions, skipping records that
/// lack a horizontal coordinate. A missing z holds the previous depth.
pub fn extract_samples(instructions: &[Instruction], speed_cap: f64) -> Vec<PositionSample> {
    let mut z = 0.0;
    let mut samples = Vec::with_capacity(instructions.len());
    for (index, ir) in instructions.iter().enumerate() {
        let Some((x, y)) = ir.planar_target() else {
            tracing::trace!("Skipping null move {} '{}'", index, ir.original);
            continue;
        };
        z = ir.args.z.unwrap_or(z);
        samples.push(PositionSample {
            instruction: Arc::new(ir.clone()),
            parent: index,
            start_velocity: speed_cap,
            end_velocity: speed_cap,
            coords: Vec3::new(x, y, z),
        });
    }
    samples
}

/// Chain samples into segments starting from the origin. Moves with no XY
/// displacement are dropped and do not advance the chain.
pub fn build_segments(
    samples: &[PositionSample],
    limits: &KinematicLimits,
) -> Result<Vec<PlanarSegment>, MotionError> {
    let mut start = Vec3::ZERO;
    let mut segments = Vec::with_capacity(samples.len());
    for sample in samples {
        let end = sample.coords;
        if !end.is_finite() {
            return Err(MotionError::NonFiniteCoordinate { parent: sample.parent });
        }
        if (end - start).planar_norm() < MIN_SEGMENT_LENGTH {
            tracing::trace!("Dropping zero-length move from instruction {}", sample.parent);
            continue;
        }
        segments.push(PlanarSegment::from_geometry(
            sample.instruction.clone(),
            sample.parent,
            sample.start_velocity,
            sample.end_velocity,
            start,
            end,
            limits,
        )?);
        start = end;
    }
    tracing::debug!("Built {} segments from {} samples", segments.len(), samples.len());
    Ok(segments)
}
