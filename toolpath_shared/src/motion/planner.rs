// toolpath_shared::motion::planner - two-pass velocity planning over planar segments
//
// The forward pass caps every segment by its axis limits and junction speed and
// makes each one reachable from the previous exit velocity; the backward pass
// replays the same splitting logic on the time-reversed profiles so every
// segment can also slow down into the next one.

use serde::{Deserialize, Serialize};

use super::MotionError;
use super::geometry::{MIN_SEGMENT_LENGTH, PlanarSegment};
use super::junction::junction_velocity;
use super::profile::{KinematicProfile, ProfileQuery};
use crate::config::KinematicLimits;

/// Velocities within this margin of a target already satisfy it.
pub const VELOCITY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Velocity at the start of the toolpath
    pub initial_velocity: f64,
    /// Velocity at the end of the toolpath
    pub final_velocity: f64,
}

impl PlanOptions {
    pub fn validate(&self) -> Result<(), MotionError> {
        for (name, value) in [("initial_velocity", self.initial_velocity), ("final_velocity", self.final_velocity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MotionError::InvalidLimits(format!("{} must be a finite value >= 0, got {}", name, value)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MotionPlanner {
    limits: KinematicLimits,
    options: PlanOptions,
}

/// Running state threaded through the forward pass.
struct ForwardState {
    prev: Option<PlanarSegment>,
    entry_velocity: f64,
    out: Vec<PlanarSegment>,
}

impl MotionPlanner {
    pub fn new(limits: KinematicLimits, options: PlanOptions) -> Result<Self, MotionError> {
        limits.validate().map_err(|e| MotionError::InvalidLimits(e.to_string()))?;
        options.validate()?;
        Ok(Self { limits, options })
    }

    /// Forward then backward pass.
    pub fn plan(&self, segments: &[PlanarSegment]) -> Result<Vec<PlanarSegment>, MotionError> {
        let forward = self.forward_pass(segments)?;
        self.backward_pass(&forward)
    }

    /// Left-to-right sweep: clamp each segment to its axis-limited speed and
    /// acceleration, cap the entry speed at the junction, then split the
    /// segment wherever it cannot be entered at its recorded start velocity.
    pub fn forward_pass(&self, segments: &[PlanarSegment]) -> Result<Vec<PlanarSegment>, MotionError> {
        let seed = ForwardState {
            prev: None,
            entry_velocity: self.options.initial_velocity,
            out: Vec::with_capacity(segments.len() * 2),
        };
        let state = segments.iter().try_fold(seed, |mut state, segment| {
            if let Some(prev) = &state.prev {
                if let Some(jv) = junction_velocity(prev, segment, &self.limits) {
                    state.entry_velocity = state.entry_velocity.min(jv);
                }
            }
            let capped = self.clamp_to_limits(segment)?;
            for piece in split_segment(&capped, state.entry_velocity, PassDirection::Forward)? {
                state.entry_velocity = piece.profile.v;
                state.out.push(piece);
            }
            state.prev = Some(capped);
            Ok::<_, MotionError>(state)
        })?;
        tracing::debug!("Forward pass: {} segments -> {}", segments.len(), state.out.len());
        Ok(state.out)
    }

    /// Right-to-left sweep over forward-pass output. Each segment is split in
    /// the reversed frame against the start velocity of the segment after it.
    pub fn backward_pass(&self, segments: &[PlanarSegment]) -> Result<Vec<PlanarSegment>, MotionError> {
        let seed = (Vec::with_capacity(segments.len()), self.options.final_velocity);
        let (chunks, _) = segments.iter().rev().try_fold(seed, |(mut chunks, exit_velocity), segment| {
            let chunk = split_segment(segment, exit_velocity, PassDirection::Backward)?;
            let entry_velocity = chunk.first().map_or(exit_velocity, |piece| piece.profile.v0);
            chunks.push(chunk);
            Ok::<_, MotionError>((chunks, entry_velocity))
        })?;
        let planned: Vec<PlanarSegment> = chunks.into_iter().rev().flatten().collect();
        tracing::debug!("Backward pass: {} segments -> {}", segments.len(), planned.len());
        Ok(planned)
    }

    /// Re-solve a segment whose profile exceeds its axis-limited speed or its
    /// maximum acceleration. Distance is held fixed.
    fn clamp_to_limits(&self, segment: &PlanarSegment) -> Result<PlanarSegment, MotionError> {
        let cap = segment.axis_limited_speed(&self.limits);
        let mut profile = segment.profile;
        let mut changed = false;
        if profile.v0 > cap || profile.v > cap {
            profile = ProfileQuery::MissingAT { v0: profile.v0.min(cap), v: profile.v.min(cap), x: profile.x }.solve()?;
            changed = true;
        }
        if profile.a.abs() > segment.max_acceleration {
            let a = segment.max_acceleration.copysign(profile.a);
            profile = ProfileQuery::MissingVT { v0: profile.v0, a, x: profile.x }.solve()?;
            changed = true;
        }
        if changed {
            Ok(segment.with_profile(profile))
        } else {
            Ok(segment.clone())
        }
    }
}

/// Make `segment` start at no more than `v` (forward) or end at no more
/// than `v` (backward) without exceeding its maximum acceleration.
///
/// Yields the segment unchanged when it already satisfies `v`, one re-solved
/// segment when the whole length is needed to change speed, or two pieces
/// (an acceleration-limited ramp and the remainder) split at the crossing.
pub fn split_segment(
    segment: &PlanarSegment,
    v: f64,
    direction: PassDirection,
) -> Result<Vec<PlanarSegment>, MotionError> {
    let reverse = direction == PassDirection::Backward;
    let p = if reverse { segment.profile.reversed() } else { segment.profile };
    if p.v0 <= v + VELOCITY_TOLERANCE {
        return Ok(vec![segment.clone()]);
    }

    let a = segment.max_acceleration;
    let da = a - p.a;
    let dv = p.v0 - v;

    let pieces = if da <= 0.0 || p.t * da <= dv {
        let whole = ProfileQuery::MissingVT { v0: v, a, x: p.x }.solve()?;
        if whole.v <= p.v + VELOCITY_TOLERANCE {
            vec![whole]
        } else {
            // the ramp meets the old profile before the far end
            meet_by_distance(&p, v, a)?
        }
    } else {
        let first = ProfileQuery::MissingVX { v0: v, a, t: dv / da }.solve()?;
        let remaining = p.x - first.x;
        if remaining <= MIN_SEGMENT_LENGTH {
            vec![ProfileQuery::MissingVT { v0: v, a, x: p.x }.solve()?]
        } else {
            let second = ProfileQuery::MissingAT { v0: first.v, v: p.v, x: remaining }.solve()?;
            vec![first, second]
        }
    };

    let pieces: Vec<KinematicProfile> = if reverse {
        pieces.iter().rev().map(KinematicProfile::reversed).collect()
    } else {
        pieces
    };
    tracing::trace!(
        "Split segment {} ({:?}) at v={:.4} into {} piece(s)",
        segment.parent, direction, v, pieces.len()
    );
    Ok(lay_out(segment, &pieces))
}

/// Ramp from `v` at `a` until it meets `p` in velocity-squared over distance,
/// then follow `p` to the end.
fn meet_by_distance(p: &KinematicProfile, v: f64, a: f64) -> Result<Vec<KinematicProfile>, MotionError> {
    let crossing = (p.v0 * p.v0 - v * v) / (2.0 * (a - p.a));
    if !(crossing < p.x - MIN_SEGMENT_LENGTH) {
        return Ok(vec![ProfileQuery::MissingAT { v0: v, v: p.v, x: p.x }.solve()?]);
    }
    let first = ProfileQuery::MissingVT { v0: v, a, x: crossing }.solve()?;
    let second = ProfileQuery::MissingAT { v0: first.v, v: p.v, x: p.x - crossing }.solve()?;
    Ok(vec![first, second])
}

/// Place consecutive profiles along the segment in travel order.
fn lay_out(segment: &PlanarSegment, pieces: &[KinematicProfile]) -> Vec<PlanarSegment> {
    let mut out = Vec::with_capacity(pieces.len());
    let mut start = segment.start;
    let mut travelled = 0.0;
    for (i, profile) in pieces.iter().enumerate() {
        let end = if i + 1 == pieces.len() {
            segment.end
        } else {
            travelled += profile.x;
            segment.start + segment.unit * travelled
        };
        out.push(segment.sub_segment(start, end, *profile));
        start = end;
    }
    out
}
