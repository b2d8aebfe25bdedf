// src/report.rs - Summary and JSON rendering of planning stages

use clap::ValueEnum;
use serde::Serialize;
use toolpath_shared::motion::PlanarSegment;
use toolpath_shared::trajectory::TrajectoryResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Samples,
    Geometry,
    Forward,
    Planned,
}

/// Segment count, duration and length of one segment stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageTotals {
    pub segments: usize,
    pub time: f64,
    pub distance: f64,
}

impl StageTotals {
    pub fn of(segments: &[PlanarSegment]) -> Self {
        Self {
            segments: segments.len(),
            time: segments.iter().map(|s| s.profile.t).sum(),
            distance: segments.iter().map(|s| s.profile.x).sum(),
        }
    }
}

pub fn stage_json(result: &TrajectoryResult, stage: Stage) -> Result<String, serde_json::Error> {
    match stage {
        Stage::Samples => serde_json::to_string_pretty(&result.samples),
        Stage::Geometry => serde_json::to_string_pretty(&result.geometry),
        Stage::Forward => serde_json::to_string_pretty(&result.forward),
        Stage::Planned => serde_json::to_string_pretty(&result.planned),
    }
}

/// One line per stage.
pub fn summary(result: &TrajectoryResult) -> String {
    let mut lines = vec![format!("samples:  {}", result.samples.len())];
    for (label, segments) in [
        ("geometry", &result.geometry),
        ("forward", &result.forward),
        ("planned", &result.planned),
    ] {
        let totals = StageTotals::of(segments);
        lines.push(format!(
            "{:<9} {} segments, {:.3} units, {:.3} s",
            format!("{}:", label),
            totals.segments,
            totals.distance,
            totals.time
        ));
    }
    lines.push(format!("peak velocity: {:.3}", result.peak_velocity()));
    lines.join("\n")
}
