// toolpath_shared::motion::junction - cornering speed from the junction deviation model

use super::geometry::PlanarSegment;
use crate::config::KinematicLimits;

/// Cosine bound beyond which a junction counts as a straight join or a full reversal.
const COLINEAR_COS: f64 = 0.9999;

/// Maximum speed the machine may carry from `prev` into `next`.
///
/// `cos_theta` is taken between the reversed incoming direction and the
/// outgoing direction, so a straight continuation sits at -1 and a full
/// reversal at +1. Straight joins impose no constraint (`None`); reversals
/// fall back to the configured junction speed. Everything in between uses
/// the deviation radius `r = d * sin(theta/2) / (1 - sin(theta/2))` of the
/// arc tangent to both moves, scaled by the acceleration available along the
/// turn direction, and never drops below the junction speed.
pub fn junction_velocity(prev: &PlanarSegment, next: &PlanarSegment, limits: &KinematicLimits) -> Option<f64> {
    let cos_theta = -next.unit.planar_dot(&prev.unit);
    if cos_theta > COLINEAR_COS {
        return Some(limits.junction_speed);
    }
    if cos_theta < -COLINEAR_COS {
        return None;
    }
    let turn = next.unit - prev.unit;
    let turn = turn.scale(1.0 / turn.norm());
    let junction_acceleration = turn.limit_by_axis(&limits.a_max);
    let sin_theta_d2 = (0.5 * (1.0 - cos_theta)).sqrt();
    let velocity = (junction_acceleration * limits.junction_deviation * sin_theta_d2) / (1.0 - sin_theta_d2);
    tracing::trace!(
        "Junction {} -> {}: cos_theta={:.4} velocity={:.4}",
        prev.parent, next.parent, cos_theta, velocity
    );
    Some(velocity.max(limits.junction_speed))
}
