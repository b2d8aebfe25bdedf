// toolpath_shared::motion::profile - constant-acceleration kinematic profile solver
//
// A profile is the five quantities {v0, v, a, t, x} of one constant-acceleration
// phase. Given any three, the other two follow in closed form:
//
//     v = v0 + a*t
//     x = v0*t + a*t^2/2 = t*(v0 + v)/2
//     v^2 = v0^2 + 2*a*x

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Radicands this close to zero (relative to their terms) are rounding noise.
const RADICAND_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("Malformed profile request: expected exactly 2 unknowns, got {unknowns}")]
    Malformed { unknowns: usize },
    #[error("Malformed profile request: known {quantity} is infinite")]
    InfiniteInput { quantity: &'static str },
    #[error("Motion not achievable: negative radicand {radicand} while solving {quantity}")]
    NegativeRadicand { radicand: f64, quantity: &'static str },
    #[error("Division by zero while solving {quantity}")]
    DivisionByZero { quantity: &'static str },
    #[error("Non-finite {quantity} in solved profile")]
    NonFinite { quantity: &'static str },
}

/// One constant-acceleration phase along a segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicProfile {
    /// Initial velocity
    pub v0: f64,
    /// Final velocity
    pub v: f64,
    /// Acceleration
    pub a: f64,
    /// Duration
    pub t: f64,
    /// Distance along the segment direction
    pub x: f64,
}

/// A solve request keyed by which two quantities are unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileQuery {
    MissingV0V { a: f64, t: f64, x: f64 },
    MissingV0A { v: f64, t: f64, x: f64 },
    MissingV0T { v: f64, a: f64, x: f64 },
    MissingV0X { v: f64, a: f64, t: f64 },
    MissingVA { v0: f64, t: f64, x: f64 },
    MissingVT { v0: f64, a: f64, x: f64 },
    MissingVX { v0: f64, a: f64, t: f64 },
    MissingAT { v0: f64, v: f64, x: f64 },
    MissingAX { v0: f64, v: f64, t: f64 },
    MissingTX { v0: f64, v: f64, a: f64 },
}

impl ProfileQuery {
    /// Classify five optional slots. `None` and NaN both count as unknown;
    /// anything other than exactly two unknowns, or an infinite known value,
    /// is a malformed request.
    pub fn from_slots(
        v0: Option<f64>,
        v: Option<f64>,
        a: Option<f64>,
        t: Option<f64>,
        x: Option<f64>,
    ) -> Result<Self, ProfileError> {
        let known = |slot: Option<f64>| slot.filter(|value| !value.is_nan());
        let slots = [known(v0), known(v), known(a), known(t), known(x)];
        let unknowns = slots.iter().filter(|slot| slot.is_none()).count();
        if unknowns != 2 {
            return Err(ProfileError::Malformed { unknowns });
        }
        let names = ["v0", "v", "a", "t", "x"];
        if let Some((quantity, _)) = names.iter().zip(slots).find(|(_, slot)| slot.is_some_and(f64::is_infinite)) {
            return Err(ProfileError::InfiniteInput { quantity: *quantity });
        }
        let query = match slots {
            [None, None, Some(a), Some(t), Some(x)] => Self::MissingV0V { a, t, x },
            [None, Some(v), None, Some(t), Some(x)] => Self::MissingV0A { v, t, x },
            [None, Some(v), Some(a), None, Some(x)] => Self::MissingV0T { v, a, x },
            [None, Some(v), Some(a), Some(t), None] => Self::MissingV0X { v, a, t },
            [Some(v0), None, None, Some(t), Some(x)] => Self::MissingVA { v0, t, x },
            [Some(v0), None, Some(a), None, Some(x)] => Self::MissingVT { v0, a, x },
            [Some(v0), None, Some(a), Some(t), None] => Self::MissingVX { v0, a, t },
            [Some(v0), Some(v), None, None, Some(x)] => Self::MissingAT { v0, v, x },
            [Some(v0), Some(v), None, Some(t), None] => Self::MissingAX { v0, v, t },
            [Some(v0), Some(v), Some(a), None, None] => Self::MissingTX { v0, v, a },
            _ => return Err(ProfileError::Malformed { unknowns }),
        };
        Ok(query)
    }

    pub fn solve(self) -> Result<KinematicProfile, ProfileError> {
        let profile = match self {
            Self::MissingV0V { a, t, x } => {
                let v0 = divide(x, t, "v0")? - a * t / 2.0;
                KinematicProfile { v0, v: v0 + a * t, a, t, x }
            }
            Self::MissingV0A { v, t, x } => {
                let v0 = divide(2.0 * x, t, "v0")? - v;
                KinematicProfile { v0, v, a: divide(v - v0, t, "a")?, t, x }
            }
            Self::MissingV0T { v, a, x } => {
                let v0 = checked_sqrt(v * v, -2.0 * a * x, "v0")?;
                KinematicProfile { v0, v, a, t: time_from_velocities(v0, v, a, x)?, x }
            }
            Self::MissingV0X { v, a, t } => {
                let v0 = v - a * t;
                KinematicProfile { v0, v, a, t, x: t * (v0 + v) / 2.0 }
            }
            Self::MissingVA { v0, t, x } => {
                let v = divide(2.0 * x, t, "v")? - v0;
                KinematicProfile { v0, v, a: divide(v - v0, t, "a")?, t, x }
            }
            Self::MissingVT { v0, a, x } => {
                let v = checked_sqrt(v0 * v0, 2.0 * a * x, "v")?;
                KinematicProfile { v0, v, a, t: time_from_velocities(v0, v, a, x)?, x }
            }
            Self::MissingVX { v0, a, t } => {
                let v = v0 + a * t;
                KinematicProfile { v0, v, a, t, x: t * (v0 + v) / 2.0 }
            }
            Self::MissingAT { v0, v, x } => {
                // Zero net velocity over zero distance is a zero-length, zero-time phase.
                if v0 + v == 0.0 && x == 0.0 {
                    KinematicProfile { v0, v, a: 0.0, t: 0.0, x }
                } else {
                    let t = divide(2.0 * x, v0 + v, "t")?;
                    KinematicProfile { v0, v, a: rate(v - v0, t, "a")?, t, x }
                }
            }
            Self::MissingAX { v0, v, t } => {
                KinematicProfile { v0, v, a: rate(v - v0, t, "a")?, t, x: t * (v0 + v) / 2.0 }
            }
            Self::MissingTX { v0, v, a } => {
                let t = divide(v - v0, a, "t")?;
                KinematicProfile { v0, v, a, t, x: t * (v0 + v) / 2.0 }
            }
        };
        profile.ensure_finite()
    }
}

impl KinematicProfile {
    pub fn new(v0: f64, v: f64, a: f64, t: f64, x: f64) -> Self {
        Self { v0, v, a, t, x }
    }

    /// Slot-based entry point: exactly two of the arguments must be `None`.
    pub fn solve(
        v0: Option<f64>,
        v: Option<f64>,
        a: Option<f64>,
        t: Option<f64>,
        x: Option<f64>,
    ) -> Result<Self, ProfileError> {
        ProfileQuery::from_slots(v0, v, a, t, x)?.solve()
    }

    /// The same motion played backwards in time.
    pub fn reversed(&self) -> Self {
        Self { v0: self.v, v: self.v0, a: -self.a, t: self.t, x: self.x }
    }

    fn ensure_finite(self) -> Result<Self, ProfileError> {
        for (quantity, value) in [("v0", self.v0), ("v", self.v), ("a", self.a), ("t", self.t), ("x", self.x)] {
            if !value.is_finite() {
                return Err(ProfileError::NonFinite { quantity });
            }
        }
        Ok(self)
    }
}

fn divide(numerator: f64, denominator: f64, quantity: &'static str) -> Result<f64, ProfileError> {
    if denominator == 0.0 {
        return Err(ProfileError::DivisionByZero { quantity });
    }
    Ok(numerator / denominator)
}

/// `delta / t`, except a zero change over zero time is a zero rate.
fn rate(delta: f64, t: f64, quantity: &'static str) -> Result<f64, ProfileError> {
    if t == 0.0 && delta == 0.0 {
        return Ok(0.0);
    }
    divide(delta, t, quantity)
}

/// `sqrt(base + term)`; slightly negative sums from rounding clamp to zero.
fn checked_sqrt(base: f64, term: f64, quantity: &'static str) -> Result<f64, ProfileError> {
    let radicand = base + term;
    if radicand >= 0.0 {
        return Ok(radicand.sqrt());
    }
    let scale = base.abs().max(term.abs()).max(1.0);
    if radicand > -RADICAND_TOLERANCE * scale {
        return Ok(0.0);
    }
    Err(ProfileError::NegativeRadicand { radicand, quantity })
}

/// Duration between two velocities; at zero acceleration the phase is a cruise.
fn time_from_velocities(v0: f64, v: f64, a: f64, x: f64) -> Result<f64, ProfileError> {
    if a == 0.0 {
        divide(2.0 * x, v0 + v, "t")
    } else {
        Ok((v - v0) / a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_profile_eq(actual: &KinematicProfile, expected: &KinematicProfile) {
        for (name, lhs, rhs) in [
            ("v0", actual.v0, expected.v0),
            ("v", actual.v, expected.v),
            ("a", actual.a, expected.a),
            ("t", actual.t, expected.t),
            ("x", actual.x, expected.x),
        ] {
            assert!((lhs - rhs).abs() < EPS, "{} mismatch: {} vs {}", name, lhs, rhs);
        }
    }

    #[test]
    fn test_every_omission_pattern_recovers_the_profile() {
        // v = 2 + 1.5*2, x = 2*2 + 0.75*4
        let reference = KinematicProfile::new(2.0, 5.0, 1.5, 2.0, 7.0);
        let slots = [reference.v0, reference.v, reference.a, reference.t, reference.x];
        let mut patterns = 0;
        for first in 0..5 {
            for second in (first + 1)..5 {
                let pick = |i: usize| if i == first || i == second { None } else { Some(slots[i]) };
                let solved = KinematicProfile::solve(pick(0), pick(1), pick(2), pick(3), pick(4)).unwrap();
                assert_profile_eq(&solved, &reference);
                patterns += 1;
            }
        }
        assert_eq!(patterns, 10);
    }

    #[test]
    fn test_solved_profile_satisfies_motion_equations() {
        let p = ProfileQuery::MissingVT { v0: 1.0, a: 3.0, x: 4.0 }.solve().unwrap();
        assert!((p.v - p.v0 - p.a * p.t).abs() < EPS);
        assert!((p.x - (p.v0 * p.t + 0.5 * p.a * p.t * p.t)).abs() < EPS);
    }

    #[test]
    fn test_wrong_unknown_count_is_malformed() {
        let err = KinematicProfile::solve(Some(1.0), None, None, None, Some(1.0)).unwrap_err();
        assert_eq!(err, ProfileError::Malformed { unknowns: 3 });
        let err = KinematicProfile::solve(Some(1.0), Some(1.0), Some(0.0), Some(1.0), Some(1.0)).unwrap_err();
        assert_eq!(err, ProfileError::Malformed { unknowns: 0 });
    }

    #[test]
    fn test_nan_counts_as_unknown() {
        let p = KinematicProfile::solve(Some(0.0), Some(f64::NAN), Some(2.0), None, Some(1.0)).unwrap();
        assert!((p.v - 2.0).abs() < EPS);
        assert!((p.t - 1.0).abs() < EPS);
    }

    #[test]
    fn test_infinite_known_value_is_malformed() {
        let err = KinematicProfile::solve(Some(f64::INFINITY), None, Some(1.0), None, Some(1.0)).unwrap_err();
        assert_eq!(err, ProfileError::InfiniteInput { quantity: "v0" });
        let err = KinematicProfile::solve(Some(1.0), None, None, Some(2.0), Some(f64::NEG_INFINITY)).unwrap_err();
        assert_eq!(err, ProfileError::InfiniteInput { quantity: "x" });
        assert!(err.to_string().contains("known x is infinite"));
    }

    #[test]
    fn test_unreachable_deceleration_reports_negative_radicand() {
        // Braking at 1 over 10 units from 1 would need v^2 = 1 - 20.
        let err = ProfileQuery::MissingVT { v0: 1.0, a: -1.0, x: 10.0 }.solve().unwrap_err();
        assert!(matches!(err, ProfileError::NegativeRadicand { quantity: "v", .. }));
    }

    #[test]
    fn test_rounding_noise_in_radicand_clamps_to_stop() {
        // 10^2 - 2*5*10 is zero exactly; nudge it negative by one ulp-ish amount.
        let p = ProfileQuery::MissingVT { v0: 10.0, a: -5.0, x: 10.000000000000002 }.solve().unwrap();
        assert_eq!(p.v, 0.0);
        assert!((p.t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_velocity_branch_zero_sum() {
        let p = ProfileQuery::MissingAT { v0: 0.0, v: 0.0, x: 0.0 }.solve().unwrap();
        assert_eq!(p, KinematicProfile::new(0.0, 0.0, 0.0, 0.0, 0.0));

        let err = ProfileQuery::MissingAT { v0: 0.0, v: 0.0, x: 1.0 }.solve().unwrap_err();
        assert_eq!(err, ProfileError::DivisionByZero { quantity: "t" });
    }

    #[test]
    fn test_instant_velocity_change_is_rejected() {
        let err = ProfileQuery::MissingAT { v0: 1.0, v: 3.0, x: 0.0 }.solve().unwrap_err();
        assert_eq!(err, ProfileError::DivisionByZero { quantity: "a" });
    }

    #[test]
    fn test_cruise_with_zero_acceleration() {
        let p = ProfileQuery::MissingVT { v0: 4.0, a: 0.0, x: 8.0 }.solve().unwrap();
        assert_eq!(p.v, 4.0);
        assert!((p.t - 2.0).abs() < EPS);

        let p = ProfileQuery::MissingV0T { v: 4.0, a: 0.0, x: 8.0 }.solve().unwrap();
        assert_eq!(p.v0, 4.0);
        assert!((p.t - 2.0).abs() < EPS);
    }

    #[test]
    fn test_time_from_velocities_without_acceleration_fails() {
        let err = ProfileQuery::MissingTX { v0: 2.0, v: 2.0, a: 0.0 }.solve().unwrap_err();
        assert_eq!(err, ProfileError::DivisionByZero { quantity: "t" });
    }

    #[test]
    fn test_reversed_profile() {
        let p = KinematicProfile::new(1.0, 3.0, 2.0, 1.0, 2.0);
        let r = p.reversed();
        assert_eq!(r, KinematicProfile::new(3.0, 1.0, -2.0, 1.0, 2.0));
        assert_eq!(r.reversed(), p);
    }
}
