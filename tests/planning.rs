// End-to-end planning of the built-in toolpaths

#[cfg(test)]
mod tests {
    use toolpath_rs::builtin::{builtin_names, builtin_toolpath};
    use toolpath_shared::config::KinematicLimits;
    use toolpath_shared::motion::{PlanOptions, PlanarSegment, junction_velocity};
    use toolpath_shared::trajectory::{TrajectoryResult, compute_toolpath};
    use toolpath_shared::vector::Vec3;

    const EPS: f64 = 1e-6;

    fn plan(name: &str, limits: &KinematicLimits) -> TrajectoryResult {
        let toolpath = builtin_toolpath(name).unwrap();
        compute_toolpath(&toolpath, limits, PlanOptions::default()).unwrap()
    }

    fn tight_limits() -> KinematicLimits {
        KinematicLimits::new(Vec3::new(10.0, 10.0, 10.0), Vec3::new(10.0, 10.0, 10.0), 1.0, 0.05).unwrap()
    }

    fn check_invariants(segments: &[PlanarSegment], limits: &KinematicLimits) {
        for segment in segments {
            let cap = segment.axis_limited_speed(limits);
            assert!(segment.profile.a.abs() <= segment.max_acceleration + EPS);
            assert!(segment.profile.v0 <= cap + EPS);
            assert!(segment.profile.v <= cap + EPS);
            assert!(segment.profile.t >= 0.0);
        }
        for pair in segments.windows(2) {
            assert!((pair[0].profile.v - pair[1].profile.v0).abs() < EPS);
            assert!((pair[0].end - pair[1].start).norm() < EPS);
        }
        let first = segments.first().unwrap();
        let last = segments.last().unwrap();
        assert!(first.profile.v0.abs() < EPS);
        assert!(last.profile.v.abs() < EPS);
    }

    #[test]
    fn test_every_builtin_plans_within_limits() {
        for limits in [KinematicLimits::default(), tight_limits()] {
            for name in builtin_names() {
                let result = plan(name, &limits);
                check_invariants(&result.planned, &limits);
                let path_length: f64 = result.geometry.iter().map(|s| s.length()).sum();
                assert!((result.total_distance() - path_length).abs() < 1e-9, "{} distance", name);
            }
        }
    }

    #[test]
    fn test_diagonal_line_is_capped_by_planar_speed() {
        let result = plan("line", &KinematicLimits::default());
        assert_eq!(result.geometry.len(), 1);
        assert!((result.total_distance() - 200.0_f64.sqrt()).abs() < 1e-9);
        assert!((result.peak_velocity() - 10.0).abs() < EPS);
        // ramp, cruise, ramp
        assert_eq!(result.planned.len(), 3);
    }

    #[test]
    fn test_rectangle_corners_slow_to_junction_speed() {
        let limits = tight_limits();
        let result = plan("rectangle", &limits);
        for pair in result.geometry.windows(2) {
            let jv = junction_velocity(&pair[0], &pair[1], &limits).unwrap();
            assert!(jv < 2.0);
            let corner = result.planned.iter().find(|s| s.start == pair[1].start).unwrap();
            assert!((corner.profile.v0 - jv).abs() < EPS);
        }
    }

    #[test]
    fn test_generous_deviation_keeps_full_speed_through_corners() {
        let result = plan("rectangle", &KinematicLimits::default());
        let corner = result.planned.iter().find(|s| s.start == Vec3::new(10.0, 0.0, 0.0)).unwrap();
        assert!((corner.profile.v0 - 10.0).abs() < EPS);
    }

    #[test]
    fn test_tighter_corners_take_longer() {
        let fast = plan("star", &KinematicLimits::default());
        let slow = plan("star", &tight_limits());
        assert!(slow.total_time() > fast.total_time());
        assert!((slow.total_distance() - fast.total_distance()).abs() < 1e-9);
    }

    #[test]
    fn test_every_stage_covers_the_same_path() {
        let result = plan("triangle", &tight_limits());
        assert_eq!(result.samples.len(), 4);
        assert_eq!(result.geometry.len(), 3);
        for stage in [&result.geometry, &result.forward, &result.planned] {
            let distance: f64 = stage.iter().map(|s| s.profile.x).sum();
            assert!((distance - result.total_distance()).abs() < 1e-9);
        }
        let timeline = result.timeline();
        assert_eq!(timeline.len(), result.planned.len());
        assert!(timeline.windows(2).all(|w| w[1] >= w[0]));
    }
}
