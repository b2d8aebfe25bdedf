// Integration tests for dialect lowering feeding the planner

#[cfg(test)]
mod tests {
    use toolpath_shared::config::KinematicLimits;
    use toolpath_shared::ir::{Dialect, LoweringError, Operation, Toolpath, Units, lower};
    use toolpath_shared::motion::PlanOptions;
    use toolpath_shared::trajectory::{TrajectoryError, compute_toolpath};

    const GCODE: &str = "\
G21 (metric)
G0 Z5
G0 X0 Y0
G1 X20 Y0 F600 ; first cut
G2 X20 Y10 I0 J5
G1 Z-1
G1 X0 Y10
";

    #[test]
    fn test_gcode_lowering_keeps_only_motion() {
        let instructions = lower(&Toolpath::from_source(Dialect::GCode, GCODE)).unwrap();
        assert_eq!(instructions.len(), 6);
        assert!(instructions.iter().all(|ir| ir.state.units == Some(Units::Millimeters)));

        // Z-only lines lower to null moves
        assert!(instructions[0].is_null_move());
        assert!(instructions[4].is_null_move());

        let arc = &instructions[3];
        assert_eq!(arc.op, Operation::Arc);
        assert_eq!(arc.state.clockwise, Some(true));
        assert_eq!(arc.args.dx, Some(0.0));
        assert_eq!(arc.args.dy, Some(5.0));
        assert_eq!(instructions[2].args.f, Some(600.0));
    }

    #[test]
    fn test_gcode_plans_around_null_moves() {
        let tp = Toolpath::from_source(Dialect::GCode, GCODE);
        let result = compute_toolpath(&tp, &KinematicLimits::default(), PlanOptions::default()).unwrap();
        // G0 X0 Y0 is sampled but sits on the origin
        assert_eq!(result.samples.len(), 4);
        assert_eq!(result.geometry.len(), 3);
        assert!((result.total_distance() - 50.0).abs() < 1e-9);
        // Z-only lines are dropped whole, so their depth never reaches a sample
        assert!(result.geometry.iter().all(|s| s.end.z == 0.0));
    }

    #[test]
    fn test_ebb_steps_accumulate_into_absolute_positions() {
        let tp = Toolpath::new(Dialect::Ebb, &["SP,0", "SM,100,800,800", "SM,100,-800,800", "SP,1"]);
        let instructions = lower(&tp).unwrap();
        assert_eq!(instructions.len(), 4);
        assert!(instructions[1].state.tool_on_bed);
        assert_eq!(instructions[1].args.x, Some(10.0));
        assert_eq!(instructions[1].args.y, Some(0.0));
        assert_eq!(instructions[2].args.x, Some(10.0));
        assert_eq!(instructions[2].args.y, Some(10.0));
        assert!(!instructions[3].state.tool_on_bed);

        let result = compute_toolpath(&tp, &KinematicLimits::default(), PlanOptions::default()).unwrap();
        // pen changes do not move the tool
        assert_eq!(result.geometry.len(), 2);
        assert!((result.total_distance() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_sbp_single_axis_moves_are_modal() {
        let tp = Toolpath::new(Dialect::Sbp, &["' square", "M2, 4, 0", "MY, 4", "MX, 0", "", "MY, 0"]);
        let instructions = lower(&tp).unwrap();
        assert_eq!(instructions.len(), 4);
        assert_eq!((instructions[1].args.x, instructions[1].args.y), (Some(4.0), Some(4.0)));
        assert_eq!((instructions[2].args.x, instructions[2].args.y), (Some(0.0), Some(4.0)));

        let result = compute_toolpath(&tp, &KinematicLimits::default(), PlanOptions::default()).unwrap();
        assert!((result.total_distance() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_numbers_report_their_line() {
        let tp = Toolpath::new(Dialect::GCode, &["G21", "G1 X1 Y2", "G1 X1..5 Y2"]);
        let err = lower(&tp).unwrap_err();
        assert_eq!(err, LoweringError::InvalidNumber { line: 3, token: "X1..5".to_string() });

        let planned = compute_toolpath(&tp, &KinematicLimits::default(), PlanOptions::default());
        assert!(matches!(planned, Err(TrajectoryError::Lowering(_))));
    }

    #[test]
    fn test_non_finite_sbp_coordinate_fails_at_its_line() {
        let tp = Toolpath::new(Dialect::Sbp, &["M2, 1, 1", "M2, nan, 0"]);
        let planned = compute_toolpath(&tp, &KinematicLimits::default(), PlanOptions::default());
        assert!(matches!(
            planned,
            Err(TrajectoryError::Lowering(LoweringError::InvalidNumber { line: 2, .. }))
        ));
    }

    #[test]
    fn test_huge_ebb_step_counts_lower_without_panicking() {
        let tp = Toolpath::new(Dialect::Ebb, &["SM,1,9223372036854775807,1"]);
        let instructions = lower(&tp).unwrap();
        assert!(instructions[0].args.x.unwrap().is_finite());
    }

    #[test]
    fn test_sbp_missing_argument() {
        let tp = Toolpath::new(Dialect::Sbp, &["M3, 1, 2"]);
        assert!(matches!(
            lower(&tp),
            Err(LoweringError::MissingArgument { line: 1, index: 3, .. })
        ));
    }
}
