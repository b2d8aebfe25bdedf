//! EBB (EiBotBoard) stepper-pulse stream lowering.
//!
//! `SM,<duration>,<a_steps>,<b_steps>` moves the two mixed-axis motors by a
//! relative step count; `SP,<value>` raises or lowers the pen. Positions are
//! accumulated and emitted as absolute moves.

use super::types::{Instruction, InstructionArgs, LoweringError, MachineState, Operation};

const STEPS_PER_MM: f64 = 80.0;

/// Convert mixed-axis motor steps to a cartesian change in millimeters.
pub fn steps_to_mm(a_steps: i64, b_steps: i64) -> (f64, f64) {
    let (a, b) = (a_steps as f64, b_steps as f64);
    let x = 0.5 * (a + b);
    let y = -0.5 * (a - b);
    (x / STEPS_PER_MM, y / STEPS_PER_MM)
}

fn int_arg(tokens: &[&str], index: usize, line: usize) -> Result<i64, LoweringError> {
    let token = tokens.get(index).ok_or_else(|| LoweringError::MissingArgument {
        line,
        opcode: tokens[0].to_string(),
        index,
    })?;
    token.trim().parse::<i64>().map_err(|_| LoweringError::InvalidNumber {
        line,
        token: token.trim().to_string(),
    })
}

pub fn lower_ebb<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Instruction>, LoweringError> {
    let mut out = Vec::new();
    let (mut x, mut y, z) = (0.0, 0.0, 0.0);
    let mut tool_on_bed = false;
    for (idx, raw) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let raw = raw.as_ref();
        let tokens: Vec<&str> = raw.trim().split(',').collect();
        match tokens[0].trim() {
            "SM" => {
                let (dx, dy) = steps_to_mm(int_arg(&tokens, 2, line_no)?, int_arg(&tokens, 3, line_no)?);
                x += dx;
                y += dy;
                let args = InstructionArgs { x: Some(x), y: Some(y), z: Some(z), ..Default::default() };
                let state = MachineState { units: None, tool_on_bed, clockwise: None };
                out.push(Instruction::new(Operation::Move, "SM", raw, args, state));
            }
            "SP" => {
                tool_on_bed = int_arg(&tokens, 1, line_no)? == 0;
                let args = InstructionArgs { x: Some(x), y: Some(y), z: Some(z), ..Default::default() };
                let state = MachineState { units: None, tool_on_bed, clockwise: None };
                out.push(Instruction::new(Operation::Move, "SP", raw, args, state));
            }
            "" => {}
            other => tracing::trace!("Skipping EBB command '{}' on line {}", other, line_no),
        }
    }
    tracing::debug!("Lowered {} EBB lines into {} instructions", lines.len(), out.len());
    Ok(out)
}
