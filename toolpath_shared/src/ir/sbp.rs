//! ShopBot (SBP) motion dialect lowering.

use super::types::{Instruction, InstructionArgs, LoweringError, MachineState, Operation};

fn float_arg(tokens: &[&str], index: usize, line: usize) -> Result<f64, LoweringError> {
    let token = tokens.get(index).map(|t| t.trim()).ok_or_else(|| LoweringError::MissingArgument {
        line,
        opcode: tokens[0].trim().to_string(),
        index,
    })?;
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| LoweringError::InvalidNumber { line, token: token.to_string() })
}

/// Optional trailing argument: absent or empty means `None`.
fn optional_arg(tokens: &[&str], index: usize, line: usize) -> Result<Option<f64>, LoweringError> {
    match tokens.get(index).map(|t| t.trim()) {
        None | Some("") => Ok(None),
        Some(_) => float_arg(tokens, index, line).map(Some),
    }
}

pub fn lower_sbp<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Instruction>, LoweringError> {
    let mut out = Vec::new();
    // single-axis commands keep the other axes where they are
    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    for (idx, raw) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('\'') {
            continue;
        }
        let tokens: Vec<&str> = trimmed.split(',').collect();
        let opcode = tokens[0].trim().to_uppercase();
        let state = MachineState { units: None, tool_on_bed: true, clockwise: None };
        let op = match opcode.as_str() {
            "M2" | "J2" => {
                x = float_arg(&tokens, 1, line_no)?;
                y = float_arg(&tokens, 2, line_no)?;
                Operation::Move
            }
            "M3" | "J3" => {
                x = float_arg(&tokens, 1, line_no)?;
                y = float_arg(&tokens, 2, line_no)?;
                z = float_arg(&tokens, 3, line_no)?;
                Operation::Move
            }
            "MX" | "JX" => {
                x = float_arg(&tokens, 1, line_no)?;
                Operation::Move
            }
            "MY" | "JY" => {
                y = float_arg(&tokens, 1, line_no)?;
                Operation::Move
            }
            "MZ" | "JZ" => {
                z = float_arg(&tokens, 1, line_no)?;
                Operation::Move
            }
            "CG" => {
                // CG,dia,x,y,i,j,outin,dir,...
                x = float_arg(&tokens, 2, line_no)?;
                y = float_arg(&tokens, 3, line_no)?;
                let args = InstructionArgs {
                    x: Some(x),
                    y: Some(y),
                    z: Some(z),
                    f: None,
                    dx: optional_arg(&tokens, 4, line_no)?,
                    dy: optional_arg(&tokens, 5, line_no)?,
                };
                let clockwise = optional_arg(&tokens, 7, line_no)?.map(|dir| dir == 1.0);
                out.push(Instruction::new(Operation::Arc, &opcode, raw, args, MachineState { clockwise, ..state }));
                continue;
            }
            other => {
                tracing::warn!("Skipping SBP command '{}' on line {}", other, line_no);
                continue;
            }
        };
        let args = InstructionArgs { x: Some(x), y: Some(y), z: Some(z), ..Default::default() };
        out.push(Instruction::new(op, &opcode, raw, args, state));
    }
    tracing::debug!("Lowered {} SBP lines into {} instructions", lines.len(), out.len());
    Ok(out)
}
