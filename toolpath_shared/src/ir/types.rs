//! Normalized instruction records produced by dialect lowering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Move,
    Arc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Millimeters,
    Inches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    GCode,
    Ebb,
    Sbp,
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcode" | "g-code" | "nc" => Ok(Dialect::GCode),
            "ebb" => Ok(Dialect::Ebb),
            "sbp" | "shopbot" => Ok(Dialect::Sbp),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}

/// Optional operands of an instruction. Absent words stay `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InstructionArgs {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    /// Feed rate
    pub f: Option<f64>,
    /// Arc center offset, x
    pub dx: Option<f64>,
    /// Arc center offset, y
    pub dy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachineState {
    pub units: Option<Units>,
    pub tool_on_bed: bool,
    pub clockwise: Option<bool>,
}

/// One lowered command. The planner reads the target coordinates and keeps
/// the rest for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: Operation,
    pub opcode: String,
    pub original: String,
    pub args: InstructionArgs,
    pub state: MachineState,
}

impl Instruction {
    pub fn new(op: Operation, opcode: &str, original: &str, args: InstructionArgs, state: MachineState) -> Self {
        Self {
            op,
            opcode: opcode.to_string(),
            original: original.to_string(),
            args,
            state,
        }
    }

    /// Horizontal target, when the record carries both coordinates.
    pub fn planar_target(&self) -> Option<(f64, f64)> {
        self.args.x.zip(self.args.y)
    }

    /// A record without both horizontal coordinates has no place on the bed.
    pub fn is_null_move(&self) -> bool {
        self.planar_target().is_none()
    }
}

/// Source text of a toolpath in one of the supported dialects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toolpath {
    pub dialect: Dialect,
    pub lines: Vec<String>,
}

impl Toolpath {
    pub fn new<S: AsRef<str>>(dialect: Dialect, lines: &[S]) -> Self {
        Self {
            dialect,
            lines: lines.iter().map(|line| line.as_ref().to_string()).collect(),
        }
    }

    pub fn from_source(dialect: Dialect, source: &str) -> Self {
        Self {
            dialect,
            lines: source.lines().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoweringError {
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: {opcode} is missing argument {index}")]
    MissingArgument { line: usize, opcode: String, index: usize },
}
