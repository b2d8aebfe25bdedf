pub mod ebb;
pub mod gcode;
pub mod sbp;
pub mod types;

pub use ebb::lower_ebb;
pub use gcode::lower_gcode;
pub use sbp::lower_sbp;
pub use types::{Dialect, Instruction, InstructionArgs, LoweringError, MachineState, Operation, Toolpath, Units};

/// Lower a toolpath in any supported dialect into normalized instructions.
pub fn lower(toolpath: &Toolpath) -> Result<Vec<Instruction>, LoweringError> {
    match toolpath.dialect {
        Dialect::GCode => lower_gcode(&toolpath.lines),
        Dialect::Ebb => lower_ebb(&toolpath.lines),
        Dialect::Sbp => lower_sbp(&toolpath.lines),
    }
}
