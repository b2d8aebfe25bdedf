//! G-code subset lowering: G0/G1 linear moves, G2/G3 arcs, G20/G21 units.

use super::types::{Instruction, InstructionArgs, LoweringError, MachineState, Operation, Units};

/// A single `<letter><number>` word with its raw value text.
#[derive(Debug, Clone, PartialEq)]
struct Word<'a> {
    letter: char,
    value: &'a str,
}

/// Drop `;` line comments and `( ... )` inline comments.
fn strip_comments(line: &str) -> String {
    let code = line.split(';').next().unwrap_or("");
    let mut out = String::with_capacity(code.len());
    let mut depth = 0usize;
    for c in code.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Split a comment-free line into words. Values are plain decimals: G-code has
/// no exponent notation, and `E` is the extruder word, so `X1E3` is the two
/// words `X1` and `E3`.
fn words(code: &str) -> Vec<Word<'_>> {
    let bytes = code.as_bytes();
    let len = bytes.len();
    let mut pos = 0;
    let mut out = Vec::new();
    while pos < len {
        let c = bytes[pos] as char;
        if !c.is_ascii_alphabetic() {
            pos += 1;
            continue;
        }
        pos += 1;
        let value_start = pos;
        while pos < len && (bytes[pos].is_ascii_digit() || matches!(bytes[pos], b'.' | b'-' | b'+' | b' ')) {
            // spaces are allowed only between a letter and its number
            if bytes[pos] == b' ' && code[value_start..pos].trim().len() > 0 {
                break;
            }
            pos += 1;
        }
        out.push(Word { letter: c.to_ascii_uppercase(), value: code[value_start..pos].trim() });
    }
    out
}

fn number(word: &Word<'_>, line: usize) -> Result<f64, LoweringError> {
    word.value
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| LoweringError::InvalidNumber {
            line,
            token: format!("{}{}", word.letter, word.value),
        })
}

fn find_arg(words: &[Word<'_>], letter: char, line: usize) -> Result<Option<f64>, LoweringError> {
    words
        .iter()
        .find(|w| w.letter == letter)
        .map(|w| number(w, line))
        .transpose()
}

pub fn lower_gcode<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Instruction>, LoweringError> {
    let mut out = Vec::new();
    let mut units = None;
    for (idx, raw) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let raw = raw.as_ref();
        let code = strip_comments(raw);
        let words = words(&code);
        let Some(command) = words.iter().find(|w| w.letter == 'G' || w.letter == 'M') else {
            continue;
        };
        if command.letter != 'G' {
            continue;
        }
        let code_number = number(command, line_no)?;
        let opcode = format!("G{}", code_number);
        match code_number as i64 {
            20 => units = Some(Units::Inches),
            21 => units = Some(Units::Millimeters),
            0 | 1 => {
                let args = InstructionArgs {
                    x: find_arg(&words, 'X', line_no)?,
                    y: find_arg(&words, 'Y', line_no)?,
                    z: find_arg(&words, 'Z', line_no)?,
                    f: find_arg(&words, 'F', line_no)?,
                    dx: None,
                    dy: None,
                };
                let state = MachineState { units, tool_on_bed: true, clockwise: None };
                out.push(Instruction::new(Operation::Move, &opcode, raw, args, state));
            }
            2 | 3 => {
                let args = InstructionArgs {
                    x: find_arg(&words, 'X', line_no)?,
                    y: find_arg(&words, 'Y', line_no)?,
                    z: find_arg(&words, 'Z', line_no)?,
                    f: find_arg(&words, 'F', line_no)?,
                    dx: find_arg(&words, 'I', line_no)?,
                    dy: find_arg(&words, 'J', line_no)?,
                };
                let clockwise = Some(code_number as i64 == 2);
                let state = MachineState { units, tool_on_bed: true, clockwise };
                out.push(Instruction::new(Operation::Arc, &opcode, raw, args, state));
            }
            other => tracing::trace!("Skipping G{} on line {}", other, line_no),
        }
    }
    tracing::debug!("Lowered {} G-code lines into {} instructions", lines.len(), out.len());
    Ok(out)
}
