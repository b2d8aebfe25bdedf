// src/builtin.rs - Demo toolpaths shipped with the binary

use toolpath_shared::ir::{Dialect, Toolpath};

const LINE: &[&str] = &["M2, 0, 0", "M2, 10, 10"];
const RECTANGLE: &[&str] = &["M2, 0, 0", "M2, 10, 0", "M2, 10, 5", "M2, 0, 5", "M2, 0, 0"];
const TRIANGLE: &[&str] = &["M2, 0, 0", "M2, 10, 0", "M2, 5, 5", "M2, 0, 0"];
const STAR: &[&str] = &[
    "M2, 5.0, 0",
    "M2, 6.5, 3.5",
    "M2, 10.0, 3.5",
    "M2, 7.5, 6.0",
    "M2, 9.0, 9.5",
    "M2, 5.0, 7.5",
    "M2, 1.0, 9.5",
    "M2, 2.5, 6.0",
    "M2, 0, 3.5",
    "M2, 3.5, 3.5",
    "M2, 5.0, 0",
];

/// Name and SBP source of every built-in shape.
pub const BUILTINS: &[(&str, &[&str])] = &[
    ("line", LINE),
    ("rectangle", RECTANGLE),
    ("triangle", TRIANGLE),
    ("star", STAR),
];

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

pub fn builtin_toolpath(name: &str) -> Option<Toolpath> {
    BUILTINS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|&(_, lines)| Toolpath::new(Dialect::Sbp, lines))
}
