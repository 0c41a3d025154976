//! Opcode table.

use core::fmt;

/// Every opcode the interpreter handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// G0: rapid move, executed as a linear move.
    RapidMove,
    /// G1: controlled linear move.
    LinearMove,
    /// G20: coordinates in inches.
    UnitsInch,
    /// G21: coordinates in millimetres.
    UnitsMillimeter,
    /// G90: absolute positioning.
    AbsolutePositioning,
    /// G91: relative positioning.
    RelativePositioning,
    /// G92: redefine the current position.
    SetPosition,
    /// M21: initialize storage medium.
    InitStorage,
    /// M82: absolute extruder positioning.
    ExtruderAbsolute,
    /// M83: relative extruder positioning.
    ExtruderRelative,
    /// M105: report temperatures.
    ReportTemperature,
    /// M110: set current line number.
    SetLineNumber,
}

impl Opcode {
    /// Look up the opcode for a token such as `"G1"`.
    ///
    /// Tokens are matched case-insensitively; `G01` is the same as `G1`.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let number: u16 = chars.as_str().parse().ok()?;

        let op = match (letter, number) {
            ('G', 0) => Opcode::RapidMove,
            ('G', 1) => Opcode::LinearMove,
            ('G', 20) => Opcode::UnitsInch,
            ('G', 21) => Opcode::UnitsMillimeter,
            ('G', 90) => Opcode::AbsolutePositioning,
            ('G', 91) => Opcode::RelativePositioning,
            ('G', 92) => Opcode::SetPosition,
            ('M', 21) => Opcode::InitStorage,
            ('M', 82) => Opcode::ExtruderAbsolute,
            ('M', 83) => Opcode::ExtruderRelative,
            ('M', 105) => Opcode::ReportTemperature,
            ('M', 110) => Opcode::SetLineNumber,
            _ => return None,
        };
        Some(op)
    }

    /// Canonical token.
    pub const fn token(self) -> &'static str {
        match self {
            Opcode::RapidMove => "G0",
            Opcode::LinearMove => "G1",
            Opcode::UnitsInch => "G20",
            Opcode::UnitsMillimeter => "G21",
            Opcode::AbsolutePositioning => "G90",
            Opcode::RelativePositioning => "G91",
            Opcode::SetPosition => "G92",
            Opcode::InitStorage => "M21",
            Opcode::ExtruderAbsolute => "M82",
            Opcode::ExtruderRelative => "M83",
            Opcode::ReportTemperature => "M105",
            Opcode::SetLineNumber => "M110",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
