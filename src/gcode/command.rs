//! Parsed G-code commands.
//!
//! A command line is an opcode word (`G1`, `M105`) followed by
//! `<Letter><Number>` parameter words. `;` starts a comment, and a
//! `*<checksum>` suffix is ignored.

use heapless::String;

use crate::config::Coordinate;
use crate::error::{truncated, CommandError, Result};

/// An immutable parsed command.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    opcode: String<8>,
    x: Option<f32>,
    y: Option<f32>,
    z: Option<f32>,
    e: Option<f32>,
    f: Option<f32>,
}

impl Command {
    /// Create a command with no parameters.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::MalformedWord` if the opcode is not a letter
    /// followed by digits.
    pub fn new(opcode: &str) -> Result<Self> {
        if !is_opcode_word(opcode) {
            return Err(CommandError::MalformedWord(truncated(opcode)).into());
        }
        let mut normalized: String<8> = String::new();
        for ch in opcode.chars() {
            normalized
                .push(ch.to_ascii_uppercase())
                .map_err(|_| CommandError::MalformedWord(truncated(opcode)))?;
        }
        Ok(Self {
            opcode: normalized,
            x: None,
            y: None,
            z: None,
            e: None,
            f: None,
        })
    }

    /// Parse one line of G-code.
    ///
    /// Parameter letters other than X, Y, Z, E and F are accepted and
    /// dropped. A leading `N<line>` word is skipped.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Empty` for blank or comment-only lines and
    /// `CommandError::MalformedWord` for words that do not parse.
    pub fn parse(line: &str) -> Result<Self> {
        let code = line.split(';').next().unwrap_or("");
        let code = code.split('*').next().unwrap_or("");

        let mut words = code.split_ascii_whitespace().peekable();
        if words
            .peek()
            .map_or(false, |w| w.starts_with(['N', 'n']) && w.len() > 1)
        {
            words.next();
        }

        let opcode = words.next().ok_or(CommandError::Empty)?;
        let mut cmd = Self::new(opcode)?;

        for word in words {
            let mut chars = word.chars();
            let letter = chars
                .next()
                .filter(char::is_ascii_alphabetic)
                .ok_or_else(|| CommandError::MalformedWord(truncated(word)))?
                .to_ascii_uppercase();
            let value: f32 = chars
                .as_str()
                .parse()
                .map_err(|_| CommandError::MalformedWord(truncated(word)))?;
            cmd.set_param(letter, value);
        }

        Ok(cmd)
    }

    /// Builder-style parameter setter. Unknown letters are ignored.
    pub fn with(mut self, letter: char, value: f32) -> Self {
        self.set_param(letter.to_ascii_uppercase(), value);
        self
    }

    fn set_param(&mut self, letter: char, value: f32) {
        match letter {
            'X' => self.x = Some(value),
            'Y' => self.y = Some(value),
            'Z' => self.z = Some(value),
            'E' => self.e = Some(value),
            'F' => self.f = Some(value),
            _ => {}
        }
    }

    /// Opcode token, upper-cased.
    #[inline]
    pub fn opcode(&self) -> &str {
        self.opcode.as_str()
    }

    /// Coordinate parameter, `None` when not specified.
    #[inline]
    pub fn coordinate(&self, c: Coordinate) -> Option<f32> {
        match c {
            Coordinate::X => self.x,
            Coordinate::Y => self.y,
            Coordinate::Z => self.z,
            Coordinate::E => self.e,
        }
    }

    /// X parameter.
    #[inline]
    pub fn x(&self) -> Option<f32> {
        self.x
    }

    /// Y parameter.
    #[inline]
    pub fn y(&self) -> Option<f32> {
        self.y
    }

    /// Z parameter.
    #[inline]
    pub fn z(&self) -> Option<f32> {
        self.z
    }

    /// E parameter.
    #[inline]
    pub fn e(&self) -> Option<f32> {
        self.e
    }

    /// F parameter.
    #[inline]
    pub fn f(&self) -> Option<f32> {
        self.f
    }

    /// True if any of X, Y, Z or E is present.
    pub fn has_coordinates(&self) -> bool {
        Coordinate::ALL.iter().any(|&c| self.coordinate(c).is_some())
    }

    /// Present parameters as `(letter, value)` pairs in X, Y, Z, E, F order.
    pub fn params(&self) -> impl Iterator<Item = (char, f32)> + '_ {
        [('X', self.x), ('Y', self.y), ('Z', self.z), ('E', self.e), ('F', self.f)]
            .into_iter()
            .filter_map(|(l, v)| v.map(|v| (l, v)))
    }
}

fn is_opcode_word(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && !chars.as_str().is_empty()
        && chars.all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_move() {
        let cmd = Command::parse("G1 X10 Y20.5 F1500").unwrap();
        assert_eq!(cmd.opcode(), "G1");
        assert_eq!(cmd.x(), Some(10.0));
        assert_eq!(cmd.y(), Some(20.5));
        assert_eq!(cmd.z(), None);
        assert_eq!(cmd.f(), Some(1500.0));
    }

    #[test]
    fn test_zero_is_distinct_from_missing() {
        let cmd = Command::parse("G1 X0").unwrap();
        assert_eq!(cmd.x(), Some(0.0));
        assert_eq!(cmd.y(), None);
        assert!(cmd.has_coordinates());
    }

    #[test]
    fn test_comments_line_numbers_and_checksums() {
        let cmd = Command::parse("N12 g1 x-1.5 e.3*71 ; prime").unwrap();
        assert_eq!(cmd.opcode(), "G1");
        assert_eq!(cmd.x(), Some(-1.5));
        assert_eq!(cmd.e(), Some(0.3));
    }

    #[test]
    fn test_unknown_letters_dropped() {
        let cmd = Command::parse("M104 S200 T0").unwrap();
        assert_eq!(cmd.params().count(), 0);
    }

    #[test]
    fn test_empty_and_comment_lines() {
        assert_eq!(Command::parse("   ").unwrap_err(), Error::Command(CommandError::Empty));
        assert_eq!(Command::parse("; hello").unwrap_err(), Error::Command(CommandError::Empty));
    }

    #[test]
    fn test_malformed_words() {
        assert!(matches!(
            Command::parse("G1 Xabc"),
            Err(Error::Command(CommandError::MalformedWord(_)))
        ));
        assert!(matches!(
            Command::parse("hello"),
            Err(Error::Command(CommandError::MalformedWord(_)))
        ));
    }

    #[test]
    fn test_builder() {
        let cmd = Command::new("G1").unwrap().with('x', 3.0).with('F', 600.0);
        let params: alloc::vec::Vec<_> = cmd.params().collect();
        assert_eq!(params, [('X', 3.0), ('F', 600.0)]);
    }
}
