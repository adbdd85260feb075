//! The fixed color palette players build codes from.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A selectable color, identified by its slot in the palette.
///
/// Colors compare by identity, so two pegs match exactly when they
/// carry the same variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumCount,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorId {
    /// Red (slot 0)
    Red,
    /// Green (slot 1)
    Green,
    /// Blue (slot 2)
    Blue,
    /// Yellow (slot 3)
    Yellow,
    /// Magenta (slot 4)
    Magenta,
    /// Cyan (slot 5)
    Cyan,
    /// White (slot 6)
    White,
}

/// All selectable colors, in palette order.
pub const PALETTE: [ColorId; 7] = [
    ColorId::Red,
    ColorId::Green,
    ColorId::Blue,
    ColorId::Yellow,
    ColorId::Magenta,
    ColorId::Cyan,
    ColorId::White,
];

impl ColorId {
    /// Returns the display label for this color.
    pub fn label(self) -> &'static str {
        match self {
            ColorId::Red => "Red",
            ColorId::Green => "Green",
            ColorId::Blue => "Blue",
            ColorId::Yellow => "Yellow",
            ColorId::Magenta => "Magenta",
            ColorId::Cyan => "Cyan",
            ColorId::White => "White",
        }
    }

    /// One-letter code used on the command line and in the legend.
    pub fn letter(self) -> char {
        match self {
            ColorId::Red => 'R',
            ColorId::Green => 'G',
            ColorId::Blue => 'B',
            ColorId::Yellow => 'Y',
            ColorId::Magenta => 'M',
            ColorId::Cyan => 'C',
            ColorId::White => 'W',
        }
    }

    /// Palette slot (0-6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Creates a color from its palette slot.
    pub fn from_index(index: usize) -> Option<Self> {
        PALETTE.get(index).copied()
    }

    /// Parses a one-letter code (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        PALETTE.iter().copied().find(|color| color.letter() == upper)
    }

    /// Parses a code written as consecutive letters, e.g. `"RRGB"`.
    ///
    /// Whitespace, commas and dashes are ignored.
    #[instrument]
    pub fn parse_code(text: &str) -> Result<Vec<ColorId>, ColorParseError> {
        text.chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '-')
            .map(|c| ColorId::from_letter(c).ok_or(ColorParseError { letter: c }))
            .collect()
    }

    /// Renders a code as its letters, e.g. `"RRGB"`.
    pub fn format_code(code: &[ColorId]) -> String {
        code.iter().map(|color| color.letter()).collect()
    }
}

impl std::fmt::Display for ColorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A character that names no palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("'{}' is not a palette color (expected one of R G B Y M C W)", letter)]
pub struct ColorParseError {
    /// The offending character.
    pub letter: char,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_palette_has_seven_distinct_colors() {
        assert_eq!(PALETTE.len(), ColorId::COUNT);
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_index_matches_palette_order() {
        for (slot, color) in ColorId::iter().enumerate() {
            assert_eq!(color.index(), slot);
            assert_eq!(ColorId::from_index(slot), Some(color));
        }
        assert_eq!(ColorId::from_index(7), None);
    }

    #[test]
    fn test_parse_code_letters() {
        let code = ColorId::parse_code("rRg b").unwrap();
        assert_eq!(
            code,
            vec![ColorId::Red, ColorId::Red, ColorId::Green, ColorId::Blue]
        );
        assert_eq!(ColorId::format_code(&code), "RRGB");
    }

    #[test]
    fn test_parse_code_rejects_unknown_letter() {
        let err = ColorId::parse_code("RXG").unwrap_err();
        assert_eq!(err.letter, 'X');
        assert!(err.to_string().contains("not a palette color"));
    }
}
