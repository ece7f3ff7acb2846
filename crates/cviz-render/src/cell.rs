#![forbid(unsafe_code)]

//! A single terminal cell.

use crate::style::Style;

/// One grid cell: a symbol and its style.
///
/// Wide glyphs occupy their own cell plus one [`Cell::CONTINUATION`] cell to
/// the right, which renders as nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub style: Style,
}

impl Cell {
    pub const CONTINUATION: Cell = Cell {
        symbol: '\0',
        style: Style::new(),
    };

    #[inline]
    pub const fn from_char(symbol: char) -> Self {
        Self {
            symbol,
            style: Style::new(),
        }
    }

    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.symbol == '\0'
    }

    /// Blank with no styling.
    pub fn is_empty(&self) -> bool {
        self.symbol == ' ' && self.style.is_plain()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}
