#![forbid(unsafe_code)]

//! Row-major cell grid.

use cviz_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::style::Style;

/// A fixed-size grid of [`Cell`]s. Out-of-bounds writes are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Overwrite every cell in `area` (clipped to the buffer).
    pub fn fill(&mut self, area: Rect, cell: Cell) {
        let area = area.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Layer `style` over the existing style of every cell in `area`.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.style = style.merge(&cell.style);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Write `text` starting at `(x, y)`, stopping before `max_x`.
    ///
    /// Returns the column after the last written glyph. A wide glyph that
    /// would straddle `max_x` is not written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > max_x {
                break;
            }
            self.set(col, y, Cell::from_char(ch).with_style(style));
            if w == 2 {
                self.set(col + 1, y, Cell::CONTINUATION.with_style(style));
            }
            col += w;
        }
        col
    }

    /// Copy columns `src_x..src_x + dest.width` of `src` into `dest`.
    ///
    /// Used to show a horizontally scrolled window of an offscreen strip.
    pub fn blit_columns(&mut self, src: &Buffer, src_x: u16, dest: Rect) {
        for dy in 0..dest.height {
            for dx in 0..dest.width {
                let Some(cell) = src.get(src_x.saturating_add(dx), dy) else {
                    continue;
                };
                let mut cell = *cell;
                // A continuation cut from its glyph would render nothing.
                if dx == 0 && cell.is_continuation() {
                    cell = Cell::default().with_style(cell.style);
                }
                self.set(dest.x + dx, dest.y + dy, cell);
            }
        }
    }

    /// Plain text of row `y`, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        let row: String = self.cells[start..start + self.width as usize]
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.symbol)
            .collect();
        row.trim_end().to_string()
    }

    /// Plain text of every row.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn out_of_bounds_writes_ignored() {
        let mut buf = Buffer::new(3, 2);
        buf.set(5, 5, Cell::from_char('x'));
        assert!(buf.get(5, 5).is_none());
        assert_eq!(buf.to_lines(), vec!["", ""]);
    }

    #[test]
    fn put_str_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.put_str(1, 0, "hello world", Style::new(), 6);
        assert_eq!(end, 6);
        assert_eq!(buf.row_text(0), " hello");
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let mut buf = Buffer::new(6, 1);
        let end = buf.put_str(0, 0, "日本", Style::new(), 6);
        assert_eq!(end, 4);
        assert!(buf.get(1, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buf.row_text(0), "日本");
    }

    #[test]
    fn wide_glyph_not_split_at_edge() {
        let mut buf = Buffer::new(3, 1);
        let end = buf.put_str(0, 0, "a日本", Style::new(), 3);
        assert_eq!(end, 3);
        assert_eq!(buf.row_text(0), "a日");
    }

    #[test]
    fn blit_windowed_copy() {
        let mut src = Buffer::new(10, 1);
        src.put_str(0, 0, "0123456789", Style::new(), 10);
        let mut dst = Buffer::new(5, 1);
        dst.blit_columns(&src, 4, Rect::new(1, 0, 3, 1));
        assert_eq!(dst.row_text(0), " 456");
    }

    #[test]
    fn set_style_layers_over_existing() {
        let mut buf = Buffer::new(2, 1);
        buf.set(0, 0, Cell::from_char('a').with_style(Style::new().bold()));
        buf.set_style(Rect::new(0, 0, 2, 1), Style::new().bg(Color::BLACK));
        let cell = buf.get(0, 0).copied().unwrap_or_default();
        assert_eq!(cell.style.bg, Some(Color::BLACK));
        assert!(cell.style.attrs.contains(crate::style::StyleFlags::BOLD));
    }
}
