#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle in terminal cells (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlapping region of two rectangles (empty if disjoint).
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::new(x, y, 0, 0);
        }
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Shrink by `margin` cells on every side.
    pub fn inner(&self, margin: u16) -> Rect {
        let double = margin.saturating_mul(2);
        Rect::new(
            self.x.saturating_add(margin),
            self.y.saturating_add(margin),
            self.width.saturating_sub(double),
            self.height.saturating_sub(double),
        )
    }

    /// Shrink by `margin` cells on the left and right only.
    pub fn shrink_x(&self, margin: u16) -> Rect {
        Rect::new(
            self.x.saturating_add(margin),
            self.y,
            self.width.saturating_sub(margin.saturating_mul(2)),
            self.height,
        )
    }

    /// Split off the top `rows`, returning `(top, rest)`.
    pub fn split_top(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        (
            Rect::new(self.x, self.y, self.width, rows),
            Rect::new(self.x, self.y + rows, self.width, self.height - rows),
        )
    }

    /// Split off the bottom `rows`, returning `(rest, bottom)`.
    pub fn split_bottom(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        let rest = self.height - rows;
        (
            Rect::new(self.x, self.y, self.width, rest),
            Rect::new(self.x, self.y + rest, self.width, rows),
        )
    }

    /// A `width`×`height` rectangle centered in `self`, clamped to fit.
    pub fn centered(&self, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}
