#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for one render pass.
//!
//! Widgets that react to clicks register rectangles in the hit grid while they
//! render. Later registrations overwrite earlier ones, so an overlay registers
//! its backdrop first and its content second; a hit test over the content then
//! reports the content, never the backdrop beneath it.

use cviz_core::geometry::Rect;

use crate::buffer::Buffer;

/// Identifier a widget registers its hit regions under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Widget-defined payload attached to a hit region (item index, button code).
pub type HitData = u64;

/// What kind of region was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    #[default]
    None,
    Content,
    Button,
    /// Overlay backdrop: the area around an overlay's content.
    Backdrop,
    /// One entry of a collection; `HitData` carries the index.
    Item,
}

/// Result of a hit test.
pub type Hit = (HitId, HitRegion, HitData);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct HitCell {
    widget_id: Option<HitId>,
    region: HitRegion,
    data: HitData,
}

/// Maps cell positions to the last region registered over them.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn register(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) {
        let x_end = rect.right().min(self.width);
        let y_end = rect.bottom().min(self.height);
        let cell = HitCell {
            widget_id: Some(id),
            region,
            data,
        };
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = cell;
                }
            }
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        let cell = self.index(x, y).map(|i| self.cells[i])?;
        cell.widget_id.map(|id| (id, cell.region, cell.data))
    }

    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// Render target handed to widgets.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    /// Present when the host wants mouse interaction.
    pub hit_grid: Option<HitGrid>,
}

impl Frame {
    /// Frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
        }
    }

    /// Frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: Some(HitGrid::new(width, height)),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Reset buffer and hit grid for the next pass.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.clear();
        }
    }

    /// Register a hit region. Returns `false` when hit testing is disabled.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) -> bool {
        match self.hit_grid.as_mut() {
            Some(grid) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(message = "frame.hit", id = id.0, region = ?region, x = rect.x, y = rect.y, w = rect.width, h = rect.height);
                grid.register(rect, id, region, data);
                true
            }
            None => false,
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }

    /// Plain text of every row; handy for assertions and the demo.
    pub fn to_lines(&self) -> Vec<String> {
        self.buffer.to_lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn no_grid_no_hits() {
        let mut frame = Frame::new(10, 5);
        assert!(!frame.register_hit(Rect::new(0, 0, 5, 5), HitId::new(1), HitRegion::Content, 0));
        assert_eq!(frame.hit_test(1, 1), None);
    }

    #[test]
    fn later_registration_wins() {
        let mut frame = Frame::with_hit_grid(20, 10);
        let id = HitId::new(3);
        frame.register_hit(frame.bounds(), id, HitRegion::Backdrop, 0);
        frame.register_hit(Rect::new(5, 2, 10, 4), id, HitRegion::Content, 0);
        assert_eq!(frame.hit_test(0, 0), Some((id, HitRegion::Backdrop, 0)));
        assert_eq!(frame.hit_test(6, 3), Some((id, HitRegion::Content, 0)));
    }

    #[test]
    fn registration_clipped_to_grid() {
        let mut frame = Frame::with_hit_grid(4, 4);
        frame.register_hit(Rect::new(2, 2, 100, 100), HitId::new(1), HitRegion::Item, 7);
        assert_eq!(frame.hit_test(3, 3), Some((HitId::new(1), HitRegion::Item, 7)));
        assert_eq!(frame.hit_test(4, 4), None);
    }

    #[test]
    fn clear_resets_both_layers() {
        let mut frame = Frame::with_hit_grid(4, 2);
        frame.buffer.set(0, 0, Cell::from_char('x'));
        frame.register_hit(Rect::new(0, 0, 1, 1), HitId::new(1), HitRegion::Button, 0);
        frame.clear();
        assert_eq!(frame.to_lines(), vec!["", ""]);
        assert_eq!(frame.hit_test(0, 0), None);
    }
}
