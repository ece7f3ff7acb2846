#![forbid(unsafe_code)]

use crate::Widget;
use crate::{draw_text_span, set_style_area};
use cviz_core::geometry::Rect;
use cviz_render::buffer::Buffer;
use cviz_render::cell::Cell;
use cviz_render::frame::Frame;
use cviz_render::Style;

bitflags::bitflags! {
    /// Which edges of a block to draw.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Edges: u8 {
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
        const ALL    = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

/// Border look, named after what the box holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outline {
    /// Popovers and the lightbox frame.
    #[default]
    Panel,
    /// Invocation cards and carousel items.
    Card,
    /// Stand-in for an image the terminal cannot show.
    Placeholder,
    /// The thumbnail under the lightbox selection.
    Selected,
}

impl Outline {
    /// Horizontal, vertical, then corners clockwise from the top left.
    const fn glyphs(self) -> [char; 6] {
        match self {
            Self::Panel => ['─', '│', '┌', '┐', '┘', '└'],
            Self::Card => ['─', '│', '╭', '╮', '╯', '╰'],
            Self::Placeholder => ['┄', '┆', '┌', '┐', '┘', '└'],
            Self::Selected => ['━', '┃', '┏', '┓', '┛', '┗'],
        }
    }
}

/// A box with optional borders, a title on the top edge, and a background.
///
/// Tool invocation cards, carousel items, gallery tiles and the lightbox
/// frame are all blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    edges: Edges,
    border_style: Style,
    outline: Outline,
    title: Option<&'a str>,
    title_style: Option<Style>,
    title_alignment: Alignment,
    style: Style,
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a> Block<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// All edges, rounded corners.
    pub fn card() -> Self {
        Self::bordered().outline(Outline::Card)
    }

    pub fn bordered() -> Self {
        Self::default().edges(Edges::ALL)
    }

    #[must_use]
    pub fn edges(mut self, edges: Edges) -> Self {
        self.edges = edges;
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn outline(mut self, outline: Outline) -> Self {
        self.outline = outline;
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Title style; defaults to the border style.
    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = Some(style);
        self
    }

    #[must_use]
    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Area left inside the borders.
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;

        if self.edges.contains(Edges::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.edges.contains(Edges::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.edges.contains(Edges::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.edges.contains(Edges::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }

        inner
    }

    fn border_cell(&self, c: char) -> Cell {
        Cell::from_char(c).with_style(self.border_style.merge(&self.style))
    }

    /// Draw into a bare buffer; used for offscreen strips.
    pub fn render_buffer(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        set_style_area(buf, area, self.style);
        self.render_borders(area, buf);
        self.render_title(area, buf);
    }

    fn render_borders(&self, area: Rect, buf: &mut Buffer) {
        let [horizontal, vertical, top_left, top_right, bottom_right, bottom_left] =
            self.outline.glyphs();
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        for (edge, x) in [(Edges::LEFT, area.x), (Edges::RIGHT, right)] {
            if self.edges.contains(edge) {
                for y in area.y..area.bottom() {
                    buf.set(x, y, self.border_cell(vertical));
                }
            }
        }
        for (edge, y) in [(Edges::TOP, area.y), (Edges::BOTTOM, bottom)] {
            if self.edges.contains(edge) {
                for x in area.x..area.right() {
                    buf.set(x, y, self.border_cell(horizontal));
                }
            }
        }

        // Corners overwrite the edges.
        let corners = [
            (Edges::LEFT | Edges::TOP, area.x, area.y, top_left),
            (Edges::RIGHT | Edges::TOP, right, area.y, top_right),
            (Edges::RIGHT | Edges::BOTTOM, right, bottom, bottom_right),
            (Edges::LEFT | Edges::BOTTOM, area.x, bottom, bottom_left),
        ];
        for (edges, x, y, glyph) in corners {
            if self.edges.contains(edges) {
                buf.set(x, y, self.border_cell(glyph));
            }
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let Some(title) = self.title else {
            return;
        };
        if !self.edges.contains(Edges::TOP) || area.width < 3 {
            return;
        }

        // One cell of padding on each side of the title.
        let available = area.width.saturating_sub(4) as usize;
        if available == 0 {
            return;
        }
        let title_width = unicode_width::UnicodeWidthStr::width(title).min(available);

        let x = match self.title_alignment {
            Alignment::Left => area.x + 2,
            Alignment::Center => area.x + 2 + ((available - title_width) / 2) as u16,
            Alignment::Right => area.right().saturating_sub(2 + title_width as u16),
        };

        let style = self.title_style.unwrap_or(self.border_style).merge(&self.style);
        let max_x = area.right().saturating_sub(2);
        draw_text_span(buf, x, area.y, title, style, max_x);
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Block",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        self.render_buffer(area, &mut frame.buffer);
    }
}
