#![forbid(unsafe_code)]

use crate::block::{Alignment, Block};
use crate::{Widget, draw_line, set_style_area};
use cviz_core::geometry::Rect;
use cviz_render::buffer::Buffer;
use cviz_render::frame::Frame;
use cviz_render::text::{Line, Text};
use cviz_render::Style;

/// Multi-line styled text, optionally word-wrapped and inside a block.
#[derive(Debug, Clone, Default)]
pub struct Paragraph<'a> {
    text: Text,
    block: Option<Block<'a>>,
    style: Style,
    wrap: bool,
    alignment: Alignment,
    scroll: u16,
}

impl<'a> Paragraph<'a> {
    pub fn new(text: impl Into<Text>) -> Self {
        Self {
            text: text.into(),
            block: None,
            style: Style::default(),
            wrap: false,
            alignment: Alignment::Left,
            scroll: 0,
        }
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Skip the first `rows` visual lines.
    #[must_use]
    pub fn scroll(mut self, rows: u16) -> Self {
        self.scroll = rows;
        self
    }

    /// Visual lines the text occupies at `width` (ignores the block).
    pub fn line_count(&self, width: u16) -> usize {
        self.visual_lines(width).len()
    }

    fn visual_lines(&self, width: u16) -> Vec<Line> {
        if self.wrap {
            self.text.wrapped(width as usize)
        } else {
            self.text.lines().to_vec()
        }
    }

    pub fn render_buffer(&self, area: Rect, buf: &mut Buffer) {
        set_style_area(buf, area, self.style);

        let text_area = match self.block {
            Some(ref b) => {
                b.render_buffer(area, buf);
                b.inner(area)
            }
            None => area,
        };
        if text_area.is_empty() {
            return;
        }

        let lines = self.visual_lines(text_area.width);
        let rows = lines
            .iter()
            .skip(self.scroll as usize)
            .take(text_area.height as usize);
        for (y, line) in (text_area.y..).zip(rows) {
            let width = line.width().min(text_area.width as usize) as u16;
            let x = match self.alignment {
                Alignment::Left => text_area.x,
                Alignment::Center => text_area.x + (text_area.width - width) / 2,
                Alignment::Right => text_area.right() - width,
            };
            draw_line(buf, x, y, line, self.style, text_area.right());
        }
    }
}

impl Widget for Paragraph<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Paragraph",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        self.render_buffer(area, &mut frame.buffer);
    }
}
