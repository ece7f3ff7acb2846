#![forbid(unsafe_code)]

//! Widgets for visualizing tool invocations inside a chat transcript.
//!
//! The interaction layer is two controllers:
//!
//! - [`scroll_strip::ScrollStrip`] tracks a horizontally scrollable surface and
//!   derives whether the backward/forward navigation controls should show.
//! - [`viewer::FocusedItemViewer`] keeps one selected item of a collection open
//!   in an overlay, with keyboard navigation, a page scroll lock, and a
//!   synchronized thumbnail strip.
//!
//! Everything else (cards, markdown, badges, steps, timeline) is a pure
//! function of its props.

pub mod badge;
pub mod block;
pub mod carousel;
pub mod gallery;
pub mod icon;
pub mod json_view;
pub mod lightbox;
pub mod markdown;
pub mod paragraph;
pub mod scroll_strip;
pub mod steps;
pub mod strip_surface;
pub mod theme;
pub mod timeline;
pub mod viewer;

use cviz_core::geometry::Rect;
use cviz_render::buffer::Buffer;
use cviz_render::frame::Frame;
use cviz_render::text::Line;
use cviz_render::Style;

/// A renderable component.
pub trait Widget {
    /// Render into `frame` within `area`.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A component whose rendering reads and updates external state.
pub trait StatefulWidget {
    type State;
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Draw `text` at `(x, y)`, clipped at `max_x`. Returns the next column.
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    buf.put_str(x, y, text, style, max_x)
}

/// Draw every span of `line` with `base` underneath the span styles.
pub(crate) fn draw_line(buf: &mut Buffer, x: u16, y: u16, line: &Line, base: Style, max_x: u16) -> u16 {
    let mut col = x;
    for span in line.spans() {
        if col >= max_x {
            break;
        }
        col = buf.put_str(col, y, &span.content, span.style.merge(&base), max_x);
    }
    col
}

pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style.is_plain() {
        return;
    }
    buf.set_style(area, style);
}

/// Column at which `width` cells start when centered in `area`.
pub(crate) fn centered_x(area: Rect, width: usize) -> u16 {
    let width = width.min(area.width as usize) as u16;
    area.x + (area.width - width) / 2
}
