#![forbid(unsafe_code)]

//! Full-screen overlay showing one gallery image at a time.
//!
//! Layout, top to bottom inside the content panel:
//!
//! ```text
//! 2 / 5                                   ✕
//! ‹ ┌┄ alt text ┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┐ ›
//!   ┆         [image] file.jpg         ┆
//!   └┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┘
//! caption text
//! ‹ [1] [2] [3] [4] [5] ›
//! ```
//!
//! The backdrop is registered in the hit grid first and the content panel on
//! top of it, so a click on the panel never reads as a backdrop click.
//! Previous/next arrows and the thumbnail row only appear with more than one
//! image.

use cviz_core::geometry::Rect;
use cviz_render::buffer::Buffer;
use cviz_render::cell::Cell;
use cviz_render::frame::{Frame, HitRegion};
use cviz_render::text::Text;
use cviz_render::Style;

use crate::block::{Block, Outline};
use crate::gallery::GalleryImage;
use crate::paragraph::Paragraph;
use crate::scroll_strip::Direction;
use crate::theme::Theme;
use crate::viewer::{Control, FocusedItemViewer};
use crate::{StatefulWidget, Widget, centered_x, draw_text_span, set_style_area};

/// Columns between thumbnails.
pub const THUMBNAIL_GAP: u16 = 1;
/// Width of each navigation arrow column.
const ARROW_WIDTH: u16 = 3;

/// Lightbox sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightboxConfig {
    pub max_width: u16,
    pub thumbnail_width: u16,
    pub thumbnail_height: u16,
    pub caption_rows: u16,
    pub theme: Theme,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            max_width: 100,
            thumbnail_width: 8,
            thumbnail_height: 3,
            caption_rows: 2,
            theme: Theme::default(),
        }
    }
}

impl LightboxConfig {
    #[must_use]
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }

    #[must_use]
    pub fn thumbnail_width(mut self, width: u16) -> Self {
        self.thumbnail_width = width.max(3);
        self
    }

    #[must_use]
    pub fn caption_rows(mut self, rows: u16) -> Self {
        self.caption_rows = rows;
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Overlay rendered from a [`FocusedItemViewer`]. Draws nothing while closed.
#[derive(Debug, Clone)]
pub struct Lightbox<'a> {
    images: &'a [GalleryImage],
    config: LightboxConfig,
}

impl<'a> Lightbox<'a> {
    pub fn new(images: &'a [GalleryImage]) -> Self {
        Self {
            images,
            config: LightboxConfig::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: LightboxConfig) -> Self {
        self.config = config;
        self
    }

    /// The content panel inside `area`.
    pub fn content_rect(&self, area: Rect) -> Rect {
        let width = area.width.saturating_sub(4).min(self.config.max_width);
        let height = area.height.saturating_sub(2);
        area.centered(width, height)
    }

    fn has_many(&self) -> bool {
        self.images.len() > 1
    }

    fn render_header(&self, row: Rect, frame: &mut Frame, viewer: &FocusedItemViewer, index: usize) {
        let theme = &self.config.theme;
        let counter = format!("{} / {}", index + 1, self.images.len());
        draw_text_span(&mut frame.buffer, row.x, row.y, &counter, theme.secondary(), row.right());

        let close = Rect::new(row.right().saturating_sub(ARROW_WIDTH), row.y, ARROW_WIDTH.min(row.width), 1);
        draw_text_span(&mut frame.buffer, close.x + 1, row.y, "✕", theme.control(), row.right());
        frame.register_hit(close, viewer.id(), HitRegion::Button, Control::Close.hit_data());
    }

    fn render_main(&self, area: Rect, frame: &mut Frame, viewer: &FocusedItemViewer, index: usize) {
        let theme = &self.config.theme;
        let image = &self.images[index];
        let mut panel = area;

        if self.has_many() && area.width > ARROW_WIDTH * 2 {
            let mid = area.y + area.height.saturating_sub(1) / 2;
            let left = Rect::new(area.x, area.y, ARROW_WIDTH, area.height);
            let right = Rect::new(area.right() - ARROW_WIDTH, area.y, ARROW_WIDTH, area.height);
            draw_text_span(&mut frame.buffer, left.x + 1, mid, "‹", theme.control(), left.right());
            draw_text_span(&mut frame.buffer, right.x + 1, mid, "›", theme.control(), right.right());
            frame.register_hit(left, viewer.id(), HitRegion::Button, Control::Previous.hit_data());
            frame.register_hit(right, viewer.id(), HitRegion::Button, Control::Next.hit_data());
            panel = Rect::new(area.x + ARROW_WIDTH, area.y, area.width - ARROW_WIDTH * 2, area.height);
        }

        let label = image.label(index);
        let block = Block::bordered()
            .outline(Outline::Placeholder)
            .border_style(theme.chrome())
            .title(&label)
            .title_style(theme.title());
        block.render_buffer(panel, &mut frame.buffer);

        let inner = block.inner(panel);
        if inner.is_empty() {
            return;
        }
        let placeholder = format!("[image] {}", image.file_name());
        let y = inner.y + inner.height.saturating_sub(1) / 2;
        let x = centered_x(inner, unicode_width::UnicodeWidthStr::width(placeholder.as_str()));
        draw_text_span(&mut frame.buffer, x, y, &placeholder, theme.secondary(), inner.right());
    }

    fn render_thumbnails(&self, row: Rect, frame: &mut Frame, viewer: &mut FocusedItemViewer, selected: usize) {
        if row.width <= ARROW_WIDTH * 2 || row.is_empty() {
            return;
        }
        let theme = self.config.theme;
        let left = Rect::new(row.x, row.y, ARROW_WIDTH, row.height);
        let right = Rect::new(row.right() - ARROW_WIDTH, row.y, ARROW_WIDTH, row.height);
        let viewport = Rect::new(row.x + ARROW_WIDTH, row.y, row.width - ARROW_WIDTH * 2, row.height);

        viewer.layout_thumbnails(viewport.width, self.config.thumbnail_width);

        let strip = self.strip_buffer(viewport.height, selected);
        let offset = viewer.surface().offset_cells();
        frame.buffer.blit_columns(&strip, offset, viewport);

        for (index, span) in viewer.surface().visible_items() {
            let start = span.start.round() as i32 - i32::from(offset);
            let end = start + span.extent.round() as i32;
            let start = start.clamp(0, i32::from(viewport.width)) as u16;
            let end = end.clamp(0, i32::from(viewport.width)) as u16;
            if end > start {
                let rect = Rect::new(viewport.x + start, viewport.y, end - start, viewport.height);
                frame.register_hit(rect, viewer.id(), HitRegion::Item, index as u64);
            }
        }

        let id = viewer.id();
        let strip = viewer.thumbnails();
        strip
            .button(Direction::Backward)
            .hit_id(id)
            .style(theme.control())
            .render(left, frame);
        strip
            .button(Direction::Forward)
            .hit_id(id)
            .style(theme.control())
            .render(right, frame);
    }

    /// All thumbnails side by side, unscrolled.
    fn strip_buffer(&self, height: u16, selected: usize) -> Buffer {
        let theme = &self.config.theme;
        let step = self.config.thumbnail_width + THUMBNAIL_GAP;
        let count = self.images.len().min(u16::MAX as usize / step as usize) as u16;
        let mut buf = Buffer::new(count * step, height);

        for i in 0..count {
            let rect = Rect::new(i * step, 0, self.config.thumbnail_width, height);
            let is_selected = i as usize == selected;
            let block = if is_selected {
                Block::bordered()
                    .outline(Outline::Selected)
                    .border_style(Style::new().fg(theme.accent))
            } else {
                Block::bordered().border_style(theme.chrome())
            };
            block.render_buffer(rect, &mut buf);
            let inner = block.inner(rect);
            let number = (i + 1).to_string();
            let style = if is_selected { theme.control() } else { theme.secondary() };
            let x = centered_x(inner, number.len());
            buf.put_str(x, inner.y, &number, style, inner.right());
        }
        buf
    }
}

impl StatefulWidget for Lightbox<'_> {
    type State = FocusedItemViewer;

    fn render(&self, area: Rect, frame: &mut Frame, viewer: &mut FocusedItemViewer) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Lightbox",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if viewer.item_count() != self.images.len() {
            viewer.set_item_count(self.images.len());
        }
        let Some(index) = viewer.selected() else {
            return;
        };
        if area.is_empty() || index >= self.images.len() {
            return;
        }
        let theme = self.config.theme;

        set_style_area(&mut frame.buffer, area, theme.backdrop_style());
        frame.register_hit(area, viewer.id(), HitRegion::Backdrop, 0);

        let content = self.content_rect(area);
        if content.is_empty() {
            return;
        }
        frame
            .buffer
            .fill(content, Cell::default().with_style(Style::new().bg(theme.surface)));
        frame.register_hit(content, viewer.id(), HitRegion::Content, 0);

        let (header, rest) = content.split_top(1);
        self.render_header(header, frame, viewer, index);

        let thumbs_height = if self.has_many() { self.config.thumbnail_height } else { 0 };
        let (rest, thumbs) = rest.split_bottom(thumbs_height);

        let caption = self.images[index].caption();
        let caption_rows = match caption {
            Some(text) => {
                let para = Paragraph::new(Text::raw(text)).wrap(true);
                (para.line_count(rest.width) as u16).min(self.config.caption_rows)
            }
            None => 0,
        };
        let (main, caption_area) = rest.split_bottom(caption_rows);

        self.render_main(main, frame, viewer, index);
        if let Some(text) = caption {
            Paragraph::new(Text::raw(text))
                .wrap(true)
                .style(theme.body())
                .render(caption_area, frame);
        }
        if self.has_many() {
            self.render_thumbnails(thumbs, frame, viewer, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cviz_core::event::{Event, KeyCode, KeyEvent, MouseEvent};
    use cviz_core::page::Page;
    use cviz_render::frame::HitId;

    use crate::viewer::{CloseReason, ViewerAction};

    fn images(n: usize) -> Vec<GalleryImage> {
        (0..n)
            .map(|i| GalleryImage::new(format!("/photos/p{i}.jpg")).details(format!("caption {i}")))
            .collect()
    }

    fn open_viewer(n: usize, index: usize) -> FocusedItemViewer {
        let mut viewer = FocusedItemViewer::new(Page::new(), n).hit_id(HitId::new(9));
        viewer.open(index);
        viewer
    }

    fn render(imgs: &[GalleryImage], viewer: &mut FocusedItemViewer) -> Frame {
        let mut frame = Frame::with_hit_grid(60, 20);
        Lightbox::new(imgs).render(frame.bounds(), &mut frame, viewer);
        frame
    }

    #[test]
    fn closed_viewer_draws_nothing() {
        let imgs = images(3);
        let mut viewer = FocusedItemViewer::new(Page::new(), 3);
        let frame = render(&imgs, &mut viewer);
        assert!(frame.to_lines().iter().all(String::is_empty));
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn backdrop_and_content_regions() {
        let imgs = images(3);
        let mut viewer = open_viewer(3, 0);
        let frame = render(&imgs, &mut viewer);
        assert_eq!(frame.hit_test(0, 0), Some((HitId::new(9), HitRegion::Backdrop, 0)));
        let content = Lightbox::new(&imgs).content_rect(frame.bounds());
        let hit = frame.hit_test(content.x + 10, content.y + 3);
        assert_eq!(hit, Some((HitId::new(9), HitRegion::Content, 0)));
    }

    #[test]
    fn header_counter_and_caption() {
        let imgs = images(3);
        let mut viewer = open_viewer(3, 1);
        let frame = render(&imgs, &mut viewer);
        let text = frame.to_lines().join("\n");
        assert!(text.contains("2 / 3"));
        assert!(text.contains("caption 1"));
        assert!(text.contains("[image] p1.jpg"));
        assert!(text.contains("Image 2"));
    }

    #[test]
    fn single_image_has_no_arrows_or_thumbnails() {
        let imgs = images(1);
        let mut viewer = open_viewer(1, 0);
        let frame = render(&imgs, &mut viewer);
        let text = frame.to_lines().join("\n");
        assert!(!text.contains('‹'));
        assert!(!text.contains('›'));
        // The selected thumbnail is the only thick-bordered box.
        assert!(!text.contains('┏'));
    }

    #[test]
    fn clicking_content_keeps_open_and_backdrop_closes() {
        let imgs = images(2);
        let mut viewer = open_viewer(2, 0);
        let frame = render(&imgs, &mut viewer);
        let content = Lightbox::new(&imgs).content_rect(frame.bounds());

        let (x, y) = (content.x + 10, content.y + 4);
        let click = Event::Mouse(MouseEvent::click(x, y));
        assert_eq!(viewer.handle_event(&click, frame.hit_test(x, y)), None);
        assert!(viewer.is_open());

        let click = Event::Mouse(MouseEvent::click(0, 0));
        assert_eq!(
            viewer.handle_event(&click, frame.hit_test(0, 0)),
            Some(ViewerAction::Closed(CloseReason::Backdrop))
        );
    }

    #[test]
    fn thumbnail_click_selects() {
        let imgs = images(4);
        let mut viewer = open_viewer(4, 0);
        let frame = render(&imgs, &mut viewer);
        let content = Lightbox::new(&imgs).content_rect(frame.bounds());
        // Third thumbnail: after the arrow column, two thumbnails and gaps in.
        let x = content.x + ARROW_WIDTH + 2 * (8 + THUMBNAIL_GAP) + 2;
        let y = content.bottom() - 2;
        let hit = frame.hit_test(x, y);
        assert_eq!(hit, Some((HitId::new(9), HitRegion::Item, 2)));
        let click = Event::Mouse(MouseEvent::click(x, y));
        assert_eq!(viewer.handle_event(&click, hit), Some(ViewerAction::Selected(2)));
    }

    #[test]
    fn arrow_keys_then_rerender_follow_selection() {
        let imgs = images(4);
        let mut viewer = open_viewer(4, 0);
        render(&imgs, &mut viewer);
        viewer.handle_event(&Event::Key(KeyEvent::new(KeyCode::Left)), None);
        let frame = render(&imgs, &mut viewer);
        assert!(frame.to_lines().join("\n").contains("4 / 4"));
    }
}
