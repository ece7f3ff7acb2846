#![forbid(unsafe_code)]

//! Image gallery grid. Clicking a tile opens the lightbox on that image.
//!
//! The grid shape depends on how many images there are:
//!
//! | images | columns | notes                                  |
//! |--------|---------|----------------------------------------|
//! | 1      | 1       |                                        |
//! | 2      | 2       |                                        |
//! | 3      | 2       | first image spans both rows            |
//! | 4      | 2       | 2×2                                    |
//! | 5+     | 3       | rows as needed                         |
//!
//! [`Gallery`] only draws the tiles. The lightbox is an overlay over the whole
//! screen, so the host renders [`crate::lightbox::Lightbox`] with
//! [`GalleryState::viewer_mut`] after everything else.

use cviz_core::event::Event;
use cviz_core::geometry::Rect;
use cviz_core::page::Page;
use cviz_render::frame::{Frame, Hit, HitId, HitRegion};

use crate::block::{Block, Outline};
use crate::theme::Theme;
use crate::viewer::{FocusedItemViewer, ViewerAction};
use crate::{StatefulWidget, centered_x, draw_text_span};

/// Columns between adjacent tiles.
const TILE_GAP: u16 = 1;

/// One image of a gallery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryImage {
    pub src: String,
    pub alt: Option<String>,
    pub details: Option<String>,
}

impl GalleryImage {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Alt text, or `Image {n}` (1-based) when missing or blank.
    pub fn label(&self, index: usize) -> String {
        match self.alt.as_deref().map(str::trim) {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => format!("Image {}", index + 1),
        }
    }

    /// Last path segment of `src`, for a compact placeholder.
    pub fn file_name(&self) -> &str {
        let path = self.src.split(['?', '#']).next().unwrap_or(&self.src);
        path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
    }

    pub fn caption(&self) -> Option<&str> {
        self.details.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }
}

/// Grid shape for a given image count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u16,
    pub rows: u16,
    /// The first tile spans two rows (three-image layout).
    pub first_spans_rows: bool,
}

pub fn grid_layout(count: usize) -> GridLayout {
    match count {
        0 => GridLayout {
            columns: 1,
            rows: 0,
            first_spans_rows: false,
        },
        1 => GridLayout {
            columns: 1,
            rows: 1,
            first_spans_rows: false,
        },
        2 => GridLayout {
            columns: 2,
            rows: 1,
            first_spans_rows: false,
        },
        3 => GridLayout {
            columns: 2,
            rows: 2,
            first_spans_rows: true,
        },
        4 => GridLayout {
            columns: 2,
            rows: 2,
            first_spans_rows: false,
        },
        n => GridLayout {
            columns: 3,
            rows: n.div_ceil(3).min(u16::MAX as usize) as u16,
            first_spans_rows: false,
        },
    }
}

/// Tile rectangles for `count` images in `area`, in image order.
pub fn tile_rects(area: Rect, count: usize, tile_height: u16) -> Vec<Rect> {
    let layout = grid_layout(count);
    if count == 0 || area.is_empty() {
        return Vec::new();
    }
    let gaps = TILE_GAP * (layout.columns - 1);
    let tile_width = area.width.saturating_sub(gaps) / layout.columns;
    let pitch = tile_height.saturating_add(TILE_GAP);
    let cell = |col: u16, row: u16, row_span: u16| {
        let height = pitch
            .saturating_mul(row_span)
            .saturating_sub(TILE_GAP);
        Rect::new(
            area.x + col * (tile_width + TILE_GAP),
            area.y.saturating_add(row.saturating_mul(pitch)),
            tile_width,
            height,
        )
    };

    if layout.first_spans_rows {
        return vec![cell(0, 0, 2), cell(1, 0, 1), cell(1, 1, 1)];
    }
    (0..count)
        .map(|i| {
            let i = i.min(u16::MAX as usize) as u16;
            cell(i % layout.columns, i / layout.columns, 1)
        })
        .collect()
}

/// Gallery tiles and the lightbox viewer they open.
#[derive(Debug)]
pub struct GalleryState {
    viewer: FocusedItemViewer,
    tiles_id: HitId,
}

/// Result of [`GalleryState::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Opened(usize),
    Viewer(ViewerAction),
}

impl GalleryState {
    /// Tiles register under `tiles_id`; the lightbox under `overlay_id`.
    pub fn new(page: Page, image_count: usize, tiles_id: HitId, overlay_id: HitId) -> Self {
        Self {
            viewer: FocusedItemViewer::new(page, image_count).hit_id(overlay_id),
            tiles_id,
        }
    }

    pub fn tiles_id(&self) -> HitId {
        self.tiles_id
    }

    pub fn viewer(&self) -> &FocusedItemViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut FocusedItemViewer {
        &mut self.viewer
    }

    /// Route an event: to the lightbox while it is open, else to the tiles.
    pub fn handle_event(&mut self, event: &Event, hit: Option<Hit>) -> Option<GalleryAction> {
        if self.viewer.is_open() {
            return self.viewer.handle_event(event, hit).map(GalleryAction::Viewer);
        }
        let Event::Mouse(mouse) = event else {
            return None;
        };
        if !mouse.is_left_click() {
            return None;
        }
        match hit? {
            (id, HitRegion::Item, index) if id == self.tiles_id => {
                self.viewer.open(usize::try_from(index).ok()?);
                self.viewer.selected().map(GalleryAction::Opened)
            }
            _ => None,
        }
    }

    /// Advance thumbnail animations; returns whether anything is still moving.
    pub fn tick(&mut self) -> bool {
        self.viewer.tick()
    }
}

/// Grid of image tiles.
#[derive(Debug, Clone)]
pub struct Gallery<'a> {
    images: &'a [GalleryImage],
    tile_height: u16,
    theme: Theme,
}

impl<'a> Gallery<'a> {
    pub fn new(images: &'a [GalleryImage]) -> Self {
        Self {
            images,
            tile_height: 5,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn tile_height(mut self, rows: u16) -> Self {
        self.tile_height = rows.max(3);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Rows needed to show every tile.
    pub fn height(&self) -> u16 {
        let rows = grid_layout(self.images.len()).rows;
        if rows == 0 {
            return 0;
        }
        self.tile_height
            .saturating_add(TILE_GAP)
            .saturating_mul(rows)
            .saturating_sub(TILE_GAP)
    }

    fn render_tile(&self, index: usize, image: &GalleryImage, rect: Rect, frame: &mut Frame) {
        let block = Block::bordered()
            .outline(Outline::Placeholder)
            .border_style(self.theme.chrome());
        block.render_buffer(rect, &mut frame.buffer);
        let inner = block.inner(rect);
        if inner.is_empty() {
            return;
        }

        let label = image.label(index);
        let name = image.file_name();
        let mid = inner.y + inner.height.saturating_sub(1) / 2;
        let label_x = centered_x(inner, unicode_width::UnicodeWidthStr::width(label.as_str()));
        draw_text_span(
            &mut frame.buffer,
            label_x,
            mid,
            &label,
            self.theme.body(),
            inner.right(),
        );
        if inner.height > 1 && mid + 1 < inner.bottom() {
            let name_x = centered_x(inner, unicode_width::UnicodeWidthStr::width(name));
            draw_text_span(
                &mut frame.buffer,
                name_x,
                mid + 1,
                name,
                self.theme.secondary(),
                inner.right(),
            );
        }
    }
}

impl StatefulWidget for Gallery<'_> {
    type State = GalleryState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut GalleryState) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Gallery",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if state.viewer.item_count() != self.images.len() {
            state.viewer.set_item_count(self.images.len());
        }

        let rects = tile_rects(area, self.images.len(), self.tile_height);
        for (index, (image, rect)) in self.images.iter().zip(rects).enumerate() {
            let rect = rect.intersection(&area);
            if rect.is_empty() {
                continue;
            }
            self.render_tile(index, image, rect, frame);
            frame.register_hit(rect, state.tiles_id, HitRegion::Item, index as u64);
        }
    }
}
