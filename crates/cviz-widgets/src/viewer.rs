#![forbid(unsafe_code)]

//! One-item-at-a-time overlay state for a collection.
//!
//! [`FocusedItemViewer`] is either closed or open on exactly one index. While
//! open it holds a [`Session`]: the page key listener and the page scroll lock.
//! Both are guards, so closing, re-opening, or dropping the viewer outright
//! always hands them back, and the page sees one restore per open/close cycle.
//!
//! # State machine
//!
//! ```text
//! Closed --open(i)--> Open(clamp(i))
//! Open(i) --next--> Open((i + 1) mod n)
//! Open(i) --previous--> Open((i + n - 1) mod n)
//! Open(i) --select_thumbnail(j)--> Open(clamp(j))
//! Open(i) --close | Escape | backdrop click--> Closed
//! ```
//!
//! Every selection change asks the thumbnail [`ScrollStrip`] to reveal the
//! selected thumbnail.

use cviz_core::event::{Event, KeyCode, MouseEvent};
use cviz_core::observe::Subscription;
use cviz_core::page::{Page, PageChannel, ScrollLock};
use cviz_core::surface::{ChangeSource, ScrollSurface};
use cviz_render::frame::{Hit, HitData, HitId, HitRegion};

use crate::lightbox::THUMBNAIL_GAP;
use crate::scroll_strip::{Direction, ScrollStrip};
use crate::strip_surface::StripSurface;

/// Thumbnails moved per thumbnail-row arrow press.
pub const DEFAULT_THUMBNAIL_STEP: usize = 2;

/// Clickable controls of an open viewer, encoded as button hit data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    ThumbnailsBackward,
    ThumbnailsForward,
    Close,
    Previous,
    Next,
}

impl Control {
    pub const fn hit_data(self) -> HitData {
        match self {
            Self::ThumbnailsBackward => Direction::Backward.hit_data(),
            Self::ThumbnailsForward => Direction::Forward.hit_data(),
            Self::Close => 2,
            Self::Previous => 3,
            Self::Next => 4,
        }
    }

    pub const fn from_hit_data(data: HitData) -> Option<Self> {
        match data {
            0 => Some(Self::ThumbnailsBackward),
            1 => Some(Self::ThumbnailsForward),
            2 => Some(Self::Close),
            3 => Some(Self::Previous),
            4 => Some(Self::Next),
            _ => None,
        }
    }
}

/// Why the viewer closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Escape,
    Backdrop,
    CloseButton,
}

/// Result of [`FocusedItemViewer::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Selected(usize),
    Closed(CloseReason),
    ThumbnailsScrolled(Direction),
}

/// Page resources held while the viewer is open.
#[derive(Debug)]
struct Session {
    _keys: Subscription,
    _scroll_lock: ScrollLock,
}

#[derive(Debug)]
pub struct FocusedItemViewer<S: ScrollSurface = StripSurface> {
    page: Page,
    item_count: usize,
    selected: Option<usize>,
    session: Option<Session>,
    thumbnails: ScrollStrip,
    surface: S,
    hit_id: HitId,
}

impl FocusedItemViewer<StripSurface> {
    /// Viewer whose thumbnail row is an in-memory strip.
    pub fn new(page: Page, item_count: usize) -> Self {
        let surface = StripSurface::new().with_gap(f32::from(THUMBNAIL_GAP));
        Self::with_surface(page, item_count, surface)
    }

    /// Advance the thumbnail animation one frame and deliver its notifications.
    pub fn tick(&mut self) -> bool {
        let moving = self.surface.tick();
        self.pump();
        moving
    }

    /// Deliver queued thumbnail-surface notifications to the strip.
    pub fn pump(&mut self) {
        for source in self.surface.drain_changes() {
            self.thumbnails.handle_change(source, &self.surface);
        }
    }

    /// Size the thumbnail row; re-reveals the selection if the layout changed.
    pub fn layout_thumbnails(&mut self, viewport: u16, thumbnail_width: u16) {
        let before = (self.surface.viewport(), self.surface.content_extent());
        self.surface
            .set_uniform_items(self.item_count, f32::from(thumbnail_width));
        self.surface.set_viewport(f32::from(viewport));
        let after = (self.surface.viewport(), self.surface.content_extent());
        if before != after {
            self.reveal_selected();
        }
        self.pump();
    }
}

impl<S: ScrollSurface> FocusedItemViewer<S> {
    pub fn with_surface(page: Page, item_count: usize, surface: S) -> Self {
        Self {
            page,
            item_count,
            selected: None,
            session: None,
            thumbnails: ScrollStrip::new(DEFAULT_THUMBNAIL_STEP),
            surface,
            hit_id: HitId::default(),
        }
    }

    /// Hit id the overlay registers its regions under.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = id;
        self
    }

    /// Thumbnails moved per thumbnail-row arrow press.
    #[must_use]
    pub fn thumbnail_step(mut self, step: usize) -> Self {
        self.thumbnails.set_step(step);
        self
    }

    pub fn id(&self) -> HitId {
        self.hit_id
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn thumbnails(&self) -> &ScrollStrip {
        &self.thumbnails
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Open on `index`, clamped into range.
    ///
    /// With no items this is a no-op. Opening an already open viewer only
    /// re-targets the selection.
    pub fn open(&mut self, index: usize) {
        if self.item_count == 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(message = "viewer.open_empty", index);
            return;
        }
        let index = self.clamp(index);
        if self.session.is_none() {
            self.session = Some(Session {
                _keys: self.page.listen(PageChannel::KeyDown),
                _scroll_lock: self.page.lock_scroll(),
            });
            self.thumbnails.initialize(&self.surface);

            #[cfg(feature = "tracing")]
            tracing::debug!(message = "viewer.lock", open = true, index);
        }
        self.select(index);
    }

    /// Close and release page resources. Closing a closed viewer does nothing.
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        drop(session);
        self.thumbnails.teardown();
        self.selected = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "viewer.lock", open = false);
    }

    pub fn next(&mut self) {
        if let Some(i) = self.selected {
            self.select((i + 1) % self.item_count);
        }
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.selected {
            self.select((i + self.item_count - 1) % self.item_count);
        }
    }

    /// Jump to thumbnail `index` (clamped). Ignored while closed.
    pub fn select_thumbnail(&mut self, index: usize) {
        if self.is_open() {
            self.select(self.clamp(index));
        }
    }

    /// Scroll the thumbnail row without changing the selection.
    pub fn scroll_thumbnails(&mut self, direction: Direction) {
        if self.is_open() {
            self.thumbnails.scroll(direction, &mut self.surface);
        }
    }

    /// Forward a thumbnail-surface notification from a host-owned surface.
    pub fn handle_surface_change(&mut self, source: ChangeSource) {
        self.thumbnails.handle_change(source, &self.surface);
    }

    /// Replace the collection size. Closes when the collection empties and
    /// pulls the selection back into range when it shrinks.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        if count == 0 {
            self.close();
            return;
        }
        if let Some(i) = self.selected
            && i >= count
        {
            self.select(count - 1);
        }
    }

    /// Route one input event. `hit` is the hit test of the last rendered frame
    /// at the mouse position.
    pub fn handle_event(&mut self, event: &Event, hit: Option<Hit>) -> Option<ViewerAction> {
        if !self.is_open() {
            return None;
        }
        match event {
            Event::Key(key) if key.is_actionable() => match key.code {
                KeyCode::Escape => {
                    self.close();
                    Some(ViewerAction::Closed(CloseReason::Escape))
                }
                KeyCode::Left => {
                    self.previous();
                    self.selected.map(ViewerAction::Selected)
                }
                KeyCode::Right => {
                    self.next();
                    self.selected.map(ViewerAction::Selected)
                }
                _ => None,
            },
            Event::Mouse(mouse) => self.handle_click(mouse, hit),
            _ => None,
        }
    }

    fn handle_click(&mut self, mouse: &MouseEvent, hit: Option<Hit>) -> Option<ViewerAction> {
        if !mouse.is_left_click() {
            return None;
        }
        let (id, region, data) = hit?;
        if id != self.hit_id {
            return None;
        }
        match region {
            // Only the backdrop itself closes; content sits on top of it in
            // the hit grid and never reports as backdrop.
            HitRegion::Backdrop => {
                self.close();
                Some(ViewerAction::Closed(CloseReason::Backdrop))
            }
            HitRegion::Item => {
                self.select_thumbnail(usize::try_from(data).ok()?);
                self.selected.map(ViewerAction::Selected)
            }
            HitRegion::Button => match Control::from_hit_data(data)? {
                Control::Close => {
                    self.close();
                    Some(ViewerAction::Closed(CloseReason::CloseButton))
                }
                Control::Previous => {
                    self.previous();
                    self.selected.map(ViewerAction::Selected)
                }
                Control::Next => {
                    self.next();
                    self.selected.map(ViewerAction::Selected)
                }
                Control::ThumbnailsBackward => {
                    self.scroll_thumbnails(Direction::Backward);
                    Some(ViewerAction::ThumbnailsScrolled(Direction::Backward))
                }
                Control::ThumbnailsForward => {
                    self.scroll_thumbnails(Direction::Forward);
                    Some(ViewerAction::ThumbnailsScrolled(Direction::Forward))
                }
            },
            HitRegion::Content | HitRegion::None => None,
        }
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.item_count.saturating_sub(1))
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "viewer.selection", index, count = self.item_count);

        self.reveal_selected();
    }

    fn reveal_selected(&mut self) {
        if let Some(i) = self.selected {
            self.thumbnails.reveal(i, &mut self.surface);
        }
    }
}
