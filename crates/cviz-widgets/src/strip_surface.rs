#![forbid(unsafe_code)]

//! In-memory [`ScrollSurface`] for strips drawn into a cell grid.
//!
//! The surface owns item extents, the viewport width and the offset. It plays
//! the role a browser plays for a scroll container: it moves when asked, animates
//! smooth scrolls one [`StripSurface::tick`] at a time, and queues change
//! notifications for whichever sources currently have listeners. The host
//! drains the queue with [`StripSurface::drain_changes`] and forwards each
//! entry to the strip's controller.

use cviz_core::observe::{ObserverRegistry, Subscription};
use cviz_core::surface::{ChangeSource, ItemSpan, Measurement, ScrollBehavior, ScrollSurface};

/// Fraction of the remaining distance covered per animation tick.
const SMOOTH_FACTOR: f32 = 0.5;
/// Remaining distance below which an animation snaps to its target.
const SNAP_DISTANCE: f32 = 0.25;

#[derive(Debug, Default)]
pub struct StripSurface {
    extents: Vec<f32>,
    gap: f32,
    viewport: f32,
    offset: f32,
    target: Option<f32>,
    observers: ObserverRegistry<ChangeSource>,
    pending: Vec<ChangeSource>,
}

impl StripSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Space between adjacent items.
    #[must_use]
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    pub fn set_items(&mut self, extents: Vec<f32>) {
        if extents == self.extents {
            return;
        }
        self.extents = extents;
        self.notify(ChangeSource::Content);
        self.clamp_offset();
    }

    pub fn set_uniform_items(&mut self, count: usize, extent: f32) {
        self.set_items(vec![extent; count]);
    }

    pub fn set_viewport(&mut self, extent: f32) {
        let extent = extent.max(0.0);
        if extent == self.viewport {
            return;
        }
        self.viewport = extent;
        self.notify(ChangeSource::Resize);
        self.clamp_offset();
    }

    /// Direct user scroll (wheel, drag): applied at once, cancels animation.
    pub fn user_scroll(&mut self, delta: f32) {
        self.target = None;
        self.set_offset(self.offset + delta);
    }

    /// Advance a smooth scroll by one frame. Returns whether still animating.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let remaining = target - self.offset;
        if remaining.abs() <= SNAP_DISTANCE {
            self.target = None;
            self.set_offset(target);
            return false;
        }
        self.set_offset(self.offset + remaining * SMOOTH_FACTOR);
        true
    }

    /// Finish any in-flight animation immediately.
    pub fn settle(&mut self) {
        if let Some(target) = self.target.take() {
            self.set_offset(target);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Take queued notifications in arrival order, one entry per source.
    pub fn drain_changes(&mut self) -> Vec<ChangeSource> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Offset rounded to a whole cell, for drawing.
    pub fn offset_cells(&self) -> u16 {
        self.offset.round().clamp(0.0, u16::MAX as f32) as u16
    }

    pub fn viewport(&self) -> f32 {
        self.viewport
    }

    pub fn item_count(&self) -> usize {
        self.extents.len()
    }

    pub fn content_extent(&self) -> f32 {
        let items: f32 = self.extents.iter().sum();
        let gaps = self.gap * self.extents.len().saturating_sub(1) as f32;
        items + gaps
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_extent() - self.viewport).max(0.0)
    }

    pub fn is_observed(&self, source: ChangeSource) -> bool {
        self.observers.is_observed(source)
    }

    /// Live listeners across all sources.
    pub fn observer_count(&self) -> usize {
        self.observers.active()
    }

    /// Items overlapping the viewport, with their spans in content coordinates.
    pub fn visible_items(&self) -> impl Iterator<Item = (usize, ItemSpan)> + '_ {
        let start = self.offset;
        let end = self.offset + self.viewport;
        (0..self.extents.len())
            .filter_map(|i| self.item_span(i).map(|span| (i, span)))
            .filter(move |(_, span)| span.end() > start && span.start < end)
    }

    fn set_offset(&mut self, offset: f32) {
        let offset = offset.clamp(0.0, self.max_offset());
        if offset != self.offset {
            self.offset = offset;
            self.notify(ChangeSource::Scroll);
        }
    }

    fn clamp_offset(&mut self) {
        let max = self.max_offset();
        if let Some(target) = self.target.as_mut() {
            *target = target.clamp(0.0, max);
        }
        self.set_offset(self.offset);
    }

    fn notify(&mut self, source: ChangeSource) {
        if self.observers.is_observed(source) && !self.pending.contains(&source) {
            self.pending.push(source);
        }
    }
}

impl ScrollSurface for StripSurface {
    fn measure(&self) -> Measurement {
        Measurement {
            offset: self.offset,
            content_extent: self.content_extent(),
            viewport_extent: self.viewport,
            item_count: self.extents.len(),
            target: self.target,
        }
    }

    fn item_span(&self, index: usize) -> Option<ItemSpan> {
        if index >= self.extents.len() {
            return None;
        }
        let before: f32 = self.extents[..index].iter().sum();
        Some(ItemSpan::new(before + self.gap * index as f32, self.extents[index]))
    }

    fn scroll_by(&mut self, delta: f32, behavior: ScrollBehavior) {
        let base = match behavior {
            ScrollBehavior::Instant => self.offset,
            ScrollBehavior::Smooth => self.target.unwrap_or(self.offset),
        };
        self.scroll_to(base + delta, behavior);
    }

    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        match behavior {
            ScrollBehavior::Instant => {
                self.target = None;
                self.set_offset(offset);
            }
            ScrollBehavior::Smooth => {
                let target = offset.clamp(0.0, self.max_offset());
                if target == self.offset {
                    self.target = None;
                } else {
                    self.target = Some(target);
                }
            }
        }
    }

    fn observe(&self, source: ChangeSource) -> Subscription {
        self.observers.subscribe(source)
    }
}
