#![forbid(unsafe_code)]

//! Contract between scroll controllers and a live horizontal scroll surface.
//!
//! The surface is the only writer of its own offset: it moves when the user
//! scrolls it directly or when a controller asks via [`ScrollSurface::scroll_by`]
//! or [`ScrollSurface::scroll_to`].
//! Controllers never cache the offset; they re-measure on every notification.

use crate::observe::Subscription;

/// The three independent triggers that invalidate a strip's derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// Scroll offset moved.
    Scroll,
    /// Viewport extent changed.
    Resize,
    /// Items were added, removed, or re-measured.
    Content,
}

impl ChangeSource {
    pub const ALL: [ChangeSource; 3] = [Self::Scroll, Self::Resize, Self::Content];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Content => "content",
        }
    }
}

/// A fresh reading of the surface, in cells along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub offset: f32,
    pub content_extent: f32,
    pub viewport_extent: f32,
    pub item_count: usize,
    /// Destination of an in-flight smooth scroll.
    pub target: Option<f32>,
}

impl Measurement {
    /// Largest reachable offset (zero when the content fits).
    pub fn max_offset(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Where the surface comes to rest once any animation finishes.
    pub fn resting_offset(&self) -> f32 {
        self.target.unwrap_or(self.offset)
    }

    /// Whether any content lies outside the viewport.
    pub fn overflows(&self) -> bool {
        self.content_extent > self.viewport_extent
    }
}

/// How a requested scroll should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animate toward the target; completion is not reported.
    #[default]
    Smooth,
    /// Jump immediately.
    Instant,
}

/// Position of one item along the scroll axis, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemSpan {
    pub start: f32,
    pub extent: f32,
}

impl ItemSpan {
    pub const fn new(start: f32, extent: f32) -> Self {
        Self { start, extent }
    }

    pub fn end(&self) -> f32 {
        self.start + self.extent
    }

    pub fn center(&self) -> f32 {
        self.start + self.extent / 2.0
    }
}

/// A horizontally scrollable container the host owns.
pub trait ScrollSurface {
    /// Read the current offset and extents.
    fn measure(&self) -> Measurement;

    /// Span of the item at `index`, if it exists.
    fn item_span(&self, index: usize) -> Option<ItemSpan>;

    /// Request a relative scroll. The surface clamps to its valid range.
    fn scroll_by(&mut self, delta: f32, behavior: ScrollBehavior);

    /// Request an absolute scroll, replacing any pending animation target.
    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior);

    /// Listen for one kind of change. Notifications stop when the guard drops.
    fn observe(&self, source: ChangeSource) -> Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_offset_never_negative() {
        let m = Measurement {
            offset: 0.0,
            content_extent: 10.0,
            viewport_extent: 40.0,
            item_count: 2,
            target: None,
        };
        assert_eq!(m.max_offset(), 0.0);
        assert!(!m.overflows());
    }

    #[test]
    fn resting_offset_prefers_pending_target() {
        let mut m = Measurement {
            offset: 12.5,
            content_extent: 100.0,
            viewport_extent: 30.0,
            item_count: 10,
            target: None,
        };
        assert_eq!(m.resting_offset(), 12.5);
        m.target = Some(70.0);
        assert_eq!(m.resting_offset(), 70.0);
    }

    #[test]
    fn span_edges() {
        let span = ItemSpan::new(10.0, 4.0);
        assert_eq!(span.end(), 14.0);
        assert_eq!(span.center(), 12.0);
    }
}
