#![forbid(unsafe_code)]

//! Navigation state for a horizontally scrollable strip.
//!
//! [`ScrollStrip`] never stores the scroll offset. Every notification from the
//! surface triggers a fresh [`ScrollSurface::measure`] and a full
//! recomputation through [`compute_visibility`], so the flags cannot drift
//! from what is on screen no matter which trigger fired or in what order.
//!
//! Navigation controls are [`StripButton`]s borrowed from the strip they
//! drive; a button cannot exist without its controller.

use cviz_core::geometry::Rect;
use cviz_core::observe::Subscription;
use cviz_core::surface::{ChangeSource, ItemSpan, ScrollBehavior, ScrollSurface};
use cviz_render::frame::{Frame, HitData, HitId, HitRegion};
use cviz_render::Style;

use crate::{Widget, draw_text_span};

/// Tolerance for sub-cell rounding at the far end of the strip.
pub const EPSILON: f32 = 1.0;

/// Scroll direction along the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub const fn sign(self) -> f32 {
        match self {
            Self::Backward => -1.0,
            Self::Forward => 1.0,
        }
    }

    /// Hit payload a [`StripButton`] registers.
    pub const fn hit_data(self) -> HitData {
        match self {
            Self::Backward => 0,
            Self::Forward => 1,
        }
    }

    pub const fn from_hit_data(data: HitData) -> Option<Self> {
        match data {
            0 => Some(Self::Backward),
            1 => Some(Self::Forward),
            _ => None,
        }
    }
}

/// Which navigation controls should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub backward: bool,
    pub forward: bool,
}

impl Visibility {
    pub const fn allows(self, direction: Direction) -> bool {
        match direction {
            Direction::Backward => self.backward,
            Direction::Forward => self.forward,
        }
    }
}

/// Derive control visibility from one measurement.
///
/// Content that fits in the viewport shows neither control. Otherwise backward
/// shows once the strip has left its start, and forward shows until the offset
/// is within [`EPSILON`] of the end.
pub fn compute_visibility(offset: f32, content_extent: f32, viewport_extent: f32) -> Visibility {
    if content_extent <= viewport_extent {
        return Visibility::default();
    }
    Visibility {
        backward: offset > 0.0,
        forward: offset < content_extent - viewport_extent - EPSILON,
    }
}

/// Controller for one scrollable strip.
///
/// Lifecycle: [`ScrollStrip::initialize`] binds to a surface and subscribes to
/// its scroll, resize and content notifications; [`ScrollStrip::teardown`] (or
/// dropping the strip) releases them. Everything in between is a no-op until
/// the strip is bound.
#[derive(Debug)]
pub struct ScrollStrip {
    step: usize,
    visibility: Visibility,
    subscriptions: Vec<Subscription>,
}

impl Default for ScrollStrip {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ScrollStrip {
    /// A strip that moves `step` items per navigation command (at least one).
    pub fn new(step: usize) -> Self {
        Self {
            step: step.max(1),
            visibility: Visibility::default(),
            subscriptions: Vec::new(),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn set_step(&mut self, step: usize) {
        self.step = step.max(1);
    }

    pub fn is_bound(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Subscribe to `surface` and take the first measurement.
    ///
    /// Re-initializing drops the previous subscriptions first.
    pub fn initialize<S: ScrollSurface + ?Sized>(&mut self, surface: &S) {
        self.subscriptions.clear();
        self.subscriptions = ChangeSource::ALL
            .iter()
            .map(|&source| surface.observe(source))
            .collect();
        self.recompute(surface, None);
    }

    /// React to one change notification from the bound surface.
    pub fn handle_change<S: ScrollSurface + ?Sized>(&mut self, source: ChangeSource, surface: &S) {
        if !self.is_bound() {
            return;
        }
        self.recompute(surface, Some(source));
    }

    fn recompute<S: ScrollSurface + ?Sized>(&mut self, surface: &S, _source: Option<ChangeSource>) {
        let m = surface.measure();
        let next = compute_visibility(m.offset, m.content_extent, m.viewport_extent);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "strip.visibility",
            source = _source.map_or("initialize", ChangeSource::as_str),
            offset = m.offset,
            content = m.content_extent,
            viewport = m.viewport_extent,
            backward = next.backward,
            forward = next.forward,
        );

        self.visibility = next;
    }

    /// Scroll by the configured step.
    pub fn scroll<S: ScrollSurface + ?Sized>(&mut self, direction: Direction, surface: &mut S) {
        self.scroll_by(direction, self.step, surface);
    }

    /// Smooth-scroll `step` items in `direction`.
    ///
    /// Item extent is `content / item_count`, which is exact for uniform items
    /// and an approximation otherwise.
    pub fn scroll_by<S: ScrollSurface + ?Sized>(
        &mut self,
        direction: Direction,
        step: usize,
        surface: &mut S,
    ) {
        if !self.is_bound() {
            return;
        }
        let m = surface.measure();
        if m.item_count == 0 {
            return;
        }
        let item_extent = m.content_extent / m.item_count as f32;
        let amount = item_extent * step.max(1) as f32;
        surface.scroll_by(direction.sign() * amount, ScrollBehavior::Smooth);
    }

    /// Bring item `index` fully into view.
    ///
    /// Visibility is judged where the strip will come to rest, so a reveal
    /// issued mid-animation retargets that animation. An item that is already
    /// fully visible there does not move the strip; otherwise the strip scrolls
    /// so the item is centered, clamped to the valid range.
    pub fn reveal<S: ScrollSurface + ?Sized>(&mut self, index: usize, surface: &mut S) {
        if !self.is_bound() {
            return;
        }
        let Some(span) = surface.item_span(index) else {
            return;
        };
        let m = surface.measure();
        let resting = m.resting_offset();
        if let Some(target) = reveal_target(span, resting, m.viewport_extent, m.max_offset()) {
            surface.scroll_to(target, ScrollBehavior::Smooth);
        }
    }

    /// Release all subscriptions. Visibility resets to hidden.
    pub fn teardown(&mut self) {
        self.subscriptions.clear();
        self.visibility = Visibility::default();
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn can_scroll_backward(&self) -> bool {
        self.visibility.backward
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.visibility.forward
    }

    /// A navigation control driving this strip.
    pub fn button(&self, direction: Direction) -> StripButton<'_> {
        StripButton::new(self, direction)
    }
}

/// Offset that reveals `span`, or `None` if it is already fully visible at `offset`.
pub fn reveal_target(span: ItemSpan, offset: f32, viewport: f32, max_offset: f32) -> Option<f32> {
    if span.start >= offset && span.end() <= offset + viewport {
        return None;
    }
    let target = (span.center() - viewport / 2.0).clamp(0.0, max_offset);
    ((target - offset).abs() > f32::EPSILON).then_some(target)
}

/// A backward/forward arrow bound to its [`ScrollStrip`].
///
/// Renders nothing while its direction is unavailable, so hidden controls
/// also register no hit region.
#[derive(Debug, Clone)]
pub struct StripButton<'a> {
    strip: &'a ScrollStrip,
    direction: Direction,
    hit_id: Option<HitId>,
    style: Style,
}

impl<'a> StripButton<'a> {
    pub fn new(strip: &'a ScrollStrip, direction: Direction) -> Self {
        Self {
            strip,
            direction,
            hit_id: None,
            style: Style::new().bold(),
        }
    }

    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.strip.visibility().allows(self.direction)
    }

    fn glyph(&self) -> &'static str {
        match self.direction {
            Direction::Backward => "‹",
            Direction::Forward => "›",
        }
    }
}

impl Widget for StripButton<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() || !self.is_visible() {
            return;
        }
        let y = area.y + area.height / 2;
        let x = area.x + area.width.saturating_sub(1) / 2;
        draw_text_span(&mut frame.buffer, x, y, self.glyph(), self.style, area.right());
        if let Some(id) = self.hit_id {
            frame.register_hit(area, id, HitRegion::Button, self.direction.hit_data());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip_surface::StripSurface;

    fn strip_surface(items: usize, item: f32, viewport: f32) -> StripSurface {
        let mut surface = StripSurface::new();
        surface.set_uniform_items(items, item);
        surface.set_viewport(viewport);
        surface.drain_changes();
        surface
    }

    #[test]
    fn fitting_content_hides_both() {
        assert_eq!(compute_visibility(0.0, 50.0, 50.0), Visibility::default());
        assert_eq!(compute_visibility(10.0, 40.0, 50.0), Visibility::default());
    }

    #[test]
    fn start_middle_end() {
        assert_eq!(
            compute_visibility(0.0, 100.0, 60.0),
            Visibility { backward: false, forward: true }
        );
        assert_eq!(
            compute_visibility(20.0, 100.0, 60.0),
            Visibility { backward: true, forward: true }
        );
        assert_eq!(
            compute_visibility(40.0, 100.0, 60.0),
            Visibility { backward: true, forward: false }
        );
    }

    #[test]
    fn within_epsilon_of_end_hides_forward() {
        assert!(!compute_visibility(39.2, 100.0, 60.0).forward);
        assert!(compute_visibility(38.9, 100.0, 60.0).forward);
    }

    #[test]
    fn unbound_strip_ignores_everything() {
        let mut surface = strip_surface(5, 20.0, 60.0);
        let mut strip = ScrollStrip::new(1);
        strip.handle_change(ChangeSource::Resize, &surface);
        strip.scroll(Direction::Forward, &mut surface);
        strip.reveal(4, &mut surface);
        assert_eq!(strip.visibility(), Visibility::default());
        assert!(!surface.is_animating());
        assert_eq!(surface.offset(), 0.0);
    }

    #[test]
    fn initialize_subscribes_to_all_sources() {
        let surface = strip_surface(5, 20.0, 60.0);
        let mut strip = ScrollStrip::new(1);
        strip.initialize(&surface);
        for source in ChangeSource::ALL {
            assert!(surface.is_observed(source));
        }
        assert!(strip.can_scroll_forward());
        strip.teardown();
        for source in ChangeSource::ALL {
            assert!(!surface.is_observed(source));
        }
    }

    #[test]
    fn reinitialize_does_not_duplicate_subscriptions() {
        let surface = strip_surface(5, 20.0, 60.0);
        let mut strip = ScrollStrip::new(1);
        strip.initialize(&surface);
        strip.initialize(&surface);
        assert_eq!(surface.observer_count(), 3);
    }

    #[test]
    fn dropping_strip_releases_subscriptions() {
        let surface = strip_surface(5, 20.0, 60.0);
        let mut strip = ScrollStrip::new(1);
        strip.initialize(&surface);
        drop(strip);
        assert_eq!(surface.observer_count(), 0);
    }

    #[test]
    fn scroll_by_moves_step_item_extents() {
        let mut surface = strip_surface(5, 20.0, 60.0);
        let mut strip = ScrollStrip::new(2);
        strip.initialize(&surface);
        strip.scroll(Direction::Forward, &mut surface);
        surface.settle();
        assert_eq!(surface.offset(), 40.0);
    }

    #[test]
    fn scroll_with_zero_items_is_noop() {
        let mut surface = strip_surface(0, 20.0, 60.0);
        let mut strip = ScrollStrip::new(1);
        strip.initialize(&surface);
        strip.scroll(Direction::Forward, &mut surface);
        assert!(!surface.is_animating());
    }

    #[test]
    fn step_is_at_least_one() {
        assert_eq!(ScrollStrip::new(0).step(), 1);
        let mut strip = ScrollStrip::default();
        strip.set_step(0);
        assert_eq!(strip.step(), 1);
    }

    #[test]
    fn reveal_target_leaves_visible_items_alone() {
        let span = ItemSpan::new(10.0, 10.0);
        assert_eq!(reveal_target(span, 0.0, 40.0, 100.0), None);
    }

    #[test]
    fn reveal_target_centers_hidden_items() {
        let span = ItemSpan::new(80.0, 10.0);
        // center 85, viewport 40 -> target 65
        assert_eq!(reveal_target(span, 0.0, 40.0, 100.0), Some(65.0));
    }

    #[test]
    fn reveal_target_clamps_to_range() {
        let first = ItemSpan::new(0.0, 10.0);
        assert_eq!(reveal_target(first, 30.0, 40.0, 100.0), Some(0.0));
        let last = ItemSpan::new(130.0, 10.0);
        assert_eq!(reveal_target(last, 0.0, 40.0, 100.0), Some(100.0));
    }

    #[test]
    fn hidden_button_draws_and_registers_nothing() {
        let strip = ScrollStrip::new(1);
        let mut frame = Frame::with_hit_grid(3, 1);
        strip
            .button(Direction::Backward)
            .hit_id(HitId::new(1))
            .render(Rect::new(0, 0, 3, 1), &mut frame);
        assert_eq!(frame.to_lines(), vec![""]);
        assert_eq!(frame.hit_test(1, 0), None);
    }

    #[test]
    fn visible_button_registers_direction() {
        let surface = strip_surface(5, 20.0, 60.0);
        let mut strip = ScrollStrip::new(1);
        strip.initialize(&surface);
        let mut frame = Frame::with_hit_grid(3, 1);
        strip
            .button(Direction::Forward)
            .hit_id(HitId::new(4))
            .render(Rect::new(0, 0, 3, 1), &mut frame);
        assert_eq!(frame.to_lines(), vec![" ›"]);
        assert_eq!(
            frame.hit_test(0, 0),
            Some((HitId::new(4), HitRegion::Button, Direction::Forward.hit_data()))
        );
    }
}
