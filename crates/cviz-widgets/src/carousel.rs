#![forbid(unsafe_code)]

//! Horizontally scrolling row of markdown cards.
//!
//! [`CarouselState`] owns the strip surface and its [`ScrollStrip`]. Outside
//! code moves the carousel through one command, [`CarouselState::scroll_to`];
//! the arrows drawn by [`Carousel`] are [`crate::scroll_strip::StripButton`]s
//! borrowed from the state, so they only exist alongside the controller they
//! drive.

use cviz_core::event::Event;
use cviz_core::geometry::Rect;
use cviz_render::buffer::Buffer;
use cviz_render::frame::{Frame, Hit, HitId, HitRegion};

use crate::block::Block;
use crate::markdown::MarkdownRenderer;
use crate::paragraph::Paragraph;
use crate::scroll_strip::{Direction, ScrollStrip};
use crate::strip_surface::StripSurface;
use crate::theme::Theme;
use crate::{StatefulWidget, Widget};

/// Viewport width from which two cards fit per view.
pub const MEDIUM_WIDTH: u16 = 60;
/// Viewport width from which three cards fit per view.
pub const WIDE_WIDTH: u16 = 90;
const ARROW_WIDTH: u16 = 2;

/// One card of a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CarouselItem {
    /// Markdown body.
    pub content: String,
    pub id: Option<String>,
}

impl CarouselItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            id: None,
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Cards shown side by side at a given viewport width.
pub fn items_per_view(viewport_width: u16) -> u16 {
    if viewport_width >= WIDE_WIDTH {
        3
    } else if viewport_width >= MEDIUM_WIDTH {
        2
    } else {
        1
    }
}

#[derive(Debug)]
pub struct CarouselState {
    strip: ScrollStrip,
    surface: StripSurface,
    hit_id: HitId,
}

impl CarouselState {
    /// `items_to_scroll` cards per arrow press (at least one).
    pub fn new(items_to_scroll: usize) -> Self {
        Self {
            strip: ScrollStrip::new(items_to_scroll),
            surface: StripSurface::new(),
            hit_id: HitId::default(),
        }
    }

    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = id;
        self
    }

    pub fn id(&self) -> HitId {
        self.hit_id
    }

    /// Bind the controller to the surface. Rendering mounts automatically.
    pub fn mount(&mut self) {
        if !self.strip.is_bound() {
            self.strip.initialize(&self.surface);
        }
    }

    pub fn unmount(&mut self) {
        self.strip.teardown();
    }

    /// Scroll one step of cards in `direction`.
    pub fn scroll_to(&mut self, direction: Direction) {
        self.strip.scroll(direction, &mut self.surface);
    }

    /// Advance a smooth scroll one frame. Returns whether it is still moving.
    pub fn tick(&mut self) -> bool {
        let moving = self.surface.tick();
        self.pump();
        moving
    }

    /// Finish any smooth scroll at once.
    pub fn settle(&mut self) {
        self.surface.settle();
        self.pump();
    }

    /// Direct user scroll of the strip (mouse wheel).
    pub fn user_scroll(&mut self, delta: f32) {
        self.surface.user_scroll(delta);
        self.pump();
    }

    fn pump(&mut self) {
        for source in self.surface.drain_changes() {
            self.strip.handle_change(source, &self.surface);
        }
    }

    fn layout(&mut self, viewport: u16, card_width: u16, count: usize) {
        self.surface.set_uniform_items(count, f32::from(card_width));
        self.surface.set_viewport(f32::from(viewport));
        self.pump();
    }

    pub fn strip(&self) -> &ScrollStrip {
        &self.strip
    }

    pub fn surface(&self) -> &StripSurface {
        &self.surface
    }

    pub fn can_scroll_backward(&self) -> bool {
        self.strip.can_scroll_backward()
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.strip.can_scroll_forward()
    }

    /// Handle a click on one of this carousel's arrows.
    pub fn handle_event(&mut self, event: &Event, hit: Option<Hit>) -> Option<Direction> {
        let Event::Mouse(mouse) = event else {
            return None;
        };
        if !mouse.is_left_click() {
            return None;
        }
        match hit? {
            (id, HitRegion::Button, data) if id == self.hit_id => {
                let direction = Direction::from_hit_data(data)?;
                self.scroll_to(direction);
                Some(direction)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Carousel<'a> {
    items: &'a [CarouselItem],
    per_view: Option<u16>,
    theme: Theme,
}

impl<'a> Carousel<'a> {
    pub fn new(items: &'a [CarouselItem]) -> Self {
        Self {
            items,
            per_view: None,
            theme: Theme::default(),
        }
    }

    /// Fix the number of cards per view instead of deriving it from width.
    #[must_use]
    pub fn per_view(mut self, count: u16) -> Self {
        self.per_view = Some(count.max(1));
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Card width for a viewport of `width` cells.
    pub fn card_width(&self, width: u16) -> u16 {
        let per_view = self.per_view.unwrap_or_else(|| items_per_view(width));
        (width / per_view).max(1)
    }

    fn render_cards(&self, card_width: u16, height: u16) -> Buffer {
        let count = self.items.len().min(u16::MAX as usize / card_width as usize) as u16;
        let mut buf = Buffer::new(count * card_width, height);
        for (i, item) in self.items.iter().take(count as usize).enumerate() {
            // One column of air between neighbouring cards.
            let rect = Rect::new(i as u16 * card_width, 0, card_width.saturating_sub(1), height);
            let block = Block::card().border_style(self.theme.chrome());
            let inner = block.inner(rect).shrink_x(1);
            let text = MarkdownRenderer::default()
                .rule_width(inner.width)
                .render(&item.content);
            block.render_buffer(rect, &mut buf);
            Paragraph::new(text)
                .wrap(true)
                .style(self.theme.body())
                .render_buffer(inner, &mut buf);
        }
        buf
    }
}

impl StatefulWidget for Carousel<'_> {
    type State = CarouselState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut CarouselState) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Carousel",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.width <= ARROW_WIDTH * 2 || area.is_empty() {
            return;
        }
        let viewport = Rect::new(
            area.x + ARROW_WIDTH,
            area.y,
            area.width - ARROW_WIDTH * 2,
            area.height,
        );
        let card_width = self.card_width(viewport.width);

        state.mount();
        state.layout(viewport.width, card_width, self.items.len());

        let cards = self.render_cards(card_width, viewport.height);
        frame
            .buffer
            .blit_columns(&cards, state.surface.offset_cells(), viewport);

        let left = Rect::new(area.x, area.y, ARROW_WIDTH, area.height);
        let right = Rect::new(area.right() - ARROW_WIDTH, area.y, ARROW_WIDTH, area.height);
        for (direction, rect) in [(Direction::Backward, left), (Direction::Forward, right)] {
            state
                .strip
                .button(direction)
                .hit_id(state.hit_id)
                .style(self.theme.control())
                .render(rect, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cviz_core::event::MouseEvent;

    fn items(n: usize) -> Vec<CarouselItem> {
        (0..n).map(|i| CarouselItem::new(format!("**Card {i}**"))).collect()
    }

    #[test]
    fn per_view_breakpoints() {
        assert_eq!(items_per_view(40), 1);
        assert_eq!(items_per_view(MEDIUM_WIDTH), 2);
        assert_eq!(items_per_view(WIDE_WIDTH), 3);
    }

    #[test]
    fn fitting_items_show_no_arrows() {
        let cards = items(2);
        let mut state = CarouselState::new(1);
        let mut frame = Frame::new(64, 6);
        Carousel::new(&cards).per_view(3).render(frame.bounds(), &mut frame, &mut state);
        assert!(!state.can_scroll_backward());
        assert!(!state.can_scroll_forward());
        let text = frame.to_lines().join("\n");
        assert!(!text.contains('‹') && !text.contains('›'));
    }

    #[test]
    fn first_cards_visible_and_later_clipped() {
        let cards = items(5);
        let mut state = CarouselState::new(1);
        let mut frame = Frame::new(64, 6);
        Carousel::new(&cards).per_view(3).render(frame.bounds(), &mut frame, &mut state);
        let text = frame.to_lines().join("\n");
        assert!(text.contains("Card 0"));
        assert!(text.contains("Card 2"));
        assert!(!text.contains("Card 3"));
        assert!(text.contains('›'));
    }

    #[test]
    fn arrow_click_scrolls() {
        let cards = items(5);
        let mut state = CarouselState::new(2).hit_id(HitId::new(3));
        let mut frame = Frame::with_hit_grid(64, 6);
        Carousel::new(&cards).per_view(3).render(frame.bounds(), &mut frame, &mut state);

        let hit = frame.hit_test(63, 3);
        let click = Event::Mouse(MouseEvent::click(63, 3));
        assert_eq!(state.handle_event(&click, hit), Some(Direction::Forward));
        state.settle();
        assert_eq!(state.surface().offset(), 40.0);

        frame.clear();
        Carousel::new(&cards).per_view(3).render(frame.bounds(), &mut frame, &mut state);
        let text = frame.to_lines().join("\n");
        assert!(text.contains("Card 4"));
        assert!(!text.contains("Card 1"));
    }

    #[test]
    fn clicks_elsewhere_are_ignored() {
        let mut state = CarouselState::new(1).hit_id(HitId::new(3));
        let click = Event::Mouse(MouseEvent::click(0, 0));
        assert_eq!(state.handle_event(&click, None), None);
        let foreign = Some((HitId::new(4), HitRegion::Button, 1));
        assert_eq!(state.handle_event(&click, foreign), None);
    }
}
