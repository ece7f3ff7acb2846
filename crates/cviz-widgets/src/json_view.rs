#![forbid(unsafe_code)]

//! Raw-data inspection: a `{ }` toggle and a popover showing the exact
//! payload a tool was invoked with.

use cviz_core::event::{Event, KeyCode};
use cviz_core::geometry::Rect;
use cviz_render::Style;
use cviz_render::cell::Cell;
use cviz_render::frame::{Frame, Hit, HitId, HitRegion};
use cviz_render::text::Text;

use crate::block::Block;
use crate::paragraph::Paragraph;
use crate::theme::Theme;
use crate::{StatefulWidget, Widget, draw_text_span, set_style_area};

const TOGGLE_LABEL: &str = "{ }";
const TITLE: &str = "Raw data";

/// Open/scroll state of a [`JsonPopover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonViewState {
    open: bool,
    scroll: u16,
    hit_id: HitId,
}

impl JsonViewState {
    pub fn new(hit_id: HitId) -> Self {
        Self {
            hit_id,
            ..Self::default()
        }
    }

    pub fn id(&self) -> HitId {
        self.hit_id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.scroll = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.scroll = 0;
    }

    /// Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: &Event, hit: Option<Hit>) -> bool {
        match event {
            Event::Mouse(mouse) if mouse.is_left_click() => match hit {
                Some((id, HitRegion::Button, _)) if id == self.hit_id => {
                    self.toggle();
                    true
                }
                Some((id, HitRegion::Content, _)) if id == self.hit_id => self.open,
                _ => false,
            },
            Event::Key(key) if self.open && key.is_actionable() => match key.code {
                KeyCode::Escape => {
                    self.close();
                    true
                }
                KeyCode::Up => {
                    self.scroll = self.scroll.saturating_sub(1);
                    true
                }
                KeyCode::Down => {
                    self.scroll = self.scroll.saturating_add(1);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

/// The `{ }` button that opens and closes the popover.
#[derive(Debug, Clone, Copy)]
pub struct JsonToggle {
    hit_id: HitId,
    theme: Theme,
}

impl JsonToggle {
    pub fn new(state: &JsonViewState) -> Self {
        Self {
            hit_id: state.hit_id,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub const fn width() -> u16 {
        TOGGLE_LABEL.len() as u16
    }
}

impl Widget for JsonToggle {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let end = draw_text_span(
            &mut frame.buffer,
            area.x,
            area.y,
            TOGGLE_LABEL,
            self.theme.secondary(),
            area.right(),
        );
        frame.register_hit(
            Rect::new(area.x, area.y, end - area.x, 1),
            self.hit_id,
            HitRegion::Button,
            0,
        );
    }
}

/// Pretty-printed JSON in a bordered popover.
#[derive(Debug, Clone)]
pub struct JsonPopover<'a> {
    value: &'a serde_json::Value,
    max_width: u16,
    theme: Theme,
}

impl<'a> JsonPopover<'a> {
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self {
            value,
            max_width: 60,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = width.max(10);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Pretty-printed payload.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(self.value).unwrap_or_else(|_| self.value.to_string())
    }

    /// Popover rectangle inside `area`, anchored to its top right.
    pub fn popover_rect(&self, area: Rect, text: &Text) -> Rect {
        let width = (text.width() as u16)
            .saturating_add(4)
            .min(self.max_width)
            .min(area.width);
        let height = (text.height() as u16).saturating_add(2).min(area.height);
        Rect::new(area.right() - width, area.y, width, height)
    }
}

impl StatefulWidget for JsonPopover<'_> {
    type State = JsonViewState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut JsonViewState) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "JsonPopover",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if !state.open || area.is_empty() {
            return;
        }
        let text = Text::raw(&self.pretty());
        let rect = self.popover_rect(area, &text);
        let block = Block::bordered()
            .title(TITLE)
            .title_style(self.theme.title())
            .border_style(self.theme.chrome());
        let inner = block.inner(rect).shrink_x(1);

        let max_scroll = (text.height() as u16).saturating_sub(inner.height);
        state.scroll = state.scroll.min(max_scroll);

        frame.buffer.fill(rect, Cell::default());
        set_style_area(&mut frame.buffer, rect, Style::new().bg(self.theme.surface));
        block.render(rect, frame);
        Paragraph::new(text)
            .style(self.theme.body())
            .scroll(state.scroll)
            .render(inner, frame);
        frame.register_hit(rect, state.hit_id, HitRegion::Content, 0);
    }
}
