#![forbid(unsafe_code)]

//! A rendered tool call: the labeled card, the raw-data toggle, and the
//! widget the payload describes.

use chrono::{DateTime, Utc};
use cviz_core::event::Event;
use cviz_core::geometry::Rect;
use cviz_core::page::Page;
use cviz_render::frame::{Frame, Hit, HitId};
use cviz_widgets::block::Block;
use cviz_widgets::carousel::{Carousel, CarouselItem, CarouselState};
use cviz_widgets::gallery::{Gallery, GalleryAction, GalleryImage, GalleryState};
use cviz_widgets::json_view::{JsonPopover, JsonToggle, JsonViewState};
use cviz_widgets::lightbox::{Lightbox, LightboxConfig};
use cviz_widgets::scroll_strip::Direction;
use cviz_widgets::steps::{Step, Steps};
use cviz_widgets::theme::Theme;
use cviz_widgets::timeline::{Timeline, TimelineEvent};
use cviz_widgets::{StatefulWidget, Widget};
use serde_json::Value;

use crate::error::Result;
use crate::registry::{ToolKind, ToolPayload, decode_call};

/// Rows the carousel body takes.
pub const CAROUSEL_HEIGHT: u16 = 8;
/// Hit ids one invocation reserves, starting at its base id.
pub const IDS_PER_INVOCATION: u32 = 3;

/// Card border plus the header row.
const CHROME_ROWS: u16 = 3;

/// Hit ids of one invocation's interactive parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationIds {
    pub toggle: HitId,
    pub widget: HitId,
    pub overlay: HitId,
}

impl InvocationIds {
    /// Three consecutive ids starting at `base`, wrapping past `u32::MAX`.
    pub const fn from_base(base: HitId) -> Self {
        Self {
            toggle: HitId::new(base.0),
            widget: HitId::new(base.0.wrapping_add(1)),
            overlay: HitId::new(base.0.wrapping_add(2)),
        }
    }
}

#[derive(Debug)]
enum Body {
    Carousel {
        items: Vec<CarouselItem>,
        state: CarouselState,
    },
    Gallery {
        images: Vec<GalleryImage>,
        state: GalleryState,
    },
    Steps(Vec<Step>),
    Timeline(Vec<TimelineEvent>),
}

/// What an event did to an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationAction {
    /// The raw-data popover opened, closed or scrolled.
    RawData,
    Carousel(Direction),
    Gallery(GalleryAction),
}

#[derive(Debug)]
pub struct Invocation {
    kind: ToolKind,
    title: String,
    description: Option<String>,
    input: Value,
    ids: InvocationIds,
    json: JsonViewState,
    body: Body,
    now: DateTime<Utc>,
    theme: Theme,
}

impl Invocation {
    /// Decode a tool call. `input` is kept verbatim for the raw-data view.
    pub fn new(name: &str, input: Value, page: Page, base: HitId) -> Result<Self> {
        let payload = decode_call(name, &input)?;
        Ok(Self::build(payload, input, page, base))
    }

    /// Render an already decoded payload.
    pub fn from_payload(payload: ToolPayload, page: Page, base: HitId) -> Result<Self> {
        let input = payload.to_value()?;
        Ok(Self::build(payload, input, page, base))
    }

    fn build(payload: ToolPayload, input: Value, page: Page, base: HitId) -> Self {
        let ids = InvocationIds::from_base(base);
        let kind = payload.kind();
        let title = payload.title().to_string();
        let description = payload.description().map(str::to_string);

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "invocation.create", tool = kind.name(), base = base.0);

        let body = match payload {
            ToolPayload::Carousel(p) => Body::Carousel {
                state: CarouselState::new(p.items_to_scroll()).hit_id(ids.widget),
                items: p.to_items(),
            },
            ToolPayload::ImageGallery(p) => {
                let images = p.to_images();
                Body::Gallery {
                    state: GalleryState::new(page, images.len(), ids.widget, ids.overlay),
                    images,
                }
            }
            ToolPayload::Steps(p) => Body::Steps(p.to_steps()),
            ToolPayload::Timeline(p) => Body::Timeline(p.to_events()),
        };

        Self {
            kind,
            title,
            description,
            input,
            ids,
            json: JsonViewState::new(ids.toggle),
            body,
            now: Utc::now(),
            theme: Theme::default(),
        }
    }

    /// Reference time for relative timeline timestamps.
    #[must_use]
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn ids(&self) -> InvocationIds {
        self.ids
    }

    /// Card title, e.g. `Carousel - Pricing`.
    pub fn card_title(&self) -> String {
        format!("{} - {}", self.kind.label(), self.title)
    }

    /// The input exactly as the agent sent it.
    pub fn input(&self) -> &Value {
        &self.input
    }

    pub fn raw_data(&self) -> &JsonViewState {
        &self.json
    }

    pub fn carousel(&self) -> Option<&CarouselState> {
        match &self.body {
            Body::Carousel { state, .. } => Some(state),
            _ => None,
        }
    }

    pub fn gallery(&self) -> Option<&GalleryState> {
        match &self.body {
            Body::Gallery { state, .. } => Some(state),
            _ => None,
        }
    }

    /// Whether the invocation has an overlay open over the whole frame.
    pub fn has_overlay(&self) -> bool {
        self.gallery().is_some_and(|g| g.viewer().is_open())
    }

    fn body_width(width: u16) -> u16 {
        width.saturating_sub(4)
    }

    /// Rows the card needs at `width`.
    pub fn height(&self, width: u16) -> u16 {
        let inner = Self::body_width(width);
        let body = match &self.body {
            Body::Carousel { .. } => CAROUSEL_HEIGHT,
            Body::Gallery { images, .. } => Gallery::new(images).height(),
            Body::Steps(steps) => Steps::new(steps).height(inner),
            Body::Timeline(events) => Timeline::new(events).now(self.now).height(inner),
        };
        body.saturating_add(CHROME_ROWS)
    }

    /// Route one event. An open lightbox sees events first, then the raw-data
    /// popover, then the widget.
    pub fn handle_event(&mut self, event: &Event, hit: Option<Hit>) -> Option<InvocationAction> {
        if let Body::Gallery { state, .. } = &mut self.body
            && state.viewer().is_open()
        {
            return state.handle_event(event, hit).map(InvocationAction::Gallery);
        }
        if self.json.handle_event(event, hit) {
            return Some(InvocationAction::RawData);
        }
        match &mut self.body {
            Body::Carousel { state, .. } => state.handle_event(event, hit).map(InvocationAction::Carousel),
            Body::Gallery { state, .. } => state.handle_event(event, hit).map(InvocationAction::Gallery),
            Body::Steps(_) | Body::Timeline(_) => None,
        }
    }

    /// Advance animations one frame. Returns whether anything still moves.
    pub fn tick(&mut self) -> bool {
        match &mut self.body {
            Body::Carousel { state, .. } => state.tick(),
            Body::Gallery { state, .. } => state.tick(),
            Body::Steps(_) | Body::Timeline(_) => false,
        }
    }

    /// Draw the card into `area`.
    pub fn render(&mut self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Invocation",
            tool = self.kind.name(),
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let title = self.card_title();
        let block = Block::card()
            .title(&title)
            .title_style(self.theme.title())
            .border_style(self.theme.chrome());
        block.render(area, frame);
        let inner = block.inner(area).shrink_x(1);
        if inner.is_empty() {
            return;
        }

        let toggle_width = JsonToggle::width().min(inner.width);
        let toggle = Rect::new(inner.right() - toggle_width, inner.y, toggle_width, 1);
        if let Some(description) = &self.description {
            frame.buffer.put_str(
                inner.x,
                inner.y,
                description,
                self.theme.secondary(),
                toggle.x.saturating_sub(1),
            );
        }
        JsonToggle::new(&self.json).theme(self.theme).render(toggle, frame);

        let (_, body) = inner.split_top(1);
        match &mut self.body {
            Body::Carousel { items, state } => {
                Carousel::new(items).theme(self.theme).render(body, frame, state);
            }
            Body::Gallery { images, state } => {
                Gallery::new(images).theme(self.theme).render(body, frame, state);
            }
            Body::Steps(steps) => Steps::new(steps).theme(self.theme).render(body, frame),
            Body::Timeline(events) => Timeline::new(events)
                .now(self.now)
                .theme(self.theme)
                .render(body, frame),
        }

        JsonPopover::new(&self.input)
            .theme(self.theme)
            .render(body, frame, &mut self.json);
    }

    /// Draw full-frame overlays (the gallery lightbox). Call after every
    /// card has been rendered.
    pub fn render_overlay(&mut self, area: Rect, frame: &mut Frame) {
        if let Body::Gallery { images, state } = &mut self.body {
            Lightbox::new(images)
                .config(LightboxConfig::default().theme(self.theme))
                .render(area, frame, state.viewer_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_consecutive() {
        let ids = InvocationIds::from_base(HitId::new(10));
        assert_eq!((ids.toggle, ids.widget, ids.overlay), (HitId::new(10), HitId::new(11), HitId::new(12)));
    }

    #[test]
    fn ids_wrap_at_the_top_of_the_range() {
        let ids = InvocationIds::from_base(HitId::new(u32::MAX - 1));
        assert_eq!(ids.toggle, HitId::new(u32::MAX - 1));
        assert_eq!(ids.widget, HitId::new(u32::MAX));
        assert_eq!(ids.overlay, HitId::new(0));
    }
}
