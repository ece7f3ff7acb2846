//! Tool input payloads as agents send them (camelCase JSON).
//!
//! Payloads keep the agent's data as-is; conversion into widget types happens
//! through the `to_*` helpers so the raw input can still be shown verbatim.

use cviz_widgets::carousel::CarouselItem;
use cviz_widgets::gallery::GalleryImage;
use cviz_widgets::steps::Step;
use cviz_widgets::timeline::{Status, TimelineEvent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<CarouselItemPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_to_scroll: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItemPayload {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Cards per arrow press. Missing, non-positive and fractional values mean 1.
pub fn items_to_scroll(requested: Option<f64>) -> usize {
    match requested {
        Some(n) if n.is_finite() && n >= 1.0 && n.fract() == 0.0 => {
            n.min(usize::MAX as f64) as usize
        }
        _ => 1,
    }
}

impl CarouselPayload {
    pub fn items_to_scroll(&self) -> usize {
        items_to_scroll(self.items_to_scroll)
    }

    pub fn to_items(&self) -> Vec<CarouselItem> {
        self.items
            .iter()
            .map(|item| {
                let card = CarouselItem::new(item.content.clone());
                match &item.id {
                    Some(id) => card.id(id.clone()),
                    None => card,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Vec<ImagePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl GalleryPayload {
    pub fn to_images(&self) -> Vec<GalleryImage> {
        self.images
            .iter()
            .map(|image| {
                let mut out = GalleryImage::new(image.src.clone());
                if let Some(alt) = &image.alt {
                    out = out.alt(alt.clone());
                }
                if let Some(details) = &image.details {
                    out = out.details(details.clone());
                }
                out
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<StepPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepPayload {
    pub title: String,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
}

impl StepsPayload {
    pub fn to_steps(&self) -> Vec<Step> {
        self.steps
            .iter()
            .map(|step| Step {
                title: step.title.clone(),
                details: step.details.clone(),
                number: step.number,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    Pending,
    InProgress,
    Complete,
}

impl From<EventStatus> for Status {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Pending => Status::Pending,
            EventStatus::InProgress => Status::InProgress,
            EventStatus::Complete => Status::Complete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub events: Vec<EventPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub timestamp: String,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl TimelinePayload {
    pub fn to_events(&self) -> Vec<TimelineEvent> {
        self.events
            .iter()
            .map(|event| TimelineEvent {
                title: event.title.clone(),
                description: event.description.clone(),
                timestamp: event.timestamp.clone(),
                status: event.status.into(),
                icon: event.icon.clone(),
            })
            .collect()
    }
}
