//! Tool names, dispatch and the `execute` acknowledgement.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ToolError};
use crate::payload::{CarouselPayload, GalleryPayload, StepsPayload, TimelinePayload};
use crate::schema::{self, ToolSpec};

/// What every tool's `execute` returns once its input decodes.
pub const SUCCESS: &str = "Success";

/// The visualization tools an agent can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Carousel,
    ImageGallery,
    Steps,
    Timeline,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [Self::Carousel, Self::ImageGallery, Self::Steps, Self::Timeline];

    /// Name the agent calls the tool by.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Carousel => "createCarousel",
            Self::ImageGallery => "createImageGallery",
            Self::Steps => "createSteps",
            Self::Timeline => "createTimeline",
        }
    }

    /// Prefix of the rendered card title.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Carousel => "Carousel",
            Self::ImageGallery => "Gallery",
            Self::Steps => "Steps",
            Self::Timeline => "Timeline",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn spec(self) -> ToolSpec {
        let (description, input_schema) = match self {
            Self::Carousel => (schema::CAROUSEL_DESCRIPTION, schema::carousel_schema()),
            Self::ImageGallery => (schema::GALLERY_DESCRIPTION, schema::gallery_schema()),
            Self::Steps => (schema::STEPS_DESCRIPTION, schema::steps_schema()),
            Self::Timeline => (schema::TIMELINE_DESCRIPTION, schema::timeline_schema()),
        };
        ToolSpec {
            name: self.name(),
            description,
            input_schema,
        }
    }
}

/// Every tool spec, in registration order.
pub fn specs() -> Vec<ToolSpec> {
    ToolKind::ALL.into_iter().map(ToolKind::spec).collect()
}

/// A decoded tool input.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPayload {
    Carousel(CarouselPayload),
    ImageGallery(GalleryPayload),
    Steps(StepsPayload),
    Timeline(TimelinePayload),
}

fn decode<T: DeserializeOwned>(kind: ToolKind, input: &Value) -> Result<T> {
    T::deserialize(input).map_err(|source| {
        #[cfg(feature = "tracing")]
        tracing::warn!(message = "tool.payload_rejected", tool = kind.name(), error = %source);
        ToolError::Payload {
            tool: kind.name(),
            source,
        }
    })
}

impl ToolPayload {
    pub fn decode(kind: ToolKind, input: &Value) -> Result<Self> {
        Ok(match kind {
            ToolKind::Carousel => Self::Carousel(decode(kind, input)?),
            ToolKind::ImageGallery => Self::ImageGallery(decode(kind, input)?),
            ToolKind::Steps => Self::Steps(decode(kind, input)?),
            ToolKind::Timeline => Self::Timeline(decode(kind, input)?),
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Carousel(_) => ToolKind::Carousel,
            Self::ImageGallery(_) => ToolKind::ImageGallery,
            Self::Steps(_) => ToolKind::Steps,
            Self::Timeline(_) => ToolKind::Timeline,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Carousel(p) => &p.title,
            Self::ImageGallery(p) => &p.title,
            Self::Steps(p) => &p.title,
            Self::Timeline(p) => &p.title,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Carousel(p) => p.description.as_deref(),
            Self::ImageGallery(p) => p.description.as_deref(),
            Self::Steps(p) => p.description.as_deref(),
            Self::Timeline(p) => p.description.as_deref(),
        }
    }

    /// The payload as agent-facing JSON.
    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            Self::Carousel(p) => serde_json::to_value(p)?,
            Self::ImageGallery(p) => serde_json::to_value(p)?,
            Self::Steps(p) => serde_json::to_value(p)?,
            Self::Timeline(p) => serde_json::to_value(p)?,
        };
        Ok(value)
    }
}

/// Resolve a tool by name and decode its input.
pub fn decode_call(name: &str, input: &Value) -> Result<ToolPayload> {
    let kind = ToolKind::from_name(name).ok_or_else(|| ToolError::unknown(name))?;
    ToolPayload::decode(kind, input)
}

/// Run a tool. Visualization tools have no side effects: a valid input is
/// acknowledged with [`SUCCESS`] and the client renders it.
pub fn execute(name: &str, input: &Value) -> Result<&'static str> {
    decode_call(name, input)?;
    Ok(SUCCESS)
}
