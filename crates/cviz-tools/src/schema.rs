//! Agent-facing tool descriptions and JSON input schemas.

use serde::Serialize;
use serde_json::{Value, json};

/// What an agent sees for one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn array_of(items: Value, description: &str) -> Value {
    json!({ "type": "array", "items": items, "description": description })
}

pub const CAROUSEL_DESCRIPTION: &str = "Create a horizontal scrolling carousel for displaying multiple items side-by-side. Supports markdown formatting including images, links, and text formatting. Use for product showcases, feature highlights, testimonials, pricing tiers, or any content where users benefit from browsing items horizontally with smooth scrolling and navigation buttons.";

pub const GALLERY_DESCRIPTION: &str = "Create an image gallery with responsive grid layouts and modal lightbox. Use for displaying collections of images like product photos, portfolios, team members, before/after comparisons, or any visual content that benefits from being viewable in detail. Users can click images to view full-size with keyboard navigation.";

pub const STEPS_DESCRIPTION: &str = "Create a vertical steps visualization showing sequential instructions or procedures. Use for recipes, tutorials, setup guides, workflows, or any ordered list of instructions where users need to follow steps in sequence.";

pub const TIMELINE_DESCRIPTION: &str = "Create a timeline visualization showing chronological events with status indicators. Use for project milestones, event chronologies, process steps, audit trails, or any time-based sequential data with status tracking (pending/in-progress/complete).";

pub fn carousel_schema() -> Value {
    let item = object(
        json!({
            "content": string("Content for this carousel item. Supports markdown including images (![alt](url)), links ([text](url)), bold, italic, etc."),
            "id": string("Optional unique identifier for the item"),
        }),
        &["content"],
    );
    object(
        json!({
            "title": string("Title for the carousel (e.g., 'Featured Products', 'Customer Reviews')"),
            "description": string("Optional description or context for the carousel"),
            "items": array_of(item, "Array of items to display in the carousel"),
            "itemsToScroll": {
                "type": "number",
                "description": "Optional: how many items to scroll when clicking prev/next buttons (defaults to 1)",
            },
        }),
        &["title", "items"],
    )
}

pub fn gallery_schema() -> Value {
    let image = object(
        json!({
            "src": string("Image URL (must be publicly accessible)"),
            "alt": string("Alt text describing the image for accessibility"),
            "details": string("Optional caption or details shown in the lightbox modal"),
        }),
        &["src"],
    );
    object(
        json!({
            "title": string("Title for the gallery (e.g., 'Product Variations', 'Architecture Examples')"),
            "description": string("Optional description or context for the gallery"),
            "images": array_of(image, "Array of images to display in the gallery"),
        }),
        &["title", "images"],
    )
}

pub fn steps_schema() -> Value {
    let step = object(
        json!({
            "title": string("Step title or heading"),
            "details": string("Detailed instructions for this step"),
            "number": {
                "type": "number",
                "description": "Optional custom step number (defaults to auto-numbering)",
            },
        }),
        &["title", "details"],
    );
    object(
        json!({
            "title": string("Title for the steps (e.g., 'How to Deploy App')"),
            "description": string("Optional description or context for the steps"),
            "steps": array_of(step, "Array of steps in sequential order"),
        }),
        &["title", "steps"],
    )
}

pub fn timeline_schema() -> Value {
    let event = object(
        json!({
            "title": string("Event title"),
            "description": string("Optional detailed description of the event"),
            "timestamp": string("ISO 8601 timestamp or relative time string (e.g., '2024-01-15T10:00:00Z' or 'Yesterday')"),
            "status": {
                "type": "string",
                "enum": ["pending", "in-progress", "complete"],
                "description": "Event status: pending (gray outline), in-progress (blue), complete (green)",
            },
            "icon": string("Optional Lucide icon name (e.g., 'CheckCircle', 'Clock', 'Zap')"),
        }),
        &["title", "timestamp", "status"],
    );
    object(
        json!({
            "title": string("Title for the timeline"),
            "description": string("Optional description or context for the timeline"),
            "events": array_of(event, "Array of timeline events in chronological order"),
        }),
        &["title", "events"],
    )
}
