//! Rendering tool calls as cards, and the payload rules agents rely on.

use chrono::{TimeZone, Utc};
use cviz_core::event::{Event, KeyCode, KeyEvent, MouseEvent};
use cviz_core::page::Page;
use cviz_render::frame::{Frame, HitId};
use cviz_tools::{Invocation, InvocationAction, ToolError, ToolKind};
use cviz_widgets::gallery::GalleryAction;
use cviz_widgets::viewer::ViewerAction;
use proptest::prelude::*;
use serde_json::json;

fn render(invocation: &mut Invocation, width: u16) -> Frame {
    let height = invocation.height(width);
    let mut frame = Frame::with_hit_grid(width, height);
    invocation.render(frame.bounds(), &mut frame);
    frame
}

fn text(frame: &Frame) -> String {
    frame.to_lines().join("\n")
}

#[test]
fn timeline_shows_unparseable_timestamp_literally() {
    let input = json!({
        "title": "Launch",
        "events": [
            { "title": "Kickoff", "timestamp": "2024-06-15T10:00:00Z", "status": "complete" },
            { "title": "Ship", "timestamp": "not-a-date", "status": "pending", "icon": "Rocket" },
        ],
    });
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let mut invocation = Invocation::new("createTimeline", input, Page::new(), HitId::new(1))
        .unwrap()
        .now(now);
    let frame = render(&mut invocation, 60);
    let out = text(&frame);
    assert!(out.contains("Timeline - Launch"));
    assert!(out.contains("about 2 hours ago"));
    assert!(out.contains("not-a-date"));
    assert!(out.contains('⇪'));
}

#[test]
fn steps_honour_integer_overrides() {
    let input = json!({
        "title": "Deploy",
        "steps": [
            { "title": "Build", "details": "make" },
            { "title": "Test", "details": "make test", "number": 5 },
            { "title": "Ship", "details": "make deploy" },
            { "title": "Celebrate", "details": "cake", "number": 2.5 },
        ],
    });
    let mut invocation = Invocation::new("createSteps", input, Page::new(), HitId::new(1)).unwrap();
    let out = text(&render(&mut invocation, 50));
    assert!(out.contains("Steps - Deploy"));
    assert!(out.contains("(1) Build"));
    assert!(out.contains("(5) Test"));
    assert!(out.contains("(3) Ship"));
    assert!(out.contains("(4) Celebrate"));
}

#[test]
fn raw_data_toggle_shows_exact_input() {
    let input = json!({
        "title": "Deploy",
        "description": "How we ship",
        "steps": [{ "title": "Build", "details": "make" }],
    });
    let mut invocation =
        Invocation::new("createSteps", input.clone(), Page::new(), HitId::new(10)).unwrap();
    assert_eq!(invocation.input(), &input);

    let width = 50;
    let frame = render(&mut invocation, width);
    assert!(text(&frame).contains("How we ship"));
    assert!(text(&frame).contains("{ }"));

    // Toggle sits at the right edge of the header row.
    let x = width - 4;
    let click = Event::Mouse(MouseEvent::click(x, 1));
    assert_eq!(
        invocation.handle_event(&click, frame.hit_test(x, 1)),
        Some(InvocationAction::RawData)
    );
    assert!(invocation.raw_data().is_open());

    let mut frame = Frame::new(width, 20);
    invocation.render(frame.bounds(), &mut frame);
    let out = text(&frame);
    assert!(out.contains("Raw data"));
    assert!(out.contains("\"description\": \"How we ship\""));

    let esc = Event::Key(KeyEvent::new(KeyCode::Escape));
    assert_eq!(invocation.handle_event(&esc, None), Some(InvocationAction::RawData));
    assert!(!invocation.raw_data().is_open());
}

#[test]
fn gallery_tile_opens_lightbox_and_locks_page() {
    let input = json!({
        "title": "Shots",
        "images": [
            { "src": "https://example.com/a.png", "alt": "Front" },
            { "src": "https://example.com/b.png" },
            { "src": "https://example.com/c.png", "details": "Side view" },
        ],
    });
    let page = Page::new();
    let mut invocation =
        Invocation::new("createImageGallery", input, page.clone(), HitId::new(1)).unwrap();
    let frame = render(&mut invocation, 60);
    assert!(text(&frame).contains("Gallery - Shots"));
    assert!(text(&frame).contains("Front"));

    // First tile spans the left column below the header row.
    let (x, y) = (5, 4);
    let click = Event::Mouse(MouseEvent::click(x, y));
    assert_eq!(
        invocation.handle_event(&click, frame.hit_test(x, y)),
        Some(InvocationAction::Gallery(GalleryAction::Opened(0)))
    );
    assert!(invocation.has_overlay());
    assert!(page.is_scroll_locked());

    let mut overlay = Frame::with_hit_grid(80, 24);
    invocation.render_overlay(overlay.bounds(), &mut overlay);
    assert!(text(&overlay).contains("1 / 3"));

    let left = Event::Key(KeyEvent::new(KeyCode::Left));
    assert_eq!(
        invocation.handle_event(&left, None),
        Some(InvocationAction::Gallery(GalleryAction::Viewer(ViewerAction::Selected(2))))
    );
    let esc = Event::Key(KeyEvent::new(KeyCode::Escape));
    invocation.handle_event(&esc, None);
    assert!(!invocation.has_overlay());
    assert!(!page.is_scroll_locked());
    assert_eq!(page.restore_count(), 1);
}

#[test]
fn carousel_uses_items_to_scroll() {
    let items: Vec<_> = (0..6).map(|i| json!({ "content": format!("Card {i}") })).collect();
    let input = json!({ "title": "Plans", "items": items, "itemsToScroll": 2 });
    let mut invocation = Invocation::new("createCarousel", input, Page::new(), HitId::new(1)).unwrap();
    let width = 68;
    let frame = render(&mut invocation, width);
    assert!(text(&frame).contains("Carousel - Plans"));
    let carousel = invocation.carousel().unwrap();
    assert_eq!(carousel.strip().step(), 2);
    assert!(carousel.can_scroll_forward());

    let y = 1 + 1 + 4;
    let x = width - 3;
    let click = Event::Mouse(MouseEvent::click(x, y));
    assert!(matches!(
        invocation.handle_event(&click, frame.hit_test(x, y)),
        Some(InvocationAction::Carousel(_))
    ));
    while invocation.tick() {}
    assert!(invocation.carousel().unwrap().can_scroll_backward());
}

#[test]
fn unknown_tool_and_invalid_payload_are_typed_errors() {
    let err = Invocation::new("createChart", json!({}), Page::new(), HitId::new(1)).unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool { .. }));

    let err = Invocation::new("createSteps", json!({ "title": 3 }), Page::new(), HitId::new(1))
        .unwrap_err();
    assert_eq!(err.tool(), Some(ToolKind::Steps.name()));
}

proptest! {
    #[test]
    fn items_to_scroll_is_at_least_one(n in proptest::num::f64::ANY) {
        prop_assert!(cviz_tools::payload::items_to_scroll(Some(n)) >= 1);
    }
}
