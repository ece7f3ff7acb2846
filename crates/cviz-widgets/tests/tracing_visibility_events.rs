#![cfg(feature = "tracing")]

//! The strip reports every visibility recomputation as a structured
//! `strip.visibility` debug event.
//!
//! Run:
//!   cargo test -p cviz-widgets --features tracing --test tracing_visibility_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cviz_widgets::scroll_strip::{Direction, ScrollStrip};
use cviz_widgets::strip_surface::StripSurface;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields = visitor.0.into_iter().collect();
        self.events.lock().unwrap().push(CapturedEvent { fields });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn visibility_events(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events
        .iter()
        .filter(|e| e.message() == Some("strip.visibility"))
        .collect()
}

#[test]
fn initialize_and_scroll_emit_structured_events() {
    let events = capture(|| {
        let mut surface = StripSurface::new();
        surface.set_uniform_items(10, 10.0);
        surface.set_viewport(30.0);
        surface.drain_changes();

        let mut strip = ScrollStrip::new(1);
        strip.initialize(&surface);
        strip.scroll(Direction::Forward, &mut surface);
        surface.settle();
        for source in surface.drain_changes() {
            strip.handle_change(source, &surface);
        }
    });

    let visibility = visibility_events(&events);
    assert!(visibility.len() >= 2, "events: {events:?}");

    let first = visibility[0];
    assert_eq!(first.fields.get("source").map(String::as_str), Some("initialize"));
    assert_eq!(first.fields.get("backward").map(String::as_str), Some("false"));
    assert_eq!(first.fields.get("forward").map(String::as_str), Some("true"));

    let last = visibility[visibility.len() - 1];
    assert_eq!(last.fields.get("source").map(String::as_str), Some("scroll"));
    assert_eq!(last.fields.get("backward").map(String::as_str), Some("true"));
}

#[test]
fn unbound_strip_is_silent() {
    let events = capture(|| {
        let surface = StripSurface::new();
        let mut strip = ScrollStrip::default();
        strip.handle_change(cviz_core::surface::ChangeSource::Scroll, &surface);
    });
    assert!(visibility_events(&events).is_empty());
}
