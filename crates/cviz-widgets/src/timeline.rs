#![forbid(unsafe_code)]

//! Vertical event timeline with status dots and relative timestamps.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use cviz_core::geometry::Rect;
use cviz_render::frame::Frame;
use cviz_render::text::{Line, Text};
use cviz_render::{Color, Style};

use crate::badge::{Badge, BadgeVariant};
use crate::theme::Theme;
use crate::{Widget, draw_line, draw_text_span, icon};

const TEXT_INDENT: u16 = 3;
const CONNECTOR: &str = "│";

/// Progress of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Complete,
}

/// Semantic color slot of a [`Status`], resolved against a [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Neutral,
}

impl Tone {
    pub fn color(self, theme: &Theme) -> Color {
        match self {
            Self::Success => theme.success,
            Self::Info => theme.info,
            Self::Neutral => theme.neutral,
        }
    }
}

/// How a status is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusConfig {
    pub label: &'static str,
    pub dot: char,
    pub tone: Tone,
    pub badge: BadgeVariant,
}

impl Status {
    pub const fn config(self) -> StatusConfig {
        match self {
            Self::Complete => StatusConfig {
                label: "Complete",
                dot: '●',
                tone: Tone::Success,
                badge: BadgeVariant::Default,
            },
            Self::InProgress => StatusConfig {
                label: "In Progress",
                dot: '◉',
                tone: Tone::Info,
                badge: BadgeVariant::Secondary,
            },
            Self::Pending => StatusConfig {
                label: "Pending",
                dot: '○',
                tone: Tone::Neutral,
                badge: BadgeVariant::Outline,
            },
        }
    }
}

/// Parse an ISO-8601 style timestamp. Offsetless forms are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    if let Some(naive) = NAIVE
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Relative wording for `raw` as seen from `now` ("about 2 hours ago",
/// "in 5 minutes"). Unparseable input is returned unchanged.
pub fn format_timestamp(raw: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(raw) {
        Some(at) => relative_to(at, now),
        None => raw.to_string(),
    }
}

fn relative_to(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let distance = distance_words(at.min(now), at.max(now));
    if at <= now {
        format!("{distance} ago")
    } else {
        format!("in {distance}")
    }
}

const MINUTES_IN_DAY: f64 = 1440.0;
const MINUTES_IN_MONTH: f64 = 43200.0;
const MINUTES_IN_TWO_MONTHS: f64 = 86400.0;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Calendar months between `earlier` and `later`, counting only full months.
fn whole_months(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month()) - i64::from(earlier.month());
    let later_rest = (later.day(), later.time());
    let earlier_rest = (earlier.day(), earlier.time());
    if months > 0 && later_rest < earlier_rest {
        months -= 1;
    }
    months
}

fn distance_words(earlier: DateTime<Utc>, later: DateTime<Utc>) -> String {
    let seconds = (later - earlier).num_seconds() as f64;
    let minutes = (seconds / 60.0).round();

    if minutes < 1.0 {
        return "less than a minute".to_string();
    }
    if minutes < 45.0 {
        return plural(minutes as i64, "minute");
    }
    if minutes < 90.0 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes / 60.0).round() as i64;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < 2520.0 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        return plural((minutes / MINUTES_IN_DAY).round() as i64, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes / MINUTES_IN_MONTH).round() as i64;
        return format!("about {}", plural(months, "month"));
    }

    let months = whole_months(earlier, later);
    if months < 12 {
        return plural((minutes / MINUTES_IN_MONTH).round() as i64, "month");
    }
    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

/// One entry of a [`Timeline`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimelineEvent {
    pub title: String,
    pub description: Option<String>,
    /// ISO-8601 timestamp or free text such as "Yesterday".
    pub timestamp: String,
    pub status: Status,
    /// Icon name drawn inside the status dot.
    pub icon: Option<String>,
}

impl TimelineEvent {
    pub fn new(title: impl Into<String>, timestamp: impl Into<String>, status: Status) -> Self {
        Self {
            title: title.into(),
            description: None,
            timestamp: timestamp.into(),
            status,
            icon: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Glyph in the status dot: the named icon if known, else the status dot.
    pub fn marker(&self) -> char {
        self.icon
            .as_deref()
            .and_then(icon::lookup)
            .unwrap_or_else(|| self.status.config().dot)
    }
}

#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    events: &'a [TimelineEvent],
    now: DateTime<Utc>,
    theme: Theme,
}

impl<'a> Timeline<'a> {
    pub fn new(events: &'a [TimelineEvent]) -> Self {
        Self {
            events,
            now: Utc::now(),
            theme: Theme::default(),
        }
    }

    /// Reference time for relative timestamps.
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

    /// Text lines under an event's title row.
    fn body(&self, event: &TimelineEvent, width: u16) -> Vec<Line> {
        let width = width.max(1) as usize;
        let muted = self.theme.secondary();
        let mut lines = event
            .description
            .as_deref()
            .map(|d| Text::styled(d, muted).wrapped(width))
            .unwrap_or_default();
        let when = format_timestamp(&event.timestamp, self.now);
        lines.extend(Line::styled(when, muted.dim()).wrap(width));
        lines
    }

    pub fn height(&self, width: u16) -> u16 {
        let text_width = width.saturating_sub(TEXT_INDENT);
        let rows: usize = self
            .events
            .iter()
            .map(|event| 1 + self.body(event, text_width).len())
            .sum();
        (rows + self.events.len().saturating_sub(1)).min(u16::MAX as usize) as u16
    }
}

impl Widget for Timeline<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Timeline",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() || area.width <= TEXT_INDENT {
            return;
        }
        let text_x = area.x + TEXT_INDENT;
        let text_width = area.width - TEXT_INDENT;

        let mut y = area.y;
        for (i, event) in self.events.iter().enumerate() {
            if y >= area.bottom() {
                break;
            }
            let config = event.status.config();
            let tone = Style::new().fg(config.tone.color(&self.theme)).bold();
            let mut marker = [0u8; 4];
            draw_text_span(
                &mut frame.buffer,
                area.x,
                y,
                event.marker().encode_utf8(&mut marker),
                tone,
                text_x,
            );
            let after_title = draw_text_span(
                &mut frame.buffer,
                text_x,
                y,
                &event.title,
                self.theme.title(),
                area.right(),
            );
            let badge_x = after_title.saturating_add(1);
            if badge_x < area.right() {
                Badge::new(config.label)
                    .variant(config.badge)
                    .color(config.tone.color(&self.theme))
                    .theme(self.theme)
                    .render(
                        Rect::new(badge_x, y, area.right() - badge_x, 1),
                        frame,
                    );
            }
            y += 1;

            let last = i + 1 == self.events.len();
            let body = self.body(event, text_width);
            let rows = body.len() + usize::from(!last);
            for row in 0..rows {
                if y >= area.bottom() {
                    return;
                }
                if !last {
                    draw_text_span(&mut frame.buffer, area.x, y, CONNECTOR, self.theme.chrome(), text_x);
                }
                if let Some(line) = body.get(row) {
                    draw_line(&mut frame.buffer, text_x, y, line, Style::new(), area.right());
                }
                y += 1;
            }
        }
    }
}
