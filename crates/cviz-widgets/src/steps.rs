#![forbid(unsafe_code)]

//! Numbered vertical step list.
//!
//! ```text
//! (1) Install the toolchain
//!  │  Run the installer and restart
//!  │  your shell.
//!  │
//! (2) Build
//!     cargo build --release
//! ```

use cviz_core::geometry::Rect;
use cviz_render::frame::Frame;
use cviz_render::text::Text;

use crate::theme::Theme;
use crate::{Widget, draw_line, draw_text_span};

const CONNECTOR: &str = "│";

/// One entry of a [`Steps`] list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Step {
    pub title: String,
    pub details: String,
    /// Explicit number shown instead of the position. Only integral values count.
    pub number: Option<f64>,
}

impl Step {
    pub fn new(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
            number: None,
        }
    }

    #[must_use]
    pub fn number(mut self, number: f64) -> Self {
        self.number = Some(number);
        self
    }
}

/// Number displayed for the step at `index`: an integral `number` wins,
/// anything else falls back to the 1-based position.
pub fn display_number(number: Option<f64>, index: usize) -> i64 {
    match number {
        Some(n) if n.is_finite() && n.fract() == 0.0 => n as i64,
        _ => index as i64 + 1,
    }
}

#[derive(Debug, Clone)]
pub struct Steps<'a> {
    steps: &'a [Step],
    theme: Theme,
}

impl<'a> Steps<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        Self {
            steps,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Displayed numbers, in order.
    pub fn numbers(&self) -> Vec<i64> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| display_number(step.number, i))
            .collect()
    }

    fn labels(&self) -> Vec<String> {
        self.numbers().into_iter().map(|n| format!("({n})")).collect()
    }

    /// Width of the number column, including one column of padding.
    fn gutter(&self, labels: &[String]) -> u16 {
        let widest = labels
            .iter()
            .map(|l| unicode_width::UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(3);
        (widest as u16).saturating_add(1)
    }

    fn details(&self, step: &Step, width: u16) -> Text {
        let lines = Text::styled(&step.details, self.theme.secondary()).wrapped(width.max(1) as usize);
        Text::from_lines(lines)
    }

    /// Rows needed to draw every step at `width`.
    pub fn height(&self, width: u16) -> u16 {
        let labels = self.labels();
        let text_width = width.saturating_sub(self.gutter(&labels));
        let rows: usize = self
            .steps
            .iter()
            .map(|step| 1 + self.details(step, text_width).height())
            .sum();
        let gaps = self.steps.len().saturating_sub(1);
        (rows + gaps).min(u16::MAX as usize) as u16
    }
}

impl Widget for Steps<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Steps",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let labels = self.labels();
        let gutter = self.gutter(&labels);
        if area.is_empty() || area.width <= gutter {
            return;
        }
        let text_x = area.x + gutter;
        let text_width = area.width - gutter;
        let connector_x = area.x + 1;
        let buf = &mut frame.buffer;

        let mut y = area.y;
        for (i, (step, label)) in self.steps.iter().zip(&labels).enumerate() {
            if y >= area.bottom() {
                break;
            }
            draw_text_span(buf, area.x, y, label, self.theme.secondary(), text_x);
            draw_text_span(buf, text_x, y, &step.title, self.theme.title(), area.right());
            y += 1;

            let last = i + 1 == self.steps.len();
            let details = self.details(step, text_width);
            let body_rows = details.height() + usize::from(!last);
            for row in 0..body_rows {
                if y >= area.bottom() {
                    return;
                }
                if !last {
                    draw_text_span(buf, connector_x, y, CONNECTOR, self.theme.chrome(), text_x);
                }
                if let Some(line) = details.lines().get(row) {
                    draw_line(buf, text_x, y, line, self.theme.secondary(), area.right());
                }
                y += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps() -> Vec<Step> {
        vec![
            Step::new("Install", "Run the installer."),
            Step::new("Configure", "Edit the config file.").number(5.0),
            Step::new("Build", "cargo build"),
        ]
    }

    #[test]
    fn explicit_integer_overrides_position() {
        let steps = steps();
        assert_eq!(Steps::new(&steps).numbers(), vec![1, 5, 3]);
    }

    #[test]
    fn non_integer_number_is_ignored() {
        assert_eq!(display_number(Some(2.5), 0), 1);
        assert_eq!(display_number(Some(f64::NAN), 3), 4);
        assert_eq!(display_number(Some(-2.0), 0), -2);
        assert_eq!(display_number(None, 1), 2);
    }

    #[test]
    fn renders_circles_titles_and_connector() {
        let steps = steps();
        let widget = Steps::new(&steps);
        let height = widget.height(40);
        assert_eq!(height, 8);
        let mut frame = Frame::new(40, height);
        widget.render(frame.bounds(), &mut frame);
        let lines = frame.to_lines();
        assert_eq!(lines[0], "(1) Install");
        assert_eq!(lines[1], " │  Run the installer.");
        assert_eq!(lines[2], " │");
        assert_eq!(lines[3], "(5) Configure");
        assert_eq!(lines[6], "(3) Build");
        assert_eq!(lines[7], "    cargo build");
    }

    #[test]
    fn details_wrap_within_the_text_column() {
        let steps = vec![Step::new("Title", "one two three four")];
        let widget = Steps::new(&steps);
        // "one two", "three", "four" under the title.
        assert_eq!(widget.height(12), 4);
    }
}
