#![forbid(unsafe_code)]

use cviz_core::geometry::Rect;
use cviz_render::frame::Frame;
use cviz_render::{Color, Style};

use crate::theme::Theme;
use crate::{Widget, draw_text_span};

/// Visual weight of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    /// Filled with the accent color.
    #[default]
    Default,
    /// Filled with a muted color.
    Secondary,
    /// Bracketed, no fill.
    Outline,
}

/// A short inline label such as a status.
#[derive(Debug, Clone)]
pub struct Badge<'a> {
    label: &'a str,
    variant: BadgeVariant,
    color: Option<Color>,
    theme: Theme,
}

impl<'a> Badge<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            variant: BadgeVariant::Default,
            color: None,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Override the fill (or outline) color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Cells the badge occupies.
    pub fn width(&self) -> u16 {
        unicode_width::UnicodeWidthStr::width(self.label).min(u16::MAX as usize - 2) as u16 + 2
    }

    fn decorated(&self) -> (String, Style) {
        match self.variant {
            BadgeVariant::Default => (
                format!(" {} ", self.label),
                Style::new()
                    .fg(self.theme.surface)
                    .bg(self.color.unwrap_or(self.theme.accent))
                    .bold(),
            ),
            BadgeVariant::Secondary => (
                format!(" {} ", self.label),
                Style::new()
                    .fg(self.theme.text)
                    .bg(self.color.unwrap_or(self.theme.border)),
            ),
            BadgeVariant::Outline => (
                format!("[{}]", self.label),
                Style::new().fg(self.color.unwrap_or(self.theme.muted)),
            ),
        }
    }
}

impl Widget for Badge<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let (text, style) = self.decorated();
        draw_text_span(&mut frame.buffer, area.x, area.y, &text, style, area.right());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(badge: Badge<'_>) -> (String, Style) {
        let mut frame = Frame::new(20, 1);
        badge.render(Rect::new(0, 0, 20, 1), &mut frame);
        let style = frame.buffer.get(1, 0).map(|c| c.style).unwrap_or_default();
        (frame.to_lines().remove(0), style)
    }

    #[test]
    fn default_is_filled() {
        let theme = Theme::default();
        let (text, style) = draw(Badge::new("Complete"));
        assert_eq!(text, " Complete");
        assert_eq!(style.bg, Some(theme.accent));
    }

    #[test]
    fn outline_is_bracketed() {
        let (text, style) = draw(Badge::new("Pending").variant(BadgeVariant::Outline));
        assert_eq!(text, "[Pending]");
        assert_eq!(style.bg, None);
    }

    #[test]
    fn width_includes_decoration() {
        assert_eq!(Badge::new("abc").width(), 5);
    }
}
