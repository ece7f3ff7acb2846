//! Shared palette for chat visualization widgets.

use cviz_render::{Color, Style};

/// Colors every widget draws with. Swap the whole struct to re-theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub surface: Color,
    pub success: Color,
    pub info: Color,
    pub neutral: Color,
    /// Tint applied over the transcript behind an overlay.
    pub backdrop: Color,
    pub backdrop_opacity: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::rgb(230, 230, 235),
            muted: Color::rgb(140, 140, 150),
            border: Color::rgb(80, 80, 92),
            accent: Color::rgb(120, 160, 255),
            surface: Color::rgb(32, 32, 40),
            success: Color::rgb(34, 197, 94),
            info: Color::rgb(59, 130, 246),
            neutral: Color::rgb(156, 163, 175),
            backdrop: Color::BLACK,
            backdrop_opacity: 0.8,
        }
    }
}

impl Theme {
    pub fn title(&self) -> Style {
        Style::new().fg(self.text).bold()
    }

    pub fn body(&self) -> Style {
        Style::new().fg(self.text)
    }

    pub fn secondary(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn chrome(&self) -> Style {
        Style::new().fg(self.border)
    }

    pub fn control(&self) -> Style {
        Style::new().fg(self.accent).bold()
    }

    /// Backdrop color blended from the surface toward the tint.
    pub fn backdrop_style(&self) -> Style {
        Style::new().bg(self.surface.mix(self.backdrop, self.backdrop_opacity))
    }
}
