#![forbid(unsafe_code)]

//! Colors and text styles.

use bitflags::bitflags;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Blend toward `other` by `t` in `[0, 1]`.
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgb(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const STRIKETHROUGH = 0b0001_0000;
        const REVERSE       = 0b0010_0000;
    }
}

/// Foreground, background, and attributes. Unset colors inherit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: StyleFlags,
}

impl Style {
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.add(StyleFlags::BOLD)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.add(StyleFlags::DIM)
    }

    #[must_use]
    pub fn italic(self) -> Self {
        self.add(StyleFlags::ITALIC)
    }

    #[must_use]
    pub fn underline(self) -> Self {
        self.add(StyleFlags::UNDERLINE)
    }

    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.add(StyleFlags::STRIKETHROUGH)
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        self.add(StyleFlags::REVERSE)
    }

    #[must_use]
    pub fn add(mut self, flags: StyleFlags) -> Self {
        self.attrs |= flags;
        self
    }

    /// Layer `self` over `parent`: set colors win, attributes union.
    #[must_use]
    pub fn merge(&self, parent: &Style) -> Style {
        Style {
            fg: self.fg.or(parent.fg),
            bg: self.bg.or(parent.bg),
            attrs: self.attrs | parent.attrs,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Style::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_child_colors() {
        let parent = Style::new().fg(Color::WHITE).bg(Color::BLACK).italic();
        let child = Style::new().fg(Color::rgb(1, 2, 3)).bold();
        let merged = child.merge(&parent);
        assert_eq!(merged.fg, Some(Color::rgb(1, 2, 3)));
        assert_eq!(merged.bg, Some(Color::BLACK));
        assert!(merged.attrs.contains(StyleFlags::BOLD | StyleFlags::ITALIC));
    }

    #[test]
    fn mix_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(200, 100, 50);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 2.0), b);
    }
}
