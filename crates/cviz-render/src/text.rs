#![forbid(unsafe_code)]

//! Styled text: spans, lines, and multi-line text with word wrapping.

use unicode_width::UnicodeWidthStr;

use crate::style::Style;

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub content: String,
    pub style: Style,
}

impl Span {
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::new(),
        }
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        self.content.width()
    }
}

/// One line of spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn raw(content: impl Into<String>) -> Self {
        Self::from_spans(vec![Span::raw(content)])
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self::from_spans(vec![Span::styled(content, style)])
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.content.is_empty())
    }

    pub fn to_plain_text(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }

    /// Word-wrap into lines no wider than `width`, keeping span styles.
    ///
    /// Words wider than `width` are hard-split. Whitespace at wrap points is
    /// dropped.
    pub fn wrap(&self, width: usize) -> Vec<Line> {
        if width == 0 {
            return Vec::new();
        }
        if self.width() <= width {
            return vec![self.clone()];
        }

        let mut out = Vec::new();
        let mut current = Line::new();
        let mut current_width = 0usize;

        for span in &self.spans {
            for token in split_keep_spaces(&span.content) {
                let token_width = token.width();
                let is_space = token.chars().all(char::is_whitespace);

                if current_width + token_width <= width {
                    if !(is_space && current_width == 0) {
                        current.push_text(token, span.style);
                        current_width += token_width;
                    }
                    continue;
                }

                if is_space {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                    continue;
                }

                if current_width > 0 {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }

                // Hard-split words that cannot fit on an empty line.
                let mut chunk = String::new();
                for ch in token.chars() {
                    let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
                    if current_width + w > width && !chunk.is_empty() {
                        current.push_text(&chunk, span.style);
                        out.push(std::mem::take(&mut current));
                        chunk.clear();
                        current_width = 0;
                    }
                    chunk.push(ch);
                    current_width += w;
                }
                if !chunk.is_empty() {
                    current.push_text(&chunk, span.style);
                }
            }
        }

        if !current.is_empty() {
            out.push(current);
        }
        for line in &mut out {
            line.trim_end();
        }
        out
    }

    fn push_text(&mut self, text: &str, style: Style) {
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.content.push_str(text),
            _ => self.spans.push(Span::styled(text, style)),
        }
    }

    fn trim_end(&mut self) {
        while let Some(last) = self.spans.last_mut() {
            let trimmed_len = last.content.trim_end().len();
            last.content.truncate(trimmed_len);
            if last.content.is_empty() {
                self.spans.pop();
            } else {
                break;
            }
        }
    }
}

impl From<&str> for Line {
    fn from(value: &str) -> Self {
        Line::raw(value)
    }
}

impl From<String> for Line {
    fn from(value: String) -> Self {
        Line::raw(value)
    }
}

fn split_keep_spaces(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(&text[start..i]);
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Multi-line styled text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    lines: Vec<Line>,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Split plain text on newlines.
    pub fn raw(text: &str) -> Self {
        Self::from_lines(text.lines().map(Line::raw).collect())
    }

    pub fn styled(text: &str, style: Style) -> Self {
        Self::from_lines(text.lines().map(|l| Line::styled(l, style)).collect())
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn push_line(&mut self, line: impl Into<Line>) {
        self.lines.push(line.into());
    }

    pub fn extend(&mut self, other: Text) {
        self.lines.extend(other.lines);
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(Line::width).max().unwrap_or(0)
    }

    /// Wrap every line to `width`; blank lines are preserved.
    pub fn wrapped(&self, width: usize) -> Vec<Line> {
        let mut out = Vec::new();
        for line in &self.lines {
            if line.is_empty() {
                out.push(Line::new());
            } else {
                out.extend(line.wrap(width));
            }
        }
        out
    }

    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::to_plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::raw(value)
    }
}

impl From<Line> for Text {
    fn from(value: Line) -> Self {
        Text::from_lines(vec![value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::to_plain_text).collect()
    }

    #[test]
    fn short_line_is_unchanged() {
        let line = Line::raw("hello");
        assert_eq!(plain(&line.wrap(10)), vec!["hello"]);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let line = Line::raw("the quick brown fox");
        assert_eq!(plain(&line.wrap(9)), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn hard_splits_long_words() {
        let line = Line::raw("abcdefghij");
        assert_eq!(plain(&line.wrap(4)), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_preserves_styles() {
        let bold = Style::new().bold();
        let line = Line::from_spans(vec![Span::raw("plain "), Span::styled("bold words", bold)]);
        let wrapped = line.wrap(11);
        assert_eq!(plain(&wrapped), vec!["plain bold", "words"]);
        assert_eq!(wrapped[1].spans()[0].style, bold);
    }

    #[test]
    fn zero_width_yields_nothing() {
        assert!(Line::raw("abc").wrap(0).is_empty());
    }

    #[test]
    fn wrapped_keeps_blank_lines() {
        let text = Text::raw("a\n\nb");
        assert_eq!(text.wrapped(5).len(), 3);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrapped_lines_fit_the_width(words in proptest::collection::vec("[a-z]{1,12}", 0..20), width in 1usize..40) {
                let line = Line::raw(&words.join(" "));
                for wrapped in line.wrap(width) {
                    prop_assert!(wrapped.width() <= width);
                }
            }
        }
    }
}
