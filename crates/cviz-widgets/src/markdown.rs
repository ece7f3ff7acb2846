#![forbid(unsafe_code)]

//! Markdown to styled [`Text`], used for carousel item bodies.
//!
//! Parsing is done by [pulldown-cmark]. Images cannot be drawn in a cell grid,
//! so `![alt](src)` renders as an `[image: alt]` marker.
//!
//! ```
//! use cviz_widgets::markdown::render_markdown;
//!
//! let text = render_markdown("# Hello\n\nSome **bold** text.");
//! assert_eq!(text.height(), 3);
//! ```

use cviz_render::text::{Line, Span, Text};
use cviz_render::{Color, Style};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Styles for each markdown element.
#[derive(Debug, Clone)]
pub struct MarkdownTheme {
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
    /// Levels four through six.
    pub minor_heading: Style,
    pub code_inline: Style,
    pub code_block: Style,
    pub blockquote: Style,
    pub link: Style,
    pub emphasis: Style,
    pub strong: Style,
    pub strikethrough: Style,
    pub list_bullet: Style,
    pub image: Style,
    pub horizontal_rule: Style,
}

impl Default for MarkdownTheme {
    fn default() -> Self {
        Self {
            h1: Style::new().fg(Color::WHITE).bold(),
            h2: Style::new().fg(Color::rgb(210, 215, 255)).bold(),
            h3: Style::new().fg(Color::rgb(185, 190, 235)).bold(),
            minor_heading: Style::new().fg(Color::rgb(160, 165, 210)).bold(),
            code_inline: Style::new().fg(Color::rgb(230, 180, 80)),
            code_block: Style::new().fg(Color::rgb(200, 200, 200)),
            blockquote: Style::new().fg(Color::rgb(150, 150, 150)).italic(),
            link: Style::new().fg(Color::rgb(100, 150, 255)).underline(),
            emphasis: Style::new().italic(),
            strong: Style::new().bold(),
            strikethrough: Style::new().strikethrough(),
            list_bullet: Style::new().fg(Color::rgb(180, 180, 100)),
            image: Style::new().fg(Color::rgb(140, 200, 170)).italic(),
            horizontal_rule: Style::new().fg(Color::rgb(100, 100, 100)).dim(),
        }
    }
}

/// Converts markdown into [`Text`].
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    theme: MarkdownTheme,
    rule_width: u16,
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new(theme: MarkdownTheme) -> Self {
        Self {
            theme,
            rule_width: 24,
        }
    }

    /// Width of `---` rules; carousels set this to the card width.
    #[must_use]
    pub fn rule_width(mut self, width: u16) -> Self {
        self.rule_width = width;
        self
    }

    #[must_use]
    pub fn render(&self, markdown: &str) -> Text {
        let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
        let mut state = RenderState::new(&self.theme, self.rule_width);
        state.process(parser);
        state.finish()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(MarkdownTheme::default())
    }
}

#[derive(Debug, Clone, Copy)]
enum Context {
    Heading(HeadingLevel),
    Emphasis,
    Strong,
    Strikethrough,
    CodeBlock,
    Blockquote,
    Link,
}

#[derive(Debug, Clone, Copy)]
struct ListState {
    next_number: Option<u64>,
}

struct RenderState<'t> {
    theme: &'t MarkdownTheme,
    rule_width: u16,
    lines: Vec<Line>,
    spans: Vec<Span>,
    contexts: Vec<Context>,
    lists: Vec<ListState>,
    code: Option<String>,
    /// Alt text collected while inside an image tag.
    image_alt: Option<String>,
    quote_depth: usize,
    needs_blank: bool,
}

impl<'t> RenderState<'t> {
    fn new(theme: &'t MarkdownTheme, rule_width: u16) -> Self {
        Self {
            theme,
            rule_width,
            lines: Vec::new(),
            spans: Vec::new(),
            contexts: Vec::new(),
            lists: Vec::new(),
            code: None,
            image_alt: None,
            quote_depth: 0,
            needs_blank: false,
        }
    }

    fn process<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            match event {
                Event::Start(tag) => self.start(tag),
                Event::End(tag) => self.end(tag),
                Event::Text(text) => self.text(&text),
                Event::Code(code) => self.inline_code(&code),
                Event::SoftBreak => self.text(" "),
                Event::HardBreak => self.flush_line(),
                Event::Rule => self.rule(),
                _ => {}
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_blank();
                self.contexts.push(Context::Heading(level));
            }
            Tag::Paragraph => {
                // Paragraphs inside list items stay on the bullet's line.
                if self.lists.is_empty() {
                    self.flush_blank();
                }
            }
            Tag::Emphasis => self.contexts.push(Context::Emphasis),
            Tag::Strong => self.contexts.push(Context::Strong),
            Tag::Strikethrough => self.contexts.push(Context::Strikethrough),
            Tag::CodeBlock(_) => {
                self.flush_blank();
                self.code = Some(String::new());
                self.contexts.push(Context::CodeBlock);
            }
            Tag::BlockQuote(_) => {
                self.flush_blank();
                self.quote_depth += 1;
                self.contexts.push(Context::Blockquote);
            }
            Tag::Link { .. } => self.contexts.push(Context::Link),
            Tag::Image { .. } => self.image_alt = Some(String::new()),
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.flush_blank();
                } else {
                    self.flush_line();
                }
                self.lists.push(ListState { next_number: start });
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.lists.len().saturating_sub(1);
                let bullet = match self.lists.last_mut() {
                    Some(ListState {
                        next_number: Some(n),
                    }) => {
                        let label = format!("{n}. ");
                        *n += 1;
                        label
                    }
                    _ => String::from("• "),
                };
                self.spans.push(Span::styled(
                    format!("{}{bullet}", "  ".repeat(depth)),
                    self.theme.list_bullet,
                ));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.contexts.pop();
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.flush_line();
                    self.needs_blank = true;
                }
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link => {
                self.contexts.pop();
            }
            TagEnd::CodeBlock => {
                self.contexts.pop();
                self.flush_code_block();
                self.needs_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                self.contexts.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::Image => {
                let alt = self.image_alt.take().unwrap_or_default();
                let label = if alt.trim().is_empty() {
                    String::from("[image]")
                } else {
                    format!("[image: {}]", alt.trim())
                };
                self.spans.push(Span::styled(label, self.theme.image));
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.flush_line();
                if self.lists.is_empty() {
                    self.needs_blank = true;
                }
            }
            TagEnd::Item => self.flush_line(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = self.code.as_mut() {
            code.push_str(text);
            return;
        }
        if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(text);
            return;
        }

        if self.spans.is_empty() && self.quote_depth > 0 {
            self.spans.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                self.theme.blockquote,
            ));
        }
        let style = self.current_style();
        self.spans.push(Span::styled(text, style));
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(code);
            return;
        }
        self.spans
            .push(Span::styled(format!("`{code}`"), self.theme.code_inline));
    }

    fn rule(&mut self) {
        self.flush_blank();
        let rule = "─".repeat(self.rule_width as usize);
        self.lines.push(Line::styled(rule, self.theme.horizontal_rule));
        self.needs_blank = true;
    }

    fn current_style(&self) -> Style {
        self.contexts.iter().fold(Style::new(), |acc, ctx| {
            let style = match ctx {
                Context::Heading(HeadingLevel::H1) => self.theme.h1,
                Context::Heading(HeadingLevel::H2) => self.theme.h2,
                Context::Heading(HeadingLevel::H3) => self.theme.h3,
                Context::Heading(_) => self.theme.minor_heading,
                Context::Emphasis => self.theme.emphasis,
                Context::Strong => self.theme.strong,
                Context::Strikethrough => self.theme.strikethrough,
                Context::CodeBlock => self.theme.code_block,
                Context::Blockquote => self.theme.blockquote,
                Context::Link => self.theme.link,
            };
            style.merge(&acc)
        })
    }

    fn flush_line(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.lines.push(Line::from_spans(spans));
        }
    }

    fn flush_blank(&mut self) {
        self.flush_line();
        if self.needs_blank && !self.lines.is_empty() {
            self.lines.push(Line::new());
        }
        self.needs_blank = false;
    }

    fn flush_code_block(&mut self) {
        let code = self.code.take().unwrap_or_default();
        let style = self.theme.code_block;
        for line in code.lines() {
            self.lines.push(Line::styled(format!("  {line}"), style));
        }
        if code.is_empty() {
            self.lines.push(Line::styled("  ", style));
        }
    }

    fn finish(mut self) -> Text {
        self.flush_line();
        Text::from_lines(self.lines)
    }
}

/// Render with the default theme.
#[must_use]
pub fn render_markdown(markdown: &str) -> Text {
    MarkdownRenderer::default().render(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text) -> Vec<String> {
        text.lines().iter().map(Line::to_plain_text).collect()
    }

    #[test]
    fn empty_input_is_empty_text() {
        assert!(render_markdown("").is_empty());
    }

    #[test]
    fn heading_then_paragraph_separated_by_blank() {
        let text = render_markdown("# Title\n\nBody");
        assert_eq!(plain(&text), vec!["Title", "", "Body"]);
        assert!(text.lines()[0].spans()[0].style.attrs.contains(cviz_render::StyleFlags::BOLD));
    }

    #[test]
    fn soft_breaks_join_lines() {
        let text = render_markdown("one\ntwo");
        assert_eq!(plain(&text), vec!["one two"]);
    }

    #[test]
    fn emphasis_styles_nest() {
        let text = render_markdown("***both***");
        let style = text.lines()[0].spans()[0].style;
        assert!(style.attrs.contains(cviz_render::StyleFlags::BOLD));
        assert!(style.attrs.contains(cviz_render::StyleFlags::ITALIC));
    }

    #[test]
    fn image_renders_as_marker() {
        let text = render_markdown("Look: ![a red barn](barn.png)");
        assert_eq!(plain(&text), vec!["Look: [image: a red barn]"]);
    }

    #[test]
    fn image_without_alt() {
        let text = render_markdown("![](x.png)");
        assert_eq!(plain(&text), vec!["[image]"]);
    }

    #[test]
    fn unordered_and_ordered_lists() {
        assert_eq!(plain(&render_markdown("- a\n- b")), vec!["• a", "• b"]);
        assert_eq!(plain(&render_markdown("3. x\n4. y")), vec!["3. x", "4. y"]);
    }

    #[test]
    fn nested_list_is_indented() {
        let text = render_markdown("- outer\n  - inner");
        assert_eq!(plain(&text), vec!["• outer", "  • inner"]);
    }

    #[test]
    fn code_block_keeps_whitespace() {
        let text = render_markdown("```\n  indented\n```");
        assert_eq!(plain(&text), vec!["    indented"]);
    }

    #[test]
    fn inline_code_is_backticked() {
        assert_eq!(plain(&render_markdown("use `x`")), vec!["use `x`"]);
    }

    #[test]
    fn blockquote_has_bar() {
        assert_eq!(plain(&render_markdown("> quoted")), vec!["│ quoted"]);
    }

    #[test]
    fn rule_uses_configured_width() {
        let text = MarkdownRenderer::default().rule_width(5).render("---");
        assert_eq!(plain(&text), vec!["─────"]);
    }

    #[test]
    fn link_text_is_kept() {
        let text = render_markdown("[docs](https://example.com)");
        assert_eq!(plain(&text), vec!["docs"]);
    }
}
