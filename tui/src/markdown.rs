//! Markdown to ratatui rendering for the explanation panel.
//!
//! Explanations from the solver are prose: paragraphs, emphasis, inline
//! and fenced code, lists, quotes. Anything else passes through as plain
//! text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::colors;

/// Render markdown content to ratatui lines.
#[must_use]
pub fn render_markdown(content: &str, base_style: Style) -> Vec<Line<'static>> {
    MarkdownRenderer::new(base_style).render(content)
}

struct MarkdownRenderer {
    base_style: Style,
    lines: Vec<Line<'static>>,
    current_spans: Vec<Span<'static>>,

    // Inline style stack
    bold: bool,
    italic: bool,
    strikethrough: bool,

    // Block state
    in_code_block: bool,
    quote_depth: usize,
    list_depth: usize,
    list_index: Option<u64>,
}

impl MarkdownRenderer {
    fn new(base_style: Style) -> Self {
        Self {
            base_style,
            lines: Vec::new(),
            current_spans: Vec::new(),
            bold: false,
            italic: false,
            strikethrough: false,
            in_code_block: false,
            quote_depth: 0,
            list_depth: 0,
            list_index: None,
        }
    }

    fn render(mut self, content: &str) -> Vec<Line<'static>> {
        let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH);

        for event in parser {
            match event {
                Event::Start(tag) => self.start_tag(&tag),
                Event::End(tag) => self.end_tag(tag),
                Event::Text(text) => self.handle_text(&text),
                Event::Code(code) => self.handle_inline_code(&code),
                Event::SoftBreak => self.current_spans.push(Span::raw(" ")),
                Event::HardBreak => self.flush_line(),
                _ => {}
            }
        }

        self.flush_line();
        self.lines
    }

    fn start_tag(&mut self, tag: &Tag) {
        match tag {
            Tag::Heading { .. } | Tag::Strong => {
                self.bold = true;
            }
            Tag::Emphasis => {
                self.italic = true;
            }
            Tag::Strikethrough => {
                self.strikethrough = true;
            }
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.push_fence();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush_line();
                self.list_depth += 1;
                self.list_index = *start;
            }
            Tag::Item => {
                let indent = "  ".repeat(self.list_depth.saturating_sub(1));
                let marker = if let Some(idx) = self.list_index.as_mut() {
                    let m = format!("{indent}{idx}. ");
                    *idx += 1;
                    m
                } else {
                    format!("{indent}• ")
                };
                self.current_spans.push(Span::styled(marker, self.base_style));
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Tag::Paragraph => {
                if !self.lines.is_empty() && self.list_depth == 0 {
                    self.lines.push(Line::from(""));
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.bold = false;
                self.flush_line();
                self.lines.push(Line::from(""));
            }
            TagEnd::Strong => {
                self.bold = false;
            }
            TagEnd::Emphasis => {
                self.italic = false;
            }
            TagEnd::Strikethrough => {
                self.strikethrough = false;
            }
            TagEnd::CodeBlock => {
                self.flush_line();
                self.in_code_block = false;
                self.push_fence();
            }
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.list_index = None;
                }
            }
            TagEnd::Item | TagEnd::Paragraph => {
                self.flush_line();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &str) {
        if self.in_code_block {
            let code_style = Style::default().fg(colors::TEXT_MUTED);
            for line in text.lines() {
                self.lines
                    .push(Line::from(Span::styled(line.to_string(), code_style)));
            }
            return;
        }

        let style = self.current_style();
        self.current_spans
            .push(Span::styled(text.to_string(), style));
    }

    fn handle_inline_code(&mut self, code: &str) {
        let style = Style::default()
            .fg(colors::ORANGE)
            .add_modifier(Modifier::BOLD);
        self.current_spans
            .push(Span::styled(format!("`{code}`"), style));
    }

    fn current_style(&self) -> Style {
        let mut style = self.base_style;
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        style
    }

    fn flush_line(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current_spans.len() + 1);
        if self.quote_depth > 0 {
            let prefix = "▌ ".repeat(self.quote_depth);
            spans.push(Span::styled(prefix, Style::default().fg(colors::TEXT_MUTED)));
        }
        spans.append(&mut self.current_spans);
        self.lines.push(Line::from(spans));
    }

    fn push_fence(&mut self) {
        self.lines.push(Line::from(Span::styled(
            "```",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn renders_bold_with_modifier() {
        let lines = render_markdown("**proved**", Style::default());
        let span = &lines[0].spans[0];
        assert_eq!(span.content.as_ref(), "proved");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn renders_lists_with_markers() {
        let lines = render_markdown("- one\n- two", Style::default());
        let texts = plain(&lines);
        assert_eq!(texts, vec!["• one", "• two"]);
    }

    #[test]
    fn renders_ordered_lists_with_numbers() {
        let lines = render_markdown("1. first\n2. second", Style::default());
        let texts = plain(&lines);
        assert_eq!(texts, vec!["1. first", "2. second"]);
    }

    #[test]
    fn fenced_code_is_framed() {
        let lines = render_markdown("```\nP(x)\n```", Style::default());
        let texts = plain(&lines);
        assert_eq!(texts, vec!["```", "P(x)", "```"]);
    }

    #[test]
    fn paragraphs_are_separated_by_blank_lines() {
        let lines = render_markdown("one\n\ntwo", Style::default());
        let texts = plain(&lines);
        assert_eq!(texts, vec!["one", "", "two"]);
    }

    #[test]
    fn blockquotes_carry_a_prefix() {
        let lines = render_markdown("> quoted", Style::default());
        let texts = plain(&lines);
        assert_eq!(texts, vec!["▌ quoted"]);
    }
}
