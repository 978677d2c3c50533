//! Markdown → ratatui `Text` renderer.
//!
//! Backend answers are untrusted text headed for a terminal, so the
//! pipeline is sanitize first, then format:
//!
//! 1. [`sanitize`] drops control characters (ESC and friends) so content
//!    can never emit its own escape sequences, and expands tabs.
//! 2. `pulldown_cmark` events are folded into styled `Line`/`Span` values.
//!    Raw HTML is never interpreted; it is shown literally, dimmed.
//!
//! Supported: paragraphs, headings, bold, italic, strikethrough, inline code,
//! fenced code blocks (syntect highlighting when the language is known),
//! lists, block quotes, links, rules.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME: LazyLock<Theme> = LazyLock::new(|| {
    let mut set = ThemeSet::load_defaults();
    set.themes
        .remove("base16-ocean.dark")
        .unwrap_or_default()
});

const TAB: &str = "    ";

/// Strip terminal control characters, keeping newlines. Tabs become spaces.
pub fn sanitize(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str(TAB),
            '\r' => {}
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Render markdown content into styled `Text`, using `base_fg` for body text.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let clean = sanitize(content);

    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut r = Renderer::new(base_fg);
    for event in Parser::new_ext(&clean, opts) {
        r.event(event);
    }
    r.finish()
}

struct Renderer {
    lines: Vec<Line<'static>>,
    base: Style,
    /// Inline styles, composed with `patch` so bold inside italic keeps both.
    styles: Vec<Style>,
    /// Spans prepended to every new line (block quote bars, code gutter).
    gutters: Vec<Span<'static>>,
    /// `None` for bullets, `Some(n)` for the next ordinal.
    lists: Vec<Option<u64>>,
    code: Option<CodeBlock>,
    link: Option<String>,
    /// A block just closed; the next block starts after a blank line.
    pending_gap: bool,
}

enum CodeBlock {
    Highlighted(HighlightLines<'static>),
    Plain,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            lines: Vec::new(),
            base: Style::default().fg(base_fg),
            styles: Vec::new(),
            gutters: Vec::new(),
            lists: Vec::new(),
            code: None,
            link: None,
            pending_gap: false,
        }
    }

    fn finish(self) -> Text<'static> {
        Text::from(self.lines)
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.base)
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn new_line(&mut self) {
        self.lines.push(Line::from(self.gutters.clone()));
    }

    fn span(&mut self, span: Span<'static>) {
        if self.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn start_block(&mut self) {
        if self.pending_gap && !self.lines.is_empty() {
            self.new_line();
        }
        self.pending_gap = false;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(&t),
            Event::Code(c) => {
                let style = Style::default().fg(Color::White).bg(Color::DarkGray);
                self.span(Span::styled(c.to_string(), style));
            }
            Event::Html(raw) | Event::InlineHtml(raw) => self.literal_html(&raw),
            Event::SoftBreak => self.span(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.start_block();
                self.new_line();
                self.span(Span::styled("─".repeat(32), Style::default().fg(Color::DarkGray)));
                self.pending_gap = true;
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // A paragraph directly inside a list item continues the bullet line
                if !self.lists.is_empty() && !self.pending_gap {
                    return;
                }
                self.start_block();
                self.new_line();
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                self.new_line();
                let style = heading_style(self.base, level);
                self.span(Span::styled(format!("{} ", "#".repeat(level as usize)), style));
                self.styles.push(style);
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.gutters
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM));
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let frame = Style::default().fg(Color::DarkGray);
                self.new_line();
                self.span(Span::styled(format!("╭── {lang}").trim_end().to_string(), frame));
                self.gutters.push(Span::styled("│ ", frame));

                self.code = Some(
                    SYNTAX_SET
                        .find_syntax_by_token(&lang)
                        .filter(|_| !lang.is_empty())
                        .map(|syntax| CodeBlock::Highlighted(HighlightLines::new(syntax, &THEME)))
                        .unwrap_or(CodeBlock::Plain),
                );
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.start_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.pending_gap = false;
                self.new_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(sanitize(&dest_url));
                self.push_style(link_style());
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.pending_gap = true,
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.gutters.pop();
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.gutters.pop();
                self.new_line();
                self.span(Span::styled("╰──", Style::default().fg(Color::DarkGray)));
                self.pending_gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.pending_gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link.take() {
                    self.span(Span::raw(" ("));
                    self.span(Span::styled(url, link_style()));
                    self.span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        match self.code.take() {
            Some(CodeBlock::Highlighted(mut hl)) => {
                for line in LinesWithEndings::from(text) {
                    self.new_line();
                    let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) else {
                        self.span(Span::raw(line.trim_end_matches('\n').to_string()));
                        continue;
                    };
                    for (st, frag) in ranges {
                        let frag = frag.trim_end_matches('\n');
                        if frag.is_empty() {
                            continue;
                        }
                        let fg = Color::Rgb(st.foreground.r, st.foreground.g, st.foreground.b);
                        self.span(Span::styled(frag.to_string(), Style::default().fg(fg)));
                    }
                }
                self.code = Some(CodeBlock::Highlighted(hl));
            }
            Some(CodeBlock::Plain) => {
                for line in text.lines() {
                    self.new_line();
                    self.span(Span::styled(line.to_string(), Style::default().fg(Color::White)));
                }
                self.code = Some(CodeBlock::Plain);
            }
            None => {
                let style = self.style();
                self.span(Span::styled(text.to_string(), style));
            }
        }
    }

    /// HTML is shown as the literal source text, never interpreted.
    fn literal_html(&mut self, raw: &str) {
        let style = self.style().add_modifier(Modifier::DIM);
        let mut first = true;
        for part in raw.trim_end_matches('\n').split('\n') {
            if !first {
                self.new_line();
            }
            first = false;
            self.span(Span::styled(part.to_string(), style));
        }
    }
}

fn link_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
}

fn heading_style(base: Style, level: HeadingLevel) -> Style {
    let modifier = match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
    };
    base.add_modifier(modifier)
}
