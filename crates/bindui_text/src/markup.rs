//! HTML-like markup to rich text conversion
//!
//! The converter understands the small tag vocabulary that host text widgets
//! render (bold, italic, underline, strikethrough, monospace, links, font
//! colors, headings, paragraphs, quotes, lists and line breaks). It never
//! fails: unknown tags are dropped with their text kept, a `<` that does not
//! open a tag stays literal text, stray closing tags are ignored and tags
//! still open at the end of input are closed there.
//!
//! Which conversion applies depends on the host platform:
//!
//! - [`ConversionStrategy::Modern`] runs in an explicit [`MarkupMode`]. The
//!   [`MarkupMode::Legacy`] compatibility mode keeps the old paragraph spacing
//!   and renders list items with a `• ` marker.
//! - [`ConversionStrategy::Legacy`] is the fixed behaviour of older platforms,
//!   which do not know list tags at all.
//!
//! Trailing line breaks are trimmed from the result.

use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use bindui_core::Color;

use crate::rich_text::{RichText, SpanStyle, TextSpan};

/// Marker inserted before list items
const BULLET: &str = "• ";

/// Layout compatibility mode for the modern conversion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupMode {
    /// Block elements separated by a blank line
    #[default]
    Legacy,
    /// Block elements separated by a single line break
    Compact,
}

/// Conversion strategy, picked once from the platform's capabilities
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConversionStrategy {
    Modern(MarkupMode),
    Legacy,
}

impl ConversionStrategy {
    /// Line breaks placed around `tag`, or `None` if `tag` is not a block
    /// element under this strategy
    fn block_gap(self, tag: &str) -> Option<usize> {
        let list = matches!(tag, "ul" | "ol" | "li");
        let block = list
            || matches!(
                tag,
                "p" | "div" | "blockquote" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
            );
        if !block {
            return None;
        }

        match self {
            ConversionStrategy::Modern(MarkupMode::Legacy) => Some(2),
            ConversionStrategy::Modern(MarkupMode::Compact) => Some(1),
            ConversionStrategy::Legacy if list => None,
            ConversionStrategy::Legacy => Some(2),
        }
    }

    fn supports_lists(self) -> bool {
        matches!(self, ConversionStrategy::Modern(_))
    }
}

/// Stateless markup converter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkupConverter {
    strategy: ConversionStrategy,
}

impl Default for MarkupConverter {
    fn default() -> Self {
        Self::modern(MarkupMode::default())
    }
}

impl MarkupConverter {
    pub fn new(strategy: ConversionStrategy) -> Self {
        Self { strategy }
    }

    pub fn modern(mode: MarkupMode) -> Self {
        Self::new(ConversionStrategy::Modern(mode))
    }

    pub fn legacy() -> Self {
        Self::new(ConversionStrategy::Legacy)
    }

    pub fn strategy(&self) -> ConversionStrategy {
        self.strategy
    }

    /// Convert `markup` into rich text
    pub fn convert(&self, markup: &str) -> RichText {
        let mut builder = Builder::new(self.strategy);
        let mut rest = markup;

        while let Some(lt) = rest.find('<') {
            builder.push_text(&rest[..lt]);
            let after = &rest[lt + 1..];

            // Comments, doctypes and processing instructions are dropped
            if let Some(comment) = after.strip_prefix("!--") {
                rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
                continue;
            }
            if after.starts_with('!') || after.starts_with('?') {
                rest = after.find('>').map_or("", |end| &after[end + 1..]);
                continue;
            }

            let Some(gt) = after.find('>') else {
                builder.push_text("<");
                rest = after;
                continue;
            };

            match Tag::parse(&after[..gt]) {
                Some(tag) => {
                    rest = &after[gt + 1..];
                    if !tag.closing && !tag.self_closing && is_raw_text(&tag.name) {
                        rest = skip_raw_text(rest, &tag.name);
                    } else {
                        builder.handle_tag(tag);
                    }
                }
                None => {
                    builder.push_text("<");
                    rest = after;
                }
            }
        }

        builder.push_text(rest);
        builder.finish()
    }
}

/// Elements whose content is never rendered
fn is_raw_text(name: &str) -> bool {
    matches!(name, "script" | "style")
}

/// Skip past the closing tag of a raw text element
fn skip_raw_text<'a>(rest: &'a str, name: &str) -> &'a str {
    let lowered = rest.to_ascii_lowercase();
    let Some(close) = lowered.find(&format!("</{name}")) else {
        return "";
    };
    rest[close..].find('>').map_or("", |end| &rest[close + end + 1..])
}

/// A parsed start or end tag
struct Tag<'a> {
    name: String,
    attrs: &'a str,
    closing: bool,
    self_closing: bool,
}

impl<'a> Tag<'a> {
    /// Parse the text between `<` and `>`; `None` if it is not a tag
    fn parse(raw: &'a str) -> Option<Self> {
        let (closing, body) = match raw.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, raw),
        };
        let (self_closing, body) = match body.strip_suffix('/') {
            Some(body) => (true, body),
            None => (false, body),
        };

        let name_end = body
            .find(|c: char| c.is_ascii_whitespace() || c == '/')
            .unwrap_or(body.len());
        let name = &body[..name_end];
        let first = name.chars().next()?;
        if !first.is_ascii_alphabetic() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }

        Some(Self {
            name: name.to_ascii_lowercase(),
            attrs: &body[name_end..],
            closing,
            self_closing,
        })
    }

    /// Value of attribute `wanted`, entity-decoded
    fn attribute(&self, wanted: &str) -> Option<String> {
        let mut rest = self.attrs.trim_start();
        while !rest.is_empty() {
            let key_end = rest
                .find(|c: char| c == '=' || c.is_ascii_whitespace())
                .unwrap_or(rest.len());
            let key = &rest[..key_end];
            rest = rest[key_end..].trim_start();

            let mut value = None;
            if let Some(after_eq) = rest.strip_prefix('=') {
                let after_eq = after_eq.trim_start();
                let (raw, remaining) = match after_eq.chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        let body = &after_eq[1..];
                        match body.find(quote) {
                            Some(end) => (&body[..end], &body[end + 1..]),
                            None => (body, ""),
                        }
                    }
                    _ => {
                        let end = after_eq
                            .find(|c: char| c.is_ascii_whitespace())
                            .unwrap_or(after_eq.len());
                        (&after_eq[..end], &after_eq[end..])
                    }
                };
                rest = remaining.trim_start();
                value = Some(raw);
            }

            if key.eq_ignore_ascii_case(wanted) {
                return value.map(|raw| decode_html_entities(raw).into_owned());
            }
        }
        None
    }
}

/// An element waiting for its closing tag
struct OpenTag {
    name: String,
    style: Option<SpanStyle>,
    block: Option<usize>,
    start: usize,
}

/// Accumulates text and spans while walking the markup
struct Builder {
    strategy: ConversionStrategy,
    text: String,
    spans: Vec<TextSpan>,
    open: SmallVec<[OpenTag; 8]>,
    /// Whitespace seen but not yet written (runs collapse to one space)
    pending_space: bool,
}

impl Builder {
    fn new(strategy: ConversionStrategy) -> Self {
        Self {
            strategy,
            text: String::new(),
            spans: Vec::new(),
            open: SmallVec::new(),
            pending_space: false,
        }
    }

    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        for ch in decode_html_entities(raw).chars() {
            // ASCII only, so non-breaking spaces survive
            if ch.is_ascii_whitespace() {
                self.pending_space = true;
            } else {
                self.flush_space();
                self.text.push(ch);
            }
        }
    }

    fn flush_space(&mut self) {
        if std::mem::take(&mut self.pending_space)
            && !self.text.is_empty()
            && !self.text.ends_with('\n')
        {
            self.text.push(' ');
        }
    }

    fn line_break(&mut self) {
        self.pending_space = false;
        self.text.push('\n');
    }

    /// Make sure the text ends with at least `count` line breaks
    fn ensure_breaks(&mut self, count: usize) {
        self.pending_space = false;
        if self.text.is_empty() {
            return;
        }
        let trailing = self.text.chars().rev().take_while(|c| *c == '\n').count();
        for _ in trailing..count {
            self.text.push('\n');
        }
    }

    fn style_for(&self, tag: &Tag<'_>) -> Option<SpanStyle> {
        match tag.name.as_str() {
            "b" | "strong" => Some(SpanStyle::Bold),
            "i" | "em" | "cite" | "dfn" => Some(SpanStyle::Italic),
            "u" | "ins" => Some(SpanStyle::Underline),
            "s" | "strike" | "del" => Some(SpanStyle::Strikethrough),
            "tt" | "code" => Some(SpanStyle::Monospace),
            "a" => tag.attribute("href").map(SpanStyle::Link),
            "font" => tag
                .attribute("color")
                .and_then(|value| Color::parse(&value))
                .map(SpanStyle::Foreground),
            "blockquote" => Some(SpanStyle::Quote),
            "li" if self.strategy.supports_lists() => Some(SpanStyle::Bullet),
            name => heading_level(name).map(SpanStyle::Heading),
        }
    }

    fn handle_tag(&mut self, tag: Tag<'_>) {
        if tag.closing {
            self.close(&tag.name);
            return;
        }
        if tag.name == "br" {
            self.line_break();
            return;
        }

        let block = self.strategy.block_gap(&tag.name);
        let style = self.style_for(&tag);
        if block.is_none() && style.is_none() {
            tracing::trace!(tag = %tag.name, "markup: dropping unsupported tag");
            return;
        }

        match block {
            Some(gap) => self.ensure_breaks(gap),
            None => self.flush_space(),
        }
        if tag.self_closing {
            return;
        }

        let start = self.text.len();
        if style == Some(SpanStyle::Bullet) {
            self.text.push_str(BULLET);
        }
        self.open.push(OpenTag {
            name: tag.name,
            style,
            block,
            start,
        });
    }

    fn close(&mut self, name: &str) {
        let Some(pos) = self.open.iter().rposition(|open| open.name == name) else {
            tracing::trace!(tag = %name, "markup: ignoring stray closing tag");
            return;
        };
        while self.open.len() > pos {
            if let Some(open) = self.open.pop() {
                self.finish_tag(open);
            }
        }
    }

    fn finish_tag(&mut self, open: OpenTag) {
        let end = self.text.len();
        if let Some(style) = open.style {
            if end > open.start {
                self.spans.push(TextSpan::new(open.start, end, style));
            }
        }
        if let Some(gap) = open.block {
            self.ensure_breaks(gap);
        }
    }

    fn finish(mut self) -> RichText {
        while let Some(open) = self.open.pop() {
            self.finish_tag(open);
        }
        let trimmed = self.text.trim_end_matches('\n').len();
        self.text.truncate(trimmed);
        RichText::from_parts(self.text, self.spans)
    }
}

fn heading_level(name: &str) -> Option<u8> {
    name.strip_prefix('h')
        .and_then(|digits| digits.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modern(markup: &str) -> RichText {
        MarkupConverter::modern(MarkupMode::Legacy).convert(markup)
    }

    #[test]
    fn test_inline_styles() {
        let rich = modern("Hello <b>world</b>, <i>how</i> <u>are</u> <s>you</s>");
        assert_eq!(rich.as_str(), "Hello world, how are you");
        assert_eq!(rich.text_with_style(&SpanStyle::Bold), Some("world"));
        assert_eq!(rich.text_with_style(&SpanStyle::Italic), Some("how"));
        assert_eq!(rich.text_with_style(&SpanStyle::Underline), Some("are"));
        assert_eq!(rich.text_with_style(&SpanStyle::Strikethrough), Some("you"));
    }

    #[test]
    fn test_entities_decoded() {
        let rich = modern("Fish &amp; Chips &lt;3 &quot;ok&quot;");
        assert_eq!(rich.as_str(), "Fish & Chips <3 \"ok\"");
        assert!(rich.spans().is_empty());
    }

    #[test]
    fn test_whitespace_collapses() {
        let rich = modern("  Hello\n   world  ");
        assert_eq!(rich.as_str(), "Hello world");
    }

    #[test]
    fn test_paragraph_spacing_per_strategy() {
        let markup = "<p>First</p><p>Second</p>";
        assert_eq!(modern(markup).as_str(), "First\n\nSecond");
        assert_eq!(
            MarkupConverter::modern(MarkupMode::Compact).convert(markup).as_str(),
            "First\nSecond"
        );
        assert_eq!(MarkupConverter::legacy().convert(markup).as_str(), "First\n\nSecond");

        // Old platforms space divs like paragraphs
        let divs = "<div>First</div><div>Second</div>";
        assert_eq!(MarkupConverter::legacy().convert(divs).as_str(), "First\n\nSecond");
        assert_eq!(
            MarkupConverter::legacy().convert("<h3>Title</h3><div>Body</div>").as_str(),
            "Title\n\nBody"
        );
    }

    #[test]
    fn test_list_items_in_compatibility_mode() {
        let rich = modern("<ul><li>One</li><li>Two</li></ul>");
        assert_eq!(rich.as_str(), "• One\n\n• Two");
        let bullets: Vec<&str> = rich
            .spans()
            .iter()
            .filter(|span| span.style == SpanStyle::Bullet)
            .map(|span| rich.span_text(span))
            .collect();
        assert_eq!(bullets, vec!["• One", "• Two"]);
    }

    #[test]
    fn test_list_items_compact_and_legacy() {
        let markup = "<ul><li>One</li><li>Two</li></ul>";
        assert_eq!(
            MarkupConverter::modern(MarkupMode::Compact).convert(markup).as_str(),
            "• One\n• Two"
        );

        let legacy = MarkupConverter::legacy().convert(markup);
        assert_eq!(legacy.as_str(), "OneTwo");
        assert!(legacy.spans().is_empty());
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(modern("one<br>two<br/>three<BR />").as_str(), "one\ntwo\nthree");
    }

    #[test]
    fn test_heading() {
        let rich = modern("<h1>Title</h1>Body");
        assert_eq!(rich.as_str(), "Title\n\nBody");
        assert_eq!(rich.text_with_style(&SpanStyle::Heading(1)), Some("Title"));
    }

    #[test]
    fn test_link_and_font_color() {
        let rich = modern(r#"Visit <a href="https://bindui.dev?a=1&amp;b=2">site</a> in <font color='#FF0000'>red</font>"#);
        assert_eq!(rich.as_str(), "Visit site in red");
        assert_eq!(
            rich.text_with_style(&SpanStyle::Link("https://bindui.dev?a=1&b=2".into())),
            Some("site")
        );
        assert_eq!(rich.text_with_style(&SpanStyle::Foreground(Color::RED)), Some("red"));
    }

    #[test]
    fn test_unknown_and_stray_tags() {
        assert_eq!(modern("<blink>hi</blink> there").as_str(), "hi there");
        let rich = modern("a</b>b");
        assert_eq!(rich.as_str(), "ab");
        assert!(rich.spans().is_empty());
    }

    #[test]
    fn test_malformed_angle_brackets_stay_literal() {
        let rich = modern("1 < 2 and <b>bold");
        assert_eq!(rich.as_str(), "1 < 2 and bold");
        assert_eq!(rich.text_with_style(&SpanStyle::Bold), Some("bold"));

        assert_eq!(modern("a <b").as_str(), "a <b");
    }

    #[test]
    fn test_misnested_tags_close_inner_first() {
        let rich = modern("<b><i>x</b>y</i>");
        assert_eq!(rich.as_str(), "xy");
        assert_eq!(rich.spans().len(), 2);
        assert!(rich.spans().iter().all(|span| span.start == 0 && span.end == 1));
    }

    #[test]
    fn test_comments_doctype_and_scripts_dropped() {
        assert_eq!(modern("a<!-- hidden -->b").as_str(), "ab");
        assert_eq!(modern("<!DOCTYPE html><p>x</p>").as_str(), "x");
        assert_eq!(modern("a<script>alert('<b>')</script>b").as_str(), "ab");
    }

    #[test]
    fn test_empty_input() {
        assert!(modern("").is_empty());
        assert!(MarkupConverter::legacy().convert("<p></p>").is_empty());
    }

    #[test]
    fn test_mode_deserializes_from_lowercase() {
        let mode: MarkupMode = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(mode, MarkupMode::Compact);
    }
}
