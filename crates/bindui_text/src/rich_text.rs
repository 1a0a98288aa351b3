//! Rich text: plain text with styled spans
//!
//! Spans index bytes of [`RichText::as_str`], may nest and overlap, and are
//! kept sorted by start position.

use bindui_core::Color;

/// Style applied to a span of text
#[derive(Clone, Debug, PartialEq)]
pub enum SpanStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    /// Fixed-width font (`tt`, `code`)
    Monospace,
    /// Hyperlink target
    Link(String),
    /// Foreground color (`font color`)
    Foreground(Color),
    /// Heading level 1-6
    Heading(u8),
    /// List item, including its marker
    Bullet,
    Quote,
}

/// A styled byte range
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    /// Start byte index
    pub start: usize,
    /// End byte index (exclusive)
    pub end: usize,
    pub style: SpanStyle,
}

impl TextSpan {
    pub fn new(start: usize, end: usize, style: SpanStyle) -> Self {
        Self { start, end, style }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `offset` falls inside the span
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Renderable text produced by the markup converter
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichText {
    text: String,
    spans: Vec<TextSpan>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unstyled text
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Build from text and spans. Spans outside the text are clamped and
    /// empty spans dropped.
    pub fn from_parts(text: impl Into<String>, spans: Vec<TextSpan>) -> Self {
        let mut rich = Self {
            text: text.into(),
            spans,
        };
        rich.normalize();
        rich
    }

    /// The text without styling
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Styles covering the byte at `offset`
    pub fn styles_at(&self, offset: usize) -> impl Iterator<Item = &SpanStyle> {
        self.spans
            .iter()
            .filter(move |span| span.contains(offset))
            .map(|span| &span.style)
    }

    /// The text covered by `span`
    pub fn span_text(&self, span: &TextSpan) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// Text for the first span with `style`, if any
    pub fn text_with_style(&self, style: &SpanStyle) -> Option<&str> {
        self.spans
            .iter()
            .find(|span| &span.style == style)
            .map(|span| self.span_text(span))
    }

    pub fn into_parts(self) -> (String, Vec<TextSpan>) {
        (self.text, self.spans)
    }

    fn normalize(&mut self) {
        let len = self.text.len();
        for span in &mut self.spans {
            span.end = span.end.min(len);
        }
        self.spans.retain(|span| !span.is_empty());
        self.spans.sort_by_key(|span| span.start);
    }
}

impl std::fmt::Display for RichText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let rich = RichText::plain("Hello");
        assert_eq!(rich.as_str(), "Hello");
        assert!(rich.spans().is_empty());
        assert_eq!(rich.to_string(), "Hello");
    }

    #[test]
    fn test_from_parts_normalizes() {
        let rich = RichText::from_parts(
            "Hello world",
            vec![
                TextSpan::new(6, 40, SpanStyle::Italic),
                TextSpan::new(0, 5, SpanStyle::Bold),
                TextSpan::new(3, 3, SpanStyle::Underline),
            ],
        );
        assert_eq!(rich.spans().len(), 2);
        assert_eq!(rich.spans()[0].style, SpanStyle::Bold);
        assert_eq!(rich.spans()[1].end, 11);
        assert_eq!(rich.text_with_style(&SpanStyle::Italic), Some("world"));
    }

    #[test]
    fn test_styles_at() {
        let rich = RichText::from_parts(
            "abc",
            vec![
                TextSpan::new(0, 3, SpanStyle::Bold),
                TextSpan::new(1, 2, SpanStyle::Italic),
            ],
        );
        let styles: Vec<_> = rich.styles_at(1).cloned().collect();
        assert_eq!(styles, vec![SpanStyle::Bold, SpanStyle::Italic]);
        assert_eq!(rich.styles_at(2).count(), 1);
    }
}
