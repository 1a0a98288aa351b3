//! bindui Text
//!
//! Converts HTML-like markup into [`RichText`]: plain text plus styled byte
//! ranges that a host text widget can render.
//!
//! ```rust
//! use bindui_text::{MarkupConverter, MarkupMode, SpanStyle};
//!
//! let converter = MarkupConverter::modern(MarkupMode::Legacy);
//! let rich = converter.convert("Hello <b>world</b> &amp; friends");
//! assert_eq!(rich.as_str(), "Hello world & friends");
//! assert_eq!(rich.spans()[0].style, SpanStyle::Bold);
//! ```

pub mod markup;
pub mod rich_text;

pub use markup::{ConversionStrategy, MarkupConverter, MarkupMode};
pub use rich_text::{RichText, SpanStyle, TextSpan};
