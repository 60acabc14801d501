//! Markdown to HTML rendering with syntax highlighted code blocks.

mod config;
mod highlight;
mod markdown;
pub mod page;
mod util;

pub use config::Config;
pub use highlight::{
    HighlightError, Highlighter, SyntectHighlighter, TOKEN_CLASS_PREFIX, theme_css, theme_names,
};
pub use markdown::{
    DEFAULT_LANGUAGE_CLASS_PREFIX, MarkdownRenderer, RenderOptions, UnknownLanguage, shared,
};
pub use util::escape_html;
