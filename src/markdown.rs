//! Markdown rendering for editor previews.
//!
//! This module wraps comrak with a named option set (raw HTML passthrough,
//! soft line breaks as `<br />`, a class prefix for code languages) and
//! delegates fenced code blocks to a [`Highlighter`](crate::Highlighter).

mod code_blocks;
mod options;
mod renderer;

pub use options::{DEFAULT_LANGUAGE_CLASS_PREFIX, RenderOptions, UnknownLanguage};
pub use renderer::{MarkdownRenderer, shared};
