//! Markdown rendering with highlighted code blocks.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use comrak::options::Plugins;

use super::code_blocks::CodeBlockAdapter;
use super::options::RenderOptions;
use crate::highlight::{Highlighter, SyntectHighlighter};

static SHARED: LazyLock<MarkdownRenderer> = LazyLock::new(MarkdownRenderer::new);

/// Returns the process wide renderer with default options.
///
/// Built on first use and read only afterwards, so it can be handed to any
/// number of threads.
pub fn shared() -> &'static MarkdownRenderer {
    &SHARED
}

/// Renders markdown to HTML for editor previews.
///
/// Wraps comrak with a fixed set of [`RenderOptions`] and routes every fenced
/// code block through a [`Highlighter`]. The renderer holds no mutable state,
/// so one instance serves any number of sequential or concurrent renders.
pub struct MarkdownRenderer {
    options: RenderOptions,
    highlighter: Arc<dyn Highlighter>,
}

impl MarkdownRenderer {
    /// Creates renderer with default options and the syntect highlighter.
    ///
    /// Defaults: raw HTML passthrough, soft line breaks become `<br />`, and
    /// code blocks carry a `language-` prefixed class.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Creates renderer with custom options and the syntect highlighter.
    ///
    /// # Arguments
    ///
    /// * `options`: Rendering options
    pub fn with_options(options: RenderOptions) -> Self {
        Self::with_highlighter(options, Arc::new(SyntectHighlighter::new()))
    }

    /// Creates renderer with custom options and highlighter.
    ///
    /// # Arguments
    ///
    /// * `options`: Rendering options
    /// * `highlighter`: Capability used for every fenced code block
    pub fn with_highlighter(options: RenderOptions, highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            options,
            highlighter,
        }
    }

    /// Options this renderer was built with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders markdown content to HTML string.
    ///
    /// Converts markdown with comrak. Code blocks parsed from the markdown
    /// are handed to the highlighter while comrak writes them; raw HTML is
    /// never re-highlighted.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Rendered HTML fragment
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting fails, or if a fence language is
    /// unknown and the options ask to fail on unknown languages
    pub fn render(&self, content: &str) -> Result<String> {
        let adapter = CodeBlockAdapter::new(&self.options, self.highlighter.as_ref());

        let html = {
            let mut plugins = Plugins::default();
            plugins.render.codefence_syntax_highlighter = Some(&adapter);
            comrak::markdown_to_html_with_plugins(content, &self.options.to_comrak(), &plugins)
        };

        adapter.finish().context("Failed to render markdown")?;

        Ok(html)
    }

    /// Renders markdown file at given path.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to markdown file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file {}", path.display()))?;
        self.render(&content)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
