//! Syntax highlighting for fenced code blocks.

use anyhow::{Context, Result};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// CSS class prefix for highlighted tokens.
///
/// Matches the highlight.js conventions most markdown stylesheets already
/// ship with, so `source.json` scopes become `hljs-source hljs-json`.
pub const TOKEN_CLASS_PREFIX: &str = "hljs-";

/// Errors produced while highlighting a single code block.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// No grammar is registered for the requested language.
    #[error("no grammar registered for language `{0}`")]
    UnknownLanguage(String),

    /// The grammar failed while tokenizing the code.
    #[error("syntax highlighting failed: {0}")]
    Syntax(#[from] syntect::Error),
}

/// Capability that turns a code block into highlighted HTML.
///
/// Implementations own their grammar registry and must treat it as read
/// only, so a single highlighter can serve concurrent renders.
pub trait Highlighter: Send + Sync {
    /// Highlights `code` using the grammar registered for `language`.
    ///
    /// The returned fragment is HTML with all code text escaped. Returns
    /// [`HighlightError::UnknownLanguage`] when no grammar matches.
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;

    /// Returns true if a grammar is registered for `language`.
    fn supports(&self, language: &str) -> bool;
}

/// Highlighter backed by syntect's bundled grammars.
///
/// Produces `<span class="hljs-*">` markup using CSS classes instead of
/// inline styles, so the look is controlled by a stylesheet (see
/// [`theme_css`]).
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    class_prefix: &'static str,
}

impl SyntectHighlighter {
    /// Creates highlighter with the default grammar set and `hljs-` prefix.
    pub fn new() -> Self {
        Self::with_class_prefix(TOKEN_CLASS_PREFIX)
    }

    /// Creates highlighter emitting token classes with the given prefix.
    ///
    /// # Arguments
    ///
    /// * `class_prefix`: Prefix prepended to every scope class name
    pub fn with_class_prefix(class_prefix: &'static str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            class_prefix,
        }
    }

    /// Token class prefix used by this highlighter.
    pub fn class_prefix(&self) -> &'static str {
        self.class_prefix
    }

    /// Names of all registered grammars, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .syntax_set
            .syntaxes()
            .iter()
            .map(|syntax| syntax.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Finds grammar by token (name or extension), then by extension.
    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::UnknownLanguage(language.to_string()))?;

        if code.is_empty() {
            return Ok(String::new());
        }

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: self.class_prefix,
            },
        );

        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(generator.finalize())
    }

    fn supports(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }
}

/// Names of the bundled highlighting themes, sorted.
pub fn theme_names() -> Vec<String> {
    ThemeSet::load_defaults().themes.into_keys().collect()
}

/// Generates a stylesheet for highlighted tokens from a bundled theme.
///
/// # Arguments
///
/// * `theme_name`: Bundled theme name (InspiredGitHub, base16-ocean.dark, etc)
/// * `class_prefix`: Token class prefix the highlighter was built with
///
/// # Errors
///
/// Returns error if the theme does not exist or CSS generation fails
pub fn theme_css(theme_name: &str, class_prefix: &'static str) -> Result<String> {
    let themes = ThemeSet::load_defaults();
    let theme = themes.themes.get(theme_name).with_context(|| {
        format!(
            "Unknown theme: {} (available: {})",
            theme_name,
            themes.themes.keys().cloned().collect::<Vec<_>>().join(", ")
        )
    })?;

    css_for_theme_with_class_style(
        theme,
        ClassStyle::SpacedPrefixed {
            prefix: class_prefix,
        },
    )
    .with_context(|| format!("Failed to generate CSS for theme {}", theme_name))
}
