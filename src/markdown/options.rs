//! Renderer configuration.

/// Default prefix for the class attribute of fenced code blocks.
pub const DEFAULT_LANGUAGE_CLASS_PREFIX: &str = "language-";

/// What to do with a fenced code block whose language has no grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownLanguage {
    /// Render the block as escaped, unhighlighted text and keep going.
    #[default]
    PlainText,
    /// Abort the whole render with an error.
    Fail,
}

/// Options controlling how markdown is turned into HTML.
///
/// Built once and owned by a [`MarkdownRenderer`](super::MarkdownRenderer).
/// Defaults match an editor preview of trusted content:
///
/// | option | default |
/// |--------|---------|
/// | `allow_raw_html` | `true` |
/// | `convert_line_breaks` | `true` |
/// | `language_class_prefix` | `"language-"` |
/// | `unknown_language` | [`UnknownLanguage::PlainText`] |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit raw HTML from the source verbatim instead of omitting it.
    pub allow_raw_html: bool,
    /// Turn soft line breaks inside paragraphs into `<br />`.
    pub convert_line_breaks: bool,
    /// Prepended to the fence language to form the code element class.
    pub language_class_prefix: String,
    /// Policy for fence languages the highlighter does not know.
    pub unknown_language: UnknownLanguage,
}

impl RenderOptions {
    /// Sets raw HTML passthrough.
    pub fn allow_raw_html(mut self, allow: bool) -> Self {
        self.allow_raw_html = allow;
        self
    }

    /// Sets soft line break conversion.
    pub fn convert_line_breaks(mut self, convert: bool) -> Self {
        self.convert_line_breaks = convert;
        self
    }

    /// Sets the code block language class prefix.
    pub fn language_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.language_class_prefix = prefix.into();
        self
    }

    /// Sets the unknown language policy.
    pub fn unknown_language(mut self, policy: UnknownLanguage) -> Self {
        self.unknown_language = policy;
        self
    }

    /// Builds the comrak options for these settings.
    ///
    /// GFM extensions are always on. Smart punctuation stays off so the
    /// preview shows the characters the author typed.
    pub(crate) fn to_comrak(&self) -> comrak::Options<'static> {
        let mut options = comrak::Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;

        options.render.r#unsafe = self.allow_raw_html;
        options.render.hardbreaks = self.convert_line_breaks;

        options
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            allow_raw_html: true,
            convert_line_breaks: true,
            language_class_prefix: DEFAULT_LANGUAGE_CLASS_PREFIX.to_string(),
            unknown_language: UnknownLanguage::PlainText,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        // Arrange & Act
        let options = RenderOptions::default();

        // Assert
        assert!(options.allow_raw_html);
        assert!(options.convert_line_breaks);
        assert_eq!(options.language_class_prefix, "language-");
        assert_eq!(options.unknown_language, UnknownLanguage::PlainText);
    }

    #[test]
    fn test_setters_chain() {
        // Arrange & Act
        let options = RenderOptions::default()
            .allow_raw_html(false)
            .convert_line_breaks(false)
            .language_class_prefix("lang-")
            .unknown_language(UnknownLanguage::Fail);

        // Assert
        assert!(!options.allow_raw_html);
        assert!(!options.convert_line_breaks);
        assert_eq!(options.language_class_prefix, "lang-");
        assert_eq!(options.unknown_language, UnknownLanguage::Fail);
    }

    #[test]
    fn test_to_comrak_maps_switches() {
        // Arrange
        let options = RenderOptions::default().allow_raw_html(false);

        // Act
        let comrak_options = options.to_comrak();

        // Assert
        assert!(!comrak_options.render.r#unsafe);
        assert!(comrak_options.render.hardbreaks);
        assert!(comrak_options.extension.table);
        assert!(!comrak_options.parse.smart);
    }
}
