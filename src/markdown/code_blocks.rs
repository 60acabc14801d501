//! Code block adapter plugged into comrak's HTML formatter.
//!
//! comrak calls the adapter only for code blocks it parsed from markdown, so
//! raw HTML that happens to look like a code block never reaches the
//! [`Highlighter`].

use comrak::adapters::SyntaxHighlighterAdapter;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::Mutex;

use super::options::{RenderOptions, UnknownLanguage};
use crate::highlight::{HighlightError, Highlighter};
use crate::util::escape_html;

/// Class prefix comrak puts on the code element of a fenced block.
const COMRAK_LANGUAGE_PREFIX: &str = "language-";

/// Routes each code block of one render through a [`Highlighter`].
///
/// Built per render. A highlighting failure that must abort the render is
/// kept in `failure` and reported by [`CodeBlockAdapter::finish`] once
/// comrak is done, since the formatter can only carry `fmt::Error`.
pub(crate) struct CodeBlockAdapter<'r> {
    options: &'r RenderOptions,
    highlighter: &'r dyn Highlighter,
    failure: Mutex<Option<HighlightError>>,
}

impl<'r> CodeBlockAdapter<'r> {
    pub(crate) fn new(options: &'r RenderOptions, highlighter: &'r dyn Highlighter) -> Self {
        Self {
            options,
            highlighter,
            failure: Mutex::new(None),
        }
    }

    /// Returns the first error that must fail the render, if any.
    pub(crate) fn finish(self) -> Result<(), HighlightError> {
        let failure = self
            .failure
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Records a failure, keeping the first one.
    fn fail(&self, err: HighlightError) {
        let mut failure = self
            .failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if failure.is_none() {
            *failure = Some(err);
        }
    }

    /// Produces the code element body for one block.
    fn body(&self, code: &str, language: &str) -> String {
        let unknown = if self.highlighter.supports(language) {
            match self.highlighter.highlight(code, language) {
                Ok(highlighted) => {
                    tracing::trace!(language = %language, bytes = code.len(), "highlighted code block");
                    return highlighted;
                }
                Err(HighlightError::UnknownLanguage(_)) => true,
                Err(err) => {
                    self.fail(err);
                    false
                }
            }
        } else {
            true
        };

        if unknown {
            match self.options.unknown_language {
                UnknownLanguage::PlainText => {
                    tracing::debug!(language = %language, "no grammar for code block, rendering plain text");
                }
                UnknownLanguage::Fail => {
                    self.fail(HighlightError::UnknownLanguage(language.to_string()));
                }
            }
        }

        escape_html(code)
    }
}

/// Writes an opening tag with escaped attributes in a stable order.
fn write_tag(
    output: &mut dyn Write,
    tag: &str,
    attributes: &HashMap<&'static str, Cow<'_, str>>,
) -> fmt::Result {
    let mut sorted: Vec<_> = attributes.iter().collect();
    sorted.sort_by_key(|(name, _)| **name);

    write!(output, "<{}", tag)?;
    for (name, value) in sorted {
        write!(output, " {}=\"{}\"", name, escape_html(value))?;
    }
    output.write_str(">")
}

impl SyntaxHighlighterAdapter for CodeBlockAdapter<'_> {
    fn write_highlighted(
        &self,
        output: &mut dyn Write,
        lang: Option<&str>,
        code: &str,
    ) -> fmt::Result {
        match lang.filter(|l| !l.is_empty()) {
            Some(language) => output.write_str(&self.body(code, language)),
            None => output.write_str(&escape_html(code)),
        }
    }

    fn write_pre_tag<'s>(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<&'static str, Cow<'s, str>>,
    ) -> fmt::Result {
        write_tag(output, "pre", &attributes)
    }

    fn write_code_tag<'s>(
        &self,
        output: &mut dyn Write,
        mut attributes: HashMap<&'static str, Cow<'s, str>>,
    ) -> fmt::Result {
        if let Some(class) = attributes.get_mut("class")
            && let Some(language) = class.strip_prefix(COMRAK_LANGUAGE_PREFIX)
        {
            let prefixed = format!("{}{}", self.options.language_class_prefix, language);
            *class = Cow::Owned(prefixed);
        }
        write_tag(output, "code", &attributes)
    }
}
