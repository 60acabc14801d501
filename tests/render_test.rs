//! Integration tests for markdown rendering.
//!
//! Exercises the public renderer API: option switches, code block
//! highlighting, unknown language handling, injected highlighters, and
//! concurrent use of one renderer.

use anyhow::Result;
use mdpreview::{
    HighlightError, Highlighter, MarkdownRenderer, RenderOptions, UnknownLanguage, escape_html,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Highlighter that records every call and knows only "mock".
#[derive(Default)]
struct RecordingHighlighter {
    calls: Mutex<Vec<(String, String)>>,
}

impl Highlighter for RecordingHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        self.calls
            .lock()
            .expect("Lock should not be poisoned")
            .push((code.to_string(), language.to_string()));

        if self.supports(language) {
            Ok(format!("<mark>{}</mark>", escape_html(code)))
        } else {
            Err(HighlightError::UnknownLanguage(language.to_string()))
        }
    }

    fn supports(&self, language: &str) -> bool {
        language == "mock"
    }
}

/// Tests plain markdown produces no language classes or passthrough artifacts.
#[test]
fn test_plain_markdown_has_no_language_class() -> Result<()> {
    // Arrange
    let renderer = MarkdownRenderer::new();
    let markdown = "# Title\n\nSome *emphasis* and a [link](https://example.com).\n\n- one\n- two\n";

    // Act
    let html = renderer.render(markdown)?;

    // Assert
    assert!(!html.contains("language-"), "Unexpected class: {}", html);
    assert!(!html.contains("<pre>"), "Unexpected code block: {}", html);
    assert!(html.contains("<em>emphasis</em>"));

    Ok(())
}

/// Tests a single newline inside a paragraph becomes a break tag.
#[test]
fn test_soft_break_becomes_br() -> Result<()> {
    // Arrange
    let renderer = MarkdownRenderer::new();

    // Act
    let html = renderer.render("roses are red\nviolets are blue")?;

    // Assert
    assert_eq!(html, "<p>roses are red<br />\nviolets are blue</p>\n");

    Ok(())
}

/// Tests raw HTML blocks and inline tags appear unescaped.
#[test]
fn test_raw_html_passthrough() -> Result<()> {
    // Arrange
    let renderer = MarkdownRenderer::new();
    let markdown = "<details><summary>More</summary>\n\nhidden\n\n</details>\n\nInline <kbd>Ctrl</kbd> key.\n";

    // Act
    let html = renderer.render(markdown)?;

    // Assert
    assert!(html.contains("<details><summary>More</summary>"), "{}", html);
    assert!(html.contains("</details>"), "{}", html);
    assert!(html.contains("<kbd>Ctrl</kbd>"), "{}", html);
    assert!(!html.contains("&lt;kbd&gt;"), "{}", html);

    Ok(())
}

/// Tests raw HTML shaped like a code block is neither highlighted nor escaped.
#[test]
fn test_raw_html_code_block_passthrough() -> Result<()> {
    // Arrange
    let highlighter = Arc::new(RecordingHighlighter::default());
    let strict = MarkdownRenderer::with_highlighter(
        RenderOptions::default().unknown_language(UnknownLanguage::Fail),
        highlighter.clone(),
    );
    let markdown = "<pre><code class=\"language-html\"><b>bold</b></code></pre>\n\ntext\n";

    // Act
    let html = MarkdownRenderer::new().render(markdown)?;
    let strict_html = strict.render(markdown)?;

    // Assert
    assert!(html.contains("<b>bold</b>"), "{}", html);
    assert!(!html.contains("&lt;b&gt;"), "{}", html);
    assert_eq!(html, strict_html);
    assert!(
        highlighter
            .calls
            .lock()
            .expect("Lock should not be poisoned")
            .is_empty(),
        "Raw HTML should never reach the highlighter"
    );

    Ok(())
}

/// Tests a json fence is classed with the prefix and tokenized.
#[test]
fn test_known_language_highlighted() -> Result<()> {
    // Arrange
    let renderer = MarkdownRenderer::new();
    let markdown = "```json\n{\"a\":1}\n```\n";

    // Act
    let html = renderer.render(markdown)?;

    // Assert
    assert!(
        html.starts_with("<pre><code class=\"language-json\">"),
        "Should carry prefixed class: {}",
        html
    );
    assert!(
        html.contains("<span class=\"hljs-"),
        "Should contain token markup: {}",
        html
    );
    assert!(html.ends_with("</code></pre>\n"), "{}", html);

    Ok(())
}

/// Tests an unknown fence language degrades to escaped plain text.
#[test]
fn test_unknown_language_does_not_abort() -> Result<()> {
    // Arrange
    let renderer = MarkdownRenderer::new();
    let markdown = "Before.\n\n```not-a-real-language\nif a < b { \"x\" }\n```\n\nAfter.\n";

    // Act
    let html = renderer.render(markdown)?;

    // Assert
    assert!(html.contains("<p>Before.</p>"), "{}", html);
    assert!(html.contains("<p>After.</p>"), "{}", html);
    assert!(
        html.contains(
            "<pre><code class=\"language-not-a-real-language\">if a &lt; b { &quot;x&quot; }\n</code></pre>"
        ),
        "Should render escaped plain text: {}",
        html
    );
    assert!(!html.contains("hljs-"), "Should not be highlighted: {}", html);

    Ok(())
}

/// Tests strict policy surfaces the unknown language as an error.
#[test]
fn test_unknown_language_strict_policy() {
    // Arrange
    let renderer = MarkdownRenderer::with_options(
        RenderOptions::default().unknown_language(UnknownLanguage::Fail),
    );

    // Act
    let result = renderer.render("```not-a-real-language\nx\n```\n");

    // Assert
    let err = result.expect_err("Strict policy should fail");
    assert!(
        format!("{:#}", err).contains("not-a-real-language"),
        "Error should name the language: {:#}",
        err
    );
}

/// Tests rendering twice with one renderer gives identical output.
#[test]
fn test_render_is_idempotent() -> Result<()> {
    // Arrange
    let renderer = MarkdownRenderer::new();
    let markdown = "# Doc\n\nline one\nline two\n\n<div>raw</div>\n\n```rust\nfn main() {}\n```\n\n```nope\n?\n```\n";

    // Act
    let first = renderer.render(markdown)?;
    let second = renderer.render(markdown)?;

    // Assert
    assert_eq!(first, second);

    Ok(())
}

/// Tests the injected highlighter receives raw code for supported languages only.
#[test]
fn test_injected_highlighter_receives_blocks() -> Result<()> {
    // Arrange
    let highlighter = Arc::new(RecordingHighlighter::default());
    let renderer = MarkdownRenderer::with_highlighter(RenderOptions::default(), highlighter.clone());
    let markdown = "```mock\na < b && \"c\"\n```\n\n```other\nz\n```\n\n```\nno language\n```\n";

    // Act
    let html = renderer.render(markdown)?;

    // Assert
    let calls = highlighter.calls.lock().expect("Lock should not be poisoned");
    assert_eq!(
        *calls,
        vec![("a < b && \"c\"\n".to_string(), "mock".to_string())],
        "Only supported fenced languages should reach the highlighter"
    );
    assert!(
        html.contains("<pre><code class=\"language-mock\"><mark>a &lt; b &amp;&amp; &quot;c&quot;\n</mark></code></pre>"),
        "{}",
        html
    );
    assert!(
        html.contains("<pre><code class=\"language-other\">z\n</code></pre>"),
        "{}",
        html
    );

    Ok(())
}

/// Tests all three option switches turned off together.
#[test]
fn test_all_switches_disabled() -> Result<()> {
    // Arrange
    let options = RenderOptions::default()
        .allow_raw_html(false)
        .convert_line_breaks(false)
        .language_class_prefix("");
    let renderer = MarkdownRenderer::with_options(options);
    let markdown = "a\nb\n\n<span>raw</span>\n\n```unknownlang\nx\n```\n";

    // Act
    let html = renderer.render(markdown)?;

    // Assert
    assert!(!html.contains("<br />"), "{}", html);
    assert!(!html.contains("<span>raw</span>"), "{}", html);
    assert!(html.contains("<code class=\"unknownlang\">"), "{}", html);

    Ok(())
}

/// Tests one renderer can be shared across threads.
#[test]
fn test_concurrent_renders_share_renderer() {
    // Arrange
    let renderer = MarkdownRenderer::new();
    let markdown = "# Shared\n\n```python\ndef f():\n    return 1\n```\n";
    let expected = renderer.render(markdown).expect("Should render");
    let matches = AtomicUsize::new(0);

    // Act
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let html = renderer.render(markdown).expect("Should render");
                if html == expected {
                    matches.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    // Assert
    assert_eq!(matches.load(Ordering::SeqCst), 8);
}

/// Tests the process wide instance renders with default options.
#[test]
fn test_shared_renderer_defaults() -> Result<()> {
    // Arrange
    let renderer = mdpreview::shared();

    // Act
    let html = renderer.render("a\nb")?;

    // Assert
    assert_eq!(renderer.options(), &RenderOptions::default());
    assert_eq!(html, "<p>a<br />\nb</p>\n");

    Ok(())
}
