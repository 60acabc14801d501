//! Standalone preview document.

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Base styles for the preview body, independent of the highlight theme.
const BASE_CSS: &str = "\
body{max-width:48rem;margin:2rem auto;padding:0 1rem;\
font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Helvetica,Arial,sans-serif;line-height:1.6}\
pre{padding:1rem;overflow:auto;border-radius:6px}\
code{font-family:ui-monospace,SFMono-Regular,Menlo,Consolas,monospace;font-size:0.9em}\
table{border-collapse:collapse}th,td{border:1px solid #d0d7de;padding:0.25rem 0.75rem}\
blockquote{margin:0;padding-left:1rem;border-left:4px solid #d0d7de;color:#57606a}";

/// Wraps a rendered fragment in a complete HTML document.
///
/// The theme stylesheet is inlined so the file can be opened on its own
/// without any companion assets.
///
/// # Arguments
///
/// * `title`: Document title
/// * `theme_css`: Stylesheet for highlighted tokens
/// * `body_html`: Rendered markdown fragment (trusted HTML)
///
/// # Returns
///
/// Complete HTML document
pub fn preview_page(title: &str, theme_css: &str, body_html: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(BASE_CSS)) }
                style { (PreEscaped(theme_css)) }
            }
            body {
                article class="markdown-body" {
                    (PreEscaped(body_html))
                }
            }
        }
    }
}
