use anyhow::{Context, Result};
use mdpreview::{Config, MarkdownRenderer, SyntectHighlighter, TOKEN_CLASS_PREFIX};
use std::fs;
use std::io::{self, Read, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// Filter comes from `RUST_LOG`, defaulting to warnings only so stdout
/// carries nothing but HTML.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Reads markdown from the configured input.
fn read_input(config: &Config) -> Result<String> {
    if config.reads_stdin() {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read markdown from stdin")?;
        return Ok(content);
    }

    fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))
}

/// Writes one name per line to stdout.
fn print_lines(lines: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line).context("Failed to write to stdout")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    let config = Config::parse();

    let highlighter = Arc::new(SyntectHighlighter::new());

    if config.list_languages {
        return print_lines(&highlighter.languages());
    }
    if config.list_themes {
        return print_lines(&mdpreview::theme_names());
    }

    config.validate().context("Invalid configuration")?;

    let renderer = MarkdownRenderer::with_highlighter(config.render_options(), highlighter);

    let markdown = read_input(&config)?;
    let fragment = renderer.render(&markdown)?;

    let html = if config.standalone {
        let css = mdpreview::theme_css(&config.theme, TOKEN_CLASS_PREFIX)?;
        mdpreview::page::preview_page(&config.title(), &css, &fragment).into_string()
    } else {
        fragment
    };

    match &config.output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = html.len(), "wrote preview");

            if config.open
                && let Err(e) = open::that(path)
            {
                tracing::warn!("Failed to open {} in browser: {}", path.display(), e);
            }
        }
        None => {
            io::stdout()
                .lock()
                .write_all(html.as_bytes())
                .context("Failed to write HTML to stdout")?;
        }
    }

    Ok(())
}
