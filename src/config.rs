//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::highlight::theme_names;
use crate::markdown::{DEFAULT_LANGUAGE_CLASS_PREFIX, RenderOptions, UnknownLanguage};

/// Input path meaning "read from stdin".
const STDIN: &str = "-";

/// Command line configuration for mdpreview.
#[derive(Debug, Clone, Parser)]
#[command(name = "mdpreview", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to render ("-" reads stdin)
    #[arg(default_value = STDIN)]
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Omit raw HTML found in the markdown
    #[arg(long)]
    pub no_raw_html: bool,

    /// Keep soft line breaks instead of emitting <br />
    #[arg(long)]
    pub no_breaks: bool,

    /// Class prefix for fenced code block languages
    #[arg(long, default_value = DEFAULT_LANGUAGE_CLASS_PREFIX)]
    pub lang_prefix: String,

    /// Fail when a code block names a language without a grammar
    #[arg(long)]
    pub strict: bool,

    /// Wrap output in a complete HTML document with theme styles
    #[arg(long)]
    pub standalone: bool,

    /// Highlighting theme for standalone output (InspiredGitHub, base16-ocean.dark, etc.)
    #[arg(long, default_value = "InspiredGitHub")]
    pub theme: String,

    /// Open the output file in the default browser
    #[arg(long)]
    pub open: bool,

    /// List languages with a highlighting grammar and exit
    #[arg(long)]
    pub list_languages: bool,

    /// List bundled highlighting themes and exit
    #[arg(long)]
    pub list_themes: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist, `--open` is given
    /// without an output file, or `--standalone` names an unknown theme.
    pub fn validate(&self) -> Result<()> {
        if !self.reads_stdin() && !self.input.exists() {
            bail!("Input file does not exist: {}", self.input.display());
        }

        if self.open && self.output.is_none() {
            bail!("--open requires --output");
        }

        if self.standalone {
            let themes = theme_names();
            if !themes.contains(&self.theme) {
                bail!(
                    "Unknown theme: {} (available: {})",
                    self.theme,
                    themes.join(", ")
                );
            }
        }

        Ok(())
    }

    /// Returns true if markdown is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new(STDIN)
    }

    /// Maps command line flags to renderer options.
    pub fn render_options(&self) -> RenderOptions {
        let unknown_language = if self.strict {
            UnknownLanguage::Fail
        } else {
            UnknownLanguage::PlainText
        };

        RenderOptions::default()
            .allow_raw_html(!self.no_raw_html)
            .convert_line_breaks(!self.no_breaks)
            .language_class_prefix(self.lang_prefix.clone())
            .unknown_language(unknown_language)
    }

    /// Returns document title for standalone output.
    pub fn title(&self) -> String {
        if self.reads_stdin() {
            return "Preview".to_string();
        }

        self.input
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .unwrap_or_else(|| "Preview".to_string())
    }
}
