//! Runtime configuration for `taco`.
//!
//! [`Config`] is the resolved form of every runtime option, independent of
//! whether it came from a flag or the environment.

use std::path::PathBuf;

use promptform::{EditorConfig, Theme, theme_by_name, theme_charm};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// How the finished order is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable receipt.
    #[default]
    Text,
    /// One JSON object.
    Json,
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Theme preset name.
    pub theme: String,
    /// Whether colors are rendered.
    pub color: bool,
    /// Fixed form width; `None` follows the terminal.
    pub width: Option<usize>,
    /// Log destination.
    pub log_file: Option<PathBuf>,
    /// Editor command override.
    pub editor: Option<String>,
    /// Receipt format.
    pub output: OutputFormat,
    /// Whether to use the alternate screen.
    pub alt_screen: bool,
    /// Whether to show the key help line.
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "charm".to_string(),
            color: true,
            width: None,
            log_file: None,
            editor: None,
            output: OutputFormat::Text,
            alt_screen: true,
            show_help: true,
        }
    }
}

impl Config {
    /// Create config from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            theme: cli.theme.to_lowercase(),
            color: !cli.no_color,
            width: cli.width.filter(|&w| w > 0),
            log_file: cli.log_file.clone(),
            editor: cli.editor.clone().filter(|e| !e.trim().is_empty()),
            output: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            alt_screen: !cli.no_alt_screen,
            show_help: !cli.no_help,
        }
    }

    /// The theme to render with. Unknown names fall back to charm.
    #[must_use]
    pub fn theme(&self) -> Theme {
        let theme = theme_by_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme, using charm");
            theme_charm()
        });
        if self.color { theme } else { theme.plain() }
    }

    /// The external editor for the special instructions field.
    #[must_use]
    pub fn editor(&self) -> EditorConfig {
        match &self.editor {
            Some(command) => EditorConfig::default().command(command.clone()),
            None => EditorConfig::default(),
        }
    }
}
