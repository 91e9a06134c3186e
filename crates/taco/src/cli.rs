//! Command-line interface for `taco`.
//!
//! # Examples
//!
//! ```bash
//! # Order with the default theme
//! taco
//!
//! # Dracula colors, fixed width, JSON receipt
//! taco --theme dracula --width 60 --json
//!
//! # Log form transitions to a file
//! RUST_LOG=promptform=debug taco --log-file taco.log
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Order a taco through a multi-step terminal form.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(name = "taco", author, version, about = "Order a taco from the terminal")]
pub struct Cli {
    /// Theme to use for styling
    ///
    /// Available themes: charm, dracula, base16, base
    #[arg(long, short = 't', default_value = "charm", env = "TACO_THEME")]
    pub theme: String,

    /// Fixed form width in columns (defaults to the terminal width)
    #[arg(long, short = 'w')]
    pub width: Option<usize>,

    /// Force color output off
    ///
    /// Respects the `NO_COLOR` environment variable
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Write logs to this file (stdout belongs to the form)
    #[arg(long, env = "TACO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Editor command for the special instructions field
    ///
    /// Defaults to `$VISUAL`, then `$EDITOR`, then `vi`
    #[arg(long)]
    pub editor: Option<String>,

    /// Print the order as JSON
    #[arg(long)]
    pub json: bool,

    /// Run in the main terminal buffer instead of the alternate screen
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Hide the key help line
    #[arg(long)]
    pub no_help: bool,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator.
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    #[cfg(test)]
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}
