//! External editor sessions for text fields.
//!
//! [`open_editor`] builds a terminal-owning [`Cmd`] that writes the current
//! content to a temporary file, runs the user's editor on it, and reports the
//! edited text (or the failure) as [`Msg::EditorFinished`].

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::command::Cmd;
use crate::error::{FormError, Result};
use crate::field::FieldId;
use crate::message::Msg;

/// How to launch the external editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Shell command; the temp file path is appended as the last argument.
    pub command: String,
    /// Extension of the temp file, without the dot. Lets editors pick a syntax.
    pub extension: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: resolve_editor_command(),
            extension: "md".to_string(),
        }
    }
}

impl EditorConfig {
    /// Uses `command` instead of the environment's editor.
    #[must_use]
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Sets the temp file extension.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// `$VISUAL`, then `$EDITOR`, then `vi`. Blank values are ignored.
pub fn resolve_editor_command() -> String {
    env::var("VISUAL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| env::var("EDITOR").ok().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| "vi".to_owned())
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn launch(command: &str, path: &Path) -> Result<()> {
    let path_text = path.to_string_lossy();
    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{command} {}", shell_single_quote(&path_text)))
        .status()
        .map_err(|err| FormError::io(format!("failed to run editor `{command}`: {err}")))?;
    if !status.success() {
        return Err(FormError::io(format!("editor exited with {status}")));
    }
    Ok(())
}

/// Runs the editor on `content` synchronously and returns the edited text.
pub fn edit(config: &EditorConfig, content: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("promptform-")
        .suffix(&format!(".{}", config.extension))
        .tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    launch(&config.command, file.path())?;
    Ok(fs::read_to_string(file.path())?)
}

/// Command that edits `content` for `field` and yields [`Msg::EditorFinished`].
pub fn open_editor(config: &EditorConfig, field: FieldId, content: String) -> Cmd {
    let config = config.clone();
    Cmd::exec(move || {
        debug!(%field, command = %config.command, "launching editor");
        let result = edit(&config, &content);
        debug!(%field, ok = result.is_ok(), "editor finished");
        Msg::EditorFinished { field, result }
    })
    .on_handoff_error(move |err| Msg::EditorFinished {
        field,
        result: Err(err),
    })
}
