//! The field abstraction and its variants.
//!
//! Every field keeps a *working value* that the user edits and, optionally, a
//! commit target that receives the value once the user confirms it and it
//! passes validation. Confirmation is the only moment a field writes outside
//! of itself.

mod confirm;
mod input;
mod multi_select;
mod note;
mod select;
mod text;

pub use confirm::Confirm;
pub use input::{EchoMode, Input};
pub use multi_select::MultiSelect;
pub use note::Note;
pub use select::Select;
pub use text::Text;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use crate::command::Cmd;
use crate::editor::EditorConfig;
use crate::error::Result;
use crate::key::Binding;
use crate::keymap::KeyMap;
use crate::message::Msg;
use crate::theme::{theme_charm, FieldStyles, Theme};

/// Process-unique identifier of a field.
///
/// Used to route asynchronous results, such as an editor session, back to the
/// field that asked for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    /// Allocates a fresh identifier.
    pub fn next() -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field-{}", self.0)
    }
}

/// Positional information about a field within a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldPosition {
    /// Current group index.
    pub group: usize,
    /// Current field index within group.
    pub field: usize,
    /// First non-skipped field index.
    pub first_field: usize,
    /// Last non-skipped field index.
    pub last_field: usize,
    /// Total number of groups.
    pub group_count: usize,
    /// First non-hidden group index.
    pub first_group: usize,
    /// Last non-hidden group index.
    pub last_group: usize,
}

impl FieldPosition {
    /// Returns whether this field is the first in the form.
    pub fn is_first(&self) -> bool {
        self.field == self.first_field && self.group == self.first_group
    }

    /// Returns whether this field is the last in the form.
    pub fn is_last(&self) -> bool {
        self.field == self.last_field && self.group == self.last_group
    }
}

/// A form field.
///
/// Implementors handle one message at a time in [`Field::update`] and return
/// at most one deferred command. The group drives focus, and the form pushes
/// theme, keymap and size down before the first render.
pub trait Field: Send + Sync {
    /// Returns the field's identifier.
    fn id(&self) -> FieldId;

    /// Returns the field's title.
    fn title(&self) -> &str;

    /// Returns whether navigation passes over this field.
    fn skip(&self) -> bool {
        false
    }

    /// Returns the current validation error, if any.
    fn error(&self) -> Option<&str>;

    /// Initializes the field.
    fn init(&mut self) -> Option<Cmd> {
        None
    }

    /// Updates the field with a message.
    fn update(&mut self, msg: &Msg) -> Option<Cmd>;

    /// Renders the field.
    fn view(&self) -> String;

    /// Runs the validation rule against the working value.
    ///
    /// Clears the stored error on success and stores it on failure.
    fn validate(&mut self) -> Result<()>;

    /// Validates and, on success, commits the working value to its target.
    fn confirm(&mut self) -> Result<()>;

    /// Focuses the field.
    fn focus(&mut self) -> Option<Cmd>;

    /// Blurs the field. Uncommitted edits are kept.
    fn blur(&mut self) -> Option<Cmd>;

    /// Returns whether the field currently accepts input.
    fn is_focused(&self) -> bool;

    /// Returns the keybindings shown in help.
    fn key_binds(&self) -> Vec<Binding>;

    /// Sets the theme unless the field was given its own.
    fn with_theme(&mut self, theme: &Theme);

    /// Sets the keymap.
    fn with_keymap(&mut self, keymap: &KeyMap);

    /// Sets the editor used by fields that support one.
    fn with_editor(&mut self, _editor: &EditorConfig) {}

    /// Sets the width.
    fn with_width(&mut self, width: usize);

    /// Sets the height.
    fn with_height(&mut self, _height: usize) {}

    /// Sets the field position.
    fn with_position(&mut self, position: FieldPosition);
}

/// Validation rule over a working value.
pub(crate) type Validator<V> = Box<dyn Fn(&V) -> Result<()> + Send + Sync>;

/// State shared by every field variant.
pub(crate) struct FieldBase {
    pub id: FieldId,
    pub title: String,
    pub description: String,
    pub focused: bool,
    pub error: Option<String>,
    pub theme: Theme,
    pub custom_theme: bool,
    pub width: usize,
    pub position: FieldPosition,
}

impl FieldBase {
    pub fn new() -> Self {
        Self {
            id: FieldId::next(),
            title: String::new(),
            description: String::new(),
            focused: false,
            error: None,
            theme: theme_charm(),
            custom_theme: false,
            width: 80,
            position: FieldPosition::default(),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.custom_theme = true;
    }

    pub fn inherit_theme(&mut self, theme: &Theme) {
        if !self.custom_theme {
            self.theme = theme.clone();
        }
    }

    pub fn styles(&self) -> &FieldStyles {
        if self.focused {
            &self.theme.focused
        } else {
            &self.theme.blurred
        }
    }

    /// Records the outcome of a validation run.
    pub fn record(&mut self, result: Result<()>) -> Result<()> {
        match &result {
            Ok(()) => self.error = None,
            Err(err) => {
                trace!(field = %self.id, title = %self.title, error = %err, "validation refused");
                self.error = Some(err.field_message());
            }
        }
        result
    }

    /// Title (with error indicator) and description, each followed by a newline.
    pub fn header(&self) -> String {
        let styles = self.styles();
        let mut out = String::new();
        if !self.title.is_empty() {
            out.push_str(&styles.title.render(&self.title));
            if self.error.is_some() {
                out.push_str(&styles.error_indicator.render(""));
            }
            out.push('\n');
        }
        if !self.description.is_empty() {
            out.push_str(&styles.description.render(&self.description));
            out.push('\n');
        }
        out
    }

    /// Appends the inline error line, if any, and applies the base style.
    pub fn frame(&self, mut body: String) -> String {
        let styles = self.styles();
        if let Some(err) = &self.error {
            body.push('\n');
            body.push_str(&styles.error_message.render(err));
        }
        styles.base.render(&body)
    }
}

/// Maps the outcome of a confirmation to the follow-up navigation command.
pub(crate) fn advance(confirmed: Result<()>) -> Option<Cmd> {
    confirmed.ok().map(|()| Cmd::msg(Msg::NextField))
}

/// Command requesting the previous field.
pub(crate) fn retreat() -> Option<Cmd> {
    Some(Cmd::msg(Msg::PrevField))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn test_field_ids_are_unique() {
        let a = FieldId::next();
        let b = FieldId::next();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("field-"));
    }

    #[test]
    fn test_position_first_last() {
        let pos = FieldPosition {
            group: 1,
            field: 0,
            first_field: 0,
            last_field: 2,
            group_count: 3,
            first_group: 1,
            last_group: 2,
        };
        assert!(pos.is_first());
        assert!(!pos.is_last());

        let last = FieldPosition {
            group: 2,
            field: 2,
            ..pos
        };
        assert!(last.is_last());
        assert!(!last.is_first());
    }

    #[test]
    fn test_record_sets_and_clears_error() {
        let mut base = FieldBase::new();
        assert!(base.record(Err(FormError::validation("nope"))).is_err());
        assert_eq!(base.error.as_deref(), Some("nope"));
        assert!(base.record(Ok(())).is_ok());
        assert!(base.error.is_none());
    }

    #[test]
    fn test_header_and_frame_plain() {
        let mut base = FieldBase::new();
        base.set_theme(theme_charm().plain());
        base.focused = true;
        base.title = "Name?".into();
        base.error = Some("name is required".into());
        let out = base.frame(format!("{}> ", base.header()));
        assert_eq!(out, "┃ Name? *\n┃ > \n┃ * name is required");
    }

    #[test]
    fn test_advance() {
        assert!(advance(Err(FormError::validation("x"))).is_none());
        let cmd = advance(Ok(())).unwrap();
        assert!(matches!(cmd.execute(), Some(Msg::NextField)));
    }
}
