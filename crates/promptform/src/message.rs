//! Messages exchanged between a form and its environment.
//!
//! A [`Msg`] is an event value that drives exactly one state-transition step.
//! The environment delivers decoded input as [`Msg::Key`]; everything else is
//! produced by the form itself through deferred [`Cmd`](crate::Cmd)s and fed
//! back by whoever drives the loop.

use std::fmt;

use crate::command::Cmd;
use crate::error::Result;
use crate::field::FieldId;
use crate::key::KeyMsg;

/// Terminal dimensions reported by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeMsg {
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
}

/// A message routed through [`Form`](crate::Form), [`Group`](crate::Group)
/// and [`Field`](crate::Field).
pub enum Msg {
    /// A decoded key press.
    Key(KeyMsg),
    /// The terminal was resized.
    WindowSize(WindowSizeMsg),
    /// Move to the next interactive field of the active group.
    NextField,
    /// Move to the previous interactive field of the active group.
    PrevField,
    /// Move to the next visible group, completing the form if none remains.
    NextGroup,
    /// Move to the previous visible group.
    PrevGroup,
    /// Recompute every field's [`FieldPosition`](crate::FieldPosition).
    UpdatePositions,
    /// An external editor session finished for the given field.
    EditorFinished {
        /// Field that requested the editor.
        field: FieldId,
        /// Edited content, or the failure that prevented editing.
        result: Result<String>,
    },
    /// Terminate the session.
    Quit,
    /// Ordered batch of follow-up commands, applied strictly one after another.
    Sequence(Vec<Cmd>),
}

impl Msg {
    /// Returns the key press carried by this message, if any.
    pub fn as_key(&self) -> Option<&KeyMsg> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }
}

impl From<KeyMsg> for Msg {
    fn from(key: KeyMsg) -> Self {
        Self::Key(key)
    }
}

impl From<WindowSizeMsg> for Msg {
    fn from(size: WindowSizeMsg) -> Self {
        Self::WindowSize(size)
    }
}

impl fmt::Debug for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::WindowSize(size) => f.debug_tuple("WindowSize").field(size).finish(),
            Self::NextField => f.write_str("NextField"),
            Self::PrevField => f.write_str("PrevField"),
            Self::NextGroup => f.write_str("NextGroup"),
            Self::PrevGroup => f.write_str("PrevGroup"),
            Self::UpdatePositions => f.write_str("UpdatePositions"),
            Self::EditorFinished { field, result } => f
                .debug_struct("EditorFinished")
                .field("field", field)
                .field("ok", &result.is_ok())
                .finish(),
            Self::Quit => f.write_str("Quit"),
            Self::Sequence(cmds) => write!(f, "Sequence({} cmds)", cmds.len()),
        }
    }
}
