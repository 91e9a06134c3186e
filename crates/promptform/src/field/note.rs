//! Informational notes.

use super::{advance, retreat, Field, FieldBase, FieldId, FieldPosition};
use crate::command::Cmd;
use crate::error::Result;
use crate::key::{matches, matches_one, Binding};
use crate::keymap::{set_last, KeyMap, NoteKeyMap};
use crate::message::Msg;
use crate::theme::Theme;

/// A read-only block of text, optionally with a "Next" button.
///
/// Without the button the note is skipped during navigation.
pub struct Note {
    base: FieldBase,
    next: bool,
    next_label: String,
    keymap: NoteKeyMap,
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

impl Note {
    /// Creates a new note.
    pub fn new() -> Self {
        Self {
            base: FieldBase::new(),
            next: false,
            next_label: "Next".to_string(),
            keymap: NoteKeyMap::default(),
        }
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.base.title = title.into();
        self
    }

    /// Sets the body text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.base.description = description.into();
        self
    }

    /// Shows a button that moves to the next field.
    pub fn next(mut self, show: bool) -> Self {
        self.next = show;
        self
    }

    /// Sets the button text.
    pub fn next_label(mut self, label: impl Into<String>) -> Self {
        self.next_label = label.into();
        self
    }

    /// Sets a theme for this field only.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.base.set_theme(theme);
        self
    }

    fn apply_position(&mut self) {
        let pos = self.base.position;
        self.keymap.prev.enable(!pos.is_first());
        set_last(&mut self.keymap.next, &mut self.keymap.submit, pos.is_last());
    }
}

impl Field for Note {
    fn id(&self) -> FieldId {
        self.base.id
    }

    fn title(&self) -> &str {
        &self.base.title
    }

    fn skip(&self) -> bool {
        !self.next
    }

    fn error(&self) -> Option<&str> {
        None
    }

    fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let Msg::Key(key) = msg else {
            return None;
        };
        if !self.base.focused {
            return None;
        }
        if matches_one(key, &self.keymap.prev) {
            return retreat();
        }
        if matches(key, &[&self.keymap.next, &self.keymap.submit]) {
            return advance(self.confirm());
        }
        None
    }

    fn view(&self) -> String {
        let styles = self.base.styles();
        let mut out = String::new();
        if !self.base.title.is_empty() {
            out.push_str(&styles.note_title.render(&self.base.title));
        }
        if !self.base.description.is_empty() {
            out.push('\n');
            out.push_str(&styles.description.render(&self.base.description));
        }
        if self.next {
            out.push_str("\n\n");
            out.push_str(&styles.focused_button.render(&self.next_label));
        }
        styles.base.render(&out)
    }

    fn validate(&mut self) -> Result<()> {
        Ok(())
    }

    fn confirm(&mut self) -> Result<()> {
        Ok(())
    }

    fn focus(&mut self) -> Option<Cmd> {
        self.base.focused = true;
        None
    }

    fn blur(&mut self) -> Option<Cmd> {
        self.base.focused = false;
        None
    }

    fn is_focused(&self) -> bool {
        self.base.focused
    }

    fn key_binds(&self) -> Vec<Binding> {
        if !self.next {
            return Vec::new();
        }
        vec![
            self.keymap.next.clone(),
            self.keymap.submit.clone(),
            self.keymap.prev.clone(),
        ]
    }

    fn with_theme(&mut self, theme: &Theme) {
        self.base.inherit_theme(theme);
    }

    fn with_keymap(&mut self, keymap: &KeyMap) {
        self.keymap = keymap.note.clone();
        self.apply_position();
    }

    fn with_width(&mut self, width: usize) {
        self.base.width = width;
    }

    fn with_position(&mut self, position: FieldPosition) {
        self.base.position = position;
        self.apply_position();
    }
}
