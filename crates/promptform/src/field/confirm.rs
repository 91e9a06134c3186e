//! Yes/no confirmation.

use super::{advance, retreat, Field, FieldBase, FieldId, FieldPosition, Validator};
use crate::command::Cmd;
use crate::error::Result;
use crate::key::{matches, matches_one, Binding};
use crate::keymap::{set_last, ConfirmKeyMap, KeyMap};
use crate::message::Msg;
use crate::slot::{commit_into, Commit, Slot};
use crate::theme::Theme;

/// A confirmation field with two buttons.
pub struct Confirm {
    base: FieldBase,
    value: bool,
    affirmative: String,
    negative: String,
    inline: bool,
    validate: Option<Validator<bool>>,
    commit: Option<Commit<bool>>,
    keymap: ConfirmKeyMap,
}

impl Default for Confirm {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm {
    /// Creates a new confirm field.
    pub fn new() -> Self {
        Self {
            base: FieldBase::new(),
            value: false,
            affirmative: "Yes".to_string(),
            negative: "No".to_string(),
            inline: false,
            validate: None,
            commit: None,
            keymap: ConfirmKeyMap::default(),
        }
    }

    /// Sets the initial value.
    pub fn value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    /// Seeds the value from `slot` and writes confirmed values back into it.
    pub fn bind(mut self, slot: &Slot<bool>) -> Self {
        self.value = slot.get();
        self.commit = Some(commit_into(slot));
        self
    }

    /// Calls `f` with every confirmed value.
    pub fn on_commit(mut self, f: impl FnMut(bool) + Send + Sync + 'static) -> Self {
        self.commit = Some(Box::new(f));
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.base.title = title.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.base.description = description.into();
        self
    }

    /// Sets the affirmative button text.
    pub fn affirmative(mut self, text: impl Into<String>) -> Self {
        self.affirmative = text.into();
        self
    }

    /// Sets the negative button text.
    pub fn negative(mut self, text: impl Into<String>) -> Self {
        self.negative = text.into();
        self
    }

    /// Sets whether the title and buttons share a line.
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Sets the validation rule.
    pub fn validate<F>(mut self, rule: F) -> Self
    where
        F: Fn(&bool) -> Result<()> + Send + Sync + 'static,
    {
        self.validate = Some(Box::new(rule));
        self
    }

    /// Sets a theme for this field only.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.base.set_theme(theme);
        self
    }

    /// Gets the current working value.
    pub fn get_bool_value(&self) -> bool {
        self.value
    }

    fn apply_position(&mut self) {
        let pos = self.base.position;
        self.keymap.prev.enable(!pos.is_first());
        set_last(&mut self.keymap.next, &mut self.keymap.submit, pos.is_last());
    }
}

impl Field for Confirm {
    fn id(&self) -> FieldId {
        self.base.id
    }

    fn title(&self) -> &str {
        &self.base.title
    }

    fn error(&self) -> Option<&str> {
        self.base.error.as_deref()
    }

    fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let Msg::Key(key) = msg else {
            return None;
        };
        if !self.base.focused {
            return None;
        }
        self.base.error = None;

        if matches_one(key, &self.keymap.prev) {
            return retreat();
        }
        if matches(key, &[&self.keymap.next, &self.keymap.submit]) {
            return advance(self.confirm());
        }

        if matches_one(key, &self.keymap.toggle) {
            self.value = !self.value;
        } else if matches_one(key, &self.keymap.accept) {
            self.value = true;
        } else if matches_one(key, &self.keymap.reject) {
            self.value = false;
        }

        None
    }

    fn view(&self) -> String {
        let styles = self.base.styles();
        let mut out = if self.inline {
            let mut line = styles.title.render(&self.base.title);
            if self.base.error.is_some() {
                line.push_str(&styles.error_indicator.render(""));
            }
            line.push(' ');
            line
        } else {
            self.base.header()
        };

        let (yes, no) = if self.value {
            (&styles.focused_button, &styles.blurred_button)
        } else {
            (&styles.blurred_button, &styles.focused_button)
        };
        out.push_str(&yes.render(&self.affirmative));
        out.push_str(&no.render(&self.negative));

        self.base.frame(out)
    }

    fn validate(&mut self) -> Result<()> {
        let result = self.validate.as_ref().map_or(Ok(()), |rule| rule(&self.value));
        self.base.record(result)
    }

    fn confirm(&mut self) -> Result<()> {
        self.validate()?;
        if let Some(commit) = self.commit.as_mut() {
            commit(self.value);
        }
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
        vec![
            self.keymap.toggle.clone(),
            self.keymap.accept.clone(),
            self.keymap.reject.clone(),
            self.keymap.next.clone(),
            self.keymap.submit.clone(),
            self.keymap.prev.clone(),
        ]
    }

    fn with_theme(&mut self, theme: &Theme) {
        self.base.inherit_theme(theme);
    }

    fn with_keymap(&mut self, keymap: &KeyMap) {
        self.keymap = keymap.confirm.clone();
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
