//! Multi-line text area with external editor support.

use tracing::debug;

use super::input::visible_range;
use super::{advance, retreat, Field, FieldBase, FieldId, FieldPosition, Validator};
use crate::command::Cmd;
use crate::editor::{open_editor, EditorConfig};
use crate::error::Result;
use crate::key::{matches, matches_one, Binding, KeyType};
use crate::keymap::{set_last, KeyMap, TextKeyMap};
use crate::message::Msg;
use crate::slot::{commit_into, Commit, Slot};
use crate::theme::Theme;

/// A multi-line text field.
///
/// `ctrl+e` hands the current text to an external editor; the edited text
/// replaces the working value when the editor exits successfully.
pub struct Text {
    base: FieldBase,
    value: Vec<char>,
    cursor: usize,
    placeholder: String,
    char_limit: usize,
    lines: usize,
    editor: EditorConfig,
    custom_editor: bool,
    validate: Option<Validator<str>>,
    commit: Option<Commit<String>>,
    keymap: TextKeyMap,
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Text {
    /// Creates a new text field.
    pub fn new() -> Self {
        Self {
            base: FieldBase::new(),
            value: Vec::new(),
            cursor: 0,
            placeholder: String::new(),
            char_limit: 0,
            lines: 5,
            editor: EditorConfig::default(),
            custom_editor: false,
            validate: None,
            commit: None,
            keymap: TextKeyMap::default(),
        }
    }

    /// Sets the initial value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into().chars().collect();
        self.cursor = self.value.len();
        self
    }

    /// Seeds the value from `slot` and writes confirmed values back into it.
    pub fn bind(self, slot: &Slot<String>) -> Self {
        let mut this = self.value(slot.get());
        this.commit = Some(commit_into(slot));
        this
    }

    /// Calls `f` with every confirmed value.
    pub fn on_commit(mut self, f: impl FnMut(String) + Send + Sync + 'static) -> Self {
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

    /// Sets the placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the character limit. Zero means unlimited.
    pub fn char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        if limit > 0 && self.value.len() > limit {
            self.value.truncate(limit);
            self.cursor = self.cursor.min(limit);
        }
        self
    }

    /// Sets the number of visible lines.
    pub fn lines(mut self, lines: usize) -> Self {
        self.lines = lines.max(1);
        self
    }

    /// Sets the external editor for this field only.
    pub fn editor(mut self, editor: EditorConfig) -> Self {
        self.editor = editor;
        self.custom_editor = true;
        self
    }

    /// Sets the validation rule.
    pub fn validate<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
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
    pub fn get_value(&self) -> String {
        self.value.iter().collect()
    }

    /// Row and column of the cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor];
        let row = before.iter().filter(|&&c| c == '\n').count();
        let col = before.iter().rev().take_while(|&&c| c != '\n').count();
        (row, col)
    }

    /// Character index of the start of each line.
    fn line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        starts.extend(
            self.value
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == '\n')
                .map(|(i, _)| i + 1),
        );
        starts
    }

    fn line_len(&self, starts: &[usize], row: usize) -> usize {
        let start = starts[row];
        let end = starts
            .get(row + 1)
            .map_or(self.value.len(), |next| next - 1);
        end - start
    }

    fn move_vertically(&mut self, down: bool) {
        let starts = self.line_starts();
        let (row, col) = self.cursor_position();
        let target = if down {
            if row + 1 >= starts.len() {
                return;
            }
            row + 1
        } else {
            let Some(up) = row.checked_sub(1) else {
                return;
            };
            up
        };
        self.cursor = starts[target] + col.min(self.line_len(&starts, target));
    }

    fn insert(&mut self, chars: &[char]) {
        for &c in chars {
            if self.char_limit > 0 && self.value.len() >= self.char_limit {
                break;
            }
            self.value.insert(self.cursor, c);
            self.cursor += 1;
        }
    }

    /// First visible row: the window ends on the cursor row once it scrolls.
    fn offset(&self) -> usize {
        let (row, _) = self.cursor_position();
        (row + 1).saturating_sub(self.lines)
    }

    fn apply_position(&mut self) {
        let pos = self.base.position;
        self.keymap.prev.enable(!pos.is_first());
        set_last(&mut self.keymap.next, &mut self.keymap.submit, pos.is_last());
    }

    fn editor_finished(&mut self, result: &Result<String>) {
        match result {
            Ok(text) => {
                let text = text.strip_suffix('\n').unwrap_or(text);
                let mut value: Vec<char> = text.chars().collect();
                if self.char_limit > 0 {
                    value.truncate(self.char_limit);
                }
                self.value = value;
                self.cursor = self.value.len();
                self.base.error = None;
            }
            Err(err) => {
                debug!(field = %self.base.id, error = %err, "editor failed");
                self.base.error = Some(err.field_message());
            }
        }
    }

    fn render_lines(&self) -> String {
        let styles = self.base.styles();
        let text = &styles.text_input;

        if self.value.is_empty() && !self.placeholder.is_empty() {
            return text.placeholder.render(&self.placeholder);
        }

        let starts = self.line_starts();
        let (cursor_row, cursor_col) = self.cursor_position();
        let avail = self.base.width.saturating_sub(2);

        let offset = self.offset();
        let last = (offset + self.lines).min(starts.len());
        (offset..last)
            .map(|row| {
                let start = starts[row];
                let line: Vec<char> = self.value[start..start + self.line_len(&starts, row)].to_vec();
                if self.base.focused && row == cursor_row {
                    let range = visible_range(&line, cursor_col, avail);
                    let before: String = line[range.start..cursor_col].iter().collect();
                    let (at, after) = match line.get(cursor_col) {
                        Some(c) if cursor_col < range.end => (
                            c.to_string(),
                            line[cursor_col + 1..range.end].iter().collect::<String>(),
                        ),
                        _ => (" ".to_string(), String::new()),
                    };
                    format!(
                        "{}{}{}",
                        text.text.render(&before),
                        text.cursor.render(&at),
                        text.text.render(&after)
                    )
                } else {
                    let range = visible_range(&line, 0, avail);
                    let shown: String = line[range].iter().collect();
                    text.text.render(&shown)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Field for Text {
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
        let key = match msg {
            Msg::EditorFinished { field, result } if *field == self.base.id => {
                self.editor_finished(result);
                return None;
            }
            Msg::Key(key) => key,
            _ => return None,
        };
        if !self.base.focused {
            return None;
        }
        self.base.error = None;

        if matches_one(key, &self.keymap.prev) {
            return retreat();
        }
        if matches_one(key, &self.keymap.new_line) {
            self.insert(&['\n']);
            return None;
        }
        if matches_one(key, &self.keymap.editor) {
            debug!(field = %self.base.id, "opening external editor");
            return Some(open_editor(&self.editor, self.base.id, self.get_value()));
        }
        if matches(key, &[&self.keymap.next, &self.keymap.submit]) {
            return advance(self.confirm());
        }

        match key.key_type {
            KeyType::Runes if !key.alt => self.insert(&key.runes),
            KeyType::Space => self.insert(&[' ']),
            KeyType::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                }
            }
            KeyType::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            KeyType::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyType::Right => self.cursor = (self.cursor + 1).min(self.value.len()),
            KeyType::Up => self.move_vertically(false),
            KeyType::Down => self.move_vertically(true),
            KeyType::Home => {
                let (_, col) = self.cursor_position();
                self.cursor -= col;
            }
            KeyType::End => {
                let starts = self.line_starts();
                let (row, col) = self.cursor_position();
                self.cursor += self.line_len(&starts, row) - col;
            }
            _ => {}
        }

        None
    }

    fn view(&self) -> String {
        let mut out = self.base.header();
        out.push_str(&self.render_lines());
        self.base.frame(out)
    }

    fn validate(&mut self) -> Result<()> {
        let value = self.get_value();
        let result = self.validate.as_ref().map_or(Ok(()), |rule| rule(&value));
        self.base.record(result)
    }

    fn confirm(&mut self) -> Result<()> {
        self.validate()?;
        if let Some(commit) = self.commit.as_mut() {
            commit(self.value.iter().collect());
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
            self.keymap.next.clone(),
            self.keymap.submit.clone(),
            self.keymap.new_line.clone(),
            self.keymap.editor.clone(),
            self.keymap.prev.clone(),
        ]
    }

    fn with_theme(&mut self, theme: &Theme) {
        self.base.inherit_theme(theme);
    }

    fn with_keymap(&mut self, keymap: &KeyMap) {
        self.keymap = keymap.text.clone();
        self.apply_position();
    }

    fn with_editor(&mut self, editor: &EditorConfig) {
        if !self.custom_editor {
            self.editor = editor.clone();
        }
    }

    fn with_width(&mut self, width: usize) {
        self.base.width = width;
    }

    fn with_height(&mut self, height: usize) {
        if height > 0 {
            self.lines = height;
        }
    }

    fn with_position(&mut self, position: FieldPosition) {
        self.base.position = position;
        self.apply_position();
    }
}
