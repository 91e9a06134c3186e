//! Single-line text input.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{advance, retreat, Field, FieldBase, FieldId, FieldPosition, Validator};
use crate::command::Cmd;
use crate::error::Result;
use crate::key::{matches, matches_one, Binding, KeyType};
use crate::keymap::{set_last, InputKeyMap, KeyMap};
use crate::message::Msg;
use crate::slot::{commit_into, Commit, Slot};
use crate::theme::Theme;

/// Echo mode for input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoMode {
    /// Display text as-is.
    #[default]
    Normal,
    /// Display mask characters (for passwords).
    Password,
    /// Display nothing.
    None,
}

/// A text input field.
///
/// ```
/// use promptform::{Input, Slot};
/// use promptform::validate::validate_required;
///
/// let name = Slot::new(String::new());
/// let input = Input::new()
///     .title("What's your name?")
///     .placeholder("Margaret Thatcher")
///     .validate(validate_required("name"))
///     .bind(&name);
/// ```
pub struct Input {
    base: FieldBase,
    value: Vec<char>,
    cursor: usize,
    placeholder: String,
    prompt: String,
    char_limit: usize,
    echo_mode: EchoMode,
    inline: bool,
    suggestions: Vec<String>,
    validate: Option<Validator<str>>,
    commit: Option<Commit<String>>,
    keymap: InputKeyMap,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    /// Creates a new input field.
    pub fn new() -> Self {
        Self {
            base: FieldBase::new(),
            value: Vec::new(),
            cursor: 0,
            placeholder: String::new(),
            prompt: "> ".to_string(),
            char_limit: 0,
            echo_mode: EchoMode::Normal,
            inline: false,
            suggestions: Vec::new(),
            validate: None,
            commit: None,
            keymap: InputKeyMap::default(),
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

    /// Sets the prompt string.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
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

    /// Sets the echo mode.
    pub fn echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    /// Sets password mode (shorthand for `echo_mode`).
    pub fn password(self, password: bool) -> Self {
        if password {
            self.echo_mode(EchoMode::Password)
        } else {
            self.echo_mode(EchoMode::Normal)
        }
    }

    /// Sets whether the title and input are on the same line.
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
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

    /// Sets the suggestions offered for completion.
    pub fn suggestions<S: Into<String>>(mut self, suggestions: impl IntoIterator<Item = S>) -> Self {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self.keymap.accept_suggestion.enable(!self.suggestions.is_empty());
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

    /// Returns the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
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

    /// First suggestion that extends the current value.
    fn suggestion(&self) -> Option<&str> {
        if self.value.is_empty() {
            return None;
        }
        let current = self.get_value().to_lowercase();
        self.suggestions
            .iter()
            .find(|s| s.to_lowercase().starts_with(&current) && s.chars().count() > self.value.len())
            .map(String::as_str)
    }

    fn accept_suggestion(&mut self) {
        if let Some(s) = self.suggestion() {
            let s: Vec<char> = s.chars().collect();
            self.value = s;
            if self.char_limit > 0 {
                self.value.truncate(self.char_limit);
            }
            self.cursor = self.value.len();
        }
    }

    fn apply_position(&mut self) {
        let pos = self.base.position;
        self.keymap.prev.enable(!pos.is_first());
        set_last(&mut self.keymap.next, &mut self.keymap.submit, pos.is_last());
    }

    fn display_chars(&self) -> Vec<char> {
        match self.echo_mode {
            EchoMode::Normal => self.value.clone(),
            EchoMode::Password => vec!['•'; self.value.len()],
            EchoMode::None => Vec::new(),
        }
    }

    fn render_value(&self) -> String {
        let styles = self.base.styles();
        let text = &styles.text_input;

        if self.value.is_empty() && !self.placeholder.is_empty() {
            return text.placeholder.render(&self.placeholder);
        }

        let chars = self.display_chars();
        let cursor = self.cursor.min(chars.len());
        let avail = self
            .base
            .width
            .saturating_sub(self.prompt.width() + 2);
        let range = visible_range(&chars, cursor, avail);

        let mut out = String::new();
        let before: String = chars[range.start..cursor].iter().collect();
        out.push_str(&text.text.render(&before));

        if self.base.focused {
            match chars.get(cursor) {
                Some(c) if cursor < range.end => {
                    out.push_str(&text.cursor.render(&c.to_string()));
                    let after: String = chars[cursor + 1..range.end].iter().collect();
                    out.push_str(&text.text.render(&after));
                }
                _ => {
                    if let Some(rest) = self.suggestion().map(|s| s.chars().skip(self.value.len())) {
                        let rest: String = rest.collect();
                        out.push_str(&text.placeholder.render(&rest));
                    } else {
                        out.push_str(&text.cursor.render(" "));
                    }
                }
            }
        } else {
            let after: String = chars[cursor..range.end].iter().collect();
            out.push_str(&text.text.render(&after));
        }
        out
    }
}

/// Range of `chars` that fits in `avail` columns while keeping `cursor` visible.
///
/// An `avail` of zero disables clipping.
pub(crate) fn visible_range(chars: &[char], cursor: usize, avail: usize) -> Range<usize> {
    let width = |c: char| c.width().unwrap_or(0);
    let total: usize = chars.iter().map(|&c| width(c)).sum();
    if avail == 0 || total < avail {
        return 0..chars.len();
    }

    let cursor = cursor.min(chars.len());
    let mut end = cursor;
    let mut used = if let Some(&c) = chars.get(cursor) {
        end += 1;
        width(c)
    } else {
        1
    };
    let mut start = cursor;
    while start > 0 && used + width(chars[start - 1]) <= avail {
        start -= 1;
        used += width(chars[start]);
    }
    while end < chars.len() && used + width(chars[end]) <= avail {
        used += width(chars[end]);
        end += 1;
    }
    start..end
}

impl Field for Input {
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
        if matches_one(key, &self.keymap.accept_suggestion) {
            self.accept_suggestion();
            return None;
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
            KeyType::Home | KeyType::CtrlA => self.cursor = 0,
            KeyType::End => self.cursor = self.value.len(),
            KeyType::CtrlU => {
                self.value = self.value.split_off(self.cursor);
                self.cursor = 0;
            }
            KeyType::CtrlK => self.value.truncate(self.cursor),
            _ => {}
        }

        None
    }

    fn view(&self) -> String {
        let styles = self.base.styles();
        let mut out = if self.inline {
            let mut line = String::new();
            if !self.base.title.is_empty() {
                line.push_str(&styles.title.render(&self.base.title));
                if self.base.error.is_some() {
                    line.push_str(&styles.error_indicator.render(""));
                }
                line.push(' ');
            }
            if !self.base.description.is_empty() {
                line.push_str(&styles.description.render(&self.base.description));
                line.push(' ');
            }
            line
        } else {
            self.base.header()
        };

        out.push_str(&styles.text_input.prompt.render(&self.prompt));
        out.push_str(&self.render_value());
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
            self.keymap.accept_suggestion.clone(),
            self.keymap.next.clone(),
            self.keymap.submit.clone(),
            self.keymap.prev.clone(),
        ]
    }

    fn with_theme(&mut self, theme: &Theme) {
        self.base.inherit_theme(theme);
    }

    fn with_keymap(&mut self, keymap: &KeyMap) {
        let suggest = self.keymap.accept_suggestion.enabled();
        self.keymap = keymap.input.clone();
        self.keymap.accept_suggestion.enable(suggest);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::key::KeyMsg;
    use crate::theme::theme_charm;
    use crate::validate::validate_required;

    fn key(t: KeyType) -> Msg {
        Msg::Key(KeyMsg::from_type(t))
    }

    fn typed(s: &str) -> Msg {
        Msg::Key(KeyMsg::from_str_runes(s))
    }

    fn focused(input: Input) -> Input {
        let mut input = input.theme(theme_charm().plain());
        input.focus();
        input
    }

    #[test]
    fn test_typing_and_editing() {
        let mut input = focused(Input::new());
        input.update(&typed("Glen"));
        assert_eq!(input.get_value(), "Glen");
        input.update(&key(KeyType::Left));
        input.update(&key(KeyType::Backspace));
        assert_eq!(input.get_value(), "Gln");
        assert_eq!(input.cursor(), 2);
        input.update(&key(KeyType::Home));
        input.update(&key(KeyType::Delete));
        assert_eq!(input.get_value(), "ln");
    }

    #[test]
    fn test_unicode_cursor() {
        let mut input = focused(Input::new().value("ñandú"));
        input.update(&key(KeyType::Backspace));
        assert_eq!(input.get_value(), "ñand");
        input.update(&key(KeyType::CtrlU));
        assert_eq!(input.get_value(), "");
    }

    #[test]
    fn test_char_limit() {
        let mut input = focused(Input::new().char_limit(3));
        input.update(&typed("abcdef"));
        assert_eq!(input.get_value(), "abc");
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = Input::new();
        input.update(&typed("x"));
        assert_eq!(input.get_value(), "");
    }

    #[test]
    fn test_enter_validates_before_advancing() {
        let slot = Slot::new(String::new());
        let mut input = focused(Input::new().validate(validate_required("name")).bind(&slot));
        assert!(input.update(&key(KeyType::Enter)).is_none());
        assert_eq!(input.error(), Some("name is required"));

        input.update(&typed("Glen"));
        assert!(input.error().is_none());
        let cmd = input.update(&key(KeyType::Enter)).unwrap();
        assert!(matches!(cmd.execute(), Some(Msg::NextField)));
        assert_eq!(slot.get(), "Glen");
    }

    #[test]
    fn test_confirm_commits_only_valid_values() {
        let slot = Slot::new(String::from("before"));
        let mut input = Input::new()
            .validate(|s: &str| {
                if s.len() > 3 {
                    Err(FormError::validation("too long"))
                } else {
                    Ok(())
                }
            })
            .bind(&slot)
            .value("toolong");
        assert!(input.confirm().is_err());
        assert_eq!(slot.get(), "before");
    }

    #[test]
    fn test_shift_tab_goes_back() {
        let mut input = focused(Input::new());
        let cmd = input.update(&key(KeyType::ShiftTab)).unwrap();
        assert!(matches!(cmd.execute(), Some(Msg::PrevField)));
    }

    #[test]
    fn test_back_disabled_on_first_field() {
        let mut input = focused(Input::new());
        input.with_position(FieldPosition {
            group_count: 1,
            ..FieldPosition::default()
        });
        assert!(input.update(&key(KeyType::ShiftTab)).is_none());
    }

    #[test]
    fn test_password_view() {
        let input = Input::new()
            .theme(theme_charm().plain())
            .password(true)
            .value("secret");
        assert!(input.view().contains("> ••••••"));
        assert!(!input.view().contains("secret"));
    }

    #[test]
    fn test_placeholder_view() {
        let input = Input::new()
            .theme(theme_charm().plain())
            .title("What's your name?")
            .placeholder("Margaret Thatcher");
        assert_eq!(input.view(), "  What's your name?\n  > Margaret Thatcher");
    }

    #[test]
    fn test_suggestion_accept() {
        let mut input = focused(Input::new().suggestions(["Chicken", "Carnitas"]));
        input.update(&typed("car"));
        assert!(input.view().contains("carnitas"));
        input.update(&key(KeyType::CtrlE));
        assert_eq!(input.get_value(), "Carnitas");
    }

    #[test]
    fn test_visible_range_keeps_cursor() {
        let chars: Vec<char> = "abcdefghij".chars().collect();
        assert_eq!(visible_range(&chars, 10, 0), 0..10);
        let r = visible_range(&chars, 10, 5);
        assert_eq!(r.end, 10);
        assert_eq!(r.len(), 4);
        let r = visible_range(&chars, 0, 5);
        assert_eq!(r, 0..5);
    }
}
