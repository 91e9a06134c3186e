//! Single-choice selection list with filtering.

use tracing::trace;

use super::{advance, retreat, Field, FieldBase, FieldId, FieldPosition, Validator};
use crate::command::Cmd;
use crate::error::{FormError, Result};
use crate::key::{matches, matches_one, Binding, KeyMsg, KeyType};
use crate::keymap::{set_last, KeyMap, SelectKeyMap};
use crate::message::Msg;
use crate::option::SelectOption;
use crate::slot::{commit_into, Commit, Slot};
use crate::theme::Theme;

/// A select field for choosing one option from a list.
///
/// The cursor indexes the *visible* options: while a filter is applied only
/// options whose label contains the filter text are shown and selectable.
pub struct Select<T> {
    base: FieldBase,
    options: Vec<SelectOption<T>>,
    cursor: usize,
    offset: usize,
    height: usize,
    inline: bool,
    filterable: bool,
    filtering: bool,
    filter: String,
    validate: Option<Validator<T>>,
    commit: Option<Commit<T>>,
    keymap: SelectKeyMap,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Default for Select<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Select<T> {
    /// Creates a new select field.
    pub fn new() -> Self {
        Self {
            base: FieldBase::new(),
            options: Vec::new(),
            cursor: 0,
            offset: 0,
            height: 0,
            inline: false,
            filterable: true,
            filtering: false,
            filter: String::new(),
            validate: None,
            commit: None,
            keymap: SelectKeyMap::default(),
        }
    }

    /// Sets the options. The first preselected option gets the cursor.
    pub fn options(mut self, options: Vec<SelectOption<T>>) -> Self {
        self.cursor = options.iter().position(|o| o.selected).unwrap_or(0);
        self.options = options;
        self.offset = 0;
        self.ensure_visible();
        self
    }

    /// Moves the cursor to the option holding `value`, if any.
    pub fn value(mut self, value: &T) -> Self {
        if let Some(i) = self.options.iter().position(|o| &o.value == value) {
            self.cursor = i;
            self.ensure_visible();
        }
        self
    }

    /// Seeds the cursor from `slot` and writes confirmed values back into it.
    ///
    /// Call after [`Select::options`].
    pub fn bind(self, slot: &Slot<T>) -> Self {
        let current = slot.get();
        let mut this = self.value(&current);
        this.commit = Some(commit_into(slot));
        this
    }

    /// Calls `f` with every confirmed value.
    pub fn on_commit(mut self, f: impl FnMut(T) + Send + Sync + 'static) -> Self {
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

    /// Sets whether options display on one line.
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self.keymap.left.enable(inline);
        self.keymap.right.enable(inline);
        self
    }

    /// Sets whether typing `/` starts filtering.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self.sync_keymap();
        self
    }

    /// Sets the number of options shown at once. Zero shows all of them.
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self.ensure_visible();
        self
    }

    /// Sets the validation rule.
    pub fn validate<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        self.validate = Some(Box::new(rule));
        self
    }

    /// Sets a theme for this field only.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.base.set_theme(theme);
        self
    }

    /// Indexes into `options` of the options that match the filter.
    fn visible(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.matches(&self.filter))
            .map(|(i, _)| i)
            .collect()
    }

    /// Labels of the options currently shown, in order.
    pub fn visible_options(&self) -> Vec<&str> {
        self.visible()
            .into_iter()
            .map(|i| self.options[i].key.as_str())
            .collect()
    }

    /// Position of the cursor in the visible list.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The option under the cursor.
    pub fn get_selected_value(&self) -> Option<&T> {
        self.visible()
            .get(self.cursor)
            .map(|&i| &self.options[i].value)
    }

    /// The current filter text.
    pub fn filter_value(&self) -> &str {
        &self.filter
    }

    /// Whether the filter prompt is accepting input.
    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    fn ensure_visible(&mut self) {
        if self.height == 0 {
            self.offset = 0;
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
    }

    fn move_cursor(&mut self, to: usize) {
        let last = self.visible().len().saturating_sub(1);
        self.cursor = to.min(last);
        self.ensure_visible();
    }

    fn page(&self) -> usize {
        let h = if self.height == 0 {
            self.options.len()
        } else {
            self.height
        };
        (h / 2).max(1)
    }

    fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.cursor = 0;
        self.offset = 0;
    }

    fn clear_filter(&mut self) {
        self.filtering = false;
        self.set_filter(String::new());
        self.sync_keymap();
    }

    fn sync_keymap(&mut self) {
        let km = &mut self.keymap;
        km.filter.enable(self.filterable && !self.filtering);
        km.set_filter.enable(self.filtering);
        km.clear_filter.enable(self.filtering || !self.filter.is_empty());
        let pos = self.base.position;
        if self.filtering {
            km.next.enable(false);
            km.submit.enable(false);
            km.prev.enable(false);
        } else {
            km.prev.enable(!pos.is_first());
            set_last(&mut km.next, &mut km.submit, pos.is_last());
        }
    }

    fn update_filtering(&mut self, key: &KeyMsg) {
        if matches_one(key, &self.keymap.clear_filter) {
            self.clear_filter();
            return;
        }
        if matches_one(key, &self.keymap.set_filter) {
            self.filtering = false;
            self.sync_keymap();
            return;
        }
        match key.key_type {
            KeyType::Runes if !key.alt => {
                let mut filter = self.filter.clone();
                filter.extend(key.runes.iter());
                self.set_filter(filter);
            }
            KeyType::Space => {
                let filter = format!("{} ", self.filter);
                self.set_filter(filter);
            }
            KeyType::Backspace => {
                let mut filter = self.filter.clone();
                filter.pop();
                self.set_filter(filter);
            }
            KeyType::Up => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyType::Down => self.move_cursor(self.cursor + 1),
            _ => {}
        }
        trace!(field = %self.base.id, filter = %self.filter, "filter changed");
    }

    fn render_list(&self, out: &mut String) {
        let styles = self.base.styles();
        let visible = self.visible();
        if visible.is_empty() {
            out.push_str(&styles.description.render("No matches"));
            return;
        }
        let end = if self.height == 0 {
            visible.len()
        } else {
            (self.offset + self.height).min(visible.len())
        };
        let lines: Vec<String> = (self.offset..end)
            .map(|pos| {
                let label = &self.options[visible[pos]].key;
                if pos == self.cursor {
                    format!(
                        "{}{}",
                        styles.select_selector.render(""),
                        styles.selected_option.render(label)
                    )
                } else {
                    format!("  {}", styles.option.render(label))
                }
            })
            .collect();
        out.push_str(&lines.join("\n"));
    }

    fn render_inline(&self, out: &mut String) {
        let styles = self.base.styles();
        let visible = self.visible();
        out.push_str(&styles.prev_indicator.render(""));
        match visible.get(self.cursor) {
            Some(&i) => out.push_str(&styles.selected_option.render(&self.options[i].key)),
            None => out.push_str(&styles.description.render("No matches")),
        }
        out.push_str(&styles.next_indicator.render(""));
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Field for Select<T> {
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

        if self.filtering {
            self.update_filtering(key);
            return None;
        }

        if matches_one(key, &self.keymap.prev) {
            return retreat();
        }
        if matches_one(key, &self.keymap.filter) {
            self.filtering = true;
            self.sync_keymap();
            return None;
        }
        if matches_one(key, &self.keymap.clear_filter) {
            self.clear_filter();
            return None;
        }
        if matches(key, &[&self.keymap.next, &self.keymap.submit]) {
            return advance(self.confirm());
        }

        if matches(key, &[&self.keymap.up, &self.keymap.left]) {
            self.move_cursor(self.cursor.saturating_sub(1));
        } else if matches(key, &[&self.keymap.down, &self.keymap.right]) {
            self.move_cursor(self.cursor + 1);
        } else if matches_one(key, &self.keymap.goto_top) {
            self.move_cursor(0);
        } else if matches_one(key, &self.keymap.goto_bottom) {
            self.move_cursor(usize::MAX);
        } else if matches_one(key, &self.keymap.half_page_up) {
            self.move_cursor(self.cursor.saturating_sub(self.page()));
        } else if matches_one(key, &self.keymap.half_page_down) {
            self.move_cursor(self.cursor + self.page());
        }

        None
    }

    fn view(&self) -> String {
        let styles = self.base.styles();
        let mut out;
        if self.inline {
            out = String::new();
            if !self.base.title.is_empty() {
                out.push_str(&styles.title.render(&self.base.title));
                if self.base.error.is_some() {
                    out.push_str(&styles.error_indicator.render(""));
                }
                out.push(' ');
            }
            self.render_inline(&mut out);
        } else {
            out = self.base.header();
            if self.filtering || !self.filter.is_empty() {
                out.push_str(&styles.text_input.prompt.render("/"));
                out.push_str(&styles.text_input.text.render(&self.filter));
                if self.filtering {
                    out.push_str(&styles.text_input.cursor.render(" "));
                }
                out.push('\n');
            }
            self.render_list(&mut out);
        }
        self.base.frame(out)
    }

    fn validate(&mut self) -> Result<()> {
        let result = match self.get_selected_value() {
            None => Err(FormError::validation("no option selected")),
            Some(value) => self.validate.as_ref().map_or(Ok(()), |rule| rule(value)),
        };
        self.base.record(result)
    }

    fn confirm(&mut self) -> Result<()> {
        self.validate()?;
        let value = self.get_selected_value().cloned();
        if let (Some(commit), Some(value)) = (self.commit.as_mut(), value) {
            commit(value);
        }
        Ok(())
    }

    fn focus(&mut self) -> Option<Cmd> {
        self.base.focused = true;
        None
    }

    fn blur(&mut self) -> Option<Cmd> {
        self.base.focused = false;
        self.filtering = false;
        self.sync_keymap();
        None
    }

    fn is_focused(&self) -> bool {
        self.base.focused
    }

    fn key_binds(&self) -> Vec<Binding> {
        vec![
            self.keymap.up.clone(),
            self.keymap.down.clone(),
            self.keymap.left.clone(),
            self.keymap.right.clone(),
            self.keymap.filter.clone(),
            self.keymap.set_filter.clone(),
            self.keymap.clear_filter.clone(),
            self.keymap.next.clone(),
            self.keymap.submit.clone(),
            self.keymap.prev.clone(),
        ]
    }

    fn with_theme(&mut self, theme: &Theme) {
        self.base.inherit_theme(theme);
    }

    fn with_keymap(&mut self, keymap: &KeyMap) {
        self.keymap = keymap.select.clone();
        self.keymap.left.enable(self.inline);
        self.keymap.right.enable(self.inline);
        self.sync_keymap();
    }

    fn with_width(&mut self, width: usize) {
        self.base.width = width;
    }

    fn with_height(&mut self, height: usize) {
        self.height = height;
        self.ensure_visible();
    }

    fn with_position(&mut self, position: FieldPosition) {
        self.base.position = position;
        self.sync_keymap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::help::short_view;
    use crate::option::new_options;
    use crate::theme::theme_charm;
    use crate::validate::validate_not_one_of;

    fn key(t: KeyType) -> Msg {
        Msg::Key(KeyMsg::from_type(t))
    }

    fn ch(c: char) -> Msg {
        Msg::Key(KeyMsg::from_char(c))
    }

    fn fillings() -> Select<String> {
        let mut s = Select::new()
            .title("Filling?")
            .options(new_options(["Chicken", "Beef", "Fish", "Black Bean", "Pinto Bean"]))
            .theme(theme_charm().plain());
        s.focus();
        s
    }

    #[test]
    fn test_cursor_stops_at_bounds() {
        let mut s = fillings();
        s.update(&key(KeyType::Up));
        assert_eq!(s.cursor(), 0);
        for _ in 0..10 {
            s.update(&key(KeyType::Down));
        }
        assert_eq!(s.cursor(), 4);
        s.update(&ch('g'));
        assert_eq!(s.cursor(), 0);
        s.update(&ch('G'));
        assert_eq!(s.get_selected_value().map(String::as_str), Some("Pinto Bean"));
    }

    #[test]
    fn test_preselected_option() {
        let s = Select::new().options(vec![
            SelectOption::new("Soft", 1),
            SelectOption::new("Hard", 2).selected(true),
        ]);
        assert_eq!(s.get_selected_value(), Some(&2));
    }

    #[test]
    fn test_filter_narrows_and_resets_cursor() {
        let mut s = fillings();
        s.update(&key(KeyType::Down));
        s.update(&ch('/'));
        assert!(s.is_filtering());
        for c in "bean".chars() {
            s.update(&ch(c));
        }
        assert_eq!(s.visible_options(), vec!["Black Bean", "Pinto Bean"]);
        assert_eq!(s.cursor(), 0);

        s.update(&key(KeyType::Down));
        assert_eq!(s.get_selected_value().map(String::as_str), Some("Pinto Bean"));

        s.update(&key(KeyType::Backspace));
        assert_eq!(s.filter_value(), "bea");
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_clear_filter_restores_list() {
        let mut s = fillings();
        s.update(&ch('/'));
        s.update(&ch('f'));
        s.update(&ch('i'));
        assert_eq!(s.visible_options(), vec!["Fish"]);
        s.update(&key(KeyType::Esc));
        assert!(!s.is_filtering());
        assert_eq!(s.visible_options().len(), 5);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_applied_filter_then_confirm() {
        let slot = Slot::new(String::new());
        let mut s = fillings().bind(&slot);
        s.update(&ch('/'));
        s.update(&ch('p'));
        s.update(&ch('i'));
        s.update(&key(KeyType::Enter));
        assert!(!s.is_filtering());
        assert_eq!(s.filter_value(), "pi");

        let cmd = s.update(&key(KeyType::Enter)).unwrap();
        assert!(matches!(cmd.execute(), Some(Msg::NextField)));
        assert_eq!(slot.get(), "Pinto Bean");
    }

    #[test]
    fn test_no_match_cannot_confirm() {
        let mut s = fillings();
        s.update(&ch('/'));
        s.update(&ch('z'));
        s.update(&key(KeyType::Enter));
        assert!(s.visible_options().is_empty());
        assert!(s.update(&key(KeyType::Enter)).is_none());
        assert_eq!(s.error(), Some("no option selected"));
        assert!(s.view().contains("No matches"));
    }

    #[test]
    fn test_validation_error_blocks_commit() {
        let slot = Slot::new(String::new());
        let mut s = Select::new()
            .title("Shell?")
            .options(new_options(["Soft", "Hard"]))
            .validate(|t: &String| {
                if t == "Hard" {
                    Err(FormError::validation("we're out of hard shells, sorry"))
                } else {
                    Ok(())
                }
            })
            .bind(&slot)
            .theme(theme_charm().plain());
        s.focus();
        s.update(&key(KeyType::Down));
        assert!(s.update(&key(KeyType::Enter)).is_none());
        assert_eq!(slot.get(), "");
        let view = s.view();
        assert!(view.contains("┃ > Hard"));
        assert!(view.contains("* we're out of hard shells, sorry"));
    }

    #[test]
    fn test_stock_rule() {
        let mut s = fillings().validate(validate_not_one_of(vec!["Chicken".to_string()]));
        assert!(s.confirm().is_err());
        assert_eq!(s.error(), Some("Chicken is not available"));
    }

    #[test]
    fn test_view_marks_cursor() {
        let s = fillings();
        let view = s.view();
        assert!(view.contains("┃ Filling?"));
        assert!(view.contains("┃ > Chicken"));
        assert!(view.contains("┃   Beef"));
    }

    #[test]
    fn test_height_scrolls() {
        let mut s = fillings().height(2);
        assert!(!s.view().contains("Fish"));
        s.update(&key(KeyType::Down));
        s.update(&key(KeyType::Down));
        let view = s.view();
        assert!(view.contains("> Fish"));
        assert!(!view.contains("Chicken"));
    }

    #[test]
    fn test_help_line() {
        let s = fillings();
        let help = short_view(&s.key_binds(), &theme_charm().plain().help);
        assert_eq!(
            help,
            "↑ up • ↓ down • / filter • enter select • shift+tab back"
        );
    }

    #[test]
    fn test_inline_navigation() {
        let mut s = Select::new()
            .title("Size")
            .inline(true)
            .options(new_options(["S", "M", "L"]))
            .theme(theme_charm().plain());
        s.focus();
        s.update(&key(KeyType::Right));
        assert_eq!(s.get_selected_value().map(String::as_str), Some("M"));
        assert!(s.view().contains("Size ← M →"));
    }
}
