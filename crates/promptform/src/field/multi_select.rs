//! Multiple-choice selection list with an optional selection limit.

use tracing::trace;

use super::{advance, retreat, Field, FieldBase, FieldId, FieldPosition, Validator};
use crate::command::Cmd;
use crate::error::Result;
use crate::key::{matches, matches_one, Binding, KeyMsg, KeyType};
use crate::keymap::{set_last, KeyMap, MultiSelectKeyMap};
use crate::message::Msg;
use crate::option::SelectOption;
use crate::slot::{commit_into, Commit, Slot};
use crate::theme::Theme;

/// A multi-select field for choosing several options from a list.
///
/// With a limit set, selecting beyond it is silently refused while
/// deselecting always works.
pub struct MultiSelect<T> {
    base: FieldBase,
    options: Vec<SelectOption<T>>,
    cursor: usize,
    offset: usize,
    height: usize,
    limit: Option<usize>,
    filterable: bool,
    filtering: bool,
    filter: String,
    validate: Option<Validator<[T]>>,
    commit: Option<Commit<Vec<T>>>,
    keymap: MultiSelectKeyMap,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Default for MultiSelect<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> MultiSelect<T> {
    /// Creates a new multi-select field.
    pub fn new() -> Self {
        Self {
            base: FieldBase::new(),
            options: Vec::new(),
            cursor: 0,
            offset: 0,
            height: 0,
            limit: None,
            filterable: false,
            filtering: false,
            filter: String::new(),
            validate: None,
            commit: None,
            keymap: MultiSelectKeyMap::default(),
        }
    }

    /// Sets the options. Preselected options start selected.
    pub fn options(mut self, options: Vec<SelectOption<T>>) -> Self {
        self.options = options;
        self.cursor = 0;
        self.offset = 0;
        self.sync_select_all();
        self
    }

    /// Selects exactly the options whose values are in `values`.
    pub fn value(mut self, values: &[T]) -> Self {
        for opt in &mut self.options {
            opt.selected = values.contains(&opt.value);
        }
        self.sync_select_all();
        self
    }

    /// Seeds the selection from `slot` and writes confirmed values back into it.
    ///
    /// An empty slot keeps the options' own preselection. Call after
    /// [`MultiSelect::options`].
    pub fn bind(self, slot: &Slot<Vec<T>>) -> Self {
        let current = slot.get();
        let mut this = if current.is_empty() {
            self
        } else {
            self.value(&current)
        };
        this.commit = Some(commit_into(slot));
        this
    }

    /// Calls `f` with every confirmed selection.
    pub fn on_commit(mut self, f: impl FnMut(Vec<T>) + Send + Sync + 'static) -> Self {
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

    /// Sets the maximum number of selections. Zero means unlimited.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self.sync_select_all();
        self
    }

    /// Sets whether typing `/` starts filtering.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self.keymap.filter.enable(filterable);
        self
    }

    /// Sets the number of options shown at once. Zero shows all of them.
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Sets the validation rule.
    pub fn validate<F>(mut self, rule: F) -> Self
    where
        F: Fn(&[T]) -> Result<()> + Send + Sync + 'static,
    {
        self.validate = Some(Box::new(rule));
        self
    }

    /// Sets a theme for this field only.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.base.set_theme(theme);
        self
    }

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

    /// Selected values in option order.
    pub fn get_selected_values(&self) -> Vec<T> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect()
    }

    fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.selected).count()
    }

    fn can_select_more(&self) -> bool {
        self.limit.is_none_or(|limit| self.selected_count() < limit)
    }

    fn toggle_current(&mut self) {
        let Some(&i) = self.visible().get(self.cursor) else {
            return;
        };
        if self.options[i].selected {
            self.options[i].selected = false;
        } else if self.can_select_more() {
            self.options[i].selected = true;
        } else {
            trace!(field = %self.base.id, limit = ?self.limit, "selection limit reached");
        }
        self.sync_select_all();
    }

    /// Whether no further option can be selected.
    fn is_full(&self) -> bool {
        let count = self.selected_count();
        count == self.options.len() || !self.can_select_more()
    }

    /// Clears a full selection; otherwise selects options in order up to the limit.
    fn toggle_all(&mut self) {
        if self.is_full() {
            for opt in &mut self.options {
                opt.selected = false;
            }
        } else {
            let mut room = self
                .limit
                .map_or(usize::MAX, |limit| limit.saturating_sub(self.selected_count()));
            for opt in self.options.iter_mut().filter(|o| !o.selected) {
                if room == 0 {
                    break;
                }
                opt.selected = true;
                room -= 1;
            }
        }
        self.sync_select_all();
    }

    fn sync_select_all(&mut self) {
        let has_options = !self.options.is_empty();
        let full = self.is_full();
        self.keymap.select_all.enable(has_options && !full);
        self.keymap.select_none.enable(has_options && full);
    }

    fn ensure_visible(&mut self) {
        if self.height == 0 {
            self.offset = 0;
        } else if self.cursor < self.offset {
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

    fn set_filtering(&mut self, filtering: bool) {
        self.filtering = filtering;
        let km = &mut self.keymap;
        km.filter.enable(self.filterable && !filtering);
        km.set_filter.enable(filtering);
        km.clear_filter.enable(filtering || !self.filter.is_empty());
        km.toggle.enable(!filtering);
        if filtering {
            km.next.enable(false);
            km.submit.enable(false);
            km.prev.enable(false);
        } else {
            self.apply_position();
        }
    }

    fn apply_position(&mut self) {
        let pos = self.base.position;
        self.keymap.prev.enable(!pos.is_first());
        set_last(&mut self.keymap.next, &mut self.keymap.submit, pos.is_last());
    }

    fn update_filtering(&mut self, key: &KeyMsg) {
        if matches_one(key, &self.keymap.clear_filter) {
            self.filter.clear();
            self.cursor = 0;
            self.offset = 0;
            self.set_filtering(false);
            return;
        }
        if matches_one(key, &self.keymap.set_filter) {
            self.set_filtering(false);
            return;
        }
        match key.key_type {
            KeyType::Runes if !key.alt => self.filter.extend(key.runes.iter()),
            KeyType::Space => self.filter.push(' '),
            KeyType::Backspace => {
                self.filter.pop();
            }
            KeyType::Up => {
                self.move_cursor(self.cursor.saturating_sub(1));
                return;
            }
            KeyType::Down => {
                self.move_cursor(self.cursor + 1);
                return;
            }
            _ => return,
        }
        self.cursor = 0;
        self.offset = 0;
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Field for MultiSelect<T> {
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
            self.set_filtering(true);
            return None;
        }
        if matches_one(key, &self.keymap.clear_filter) {
            self.filter.clear();
            self.cursor = 0;
            self.offset = 0;
            self.set_filtering(false);
            return None;
        }
        if matches(key, &[&self.keymap.next, &self.keymap.submit]) {
            return advance(self.confirm());
        }

        if matches_one(key, &self.keymap.toggle) {
            self.toggle_current();
        } else if matches(key, &[&self.keymap.select_all, &self.keymap.select_none]) {
            self.toggle_all();
        } else if matches_one(key, &self.keymap.up) {
            self.move_cursor(self.cursor.saturating_sub(1));
        } else if matches_one(key, &self.keymap.down) {
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
        let mut out = self.base.header();

        if self.filtering || !self.filter.is_empty() {
            out.push_str(&styles.text_input.prompt.render("/"));
            out.push_str(&styles.text_input.text.render(&self.filter));
            if self.filtering {
                out.push_str(&styles.text_input.cursor.render(" "));
            }
            out.push('\n');
        }

        let visible = self.visible();
        if visible.is_empty() {
            out.push_str(&styles.description.render("No matches"));
        } else {
            let end = if self.height == 0 {
                visible.len()
            } else {
                (self.offset + self.height).min(visible.len())
            };
            let lines: Vec<String> = (self.offset..end)
                .map(|pos| {
                    let opt = &self.options[visible[pos]];
                    let selector = if pos == self.cursor {
                        styles.multi_select_selector.render("")
                    } else {
                        "  ".to_string()
                    };
                    let item = if opt.selected {
                        format!(
                            "{}{}",
                            styles.selected_prefix.render(""),
                            styles.selected_option.render(&opt.key)
                        )
                    } else {
                        format!(
                            "{}{}",
                            styles.unselected_prefix.render(""),
                            styles.unselected_option.render(&opt.key)
                        )
                    };
                    format!("{selector}{item}")
                })
                .collect();
            out.push_str(&lines.join("\n"));
        }

        self.base.frame(out)
    }

    fn validate(&mut self) -> Result<()> {
        let values = self.get_selected_values();
        let result = self.validate.as_ref().map_or(Ok(()), |rule| rule(&values));
        self.base.record(result)
    }

    fn confirm(&mut self) -> Result<()> {
        self.validate()?;
        let values = self.get_selected_values();
        if let Some(commit) = self.commit.as_mut() {
            commit(values);
        }
        Ok(())
    }

    fn focus(&mut self) -> Option<Cmd> {
        self.base.focused = true;
        None
    }

    fn blur(&mut self) -> Option<Cmd> {
        self.base.focused = false;
        if self.filtering {
            self.set_filtering(false);
        }
        None
    }

    fn is_focused(&self) -> bool {
        self.base.focused
    }

    fn key_binds(&self) -> Vec<Binding> {
        vec![
            self.keymap.toggle.clone(),
            self.keymap.up.clone(),
            self.keymap.down.clone(),
            self.keymap.filter.clone(),
            self.keymap.set_filter.clone(),
            self.keymap.clear_filter.clone(),
            self.keymap.select_all.clone(),
            self.keymap.select_none.clone(),
            self.keymap.next.clone(),
            self.keymap.submit.clone(),
            self.keymap.prev.clone(),
        ]
    }

    fn with_theme(&mut self, theme: &Theme) {
        self.base.inherit_theme(theme);
    }

    fn with_keymap(&mut self, keymap: &KeyMap) {
        self.keymap = keymap.multi_select.clone();
        self.keymap.filter.enable(self.filterable);
        self.sync_select_all();
        self.apply_position();
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
        self.apply_position();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::help::short_view;
    use crate::option::new_options;
    use crate::theme::theme_charm;
    use crate::validate::validate_not_empty;

    fn key(t: KeyType) -> Msg {
        Msg::Key(KeyMsg::from_type(t))
    }

    fn ch(c: char) -> Msg {
        Msg::Key(KeyMsg::from_char(c))
    }

    fn toppings() -> MultiSelect<String> {
        let mut m = MultiSelect::new()
            .title("Toppings")
            .options(vec![
                SelectOption::new("Lettuce", "Lettuce".to_string()).selected(true),
                SelectOption::new("Tomatoes", "Tomatoes".to_string()).selected(true),
                SelectOption::new("Corn", "Corn".to_string()),
                SelectOption::new("Salsa", "Salsa".to_string()),
                SelectOption::new("Sour Cream", "Sour Cream".to_string()),
                SelectOption::new("Cheese", "Cheese".to_string()),
            ])
            .limit(4)
            .theme(theme_charm().plain());
        m.focus();
        m
    }

    #[test]
    fn test_preselected_render() {
        let mut m = toppings();
        let view = m.view();
        assert!(view.contains("> ✓ Lettuce"));
        assert!(view.contains("  ✓ Tomatoes"));
        m.update(&key(KeyType::Down));
        m.update(&key(KeyType::Down));
        assert!(m.view().contains("> • Corn"));
    }

    #[test]
    fn test_limit_refuses_new_selection() {
        let mut m = toppings();
        for _ in 0..2 {
            m.update(&key(KeyType::Down));
        }
        m.update(&ch('x'));
        m.update(&key(KeyType::Down));
        m.update(&ch('x'));
        assert_eq!(m.get_selected_values().len(), 4);

        m.update(&key(KeyType::Down));
        m.update(&ch('x'));
        assert_eq!(m.get_selected_values().len(), 4);
        assert!(m.error().is_none());

        m.update(&ch('g'));
        m.update(&ch('x'));
        assert_eq!(
            m.get_selected_values(),
            vec!["Tomatoes".to_string(), "Corn".to_string(), "Salsa".to_string()]
        );
    }

    #[test]
    fn test_space_toggles() {
        let mut m = toppings();
        m.update(&key(KeyType::Space));
        assert_eq!(m.get_selected_values(), vec!["Tomatoes".to_string()]);
    }

    #[test]
    fn test_confirm_commits_in_option_order() {
        let slot = Slot::new(Vec::new());
        let mut m = toppings().bind(&slot);
        m.update(&ch('G'));
        m.update(&ch('x'));
        let cmd = m.update(&key(KeyType::Enter)).unwrap();
        assert!(matches!(cmd.execute(), Some(Msg::NextField)));
        assert_eq!(slot.get(), vec!["Lettuce", "Tomatoes", "Cheese"]);
    }

    #[test]
    fn test_bind_seeds_selection() {
        let slot = Slot::new(vec!["Corn".to_string()]);
        let m = toppings().bind(&slot);
        assert_eq!(m.get_selected_values(), vec!["Corn".to_string()]);
    }

    #[test]
    fn test_select_all_without_limit() {
        let mut m = MultiSelect::new().options(new_options(["a", "b", "c"]));
        m.focus();
        m.update(&key(KeyType::CtrlA));
        assert_eq!(m.get_selected_values().len(), 3);
        m.update(&key(KeyType::CtrlA));
        assert!(m.get_selected_values().is_empty());
    }

    #[test]
    fn test_select_all_stops_at_limit() {
        let mut m = toppings();
        m.update(&key(KeyType::CtrlA));
        assert_eq!(
            m.get_selected_values(),
            vec!["Lettuce", "Tomatoes", "Corn", "Salsa"]
        );
        m.update(&key(KeyType::CtrlA));
        assert!(m.get_selected_values().is_empty());
        m.update(&key(KeyType::CtrlA));
        assert_eq!(m.get_selected_values().len(), 4);
    }

    #[test]
    fn test_not_empty_rule() {
        let mut m = MultiSelect::new()
            .options(new_options(["a", "b"]))
            .validate(validate_not_empty::<String>());
        m.focus();
        assert!(m.update(&key(KeyType::Enter)).is_none());
        assert_eq!(m.error(), Some("select at least one option"));
    }

    #[test]
    fn test_filtering() {
        let mut m = toppings().filterable(true);
        m.update(&ch('/'));
        m.update(&ch('s'));
        assert_eq!(
            m.visible_options(),
            vec!["Tomatoes", "Salsa", "Sour Cream", "Cheese"]
        );
        m.update(&key(KeyType::Enter));
        m.update(&key(KeyType::Down));
        m.update(&ch('x'));
        assert!(m.get_selected_values().contains(&"Salsa".to_string()));
        m.update(&key(KeyType::Esc));
        assert_eq!(m.visible_options().len(), 6);
        assert_eq!(m.cursor(), 0);
    }

    #[test]
    fn test_help_line() {
        let m = toppings();
        let help = short_view(&m.key_binds(), &theme_charm().plain().help);
        assert_eq!(
            help,
            "x toggle • ↑ up • ↓ down • ctrl+a select all • enter confirm • shift+tab back"
        );
    }
}
