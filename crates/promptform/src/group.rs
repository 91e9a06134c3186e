//! Groups of fields shown together as one screen.

use tracing::trace;

use crate::command::{sequence, Cmd};
use crate::editor::EditorConfig;
use crate::error::Result;
use crate::field::{Field, FieldId};
use crate::keymap::KeyMap;
use crate::message::Msg;
use crate::runtime::Model;
use crate::theme::{theme_charm, Theme};

type HideFunc = Box<dyn Fn() -> bool + Send + Sync>;

/// A group of fields displayed together.
///
/// Fields are shown and visited in insertion order. Navigation passes over
/// fields that report [`Field::skip`].
pub struct Group {
    fields: Vec<Box<dyn Field>>,
    cursor: usize,
    title: String,
    description: String,
    theme: Theme,
    hide: bool,
    hide_func: Option<HideFunc>,
}

impl Default for Group {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Group {
    /// Creates a new group with the given fields.
    pub fn new(fields: Vec<Box<dyn Field>>) -> Self {
        Self {
            fields,
            cursor: 0,
            title: String::new(),
            description: String::new(),
            theme: theme_charm(),
            hide: false,
            hide_func: None,
        }
    }

    /// Sets the group title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the group description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets whether the group is hidden.
    ///
    /// Ignored once a [`Group::hide_func`] is set.
    pub fn hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    /// Sets a predicate deciding, each time the group is considered, whether
    /// it is hidden.
    pub fn hide_func<F>(mut self, f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.hide_func = Some(Box::new(f));
        self
    }

    /// Returns whether this group is hidden right now.
    pub fn is_hidden(&self) -> bool {
        match &self.hide_func {
            Some(f) => f(),
            None => self.hide,
        }
    }

    /// Returns the fields.
    pub fn fields(&self) -> &[Box<dyn Field>] {
        &self.fields
    }

    /// Returns the field at `index`.
    pub fn field(&self, index: usize) -> Option<&dyn Field> {
        self.fields.get(index).map(|f| f.as_ref())
    }

    /// Returns the current field index.
    pub fn current(&self) -> usize {
        self.cursor
    }

    /// Returns the current field.
    pub fn current_field(&self) -> Option<&dyn Field> {
        self.field(self.cursor)
    }

    /// Returns a mutable reference to the current field.
    pub fn current_field_mut(&mut self) -> Option<&mut Box<dyn Field>> {
        self.fields.get_mut(self.cursor)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the group has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Collects all field errors.
    pub fn errors(&self) -> Vec<&str> {
        self.fields.iter().filter_map(|f| f.error()).collect()
    }

    /// Moves focus to the next interactive field.
    ///
    /// Returns `false`, leaving focus where it is, when there is none.
    pub fn next_field(&mut self) -> bool {
        match self.next_index() {
            Some(index) => {
                let _ = self.focus_at(index);
                true
            }
            None => false,
        }
    }

    /// Moves focus to the previous interactive field.
    ///
    /// Returns `false`, leaving focus where it is, when there is none.
    pub fn prev_field(&mut self) -> bool {
        match self.prev_index() {
            Some(index) => {
                let _ = self.focus_at(index);
                true
            }
            None => false,
        }
    }

    /// Validates the current field.
    pub fn validate_active(&mut self) -> Result<()> {
        match self.fields.get_mut(self.cursor) {
            Some(field) => field.validate(),
            None => Ok(()),
        }
    }

    fn next_index(&self) -> Option<usize> {
        (self.cursor + 1..self.fields.len()).find(|&i| !self.fields[i].skip())
    }

    fn prev_index(&self) -> Option<usize> {
        (0..self.cursor.min(self.fields.len())).rev().find(|&i| !self.fields[i].skip())
    }

    /// First field that takes part in navigation.
    pub(crate) fn first_interactive(&self) -> Option<usize> {
        self.fields.iter().position(|f| !f.skip())
    }

    /// Last field that takes part in navigation.
    pub(crate) fn last_interactive(&self) -> Option<usize> {
        self.fields.iter().rposition(|f| !f.skip())
    }

    fn focus_at(&mut self, index: usize) -> Option<Cmd> {
        if let Some(field) = self.fields.get_mut(self.cursor) {
            let _ = field.blur();
        }
        self.cursor = index;
        trace!(index, "field focused");
        self.fields.get_mut(index).and_then(|f| f.focus())
    }

    /// Focuses the first interactive field, or the first field when every
    /// field is skipped.
    pub(crate) fn focus_first(&mut self) -> Option<Cmd> {
        let index = self.first_interactive().unwrap_or(0);
        self.focus_at(index)
    }

    /// Focuses the last interactive field, or the first field when every
    /// field is skipped.
    pub(crate) fn focus_last(&mut self) -> Option<Cmd> {
        let index = self.last_interactive().unwrap_or(0);
        self.focus_at(index)
    }

    /// Blurs the current field.
    pub(crate) fn blur_current(&mut self) {
        if let Some(field) = self.fields.get_mut(self.cursor) {
            let _ = field.blur();
        }
    }

    pub(crate) fn find_field_mut(&mut self, id: FieldId) -> Option<&mut Box<dyn Field>> {
        self.fields.iter_mut().find(|f| f.id() == id)
    }

    pub(crate) fn fields_mut(&mut self) -> &mut [Box<dyn Field>] {
        &mut self.fields
    }

    /// Pushes form-wide settings into the group and its fields.
    pub(crate) fn configure(
        &mut self,
        theme: &Theme,
        keymap: &KeyMap,
        editor: &EditorConfig,
        width: usize,
        height: Option<usize>,
    ) {
        self.theme = theme.clone();
        for field in &mut self.fields {
            field.with_theme(theme);
            field.with_keymap(keymap);
            field.with_editor(editor);
            field.with_width(width);
            if let Some(height) = height {
                field.with_height(height);
            }
        }
    }

    pub(crate) fn set_width(&mut self, width: usize) {
        for field in &mut self.fields {
            field.with_width(width);
        }
    }
}

impl Model for Group {
    fn init(&mut self) -> Option<Cmd> {
        let cmds = self.fields.iter_mut().map(|f| f.init()).collect();
        sequence(cmds)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        match msg {
            Msg::NextField => match self.next_index() {
                Some(index) => self.focus_at(index),
                None => sequence(vec![
                    Some(Cmd::msg(Msg::NextGroup)),
                    Some(Cmd::msg(Msg::UpdatePositions)),
                ]),
            },
            Msg::PrevField => match self.prev_index() {
                Some(index) => self.focus_at(index),
                None => Some(Cmd::msg(Msg::PrevGroup)),
            },
            msg => self
                .fields
                .get_mut(self.cursor)
                .and_then(|field| field.update(&msg)),
        }
    }

    fn view(&self) -> String {
        let theme = &self.theme;
        let mut output = String::new();

        if !self.title.is_empty() {
            output.push_str(&theme.group.title.render(&self.title));
            output.push('\n');
        }
        if !self.description.is_empty() {
            output.push_str(&theme.group.description.render(&self.description));
            output.push('\n');
        }

        let separator = theme.field_separator.render("");
        let views: Vec<String> = self.fields.iter().map(|f| f.view()).collect();
        output.push_str(&views.join(&separator));

        theme.group.base.render(&output)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::field::{Confirm, Input, Note};
    use crate::key::{KeyMsg, KeyType};

    fn group() -> Group {
        let mut g = Group::new(vec![
            Box::new(Input::new().title("Name")),
            Box::new(Note::new().title("Skipped")),
            Box::new(Input::new().title("Email")),
            Box::new(Confirm::new().title("OK?")),
        ]);
        let _ = g.focus_first();
        g
    }

    fn run(cmd: Option<Cmd>) -> Vec<String> {
        let mut out = Vec::new();
        let mut pending: Vec<Cmd> = cmd.into_iter().collect();
        while let Some(cmd) = pending.pop() {
            match cmd.execute() {
                Some(Msg::Sequence(cmds)) => pending.extend(cmds.into_iter().rev()),
                Some(msg) => out.push(format!("{msg:?}")),
                None => {}
            }
        }
        out
    }

    #[test]
    fn test_exactly_one_field_focused() {
        let mut g = group();
        assert!(g.next_field());
        let focused: Vec<_> = g.fields().iter().map(|f| f.is_focused()).collect();
        assert_eq!(focused, vec![false, false, true, false]);
    }

    #[test]
    fn test_navigation_skips_non_interactive() {
        let mut g = group();
        assert!(g.next_field());
        assert_eq!(g.current(), 2);
        assert!(g.prev_field());
        assert_eq!(g.current(), 0);
        assert!(!g.prev_field());
        assert_eq!(g.current(), 0);
    }

    #[test]
    fn test_boundary_requests_group_transition() {
        let mut g = group();
        let _ = g.focus_last();
        assert_eq!(g.current(), 3);
        assert_eq!(run(g.update(Msg::NextField)), vec!["NextGroup", "UpdatePositions"]);
        assert_eq!(g.current(), 3);

        let _ = g.focus_first();
        assert_eq!(run(g.update(Msg::PrevField)), vec!["PrevGroup"]);
    }

    #[test]
    fn test_keys_reach_current_field() {
        let mut g = Group::new(vec![Box::new(
            Input::new().title("Name").theme(theme_charm().plain()),
        )]);
        let _ = g.focus_first();
        let _ = g.update(Msg::Key(KeyMsg::from_char('q')));
        assert!(g.fields()[0].view().contains("> q"));
        let cmd = g.update(Msg::Key(KeyMsg::from_type(KeyType::Enter)));
        assert_eq!(run(cmd), vec!["NextField"]);
    }

    #[test]
    fn test_note_only_group_focuses_first() {
        let mut g = Group::new(vec![Box::new(Note::new().title("Hi"))]);
        let _ = g.focus_first();
        assert_eq!(g.current(), 0);
        assert!(g.fields()[0].is_focused());
        assert!(!g.next_field());
    }

    #[test]
    fn test_hide_func_is_authoritative() {
        assert!(Group::default().hide(true).is_hidden());
        assert!(!Group::default().hide(true).hide_func(|| false).is_hidden());
        assert!(!Group::default().hide_func(|| false).hide(true).is_hidden());
        assert!(Group::default().hide(false).hide_func(|| true).is_hidden());
    }

    #[test]
    fn test_hide_func_reevaluated() {
        let flag = Arc::new(AtomicBool::new(true));
        let probe = Arc::clone(&flag);
        let g = Group::default().hide_func(move || probe.load(Ordering::SeqCst));
        assert!(g.is_hidden());
        flag.store(false, Ordering::SeqCst);
        assert!(!g.is_hidden());
    }

    #[test]
    fn test_view_separates_fields() {
        let theme = theme_charm().plain();
        let mut g = Group::new(vec![
            Box::new(Note::new().title("A")),
            Box::new(Note::new().title("B")),
        ])
        .title("Order");
        g.configure(&theme, &KeyMap::default(), &EditorConfig::default(), 80, None);
        // Note titles carry a bottom margin.
        assert_eq!(g.view(), "Order\n  A\n  \n\n  B\n  ");
    }
}
