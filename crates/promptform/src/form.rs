//! The form: an ordered sequence of groups and the transitions between them.

use tracing::{debug, trace};

use crate::command::{quit, sequence, Cmd};
use crate::editor::EditorConfig;
use crate::error::{FormError, Result};
use crate::field::{FieldId, FieldPosition};
use crate::group::Group;
use crate::help::short_view;
use crate::key::matches_one;
use crate::keymap::KeyMap;
use crate::message::Msg;
use crate::runtime::Model;
use crate::theme::{theme_charm, Theme};

/// The current state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// User is completing the form.
    #[default]
    Normal,
    /// User has completed the form.
    Completed,
    /// User has aborted the form.
    Aborted,
}

/// A form containing multiple groups of fields.
///
/// Only one group is shown at a time. Confirming the last interactive field
/// of a group moves on to the next visible group; confirming the last one
/// completes the form. Hidden groups are skipped in both directions, and
/// visibility is re-evaluated every time a group is considered.
///
/// # Example
///
/// ```rust
/// use promptform::{Form, FormState, Group, Input, Runtime, Slot};
/// use promptform::{KeyMsg, KeyType};
///
/// let name = Slot::new(String::new());
/// let form = Form::new(vec![Group::new(vec![Box::new(
///     Input::new().title("Name").bind(&name),
/// )])]);
///
/// let mut rt = Runtime::new(form);
/// rt.init().unwrap();
/// for c in "Ada".chars() {
///     rt.send(KeyMsg::from_char(c));
/// }
/// rt.send(KeyMsg::from_type(KeyType::Enter));
/// rt.run_until_idle().unwrap();
///
/// assert_eq!(rt.model().state(), FormState::Completed);
/// assert_eq!(name.get(), "Ada");
/// ```
pub struct Form {
    groups: Vec<Group>,
    cursor: usize,
    state: FormState,
    theme: Theme,
    keymap: KeyMap,
    editor: EditorConfig,
    width: usize,
    fixed_width: bool,
    height: Option<usize>,
    show_help: bool,
    initialized: bool,
    editing: Option<FieldId>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Form {
    /// Creates a new form with the given groups.
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups,
            cursor: 0,
            state: FormState::Normal,
            theme: theme_charm(),
            keymap: KeyMap::default(),
            editor: EditorConfig::default(),
            width: 80,
            fixed_width: false,
            height: None,
            show_help: true,
            initialized: false,
            editing: None,
        }
    }

    /// Sets the theme for every field that has none of its own.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the keymap.
    pub fn keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Sets the external editor used by text areas.
    pub fn editor(mut self, editor: EditorConfig) -> Self {
        self.editor = editor;
        self
    }

    /// Sets a fixed width. Window size messages no longer change it.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self.fixed_width = true;
        self
    }

    /// Sets the height of fields that scroll.
    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets whether the help line is shown below the active group.
    pub fn show_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    /// Returns the form state.
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Maps the final state to a result.
    ///
    /// `Ok(())` once completed, [`FormError::UserAborted`] once aborted.
    pub fn result(&self) -> Result<()> {
        match self.state {
            FormState::Completed => Ok(()),
            FormState::Aborted => Err(FormError::UserAborted),
            FormState::Normal => Err(FormError::io("form is still running")),
        }
    }

    /// Returns the active group index.
    pub fn current_group(&self) -> usize {
        self.cursor
    }

    /// Returns the group at `index`.
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether the form has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the width used for rendering.
    pub fn current_width(&self) -> usize {
        self.width
    }

    /// Returns whether an editor session is pending.
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Renders the help line for the focused field.
    pub fn help_view(&self) -> String {
        self.groups
            .get(self.cursor)
            .and_then(Group::current_field)
            .map(|field| short_view(&field.key_binds(), &self.theme.help))
            .unwrap_or_default()
    }

    fn start(&mut self) -> Option<Cmd> {
        self.initialized = true;
        for group in &mut self.groups {
            group.configure(
                &self.theme,
                &self.keymap,
                &self.editor,
                self.width,
                self.height,
            );
        }
        let init_cmds: Vec<Option<Cmd>> = self.groups.iter_mut().map(Group::init).collect();

        let Some(first) = self.groups.iter().position(|g| !g.is_hidden()) else {
            debug!("no visible group, form completed");
            self.state = FormState::Completed;
            return Some(quit());
        };
        self.cursor = first;
        self.update_positions();
        debug!(group = first, "form started");

        let focus = self.groups[first].focus_first();
        sequence(init_cmds.into_iter().chain([focus]).collect())
    }

    fn update_positions(&mut self) {
        let visible: Vec<usize> = self
            .groups
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.is_hidden())
            .map(|(i, _)| i)
            .collect();
        let first_group = visible.first().copied().unwrap_or(0);
        let last_group = visible.last().copied().unwrap_or(0);
        let group_count = self.groups.len();

        for (index, group) in self.groups.iter_mut().enumerate() {
            let first_field = group.first_interactive().unwrap_or(0);
            let last_field = group.last_interactive().unwrap_or(0);
            for (field_index, field) in group.fields_mut().iter_mut().enumerate() {
                field.with_position(FieldPosition {
                    group: index,
                    field: field_index,
                    first_field,
                    last_field,
                    group_count,
                    first_group,
                    last_group,
                });
            }
        }
    }

    fn enter(&mut self, index: usize, from_end: bool) -> Option<Cmd> {
        if let Some(group) = self.groups.get_mut(self.cursor) {
            group.blur_current();
        }
        self.cursor = index;
        self.update_positions();
        debug!(group = index, "group entered");
        let group = &mut self.groups[index];
        if from_end {
            group.focus_last()
        } else {
            group.focus_first()
        }
    }

    fn next_group(&mut self) -> Option<Cmd> {
        let next = (self.cursor + 1..self.groups.len()).find(|&i| {
            let hidden = self.groups[i].is_hidden();
            if hidden {
                trace!(group = i, "skipping hidden group");
            }
            !hidden
        });
        match next {
            Some(index) => self.enter(index, false),
            None => {
                if let Some(group) = self.groups.get_mut(self.cursor) {
                    group.blur_current();
                }
                self.state = FormState::Completed;
                debug!("form completed");
                Some(quit())
            }
        }
    }

    fn prev_group(&mut self) -> Option<Cmd> {
        let prev = (0..self.cursor).rev().find(|&i| {
            let hidden = self.groups[i].is_hidden();
            if hidden {
                trace!(group = i, "skipping hidden group");
            }
            !hidden
        });
        match prev {
            Some(index) => self.enter(index, true),
            None => {
                trace!("already on the first visible group");
                None
            }
        }
    }

    fn abort(&mut self) -> Option<Cmd> {
        if let Some(group) = self.groups.get_mut(self.cursor) {
            group.blur_current();
        }
        self.state = FormState::Aborted;
        debug!("form aborted");
        Some(quit())
    }

    fn handle(&mut self, msg: Msg) -> Option<Cmd> {
        if self.state != FormState::Normal {
            return None;
        }

        match msg {
            Msg::Quit => {
                let _ = self.abort();
                None
            }
            Msg::Key(key) if matches_one(&key, &self.keymap.quit) => self.abort(),
            Msg::Key(key) if self.editing.is_some() => {
                trace!(%key, "editor pending, key dropped");
                None
            }
            Msg::WindowSize(size) => {
                if !self.fixed_width {
                    self.width = usize::from(size.width);
                    for group in &mut self.groups {
                        group.set_width(self.width);
                    }
                }
                None
            }
            Msg::NextGroup => self.next_group(),
            Msg::PrevGroup => self.prev_group(),
            Msg::UpdatePositions => {
                self.update_positions();
                None
            }
            Msg::EditorFinished { field, result } => {
                if self.editing == Some(field) {
                    self.editing = None;
                }
                debug!(%field, ok = result.is_ok(), "editor finished");
                let msg = Msg::EditorFinished { field, result };
                self.groups
                    .iter_mut()
                    .find_map(|g| g.find_field_mut(field))
                    .and_then(|f| f.update(&msg))
            }
            Msg::Sequence(cmds) => {
                trace!(len = cmds.len(), "sequence left to the driver");
                None
            }
            msg => {
                let group = self.groups.get_mut(self.cursor)?;
                let cmd = group.update(msg);
                if cmd.as_ref().is_some_and(Cmd::needs_terminal) {
                    self.editing = group.current_field().map(|f| f.id());
                }
                cmd
            }
        }
    }
}

impl Model for Form {
    fn init(&mut self) -> Option<Cmd> {
        if self.initialized {
            return None;
        }
        self.start()
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let start = if self.initialized { None } else { self.start() };
        let cmd = self.handle(msg);
        sequence(vec![start, cmd])
    }

    fn view(&self) -> String {
        if self.state != FormState::Normal {
            return String::new();
        }
        let Some(group) = self.groups.get(self.cursor) else {
            return String::new();
        };
        let mut out = group.view();
        if self.show_help {
            let help = self.help_view();
            if !help.is_empty() {
                out.push_str("\n\n");
                out.push_str(&help);
            }
        }
        self.theme.form.base.render(&out)
    }
}
