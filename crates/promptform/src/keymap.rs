//! Default keybindings for every field kind.
//!
//! `next` and `submit` share the "enter" key. The form enables exactly one of
//! them per field through [`KeyMap`] updates driven by
//! [`FieldPosition::is_last`](crate::FieldPosition::is_last), so help shows
//! "enter next" everywhere except on the final field.

use crate::key::Binding;

/// Keybindings for form navigation.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Quit the form.
    pub quit: Binding,
    /// Input field keybindings.
    pub input: InputKeyMap,
    /// Text area keybindings.
    pub text: TextKeyMap,
    /// Select field keybindings.
    pub select: SelectKeyMap,
    /// Multi-select field keybindings.
    pub multi_select: MultiSelectKeyMap,
    /// Confirm field keybindings.
    pub confirm: ConfirmKeyMap,
    /// Note field keybindings.
    pub note: NoteKeyMap,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    /// Creates a new default keymap.
    pub fn new() -> Self {
        Self {
            quit: Binding::new().keys(&["ctrl+c"]),
            input: InputKeyMap::default(),
            text: TextKeyMap::default(),
            select: SelectKeyMap::default(),
            multi_select: MultiSelectKeyMap::default(),
            confirm: ConfirmKeyMap::default(),
            note: NoteKeyMap::default(),
        }
    }
}

/// Enables `next` or `submit` depending on whether the field is the last one.
pub(crate) fn set_last(next: &mut Binding, submit: &mut Binding, is_last: bool) {
    next.enable(!is_last);
    submit.enable(is_last);
}

fn prev_binding() -> Binding {
    Binding::new().keys(&["shift+tab"]).help("shift+tab", "back")
}

fn submit_binding() -> Binding {
    Binding::new()
        .keys(&["enter"])
        .help("enter", "submit")
        .set_enabled(false)
}

/// Keybindings for input fields.
#[derive(Debug, Clone)]
pub struct InputKeyMap {
    /// Accept autocomplete suggestion.
    pub accept_suggestion: Binding,
    /// Go to next field.
    pub next: Binding,
    /// Go to previous field.
    pub prev: Binding,
    /// Submit the form.
    pub submit: Binding,
}

impl Default for InputKeyMap {
    fn default() -> Self {
        Self {
            accept_suggestion: Binding::new()
                .keys(&["ctrl+e"])
                .help("ctrl+e", "complete")
                .set_enabled(false),
            prev: prev_binding(),
            next: Binding::new().keys(&["enter", "tab"]).help("enter", "next"),
            submit: submit_binding(),
        }
    }
}

/// Keybindings for text area fields.
#[derive(Debug, Clone)]
pub struct TextKeyMap {
    /// Go to next field.
    pub next: Binding,
    /// Go to previous field.
    pub prev: Binding,
    /// Insert a new line.
    pub new_line: Binding,
    /// Open external editor.
    pub editor: Binding,
    /// Submit the form.
    pub submit: Binding,
}

impl Default for TextKeyMap {
    fn default() -> Self {
        Self {
            prev: prev_binding(),
            next: Binding::new().keys(&["tab", "enter"]).help("enter", "next"),
            submit: submit_binding(),
            new_line: Binding::new()
                .keys(&["alt+enter", "ctrl+j"])
                .help("alt+enter / ctrl+j", "new line"),
            editor: Binding::new()
                .keys(&["ctrl+e"])
                .help("ctrl+e", "open editor"),
        }
    }
}

/// Keybindings for select fields.
#[derive(Debug, Clone)]
pub struct SelectKeyMap {
    /// Go to next field.
    pub next: Binding,
    /// Go to previous field.
    pub prev: Binding,
    /// Move cursor up.
    pub up: Binding,
    /// Move cursor down.
    pub down: Binding,
    /// Move cursor left (inline mode).
    pub left: Binding,
    /// Move cursor right (inline mode).
    pub right: Binding,
    /// Open filter.
    pub filter: Binding,
    /// Apply filter.
    pub set_filter: Binding,
    /// Clear filter.
    pub clear_filter: Binding,
    /// Half page up.
    pub half_page_up: Binding,
    /// Half page down.
    pub half_page_down: Binding,
    /// Go to top.
    pub goto_top: Binding,
    /// Go to bottom.
    pub goto_bottom: Binding,
    /// Submit the form.
    pub submit: Binding,
}

impl Default for SelectKeyMap {
    fn default() -> Self {
        Self {
            prev: prev_binding(),
            next: Binding::new()
                .keys(&["enter", "tab"])
                .help("enter", "select"),
            submit: submit_binding(),
            up: Binding::new()
                .keys(&["up", "k", "ctrl+k", "ctrl+p"])
                .help("↑", "up"),
            down: Binding::new()
                .keys(&["down", "j", "ctrl+j", "ctrl+n"])
                .help("↓", "down"),
            left: Binding::new()
                .keys(&["h", "left"])
                .help("←", "left")
                .set_enabled(false),
            right: Binding::new()
                .keys(&["l", "right"])
                .help("→", "right")
                .set_enabled(false),
            filter: Binding::new().keys(&["/"]).help("/", "filter"),
            set_filter: Binding::new()
                .keys(&["enter"])
                .help("enter", "set filter")
                .set_enabled(false),
            clear_filter: Binding::new()
                .keys(&["esc"])
                .help("esc", "clear filter")
                .set_enabled(false),
            half_page_up: Binding::new().keys(&["ctrl+u"]).help("ctrl+u", "½ page up"),
            half_page_down: Binding::new()
                .keys(&["ctrl+d"])
                .help("ctrl+d", "½ page down"),
            goto_top: Binding::new()
                .keys(&["home", "g"])
                .help("g/home", "go to start"),
            goto_bottom: Binding::new()
                .keys(&["end", "G"])
                .help("G/end", "go to end"),
        }
    }
}

/// Keybindings for multi-select fields.
#[derive(Debug, Clone)]
pub struct MultiSelectKeyMap {
    /// Go to next field.
    pub next: Binding,
    /// Go to previous field.
    pub prev: Binding,
    /// Move cursor up.
    pub up: Binding,
    /// Move cursor down.
    pub down: Binding,
    /// Toggle selection.
    pub toggle: Binding,
    /// Open filter.
    pub filter: Binding,
    /// Apply filter.
    pub set_filter: Binding,
    /// Clear filter.
    pub clear_filter: Binding,
    /// Half page up.
    pub half_page_up: Binding,
    /// Half page down.
    pub half_page_down: Binding,
    /// Go to top.
    pub goto_top: Binding,
    /// Go to bottom.
    pub goto_bottom: Binding,
    /// Select all.
    pub select_all: Binding,
    /// Select none.
    pub select_none: Binding,
    /// Submit the form.
    pub submit: Binding,
}

impl Default for MultiSelectKeyMap {
    fn default() -> Self {
        Self {
            prev: prev_binding(),
            next: Binding::new()
                .keys(&["enter", "tab"])
                .help("enter", "confirm"),
            submit: submit_binding(),
            toggle: Binding::new().keys(&[" ", "x"]).help("x", "toggle"),
            up: Binding::new().keys(&["up", "k", "ctrl+p"]).help("↑", "up"),
            down: Binding::new()
                .keys(&["down", "j", "ctrl+n"])
                .help("↓", "down"),
            filter: Binding::new()
                .keys(&["/"])
                .help("/", "filter")
                .set_enabled(false),
            set_filter: Binding::new()
                .keys(&["enter"])
                .help("enter", "set filter")
                .set_enabled(false),
            clear_filter: Binding::new()
                .keys(&["esc"])
                .help("esc", "clear filter")
                .set_enabled(false),
            half_page_up: Binding::new().keys(&["ctrl+u"]).help("ctrl+u", "½ page up"),
            half_page_down: Binding::new()
                .keys(&["ctrl+d"])
                .help("ctrl+d", "½ page down"),
            goto_top: Binding::new()
                .keys(&["home", "g"])
                .help("g/home", "go to start"),
            goto_bottom: Binding::new()
                .keys(&["end", "G"])
                .help("G/end", "go to end"),
            select_all: Binding::new()
                .keys(&["ctrl+a"])
                .help("ctrl+a", "select all"),
            select_none: Binding::new()
                .keys(&["ctrl+a"])
                .help("ctrl+a", "select none")
                .set_enabled(false),
        }
    }
}

/// Keybindings for confirm fields.
#[derive(Debug, Clone)]
pub struct ConfirmKeyMap {
    /// Go to next field.
    pub next: Binding,
    /// Go to previous field.
    pub prev: Binding,
    /// Toggle between yes/no.
    pub toggle: Binding,
    /// Submit the form.
    pub submit: Binding,
    /// Accept (yes).
    pub accept: Binding,
    /// Reject (no).
    pub reject: Binding,
}

impl Default for ConfirmKeyMap {
    fn default() -> Self {
        Self {
            prev: prev_binding(),
            next: Binding::new().keys(&["enter", "tab"]).help("enter", "next"),
            submit: submit_binding(),
            toggle: Binding::new()
                .keys(&["h", "l", "right", "left"])
                .help("←/→", "toggle"),
            accept: Binding::new().keys(&["y", "Y"]).help("y", "Yes"),
            reject: Binding::new().keys(&["n", "N"]).help("n", "No"),
        }
    }
}

/// Keybindings for note fields.
#[derive(Debug, Clone)]
pub struct NoteKeyMap {
    /// Go to next field.
    pub next: Binding,
    /// Go to previous field.
    pub prev: Binding,
    /// Submit the form.
    pub submit: Binding,
}

impl Default for NoteKeyMap {
    fn default() -> Self {
        Self {
            prev: prev_binding(),
            next: Binding::new().keys(&["enter", "tab"]).help("enter", "next"),
            submit: submit_binding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{matches_one, KeyMsg, KeyType};

    #[test]
    fn test_submit_disabled_by_default() {
        let km = KeyMap::default();
        assert!(km.input.next.enabled());
        assert!(!km.input.submit.enabled());
    }

    #[test]
    fn test_set_last_swaps_next_and_submit() {
        let mut km = InputKeyMap::default();
        set_last(&mut km.next, &mut km.submit, true);
        assert!(!km.next.enabled());
        assert!(km.submit.enabled());

        set_last(&mut km.next, &mut km.submit, false);
        assert!(km.next.enabled());
        assert!(!km.submit.enabled());
    }

    #[test]
    fn test_quit_is_ctrl_c() {
        let km = KeyMap::default();
        assert!(matches_one(&KeyMsg::from_type(KeyType::CtrlC), &km.quit));
    }

    #[test]
    fn test_clear_filter_uses_esc() {
        let mut km = SelectKeyMap::default();
        km.clear_filter.enable(true);
        assert!(matches_one(&KeyMsg::from_type(KeyType::Esc), &km.clear_filter));
    }
}
