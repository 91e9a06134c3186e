//! Keyboard input and keybindings.
//!
//! Input arrives already decoded as [`KeyMsg`] values. Fields never look at
//! raw bytes: they compare the canonical key name produced by `Display`
//! ("enter", "shift+tab", "ctrl+e", "a") against the keys of a [`Binding`].
//!
//! # Example
//!
//! ```rust
//! use promptform::key::{matches, Binding, KeyMsg, KeyType};
//!
//! let up = Binding::new().keys(&["k", "up"]).help("↑", "up");
//!
//! assert!(matches(&KeyMsg::from_char('k'), &[&up]));
//! assert!(matches(&KeyMsg::from_type(KeyType::Up), &[&up]));
//! assert!(!matches(&KeyMsg::from_char('j'), &[&up]));
//! ```

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard key event message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMsg {
    /// The type of key pressed.
    pub key_type: KeyType,
    /// For `KeyType::Runes`, the characters typed.
    pub runes: Vec<char>,
    /// Whether Alt was held.
    pub alt: bool,
    /// Whether this came from a paste operation.
    pub paste: bool,
}

impl KeyMsg {
    /// Create a new key message from a key type.
    pub fn from_type(key_type: KeyType) -> Self {
        Self {
            key_type,
            runes: Vec::new(),
            alt: false,
            paste: false,
        }
    }

    /// Create a new key message from a character.
    pub fn from_char(c: char) -> Self {
        Self::from_runes(vec![c])
    }

    /// Create a new key message from multiple characters (e.g., from IME or paste).
    pub fn from_runes(runes: Vec<char>) -> Self {
        Self {
            key_type: KeyType::Runes,
            runes,
            alt: false,
            paste: false,
        }
    }

    /// Create a key message for every character of `s`.
    pub fn from_str_runes(s: &str) -> Self {
        Self::from_runes(s.chars().collect())
    }

    /// Set the alt modifier.
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Set the paste flag.
    pub fn with_paste(mut self) -> Self {
        self.paste = true;
        self
    }
}

impl fmt::Display for KeyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.key_type == KeyType::Runes {
            if self.paste {
                write!(f, "[")?;
            }
            for c in &self.runes {
                write!(f, "{c}")?;
            }
            if self.paste {
                write!(f, "]")?;
            }
            Ok(())
        } else {
            write!(f, "{}", self.key_type)
        }
    }
}

impl From<KeyEvent> for KeyMsg {
    fn from(event: KeyEvent) -> Self {
        from_crossterm_key(event.code, event.modifiers)
    }
}

/// Key type enumeration.
///
/// Only the keys the form widgets react to get a dedicated variant; any other
/// control sequence decodes to [`KeyType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Regular character(s) input.
    Runes,
    /// Enter / carriage return.
    Enter,
    /// Tab.
    Tab,
    /// Shift+Tab.
    ShiftTab,
    /// Escape.
    Esc,
    /// Space bar.
    Space,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PgUp,
    /// Page Down.
    PgDown,
    /// Ctrl+A.
    CtrlA,
    /// Ctrl+C.
    CtrlC,
    /// Ctrl+D.
    CtrlD,
    /// Ctrl+E.
    CtrlE,
    /// Ctrl+J.
    CtrlJ,
    /// Ctrl+K.
    CtrlK,
    /// Ctrl+N.
    CtrlN,
    /// Ctrl+P.
    CtrlP,
    /// Ctrl+U.
    CtrlU,
    /// Any key without a dedicated variant.
    Unknown,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Runes => "runes",
            Self::Enter => "enter",
            Self::Tab => "tab",
            Self::ShiftTab => "shift+tab",
            Self::Esc => "esc",
            Self::Space => " ",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Home => "home",
            Self::End => "end",
            Self::PgUp => "pgup",
            Self::PgDown => "pgdown",
            Self::CtrlA => "ctrl+a",
            Self::CtrlC => "ctrl+c",
            Self::CtrlD => "ctrl+d",
            Self::CtrlE => "ctrl+e",
            Self::CtrlJ => "ctrl+j",
            Self::CtrlK => "ctrl+k",
            Self::CtrlN => "ctrl+n",
            Self::CtrlP => "ctrl+p",
            Self::CtrlU => "ctrl+u",
            Self::Unknown => "",
        };
        f.write_str(name)
    }
}

/// Convert a crossterm key code and modifiers to a [`KeyMsg`].
pub fn from_crossterm_key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);

    let key_type = match code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'a' => KeyType::CtrlA,
            'c' => KeyType::CtrlC,
            'd' => KeyType::CtrlD,
            'e' => KeyType::CtrlE,
            'j' => KeyType::CtrlJ,
            'k' => KeyType::CtrlK,
            'n' => KeyType::CtrlN,
            'p' => KeyType::CtrlP,
            'u' => KeyType::CtrlU,
            'i' => KeyType::Tab,
            'm' => KeyType::Enter,
            _ => KeyType::Unknown,
        },
        KeyCode::Char(' ') => KeyType::Space,
        KeyCode::Char(c) => {
            let mut msg = KeyMsg::from_char(c);
            msg.alt = alt;
            return msg;
        }
        KeyCode::Enter => KeyType::Enter,
        KeyCode::Backspace => KeyType::Backspace,
        KeyCode::Tab if shift => KeyType::ShiftTab,
        KeyCode::BackTab => KeyType::ShiftTab,
        KeyCode::Tab => KeyType::Tab,
        KeyCode::Esc => KeyType::Esc,
        KeyCode::Delete => KeyType::Delete,
        KeyCode::Up => KeyType::Up,
        KeyCode::Down => KeyType::Down,
        KeyCode::Left => KeyType::Left,
        KeyCode::Right => KeyType::Right,
        KeyCode::Home => KeyType::Home,
        KeyCode::End => KeyType::End,
        KeyCode::PageUp => KeyType::PgUp,
        KeyCode::PageDown => KeyType::PgDown,
        _ => KeyType::Unknown,
    };

    KeyMsg {
        key_type,
        runes: Vec::new(),
        alt,
        paste: false,
    }
}

// -----------------------------------------------------------------------------
// Bindings
// -----------------------------------------------------------------------------

/// Help information for a keybinding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// The key(s) to display in help text (e.g., "↑/k").
    pub key: String,
    /// Description of what the binding does.
    pub desc: String,
}

impl Help {
    /// Creates new help information.
    #[must_use]
    pub fn new(key: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            desc: desc.into(),
        }
    }
}

/// A keybinding with associated help text.
///
/// Bindings can be enabled/disabled and contain zero or more key names that
/// trigger the binding.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<String>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a new empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keys for this binding.
    #[must_use]
    pub fn keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|&s| s.to_string()).collect();
        self
    }

    /// Sets the help text for this binding.
    #[must_use]
    pub fn help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help::new(key, desc);
        self
    }

    /// Enables or disables the binding (builder version).
    #[must_use]
    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.disabled = !enabled;
        self
    }

    /// Enables or disables the binding.
    pub fn enable(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Replaces the help description, keeping the help key.
    pub fn set_help_desc(&mut self, desc: impl Into<String>) {
        self.help.desc = desc.into();
    }

    /// Returns the keys for this binding.
    #[must_use]
    pub fn get_keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the help information for this binding.
    #[must_use]
    pub fn get_help(&self) -> &Help {
        &self.help
    }

    /// A binding is enabled if it's not explicitly disabled and has at least one key.
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }
}

/// Checks if the given key matches any of the given enabled bindings.
pub fn matches(key: &KeyMsg, bindings: &[&Binding]) -> bool {
    let key_str = key.to_string();
    bindings
        .iter()
        .filter(|b| b.enabled())
        .any(|b| b.keys.iter().any(|k| *k == key_str))
}

/// Checks if the given key matches a single binding.
pub fn matches_one(key: &KeyMsg, binding: &Binding) -> bool {
    matches(key, &[binding])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_msg_display() {
        assert_eq!(KeyMsg::from_type(KeyType::Enter).to_string(), "enter");
        assert_eq!(KeyMsg::from_char('a').to_string(), "a");
        assert_eq!(KeyMsg::from_char('a').with_alt().to_string(), "alt+a");
        assert_eq!(
            KeyMsg::from_type(KeyType::Enter).with_alt().to_string(),
            "alt+enter"
        );
        assert_eq!(
            KeyMsg::from_str_runes("hello").with_paste().to_string(),
            "[hello]"
        );
    }

    #[test]
    fn test_from_crossterm() {
        let key = from_crossterm_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key.key_type, KeyType::CtrlC);

        let key = from_crossterm_key(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(key.to_string(), "shift+tab");

        let key = from_crossterm_key(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(key.runes, vec!['x']);

        let key = from_crossterm_key(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(key.to_string(), " ");

        let key: KeyMsg = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT).into();
        assert_eq!(key.to_string(), "alt+enter");
    }

    #[test]
    fn test_binding_enabled() {
        assert!(!Binding::new().enabled());
        assert!(Binding::new().keys(&["q"]).enabled());
        assert!(!Binding::new().keys(&["q"]).set_enabled(false).enabled());
    }

    #[test]
    fn test_matches_disabled() {
        let binding = Binding::new().keys(&["q"]).set_enabled(false);
        assert!(!matches_one(&KeyMsg::from_char('q'), &binding));
    }

    #[test]
    fn test_matches_multiple() {
        let up = Binding::new().keys(&["k", "up"]);
        let down = Binding::new().keys(&["j", "down"]);
        assert!(matches(&KeyMsg::from_char('j'), &[&up, &down]));
        assert!(matches(&KeyMsg::from_type(KeyType::Up), &[&up, &down]));
        assert!(!matches(&KeyMsg::from_char('x'), &[&up, &down]));
    }
}
