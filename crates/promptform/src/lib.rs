#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Promptform
//!
//! Interactive multi-step forms for the terminal.
//!
//! A [`Form`] is an ordered list of [`Group`]s, each shown as one screen. A
//! group holds [`Field`]s:
//! - [`Input`] and [`Text`] for single and multi-line text
//! - [`Select`] and [`MultiSelect`] for picking from [`SelectOption`]s
//! - [`Confirm`] for yes/no questions
//! - [`Note`] for informational text
//!
//! Everything runs as a message loop: the environment hands the form one
//! [`Msg`] at a time, the form updates itself and returns at most one
//! deferred [`Cmd`] whose result is fed back in. [`Runtime`] implements that
//! loop for tests and terminal drivers alike.
//!
//! Fields write their value to a bound [`Slot`] (or an `on_commit` closure)
//! only once the user confirms it and it passes validation.
//!
//! ## Example
//!
//! ```rust
//! use promptform::{
//!     Confirm, Form, FormState, Group, Input, KeyMsg, KeyType, Runtime, Select,
//!     SelectOption, Slot, validate_required,
//! };
//!
//! let name = Slot::new(String::new());
//! let color = Slot::new(String::new());
//! let sure = Slot::new(false);
//!
//! let form = Form::new(vec![
//!     Group::new(vec![
//!         Box::new(
//!             Input::new()
//!                 .title("What's your name?")
//!                 .validate(validate_required("name"))
//!                 .bind(&name),
//!         ),
//!         Box::new(
//!             Select::new()
//!                 .title("Favorite color?")
//!                 .options(vec![
//!                     SelectOption::new("Red", "red".to_string()),
//!                     SelectOption::new("Green", "green".to_string()),
//!                 ])
//!                 .bind(&color),
//!         ),
//!     ]),
//!     Group::new(vec![Box::new(Confirm::new().title("Are you sure?").bind(&sure))]),
//! ]);
//!
//! let mut rt = Runtime::new(form);
//! rt.init().unwrap();
//! for c in "Ada".chars() {
//!     rt.send(KeyMsg::from_char(c));
//! }
//! rt.send(KeyMsg::from_type(KeyType::Enter));
//! rt.send(KeyMsg::from_type(KeyType::Down));
//! rt.send(KeyMsg::from_type(KeyType::Enter));
//! rt.send(KeyMsg::from_type(KeyType::Left));
//! rt.send(KeyMsg::from_type(KeyType::Enter));
//! rt.run_until_idle().unwrap();
//!
//! assert_eq!(rt.model().state(), FormState::Completed);
//! assert_eq!(name.get(), "Ada");
//! assert_eq!(color.get(), "green");
//! assert!(sure.get());
//! ```

pub mod command;
pub mod editor;
pub mod error;
pub mod field;
pub mod form;
pub mod group;
pub mod help;
pub mod key;
pub mod keymap;
pub mod message;
pub mod option;
pub mod runtime;
pub mod slot;
pub mod style;
pub mod theme;
pub mod validate;

pub use command::{quit, sequence, Cmd};
pub use editor::{edit, open_editor, EditorConfig};
pub use error::{FormError, Result};
pub use field::{
    Confirm, EchoMode, Field, FieldId, FieldPosition, Input, MultiSelect, Note, Select, Text,
};
pub use form::{Form, FormState};
pub use group::Group;
pub use help::short_view;
pub use key::{Binding, Help, KeyMsg, KeyType};
pub use keymap::{
    ConfirmKeyMap, InputKeyMap, KeyMap, MultiSelectKeyMap, NoteKeyMap, SelectKeyMap, TextKeyMap,
};
pub use message::{Msg, WindowSizeMsg};
pub use option::{new_options, options_from_values, SelectOption};
pub use runtime::{Model, Runtime, RuntimeStats, TerminalHandoff};
pub use slot::Slot;
pub use style::{Border, Style};
pub use theme::{
    theme_base, theme_base16, theme_by_name, theme_charm, theme_dracula, FieldStyles, Theme,
};
pub use validate::{
    validate_email, validate_max_length, validate_min_length, validate_not_empty,
    validate_not_one_of, validate_required,
};
