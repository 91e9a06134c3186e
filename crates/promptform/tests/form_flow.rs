//! End-to-end form sessions driven through the runtime.
//!
//! Tests verify:
//! - The taco order: validation refusal, group transitions, bound values
//! - Hidden groups are never entered, in either direction
//! - Visibility predicates are re-evaluated on every transition
//! - Back navigation, including the idempotent first field
//! - Abort leaves bound values untouched
//! - External editor success and failure

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use promptform::{
    Confirm, EditorConfig, Form, FormError, FormState, Group, Input, KeyMsg, KeyType,
    Model, MultiSelect, Msg, Runtime, Select, SelectOption, Slot, TerminalHandoff, Text,
    theme_charm,
};

fn press(rt: &mut Runtime<Form>, key: KeyType) {
    rt.dispatch(KeyMsg::from_type(key)).unwrap();
}

fn type_str(rt: &mut Runtime<Form>, s: &str) {
    for c in s.chars() {
        rt.dispatch(KeyMsg::from_char(c)).unwrap();
    }
}

fn active_title(rt: &Runtime<Form>) -> String {
    let form = rt.model();
    form.group(form.current_group())
        .and_then(|g| g.current_field())
        .map(|f| f.title().to_string())
        .unwrap_or_default()
}

fn input_group(title: &str) -> Group {
    Group::new(vec![Box::new(Input::new().title(title))])
}

mod taco {
    use super::*;

    struct Order {
        shell: Slot<String>,
        base: Slot<String>,
        toppings: Slot<Vec<String>>,
        name: Slot<String>,
        instructions: Slot<String>,
        discount: Slot<bool>,
    }

    fn order() -> Order {
        Order {
            shell: Slot::new(String::new()),
            base: Slot::new(String::new()),
            toppings: Slot::new(Vec::new()),
            name: Slot::new(String::new()),
            instructions: Slot::new(String::new()),
            discount: Slot::new(false),
        }
    }

    fn taco_form(o: &Order) -> Form {
        Form::new(vec![
            Group::new(vec![
                Box::new(
                    Select::new()
                        .title("Shell?")
                        .options(vec![
                            SelectOption::new("Soft", "Soft".to_string()),
                            SelectOption::new("Hard", "Hard".to_string()),
                        ])
                        .validate(|s: &String| {
                            if s == "Hard" {
                                Err(FormError::validation("we're out of hard shells, sorry"))
                            } else {
                                Ok(())
                            }
                        })
                        .bind(&o.shell),
                ),
                Box::new(
                    Select::new()
                        .title("Base?")
                        .options(promptform::new_options(["Chicken", "Beef", "Fish", "Beans"]))
                        .bind(&o.base),
                ),
            ]),
            Group::new(vec![Box::new(
                MultiSelect::new()
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
                    .bind(&o.toppings),
            )]),
            Group::new(vec![
                Box::new(Input::new().title("What's your name?").bind(&o.name)),
                Box::new(Text::new().title("Special Instructions").bind(&o.instructions)),
                Box::new(Confirm::new().title("Would you like 15% off?").bind(&o.discount)),
            ]),
        ])
        .theme(theme_charm().plain())
    }

    #[test]
    fn test_full_order() {
        let o = order();
        let mut rt = Runtime::new(taco_form(&o));
        rt.init().unwrap();
        assert_eq!(active_title(&rt), "Shell?");

        press(&mut rt, KeyType::Down);
        press(&mut rt, KeyType::Enter);
        assert_eq!(rt.model().current_group(), 0);
        assert_eq!(active_title(&rt), "Shell?");
        assert_eq!(o.shell.get(), "");
        let view = rt.last_view().unwrap_or_default();
        assert!(view.contains("┃ Shell? *"));
        assert!(view.contains("┃ * we're out of hard shells, sorry"));

        press(&mut rt, KeyType::Up);
        press(&mut rt, KeyType::Enter);
        assert_eq!(o.shell.get(), "Soft");
        assert_eq!(active_title(&rt), "Base?");

        press(&mut rt, KeyType::Enter);
        assert_eq!(o.base.get(), "Chicken");
        assert_eq!(rt.model().current_group(), 1);
        assert!(o.toppings.get().is_empty());

        press(&mut rt, KeyType::Down);
        press(&mut rt, KeyType::Down);
        type_str(&mut rt, "x");
        let view = rt.last_view().unwrap_or_default();
        assert!(view.contains("  ✓ Lettuce"));
        assert!(view.contains("  ✓ Tomatoes"));
        assert!(view.contains("> ✓ Corn"));
        press(&mut rt, KeyType::Enter);
        assert_eq!(rt.model().current_group(), 2);
        assert_eq!(o.toppings.get(), vec!["Lettuce", "Tomatoes", "Corn"]);

        type_str(&mut rt, "Glen");
        assert!(rt.last_view().unwrap_or_default().contains("Glen"));
        assert_eq!(o.name.get(), "");
        press(&mut rt, KeyType::Enter);
        assert_eq!(o.name.get(), "Glen");

        type_str(&mut rt, "Mild");
        press(&mut rt, KeyType::Enter);
        assert_eq!(o.instructions.get(), "Mild");
        assert_eq!(active_title(&rt), "Would you like 15% off?");
        assert!(rt.last_view().unwrap_or_default().ends_with("enter submit • shift+tab back"));

        press(&mut rt, KeyType::Left);
        press(&mut rt, KeyType::Enter);
        assert!(o.discount.get());
        assert_eq!(rt.model().state(), FormState::Completed);
        assert_eq!(rt.model().result(), Ok(()));
        assert!(rt.is_finished());
    }

    #[test]
    fn test_going_back_keeps_committed_values() {
        let o = order();
        let mut rt = Runtime::new(taco_form(&o));
        rt.init().unwrap();
        press(&mut rt, KeyType::Enter);
        press(&mut rt, KeyType::Enter);
        assert_eq!(rt.model().current_group(), 1);

        press(&mut rt, KeyType::ShiftTab);
        assert_eq!(rt.model().current_group(), 0);
        assert_eq!(active_title(&rt), "Base?");
        assert_eq!(o.base.get(), "Chicken");
    }

    #[test]
    fn test_abort_commits_nothing_further() {
        let o = order();
        let mut rt = Runtime::new(taco_form(&o));
        rt.init().unwrap();
        press(&mut rt, KeyType::Enter);
        press(&mut rt, KeyType::Down);
        press(&mut rt, KeyType::CtrlC);

        assert_eq!(rt.model().state(), FormState::Aborted);
        assert_eq!(rt.model().result(), Err(FormError::UserAborted));
        assert_eq!(o.shell.get(), "Soft");
        assert_eq!(o.base.get(), "");
        assert!(rt.is_finished());
    }
}

mod hidden_groups {
    use super::*;

    #[test]
    fn test_static_hide_and_authoritative_predicate() {
        let form = Form::new(vec![
            input_group("one").hide(true),
            input_group("two"),
            input_group("three"),
            input_group("four").hide(true).hide_func(|| false),
        ]);
        let mut rt = Runtime::new(form);
        rt.init().unwrap();
        assert_eq!(rt.model().current_group(), 1);

        press(&mut rt, KeyType::ShiftTab);
        assert_eq!(rt.model().current_group(), 1);

        press(&mut rt, KeyType::Enter);
        assert_eq!(rt.model().current_group(), 2);
        press(&mut rt, KeyType::Enter);
        assert_eq!(rt.model().current_group(), 3);
        assert_eq!(active_title(&rt), "four");

        press(&mut rt, KeyType::ShiftTab);
        press(&mut rt, KeyType::ShiftTab);
        assert_eq!(rt.model().current_group(), 1);
        press(&mut rt, KeyType::ShiftTab);
        assert_eq!(rt.model().current_group(), 1);
    }

    #[test]
    fn test_predicate_flip_makes_group_reachable() {
        let hidden = Arc::new(AtomicBool::new(true));
        let probe = Arc::clone(&hidden);
        let form = Form::new(vec![
            input_group("one"),
            input_group("two").hide_func(move || probe.load(Ordering::SeqCst)),
            input_group("three"),
        ]);
        let mut rt = Runtime::new(form);
        rt.init().unwrap();

        press(&mut rt, KeyType::Enter);
        assert_eq!(rt.model().current_group(), 2);
        press(&mut rt, KeyType::ShiftTab);
        assert_eq!(rt.model().current_group(), 0);

        hidden.store(false, Ordering::SeqCst);
        press(&mut rt, KeyType::Enter);
        assert_eq!(rt.model().current_group(), 1);
        assert_eq!(active_title(&rt), "two");
    }

    #[test]
    fn test_back_focuses_last_interactive_field() {
        let form = Form::new(vec![
            Group::new(vec![
                Box::new(Input::new().title("first")),
                Box::new(Input::new().title("second")),
                Box::new(promptform::Note::new().title("trailing note")),
            ]),
            input_group("third"),
        ]);
        let mut rt = Runtime::new(form);
        rt.init().unwrap();
        press(&mut rt, KeyType::Enter);
        press(&mut rt, KeyType::Enter);
        assert_eq!(rt.model().current_group(), 1);

        press(&mut rt, KeyType::ShiftTab);
        assert_eq!(rt.model().current_group(), 0);
        assert_eq!(active_title(&rt), "second");
    }
}

mod editor {
    use super::*;

    fn notes_form(command: &str, notes: &Slot<String>) -> Form {
        Form::new(vec![Group::new(vec![Box::new(
            Text::new().title("Notes").bind(notes),
        )])])
        .theme(theme_charm().plain())
        .editor(EditorConfig::default().command(command))
    }

    #[test]
    fn test_editor_result_replaces_working_value() {
        let notes = Slot::new(String::new());
        let mut rt = Runtime::new(notes_form("printf 'extra salsa' >", &notes));
        rt.init().unwrap();
        press(&mut rt, KeyType::CtrlE);
        assert!(!rt.model().is_editing());
        assert!(rt.last_view().unwrap_or_default().contains("extra salsa"));
        assert_eq!(notes.get(), "");

        press(&mut rt, KeyType::Enter);
        assert_eq!(notes.get(), "extra salsa");
        assert_eq!(rt.model().state(), FormState::Completed);
    }

    #[test]
    fn test_editor_failure_is_shown_and_not_fatal() {
        let notes = Slot::new(String::new());
        let mut rt = Runtime::new(notes_form("false", &notes));
        rt.init().unwrap();
        type_str(&mut rt, "keep");
        press(&mut rt, KeyType::CtrlE);

        let form = rt.model();
        assert_eq!(form.state(), FormState::Normal);
        let field = form.group(0).and_then(|g| g.current_field()).unwrap();
        assert!(field.error().is_some_and(|e| e.starts_with("io error")));
        assert!(rt.last_view().unwrap_or_default().contains("keep"));
    }

    #[test]
    fn test_keys_dropped_while_editor_pending() {
        let notes = Slot::new(String::new());
        let mut form = notes_form("printf 'from editor' >", &notes);
        let _ = form.init();

        let cmd = form
            .update(Msg::Key(KeyMsg::from_type(KeyType::CtrlE)))
            .expect("editor command");
        assert!(cmd.needs_terminal());
        assert!(form.is_editing());

        assert!(form.update(Msg::Key(KeyMsg::from_char('z'))).is_none());
        assert!(form.update(Msg::Key(KeyMsg::from_type(KeyType::Enter))).is_none());
        assert_eq!(notes.get(), "");

        let finished = cmd.execute().expect("editor result");
        let _ = form.update(finished);
        assert!(!form.is_editing());
        assert!(form.view().contains("from editor"));
        assert!(!form.view().contains('z'));
    }

    struct BrokenTerminal {
        release_fails: bool,
    }

    impl TerminalHandoff for BrokenTerminal {
        fn release(&mut self) -> promptform::Result<()> {
            if self.release_fails {
                Err(FormError::io("tty gone"))
            } else {
                Ok(())
            }
        }

        fn restore(&mut self) -> promptform::Result<()> {
            Err(FormError::io("tty gone"))
        }
    }

    #[test]
    fn test_restore_failure_still_delivers_editor_result() {
        let notes = Slot::new(String::new());
        let form = notes_form("printf 'salsa' >", &notes);
        let mut rt = Runtime::new(form).with_handoff(BrokenTerminal {
            release_fails: false,
        });
        rt.init().unwrap();

        let err = rt.dispatch(KeyMsg::from_type(KeyType::CtrlE)).unwrap_err();
        assert_eq!(err, FormError::io("tty gone"));
        assert!(!rt.model().is_editing());
        assert!(rt.last_view().unwrap_or_default().contains("salsa"));

        type_str(&mut rt, "z");
        assert!(rt.last_view().unwrap_or_default().contains("salsaz"));
    }

    #[test]
    fn test_release_failure_is_reported_on_field() {
        let notes = Slot::new(String::new());
        let form = notes_form("printf 'salsa' >", &notes);
        let mut rt = Runtime::new(form).with_handoff(BrokenTerminal {
            release_fails: true,
        });
        rt.init().unwrap();
        type_str(&mut rt, "keep");

        rt.dispatch(KeyMsg::from_type(KeyType::CtrlE)).unwrap();
        let form = rt.model();
        assert!(!form.is_editing());
        assert_eq!(form.state(), FormState::Normal);
        let field = form.group(0).and_then(|g| g.current_field()).unwrap();
        assert_eq!(field.error(), Some("io error: tty gone"));
        assert!(rt.last_view().unwrap_or_default().contains("keep"));

        type_str(&mut rt, "s");
        assert!(rt.last_view().unwrap_or_default().contains("keeps"));
    }
}
