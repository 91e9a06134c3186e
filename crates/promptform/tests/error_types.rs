//! Integration tests for `FormError`.
//!
//! Tests verify:
//! - Display text of each variant
//! - How each variant reaches the user (inline message, abort result)
//! - Conversions and `?` propagation through the crate's `Result`

use std::error::Error as StdError;
use std::io;

use promptform::{Field, FormError, Input, KeyMsg, KeyType, Msg, Result, validate_email};

mod display {
    use super::*;

    #[test]
    fn test_variant_display() {
        assert_eq!(FormError::UserAborted.to_string(), "user aborted");
        assert_eq!(
            FormError::validation("must be at least 8 characters").to_string(),
            "validation error: must be at least 8 characters"
        );
        assert_eq!(
            FormError::io("no such file: vim").to_string(),
            "io error: no such file: vim"
        );
    }

    #[test]
    fn test_debug_names_variant() {
        assert!(format!("{:?}", FormError::validation("x")).starts_with("Validation"));
    }

    #[test]
    fn test_no_source() {
        assert!(FormError::io("editor crashed").source().is_none());
        assert!(FormError::UserAborted.source().is_none());
    }
}

mod classification {
    use super::*;

    #[test]
    fn test_only_abort_is_terminal() {
        let abort = FormError::UserAborted;
        assert!(abort.is_user_abort());
        assert!(!abort.is_recoverable());

        for err in [FormError::validation("bad"), FormError::io("gone")] {
            assert!(!err.is_user_abort());
            assert!(err.is_recoverable());
        }
    }

    #[test]
    fn test_values_compare_and_clone() {
        let err = FormError::validation("taken");
        assert_eq!(err.clone(), err);
        assert_ne!(err, FormError::validation("free"));
        assert_ne!(FormError::io("taken"), err);
    }
}

mod field_messages {
    use super::*;

    #[test]
    fn test_validation_message_is_bare() {
        assert_eq!(
            FormError::validation("name is required").field_message(),
            "name is required"
        );
    }

    #[test]
    fn test_io_message_keeps_prefix() {
        assert_eq!(
            FormError::io("editor exited with status 1").field_message(),
            "io error: editor exited with status 1"
        );
    }

    #[test]
    fn test_rule_failure_shows_on_field() {
        let mut input = Input::new().title("Email").validate(validate_email());
        input.focus();
        for c in "nope".chars() {
            input.update(&Msg::Key(KeyMsg::from_char(c)));
        }
        input.update(&Msg::Key(KeyMsg::from_type(KeyType::Enter)));

        let shown = input.error().map(str::to_string);
        assert!(shown.is_some());
        assert!(!shown.unwrap_or_default().starts_with("validation error"));
    }
}

mod conversions {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let err: FormError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err, FormError::io("denied"));
    }

    #[test]
    fn test_question_mark_converts_io() {
        fn launch() -> Result<()> {
            let spawned: io::Result<()> =
                Err(io::Error::new(io::ErrorKind::NotFound, "vi not found"));
            spawned?;
            Ok(())
        }

        assert_eq!(launch(), Err(FormError::io("vi not found")));
    }

    #[test]
    fn test_boxes_as_std_error() {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(FormError::UserAborted);
        assert_eq!(boxed.to_string(), "user aborted");
    }
}
