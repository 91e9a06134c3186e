//! Error types for form execution.

use thiserror::Error;

/// Errors that can occur while running a form.
///
/// None of these are fatal to the form itself. Validation failures stay local
/// to the field that produced them, editor failures come back as messages, and
/// an abort is a normal way for a session to end.
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`UserAborted`](FormError::UserAborted) | Normal exit, not an error condition |
/// | [`Validation`](FormError::Validation) | Show error message, allow retry |
/// | [`Io`](FormError::Io) | Show error on the field, keep the previous value |
///
/// # Example: Handling User Abort
///
/// ```rust,ignore
/// match form.result() {
///     Ok(()) => println!("Form completed!"),
///     Err(FormError::UserAborted) => {
///         println!("Cancelled by user");
///         return Ok(());
///     }
///     Err(e) => return Err(e.into()),
/// }
/// ```
///
/// # Note on Clone and PartialEq
///
/// This error type implements `Clone` and `PartialEq` so it can travel inside
/// messages and be compared in tests. The `Io` variant therefore stores a
/// `String` rather than the underlying `io::Error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// User aborted the form with Ctrl+C.
    #[error("user aborted")]
    UserAborted,

    /// A field's validation rule rejected its value.
    ///
    /// The contained string is shown inline next to the field.
    ///
    /// ```rust,ignore
    /// let input = Input::new()
    ///     .title("Email")
    ///     .validate(|s: &str| {
    ///         if s.contains('@') {
    ///             Ok(())
    ///         } else {
    ///             Err(FormError::validation("must contain @"))
    ///         }
    ///     });
    /// ```
    #[error("validation error: {0}")]
    Validation(String),

    /// IO error during a deferred effect, such as running an external editor.
    #[error("io error: {0}")]
    Io(String),
}

impl FormError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an IO error with the given message.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Returns true if this is a user-initiated abort.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, Self::UserAborted)
    }

    /// Returns true if this error is recoverable by the user editing the field.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Io(_))
    }

    /// Message to show inline next to a field.
    ///
    /// Validation errors show only the rule's message; other variants use
    /// their full display form.
    pub fn field_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// A specialized [`Result`] type for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_display() {
        let err = FormError::UserAborted;
        assert_eq!(format!("{err}"), "user aborted");

        let err = FormError::Validation("invalid input".to_string());
        assert_eq!(format!("{err}"), "validation error: invalid input");
    }

    #[test]
    fn test_field_message() {
        assert_eq!(
            FormError::validation("we're out of hard shells, sorry").field_message(),
            "we're out of hard shells, sorry"
        );
        assert_eq!(
            FormError::io("editor exited with status 1").field_message(),
            "io error: editor exited with status 1"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such editor");
        let err: FormError = io.into();
        assert!(matches!(err, FormError::Io(ref m) if m.contains("no such editor")));
    }
}
