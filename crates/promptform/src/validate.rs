//! Stock validation rules.
//!
//! Every rule returns `Ok(())` to accept a value and a
//! [`FormError::Validation`] carrying the message shown next to the field
//! otherwise.
//!
//! # Example
//!
//! ```
//! use promptform::validate::validate_required;
//!
//! let rule = validate_required("name");
//! assert!(rule("").is_err());
//! assert!(rule("John").is_ok());
//! ```

use std::fmt;

use crate::error::{FormError, Result};

/// Rejects empty or whitespace-only input with "`{name}` is required".
pub fn validate_required(name: &str) -> impl Fn(&str) -> Result<()> + Send + Sync + 'static {
    let message = format!("{name} is required");
    move |s: &str| {
        if s.trim().is_empty() {
            Err(FormError::validation(message.clone()))
        } else {
            Ok(())
        }
    }
}

/// Rejects input shorter than `min` characters.
pub fn validate_min_length(min: usize) -> impl Fn(&str) -> Result<()> + Send + Sync + 'static {
    move |s: &str| {
        if s.chars().count() < min {
            Err(FormError::validation(format!(
                "must be at least {min} characters"
            )))
        } else {
            Ok(())
        }
    }
}

/// Rejects input longer than `max` characters.
pub fn validate_max_length(max: usize) -> impl Fn(&str) -> Result<()> + Send + Sync + 'static {
    move |s: &str| {
        if s.chars().count() > max {
            Err(FormError::validation(format!(
                "must be at most {max} characters"
            )))
        } else {
            Ok(())
        }
    }
}

/// Checks for a plausible email address: one `@` with a dotted domain.
pub fn validate_email() -> impl Fn(&str) -> Result<()> + Send + Sync + 'static {
    |s: &str| {
        if s.is_empty() {
            return Err(FormError::validation("email is required"));
        }
        let Some((local, domain)) = s.split_once('@') else {
            return Err(FormError::validation("invalid email address"));
        };
        if local.is_empty() || domain.contains('@') || domain.split('.').count() < 2 {
            return Err(FormError::validation("invalid email address"));
        }
        if domain.split('.').any(str::is_empty) {
            return Err(FormError::validation("invalid email address"));
        }
        Ok(())
    }
}

/// Rejects values in `unavailable` with "`{value}` is not available".
pub fn validate_not_one_of<T>(unavailable: Vec<T>) -> impl Fn(&T) -> Result<()> + Send + Sync + 'static
where
    T: PartialEq + fmt::Display + Send + Sync + 'static,
{
    move |value: &T| {
        if unavailable.contains(value) {
            Err(FormError::validation(format!("{value} is not available")))
        } else {
            Ok(())
        }
    }
}

/// Requires at least one selected option.
pub fn validate_not_empty<T: 'static>() -> impl Fn(&[T]) -> Result<()> + Send + Sync + 'static {
    |values: &[T]| {
        if values.is_empty() {
            Err(FormError::validation("select at least one option"))
        } else {
            Ok(())
        }
    }
}
