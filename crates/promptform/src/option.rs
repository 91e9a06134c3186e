//! Options for select and multi-select fields.

use std::fmt;

/// An option for select fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<T> {
    /// Display label.
    pub key: String,
    /// The underlying value.
    pub value: T,
    /// Whether this option is preselected.
    pub selected: bool,
}

impl<T> SelectOption<T> {
    /// Creates a new option.
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
            selected: false,
        }
    }

    /// Sets whether this option is preselected.
    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Case-insensitive substring match of the label against `filter`.
    pub fn matches(&self, filter: &str) -> bool {
        filter.is_empty() || self.key.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Creates options whose label and value are the same string.
pub fn new_options<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Vec<SelectOption<String>> {
    values
        .into_iter()
        .map(|v| {
            let s = v.into();
            SelectOption::new(s.clone(), s)
        })
        .collect()
}

/// Creates options labelled with each value's `Display` form.
pub fn options_from_values<T: fmt::Display>(values: impl IntoIterator<Item = T>) -> Vec<SelectOption<T>> {
    values
        .into_iter()
        .map(|v| SelectOption::new(v.to_string(), v))
        .collect()
}
