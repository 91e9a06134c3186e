//! Shared targets that receive confirmed field values.

use std::sync::Arc;

use parking_lot::Mutex;

/// A cloneable handle to a value written by a field on confirmation.
///
/// The caller keeps one clone and hands another to a field builder via
/// `bind`. The field reads the slot once to seed its working value and writes
/// it only when the user confirms a value that passes validation.
///
/// ```
/// use promptform::Slot;
///
/// let name = Slot::new(String::from("Glen"));
/// let handle = name.clone();
/// handle.set("Alex".to_string());
/// assert_eq!(name.get(), "Alex");
/// ```
#[derive(Debug, Default)]
pub struct Slot<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Slot<T> {
    /// Creates a slot holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Replaces the stored value.
    pub fn set(&self, value: T) {
        *self.inner.lock() = value;
    }

    /// Runs `f` with a reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl<T: Clone> Slot<T> {
    /// Returns a copy of the stored value.
    pub fn get(&self) -> T {
        self.inner.lock().clone()
    }
}

/// Callback invoked with a confirmed value.
pub(crate) type Commit<T> = Box<dyn FnMut(T) + Send + Sync>;

/// Builds the commit callback that stores into `slot`.
pub(crate) fn commit_into<T: Send + 'static>(slot: &Slot<T>) -> Commit<T> {
    let slot = slot.clone();
    Box::new(move |value| slot.set(value))
}
