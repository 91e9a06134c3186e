//! Deferred commands.
//!
//! A [`Cmd`] is a unit of work whose execution is delegated to the
//! environment and whose result re-enters the form as a [`Msg`]. Update
//! functions stay pure: they return commands instead of performing effects.

use std::fmt;

use crate::error::FormError;
use crate::message::Msg;

type Fallback = Box<dyn FnOnce(FormError) -> Msg + Send + 'static>;

/// A command that produces at most one message when executed.
///
/// # Example
///
/// ```rust
/// use promptform::{Cmd, Msg};
///
/// let cmd = Cmd::msg(Msg::NextField);
/// assert!(matches!(cmd.execute(), Some(Msg::NextField)));
/// ```
pub struct Cmd {
    run: Box<dyn FnOnce() -> Option<Msg> + Send + 'static>,
    exec: bool,
    fallback: Option<Fallback>,
}

impl Cmd {
    /// Create a new command from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        Self::new_optional(move || Some(f()))
    }

    /// Create a command that may not produce a message.
    pub fn new_optional<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<Msg> + Send + 'static,
    {
        Self {
            run: Box::new(f),
            exec: false,
            fallback: None,
        }
    }

    /// Create a command that simply yields `msg`.
    pub fn msg(msg: Msg) -> Self {
        Self::new(move || msg)
    }

    /// Create a command that runs an external program in the foreground.
    ///
    /// Drivers must hand the terminal over (leave raw mode and the alternate
    /// screen) before executing it and take it back afterwards.
    pub fn exec<F>(f: F) -> Self
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        Self {
            run: Box::new(move || Some(f())),
            exec: true,
            fallback: None,
        }
    }

    /// Sets the message reported instead of running the command when the
    /// terminal cannot be handed over.
    #[must_use]
    pub fn on_handoff_error<F>(mut self, f: F) -> Self
    where
        F: FnOnce(FormError) -> Msg + Send + 'static,
    {
        self.fallback = Some(Box::new(f));
        self
    }

    /// Abandons the command because the terminal could not be handed over.
    ///
    /// Returns the fallback message, or `err` when no fallback was set.
    pub fn handoff_failed(self, err: FormError) -> Result<Msg, FormError> {
        match self.fallback {
            Some(fallback) => Ok(fallback(err)),
            None => Err(err),
        }
    }

    /// Returns whether this command needs the terminal while it runs.
    pub fn needs_terminal(&self) -> bool {
        self.exec
    }

    /// Execute the command and return the resulting message.
    pub fn execute(self) -> Option<Msg> {
        (self.run)()
    }
}

impl fmt::Debug for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cmd")
            .field("exec", &self.exec)
            .finish_non_exhaustive()
    }
}

/// Sequence commands to run one at a time, in order.
///
/// The resulting command yields a [`Msg::Sequence`]. Drivers execute each
/// child, feed its message back through `update`, and fully drain whatever
/// that produces before moving to the next child.
pub fn sequence(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let valid: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid.len() {
        0 => None,
        1 => valid.into_iter().next(),
        _ => Some(Cmd::msg(Msg::Sequence(valid))),
    }
}

/// Command that signals the environment to end the session.
pub fn quit() -> Cmd {
    Cmd::msg(Msg::Quit)
}
