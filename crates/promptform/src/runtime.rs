//! Driving a model without a terminal.
//!
//! [`Runtime`] owns a [`Model`], feeds it messages one at a time and executes
//! the commands it returns, so that every message produced by a command goes
//! through `update` before the next queued message is looked at.
//! [`Msg::Sequence`] children are drained in order, each one completely,
//! before the next sibling runs.
//!
//! The same loop backs unit tests (feed keys, inspect views) and real
//! terminal drivers, which plug in a [`TerminalHandoff`] so that commands
//! created with [`Cmd::exec`] get the terminal while they run. When the
//! terminal cannot be released the command is skipped and its
//! [`Cmd::on_handoff_error`] message is applied in its place.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::command::Cmd;
use crate::error::Result;
use crate::message::Msg;

/// The Elm-style model interface.
pub trait Model: Send {
    /// Initialize the model and return an optional startup command.
    fn init(&mut self) -> Option<Cmd>;

    /// Process a message and return a new command.
    fn update(&mut self, msg: Msg) -> Option<Cmd>;

    /// Render the model as a string for display.
    fn view(&self) -> String;
}

/// Releases the terminal to an external program and takes it back.
pub trait TerminalHandoff {
    /// Leave raw mode and any alternate screen.
    fn release(&mut self) -> Result<()>;

    /// Re-enter the mode that was active before [`TerminalHandoff::release`].
    fn restore(&mut self) -> Result<()>;
}

/// Counters collected while running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Number of times `update()` was called.
    pub update_calls: usize,
    /// Number of commands executed.
    pub commands_executed: usize,
    /// Whether a quit message was seen.
    pub quit_requested: bool,
}

/// Message loop for a [`Model`].
///
/// # Example
///
/// ```rust
/// use promptform::{Cmd, Model, Msg, Runtime};
///
/// struct Counter(u32);
///
/// impl Model for Counter {
///     fn init(&mut self) -> Option<Cmd> {
///         None
///     }
///     fn update(&mut self, msg: Msg) -> Option<Cmd> {
///         if matches!(msg, Msg::NextField) {
///             self.0 += 1;
///         }
///         None
///     }
///     fn view(&self) -> String {
///         self.0.to_string()
///     }
/// }
///
/// let mut rt = Runtime::new(Counter(0));
/// rt.send(Msg::NextField);
/// rt.send(Msg::NextField);
/// rt.run_until_idle().unwrap();
/// assert_eq!(rt.last_view(), Some("2"));
/// ```
pub struct Runtime<M: Model> {
    model: M,
    queue: VecDeque<Msg>,
    views: Vec<String>,
    stats: RuntimeStats,
    initialized: bool,
    handoff: Option<Box<dyn TerminalHandoff>>,
}

impl<M: Model> Runtime<M> {
    /// Create a new runtime around `model`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            views: Vec::new(),
            stats: RuntimeStats::default(),
            initialized: false,
            handoff: None,
        }
    }

    /// Install the hook used around terminal-owning commands.
    pub fn with_handoff(mut self, handoff: impl TerminalHandoff + 'static) -> Self {
        self.handoff = Some(Box::new(handoff));
        self
    }

    /// Call `init()` once and run the command it returns.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;
        let cmd = self.model.init();
        self.views.push(self.model.view());
        self.run(cmd)
    }

    /// Queue a message for processing.
    pub fn send(&mut self, msg: impl Into<Msg>) {
        self.queue.push_back(msg.into());
    }

    /// Process one queued message together with everything it triggers.
    ///
    /// Returns `false` when the queue was empty or the model has quit.
    pub fn step(&mut self) -> Result<bool> {
        self.init()?;
        if self.stats.quit_requested {
            self.queue.clear();
            return Ok(false);
        }
        match self.queue.pop_front() {
            Some(msg) => {
                self.apply(msg)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Process queued messages until the queue is empty or the model quits.
    ///
    /// Returns the number of queued messages processed.
    pub fn run_until_idle(&mut self) -> Result<usize> {
        let mut processed = 0;
        while self.step()? {
            processed += 1;
        }
        Ok(processed)
    }

    /// Queue `msg` and process everything pending.
    pub fn dispatch(&mut self, msg: impl Into<Msg>) -> Result<()> {
        self.send(msg);
        self.run_until_idle().map(|_| ())
    }

    fn apply(&mut self, msg: Msg) -> Result<()> {
        if self.stats.quit_requested {
            return Ok(());
        }
        match msg {
            Msg::Sequence(cmds) => {
                trace!(len = cmds.len(), "draining sequence");
                for cmd in cmds {
                    if self.stats.quit_requested {
                        break;
                    }
                    self.run(Some(cmd))?;
                }
                Ok(())
            }
            Msg::Quit => {
                self.stats.quit_requested = true;
                self.stats.update_calls += 1;
                // The model sees the quit so it can settle its final state.
                let _ = self.model.update(Msg::Quit);
                self.views.push(self.model.view());
                Ok(())
            }
            msg => {
                self.stats.update_calls += 1;
                let cmd = self.model.update(msg);
                self.views.push(self.model.view());
                self.run(cmd)
            }
        }
    }

    fn run(&mut self, cmd: Option<Cmd>) -> Result<()> {
        let Some(cmd) = cmd else {
            return Ok(());
        };
        self.stats.commands_executed += 1;

        let handoff = match self.handoff.as_mut() {
            Some(handoff) if cmd.needs_terminal() => handoff,
            _ => return self.deliver(cmd.execute()),
        };

        if let Err(err) = handoff.release() {
            warn!(%err, "terminal release failed, command skipped");
            if let Err(err) = handoff.restore() {
                warn!(%err, "terminal restore failed");
            }
            let msg = cmd.handoff_failed(err)?;
            return self.apply(msg);
        }
        let msg = cmd.execute();
        let restored = handoff.restore();
        // The model must see the result even when the terminal is not back.
        self.deliver(msg)?;
        restored
    }

    fn deliver(&mut self, msg: Option<Msg>) -> Result<()> {
        match msg {
            Some(msg) => self.apply(msg),
            None => Ok(()),
        }
    }

    /// Returns whether the model asked to quit.
    pub fn is_finished(&self) -> bool {
        self.stats.quit_requested
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consume the runtime and return the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Get the collected statistics.
    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    /// Every view rendered so far, oldest first.
    pub fn views(&self) -> &[String] {
        &self.views
    }

    /// The most recent view.
    pub fn last_view(&self) -> Option<&str> {
        self.views.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::command::{quit, sequence};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    impl Model for Recorder {
        fn init(&mut self) -> Option<Cmd> {
            None
        }

        fn update(&mut self, msg: Msg) -> Option<Cmd> {
            self.seen.push(format!("{msg:?}"));
            match msg {
                Msg::NextField => sequence(vec![
                    Some(Cmd::msg(Msg::NextGroup)),
                    Some(Cmd::msg(Msg::UpdatePositions)),
                ]),
                Msg::NextGroup => Some(Cmd::msg(Msg::PrevField)),
                Msg::PrevGroup => Some(quit()),
                _ => None,
            }
        }

        fn view(&self) -> String {
            self.seen.len().to_string()
        }
    }

    #[test]
    fn test_sequence_children_drain_depth_first() {
        let mut rt = Runtime::new(Recorder::default());
        rt.dispatch(Msg::NextField).unwrap();
        assert_eq!(
            rt.model().seen,
            vec!["NextField", "NextGroup", "PrevField", "UpdatePositions"]
        );
    }

    #[test]
    fn test_quit_stops_processing() {
        let mut rt = Runtime::new(Recorder::default());
        rt.send(Msg::PrevGroup);
        rt.send(Msg::NextField);
        assert_eq!(rt.run_until_idle().unwrap(), 1);
        assert!(rt.is_finished());
        assert_eq!(rt.model().seen, vec!["PrevGroup", "Quit"]);
    }

    #[test]
    fn test_views_recorded() {
        let mut rt = Runtime::new(Recorder::default());
        rt.init().unwrap();
        rt.dispatch(Msg::UpdatePositions).unwrap();
        assert_eq!(rt.views(), ["0", "1"]);
        assert_eq!(rt.stats().update_calls, 1);
    }

    struct Handoff(Arc<Mutex<Vec<&'static str>>>);

    impl TerminalHandoff for Handoff {
        fn release(&mut self) -> Result<()> {
            self.0.lock().push("release");
            Ok(())
        }

        fn restore(&mut self) -> Result<()> {
            self.0.lock().push("restore");
            Ok(())
        }
    }

    struct Exec;

    impl Model for Exec {
        fn init(&mut self) -> Option<Cmd> {
            None
        }

        fn update(&mut self, msg: Msg) -> Option<Cmd> {
            match msg {
                Msg::NextField => Some(Cmd::exec(|| Msg::UpdatePositions)),
                Msg::PrevField => Some(Cmd::msg(Msg::UpdatePositions)),
                _ => None,
            }
        }

        fn view(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_handoff_wraps_exec_commands_only() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut rt = Runtime::new(Exec).with_handoff(Handoff(Arc::clone(&log)));
        rt.dispatch(Msg::PrevField).unwrap();
        assert!(log.lock().is_empty());
        rt.dispatch(Msg::NextField).unwrap();
        assert_eq!(*log.lock(), vec!["release", "restore"]);
    }

    struct NoTerminal;

    impl TerminalHandoff for NoTerminal {
        fn release(&mut self) -> Result<()> {
            Err(crate::error::FormError::io("no tty"))
        }

        fn restore(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_release_failure_without_fallback_is_returned() {
        let mut rt = Runtime::new(Exec).with_handoff(NoTerminal);
        let err = rt.dispatch(Msg::NextField).unwrap_err();
        assert_eq!(err, crate::error::FormError::io("no tty"));
        assert_eq!(rt.stats().update_calls, 1);
    }
}
