//! Crossterm driver for a [`Form`].

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use promptform::{Form, KeyMsg, Runtime, TerminalHandoff, WindowSizeMsg};
use tracing::debug;

/// Puts the terminal into raw mode for its lifetime.
struct TerminalGuard {
    alt_screen: bool,
}

impl TerminalGuard {
    fn enter(alt_screen: bool) -> io::Result<Self> {
        setup(alt_screen)?;
        Ok(Self { alt_screen })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        teardown(self.alt_screen);
    }
}

fn setup(alt_screen: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if alt_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    execute!(stdout, Hide)
}

fn teardown(alt_screen: bool) {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show);
    if alt_screen {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    let _ = disable_raw_mode();
}

/// Hands the terminal to an external editor and back.
struct CrosstermHandoff {
    alt_screen: bool,
}

impl TerminalHandoff for CrosstermHandoff {
    fn release(&mut self) -> promptform::Result<()> {
        debug!("releasing terminal");
        teardown(self.alt_screen);
        Ok(())
    }

    fn restore(&mut self) -> promptform::Result<()> {
        debug!("restoring terminal");
        setup(self.alt_screen)?;
        Ok(())
    }
}

/// Runs `form` on the controlling terminal until it completes or aborts.
///
/// Returns the form so the caller can read its final state.
pub fn run(form: Form, alt_screen: bool) -> Result<Form> {
    let _guard = TerminalGuard::enter(alt_screen)?;
    let mut stdout = io::stdout();

    let mut runtime = Runtime::new(form).with_handoff(CrosstermHandoff { alt_screen });
    runtime.init()?;
    let (width, height) = terminal::size()?;
    runtime.dispatch(WindowSizeMsg { width, height })?;
    render(&mut stdout, &runtime)?;

    while !runtime.is_finished() {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                runtime.send(KeyMsg::from(key));
            }
            Event::Resize(width, height) => {
                runtime.send(WindowSizeMsg { width, height });
            }
            _ => continue,
        }
        let processed = runtime.run_until_idle()?;
        if processed > 0 {
            render(&mut stdout, &runtime)?;
        }
    }

    debug!(stats = ?runtime.stats(), "form finished");
    Ok(runtime.into_model())
}

fn render<W: Write>(writer: &mut W, runtime: &Runtime<Form>) -> io::Result<()> {
    let view = runtime.last_view().unwrap_or_default();
    execute!(writer, MoveTo(0, 0), Clear(ClearType::All))?;
    // Raw mode does not translate line feeds.
    write!(writer, "{}", view.replace('\n', "\r\n"))?;
    writer.flush()
}
