//! "Press any key to exit" pause for interactive sessions.

use std::io::{self, IsTerminal, Write};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

/// Prompt text shown before waiting.
pub const PAUSE_PROMPT: &str = "Press any key to exit!";

/// Whether a pause can be honoured: stdin and stdout must both be terminals.
#[must_use]
pub fn can_pause() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Print the prompt and block until a key is pressed.
///
/// Does nothing when [`can_pause`] is false, so scripted runs never hang.
///
/// # Errors
///
/// Returns an error if raw mode cannot be toggled or the terminal event
/// stream fails.
pub fn wait_for_keypress() -> io::Result<()> {
    if !can_pause() {
        log::debug!("Not a terminal, skipping pause");
        return Ok(());
    }

    let mut stdout = io::stdout();
    writeln!(stdout, "{PAUSE_PROMPT}")?;
    stdout.flush()?;

    terminal::enable_raw_mode()?;
    let result = read_key();
    terminal::disable_raw_mode()?;
    result
}

fn read_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
