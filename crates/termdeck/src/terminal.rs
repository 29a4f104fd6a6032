//! The seam between the presentation loop and a real terminal.

use std::io::{self, Stdout, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use crate::input::{self, Token};
use crate::render::Viewport;

/// Everything the presentation loop needs from a terminal.
pub trait Console {
    /// Current size, queried fresh on every call.
    fn viewport(&mut self) -> Result<Viewport>;

    fn clear(&mut self) -> Result<()>;

    /// Show `image` as the terminal background, or remove it with `None`.
    fn set_background(&mut self, image: Option<&Path>) -> Result<()>;

    /// Write `text` one character at a time, pausing `delay` after each.
    fn write_paced(&mut self, text: &str, delay: Duration) -> Result<()>;

    /// Block until the next keypress.
    fn read_token(&mut self) -> Result<Token>;
}

/// Escape sequence asking iTerm2 to use a file as its background image.
/// An empty payload removes the current one.
pub fn background_sequence(image: Option<&Path>) -> String {
    let payload = image
        .map(|path| STANDARD.encode(path.to_string_lossy().as_bytes()))
        .unwrap_or_default();
    format!("\x1b]1337;SetBackgroundImageFile={payload}\x07")
}

/// The process's own terminal. The cursor is hidden while this is alive.
pub struct TerminalConsole {
    out: Stdout,
}

impl TerminalConsole {
    pub fn new() -> Result<Self> {
        let mut out = io::stdout();
        execute!(out, Hide).context("Failed to hide the cursor")?;
        Ok(Self { out })
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show);
    }
}

impl Console for TerminalConsole {
    fn viewport(&mut self) -> Result<Viewport> {
        let (cols, rows) = terminal::size().context("Failed to query the terminal size")?;
        Ok(Viewport::new(usize::from(rows), usize::from(cols)))
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()?;
        Ok(())
    }

    fn set_background(&mut self, image: Option<&Path>) -> Result<()> {
        self.out
            .write_all(background_sequence(image).as_bytes())
            .context("Failed to set the terminal background")?;
        self.out.flush()?;
        Ok(())
    }

    fn write_paced(&mut self, text: &str, delay: Duration) -> Result<()> {
        if delay.is_zero() {
            self.out.write_all(text.as_bytes())?;
            self.out.flush()?;
            return Ok(());
        }

        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            self.out.flush()?;
            thread::sleep(delay);
        }
        Ok(())
    }

    fn read_token(&mut self) -> Result<Token> {
        input::read_terminal_token()
    }
}
