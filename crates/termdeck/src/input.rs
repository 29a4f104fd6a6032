//! Keystroke capture.
//!
//! A token is one byte, or four bytes when the first one is ESC. Page Up
//! (`ESC [ 5 ~`) and Page Down (`ESC [ 6 ~`) fit that shape; other escape
//! sequences (arrow keys are three bytes) get misread, which surfaces as an
//! unknown token and a repaint.

use std::io::{self, Read};

use anyhow::{Context, Result};
use crossterm::terminal;

pub const ESC: u8 = 0x1b;

/// Raw bytes of one keypress, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(Vec<u8>);

impl Token {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Read a single token from `reader`.
pub fn read_token<R: Read>(reader: &mut R) -> io::Result<Token> {
    let mut first = [0u8; 1];
    reader.read_exact(&mut first)?;
    let mut bytes = first.to_vec();
    if first[0] == ESC {
        let mut rest = [0u8; 3];
        reader.read_exact(&mut rest)?;
        bytes.extend_from_slice(&rest);
    }
    Ok(Token(bytes))
}

/// Read one token from the terminal with echo and line buffering switched off
/// for the duration of the read.
pub fn read_terminal_token() -> Result<Token> {
    let _guard = RawModeGuard::acquire().context("Failed to enable raw terminal mode")?;
    let mut stdin = io::stdin().lock();
    read_token(&mut stdin).context("Failed to read from the terminal")
}

struct RawModeGuard;

impl RawModeGuard {
    /// Enable terminal raw mode and return a guard that disables it on drop.
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
