use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::deck::{Deck, DeckSource, FileSource};
use crate::input::Token;
use crate::parser::Slide;
use crate::render::syntax::{CodeStyle, Highlighter};
use crate::render::{self, RenderContext, Rendered};
use crate::terminal::{Console, TerminalConsole};

/// Pause between characters of the typewriter reveal.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1);

const PAGE_UP: &[u8] = b"\x1b[5~";
const PAGE_DOWN: &[u8] = b"\x1b[6~";

/// What a keypress asks the presentation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    Quit,
    /// Anything unrecognized: draw the current slide again.
    Repaint,
}

impl Command {
    pub fn from_token(token: &Token) -> Self {
        match token.as_bytes() {
            b" " | b"n" | b"l" | b"k" | PAGE_DOWN => Self::Next,
            b"b" | b"p" | b"h" | b"j" | PAGE_UP => Self::Previous,
            b"^" => Self::First,
            b"$" => Self::Last,
            b"q" => Self::Quit,
            _ => Self::Repaint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Position in the deck and the slide shown last.
#[derive(Debug, Default)]
struct State {
    index: usize,
    previous: Option<Slide>,
}

impl State {
    fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    fn apply(&mut self, command: Command, len: usize) -> Flow {
        match command {
            Command::Next => self.index = self.index.saturating_add(1),
            Command::Previous => self.index = self.index.saturating_sub(1),
            Command::First => self.index = 0,
            Command::Last => self.index = len.saturating_sub(1),
            Command::Quit => return Flow::Quit,
            Command::Repaint => {}
        }
        self.clamp(len);
        Flow::Continue
    }
}

/// Settings for one presentation run.
#[derive(Debug, Clone)]
pub struct Options {
    pub delay: Duration,
    /// Zero-based slide to open on; clamped to the deck.
    pub start_slide: usize,
    pub code_style: CodeStyle,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            start_slide: 0,
            code_style: CodeStyle::Plain,
        }
    }
}

/// Runs a deck: reload when stale, draw the current slide, wait for a key.
pub struct Presentation<'a, S: ?Sized, C> {
    source: &'a S,
    console: C,
    highlighter: Highlighter,
    base_dir: PathBuf,
    delay: Duration,
    deck: Deck,
    state: State,
}

impl<'a, S: DeckSource + ?Sized, C: Console> Presentation<'a, S, C> {
    pub fn new(source: &'a S, base_dir: &Path, console: C, options: Options) -> Result<Self> {
        Ok(Self {
            source,
            console,
            highlighter: Highlighter::new(options.code_style)?,
            base_dir: base_dir.to_path_buf(),
            delay: options.delay,
            deck: Deck::new(),
            state: State {
                index: options.start_slide,
                previous: None,
            },
        })
    }

    /// Present until the quit key is pressed. Any failure ends the run.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? == Flow::Continue {}
        info!(slide = self.state.index, "presentation finished");
        Ok(())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn index(&self) -> usize {
        self.state.index
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn console(&self) -> &C {
        &self.console
    }

    fn step(&mut self) -> Result<Flow> {
        if self.state.previous.as_ref().is_some_and(Slide::is_image) {
            self.console.set_background(None)?;
        }
        self.console.clear()?;

        if self.deck.ensure_fresh(self.source)? {
            debug!(slides = self.deck.len(), "deck replaced");
        }
        self.state.clamp(self.deck.len());
        let slide = self
            .deck
            .get(self.state.index)
            .cloned()
            .context("Deck has no slides")?;

        let ctx = RenderContext {
            viewport: self.console.viewport()?,
            base_dir: &self.base_dir,
            highlighter: &self.highlighter,
        };
        debug!(
            slide = self.state.index,
            format = %slide.format(),
            rows = ctx.viewport.rows,
            cols = ctx.viewport.cols,
            "rendering"
        );
        match render::render_slide(&slide, &ctx)? {
            Rendered::Text(text) => self.console.write_paced(&text, self.delay)?,
            Rendered::Background(path) => self.console.set_background(Some(&path))?,
        }

        let token = self.console.read_token()?;
        let command = Command::from_token(&token);
        trace!(?token, ?command, "key");

        if self.state.apply(command, self.deck.len()) == Flow::Quit {
            if slide.is_image() {
                self.console.set_background(None)?;
            }
            self.console.clear()?;
            return Ok(Flow::Quit);
        }
        self.state.previous = Some(slide);
        Ok(Flow::Continue)
    }
}

/// Present the deck at `file` in this terminal.
pub fn run(file: PathBuf, start_slide: Option<usize>, delay: Option<Duration>) -> Result<()> {
    let config = Config::load_or_default();
    let defaults = config.defaults.unwrap_or_default();

    let options = Options {
        delay: delay
            .or_else(|| defaults.delay.map(Duration::from_millis))
            .unwrap_or(DEFAULT_DELAY),
        start_slide: start_slide.map(|s| s.saturating_sub(1)).unwrap_or(0),
        code_style: defaults
            .code_style
            .as_deref()
            .map(CodeStyle::from_name)
            .unwrap_or_default(),
    };
    info!(file = %file.display(), ?options, "starting presentation");

    let source = FileSource::new(file);
    // Fail before taking over the screen when the deck is unusable
    crate::deck::rebuild_deck(source.path())?;

    let console = TerminalConsole::new()?;
    let mut presentation = Presentation::new(&source, source.base_dir(), console, options)?;
    presentation.run()
}
