pub mod layouts;
pub mod measure;
pub mod syntax;

use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::Command;
use crossterm::cursor::MoveTo;

use crate::parser::{Format, Slide};

use syntax::Highlighter;

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

/// Everything a layout may consult besides the slide itself.
pub struct RenderContext<'a> {
    pub viewport: Viewport,
    /// Directory relative image paths are resolved against.
    pub base_dir: &'a Path,
    pub highlighter: &'a Highlighter,
}

/// Output of rendering one slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Cursor placements and text, ready to write to the terminal.
    Text(String),
    /// Absolute path of a picture to show as the terminal background.
    Background(PathBuf),
}

/// Render a single slide according to its format.
pub fn render_slide(slide: &Slide, ctx: &RenderContext<'_>) -> Result<Rendered> {
    let content = slide.content();
    let rendered = match slide.format() {
        Format::Center => Rendered::Text(layouts::center::render(content, ctx.viewport)),
        Format::Block => Rendered::Text(layouts::block::render(content, ctx.viewport)),
        Format::Section => Rendered::Text(layouts::section::render(content, ctx.viewport)),
        Format::Code => Rendered::Text(layouts::code::render(slide, ctx)?),
        Format::Image => Rendered::Background(layouts::image::resolve(content, ctx.base_dir)?),
    };
    Ok(rendered)
}

/// Append a cursor placement to a 1-based `row`/`col`.
pub(crate) fn move_to(out: &mut String, row: usize, col: usize) {
    let row = u16::try_from(row.saturating_sub(1)).unwrap_or(u16::MAX);
    let col = u16::try_from(col.saturating_sub(1)).unwrap_or(u16::MAX);
    MoveTo(col, row).write_ansi(out).expect("write to String");
}
