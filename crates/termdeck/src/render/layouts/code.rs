use anyhow::{Context, Result};

use crate::parser::Slide;
use crate::render::RenderContext;
use crate::render::layouts::block;

/// Highlight the slide's source and lay it out as a block.
pub fn render(slide: &Slide, ctx: &RenderContext<'_>) -> Result<String> {
    let language = slide
        .language()
        .context("Code slide has no language")?;
    let highlighted = ctx.highlighter.highlight(slide.content(), language)?;
    Ok(block::render(&highlighted, ctx.viewport))
}
