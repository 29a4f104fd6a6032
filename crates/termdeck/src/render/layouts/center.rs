use crate::render::measure::{center_offset, line_count, visible_length};
use crate::render::{Viewport, move_to};

/// Center every line horizontally on its own and the whole text vertically.
pub fn render(content: &str, viewport: Viewport) -> String {
    let top = center_offset(viewport.rows, line_count(content));
    let mut out = String::with_capacity(content.len() + 16 * line_count(content));
    for (i, line) in content.lines().enumerate() {
        let col = center_offset(viewport.cols, visible_length(line));
        move_to(&mut out, top + i, col);
        out.push_str(line);
    }
    out
}
