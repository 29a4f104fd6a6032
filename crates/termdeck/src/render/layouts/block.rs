use crate::render::measure::{center_offset, content_width, line_count};
use crate::render::{Viewport, move_to};

/// Center the content as one rectangle. All lines share the left column, so
/// internal alignment is preserved verbatim.
pub fn render(content: &str, viewport: Viewport) -> String {
    let col = center_offset(viewport.cols, content_width(content));
    let top = center_offset(viewport.rows, line_count(content));
    let mut out = String::with_capacity(content.len() + 16 * line_count(content));
    for (i, line) in content.lines().enumerate() {
        move_to(&mut out, top + i, col);
        out.push_str(line);
    }
    out
}
