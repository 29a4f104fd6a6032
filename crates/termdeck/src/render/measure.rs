//! Width measurement and centering arithmetic.
//!
//! Widths are counted in characters after removing the control sequences the
//! renderer itself produces: screen clear, cursor placement and the bold /
//! italic / reset styles emitted by plain code highlighting. Any other escape
//! sequence (256-color SGR for instance) is counted as visible text, so content
//! carrying it will be centered slightly off.

use std::sync::LazyLock;

use regex::Regex;

static CONTROL_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[(?:2J|H|\d+;\d+H|(?:0|1|3|22|23)?m)").expect("valid control regex")
});

/// Number of terminal columns a single line occupies.
pub fn visible_length(line: &str) -> usize {
    CONTROL_SEQUENCE.replace_all(line, "").chars().count()
}

/// Widest line of `content`. A final newline does not add an empty line.
pub fn content_width(content: &str) -> usize {
    content.lines().map(visible_length).max().unwrap_or(0)
}

pub fn line_count(content: &str) -> usize {
    content.lines().count()
}

/// 1-based start position that centers `size` cells on an axis of `axis`
/// cells. Odd leftovers round toward the start; never less than 1.
pub fn center_offset(axis: usize, size: usize) -> usize {
    let slack = axis as i64 - size as i64;
    (1 + slack.div_euclid(2)).max(1) as usize
}
