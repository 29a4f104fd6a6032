/// Strip the leading whitespace shared by every non-blank line.
///
/// Blank (whitespace-only) lines don't take part in computing the common
/// indentation; they lose at most that much leading whitespace. A trailing
/// newline is preserved.
pub fn dedent(text: &str) -> String {
    let indent = common_indent(text);
    if indent.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if let Some(rest) = line.strip_prefix(indent) {
            out.push_str(rest);
        } else {
            // Only blank lines can miss the prefix
            let trimmed = line.trim_start_matches([' ', '\t']);
            out.push_str(trimmed);
        }
    }
    out
}

fn common_indent(text: &str) -> &str {
    let mut common: Option<&str> = None;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        let indent = &line[..width];
        common = Some(match common {
            None => indent,
            Some(prev) => shared_prefix(prev, indent),
        });
    }
    common.unwrap_or("")
}

fn shared_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
