use anyhow::{Result, bail};

/// One slide as it appears in the deck file, before format validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSlide {
    /// 1-based line number of the `@format` directive.
    pub line: usize,
    pub name: String,
    pub value: Option<String>,
    /// Body lines with surrounding blank lines removed, newline-terminated.
    /// Empty when the slide has no body.
    pub body: String,
}

/// Split a deck file into raw slides.
///
/// A line starting in column 0 with `@name` or `@name: value` opens a new
/// slide; everything up to the next such line is its body. Only blank lines
/// and `#` comments may precede the first directive.
pub fn split(source: &str) -> Result<Vec<RawSlide>> {
    let source = source.replace("\r\n", "\n");

    let mut slides: Vec<RawSlide> = Vec::new();
    let mut current: Option<(RawSlide, Vec<&str>)> = None;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;

        if let Some((name, value)) = parse_directive(line) {
            if let Some((slide, body)) = current.take() {
                slides.push(finish(slide, &body));
            }
            current = Some((
                RawSlide {
                    line: line_no,
                    name,
                    value,
                    body: String::new(),
                },
                Vec::new(),
            ));
            continue;
        }

        match current.as_mut() {
            Some((_, body)) => body.push(line),
            None => {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    bail!("line {line_no}: content before the first slide directive");
                }
            }
        }
    }

    if let Some((slide, body)) = current.take() {
        slides.push(finish(slide, &body));
    }

    Ok(slides)
}

fn finish(mut slide: RawSlide, body: &[&str]) -> RawSlide {
    let start = body.iter().position(|l| !l.trim().is_empty());
    let end = body.iter().rposition(|l| !l.trim().is_empty());
    if let (Some(start), Some(end)) = (start, end) {
        let mut text = body[start..=end].join("\n");
        text.push('\n');
        slide.body = text;
    }
    slide
}

/// Recognize `@name` or `@name: value` at the very start of a line.
fn parse_directive(line: &str) -> Option<(String, Option<String>)> {
    let rest = line.strip_prefix('@')?;
    if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let (name, value) = match rest.split_once(':') {
        Some((name, value)) => (name, Some(value.trim())),
        None => (rest, None),
    };
    let name = name.trim_end();
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }

    let value = value.filter(|v| !v.is_empty()).map(String::from);
    Some((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_directives() {
        let source = "@center\n  Hello\n\n@block\n  a\n  b\n";
        let slides = split(source).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].name, "center");
        assert_eq!(slides[0].line, 1);
        assert_eq!(slides[0].body, "  Hello\n");
        assert_eq!(slides[1].name, "block");
        assert_eq!(slides[1].line, 4);
        assert_eq!(slides[1].body, "  a\n  b\n");
    }

    #[test]
    fn test_inline_value() {
        let slides = split("@code: rust\nfn main() {}\n@section: Intro\n").unwrap();
        assert_eq!(slides[0].value.as_deref(), Some("rust"));
        assert_eq!(slides[0].body, "fn main() {}\n");
        assert_eq!(slides[1].value.as_deref(), Some("Intro"));
        assert!(slides[1].body.is_empty());
    }

    #[test]
    fn test_empty_inline_value_is_none() {
        let slides = split("@code:\n").unwrap();
        assert_eq!(slides[0].value, None);
    }

    #[test]
    fn test_inner_blank_lines_kept() {
        let slides = split("@block\n\n\none\n\ntwo\n\n\n").unwrap();
        assert_eq!(slides[0].body, "one\n\ntwo\n");
    }

    #[test]
    fn test_comments_before_first_slide() {
        let slides = split("# my deck\n\n# more\n@center\nhi\n").unwrap();
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_stray_text_before_first_slide() {
        let err = split("hello\n@center\nhi\n").unwrap_err();
        assert!(err.to_string().contains("line 1"), "{err}");
    }

    #[test]
    fn test_indented_at_is_body() {
        let slides = split("@block\n  @center\n").unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].body, "  @center\n");
    }

    #[test]
    fn test_email_like_line_is_body() {
        let slides = split("@center\n@ home\n").unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].body, "@ home\n");
    }

    #[test]
    fn test_crlf_normalized() {
        let slides = split("@center\r\nhi\r\n").unwrap();
        assert_eq!(slides[0].body, "hi\n");
    }
}
