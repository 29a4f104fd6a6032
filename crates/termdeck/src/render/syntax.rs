use anyhow::{Context, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::{
    Color, FontStyle, ScopeSelectors, Style, StyleModifier, Theme, ThemeItem, ThemeSet,
};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";

/// How highlighted code is styled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CodeStyle {
    /// Bold keywords and italic comments, no colors. Only emits sequences the
    /// layout measurement understands, so code blocks stay centered.
    #[default]
    Plain,
    /// A bundled syntect theme rendered with 256-color escapes.
    Theme(String),
}

impl CodeStyle {
    pub fn from_name(name: &str) -> Self {
        match name {
            "plain" => Self::Plain,
            other => Self::Theme(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Plain => "plain",
            Self::Theme(name) => name,
        }
    }

    /// Every name accepted by `from_name` that resolves to a theme.
    pub fn available() -> Vec<String> {
        let mut names = vec!["plain".to_string()];
        names.extend(ThemeSet::load_defaults().themes.into_keys());
        names
    }
}

/// Turns source code into terminal-styled text.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
    style: CodeStyle,
}

impl Highlighter {
    pub fn new(style: CodeStyle) -> Result<Self> {
        let theme = match &style {
            CodeStyle::Plain => monochrome_theme()?,
            CodeStyle::Theme(name) => {
                let mut themes = ThemeSet::load_defaults();
                themes.themes.remove(name).with_context(|| {
                    format!(
                        "Unknown code style: {name}. Available: {}",
                        CodeStyle::available().join(", ")
                    )
                })?
            }
        };
        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
            style,
        })
    }

    /// Highlight `code` as `language` (a name or file extension such as
    /// `rust`, `rb`, `py`). An unknown language is an error.
    pub fn highlight(&self, code: &str, language: &str) -> Result<String> {
        let syntax = self
            .syntaxes
            .find_syntax_by_token(language)
            .with_context(|| format!("Unknown code language: {language}"))?;

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut out = String::with_capacity(code.len() * 2);
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter
                .highlight_line(line, &self.syntaxes)
                .with_context(|| format!("Failed to highlight {language} code"))?;
            for (style, text) in ranges {
                self.push_styled(&mut out, style, text);
            }
        }
        Ok(out)
    }

    fn push_styled(&self, out: &mut String, style: Style, text: &str) {
        let (body, newline) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text, false),
        };

        if !body.is_empty() {
            let mut styled = false;
            if let CodeStyle::Theme(_) = self.style {
                out.push_str(&format!("\x1b[38;5;{}m", ansi256(style.foreground)));
                styled = true;
            }
            if style.font_style.contains(FontStyle::BOLD) {
                out.push_str(BOLD);
                styled = true;
            }
            if style.font_style.contains(FontStyle::ITALIC) {
                out.push_str(ITALIC);
                styled = true;
            }
            out.push_str(body);
            if styled {
                out.push_str(RESET);
            }
        }
        if newline {
            out.push('\n');
        }
    }
}

fn monochrome_theme() -> Result<Theme> {
    let rules = [
        ("comment", FontStyle::ITALIC),
        ("keyword, storage, entity.name.function", FontStyle::BOLD),
    ];

    let mut theme = Theme::default();
    for (selector, font_style) in rules {
        theme.scopes.push(ThemeItem {
            scope: selector.parse::<ScopeSelectors>()?,
            style: StyleModifier {
                font_style: Some(font_style),
                ..StyleModifier::default()
            },
        });
    }
    Ok(theme)
}

/// Nearest xterm-256 palette index for an RGB color.
fn ansi256(color: Color) -> u8 {
    let (r, g, b) = (color.r, color.g, color.b);
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            _ => 232 + ((u16::from(r) - 8) * 24 / 241) as u8,
        };
    }
    let level = |v: u8| ((u16::from(v) * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::measure::visible_length;

    const RUST: &str = "fn main() {\n    // hi\n    let x = 1;\n}\n";

    #[test]
    fn test_plain_style_marks_keywords_and_comments() {
        let highlighter = Highlighter::new(CodeStyle::Plain).unwrap();
        let out = highlighter.highlight(RUST, "rust").unwrap();
        assert!(out.contains(&format!("{BOLD}fn{RESET}")), "{out:?}");
        assert!(out.contains(ITALIC), "{out:?}");
        assert!(!out.contains("38;5;"), "{out:?}");
    }

    #[test]
    fn test_plain_style_keeps_visible_text() {
        let highlighter = Highlighter::new(CodeStyle::Plain).unwrap();
        let out = highlighter.highlight(RUST, "rust").unwrap();
        let widths: Vec<usize> = out.lines().map(visible_length).collect();
        let expected: Vec<usize> = RUST.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths, expected);
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_language_by_extension() {
        let highlighter = Highlighter::new(CodeStyle::Plain).unwrap();
        assert!(highlighter.highlight("def f\nend\n", "rb").is_ok());
        assert!(highlighter.highlight("x = 1\n", "python").is_ok());
    }

    #[test]
    fn test_unknown_language() {
        let highlighter = Highlighter::new(CodeStyle::Plain).unwrap();
        let err = highlighter.highlight("x", "no-such-lang").unwrap_err();
        assert!(err.to_string().contains("no-such-lang"), "{err}");
    }

    #[test]
    fn test_theme_style_uses_256_colors() {
        let style = CodeStyle::from_name("base16-ocean.dark");
        let highlighter = Highlighter::new(style).unwrap();
        let out = highlighter.highlight(RUST, "rust").unwrap();
        assert!(out.contains("\x1b[38;5;"), "{out:?}");
    }

    #[test]
    fn test_unknown_theme() {
        let err = Highlighter::new(CodeStyle::from_name("neon")).err().unwrap();
        assert!(err.to_string().contains("neon"), "{err}");
    }

    #[test]
    fn test_code_style_names() {
        assert_eq!(CodeStyle::from_name("plain"), CodeStyle::Plain);
        assert_eq!(CodeStyle::from_name("InspiredGitHub").name(), "InspiredGitHub");
        assert!(CodeStyle::available().contains(&"plain".to_string()));
    }

    #[test]
    fn test_ansi256() {
        assert_eq!(ansi256(Color { r: 0, g: 0, b: 0, a: 255 }), 16);
        assert_eq!(ansi256(Color { r: 255, g: 255, b: 255, a: 255 }), 231);
        assert_eq!(ansi256(Color { r: 255, g: 0, b: 0, a: 255 }), 196);
        assert_eq!(ansi256(Color { r: 0, g: 0, b: 255, a: 255 }), 21);
        let grey = ansi256(Color { r: 128, g: 128, b: 128, a: 255 });
        assert!((232..=255).contains(&grey));
    }
}
