pub mod dedent;
pub mod splitter;

use anyhow::{Result, bail};

use dedent::dedent;
use splitter::RawSlide;

/// How a slide's content is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Every line centered on its own.
    Center,
    /// The content centered as one rectangle, internal alignment kept.
    Block,
    /// Syntax-highlighted source, laid out like `Block`.
    Code,
    /// A path to a picture shown as the terminal background.
    Image,
    /// A title framed by a horizontal rule.
    Section,
}

impl Format {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "center" => Some(Self::Center),
            "block" => Some(Self::Block),
            "code" => Some(Self::Code),
            "image" => Some(Self::Image),
            "section" => Some(Self::Section),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Block => "block",
            Self::Code => "code",
            Self::Image => "image",
            Self::Section => "section",
        }
    }

    pub fn all() -> &'static [Format] {
        &[
            Format::Center,
            Format::Block,
            Format::Code,
            Format::Image,
            Format::Section,
        ]
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single slide. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    content: String,
    format: Format,
    args: Vec<String>,
}

impl Slide {
    fn new(format: Format, content: &str, args: Vec<String>) -> Self {
        let content = match format {
            Format::Image => content.trim().to_string(),
            _ => dedent(content),
        };
        Self {
            content,
            format,
            args,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format(&self) -> Format {
        self.format
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Language identifier of a code slide.
    pub fn language(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn is_image(&self) -> bool {
        self.format == Format::Image
    }
}

/// Collects slides through one entry point per format.
///
/// Each entry point strips the common indentation from its text exactly once,
/// so deck authors may indent slide bodies freely.
#[derive(Debug, Default)]
pub struct DeckBuilder {
    slides: Vec<Slide>,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(&mut self, content: &str) -> &mut Self {
        self.push(Slide::new(Format::Center, content, Vec::new()))
    }

    pub fn block(&mut self, content: &str) -> &mut Self {
        self.push(Slide::new(Format::Block, content, Vec::new()))
    }

    pub fn code(&mut self, content: &str, language: &str) -> &mut Self {
        self.push(Slide::new(
            Format::Code,
            content,
            vec![language.to_string()],
        ))
    }

    pub fn image(&mut self, path: &str) -> &mut Self {
        self.push(Slide::new(Format::Image, path, Vec::new()))
    }

    pub fn section(&mut self, title: &str) -> &mut Self {
        self.push(Slide::new(Format::Section, title, Vec::new()))
    }

    fn push(&mut self, slide: Slide) -> &mut Self {
        self.slides.push(slide);
        self
    }

    /// Hand over the collected slides. A deck without slides is an error.
    pub fn finish(self) -> Result<Vec<Slide>> {
        if self.slides.is_empty() {
            bail!("Deck contains no slides");
        }
        Ok(self.slides)
    }
}

/// Parse a deck file into its slides.
pub fn parse(source: &str) -> Result<Vec<Slide>> {
    let mut builder = DeckBuilder::new();
    for raw in splitter::split(source)? {
        add_slide(&mut builder, &raw)?;
    }
    builder.finish()
}

fn add_slide(builder: &mut DeckBuilder, raw: &RawSlide) -> Result<()> {
    let line = raw.line;
    let Some(format) = Format::from_name(&raw.name) else {
        let known: Vec<&str> = Format::all().iter().map(Format::name).collect();
        bail!(
            "line {line}: unknown slide format `@{}`. Expected one of: {}",
            raw.name,
            known.join(", ")
        );
    };

    if format == Format::Code {
        let Some(language) = raw.value.as_deref() else {
            bail!("line {line}: `@code` needs a language, e.g. `@code: rust`");
        };
        builder.code(&raw.body, language);
        return Ok(());
    }

    let content = match (&raw.value, raw.body.is_empty()) {
        (Some(value), true) => value.as_str(),
        (Some(_), false) => {
            bail!("line {line}: `@{format}` has both an inline value and a body")
        }
        (None, _) => raw.body.as_str(),
    };

    match format {
        Format::Center => builder.center(content),
        Format::Block => builder.block(content),
        Format::Section => builder.section(content),
        Format::Image => {
            if content.trim().is_empty() {
                bail!("line {line}: `@image` needs a path, e.g. `@image: photo.png`");
            }
            builder.image(content)
        }
        Format::Code => unreachable!("code slides handled above"),
    };
    Ok(())
}
