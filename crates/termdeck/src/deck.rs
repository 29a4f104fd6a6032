use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::parser::{self, Slide};

/// Where a deck comes from. Evaluating it always yields a fresh slide list.
pub trait DeckSource {
    /// Modification stamp of the source; a change means the deck is stale.
    fn modified(&self) -> Result<SystemTime>;

    /// Build the full slide list from scratch.
    fn load(&self) -> Result<Vec<Slide>>;
}

/// A deck file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the deck's relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

impl DeckSource for FileSource {
    fn modified(&self) -> Result<SystemTime> {
        let metadata = std::fs::metadata(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        metadata
            .modified()
            .with_context(|| format!("No modification time for {}", self.path.display()))
    }

    fn load(&self) -> Result<Vec<Slide>> {
        rebuild_deck(&self.path)
    }
}

/// Read and parse a deck file into a brand-new slide list.
pub fn rebuild_deck(path: &Path) -> Result<Vec<Slide>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parser::parse(&content).with_context(|| format!("Failed to load deck {}", path.display()))
}

/// The slides currently being presented, and the source stamp they came from.
#[derive(Debug, Default)]
pub struct Deck {
    slides: Vec<Slide>,
    modified: Option<SystemTime>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the deck if the source changed since the last build (or was
    /// never built). Returns whether a rebuild happened.
    ///
    /// The slide list is replaced wholesale or not at all; a failed rebuild
    /// returns the error and is meant to end the presentation.
    pub fn ensure_fresh<S: DeckSource + ?Sized>(&mut self, source: &S) -> Result<bool> {
        let modified = source.modified()?;
        if self.modified == Some(modified) {
            return Ok(false);
        }

        debug!(?modified, "deck source changed");
        let slides = source.load()?;
        if slides.is_empty() {
            bail!("Deck contains no slides");
        }

        info!(slides = slides.len(), "deck loaded");
        self.slides = slides;
        self.modified = Some(modified);
        Ok(true)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs::File;
    use std::time::Duration;

    struct CountingSource {
        modified: Cell<SystemTime>,
        loads: Cell<usize>,
        deck: &'static str,
    }

    impl CountingSource {
        fn new(deck: &'static str) -> Self {
            Self {
                modified: Cell::new(SystemTime::UNIX_EPOCH),
                loads: Cell::new(0),
                deck,
            }
        }

        fn touch(&self) {
            self.modified.set(self.modified.get() + Duration::from_secs(1));
        }
    }

    impl DeckSource for CountingSource {
        fn modified(&self) -> Result<SystemTime> {
            Ok(self.modified.get())
        }

        fn load(&self) -> Result<Vec<Slide>> {
            self.loads.set(self.loads.get() + 1);
            parser::parse(self.deck)
        }
    }

    #[test]
    fn test_first_call_loads() {
        let source = CountingSource::new("@center\none\n@center\ntwo\n");
        let mut deck = Deck::new();
        assert!(deck.is_empty());
        assert!(deck.ensure_fresh(&source).unwrap());
        assert_eq!(deck.len(), 2);
        assert_eq!(source.loads.get(), 1);
    }

    #[test]
    fn test_unchanged_source_keeps_slides() {
        let source = CountingSource::new("@center\none\n");
        let mut deck = Deck::new();
        deck.ensure_fresh(&source).unwrap();
        let before = deck.slides().as_ptr();

        assert!(!deck.ensure_fresh(&source).unwrap());
        assert!(!deck.ensure_fresh(&source).unwrap());
        assert_eq!(source.loads.get(), 1);
        assert_eq!(deck.slides().as_ptr(), before);
    }

    #[test]
    fn test_changed_source_rebuilds() {
        let source = CountingSource::new("@center\none\n");
        let mut deck = Deck::new();
        deck.ensure_fresh(&source).unwrap();
        source.touch();
        assert!(deck.ensure_fresh(&source).unwrap());
        assert_eq!(source.loads.get(), 2);
    }

    #[test]
    fn test_failed_rebuild_propagates() {
        let source = CountingSource::new("@nonsense\n");
        let mut deck = Deck::new();
        assert!(deck.ensure_fresh(&source).is_err());
    }

    #[test]
    fn test_empty_load_is_an_error() {
        struct Empty;
        impl DeckSource for Empty {
            fn modified(&self) -> Result<SystemTime> {
                Ok(SystemTime::UNIX_EPOCH)
            }
            fn load(&self) -> Result<Vec<Slide>> {
                Ok(Vec::new())
            }
        }
        let mut deck = Deck::new();
        let err = deck.ensure_fresh(&Empty).unwrap_err();
        assert!(err.to_string().contains("no slides"), "{err}");
    }

    #[test]
    fn test_file_source_reloads_on_mtime_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.deck");
        std::fs::write(&path, "@center\none\n").unwrap();
        let source = FileSource::new(&path);
        assert_eq!(source.base_dir(), dir.path());

        let mut deck = Deck::new();
        assert!(deck.ensure_fresh(&source).unwrap());
        assert_eq!(deck.get(0).unwrap().content(), "one\n");
        assert!(!deck.ensure_fresh(&source).unwrap());

        std::fs::write(&path, "@center\none\n@section: two\n").unwrap();
        let later = SystemTime::now() + Duration::from_secs(60);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        assert!(deck.ensure_fresh(&source).unwrap());
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let source = FileSource::new("/no/such/deck.deck");
        let mut deck = Deck::new();
        let err = deck.ensure_fresh(&source).unwrap_err();
        assert!(err.to_string().contains("/no/such/deck.deck"), "{err}");
    }

    #[test]
    fn test_rebuild_deck_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.deck");
        std::fs::write(&path, "stray\n").unwrap();
        let err = rebuild_deck(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.deck"), "{err:#}");
    }

    #[test]
    fn test_base_dir_of_bare_file_name() {
        let source = FileSource::new("talk.deck");
        assert_eq!(source.base_dir(), Path::new(""));
        assert_eq!(source.path(), Path::new("talk.deck"));
    }
}
