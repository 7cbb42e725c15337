// Profane-word lexicons and the providers that supply them to the scanner.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, ScriptError};

const BUILTIN_WORD_LIST: &str = include_str!("../data/lexicon.txt");

/// Immutable set of lowercase profane words, iterated in sorted order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lexicon {
    origin: String,
    words: BTreeSet<String>,
}

impl Lexicon {
    /// Build from arbitrary words; entries are trimmed and lower-cased, empty ones dropped
    pub fn new<I, S>(origin: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self {
            origin: origin.into(),
            words,
        }
    }

    /// Parse a newline-separated word list; blank lines and `#` comments are skipped
    pub fn from_word_list(origin: impl Into<String>, list: &str) -> Self {
        Self::new(
            origin,
            list.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn empty() -> Self {
        Self::new("empty", std::iter::empty::<&str>())
    }

    /// Where the words came from (file path or "built-in")
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Source of the scan dictionary
pub trait LexiconProvider {
    fn load(&self) -> Result<Lexicon>;
}

/// Word list compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLexicon;

impl LexiconProvider for BuiltinLexicon {
    fn load(&self) -> Result<Lexicon> {
        let lexicon = Lexicon::from_word_list("built-in", BUILTIN_WORD_LIST);
        info!("Loaded built-in lexicon with {} words", lexicon.len());
        Ok(lexicon)
    }
}

/// Word list read from a file with `tokio::fs` when opened; `load` only parses
#[derive(Debug, Clone)]
pub struct FileLexicon {
    path: PathBuf,
    content: String,
}

impl FileLexicon {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ScriptError::Lexicon {
                origin: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { path, content })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LexiconProvider for FileLexicon {
    fn load(&self) -> Result<Lexicon> {
        let lexicon = Lexicon::from_word_list(self.path.display().to_string(), &self.content);
        if lexicon.is_empty() {
            return Err(ScriptError::Lexicon {
                origin: lexicon.origin,
                reason: "word list contains no entries".to_string(),
            });
        }
        info!("Loaded lexicon {} with {} words", lexicon.origin(), lexicon.len());
        Ok(lexicon)
    }
}
