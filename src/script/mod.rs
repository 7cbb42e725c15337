// Structured representation of a podcast script: fixed front/back-matter and
// stage-direction sections followed by one section per speaker.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

pub mod segmenter;
pub mod text;

pub use segmenter::{segment, Phase, ScriptSegmenter};
pub use text::{is_upper, normalize_whitespace, preview};

/// Section identifier: a closed set of structural categories plus one open
/// variant per speaker
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    EpisodeInfo,
    ContentWarnings,
    Scenes,
    Actions,
    Speaker(String),
}

impl SectionKey {
    /// The four non-dialogue sections, in document-model order
    pub const STRUCTURAL: [SectionKey; 4] = [
        SectionKey::EpisodeInfo,
        SectionKey::ContentWarnings,
        SectionKey::Scenes,
        SectionKey::Actions,
    ];

    pub fn speaker(name: impl Into<String>) -> Self {
        SectionKey::Speaker(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionKey::EpisodeInfo => "episode_info",
            SectionKey::ContentWarnings => "content_warnings",
            SectionKey::Scenes => "scenes",
            SectionKey::Actions => "actions",
            SectionKey::Speaker(name) => name,
        }
    }

    pub fn is_speaker(&self) -> bool {
        matches!(self, SectionKey::Speaker(_))
    }

    /// Human-readable form used in progress messages ("episode info")
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ordered mapping from section to its text chunks in document order.
///
/// The four structural sections always exist and come first; speaker sections
/// follow in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScript {
    sections: Vec<(SectionKey, Vec<String>)>,
    index: HashMap<SectionKey, usize>,
}

impl ParsedScript {
    pub fn new() -> Self {
        let mut parsed = Self {
            sections: Vec::new(),
            index: HashMap::new(),
        };
        for key in SectionKey::STRUCTURAL {
            parsed.ensure(key);
        }
        parsed
    }

    /// Position of `key`, creating an empty section on first use
    pub fn ensure(&mut self, key: SectionKey) -> usize {
        if let Some(&position) = self.index.get(&key) {
            return position;
        }
        let position = self.sections.len();
        self.index.insert(key.clone(), position);
        self.sections.push((key, Vec::new()));
        position
    }

    pub fn push(&mut self, key: SectionKey, chunk: impl Into<String>) {
        let position = self.ensure(key);
        self.sections[position].1.push(chunk.into());
    }

    pub fn extend<I, S>(&mut self, key: SectionKey, chunks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let position = self.ensure(key);
        self.sections[position]
            .1
            .extend(chunks.into_iter().map(Into::into));
    }

    pub fn get(&self, key: &SectionKey) -> Option<&[String]> {
        self.index
            .get(key)
            .map(|&position| self.sections[position].1.as_slice())
    }

    pub fn contains(&self, key: &SectionKey) -> bool {
        self.index.contains_key(key)
    }

    /// All sections in order
    pub fn sections(&self) -> impl Iterator<Item = (&SectionKey, &[String])> {
        self.sections
            .iter()
            .map(|(key, chunks)| (key, chunks.as_slice()))
    }

    /// Speaker names in order of first appearance
    pub fn speakers(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter_map(|(key, _)| match key {
            SectionKey::Speaker(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn chunk_count(&self) -> usize {
        self.sections.iter().map(|(_, chunks)| chunks.len()).sum()
    }
}

impl Default for ParsedScript {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for ParsedScript {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (key, chunks) in &self.sections {
            map.serialize_entry(key.as_str(), chunks)?;
        }
        map.end()
    }
}
