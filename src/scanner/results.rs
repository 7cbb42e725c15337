use serde::Serialize;

use super::tally::Tally;
use crate::script::SectionKey;

/// Profanity found in one section of a parsed script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub key: SectionKey,
    /// Positions of chunks holding at least one profane word
    pub indices: Vec<usize>,
    /// Profane words found in each flagged chunk, one entry per occurrence
    pub occurrences: Vec<Vec<String>>,
    pub tally: Tally,
}

impl SectionReport {
    pub fn new(key: SectionKey) -> Self {
        Self {
            key,
            indices: Vec::new(),
            occurrences: Vec::new(),
            tally: Tally::new(),
        }
    }

    pub fn is_flagged(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn total(&self) -> usize {
        self.tally.total()
    }

    /// `(chunk index, words found)` pairs for flagged chunks
    pub fn flagged_chunks(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.indices
            .iter()
            .copied()
            .zip(self.occurrences.iter().map(Vec::as_slice))
    }
}

/// Section with the highest occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostProfane {
    pub section: SectionKey,
    pub count: usize,
}

/// Scan result for a whole script, sections in `ParsedScript` order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfanityReport {
    pub sections: Vec<SectionReport>,
    pub overall: Tally,
    pub most_profane: Option<MostProfane>,
}

impl ProfanityReport {
    pub fn section(&self, key: &SectionKey) -> Option<&SectionReport> {
        self.sections.iter().find(|section| &section.key == key)
    }

    pub fn flagged_sections(&self) -> impl Iterator<Item = &SectionReport> {
        self.sections.iter().filter(|section| section.is_flagged())
    }

    pub fn total(&self) -> usize {
        self.overall.total()
    }

    pub fn has_profanity(&self) -> bool {
        !self.overall.is_empty()
    }
}
