// Lexicon scan over a parsed script: per-chunk whole-word matching, per-section
// tallies, an overall tally, and the most profane section.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::script::{ParsedScript, SectionKey};

pub mod matcher;
pub mod results;
pub mod tally;

pub use matcher::WordMatcher;
pub use results::{MostProfane, ProfanityReport, SectionReport};
pub use tally::Tally;

/// Which sections to scan and how to report progress
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Sections left out of the scan
    pub ignore: HashSet<SectionKey>,
    /// Draw a progress bar per scanned section
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore: SectionKey::STRUCTURAL.into_iter().collect(),
            show_progress: false,
        }
    }
}

impl ScanConfig {
    /// Dialogue only
    pub fn dialogue_only() -> Self {
        Self::default()
    }

    /// Every section, stage directions and front matter included
    pub fn scan_all() -> Self {
        Self {
            ignore: HashSet::new(),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Lexicon compiled into per-word matchers
pub struct ProfanityScanner {
    matchers: Vec<WordMatcher>,
    config: ScanConfig,
}

impl ProfanityScanner {
    pub fn new(lexicon: &Lexicon, config: ScanConfig) -> Result<Self> {
        let matchers = lexicon
            .iter()
            .map(WordMatcher::whole_word)
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "Compiled {} matchers from lexicon {}",
            matchers.len(),
            lexicon.origin()
        );
        Ok(Self { matchers, config })
    }

    /// Lexicon words found in `chunk`, one entry per occurrence, in lexicon order
    pub fn find_in_chunk(&self, chunk: &str) -> Vec<String> {
        let mut found = Vec::new();
        for matcher in &self.matchers {
            let occurrences = matcher.count(chunk);
            found.extend(std::iter::repeat(matcher.literal().to_string()).take(occurrences));
        }
        found
    }

    pub fn scan(&self, parsed: &ParsedScript) -> ProfanityReport {
        let mut report = ProfanityReport::default();

        for (key, chunks) in parsed.sections() {
            let mut section = SectionReport::new(key.clone());
            if self.config.ignore.contains(key) {
                report.sections.push(section);
                continue;
            }

            info!("Analyzing {} text for profanity...", key.display_name());
            let progress = self.progress_bar(key, chunks.len());
            for (index, chunk) in chunks.iter().enumerate() {
                let found = self.find_in_chunk(chunk);
                if !found.is_empty() {
                    section.indices.push(index);
                    section.occurrences.push(found);
                }
                progress.inc(1);
            }
            progress.finish_and_clear();

            section.tally = section.occurrences.iter().flatten().collect();
            report.overall.merge(&section.tally);

            let count = section.total();
            let leader = report.most_profane.as_ref().map_or(0, |most| most.count);
            if count > leader {
                report.most_profane = Some(MostProfane {
                    section: key.clone(),
                    count,
                });
            }

            debug!(
                section = %key,
                flagged_chunks = section.indices.len(),
                occurrences = count,
                "Section scanned"
            );
            report.sections.push(section);
        }

        info!(
            "Scan complete: {} occurrences across {} flagged sections",
            report.total(),
            report.flagged_sections().count()
        );
        report
    }

    fn progress_bar(&self, key: &SectionKey, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let progress = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("█▓▒░"));
        progress.set_message(key.display_name());
        progress
    }
}

/// Scan `parsed` against `lexicon` in one call
pub fn scan(parsed: &ParsedScript, lexicon: &Lexicon, config: ScanConfig) -> Result<ProfanityReport> {
    Ok(ProfanityScanner::new(lexicon, config)?.scan(parsed))
}
