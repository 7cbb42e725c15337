// One script end to end: load, segment, scan, format.

use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::error::Result;
use crate::lexicon::{Lexicon, LexiconProvider};
use crate::reader::{load_script, ExtractorRegistry, RawScript};
use crate::report::{format_report, FormattedReport};
use crate::scanner::{ProfanityReport, ProfanityScanner, ScanConfig};
use crate::script::{ParsedScript, ScriptSegmenter};

/// Everything produced for one script
#[derive(Debug, Clone)]
pub struct ScriptAnalysis {
    pub title: String,
    pub parsed: ParsedScript,
    pub report: ProfanityReport,
    pub formatted: FormattedReport,
}

/// Segment, scan, and format already-extracted text
pub fn analyze_text(
    title: &str,
    raw_text: &str,
    lexicon: &Lexicon,
    config: ScanConfig,
) -> Result<ScriptAnalysis> {
    let parsed = ScriptSegmenter::with_default_rules().segment(raw_text)?;
    info!(
        "Segmented {}: {} sections, {} speakers, {} chunks",
        title,
        parsed.section_count(),
        parsed.speakers().count(),
        parsed.chunk_count()
    );

    let report = ProfanityScanner::new(lexicon, config)?.scan(&parsed);
    let formatted = format_report(&report, &parsed, title)?;

    Ok(ScriptAnalysis {
        title: title.to_string(),
        parsed,
        report,
        formatted,
    })
}

/// Load the file at `path` and analyze it. Nothing is written to disk.
pub async fn analyze_script<P: AsRef<Path>>(
    path: P,
    registry: &ExtractorRegistry,
    lexicon: &dyn LexiconProvider,
    config: ScanConfig,
) -> Result<ScriptAnalysis> {
    let start_time = Instant::now();

    let (raw, _stats): (RawScript, _) = load_script(path, registry).await?;
    let lexicon = lexicon.load()?;
    info!("Using lexicon {} ({} words)", lexicon.origin(), lexicon.len());

    let analysis = analyze_text(&raw.title(), raw.text(), &lexicon, config)?;
    info!(
        "Analysis of {} complete in {}ms: {} occurrences",
        analysis.title,
        start_time.elapsed().as_millis(),
        analysis.report.total()
    );
    Ok(analysis)
}
