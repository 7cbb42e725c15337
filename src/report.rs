// Human-readable rendering of a profanity report, with an ANSI-emphasized
// console variant and a plain variant for saving.

use crate::error::Result;
use crate::scanner::{ProfanityReport, WordMatcher};
use crate::script::ParsedScript;

pub const BOLD: &str = "\x1b[1m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const END: &str = "\x1b[0m";

const RULE: &str = "=====================";
const NOTHING_FOUND: &str = "No profane words could be found in the inputted script.";

/// Both renderings of one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedReport {
    /// Profane words wrapped in bold+underline escape sequences
    pub emphasized: String,
    /// Same text with every escape sequence removed
    pub plain: String,
}

/// Render `report` for the script titled `title`. Chunk text is looked up in
/// `parsed`, which must be the script the report was produced from.
pub fn format_report(
    report: &ProfanityReport,
    parsed: &ParsedScript,
    title: &str,
) -> Result<FormattedReport> {
    let mut lines = vec![format!("{RULE}\n{title}")];

    if !report.has_profanity() {
        lines.push(NOTHING_FOUND.to_string());
        let text = lines.join("\n");
        return Ok(FormattedReport {
            emphasized: text.clone(),
            plain: text,
        });
    }

    lines.push(format!("{RULE}\n{RULE}"));
    lines.push("Overall Profanity Statistics".to_string());
    lines.push(format!("Total number of swears: {}", report.total()));
    if let Some(most) = &report.most_profane {
        lines.push(format!(
            "Most profane (# of instances): {} ({})",
            most.section, most.count
        ));
    }
    lines.push(format!(
        "Overall count (# of instances): {}",
        report.overall.format_listing()
    ));
    lines.push(RULE.to_string());

    for section in report.flagged_sections() {
        let chunks = parsed.get(&section.key).unwrap_or_default();

        lines.push(RULE.to_string());
        lines.push(section.key.to_string());
        lines.push(format!("Overall count: {}", section.total()));
        lines.push(format!(
            "Profane words (# of instances): {}",
            section.tally.format_listing()
        ));
        lines.push("Occurrences in script:".to_string());
        for (index, words) in section.flagged_chunks() {
            let chunk = chunks.get(index).map(String::as_str).unwrap_or_default();
            lines.push(format!("-- {}", emphasize(chunk, words)?));
        }
    }

    let emphasized = lines.join("\n");
    let plain = strip_emphasis(&emphasized);
    Ok(FormattedReport { emphasized, plain })
}

/// Wrap every occurrence of the matched `words` in `chunk`, keeping the casing
/// each occurrence has in the text
pub fn emphasize(chunk: &str, words: &[String]) -> Result<String> {
    let open = format!("{BOLD}{UNDERLINE}");
    let mut text = chunk.to_string();

    let mut seen_words: Vec<&str> = Vec::new();
    for word in words {
        if seen_words.contains(&word.as_str()) {
            continue;
        }
        seen_words.push(word);

        let instances: Vec<String> = {
            let mut distinct: Vec<String> = Vec::new();
            for instance in WordMatcher::whole_word(word)?.instances(&text) {
                if !distinct.iter().any(|seen| seen == instance) {
                    distinct.push(instance.to_string());
                }
            }
            distinct
        };

        for instance in instances {
            text = WordMatcher::exact(&instance)?.wrap_all(&text, &open, END);
        }
    }

    Ok(text)
}

pub fn strip_emphasis(text: &str) -> String {
    text.replace(BOLD, "").replace(UNDERLINE, "").replace(END, "")
}
