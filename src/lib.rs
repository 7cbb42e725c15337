pub mod error;
pub mod lexicon;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod script;

pub use error::{ExtractError, Result, ScriptError};

pub use script::{segment, ParsedScript, Phase, ScriptSegmenter, SectionKey};

pub use lexicon::{BuiltinLexicon, FileLexicon, Lexicon, LexiconProvider};

pub use scanner::{scan, ProfanityReport, ProfanityScanner, ScanConfig, SectionReport, Tally};

pub use reader::{load_script, DocxExtractor, ExtractorRegistry, PlainTextExtractor, RawScript, TextExtractor};

pub use report::{format_report, FormattedReport};

pub use pipeline::{analyze_script, analyze_text, ScriptAnalysis};

pub use output::{
    ensure_working_dir, generate_parsed_script_path, generate_report_json_path,
    generate_results_path, write_parsed_script, write_report_json, write_results,
};
