// Error kinds for the script pipeline. Every variant is fatal to a run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, segmenting, scanning, or persisting a script
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The source path is missing, is not a file, or has no registered extractor
    #[error("Input script {path} rejected: {reason}")]
    InputNotFound { path: PathBuf, reason: String },

    /// The document text extractor failed on an existing file
    #[error("Failed to extract text from {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    /// The raw text lacks the structure the segmenter needs
    #[error("Malformed script: {reason}")]
    MalformedScript { reason: String },

    /// A dialogue block could not be attributed to any established speaker
    #[error("Dialogue block {block_index} has no current speaker: {text:?}")]
    UndefinedSpeaker { block_index: usize, text: String },

    /// The lexicon provider could not supply a usable word set
    #[error("Lexicon {origin} unusable: {reason}")]
    Lexicon { origin: String, reason: String },

    /// A lexicon entry or matched instance could not be compiled into a matcher
    #[error("Cannot build matcher for {literal:?}: {reason}")]
    Pattern { literal: String, reason: String },

    /// Writing a result file failed
    #[error("Failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Causes surfaced by a `TextExtractor`
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a valid DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ScriptError>;

impl ScriptError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ScriptError::MalformedScript {
            reason: reason.into(),
        }
    }
}
