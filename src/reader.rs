use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::error::{ExtractError, Result, ScriptError};

/// Converts the bytes of one document format into a single text blob
pub trait TextExtractor {
    /// Lower-case file extensions this extractor accepts, without the dot
    fn extensions(&self) -> &'static [&'static str];

    fn extract(&self, bytes: &[u8]) -> std::result::Result<String, ExtractError>;
}

/// Word-processing documents (`.docx`).
///
/// Text layout follows the usual DOCX-to-text convention: every paragraph is
/// preceded by a blank line, so one empty paragraph in the document yields
/// four consecutive newlines. Tabs become `\t`, line and carriage breaks `\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    const DOCUMENT_PART: &'static str = "word/document.xml";

    /// Text of a `word/document.xml` part
    pub fn document_xml_to_text(xml: &str) -> std::result::Result<String, ExtractError> {
        let mut reader = Reader::from_str(xml);
        let mut text = String::with_capacity(xml.len() / 4);
        let mut in_text_run = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:p" => text.push_str("\n\n"),
                    b"w:t" => in_text_run = true,
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"w:p" => text.push_str("\n\n"),
                    b"w:tab" => text.push('\t'),
                    b"w:br" | b"w:cr" => text.push('\n'),
                    _ => {}
                },
                Event::End(e) => {
                    if e.name().as_ref() == b"w:t" {
                        in_text_run = false;
                    }
                }
                Event::Text(e) if in_text_run => {
                    text.push_str(&e.unescape()?);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(text.trim().to_string())
    }
}

impl TextExtractor for DocxExtractor {
    fn extensions(&self) -> &'static [&'static str] {
        &["docx"]
    }

    fn extract(&self, bytes: &[u8]) -> std::result::Result<String, ExtractError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let xml = {
            let mut part = archive.by_name(Self::DOCUMENT_PART)?;
            let mut content = String::new();
            part.read_to_string(&mut content)?;
            content
        };
        debug!("Read {} bytes of {}", xml.len(), Self::DOCUMENT_PART);
        Self::document_xml_to_text(&xml)
    }
}

/// Plain UTF-8 text exports; `\r\n` is normalized to `\n` and the result
/// trimmed like DOCX output
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extensions(&self) -> &'static [&'static str] {
        &["txt"]
    }

    fn extract(&self, bytes: &[u8]) -> std::result::Result<String, ExtractError> {
        let text = String::from_utf8(bytes.to_vec())?;
        Ok(text.replace("\r\n", "\n").trim().to_string())
    }
}

/// Extractors selectable by file extension
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    pub fn register(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Extractor for the extension of `path`, if any
    pub fn for_path(&self, path: &Path) -> Option<&dyn TextExtractor> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        self.extractors
            .iter()
            .find(|extractor| extractor.extensions().contains(&extension.as_str()))
            .map(|extractor| extractor.as_ref())
    }

    pub fn supported_extensions(&self) -> Vec<&'static str> {
        self.extractors
            .iter()
            .flat_map(|extractor| extractor.extensions().iter().copied())
            .collect()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::empty()
            .register(DocxExtractor)
            .register(PlainTextExtractor)
    }
}

/// Extracted script text together with where it came from
#[derive(Debug, Clone)]
pub struct RawScript {
    path: PathBuf,
    text: String,
}

impl RawScript {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// File stem, used as the report title
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Statistics for one load
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub chars_extracted: u64,
    pub duration_ms: u64,
}

/// Reject paths that do not exist, are not files, or have no extractor
pub fn validate_script_path<'r>(
    path: &Path,
    registry: &'r ExtractorRegistry,
) -> Result<&'r dyn TextExtractor> {
    let reject = |reason: String| ScriptError::InputNotFound {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(reject("file does not exist".to_string()));
    }
    if !path.is_file() {
        return Err(reject("path is not a regular file".to_string()));
    }
    registry.for_path(path).ok_or_else(|| {
        reject(format!(
            "unsupported extension; expected one of: {}",
            registry
                .supported_extensions()
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

/// Validate, read, and extract a script file
pub async fn load_script<P: AsRef<Path>>(
    file_path: P,
    registry: &ExtractorRegistry,
) -> Result<(RawScript, ReadStats)> {
    let path = file_path.as_ref();
    let start_time = std::time::Instant::now();

    let extractor = validate_script_path(path, registry)?;
    debug!("Starting read of script: {}", path.display());

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        warn!("Failed to read {}: {}", path.display(), e);
        ScriptError::Extraction {
            path: path.to_path_buf(),
            source: ExtractError::Io(e),
        }
    })?;

    let text = extractor
        .extract(&bytes)
        .map_err(|source| ScriptError::Extraction {
            path: path.to_path_buf(),
            source,
        })?;

    let stats = ReadStats {
        file_path: path.display().to_string(),
        bytes_read: bytes.len() as u64,
        chars_extracted: text.chars().count() as u64,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    info!(
        "Extracted {}: {} bytes -> {} characters in {}ms",
        path.display(),
        stats.bytes_read,
        stats.chars_extracted,
        stats.duration_ms
    );

    Ok((RawScript::new(path, text), stats))
}
