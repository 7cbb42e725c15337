// Saved artifacts: the plain-text report, the JSON scan report, and the JSON
// dump of the parsed script.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

use crate::error::{Result, ScriptError};
use crate::scanner::ProfanityReport;
use crate::script::ParsedScript;

pub const RESULTS_FILE_NAME: &str = "results.txt";
pub const PARSED_SCRIPT_FILE_NAME: &str = "parsed_script.json";
pub const REPORT_JSON_FILE_NAME: &str = "report.json";

pub fn generate_results_path<P: AsRef<Path>>(working_dir: P) -> PathBuf {
    working_dir.as_ref().join(RESULTS_FILE_NAME)
}

pub fn generate_parsed_script_path<P: AsRef<Path>>(working_dir: P) -> PathBuf {
    working_dir.as_ref().join(PARSED_SCRIPT_FILE_NAME)
}

pub fn generate_report_json_path<P: AsRef<Path>>(working_dir: P) -> PathBuf {
    working_dir.as_ref().join(REPORT_JSON_FILE_NAME)
}

fn output_error(path: &Path) -> impl FnOnce(std::io::Error) -> ScriptError + '_ {
    move |source| ScriptError::Output {
        path: path.to_path_buf(),
        source,
    }
}

/// Create `working_dir` and any missing parents
pub async fn ensure_working_dir<P: AsRef<Path>>(working_dir: P) -> Result<()> {
    let dir = working_dir.as_ref();
    fs::create_dir_all(dir).await.map_err(output_error(dir))
}

async fn write_buffered(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let file = File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content).await?;
    if !content.ends_with(b"\n") {
        writer.write_all(b"\n").await?;
    }
    writer.flush().await
}

/// Write the plain report to `<working_dir>/results.txt`, replacing any previous run
pub async fn write_results<P: AsRef<Path>>(working_dir: P, plain_report: &str) -> Result<PathBuf> {
    let path = generate_results_path(working_dir);
    write_buffered(&path, plain_report.as_bytes())
        .await
        .map_err(output_error(&path))?;
    info!("Saved profanity results to {}", path.display());
    Ok(path)
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)
        .map_err(|e| output_error(path)(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    write_buffered(path, &json).await.map_err(output_error(path))
}

/// Write `parsed` as an ordered JSON object to `<working_dir>/parsed_script.json`
pub async fn write_parsed_script<P: AsRef<Path>>(
    working_dir: P,
    parsed: &ParsedScript,
) -> Result<PathBuf> {
    let path = generate_parsed_script_path(working_dir);
    write_json(&path, parsed).await?;
    info!(
        "Saved parsed script ({} sections) to {}",
        parsed.section_count(),
        path.display()
    );
    Ok(path)
}

/// Write the structured scan result to `<working_dir>/report.json`
pub async fn write_report_json<P: AsRef<Path>>(
    working_dir: P,
    report: &ProfanityReport,
) -> Result<PathBuf> {
    let path = generate_report_json_path(working_dir);
    write_json(&path, report).await?;
    info!(
        "Saved JSON report ({} occurrences) to {}",
        report.total(),
        path.display()
    );
    Ok(path)
}
