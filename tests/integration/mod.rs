// Shared helpers for integration tests: temp workspaces and in-memory DOCX builds.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Temporary directory holding scripts and run outputs
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Write a plain-text script
    pub fn create_script_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write script file");
        file_path
    }

    /// Write a DOCX whose paragraphs are the `\n\n`-separated paragraphs of
    /// `text`; an empty paragraph separates blocks
    pub fn create_docx<P: AsRef<Path>>(&self, relative_path: P, text: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        fs::write(&file_path, docx_from_text(text)).expect("Failed to write docx file");
        file_path
    }

    pub fn path<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        self.root_path.join(relative_path)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `word/document.xml` with one `w:p` per paragraph
pub fn document_xml(text: &str) -> String {
    let paragraphs: String = text
        .split("\n\n")
        .map(|paragraph| {
            if paragraph.is_empty() {
                "<w:p/>".to_string()
            } else {
                format!(
                    "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
                    escape_xml(paragraph)
                )
            }
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{paragraphs}</w:body></w:document>"
    )
}

pub fn docx_from_text(text: &str) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
        .expect("Failed to start content types entry");
    zip.write_all(b"<?xml version=\"1.0\"?><Types/>")
        .expect("Failed to write content types");
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .expect("Failed to start document entry");
    zip.write_all(document_xml(text).as_bytes())
        .expect("Failed to write document xml");
    zip.finish().expect("Failed to finish docx archive").into_inner()
}
