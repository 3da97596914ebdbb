use std::path::Path;

use bytes::Bytes;
use serde::Serialize;

use crate::errors::ValidationError;

/// Résumé formats the service can extract text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Text,
    Pdf,
}

impl FileKind {
    /// PDF wins when both a PDF and a text signal are present, so such files
    /// are sent for extraction rather than read as text.
    pub fn detect(name: &str, mime: &str) -> Option<Self> {
        if mime == "application/pdf" || name.ends_with(".pdf") {
            Some(FileKind::Pdf)
        } else if mime.starts_with("text") || name.ends_with(".txt") {
            Some(FileKind::Text)
        } else {
            None
        }
    }
}

/// A selected résumé file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        ResumeFile {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(ResumeFile::new(name, mime, bytes))
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::detect(&self.name, &self.mime)
    }

    pub fn require_kind(&self) -> Result<FileKind, ValidationError> {
        self.kind()
            .ok_or_else(|| ValidationError::UnsupportedFileType(self.name.clone()))
    }

    /// Text content, replacing invalid UTF-8.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
