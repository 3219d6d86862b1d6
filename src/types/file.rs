use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

pub type FileId = i64;

/// Largest document the backend accepts.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(rename = "file_size")]
    pub size_bytes: u64,
    #[serde(with = "super::timestamp")]
    pub upload_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentKind {
    Pdf,
    Other(String),
    Unknown,
}

pub struct DocumentKindDetector;

impl DocumentKindDetector {
    pub fn detect(data: &[u8]) -> DocumentKind {
        match infer::get(data) {
            Some(kind) if kind.mime_type() == "application/pdf" => DocumentKind::Pdf,
            Some(kind) => DocumentKind::Other(kind.mime_type().to_string()),
            None => DocumentKind::Unknown,
        }
    }
}

/// A local document queued for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::Precondition(format!("invalid file name: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { name, bytes })
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKindDetector::detect(&self.bytes)
    }

    /// PDF by extension and by content.
    pub fn is_pdf(&self) -> bool {
        let has_extension = Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        has_extension && self.kind() == DocumentKind::Pdf
    }

    pub fn exceeds_limit(&self) -> bool {
        self.bytes.len() > MAX_UPLOAD_BYTES
    }
}

/// Raw bytes of a stored document and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Writes the document into `dir`, appending ` (n)` before the extension
    /// instead of overwriting an existing file.
    pub async fn save_to(&self, dir: &Path) -> Result<std::path::PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let base = Path::new(&self.file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("download.pdf")
            .to_string();

        let (stem, ext) = match base.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{}", ext)),
            _ => (base.clone(), String::new()),
        };

        let mut target = dir.join(&base);
        let mut counter = 1;
        while tokio::fs::try_exists(&target).await? {
            target = dir.join(format!("{} ({}){}", stem, counter, ext));
            counter += 1;
        }

        tokio::fs::write(&target, &self.bytes).await?;
        Ok(target)
    }
}
