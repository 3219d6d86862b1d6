use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::client::RemoteApi;
use crate::error::ApiError;
use crate::notice::Notice;
use crate::selection::SelectionController;
use crate::sync::{LoadOutcome, Synchronizer, ViewState};
use crate::types::{Download, FileId, FileRecord, MultiSummaryRequest, SummaryRecord, UploadFile};
use crate::{AppError, Result};

/// Focus sent with a consolidated summary when the user leaves it blank.
pub const DEFAULT_FOCUS_PROMPT: &str =
    "Summarize the key points of these documents in a single consolidated overview.";

/// A consolidated summary needs at least this many files.
pub const MIN_CONSOLIDATED_FILES: usize = 2;

#[derive(Debug, Clone)]
pub struct UploadFailure {
    pub name: String,
    pub error: ApiError,
}

/// Per-file outcome of a batch upload.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<FileRecord>,
    pub failed: Vec<UploadFailure>,
    pub duplicates: Vec<String>,
    pub invalid: Vec<String>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.duplicates.len() + self.invalid.len()
    }

    pub fn notice(&self) -> Notice {
        if !self.failed.is_empty() {
            let names: Vec<&str> = self.failed.iter().map(|f| f.name.as_str()).collect();
            return Notice {
                level: crate::notice::Level::Error,
                title: "Upload failed".to_string(),
                message: format!(
                    "{} of {} file(s) failed: {}",
                    self.failed.len(),
                    self.failed.len() + self.uploaded.len(),
                    names.join(", ")
                ),
                disposition: Some(crate::error::Disposition::Retry),
            };
        }
        let mut message = format!("{} new file(s) uploaded.", self.uploaded.len());
        if self.skipped() > 0 {
            message.push_str(&format!(
                " Skipped {} duplicate(s) and {} invalid file(s).",
                self.duplicates.len(),
                self.invalid.len()
            ));
        }
        Notice::success("Upload finished", message)
    }
}

/// The file list: upload, download, local hiding and multi-select.
pub struct FilesScreen {
    api: Arc<dyn RemoteApi>,
    sync: Synchronizer<Vec<FileRecord>>,
    selection: SelectionController,
}

impl FilesScreen {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            api,
            sync: Synchronizer::new("files"),
            selection: SelectionController::new(),
        }
    }

    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let api = Arc::clone(&self.api);
        let outcome = self.sync.load(async move { api.list_files().await }).await?;
        let visible = self.visible_ids();
        self.selection.retain_visible(visible);
        Ok(outcome)
    }

    pub fn state(&self) -> &ViewState<Vec<FileRecord>> {
        self.sync.state()
    }

    pub fn files(&self) -> &[FileRecord] {
        self.sync.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn visible_ids(&self) -> Vec<FileId> {
        self.files().iter().map(|f| f.id).collect()
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Flips selection of a listed file; unknown ids are ignored.
    pub fn toggle(&mut self, id: FileId) {
        if self.files().iter().any(|f| f.id == id) {
            self.selection.toggle(id);
        }
    }

    pub fn toggle_all(&mut self) {
        let visible = self.visible_ids();
        self.selection.toggle_all(visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Removes a file from this view only. The backend keeps it, so the next
    /// load brings it back.
    pub fn hide(&mut self, id: FileId) -> bool {
        let mut removed = false;
        self.sync.update(|files| {
            let before = files.len();
            files.retain(|f| f.id != id);
            removed = files.len() != before;
        });
        if removed {
            if self.selection.contains(id) {
                self.selection.toggle(id);
            }
            tracing::debug!(file_id = id, "file hidden from list");
        }
        removed
    }

    /// Uploads the PDFs among `candidates` concurrently, one request per file.
    ///
    /// Non-PDFs, oversized files and names already listed (or repeated in the
    /// batch) are skipped without a request. Successful uploads are appended
    /// to the list.
    pub async fn upload(&mut self, candidates: Vec<UploadFile>) -> Result<UploadReport> {
        let cached = self
            .sync
            .data()
            .ok_or_else(|| AppError::Precondition("file list is not loaded".into()))?;
        let mut known: HashSet<String> = cached.iter().map(|f| f.file_name.clone()).collect();

        let mut report = UploadReport::default();
        let mut accepted = Vec::new();
        for file in candidates {
            if !file.is_pdf() || file.exceeds_limit() {
                report.invalid.push(file.name);
            } else if !known.insert(file.name.clone()) {
                report.duplicates.push(file.name);
            } else {
                accepted.push(file);
            }
        }

        if report.skipped() > 0 {
            tracing::info!(
                duplicates = report.duplicates.len(),
                invalid = report.invalid.len(),
                "skipped files before upload"
            );
        }
        if accepted.is_empty() {
            return Ok(report);
        }

        let api = Arc::clone(&self.api);
        let results = join_all(accepted.iter().map(|file| api.upload_file(file))).await;
        for (file, result) in accepted.iter().zip(results) {
            match result {
                Ok(record) => report.uploaded.push(record),
                Err(error) => {
                    tracing::warn!(name = %file.name, error = %error, "upload failed");
                    report.failed.push(UploadFailure { name: file.name.clone(), error });
                }
            }
        }

        let uploaded = report.uploaded.clone();
        self.sync.update(|files| files.extend(uploaded));
        Ok(report)
    }

    /// Fetches a listed file's bytes, named after the cached record.
    pub async fn download(&self, id: FileId) -> Result<Download> {
        let cached_name = self
            .files()
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.file_name.clone());
        let mut download = self.api.download_file(id).await?;
        if let Some(name) = cached_name {
            download.file_name = name;
        }
        Ok(download)
    }

    /// Requests one consolidated summary over the selected files. A blank
    /// `focus` is replaced by [`DEFAULT_FOCUS_PROMPT`].
    pub async fn summarize_selected(&mut self, focus: &str) -> Result<SummaryRecord> {
        let content = match focus.trim() {
            "" => DEFAULT_FOCUS_PROMPT.to_string(),
            text => text.to_string(),
        };
        let api = Arc::clone(&self.api);
        self.selection
            .run_batch_action(MIN_CONSOLIDATED_FILES, move |file_ids| async move {
                api.summarize_multi(&MultiSummaryRequest { file_ids, content }).await
            })
            .await
    }

    pub fn lifetime(&self) -> CancellationToken {
        self.sync.lifetime()
    }

    /// Leaves the screen: pending loads are dropped and the selection cleared.
    pub fn close(&mut self) {
        self.sync.close();
        self.selection.clear();
    }
}
