use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::RemoteApi;
use crate::error::ApiError;
use crate::sync::{summary_for_file, LoadOutcome, Synchronizer, ViewState};
use crate::types::{Download, FileId, FileRecord, SummaryRecord};
use crate::{AppError, Result};

#[derive(Debug, Clone)]
pub struct FileDetailData {
    pub file: FileRecord,
    /// The file's own summary; consolidated summaries are not shown here.
    pub summary: Option<SummaryRecord>,
}

pub struct FileDetail {
    api: Arc<dyn RemoteApi>,
    file_id: FileId,
    sync: Synchronizer<FileDetailData>,
}

impl FileDetail {
    pub fn new(api: Arc<dyn RemoteApi>, file_id: FileId) -> Self {
        Self { api, file_id, sync: Synchronizer::new("file detail") }
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    /// Fetches the metadata and the summary list concurrently and picks the
    /// summary of this file alone.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let api = Arc::clone(&self.api);
        let file_id = self.file_id;
        self.sync
            .load(async move {
                let (file, summaries) = tokio::try_join!(api.get_file(file_id), api.list_summaries())?;
                let summary = summary_for_file(&summaries, file_id).cloned();
                Ok::<_, ApiError>(FileDetailData { file, summary })
            })
            .await
    }

    pub fn state(&self) -> &ViewState<FileDetailData> {
        self.sync.state()
    }

    pub fn summary(&self) -> Option<&SummaryRecord> {
        self.sync.data().and_then(|data| data.summary.as_ref())
    }

    pub async fn generate_summary(&mut self) -> Result<SummaryRecord> {
        match self.sync.data() {
            None => return Err(AppError::Precondition("file is not loaded".into())),
            Some(data) if data.summary.is_some() => {
                return Err(AppError::Precondition("this file already has a summary".into()))
            }
            Some(_) => {}
        }

        let summary = self.api.summarize_single(self.file_id).await?;
        let stored = summary.clone();
        self.sync.update(|data| data.summary = Some(stored));
        tracing::info!(file_id = self.file_id, summary_id = summary.id, "summary generated");
        Ok(summary)
    }

    pub async fn download(&self) -> Result<Download> {
        let data = self
            .sync
            .data()
            .ok_or_else(|| AppError::Precondition("file is not loaded".into()))?;
        let mut download = self.api.download_file(self.file_id).await?;
        download.file_name = data.file.file_name.clone();
        Ok(download)
    }

    /// Cancelling this token closes the screen while a load is pending.
    pub fn lifetime(&self) -> CancellationToken {
        self.sync.lifetime()
    }

    pub fn close(&self) {
        self.sync.close();
    }
}
