use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::RemoteApi;
use crate::error::ApiError;
use crate::sync::{derive_recent, file_names, summary_title, LoadOutcome, Order, Synchronizer, ViewState};
use crate::types::{FileId, SummaryId, SummaryRecord};
use crate::Result;

#[derive(Debug, Clone)]
pub struct SummariesData {
    /// Newest first.
    pub summaries: Vec<SummaryRecord>,
    pub names: HashMap<FileId, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub id: SummaryId,
    pub title: String,
    pub preview: String,
    pub consolidated: bool,
}

pub struct SummariesScreen {
    api: Arc<dyn RemoteApi>,
    sync: Synchronizer<SummariesData>,
}

impl SummariesScreen {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self { api, sync: Synchronizer::new("summaries") }
    }

    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let api = Arc::clone(&self.api);
        self.sync
            .load(async move {
                let (summaries, files) = tokio::try_join!(api.list_summaries(), api.list_files())?;
                let summaries =
                    derive_recent(&summaries, summaries.len(), |s| s.created_at, Order::Descending);
                Ok::<_, ApiError>(SummariesData { summaries, names: file_names(&files) })
            })
            .await
    }

    pub fn state(&self) -> &ViewState<SummariesData> {
        self.sync.state()
    }

    pub fn entries(&self) -> Vec<SummaryEntry> {
        let Some(data) = self.sync.data() else {
            return Vec::new();
        };
        data.summaries
            .iter()
            .map(|s| SummaryEntry {
                id: s.id,
                title: summary_title(s, &data.names),
                preview: preview(&s.summary_text),
                consolidated: s.is_consolidated(),
            })
            .collect()
    }

    pub fn get(&self, id: SummaryId) -> Option<&SummaryRecord> {
        self.sync.data()?.summaries.iter().find(|s| s.id == id)
    }

    /// The source document of a single-file summary.
    pub fn source_file(&self, id: SummaryId) -> Option<FileId> {
        match self.get(id)?.file_ids.as_slice() {
            [file_id] => Some(*file_id),
            _ => None,
        }
    }

    /// Cancelling this token closes the screen while a load is pending.
    pub fn lifetime(&self) -> CancellationToken {
        self.sync.lifetime()
    }

    pub fn close(&self) {
        self.sync.close();
    }
}

/// Summary text with markdown markers removed.
pub fn preview(text: &str) -> String {
    let plain: String = text.chars().filter(|c| !matches!(c, '#' | '*' | '`')).collect();
    let plain = plain.trim();
    if plain.is_empty() {
        "No content...".to_string()
    } else {
        plain.to_string()
    }
}
