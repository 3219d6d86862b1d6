use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::RemoteApi;
use crate::error::ApiError;
use crate::sync::{derive_recent, LoadOutcome, Order, Synchronizer, ViewState};
use crate::types::{FileRecord, SummaryRecord};
use crate::Result;

use super::RECENT_COUNT;

#[derive(Debug, Clone)]
pub struct DashboardData {
    pub files: Vec<FileRecord>,
    pub summaries: Vec<SummaryRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_files: usize,
    pub total_summaries: usize,
}

pub struct Dashboard {
    api: Arc<dyn RemoteApi>,
    sync: Synchronizer<DashboardData>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self { api, sync: Synchronizer::new("dashboard") }
    }

    /// Fetches files and summaries concurrently.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let api = Arc::clone(&self.api);
        self.sync
            .load(async move {
                let (files, summaries) = tokio::try_join!(api.list_files(), api.list_summaries())?;
                Ok::<_, ApiError>(DashboardData { files, summaries })
            })
            .await
    }

    pub fn state(&self) -> &ViewState<DashboardData> {
        self.sync.state()
    }

    pub fn stats(&self) -> Option<DashboardStats> {
        self.sync.data().map(|data| DashboardStats {
            total_files: data.files.len(),
            total_summaries: data.summaries.len(),
        })
    }

    pub fn recent_files(&self) -> Vec<FileRecord> {
        self.sync
            .data()
            .map(|data| derive_recent(&data.files, RECENT_COUNT, |f| f.upload_date, Order::Descending))
            .unwrap_or_default()
    }

    pub fn recent_summaries(&self) -> Vec<SummaryRecord> {
        self.sync
            .data()
            .map(|data| derive_recent(&data.summaries, RECENT_COUNT, |s| s.created_at, Order::Descending))
            .unwrap_or_default()
    }

    /// Cancelling this token closes the screen while a load is pending.
    pub fn lifetime(&self) -> CancellationToken {
        self.sync.lifetime()
    }

    pub fn close(&self) {
        self.sync.close();
    }
}
