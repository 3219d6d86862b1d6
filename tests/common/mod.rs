#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use docsum::client::{ApiResult, RemoteApi};
use docsum::*;
use tokio::sync::{Barrier, Mutex};

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn file(id: FileId, name: &str, secs: i64) -> FileRecord {
    FileRecord {
        id,
        file_name: name.to_string(),
        file_path: None,
        size_bytes: 1024,
        upload_date: at(secs),
    }
}

pub fn summary(id: SummaryId, file_ids: &[FileId], secs: i64) -> SummaryRecord {
    SummaryRecord {
        id,
        file_ids: file_ids.to_vec(),
        summary_text: format!("# Summary {}\n**bold** text", id),
        created_at: at(secs),
    }
}

pub fn pdf(name: &str) -> UploadFile {
    UploadFile::new(name, PDF_BYTES.to_vec())
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: Some(1),
        username: "ana".to_string(),
        full_name: "Ana Souza".to_string(),
        email: "ana@example.com".to_string(),
        description: "Reader".to_string(),
        profile_image_ref: None,
    }
}

/// In-memory backend that counts calls per endpoint.
pub struct FakeApi {
    pub files: Mutex<Vec<FileRecord>>,
    pub summaries: Mutex<Vec<SummaryRecord>>,
    pub profile: Mutex<UserProfile>,
    pub last_multi: Mutex<Option<MultiSummaryRequest>>,
    calls: Mutex<HashMap<&'static str, u32>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    failing_uploads: Mutex<HashSet<String>>,
    list_gate: Mutex<Option<Arc<Barrier>>>,
    list_delay: Mutex<Option<Duration>>,
}

impl FakeApi {
    pub fn new(files: Vec<FileRecord>, summaries: Vec<SummaryRecord>) -> Arc<Self> {
        Arc::new(Self {
            files: Mutex::new(files),
            summaries: Mutex::new(summaries),
            profile: Mutex::new(profile()),
            last_multi: Mutex::new(None),
            calls: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            failing_uploads: Mutex::new(HashSet::new()),
            list_gate: Mutex::new(None),
            list_delay: Mutex::new(None),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::new(), Vec::new())
    }

    pub async fn calls(&self, endpoint: &str) -> u32 {
        self.calls.lock().await.get(endpoint).copied().unwrap_or(0)
    }

    pub async fn total_calls(&self) -> u32 {
        self.calls.lock().await.values().sum()
    }

    pub async fn fail(&self, endpoint: &'static str, error: ApiError) {
        self.failures.lock().await.insert(endpoint, error);
    }

    pub async fn recover(&self, endpoint: &'static str) {
        self.failures.lock().await.remove(endpoint);
    }

    pub async fn fail_upload_of(&self, name: &str) {
        self.failing_uploads.lock().await.insert(name.to_string());
    }

    /// Both list endpoints wait for each other, so they only finish when
    /// issued concurrently.
    pub async fn require_concurrent_lists(&self) {
        *self.list_gate.lock().await = Some(Arc::new(Barrier::new(2)));
    }

    pub async fn slow_lists(&self, delay: Duration) {
        *self.list_delay.lock().await = Some(delay);
    }

    async fn enter(&self, endpoint: &'static str) -> ApiResult<()> {
        *self.calls.lock().await.entry(endpoint).or_insert(0) += 1;
        match self.failures.lock().await.get(endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn list_pause(&self) {
        let gate = self.list_gate.lock().await.clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        let delay = *self.list_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    async fn next_summary_id(&self) -> SummaryId {
        self.summaries.lock().await.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }
}

#[async_trait]
impl RemoteApi for FakeApi {
    async fn register(&self, registration: &Registration) -> ApiResult<RegisteredUser> {
        self.enter("register").await?;
        Ok(RegisteredUser {
            id: 7,
            full_name: registration.full_name.clone(),
            username: registration.username.clone(),
            email: registration.email.clone(),
        })
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<Token> {
        self.enter("login").await?;
        if credentials.password != "secret" {
            return Err(ApiError::Auth("Credenciais inválidas".into()));
        }
        Ok(Token { access_token: format!("token-for-{}", credentials.username), token_type: "bearer".into() })
    }

    async fn list_files(&self) -> ApiResult<Vec<FileRecord>> {
        self.enter("list_files").await?;
        self.list_pause().await;
        Ok(self.files.lock().await.clone())
    }

    async fn get_file(&self, id: FileId) -> ApiResult<FileRecord> {
        self.enter("get_file").await?;
        self.files
            .lock()
            .await
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Arquivo não encontrado".into()))
    }

    async fn upload_file(&self, upload: &UploadFile) -> ApiResult<FileRecord> {
        self.enter("upload_file").await?;
        if self.failing_uploads.lock().await.contains(&upload.name) {
            return Err(ApiError::Network("connection reset".into()));
        }
        let mut files = self.files.lock().await;
        let id = files.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        let record = FileRecord {
            id,
            file_name: upload.name.clone(),
            file_path: None,
            size_bytes: upload.bytes.len() as u64,
            upload_date: at(10_000 + id),
        };
        files.push(record.clone());
        Ok(record)
    }

    async fn download_file(&self, id: FileId) -> ApiResult<Download> {
        self.enter("download_file").await?;
        Ok(Download { file_name: format!("server-{}.pdf", id), bytes: PDF_BYTES.to_vec() })
    }

    async fn list_summaries(&self) -> ApiResult<Vec<SummaryRecord>> {
        self.enter("list_summaries").await?;
        self.list_pause().await;
        Ok(self.summaries.lock().await.clone())
    }

    async fn get_summary(&self, id: SummaryId) -> ApiResult<SummaryRecord> {
        self.enter("get_summary").await?;
        self.summaries
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Resumo não encontrado".into()))
    }

    async fn summarize_single(&self, file_id: FileId) -> ApiResult<SummaryRecord> {
        self.enter("summarize_single").await?;
        let record = summary(self.next_summary_id().await, &[file_id], 20_000);
        self.summaries.lock().await.push(record.clone());
        Ok(record)
    }

    async fn summarize_multi(&self, request: &MultiSummaryRequest) -> ApiResult<SummaryRecord> {
        self.enter("summarize_multi").await?;
        *self.last_multi.lock().await = Some(request.clone());
        let record = summary(self.next_summary_id().await, &request.file_ids, 30_000);
        self.summaries.lock().await.push(record.clone());
        Ok(record)
    }

    async fn get_profile(&self) -> ApiResult<UserProfile> {
        self.enter("get_profile").await?;
        Ok(self.profile.lock().await.clone())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        self.enter("update_profile").await?;
        let mut profile = self.profile.lock().await;
        profile.full_name = update.full_name.clone();
        profile.description = update.description.clone();
        Ok(profile.clone())
    }
}
