//! Remote resource client: typed access to the summarization backend.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    Credentials, Download, FileId, FileRecord, MultiSummaryRequest, ProfileUpdate, RegisteredUser,
    Registration, SummaryId, SummaryRecord, Token, UploadFile, UserProfile,
};

mod http;

pub use http::HttpClient;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Every operation the backend exposes. Implementations attach the current
/// session token themselves and perform no caching.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn register(&self, registration: &Registration) -> ApiResult<RegisteredUser>;
    async fn login(&self, credentials: &Credentials) -> ApiResult<Token>;

    async fn list_files(&self) -> ApiResult<Vec<FileRecord>>;
    async fn get_file(&self, id: FileId) -> ApiResult<FileRecord>;
    async fn upload_file(&self, file: &UploadFile) -> ApiResult<FileRecord>;
    async fn download_file(&self, id: FileId) -> ApiResult<Download>;

    async fn list_summaries(&self) -> ApiResult<Vec<SummaryRecord>>;
    async fn get_summary(&self, id: SummaryId) -> ApiResult<SummaryRecord>;
    async fn summarize_single(&self, file_id: FileId) -> ApiResult<SummaryRecord>;
    async fn summarize_multi(&self, request: &MultiSummaryRequest) -> ApiResult<SummaryRecord>;

    async fn get_profile(&self) -> ApiResult<UserProfile>;
    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile>;
}
