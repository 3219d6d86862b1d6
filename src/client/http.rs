use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{ApiResult, RemoteApi};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::types::{
    Credentials, Download, FileId, FileRecord, MultiSummaryRequest, ProfileUpdate, RegisteredUser,
    Registration, SummaryId, SummaryRecord, Token, UploadFile, UserProfile,
};
use crate::{AppError, Result};

/// [`RemoteApi`] over HTTP. Requests fire even without a session; the
/// backend answers with 401 in that case.
#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("docsum/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build http client: {}", e)))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, label: &str, request: RequestBuilder) -> ApiResult<Response> {
        let request = match self.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(label, error = %e, "request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        tracing::debug!(label, status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = detail_message(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| format!("status {}", status.as_u16()));
        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn json<T: DeserializeOwned>(&self, label: &str, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(label, request).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }
}

#[async_trait]
impl RemoteApi for HttpClient {
    async fn register(&self, registration: &Registration) -> ApiResult<RegisteredUser> {
        let request = self.http.post(self.url("/auth/register")).json(registration);
        self.json("register", request).await
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<Token> {
        let request = self.http.post(self.url("/auth/login")).form(credentials);
        self.json("login", request).await
    }

    async fn list_files(&self) -> ApiResult<Vec<FileRecord>> {
        self.json("list files", self.http.get(self.url("/files"))).await
    }

    async fn get_file(&self, id: FileId) -> ApiResult<FileRecord> {
        self.json("get file", self.http.get(self.url(&format!("/files/{}", id)))).await
    }

    async fn upload_file(&self, file: &UploadFile) -> ApiResult<FileRecord> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new().part("upload", part);
        let request = self.http.post(self.url("/files/upload")).multipart(form);
        self.json("upload file", request).await
    }

    async fn download_file(&self, id: FileId) -> ApiResult<Download> {
        let request = self.http.get(self.url(&format!("/files/{}/download", id)));
        let response = self.send("download file", request).await?;

        let file_name = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_file_name)
            .unwrap_or_else(|| format!("file-{}.pdf", id));
        let bytes = response.bytes().await?.to_vec();

        Ok(Download { file_name, bytes })
    }

    async fn list_summaries(&self) -> ApiResult<Vec<SummaryRecord>> {
        self.json("list summaries", self.http.get(self.url("/summary/"))).await
    }

    async fn get_summary(&self, id: SummaryId) -> ApiResult<SummaryRecord> {
        self.json("get summary", self.http.get(self.url(&format!("/summary/{}", id)))).await
    }

    async fn summarize_single(&self, file_id: FileId) -> ApiResult<SummaryRecord> {
        let request = self
            .http
            .post(self.url("/summary/single"))
            .query(&[("file_id", file_id)]);
        self.json("summarize single", request).await
    }

    async fn summarize_multi(&self, request: &MultiSummaryRequest) -> ApiResult<SummaryRecord> {
        let request = self.http.post(self.url("/summary/multi")).json(request);
        self.json("summarize multi", request).await
    }

    async fn get_profile(&self) -> ApiResult<UserProfile> {
        self.json("get profile", self.http.get(self.url("/user/profile"))).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        // The image part is optional server side and never sent from here.
        let request = self
            .http
            .put(self.url("/user/profile"))
            .query(&[
                ("full_name", update.full_name.as_str()),
                ("description", update.description.as_str()),
            ])
            .multipart(Form::new());
        self.json("update profile", request).await
    }
}

/// Pulls a readable message out of an error body: `{"detail": "..."}` or a
/// validation list `{"detail": [{"msg": "..."}, ...]}`.
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        other => Some(other.to_string()),
    }
}

/// File name from a `Content-Disposition` header. The RFC 5987 form
/// `filename*=utf-8''...` wins over plain `filename=`.
fn disposition_file_name(value: &str) -> Option<String> {
    let params: Vec<&str> = value.split(';').map(str::trim).collect();

    let extended = params
        .iter()
        .find_map(|param| param.strip_prefix("filename*="))
        .and_then(|encoded| {
            let (charset, rest) = encoded.split_once('\'')?;
            let (_language, raw) = rest.split_once('\'')?;
            if !charset.eq_ignore_ascii_case("utf-8") {
                return None;
            }
            percent_decode(raw.trim_matches('"'))
        });

    extended
        .or_else(|| {
            params
                .iter()
                .find_map(|param| param.strip_prefix("filename="))
                .map(|name| name.trim_matches('"').to_string())
        })
        .filter(|name| !name.is_empty())
}

fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = raw.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}
