use thiserror::Error;

/// Failure reported by the remote backend or the transport underneath it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not authenticated: {0}")]
    Auth(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Unexpected response ({}): {message}", status_label(.status))]
    Unknown { status: Option<u16>, message: String },
}

impl ApiError {
    /// Maps a non-success HTTP status and the server's message onto the taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => ApiError::Validation(message),
            401 => ApiError::Auth(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Unknown { status: Some(status), message },
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no status".to_string(),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Unknown { status: err.status().map(|s| s.as_u16()), message: err.to_string() }
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16(), err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Cannot proceed: {0}")]
    Precondition(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// What the screen boundary should do with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Show the message next to the offending input.
    Inline,
    /// Drop the session and send the user back to login.
    ForceLogout,
    /// Leave the detail view and return to the owning list.
    BackToList,
    /// Offer a retry; nothing is retried automatically.
    Retry,
    /// The action was refused before any network call.
    Blocked,
    /// Plain error notification.
    Fail,
}

impl AppError {
    pub fn disposition(&self) -> Disposition {
        match self {
            AppError::Api(ApiError::Validation(_)) => Disposition::Inline,
            AppError::Api(ApiError::Auth(_)) => Disposition::ForceLogout,
            AppError::Api(ApiError::NotFound(_)) | AppError::Api(ApiError::Forbidden(_)) => {
                Disposition::BackToList
            }
            AppError::Api(ApiError::Network(_)) | AppError::Api(ApiError::Timeout) => Disposition::Retry,
            AppError::Precondition(_) => Disposition::Blocked,
            AppError::Api(ApiError::Unknown { .. }) | AppError::Io(_) | AppError::Config(_) => {
                Disposition::Fail
            }
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Api(ApiError::Auth(_)))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
