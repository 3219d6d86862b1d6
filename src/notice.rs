use crate::error::{AppError, Disposition};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A toast-style message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub message: String,
    pub disposition: Option<Disposition>,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            message: message.into(),
            disposition: None,
        }
    }
}

/// Converts a failure into a notice at the screen boundary. Authentication
/// failures end the session first.
pub async fn surface(err: &AppError, session: &SessionStore) -> Notice {
    let disposition = err.disposition();
    if disposition == Disposition::ForceLogout {
        if let Err(e) = session.destroy_session().await {
            tracing::warn!(error = %e, "failed to clear session after auth error");
        }
    }

    let title = match disposition {
        Disposition::Inline => "Invalid input",
        Disposition::ForceLogout => "Session expired",
        Disposition::BackToList => "Not available",
        Disposition::Retry => "Connection problem",
        Disposition::Blocked => "Action not possible",
        Disposition::Fail => "Error",
    };

    Notice {
        level: Level::Error,
        title: title.to_string(),
        message: err.to_string(),
        disposition: Some(disposition),
    }
}
