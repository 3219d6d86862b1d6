use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;

use crate::Result;

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// Holder of the bearer token. Clones share the same session.
///
/// When backed by a file, the token survives restarts: it is written on
/// [`create_session`](Self::create_session) and removed on
/// [`destroy_session`](Self::destroy_session).
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    token_path: Option<PathBuf>,
}

impl SessionStore {
    /// Store without persistence.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens a persistent store, restoring a token left by an earlier run.
    pub async fn open(token_path: impl Into<PathBuf>) -> Result<Self> {
        let token_path = token_path.into();
        let restored = match fs::read_to_string(&token_path).await {
            Ok(content) => {
                let token = content.trim().to_string();
                (!token.is_empty()).then_some(Session { token })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        if restored.is_some() {
            tracing::debug!(path = %token_path.display(), "restored session");
        }

        Ok(Self {
            current: Arc::new(RwLock::new(restored)),
            token_path: Some(token_path),
        })
    }

    pub async fn create_session(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if let Some(path) = &self.token_path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(path, &token).await?;
        }
        *self.current.write().await = Some(Session { token });
        tracing::info!("session created");
        Ok(())
    }

    pub async fn destroy_session(&self) -> Result<()> {
        *self.current.write().await = None;
        if let Some(path) = &self.token_path {
            match fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        tracing::info!("session destroyed");
        Ok(())
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}
