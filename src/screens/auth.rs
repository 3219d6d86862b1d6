use std::sync::Arc;

use crate::client::RemoteApi;
use crate::session::SessionStore;
use crate::types::{Credentials, RegisteredUser, Registration};
use crate::Result;

/// Login, registration and logout.
pub struct AuthFlow {
    api: Arc<dyn RemoteApi>,
    session: SessionStore,
}

impl AuthFlow {
    pub fn new(api: Arc<dyn RemoteApi>, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Exchanges credentials for a token and stores it as the new session.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let credentials = Credentials {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let token = self.api.login(&credentials).await?;
        self.session.create_session(token.access_token).await?;
        tracing::info!(username = %credentials.username, "logged in");
        Ok(())
    }

    pub async fn register(&self, registration: &Registration) -> Result<RegisteredUser> {
        let user = self.api.register(registration).await?;
        tracing::info!(username = %user.username, "registered");
        Ok(user)
    }

    pub async fn logout(&self) -> Result<()> {
        self.session.destroy_session().await
    }
}
