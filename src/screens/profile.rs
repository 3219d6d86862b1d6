use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::RemoteApi;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::sync::{LoadOutcome, Mutation, Synchronizer, ViewState};
use crate::types::{ProfileUpdate, UserProfile};
use crate::Result;

#[derive(Debug, Clone)]
pub struct ProfileData {
    pub profile: UserProfile,
    pub total_files: usize,
    pub total_summaries: usize,
}

pub struct ProfileScreen {
    api: Arc<dyn RemoteApi>,
    session: SessionStore,
    sync: Synchronizer<ProfileData>,
}

impl ProfileScreen {
    pub fn new(api: Arc<dyn RemoteApi>, session: SessionStore) -> Self {
        Self { api, session, sync: Synchronizer::new("profile") }
    }

    /// Profile, files and summaries are fetched concurrently.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let api = Arc::clone(&self.api);
        self.sync
            .load(async move {
                let (profile, files, summaries) =
                    tokio::try_join!(api.get_profile(), api.list_files(), api.list_summaries())?;
                Ok::<_, ApiError>(ProfileData {
                    profile,
                    total_files: files.len(),
                    total_summaries: summaries.len(),
                })
            })
            .await
    }

    pub fn state(&self) -> &ViewState<ProfileData> {
        self.sync.state()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.sync.data().map(|data| &data.profile)
    }

    /// Shows the new name and description at once; restores the old ones if
    /// the backend rejects them.
    pub async fn update(&mut self, update: ProfileUpdate) -> Result<UserProfile> {
        let api = Arc::clone(&self.api);
        let local = update.clone();
        let mutation = Mutation::new(
            move |data: &mut ProfileData| {
                data.profile.full_name = local.full_name;
                data.profile.description = local.description;
            },
            async move { api.update_profile(&update).await },
        );

        let saved = self.sync.apply_optimistic(mutation).await?;
        let confirmed = saved.clone();
        self.sync.update(|data| data.profile = confirmed);
        Ok(saved)
    }

    pub async fn logout(&self) -> Result<()> {
        self.sync.close();
        self.session.destroy_session().await
    }

    /// Cancelling this token closes the screen while a load is pending.
    pub fn lifetime(&self) -> CancellationToken {
        self.sync.lifetime()
    }

    pub fn close(&self) {
        self.sync.close();
    }
}
