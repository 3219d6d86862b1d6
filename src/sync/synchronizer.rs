use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::ViewState;
use crate::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fresh data replaced the cache.
    Committed,
    /// The screen closed before the data arrived; nothing was written.
    Cancelled,
}

/// A local change applied before the remote call that confirms it.
pub struct Mutation<A, R> {
    pub apply: A,
    pub remote: R,
    pub on_failure_revert: bool,
}

impl<A, R> Mutation<A, R> {
    /// Reverts to the pre-mutation snapshot if `remote` fails.
    pub fn new(apply: A, remote: R) -> Self {
        Self { apply, remote, on_failure_revert: true }
    }

    pub fn keep_on_failure(mut self) -> Self {
        self.on_failure_revert = false;
        self
    }
}

/// Owns a screen's snapshot of remote data for as long as the screen is open.
///
/// A failed load never overwrites data that is already cached. Once the
/// screen is closed (see [`close`](Self::close) and [`lifetime`](Self::lifetime)),
/// pending loads are abandoned and late results are dropped.
pub struct Synchronizer<T> {
    screen: &'static str,
    state: ViewState<T>,
    lifetime: CancellationToken,
}

impl<T: Clone> Synchronizer<T> {
    pub fn new(screen: &'static str) -> Self {
        Self {
            screen,
            state: ViewState::Loading,
            lifetime: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data()
    }

    /// Handle that closes the screen from elsewhere, e.g. on navigation.
    pub fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    pub fn close(&self) {
        self.lifetime.cancel();
    }

    pub fn is_active(&self) -> bool {
        !self.lifetime.is_cancelled()
    }

    pub async fn load<F, E>(&mut self, fetch: F) -> Result<LoadOutcome>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: Into<AppError>,
    {
        if !self.is_active() {
            return Ok(LoadOutcome::Cancelled);
        }
        if self.state.data().is_none() {
            self.state = ViewState::Loading;
        }

        tracing::debug!(screen = self.screen, "loading");
        let lifetime = self.lifetime.clone();
        let result = tokio::select! {
            biased;
            _ = lifetime.cancelled() => {
                tracing::debug!(screen = self.screen, "load abandoned, screen closed");
                return Ok(LoadOutcome::Cancelled);
            }
            result = fetch => result,
        };

        match result {
            Ok(data) => {
                self.state = ViewState::Loaded(data);
                tracing::debug!(screen = self.screen, "loaded");
                Ok(LoadOutcome::Committed)
            }
            Err(e) => {
                let err = e.into();
                tracing::warn!(screen = self.screen, error = %err, "load failed");
                if self.state.data().is_none() {
                    self.state = ViewState::Error(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Local-only change. Does nothing when the screen is closed or empty.
    pub fn update<F>(&mut self, change: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        if !self.is_active() {
            return false;
        }
        match self.state.data_mut() {
            Some(data) => {
                change(data);
                true
            }
            None => false,
        }
    }

    /// Applies `mutation.apply` right away, then awaits `mutation.remote`.
    ///
    /// Refused without touching the cache or sending anything once the screen
    /// is closed. A remote call already under way is never abandoned, but if
    /// the screen closes meanwhile the cache is left alone whatever the outcome.
    pub async fn apply_optimistic<A, R, V, E>(&mut self, mutation: Mutation<A, R>) -> Result<V>
    where
        A: FnOnce(&mut T),
        R: Future<Output = std::result::Result<V, E>>,
        E: Into<AppError>,
    {
        let Mutation { apply, remote, on_failure_revert } = mutation;
        if !self.is_active() {
            return Err(AppError::Precondition(format!("{} is closed", self.screen)));
        }

        let data = self
            .state
            .data_mut()
            .ok_or_else(|| AppError::Precondition(format!("{} has nothing loaded", self.screen)))?;
        let snapshot = on_failure_revert.then(|| data.clone());
        apply(data);

        let err = match remote.await {
            Ok(value) => return Ok(value),
            Err(e) => e.into(),
        };

        if let (Some(snapshot), true) = (snapshot, self.is_active()) {
            if let Some(data) = self.state.data_mut() {
                *data = snapshot;
                tracing::warn!(screen = self.screen, error = %err, "remote call failed, change reverted");
            }
        }
        Err(err)
    }
}
