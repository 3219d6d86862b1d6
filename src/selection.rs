use std::collections::BTreeSet;
use std::future::Future;

use crate::types::FileId;
use crate::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    Selecting,
    AwaitingBatchResult,
}

/// Marks a batch as running until dropped, so an abandoned batch future
/// does not leave the controller stuck.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        InFlight(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Multi-select state of a file list and the batch actions run over it.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: BTreeSet<FileId>,
    in_flight: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.in_flight {
            SelectionPhase::AwaitingBatchResult
        } else if self.selected.is_empty() {
            SelectionPhase::Idle
        } else {
            SelectionPhase::Selecting
        }
    }

    pub fn selected(&self) -> &BTreeSet<FileId> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: FileId) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle(&mut self, id: FileId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Clears the selection if it already covers `visible`, otherwise selects
    /// all of `visible`.
    pub fn toggle_all<I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = FileId>,
    {
        let visible: BTreeSet<FileId> = visible.into_iter().collect();
        if !visible.is_empty() && self.selected == visible {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
    }

    /// Drops ids that are no longer on screen.
    pub fn retain_visible<I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = FileId>,
    {
        let visible: BTreeSet<FileId> = visible.into_iter().collect();
        self.selected.retain(|id| visible.contains(id));
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.in_flight = false;
    }

    /// Runs `action` over the current selection.
    ///
    /// Refuses without calling `action` when fewer than `min_selection` ids are
    /// selected. The selection is cleared on success and kept on failure or
    /// when the returned future is dropped before completing.
    pub async fn run_batch_action<F, Fut, T, E>(&mut self, min_selection: usize, action: F) -> Result<T>
    where
        F: FnOnce(Vec<FileId>) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<AppError>,
    {
        if self.in_flight {
            return Err(AppError::Precondition("a batch action is already running".into()));
        }
        if self.selected.len() < min_selection {
            return Err(AppError::Precondition(format!(
                "select at least {} files ({} selected)",
                min_selection,
                self.selected.len()
            )));
        }

        let ids: Vec<FileId> = self.selected.iter().copied().collect();
        let result = {
            let _flight = InFlight::start(&mut self.in_flight);
            action(ids).await
        };

        match result {
            Ok(value) => {
                self.selected.clear();
                Ok(value)
            }
            Err(e) => {
                let err = e.into();
                tracing::warn!(selected = self.selected.len(), error = %err, "batch action failed");
                Err(err)
            }
        }
    }
}
