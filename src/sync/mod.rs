//! Per-screen cache of remote collections with optimistic mutations.

mod derive;
mod synchronizer;
mod view_state;

pub use derive::{derive_recent, file_names, summary_for_file, summary_title, Order};
pub use synchronizer::{LoadOutcome, Mutation, Synchronizer};
pub use view_state::ViewState;
