//! One model per page of the product. Each owns a [`Synchronizer`](crate::sync::Synchronizer)
//! for its data and goes through [`RemoteApi`](crate::client::RemoteApi) for everything remote.

pub mod auth;
pub mod dashboard;
pub mod file_detail;
pub mod files;
pub mod profile;
pub mod summaries;

/// Number of items shown in the dashboard's "recent" panels.
pub const RECENT_COUNT: usize = 4;

/// Human readable size, e.g. `512 B`, `1.50 KB`, `2.00 MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}
