use std::collections::HashMap;

use crate::types::{FileId, FileRecord, SummaryRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Top `n` items by `key`. Equal keys keep their fetch order.
pub fn derive_recent<T, K, F>(items: &[T], n: usize, key: F, order: Order) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut indexed: Vec<&T> = items.iter().collect();
    // sort_by is stable
    indexed.sort_by(|a, b| match order {
        Order::Ascending => key(*a).cmp(&key(*b)),
        Order::Descending => key(*b).cmp(&key(*a)),
    });
    indexed.into_iter().take(n).cloned().collect()
}

/// The single-file summary of `file_id`. Consolidated summaries never match.
pub fn summary_for_file(summaries: &[SummaryRecord], file_id: FileId) -> Option<&SummaryRecord> {
    summaries.iter().find(|s| s.summarizes_only(file_id))
}

pub fn file_names(files: &[FileRecord]) -> HashMap<FileId, String> {
    files.iter().map(|f| (f.id, f.file_name.clone())).collect()
}

pub fn summary_title(summary: &SummaryRecord, names: &HashMap<FileId, String>) -> String {
    match summary.file_ids.as_slice() {
        [id] => names
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("File #{}", id)),
        _ => "Consolidated summary".to_string(),
    }
}
