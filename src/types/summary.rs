use chrono::{DateTime, Utc};
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use super::FileId;

pub type SummaryId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: SummaryId,
    #[serde(serialize_with = "serialize_ids", deserialize_with = "deserialize_ids")]
    pub file_ids: Vec<FileId>,
    pub summary_text: String,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl SummaryRecord {
    pub fn is_consolidated(&self) -> bool {
        self.file_ids.len() > 1
    }

    /// True only for a single-file summary of exactly `file_id`.
    pub fn summarizes_only(&self, file_id: FileId) -> bool {
        self.file_ids.as_slice() == [file_id]
    }
}

/// Body of a consolidated summary request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiSummaryRequest {
    pub file_ids: Vec<FileId>,
    pub content: String,
}

/// Parses the backend's comma-joined id list, e.g. `"3,5"`.
pub fn parse_file_ids(raw: &str) -> std::result::Result<Vec<FileId>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<FileId>().map_err(|e| format!("invalid file id {:?}: {}", part, e)))
        .collect()
}

fn serialize_ids<S>(ids: &[FileId], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let joined = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",");
    serializer.serialize_str(&joined)
}

fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<FileId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Single(FileId),
        List(Vec<FileId>),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(text) => parse_file_ids(&text).map_err(D::Error::custom),
        Raw::Single(id) => Ok(vec![id]),
        Raw::List(ids) => Ok(ids),
    }
}
