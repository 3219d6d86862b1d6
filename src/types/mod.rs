mod auth;
mod file;
mod profile;
mod summary;
pub(crate) mod timestamp;

pub use auth::{Credentials, RegisteredUser, Registration, Token};
pub use file::{Download, DocumentKind, DocumentKindDetector, FileId, FileRecord, UploadFile, MAX_UPLOAD_BYTES};
pub use profile::{ProfileUpdate, UserProfile};
pub use summary::{parse_file_ids, MultiSummaryRequest, SummaryId, SummaryRecord};
