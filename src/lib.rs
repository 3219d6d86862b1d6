pub mod client;
pub mod config;
pub mod error;
pub mod notice;
pub mod screens;
pub mod selection;
pub mod session;
pub mod sync;

mod types;

pub use error::{ApiError, AppError, Disposition, Result};
pub use types::*;
