pub mod error;
pub mod money;
pub mod telemetry;

pub use error::{AppError, DraftField, Result, ValidationError};
