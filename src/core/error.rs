use std::fmt;

use serde::Serialize;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Draft field a validation error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Client,
    LineItems,
    Quantity,
    Product,
    TaxRate,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Client => write!(f, "client"),
            DraftField::LineItems => write!(f, "line_items"),
            DraftField::Quantity => write!(f, "quantity"),
            DraftField::Product => write!(f, "product"),
            DraftField::TaxRate => write!(f, "tax_rate"),
        }
    }
}

/// A single problem with user input, reported next to the offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: DraftField,
    /// Position of the offending line item, when the error concerns one
    pub line: Option<usize>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            line: None,
            message: message.into(),
        }
    }

    pub fn at_line(field: DraftField, line: usize, message: impl Into<String>) -> Self {
        Self {
            field,
            line: Some(line),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} (line {}): {}", self.field, line + 1, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Main application error type
///
/// Every variant is scoped to the single operation that failed; none of them
/// leave partially-applied state behind.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Bad user input detected locally, no request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Draft is not submittable
    #[error("Invoice draft is invalid: {}", join_errors(.0))]
    InvalidDraft(Vec<ValidationError>),

    /// Line item position outside the current sequence
    #[error("Line item index {index} out of range (draft has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Unknown tax tier or bad configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Stock adjustment that would take stock below zero
    #[error(
        "Invalid stock adjustment for product {product_id}: current stock {current_stock}, \
         delta {delta} would result in {}: {reason}",
        current_stock.saturating_add(*delta)
    )]
    InvalidAdjustment {
        product_id: String,
        current_stock: i64,
        delta: i64,
        reason: String,
    },

    /// Non-success response from the bookkeeping service, message kept verbatim
    #[error("Service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Invoice creation refused by the bookkeeping service
    #[error("Invoice submission failed: {0}")]
    Submission(String),

    /// A submission for the same draft is still outstanding
    #[error("Submission already in progress for draft {0}")]
    SubmissionInProgress(String),

    /// Network failure or unreadable response; the operation did not commit
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        AppError::Transport(msg.into())
    }

    /// Whether re-issuing the same request is safe
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }
}
