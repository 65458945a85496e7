use thiserror::Error;

use super::value_objects::{LineItemKey, ValueObjectError};

/// Failure while editing the form model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
  #[error("Validation error: {0}")]
  Value(#[from] ValueObjectError),

  #[error("Line item not found: {0}")]
  UnknownLineItem(LineItemKey),
}

/// Failure reported by an invoice repository
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
  #[error("Network request failed: {0}")]
  Transport(String),

  #[error("Network response was not ok {reason} ({status})")]
  Status { status: u16, reason: String },

  #[error("Invoice not found: {0}")]
  NotFound(String),

  #[error("Malformed response: {0}")]
  Decode(String),
}

impl RepositoryError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, RepositoryError::NotFound(_))
  }
}
