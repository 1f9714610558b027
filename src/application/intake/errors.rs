use thiserror::Error;

use super::request::IntakeChannel;
use crate::domain::due_date::DueDateError;
use crate::domain::invoice::{InvoiceEntityError, StoreError};

#[derive(Debug, Error)]
pub enum IntakeError {
  #[error("Invalid invoice: {0}")]
  Validation(#[from] InvoiceEntityError),

  #[error("No payment terms found for vendor '{0}'")]
  VendorNotFound(String),

  #[error("Vendor terms lookup failed: {0}")]
  TermsLookup(String),

  #[error("Holiday lookup failed: {0}")]
  HolidayLookup(String),

  #[error("Cannot normalize {channel} input: {message}")]
  Normalization {
    channel: IntakeChannel,
    message: String,
  },

  #[error("Failed to store invoice: {0}")]
  Persistence(#[from] StoreError),
}

impl IntakeError {
  pub fn normalization(channel: IntakeChannel, message: impl Into<String>) -> Self {
    IntakeError::Normalization {
      channel,
      message: message.into(),
    }
  }

  /// Stable tag callers can branch on
  pub fn kind(&self) -> &'static str {
    match self {
      IntakeError::Validation(_) => "validation",
      IntakeError::VendorNotFound(_) => "vendor_not_found",
      IntakeError::TermsLookup(_) => "terms_lookup",
      IntakeError::HolidayLookup(_) => "holiday_lookup",
      IntakeError::Normalization { .. } => "normalization",
      IntakeError::Persistence(_) => "persistence",
    }
  }
}

impl From<DueDateError> for IntakeError {
  fn from(err: DueDateError) -> Self {
    match err {
      DueDateError::VendorNotFound(vendor_id) => IntakeError::VendorNotFound(vendor_id),
      DueDateError::TermsLookup(reason) => IntakeError::TermsLookup(reason),
      DueDateError::HolidayLookup(reason) => IntakeError::HolidayLookup(reason),
    }
  }
}
