use thiserror::Error;

use super::value_objects::Region;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DueDateError {
  #[error("No payment terms found for vendor '{0}'")]
  VendorNotFound(String),

  #[error("Vendor terms lookup failed: {0}")]
  TermsLookup(String),

  #[error("Holiday lookup failed: {0}")]
  HolidayLookup(String),
}

/// Failure reported by a vendor terms directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
  #[error("Vendor directory unavailable: {0}")]
  Unavailable(String),
}

/// Failure reported by a holiday calendar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
  #[error("No calendar configured for region '{0}'")]
  UnknownRegion(Region),
}

impl From<DirectoryError> for DueDateError {
  fn from(err: DirectoryError) -> Self {
    DueDateError::TermsLookup(err.to_string())
  }
}

impl From<CalendarError> for DueDateError {
  fn from(err: CalendarError) -> Self {
    DueDateError::HolidayLookup(err.to_string())
  }
}
