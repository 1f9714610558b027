use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValueObjectError;

/// Raised by the invoice factory when its own inputs are inconsistent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceEntityError {
  #[error(transparent)]
  InvalidField(#[from] ValueObjectError),

  #[error("Due date {due_date} is before invoice date {invoice_date}")]
  DueDateBeforeInvoiceDate {
    invoice_date: NaiveDate,
    due_date: NaiveDate,
  },
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Invoice {0} is already stored")]
  Duplicate(Uuid),

  #[error("Invoice store unavailable: {0}")]
  Unavailable(String),
}
