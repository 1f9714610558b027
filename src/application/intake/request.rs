use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceStatus};

/// Where an invoice entered the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeChannel {
  Manual,
  Ocr,
  Freight,
}

impl IntakeChannel {
  pub fn as_str(&self) -> &'static str {
    match self {
      IntakeChannel::Manual => "manual",
      IntakeChannel::Ocr => "ocr",
      IntakeChannel::Freight => "freight",
    }
  }
}

impl fmt::Display for IntakeChannel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Channel input after normalization, common to every intake channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRequest {
  pub vendor_id: String,
  pub amount: Decimal,
  pub invoice_date: NaiveDate,
  pub channel: IntakeChannel,
  pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeResponse {
  pub invoice_id: Uuid,
  pub vendor_id: String,
  pub amount: Decimal,
  pub invoice_date: NaiveDate,
  pub due_date: NaiveDate,
  pub status: InvoiceStatus,
  pub channel: IntakeChannel,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reference: Option<String>,
}

impl IntakeResponse {
  pub fn new(invoice: &Invoice, channel: IntakeChannel, reference: Option<String>) -> Self {
    Self {
      invoice_id: invoice.id(),
      vendor_id: invoice.vendor_id().value().to_string(),
      amount: invoice.amount().value(),
      invoice_date: invoice.invoice_date(),
      due_date: invoice.due_date(),
      status: invoice.status(),
      channel,
      reference,
    }
  }
}
