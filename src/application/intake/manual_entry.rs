use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::errors::IntakeError;
use super::pipeline::InvoiceIntake;
use super::request::{IntakeChannel, IntakeResponse, InvoiceRequest};

/// Invoice keyed in by an accounts payable clerk
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ManualInvoiceCommand {
  #[validate(length(min = 1, message = "Vendor id is required"))]
  pub vendor_id: String,

  #[validate(required(message = "Amount is required"))]
  pub amount: Option<Decimal>,

  #[validate(required(message = "Invoice date is required"))]
  pub invoice_date: Option<NaiveDate>,

  /// Vendor's own invoice number, if the clerk entered one
  #[serde(default)]
  pub reference: Option<String>,
}

impl ManualInvoiceCommand {
  /// Checks that every field is present. Amount sign is left to the invoice
  /// itself so a zero amount reports as a validation failure.
  pub fn normalize(self) -> Result<InvoiceRequest, IntakeError> {
    self
      .validate()
      .map_err(|e| IntakeError::normalization(IntakeChannel::Manual, e.to_string()))?;

    let vendor_id = self.vendor_id.trim();
    if vendor_id.is_empty() {
      return Err(IntakeError::normalization(
        IntakeChannel::Manual,
        "vendor_id: Vendor id is required",
      ));
    }

    let (Some(amount), Some(invoice_date)) = (self.amount, self.invoice_date) else {
      return Err(IntakeError::normalization(
        IntakeChannel::Manual,
        "amount and invoice_date are required",
      ));
    };

    Ok(InvoiceRequest {
      vendor_id: vendor_id.to_string(),
      amount,
      invoice_date,
      channel: IntakeChannel::Manual,
      reference: self
        .reference
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty()),
    })
  }
}

pub struct ManualInvoiceUseCase {
  intake: Arc<InvoiceIntake>,
}

impl ManualInvoiceUseCase {
  pub fn new(intake: Arc<InvoiceIntake>) -> Self {
    Self { intake }
  }

  pub async fn execute(&self, command: ManualInvoiceCommand) -> Result<IntakeResponse, IntakeError> {
    let request = command.normalize().map_err(|e| {
      tracing::warn!("Manual invoice rejected: {}", e);
      e
    })?;
    self.intake.process(request).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn command() -> ManualInvoiceCommand {
    ManualInvoiceCommand {
      vendor_id: " V1 ".to_string(),
      amount: Some(dec!(99.95)),
      invoice_date: NaiveDate::from_ymd_opt(2024, 1, 1),
      reference: Some("INV-7781".to_string()),
    }
  }

  #[test]
  fn test_normalize_complete_command() {
    let request = command().normalize().unwrap();
    assert_eq!(request.vendor_id, "V1");
    assert_eq!(request.amount, dec!(99.95));
    assert_eq!(request.channel, IntakeChannel::Manual);
    assert_eq!(request.reference.as_deref(), Some("INV-7781"));
  }

  #[test]
  fn test_missing_fields_fail_normalization() {
    let mut missing_amount = command();
    missing_amount.amount = None;
    assert!(matches!(
      missing_amount.normalize(),
      Err(IntakeError::Normalization {
        channel: IntakeChannel::Manual,
        ..
      })
    ));

    let mut missing_date = command();
    missing_date.invoice_date = None;
    assert!(matches!(
      missing_date.normalize(),
      Err(IntakeError::Normalization { .. })
    ));

    let mut blank_vendor = command();
    blank_vendor.vendor_id = "   ".to_string();
    assert!(matches!(
      blank_vendor.normalize(),
      Err(IntakeError::Normalization { .. })
    ));
  }

  #[test]
  fn test_long_vendor_id_passes_normalization() {
    let mut long_vendor = command();
    long_vendor.vendor_id = "V".repeat(100);
    assert_eq!(long_vendor.normalize().unwrap().vendor_id.len(), 100);
  }

  #[test]
  fn test_zero_amount_passes_normalization() {
    let mut zero = command();
    zero.amount = Some(dec!(0));
    assert_eq!(zero.normalize().unwrap().amount, dec!(0));
  }

  #[test]
  fn test_deserialize_from_json() {
    let command: ManualInvoiceCommand = serde_json::from_str(
      r#"{"vendor_id": "V1", "amount": "1250.00", "invoice_date": "2024-01-01"}"#,
    )
    .unwrap();
    assert_eq!(command.amount, Some(dec!(1250.00)));
    assert!(command.reference.is_none());
  }
}
