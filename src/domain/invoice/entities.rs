use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::errors::InvoiceEntityError;
use super::value_objects::{Amount, InvoiceStatus, VendorId};

/// Payable invoice received from a vendor.
///
/// Fields are only reachable through accessors; once built by
/// [`Invoice::create`] the record does not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
  id: Uuid,
  vendor_id: VendorId,
  amount: Amount,
  invoice_date: NaiveDate,
  due_date: NaiveDate,
  status: InvoiceStatus,
}

impl Invoice {
  /// Builds a pending invoice from its four intrinsic inputs.
  pub fn create(
    vendor_id: impl Into<String>,
    amount: Decimal,
    invoice_date: NaiveDate,
    due_date: NaiveDate,
  ) -> Result<Self, InvoiceEntityError> {
    let vendor_id = VendorId::new(vendor_id)?;
    let amount = Amount::new(amount)?;

    if due_date < invoice_date {
      return Err(InvoiceEntityError::DueDateBeforeInvoiceDate {
        invoice_date,
        due_date,
      });
    }

    Ok(Self {
      id: Uuid::new_v4(),
      vendor_id,
      amount,
      invoice_date,
      due_date,
      status: InvoiceStatus::Pending,
    })
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn vendor_id(&self) -> &VendorId {
    &self.vendor_id
  }

  pub fn amount(&self) -> Amount {
    self.amount
  }

  pub fn invoice_date(&self) -> NaiveDate {
    self.invoice_date
  }

  pub fn due_date(&self) -> NaiveDate {
    self.due_date
  }

  pub fn status(&self) -> InvoiceStatus {
    self.status
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::value_objects::ValueObjectError;
  use rust_decimal_macros::dec;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_invoice_creation() {
    let invoice = Invoice::create("V1", dec!(120.00), date(2024, 1, 1), date(2024, 1, 31)).unwrap();

    assert_eq!(invoice.status(), InvoiceStatus::Pending);
    assert_eq!(invoice.vendor_id().value(), "V1");
    assert_eq!(invoice.amount().value(), dec!(120.00));
    assert_eq!(invoice.invoice_date(), date(2024, 1, 1));
    assert_eq!(invoice.due_date(), date(2024, 1, 31));
  }

  #[test]
  fn test_invoice_ids_are_unique() {
    let a = Invoice::create("V1", dec!(1), date(2024, 1, 1), date(2024, 1, 1)).unwrap();
    let b = Invoice::create("V1", dec!(1), date(2024, 1, 1), date(2024, 1, 1)).unwrap();
    assert_ne!(a.id(), b.id());
  }

  #[test]
  fn test_due_date_may_equal_invoice_date() {
    assert!(Invoice::create("V1", dec!(5), date(2024, 3, 4), date(2024, 3, 4)).is_ok());
  }

  #[test]
  fn test_rejects_non_positive_amount() {
    for amount in [dec!(0), dec!(-1), dec!(-0.0001)] {
      let err = Invoice::create("V1", amount, date(2024, 1, 1), date(2024, 1, 31)).unwrap_err();
      assert!(matches!(
        err,
        InvoiceEntityError::InvalidField(ValueObjectError::InvalidAmount(_))
      ));
    }
  }

  #[test]
  fn test_rejects_empty_vendor_id() {
    let err = Invoice::create(" ", dec!(10), date(2024, 1, 1), date(2024, 1, 31)).unwrap_err();
    assert!(matches!(
      err,
      InvoiceEntityError::InvalidField(ValueObjectError::InvalidVendorId(_))
    ));
  }

  #[test]
  fn test_accepts_long_vendor_id() {
    let vendor_id = format!("SUPPLIER-{}", "7".repeat(120));
    let invoice =
      Invoice::create(vendor_id.as_str(), dec!(10), date(2024, 1, 1), date(2024, 1, 31)).unwrap();
    assert_eq!(invoice.vendor_id().value(), vendor_id);
  }

  #[test]
  fn test_rejects_due_date_before_invoice_date() {
    let err = Invoice::create("V1", dec!(10), date(2024, 1, 31), date(2024, 1, 30)).unwrap_err();
    assert_eq!(
      err,
      InvoiceEntityError::DueDateBeforeInvoiceDate {
        invoice_date: date(2024, 1, 31),
        due_date: date(2024, 1, 30),
      }
    );
  }
}
