use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::errors::IntakeError;
use super::pipeline::InvoiceIntake;
use super::request::{IntakeChannel, IntakeResponse, InvoiceRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct FreightCharge {
  pub code: String,
  pub amount: Decimal,
}

/// Freight bill as exported by the freight management system
#[derive(Debug, Clone, Deserialize)]
pub struct FreightRecord {
  pub shipment_reference: String,
  /// Carrier code (SCAC) of the carrier that billed the shipment
  pub carrier_code: String,
  pub billed_on: Option<NaiveDate>,
  #[serde(default)]
  pub charges: Vec<FreightCharge>,
}

impl FreightRecord {
  /// Maps the freight bill onto an invoice request.
  ///
  /// The carrier is resolved to a vendor through `carrier_vendors`; carriers
  /// without an entry use their upper-cased code as vendor id. The amount is
  /// the sum of all charges, so discounts may be booked as negative lines.
  pub fn normalize(
    &self,
    carrier_vendors: &HashMap<String, String>,
  ) -> Result<InvoiceRequest, IntakeError> {
    let shipment_reference = self.shipment_reference.trim();
    if shipment_reference.is_empty() {
      return Err(reject("shipment_reference is blank"));
    }

    let carrier_code = self.carrier_code.trim().to_ascii_uppercase();
    if carrier_code.is_empty() {
      return Err(reject(format!(
        "carrier_code is blank on shipment {}",
        shipment_reference
      )));
    }

    let invoice_date = self.billed_on.ok_or_else(|| {
      reject(format!(
        "billed_on is missing on shipment {}",
        shipment_reference
      ))
    })?;

    if self.charges.is_empty() {
      return Err(reject(format!(
        "shipment {} has no charges",
        shipment_reference
      )));
    }

    let amount = self
      .charges
      .iter()
      .try_fold(Decimal::ZERO, |total, charge| total.checked_add(charge.amount))
      .ok_or_else(|| {
        reject(format!(
          "charges on shipment {} overflow",
          shipment_reference
        ))
      })?;

    let vendor_id = carrier_vendors
      .get(&carrier_code)
      .cloned()
      .unwrap_or(carrier_code);

    Ok(InvoiceRequest {
      vendor_id,
      amount,
      invoice_date,
      channel: IntakeChannel::Freight,
      reference: Some(shipment_reference.to_string()),
    })
  }
}

fn reject(message: impl Into<String>) -> IntakeError {
  IntakeError::normalization(IntakeChannel::Freight, message)
}

pub struct FreightInvoiceUseCase {
  intake: Arc<InvoiceIntake>,
  carrier_vendors: HashMap<String, String>,
}

impl FreightInvoiceUseCase {
  pub fn new(intake: Arc<InvoiceIntake>) -> Self {
    Self {
      intake,
      carrier_vendors: HashMap::new(),
    }
  }

  /// Carrier code to vendor id overrides. Keys are matched upper-cased.
  pub fn with_carrier_vendors(mut self, carrier_vendors: HashMap<String, String>) -> Self {
    self.carrier_vendors = carrier_vendors
      .into_iter()
      .map(|(carrier, vendor)| (carrier.trim().to_ascii_uppercase(), vendor))
      .collect();
    self
  }

  pub async fn execute(&self, record: FreightRecord) -> Result<IntakeResponse, IntakeError> {
    let request = record.normalize(&self.carrier_vendors).map_err(|e| {
      tracing::warn!("Freight record rejected: {}", e);
      e
    })?;
    self.intake.process(request).await
  }
}
