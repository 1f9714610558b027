use std::sync::Arc;

use super::errors::IntakeError;
use super::request::{IntakeResponse, InvoiceRequest};
use crate::domain::due_date::DueDateService;
use crate::domain::invoice::{Invoice, InvoiceStore};

/// Steps every intake channel runs once its input is normalized.
///
/// The due date is computed before the invoice is built, and the invoice is
/// built before anything is stored. A failure at any step stops the workflow.
pub struct InvoiceIntake {
  due_dates: Arc<DueDateService>,
  store: Arc<dyn InvoiceStore>,
}

impl InvoiceIntake {
  pub fn new(due_dates: Arc<DueDateService>, store: Arc<dyn InvoiceStore>) -> Self {
    Self { due_dates, store }
  }

  pub async fn process(&self, request: InvoiceRequest) -> Result<IntakeResponse, IntakeError> {
    let InvoiceRequest {
      vendor_id,
      amount,
      invoice_date,
      channel,
      reference,
    } = request;

    let due_date = self
      .due_dates
      .calculate_due_date(&vendor_id, invoice_date)
      .await
      .map_err(|e| {
        tracing::warn!("Due date for {} invoice from '{}' failed: {}", channel, vendor_id, e);
        IntakeError::from(e)
      })?;

    let invoice = Invoice::create(vendor_id, amount, invoice_date, due_date).map_err(|e| {
      tracing::warn!("Rejected {} invoice: {}", channel, e);
      IntakeError::from(e)
    })?;

    self.store.save(&invoice).await.map_err(|e| {
      tracing::error!("Failed to store invoice {}: {}", invoice.id(), e);
      IntakeError::from(e)
    })?;

    tracing::info!(
      invoice_id = %invoice.id(),
      vendor_id = %invoice.vendor_id(),
      %channel,
      due_date = %invoice.due_date(),
      "Invoice accepted"
    );

    Ok(IntakeResponse::new(&invoice, channel, reference))
  }
}
