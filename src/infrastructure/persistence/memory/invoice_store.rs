use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceStore, StoreError};

/// Invoice store kept in process memory.
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
  invoices: RwLock<HashMap<Uuid, Invoice>>,
}

impl InMemoryInvoiceStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn count(&self) -> usize {
    self.invoices.read().await.len()
  }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
  async fn save(&self, invoice: &Invoice) -> Result<(), StoreError> {
    let mut invoices = self.invoices.write().await;
    if invoices.contains_key(&invoice.id()) {
      return Err(StoreError::Duplicate(invoice.id()));
    }
    invoices.insert(invoice.id(), invoice.clone());
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, StoreError> {
    Ok(self.invoices.read().await.get(&id).cloned())
  }
}
