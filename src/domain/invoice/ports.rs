use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Invoice;
use super::errors::StoreError;

/// Persistence boundary for accepted invoices
#[async_trait]
pub trait InvoiceStore: Send + Sync {
  async fn save(&self, invoice: &Invoice) -> Result<(), StoreError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, StoreError>;
}
