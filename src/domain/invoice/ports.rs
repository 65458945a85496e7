use async_trait::async_trait;

use super::entities::Invoice;
use super::errors::RepositoryError;
use super::payload::PersistablePayload;

/// Remote invoice store
///
/// `get_invoice` reports a missing id as [`RepositoryError::NotFound`]; every
/// other failure surfaces as transport, status or decode errors.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError>;
  async fn get_invoice(&self, id: &str) -> Result<Invoice, RepositoryError>;
  async fn add_invoice(&self, payload: &PersistablePayload) -> Result<Invoice, RepositoryError>;
  async fn edit_invoice(
    &self,
    id: &str,
    payload: &PersistablePayload,
  ) -> Result<Invoice, RepositoryError>;
  async fn delete_invoice(&self, id: &str) -> Result<(), RepositoryError>;
}
