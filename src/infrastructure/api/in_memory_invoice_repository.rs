use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::records::InvoiceRecord;
use crate::domain::invoice::{
  Invoice, InvoiceRepository, LineItemKey, PersistablePayload, RepositoryError,
};

/// Process-local invoice store for running without the remote API
///
/// Payloads go through the same JSON decoding as API responses, so stored
/// invoices look exactly like fetched ones. Ids are sequential numbers.
#[derive(Default)]
pub struct InMemoryInvoiceRepository {
  invoices: RwLock<Vec<Invoice>>,
  next_id: AtomicU64,
}

impl InMemoryInvoiceRepository {
  pub fn new() -> Self {
    Self::default()
  }

  fn allocate_id(&self) -> String {
    (self.next_id.fetch_add(1, Ordering::Relaxed) + 1).to_string()
  }

  fn materialize(&self, payload: &PersistablePayload) -> Result<Invoice, RepositoryError> {
    let json = serde_json::to_value(payload).map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let record: InvoiceRecord =
      serde_json::from_value(json).map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let mut invoice = Invoice::from(record);
    for item in invoice.items.iter_mut().filter(|item| item.key.is_local()) {
      item.key = LineItemKey::server(format!("item-{}", self.allocate_id()));
    }
    Ok(invoice)
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError> {
    Ok(self.invoices.read().await.clone())
  }

  async fn get_invoice(&self, id: &str) -> Result<Invoice, RepositoryError> {
    self
      .invoices
      .read()
      .await
      .iter()
      .find(|invoice| invoice.id.as_deref() == Some(id))
      .cloned()
      .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
  }

  async fn add_invoice(&self, payload: &PersistablePayload) -> Result<Invoice, RepositoryError> {
    let mut invoice = self.materialize(payload)?;
    let mut invoices = self.invoices.write().await;

    invoice.id = Some(self.allocate_id());
    if invoice.number.is_none() {
      let highest = invoices.iter().filter_map(|i| i.number).max().unwrap_or(0);
      invoice.number = Some(highest + 1);
    }
    invoices.push(invoice.clone());

    tracing::debug!(invoice_id = ?invoice.id, "Stored invoice in memory");
    Ok(invoice)
  }

  async fn edit_invoice(
    &self,
    id: &str,
    payload: &PersistablePayload,
  ) -> Result<Invoice, RepositoryError> {
    let mut invoice = self.materialize(payload)?;
    let mut invoices = self.invoices.write().await;

    let slot = invoices
      .iter_mut()
      .find(|existing| existing.id.as_deref() == Some(id))
      .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
    invoice.id = Some(id.to_string());
    invoice.number = invoice.number.or(slot.number);
    *slot = invoice.clone();

    Ok(invoice)
  }

  async fn delete_invoice(&self, id: &str) -> Result<(), RepositoryError> {
    let mut invoices = self.invoices.write().await;
    let before = invoices.len();
    invoices.retain(|invoice| invoice.id.as_deref() != Some(id));
    if invoices.len() == before {
      return Err(RepositoryError::NotFound(id.to_string()));
    }
    Ok(())
  }
}
