use serde::Deserialize;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceRepository, RepositoryError};

#[derive(Debug, Deserialize)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: String,
}

pub struct DeleteInvoiceUseCase {
  repository: Arc<dyn InvoiceRepository>,
}

impl DeleteInvoiceUseCase {
  pub fn new(repository: Arc<dyn InvoiceRepository>) -> Self {
    Self { repository }
  }

  pub async fn execute(&self, command: DeleteInvoiceCommand) -> Result<(), RepositoryError> {
    self.repository.delete_invoice(&command.invoice_id).await?;
    tracing::info!(invoice_id = %command.invoice_id, "Invoice deleted");
    Ok(())
  }
}
