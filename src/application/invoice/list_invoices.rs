use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceRepository, RepositoryError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceListItemDto {
  /// 1-based position in the list
  pub position: usize,
  pub id: Option<String>,
  pub name: String,
  pub created_at: Option<NaiveDate>,
  pub valid_until: Option<NaiveDate>,
  pub item_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  repository: Arc<dyn InvoiceRepository>,
}

impl ListInvoicesUseCase {
  pub fn new(repository: Arc<dyn InvoiceRepository>) -> Self {
    Self { repository }
  }

  pub async fn execute(&self) -> Result<ListInvoicesResponse, RepositoryError> {
    let invoices = self.repository.list_invoices().await?;

    let invoice_dtos = invoices
      .into_iter()
      .enumerate()
      .map(|(index, invoice)| InvoiceListItemDto {
        position: index + 1,
        item_count: invoice.item_count(),
        id: invoice.id,
        name: invoice.name,
        created_at: invoice.created_at,
        valid_until: invoice.valid_until,
      })
      .collect();

    Ok(ListInvoicesResponse {
      invoices: invoice_dtos,
    })
  }
}
