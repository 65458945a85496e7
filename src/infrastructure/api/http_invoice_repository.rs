use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use super::records::InvoiceRecord;
use crate::domain::invoice::{Invoice, InvoiceRepository, PersistablePayload, RepositoryError};
use crate::infrastructure::config::ApiConfig;

/// Invoice repository backed by the remote REST API
///
/// Every call goes to `{base_url}` or `{base_url}{id}`.
pub struct HttpInvoiceRepository {
  client: Client,
  base_url: String,
}

impl HttpInvoiceRepository {
  pub fn new(config: &ApiConfig) -> Result<Self, RepositoryError> {
    let client = Client::builder()
      .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
      .build()
      .map_err(|e| RepositoryError::Transport(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self::with_client(client, &config.base_url))
  }

  pub fn with_client(client: Client, base_url: &str) -> Self {
    let base_url = if base_url.ends_with('/') {
      base_url.to_string()
    } else {
      format!("{}/", base_url)
    };
    Self { client, base_url }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url_for(&self, id: &str) -> String {
    format!("{}{}", self.base_url, id)
  }

  async fn decode(response: Response) -> Result<Invoice, RepositoryError> {
    let record: InvoiceRecord = response
      .json()
      .await
      .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    Ok(record.into())
  }
}

fn transport(url: &str, e: reqwest::Error) -> RepositoryError {
  tracing::error!("Request to {} failed: {}", url, e);
  RepositoryError::Transport(e.to_string())
}

/// Passes successful responses through; maps everything else to an error
///
/// A 404 becomes `NotFound` only when `missing_id` names the requested invoice.
fn check_status(
  url: &str,
  response: Response,
  missing_id: Option<&str>,
) -> Result<Response, RepositoryError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  tracing::error!(%url, status = status.as_u16(), "Invoice API returned an error status");
  match missing_id {
    Some(id) if status == StatusCode::NOT_FOUND => Err(RepositoryError::NotFound(id.to_string())),
    _ => Err(RepositoryError::Status {
      status: status.as_u16(),
      reason: status.canonical_reason().unwrap_or_default().to_string(),
    }),
  }
}

#[async_trait]
impl InvoiceRepository for HttpInvoiceRepository {
  async fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError> {
    let url = &self.base_url;
    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| transport(url, e))?;
    let response = check_status(url, response, None)?;

    let records: Vec<InvoiceRecord> = response
      .json()
      .await
      .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    tracing::debug!(count = records.len(), "Fetched invoice list");

    Ok(records.into_iter().map(Invoice::from).collect())
  }

  async fn get_invoice(&self, id: &str) -> Result<Invoice, RepositoryError> {
    let url = self.url_for(id);
    let response = self
      .client
      .get(&url)
      .send()
      .await
      .map_err(|e| transport(&url, e))?;
    let response = check_status(&url, response, Some(id))?;

    let invoice = Self::decode(response).await?;
    tracing::debug!(invoice_id = %id, "Fetched invoice");
    Ok(invoice)
  }

  async fn add_invoice(&self, payload: &PersistablePayload) -> Result<Invoice, RepositoryError> {
    let url = &self.base_url;
    let response = self
      .client
      .post(url)
      .json(payload)
      .send()
      .await
      .map_err(|e| transport(url, e))?;
    let response = check_status(url, response, None)?;

    let invoice = Self::decode(response).await?;
    tracing::debug!(invoice_id = ?invoice.id, "Created invoice");
    Ok(invoice)
  }

  async fn edit_invoice(
    &self,
    id: &str,
    payload: &PersistablePayload,
  ) -> Result<Invoice, RepositoryError> {
    let url = self.url_for(id);
    let response = self
      .client
      .put(&url)
      .json(payload)
      .send()
      .await
      .map_err(|e| transport(&url, e))?;
    let response = check_status(&url, response, None)?;

    let invoice = Self::decode(response).await?;
    tracing::debug!(invoice_id = %id, "Updated invoice");
    Ok(invoice)
  }

  async fn delete_invoice(&self, id: &str) -> Result<(), RepositoryError> {
    let url = self.url_for(id);
    let response = self
      .client
      .delete(&url)
      .send()
      .await
      .map_err(|e| transport(&url, e))?;
    check_status(&url, response, None)?;

    tracing::debug!(invoice_id = %id, "Deleted invoice");
    Ok(())
  }
}
