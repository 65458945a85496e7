use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::domain::invoice::lenient;
use crate::domain::invoice::{DATE_FORMAT, Invoice, LineItem, LineItemKey, Party};

/// Invoice as the remote API returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub id: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_u64")]
  pub number: Option<u64>,
  #[serde(default, deserialize_with = "lenient::string")]
  pub name: String,
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub created_at: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub valid_until: Option<String>,
  #[serde(default)]
  pub recipient: Option<Party>,
  #[serde(default)]
  pub sender: Option<Party>,
  #[serde(default)]
  pub items: Option<Vec<LineItemRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemRecord {
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub id: Option<String>,
  #[serde(default, deserialize_with = "lenient::string")]
  pub name: String,
  #[serde(default, deserialize_with = "lenient::string")]
  pub amount: String,
  #[serde(default, deserialize_with = "lenient::string")]
  pub unit: String,
  #[serde(default, deserialize_with = "lenient::string")]
  pub tax: String,
  #[serde(default, deserialize_with = "lenient::string")]
  pub price: String,
}

impl From<LineItemRecord> for LineItem {
  fn from(record: LineItemRecord) -> Self {
    let key = match record.id {
      Some(id) if !id.is_empty() => LineItemKey::server(id),
      _ => LineItemKey::local(),
    };
    LineItem {
      key,
      name: record.name,
      amount: record.amount,
      unit: record.unit,
      tax: record.tax,
      price: record.price,
    }
  }
}

impl From<InvoiceRecord> for Invoice {
  fn from(record: InvoiceRecord) -> Self {
    Invoice {
      id: record.id.filter(|id| !id.is_empty()),
      number: record.number,
      name: record.name,
      created_at: record.created_at.as_deref().and_then(parse_api_date),
      valid_until: record.valid_until.as_deref().and_then(parse_api_date),
      recipient: record.recipient.unwrap_or_default(),
      sender: record.sender.unwrap_or_default(),
      items: record
        .items
        .unwrap_or_default()
        .into_iter()
        .map(LineItem::from)
        .collect(),
    }
  }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and `Date.toString()` output
/// (`Fri Oct 16 2026 00:00:00 GMT+0200 (...)`); anything else is dropped
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
    return Some(date);
  }
  if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
    return Some(timestamp.date_naive());
  }
  if let Ok((date, _)) = NaiveDate::parse_and_remainder(trimmed, "%a %b %d %Y") {
    return Some(date);
  }
  tracing::warn!(value = %raw, "Unrecognized date in invoice record, ignoring");
  None
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_parse_api_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2026, 10, 16);
    assert_eq!(parse_api_date("2026-10-16"), expected);
    assert_eq!(parse_api_date("2026-10-16T08:30:00Z"), expected);
    assert_eq!(parse_api_date("2026-10-16T08:30:00.000+02:00"), expected);
    assert_eq!(
      parse_api_date("Fri Oct 16 2026 00:00:00 GMT+0200 (Central European Summer Time)"),
      expected
    );
    assert_eq!(parse_api_date(""), None);
    assert_eq!(parse_api_date("16/10/2026"), None);
  }

  #[test]
  fn test_record_decodes_into_invoice() {
    let record: InvoiceRecord = serde_json::from_value(json!({
      "id": 3,
      "number": "12",
      "name": "Invoice 3",
      "createdAt": "2026-03-01",
      "validUntil": null,
      "recipient": { "companyName": "Acme", "nip": "123" },
      "items": [
        { "id": "a1", "name": "Hosting", "amount": 2, "unit": "pcs", "tax": 23, "price": 9.5 },
        { "name": "Draft row" }
      ]
    }))
    .unwrap();

    let invoice = Invoice::from(record);

    assert_eq!(invoice.id.as_deref(), Some("3"));
    assert_eq!(invoice.number, Some(12));
    assert_eq!(invoice.created_at, NaiveDate::from_ymd_opt(2026, 3, 1));
    assert_eq!(invoice.valid_until, None);
    assert_eq!(invoice.recipient.tax_id.as_deref(), Some("123"));
    assert_eq!(invoice.sender, Party::default());
    assert_eq!(invoice.items[0].key, LineItemKey::server("a1"));
    assert_eq!(invoice.items[0].amount, "2");
    assert_eq!(invoice.items[0].price, "9.5");
    assert!(invoice.items[1].key.is_local());
    assert_eq!(invoice.items[1].price, "");
  }

  #[test]
  fn test_minimal_record() {
    let record: InvoiceRecord = serde_json::from_value(json!({})).unwrap();
    let invoice = Invoice::from(record);
    assert!(!invoice.is_persisted());
    assert!(invoice.items.is_empty());
  }
}
