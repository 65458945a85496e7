use serde::Serialize;

use super::entities::Party;
use super::value_objects::LineValue;

/// Date format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Server-ready representation of the form, body of create and update calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistablePayload {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub number: Option<u64>,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_at: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub valid_until: Option<String>,
  pub recipient: Party,
  pub sender: Party,
  pub items: Vec<LineItemPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemPayload {
  /// Only rows the API already knows carry an id
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  pub name: String,
  pub amount: LineValue,
  pub unit: String,
  pub tax: LineValue,
  pub price: LineValue,
}
