use std::str::FromStr;

use super::errors::WebError;
use crate::domain::invoice::{LineItemKey, ValueObjectError};

/// Name of the submit button that says what the post is for
pub const ACTION_FIELD: &str = "action";
/// Hidden input repeated once per line item, in display order
pub const ROW_FIELD: &str = "row";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
  Save,
  AddItem,
  RemoveItem(LineItemKey),
}

impl FromStr for FormAction {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "save" => Ok(FormAction::Save),
      "add_item" => Ok(FormAction::AddItem),
      _ => match s.strip_prefix("remove_item:") {
        Some(key) => Ok(FormAction::RemoveItem(key.parse()?)),
        None => Err(ValueObjectError::UnknownField(format!("{}={}", ACTION_FIELD, s))),
      },
    }
  }
}

/// An invoice form post split into its action, row order and field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedForm {
  pub action: FormAction,
  pub rows: Vec<LineItemKey>,
  pub fields: Vec<(String, String)>,
}

impl PostedForm {
  /// Parses an `application/x-www-form-urlencoded` body
  ///
  /// Without an explicit action the post is a save, which is what pressing
  /// Enter in a text input sends.
  pub fn parse(body: &[u8]) -> Result<Self, WebError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
      .map_err(|e| WebError::BadRequest(format!("Malformed form body: {}", e)))?;

    let mut action = FormAction::Save;
    let mut rows = Vec::new();
    let mut fields = Vec::with_capacity(pairs.len());

    for (name, value) in pairs {
      match name.as_str() {
        ACTION_FIELD => {
          action = value
            .parse()
            .map_err(|e: ValueObjectError| WebError::BadRequest(e.to_string()))?
        }
        ROW_FIELD => rows.push(
          value
            .parse()
            .map_err(|e: ValueObjectError| WebError::BadRequest(e.to_string()))?,
        ),
        _ => fields.push((name, value)),
      }
    }

    Ok(Self {
      action,
      rows,
      fields,
    })
  }
}
