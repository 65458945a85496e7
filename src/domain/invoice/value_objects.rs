use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Unknown field path: {0}")]
  UnknownField(String),
  #[error("Invalid line item key: {0}")]
  InvalidLineItemKey(String),
  #[error("Invalid date '{0}', expected YYYY-MM-DD")]
  InvalidDate(String),
  #[error("Invalid invoice number: {0}")]
  InvalidNumber(String),
}

// Line Item Key - Row identity inside one form, tagged by origin
//
// New rows carry a client-generated key until the API assigns an id; hydrated
// rows keep the server id. The two never collide because the tag is part of
// the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LineItemKey {
  Local(Uuid),
  Server(String),
}

impl LineItemKey {
  pub fn local() -> Self {
    LineItemKey::Local(Uuid::new_v4())
  }

  pub fn server(id: impl Into<String>) -> Self {
    LineItemKey::Server(id.into())
  }

  pub fn is_local(&self) -> bool {
    matches!(self, LineItemKey::Local(_))
  }

  /// The id the API knows this row by, if it has one
  pub fn server_id(&self) -> Option<&str> {
    match self {
      LineItemKey::Local(_) => None,
      LineItemKey::Server(id) => Some(id),
    }
  }
}

impl fmt::Display for LineItemKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LineItemKey::Local(id) => write!(f, "local:{}", id),
      LineItemKey::Server(id) => write!(f, "server:{}", id),
    }
  }
}

impl FromStr for LineItemKey {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if let Some(local) = s.strip_prefix("local:") {
      let id = Uuid::parse_str(local)
        .map_err(|_| ValueObjectError::InvalidLineItemKey(s.to_string()))?;
      return Ok(LineItemKey::Local(id));
    }
    match s.strip_prefix("server:") {
      Some(id) if !id.is_empty() => Ok(LineItemKey::Server(id.to_string())),
      _ => Err(ValueObjectError::InvalidLineItemKey(s.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyRole {
  Recipient,
  Sender,
}

impl PartyRole {
  pub fn as_str(&self) -> &'static str {
    match self {
      PartyRole::Recipient => "recipient",
      PartyRole::Sender => "sender",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyField {
  Id,
  CompanyName,
  City,
  Street,
  Postcode,
  TaxId,
  Phone,
  Email,
  BankAccount,
}

impl PartyField {
  pub fn as_str(&self) -> &'static str {
    match self {
      PartyField::Id => "id",
      PartyField::CompanyName => "companyName",
      PartyField::City => "city",
      PartyField::Street => "street",
      PartyField::Postcode => "postcode",
      PartyField::TaxId => "nip",
      PartyField::Phone => "phone",
      PartyField::Email => "email",
      PartyField::BankAccount => "bankAccount",
    }
  }

  fn parse(s: &str) -> Option<Self> {
    match s {
      "id" => Some(PartyField::Id),
      "companyName" => Some(PartyField::CompanyName),
      "city" => Some(PartyField::City),
      "street" => Some(PartyField::Street),
      "postcode" => Some(PartyField::Postcode),
      "nip" => Some(PartyField::TaxId),
      "phone" => Some(PartyField::Phone),
      "email" => Some(PartyField::Email),
      "bankAccount" => Some(PartyField::BankAccount),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
  Name,
  Amount,
  Unit,
  Tax,
  Price,
}

impl ItemField {
  pub fn as_str(&self) -> &'static str {
    match self {
      ItemField::Name => "name",
      ItemField::Amount => "amount",
      ItemField::Unit => "unit",
      ItemField::Tax => "tax",
      ItemField::Price => "price",
    }
  }

  fn parse(s: &str) -> Option<Self> {
    match s {
      "name" => Some(ItemField::Name),
      "amount" => Some(ItemField::Amount),
      "unit" => Some(ItemField::Unit),
      "tax" => Some(ItemField::Tax),
      "price" => Some(ItemField::Price),
      _ => None,
    }
  }
}

/// Dotted path addressing one editable field of the invoice form
///
/// Line item paths embed the row key: `items.local:<uuid>.name`,
/// `items.server:<id>.price`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
  Name,
  Number,
  CreatedAt,
  ValidUntil,
  Party(PartyRole, PartyField),
  Item(LineItemKey, ItemField),
}

impl FieldPath {
  pub fn recipient(field: PartyField) -> Self {
    FieldPath::Party(PartyRole::Recipient, field)
  }

  pub fn sender(field: PartyField) -> Self {
    FieldPath::Party(PartyRole::Sender, field)
  }

  pub fn item(key: LineItemKey, field: ItemField) -> Self {
    FieldPath::Item(key, field)
  }

  /// Whether a required-field rule is attached to this path
  pub fn is_required(&self) -> bool {
    matches!(
      self,
      FieldPath::Name
        | FieldPath::Party(_, PartyField::CompanyName)
        | FieldPath::Item(_, ItemField::Name)
    )
  }
}

impl fmt::Display for FieldPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FieldPath::Name => write!(f, "name"),
      FieldPath::Number => write!(f, "number"),
      FieldPath::CreatedAt => write!(f, "createdAt"),
      FieldPath::ValidUntil => write!(f, "validUntil"),
      FieldPath::Party(role, field) => write!(f, "{}.{}", role.as_str(), field.as_str()),
      FieldPath::Item(key, field) => write!(f, "items.{}.{}", key, field.as_str()),
    }
  }
}

impl FromStr for FieldPath {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let unknown = || ValueObjectError::UnknownField(s.to_string());

    match s {
      "name" => return Ok(FieldPath::Name),
      "number" => return Ok(FieldPath::Number),
      "createdAt" => return Ok(FieldPath::CreatedAt),
      "validUntil" => return Ok(FieldPath::ValidUntil),
      _ => {}
    }

    if let Some(rest) = s.strip_prefix("items.") {
      // The key may itself contain dots (server ids), the field never does
      let (key, field) = rest.rsplit_once('.').ok_or_else(unknown)?;
      let field = ItemField::parse(field).ok_or_else(unknown)?;
      return Ok(FieldPath::Item(key.parse()?, field));
    }

    let (role, field) = s.split_once('.').ok_or_else(unknown)?;
    let role = match role {
      "recipient" => PartyRole::Recipient,
      "sender" => PartyRole::Sender,
      _ => return Err(unknown()),
    };
    let field = PartyField::parse(field).ok_or_else(unknown)?;
    Ok(FieldPath::Party(role, field))
  }
}

// Line Value - amount/tax/price as sent to the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LineValue {
  Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
  Text(String),
}

impl LineValue {
  /// Numbers go out as JSON numbers, anything else verbatim
  pub fn parse(raw: &str) -> Self {
    let trimmed = raw.trim();
    match Decimal::from_str(trimmed) {
      Ok(value) if !trimmed.is_empty() => LineValue::Number(value),
      _ => LineValue::Text(raw.to_string()),
    }
  }
}

impl fmt::Display for LineValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LineValue::Number(value) => write!(f, "{}", value),
      LineValue::Text(text) => write!(f, "{}", text),
    }
  }
}
