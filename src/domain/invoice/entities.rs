use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::value_objects::{ItemField, LineItemKey, PartyField};

// Party - Recipient or sender of an invoice
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
  #[serde(
    default,
    deserialize_with = "lenient::optional_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub id: Option<String>,
  #[serde(default, deserialize_with = "lenient::string")]
  pub company_name: String,
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub city: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub street: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub postcode: Option<String>,
  #[serde(default, rename = "nip", deserialize_with = "lenient::optional_string")]
  pub tax_id: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub phone: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub email: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_string")]
  pub bank_account: Option<String>,
}

impl Party {
  pub fn new(company_name: impl Into<String>) -> Self {
    Self {
      company_name: company_name.into(),
      ..Self::default()
    }
  }

  pub fn field(&self, field: PartyField) -> Option<&str> {
    match field {
      PartyField::Id => self.id.as_deref(),
      PartyField::CompanyName => Some(&self.company_name),
      PartyField::City => self.city.as_deref(),
      PartyField::Street => self.street.as_deref(),
      PartyField::Postcode => self.postcode.as_deref(),
      PartyField::TaxId => self.tax_id.as_deref(),
      PartyField::Phone => self.phone.as_deref(),
      PartyField::Email => self.email.as_deref(),
      PartyField::BankAccount => self.bank_account.as_deref(),
    }
  }

  /// Company name is always kept; optional fields collapse to `None` when blank
  pub fn set_field(&mut self, field: PartyField, value: &str) {
    let optional = || (!value.is_empty()).then(|| value.to_string());
    match field {
      PartyField::Id => self.id = optional(),
      PartyField::CompanyName => self.company_name = value.to_string(),
      PartyField::City => self.city = optional(),
      PartyField::Street => self.street = optional(),
      PartyField::Postcode => self.postcode = optional(),
      PartyField::TaxId => self.tax_id = optional(),
      PartyField::Phone => self.phone = optional(),
      PartyField::Email => self.email = optional(),
      PartyField::BankAccount => self.bank_account = optional(),
    }
  }
}

// Line Item - One billable row; values stay free-form until sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
  pub key: LineItemKey,
  pub name: String,
  pub amount: String,
  pub unit: String,
  pub tax: String,
  pub price: String,
}

impl LineItem {
  pub fn blank() -> Self {
    Self::with_key(LineItemKey::local())
  }

  pub fn with_key(key: LineItemKey) -> Self {
    Self {
      key,
      name: String::new(),
      amount: String::new(),
      unit: String::new(),
      tax: String::new(),
      price: String::new(),
    }
  }

  /// Every cell empty or whitespace
  pub fn is_blank(&self) -> bool {
    [&self.name, &self.amount, &self.unit, &self.tax, &self.price]
      .iter()
      .all(|cell| cell.trim().is_empty())
  }

  pub fn field(&self, field: ItemField) -> &str {
    match field {
      ItemField::Name => &self.name,
      ItemField::Amount => &self.amount,
      ItemField::Unit => &self.unit,
      ItemField::Tax => &self.tax,
      ItemField::Price => &self.price,
    }
  }

  pub fn set_field(&mut self, field: ItemField, value: &str) {
    let slot = match field {
      ItemField::Name => &mut self.name,
      ItemField::Amount => &mut self.amount,
      ItemField::Unit => &mut self.unit,
      ItemField::Tax => &mut self.tax,
      ItemField::Price => &mut self.price,
    };
    *slot = value.to_string();
  }
}

// Invoice - As stored by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invoice {
  pub id: Option<String>,
  pub number: Option<u64>,
  pub name: String,
  pub created_at: Option<NaiveDate>,
  pub valid_until: Option<NaiveDate>,
  pub recipient: Party,
  pub sender: Party,
  pub items: Vec<LineItem>,
}

impl Invoice {
  pub fn is_persisted(&self) -> bool {
    self.id.is_some()
  }

  pub fn item_count(&self) -> usize {
    self.items.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_party_blank_optional_fields_collapse() {
    let mut party = Party::new("Acme");
    party.set_field(PartyField::City, "Gdansk");
    assert_eq!(party.city.as_deref(), Some("Gdansk"));

    party.set_field(PartyField::City, "");
    assert_eq!(party.city, None);

    party.set_field(PartyField::CompanyName, "");
    assert_eq!(party.company_name, "");
  }

  #[test]
  fn test_line_item_blank_ignores_whitespace() {
    let mut item = LineItem::blank();
    assert!(item.is_blank());

    item.set_field(ItemField::Unit, "  ");
    assert!(item.is_blank());

    item.set_field(ItemField::Price, "10");
    assert!(!item.is_blank());
  }

  #[test]
  fn test_party_wire_names() {
    let mut party = Party::new("Acme");
    party.tax_id = Some("123-456".to_string());
    party.bank_account = Some("PL61".to_string());

    let json = serde_json::to_value(&party).unwrap();
    assert_eq!(json["companyName"], "Acme");
    assert_eq!(json["nip"], "123-456");
    assert_eq!(json["bankAccount"], "PL61");
    assert!(json.get("id").is_none());
  }

  #[test]
  fn test_party_decodes_loose_records() {
    let party: Party = serde_json::from_value(serde_json::json!({
      "id": 7,
      "companyName": null,
      "phone": 48123456789u64,
      "email": "a@b.pl"
    }))
    .unwrap();

    assert_eq!(party.id.as_deref(), Some("7"));
    assert_eq!(party.company_name, "");
    assert_eq!(party.phone.as_deref(), Some("48123456789"));
    assert_eq!(party.city, None);
  }

  #[test]
  fn test_line_item_fields() {
    let mut item = LineItem::blank();
    assert!(item.key.is_local());

    item.set_field(ItemField::Price, "10.50");
    assert_eq!(item.field(ItemField::Price), "10.50");
    assert_eq!(item.field(ItemField::Name), "");
  }
}
