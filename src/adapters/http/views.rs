use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::locale::RequestLocale;
use crate::application::invoice::FormFlow;
use crate::domain::invoice::{
  FieldPath, InvoiceFormModel, ItemField, LineItem, PartyField, PartyRole,
};
use crate::domain::presentation::{Localizer, Notification, Route};

const PARTY_FIELDS: [(PartyField, &str); 8] = [
  (PartyField::CompanyName, "INVOICE.COMPANY_NAME"),
  (PartyField::City, "INVOICE.CITY"),
  (PartyField::Street, "INVOICE.STREET"),
  (PartyField::Postcode, "INVOICE.POSTCODE"),
  (PartyField::TaxId, "INVOICE.NIP"),
  (PartyField::Phone, "INVOICE.PHONE"),
  (PartyField::Email, "INVOICE.EMAIL"),
  (PartyField::BankAccount, "INVOICE.BANK_ACCOUNT"),
];

/// One input as the template renders it
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
  pub path: String,
  pub value: String,
  pub label: Option<String>,
  pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PartyView {
  pub title: String,
  pub id: FieldView,
  pub fields: Vec<FieldView>,
}

#[derive(Debug, Serialize)]
pub struct ItemView {
  pub key: String,
  pub remove_action: String,
  pub name: FieldView,
  pub amount: FieldView,
  pub unit: FieldView,
  pub tax: FieldView,
  pub price: FieldView,
}

/// Everything the invoice form template needs
#[derive(Debug, Serialize)]
pub struct FormView {
  pub title: String,
  pub action_url: String,
  pub cancel_url: String,
  pub name: FieldView,
  pub number: FieldView,
  pub created_at: FieldView,
  pub valid_until: FieldView,
  pub recipient: PartyView,
  pub sender: PartyView,
  pub items: Vec<ItemView>,
  pub submittable: bool,
}

impl FormView {
  pub fn build(model: &InvoiceFormModel, flow: &FormFlow, localizer: &dyn Localizer) -> Self {
    let field = |path: FieldPath, label: Option<&str>| FieldView {
      value: model.value(&path).unwrap_or_default(),
      error: model.errors().get(&path).map(|key| localizer.translate(key)),
      label: label.map(|key| localizer.translate(key)),
      path: path.to_string(),
    };

    let party = |role: PartyRole, title: &str| PartyView {
      title: localizer.translate(title),
      id: field(FieldPath::Party(role, PartyField::Id), None),
      fields: PARTY_FIELDS
        .iter()
        .map(|(party_field, label)| field(FieldPath::Party(role, *party_field), Some(*label)))
        .collect(),
    };

    let item = |row: &LineItem| {
      let cell = |item_field: ItemField| field(FieldPath::item(row.key.clone(), item_field), None);
      ItemView {
        key: row.key.to_string(),
        remove_action: format!("remove_item:{}", row.key),
        name: cell(ItemField::Name),
        amount: cell(ItemField::Amount),
        unit: cell(ItemField::Unit),
        tax: cell(ItemField::Tax),
        price: cell(ItemField::Price),
      }
    };

    let (title, action_url) = match flow {
      FormFlow::Create => ("INVOICE.NEW_TITLE", Route::NewInvoice.path()),
      FormFlow::Edit(id) => ("INVOICE.EDIT_TITLE", Route::EditInvoice(id.clone()).path()),
    };

    FormView {
      title: localizer.translate(title),
      action_url,
      cancel_url: Route::InvoiceList.path(),
      name: field(FieldPath::Name, Some("INVOICE.NAME")),
      number: field(FieldPath::Number, Some("INVOICE.NUMBER")),
      created_at: field(FieldPath::CreatedAt, Some("INVOICE.CREATED_DATE")),
      valid_until: field(FieldPath::ValidUntil, Some("INVOICE.VALID_UNTIL_DATE")),
      recipient: party(PartyRole::Recipient, "INVOICE.RECIPIENT"),
      sender: party(PartyRole::Sender, "INVOICE.SENDER"),
      items: model.items().iter().map(item).collect(),
      submittable: model.is_submittable(),
    }
  }
}

fn branch<'a>(
  node: &'a mut Map<String, Value>,
  segment: &str,
) -> Option<&'a mut Map<String, Value>> {
  match node
    .entry(segment.to_string())
    .or_insert_with(|| Value::Object(Map::new()))
  {
    Value::Object(map) => Some(map),
    _ => None,
  }
}

/// Rebuilds `{"INVOICE": {"NAME": ..}}` from dotted keys for template lookups
pub fn nested_labels(entries: BTreeMap<String, String>) -> Value {
  let mut root = Map::new();
  for (key, text) in entries {
    let mut segments: Vec<&str> = key.split('.').collect();
    let Some(leaf) = segments.pop() else {
      continue;
    };

    match segments
      .into_iter()
      .try_fold(&mut root, |node, segment| branch(node, segment))
    {
      Some(parent) => {
        parent.entry(leaf.to_string()).or_insert(Value::String(text));
      }
      None => tracing::warn!(key = %key, "Translation key shadows a leaf, skipping"),
    }
  }
  Value::Object(root)
}

/// Context shared by every page: labels, language and a pending notification
pub fn page_context(locale: &RequestLocale, notification: Option<&Notification>) -> tera::Context {
  let mut context = tera::Context::new();
  context.insert("labels", &nested_labels(locale.localizer().entries()));
  context.insert("language", locale.language().code());
  context.insert("notification", &notification);
  context.insert("list_url", &Route::InvoiceList.path());
  context.insert("new_url", &Route::NewInvoice.path());
  context
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::InvoiceSource;
  use crate::infrastructure::i18n::CatalogLocalizer;

  #[test]
  fn test_nested_labels() {
    let mut entries = BTreeMap::new();
    entries.insert("NO".to_string(), "No.".to_string());
    entries.insert("INVOICE.NAME".to_string(), "Name*".to_string());
    entries.insert("INVOICE.CITY".to_string(), "City".to_string());

    let labels = nested_labels(entries);

    assert_eq!(labels["NO"], "No.");
    assert_eq!(labels["INVOICE"]["NAME"], "Name*");
    assert_eq!(labels["INVOICE"]["CITY"], "City");
  }

  #[test]
  fn test_form_view_carries_values_and_errors() {
    let localizer = CatalogLocalizer::default();
    let mut model = InvoiceFormModel::initialize(InvoiceSource::Blank);
    model.set_field("recipient.companyName", "Acme").unwrap();
    model.validate(None).unwrap();

    let view = FormView::build(&model, &FormFlow::Edit("9".to_string()), &localizer);

    assert_eq!(view.action_url, "/invoice-edit/9");
    assert_eq!(view.name.error.as_deref(), Some("Name is required"));
    assert_eq!(view.name.label.as_deref(), Some("Name*"));
    assert_eq!(view.recipient.fields[0].value, "Acme");
    assert_eq!(view.recipient.fields[0].error, None);
    assert_eq!(view.recipient.fields[4].path, "recipient.nip");
    assert_eq!(view.items.len(), 2);
    assert!(view.items[0].remove_action.starts_with("remove_item:local:"));
    assert!(!view.submittable);
  }
}
