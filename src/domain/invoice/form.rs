use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

use super::entities::{Invoice, LineItem, Party};
use super::errors::FormError;
use super::line_items::LineItemCollection;
use super::payload::{DATE_FORMAT, LineItemPayload, PersistablePayload};
use super::value_objects::{
  FieldPath, ItemField, LineItemKey, LineValue, PartyField, PartyRole, ValueObjectError,
};

/// Message keys for required-field failures, resolved by the localizer
pub mod messages {
  pub const NAME_REQUIRED: &str = "VALIDATION.NAME_REQUIRED";
  pub const COMPANY_NAME_REQUIRED: &str = "VALIDATION.COMPANY_NAME_REQUIRED";
  pub const ITEM_NAME_REQUIRED: &str = "VALIDATION.ITEM_NAME_REQUIRED";
  pub const INVALID_NUMBER: &str = "VALIDATION.INVALID_NUMBER";
  pub const INVALID_DATE: &str = "VALIDATION.INVALID_DATE";
}

/// Blank rows a new invoice starts with
const DEFAULT_BLANK_ROWS: usize = 2;

/// Per-field error messages keyed by dotted path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
  errors: BTreeMap<String, &'static str>,
}

impl ValidationResult {
  pub fn is_valid(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn get(&self, path: &FieldPath) -> Option<&'static str> {
    self.errors.get(&path.to_string()).copied()
  }

  pub fn contains(&self, path: &FieldPath) -> bool {
    self.get(path).is_some()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
    self.errors.iter().map(|(path, message)| (path.as_str(), *message))
  }

  fn record(&mut self, path: &FieldPath, message: Option<&'static str>) {
    match message {
      Some(message) => {
        self.errors.insert(path.to_string(), message);
      }
      None => {
        self.errors.remove(&path.to_string());
      }
    }
  }

  fn forget_row(&mut self, key: &LineItemKey) {
    let prefix = format!("items.{}.", key);
    self.errors.retain(|path, _| !path.starts_with(&prefix));
  }
}

/// Where a form model gets its initial values from
#[derive(Debug, Clone, Copy)]
pub enum InvoiceSource<'a> {
  /// Create flow: empty header, today's dates, two blank rows
  Blank,
  /// Edit flow: a fetched invoice, copied
  Existing(&'a Invoice),
}

/// Editable state of exactly one invoice plus its validation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceFormModel {
  id: Option<String>,
  number: Option<u64>,
  name: String,
  created_at: Option<NaiveDate>,
  valid_until: Option<NaiveDate>,
  recipient: Party,
  sender: Party,
  items: LineItemCollection,
  // Raw text of number/date inputs that did not parse, keyed by path
  rejected: BTreeMap<String, String>,
  errors: ValidationResult,
}

impl InvoiceFormModel {
  pub fn initialize(source: InvoiceSource<'_>) -> Self {
    match source {
      InvoiceSource::Blank => {
        let today = Local::now().date_naive();
        let mut items = LineItemCollection::new();
        for _ in 0..DEFAULT_BLANK_ROWS {
          items.append(LineItem::blank());
        }
        Self {
          id: None,
          number: None,
          name: String::new(),
          created_at: Some(today),
          valid_until: Some(today),
          recipient: Party::default(),
          sender: Party::default(),
          items,
          rejected: BTreeMap::new(),
          errors: ValidationResult::default(),
        }
      }
      InvoiceSource::Existing(invoice) => {
        let mut items = LineItemCollection::new();
        items.replace_all(invoice.items.clone());
        Self {
          id: invoice.id.clone(),
          number: invoice.number,
          name: invoice.name.clone(),
          created_at: invoice.created_at,
          valid_until: invoice.valid_until,
          recipient: invoice.recipient.clone(),
          sender: invoice.sender.clone(),
          items,
          rejected: BTreeMap::new(),
          errors: ValidationResult::default(),
        }
      }
    }
  }

  /// Rebuilds a model from previously rendered field values
  ///
  /// Rows are created for `row_keys` in order before any value is applied.
  /// No rule runs; call [`validate`](Self::validate) when errors are wanted.
  pub fn restore<I>(
    id: Option<String>,
    row_keys: Vec<LineItemKey>,
    fields: I,
  ) -> Result<Self, FormError>
  where
    I: IntoIterator<Item = (String, String)>,
  {
    let shell = Invoice {
      id,
      items: row_keys.into_iter().map(LineItem::with_key).collect(),
      ..Invoice::default()
    };
    let mut model = Self::initialize(InvoiceSource::Existing(&shell));
    for (path, value) in fields {
      let path: FieldPath = path.parse()?;
      model.apply(&path, &value)?;
    }
    Ok(model)
  }

  /// Updates one field by dotted path and re-runs its rule, if it has one
  ///
  /// Returns the field's current error message.
  pub fn set_field(&mut self, path: &str, value: &str) -> Result<Option<&'static str>, FormError> {
    let path: FieldPath = path.parse()?;
    self.set(&path, value)
  }

  pub fn set(&mut self, path: &FieldPath, value: &str) -> Result<Option<&'static str>, FormError> {
    self.apply(path, value)?;
    let message = self.check(path)?;
    self.errors.record(path, message);
    Ok(message)
  }

  /// Validates one field, or the whole model when `path` is `None`
  pub fn validate(&mut self, path: Option<&str>) -> Result<ValidationResult, FormError> {
    match path {
      Some(path) => {
        let path: FieldPath = path.parse()?;
        let message = self.check(&path)?;
        self.errors.record(&path, message);
        let mut result = ValidationResult::default();
        result.record(&path, message);
        Ok(result)
      }
      None => {
        self.errors = self.check_all();
        Ok(self.errors.clone())
      }
    }
  }

  /// True when every required field is filled and every number and date parsed
  ///
  /// The item count does not matter.
  pub fn is_submittable(&self) -> bool {
    self.check_all().is_valid()
  }

  pub fn to_persistable_payload(&self) -> PersistablePayload {
    PersistablePayload {
      id: self.id.clone(),
      number: self.number,
      name: self.name.clone(),
      created_at: self
        .created_at
        .map(|date| date.format(DATE_FORMAT).to_string()),
      valid_until: self
        .valid_until
        .map(|date| date.format(DATE_FORMAT).to_string()),
      recipient: self.recipient.clone(),
      sender: self.sender.clone(),
      items: self
        .items
        .iter()
        .filter(|item| !is_placeholder(item))
        .map(|item| LineItemPayload {
          id: item.key.server_id().map(str::to_string),
          name: item.name.clone(),
          amount: LineValue::parse(&item.amount),
          unit: item.unit.clone(),
          tax: LineValue::parse(&item.tax),
          price: LineValue::parse(&item.price),
        })
        .collect(),
    }
  }

  pub fn add_line_item(&mut self) -> LineItemKey {
    self.items.append(LineItem::blank())
  }

  pub fn remove_line_item(&mut self, key: &LineItemKey) -> bool {
    let removed = self.items.remove_by_id(key);
    if removed {
      self.errors.forget_row(key);
    }
    removed
  }

  /// Current text of a field, as an input would show it
  pub fn value(&self, path: &FieldPath) -> Option<String> {
    if let Some(raw) = self.rejected.get(&path.to_string()) {
      return Some(raw.clone());
    }
    match path {
      FieldPath::Name => Some(self.name.clone()),
      FieldPath::Number => self.number.map(|n| n.to_string()),
      FieldPath::CreatedAt => self.created_at.map(|d| d.format(DATE_FORMAT).to_string()),
      FieldPath::ValidUntil => self.valid_until.map(|d| d.format(DATE_FORMAT).to_string()),
      FieldPath::Party(role, field) => self.party(*role).field(*field).map(str::to_string),
      FieldPath::Item(key, field) => self
        .items
        .get(key)
        .map(|item| item.field(*field).to_string()),
    }
  }

  pub fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn created_at(&self) -> Option<NaiveDate> {
    self.created_at
  }

  pub fn valid_until(&self) -> Option<NaiveDate> {
    self.valid_until
  }

  pub fn party(&self, role: PartyRole) -> &Party {
    match role {
      PartyRole::Recipient => &self.recipient,
      PartyRole::Sender => &self.sender,
    }
  }

  pub fn items(&self) -> &LineItemCollection {
    &self.items
  }

  pub fn errors(&self) -> &ValidationResult {
    &self.errors
  }

  fn party_mut(&mut self, role: PartyRole) -> &mut Party {
    match role {
      PartyRole::Recipient => &mut self.recipient,
      PartyRole::Sender => &mut self.sender,
    }
  }

  fn apply(&mut self, path: &FieldPath, value: &str) -> Result<(), FormError> {
    match path {
      FieldPath::Name => self.name = value.to_string(),
      FieldPath::Number => {
        if let Some(number) = self.accept(path, value, parse_number) {
          self.number = number;
        }
      }
      FieldPath::CreatedAt => {
        if let Some(date) = self.accept(path, value, parse_date) {
          self.created_at = date;
        }
      }
      FieldPath::ValidUntil => {
        if let Some(date) = self.accept(path, value, parse_date) {
          self.valid_until = date;
        }
      }
      FieldPath::Party(role, field) => self.party_mut(*role).set_field(*field, value),
      FieldPath::Item(key, field) => self
        .items
        .get_mut(key)
        .ok_or_else(|| FormError::UnknownLineItem(key.clone()))?
        .set_field(*field, value),
    }
    Ok(())
  }

  /// Parses typed input, remembering the raw text when it does not parse
  fn accept<T>(
    &mut self,
    path: &FieldPath,
    value: &str,
    parse: fn(&str) -> Result<T, ValueObjectError>,
  ) -> Option<T> {
    match parse(value) {
      Ok(parsed) => {
        self.rejected.remove(&path.to_string());
        Some(parsed)
      }
      Err(_) => {
        self.rejected.insert(path.to_string(), value.to_string());
        None
      }
    }
  }

  fn rejection(&self, path: &FieldPath, message: &'static str) -> Option<&'static str> {
    self.rejected.contains_key(&path.to_string()).then_some(message)
  }

  fn check(&self, path: &FieldPath) -> Result<Option<&'static str>, FormError> {
    let message = match path {
      FieldPath::Name => required(&self.name, messages::NAME_REQUIRED),
      FieldPath::Number => self.rejection(path, messages::INVALID_NUMBER),
      FieldPath::CreatedAt | FieldPath::ValidUntil => {
        self.rejection(path, messages::INVALID_DATE)
      }
      FieldPath::Party(role, PartyField::CompanyName) => required(
        &self.party(*role).company_name,
        messages::COMPANY_NAME_REQUIRED,
      ),
      FieldPath::Item(key, ItemField::Name) => {
        let item = self
          .items
          .get(key)
          .ok_or_else(|| FormError::UnknownLineItem(key.clone()))?;
        if is_placeholder(item) {
          None
        } else {
          required(&item.name, messages::ITEM_NAME_REQUIRED)
        }
      }
      FieldPath::Item(key, _) if self.items.get(key).is_none() => {
        return Err(FormError::UnknownLineItem(key.clone()));
      }
      _ => None,
    };
    Ok(message)
  }

  fn check_all(&self) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mut record = |path: FieldPath, value: &str, message: &'static str| {
      result.record(&path, required(value, message));
    };

    record(FieldPath::Name, &self.name, messages::NAME_REQUIRED);
    record(
      FieldPath::recipient(PartyField::CompanyName),
      &self.recipient.company_name,
      messages::COMPANY_NAME_REQUIRED,
    );
    record(
      FieldPath::sender(PartyField::CompanyName),
      &self.sender.company_name,
      messages::COMPANY_NAME_REQUIRED,
    );
    for item in self.items.iter().filter(|item| !is_placeholder(item)) {
      record(
        FieldPath::item(item.key.clone(), ItemField::Name),
        &item.name,
        messages::ITEM_NAME_REQUIRED,
      );
    }
    for path in [FieldPath::Number, FieldPath::CreatedAt, FieldPath::ValidUntil] {
      if let Ok(message) = self.check(&path) {
        result.record(&path, message);
      }
    }
    result
  }
}

/// A row added by the form and never typed into; neither validated nor sent
fn is_placeholder(item: &LineItem) -> bool {
  item.key.is_local() && item.is_blank()
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
  value.trim().is_empty().then_some(message)
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, ValueObjectError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
    .map(Some)
    .map_err(|_| ValueObjectError::InvalidDate(value.to_string()))
}

fn parse_number(value: &str) -> Result<Option<u64>, ValueObjectError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  trimmed
    .parse()
    .map(Some)
    .map_err(|_| ValueObjectError::InvalidNumber(value.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fetched_invoice() -> Invoice {
    let mut hosting = LineItem::with_key(LineItemKey::server("11"));
    hosting.name = "Hosting".to_string();
    hosting.amount = "2".to_string();
    hosting.unit = "month".to_string();
    hosting.tax = "23".to_string();
    hosting.price = "49.90".to_string();

    let mut recipient = Party::new("Acme");
    recipient.id = Some("r-1".to_string());
    recipient.city = Some("Krakow".to_string());
    let mut sender = Party::new("Acme Corp");
    sender.tax_id = Some("525-000-00-00".to_string());

    Invoice {
      id: Some("123".to_string()),
      number: Some(7),
      name: "Invoice 7".to_string(),
      created_at: NaiveDate::from_ymd_opt(2026, 3, 1),
      valid_until: NaiveDate::from_ymd_opt(2026, 3, 15),
      recipient,
      sender,
      items: vec![hosting],
    }
  }

  fn valid_blank_model() -> InvoiceFormModel {
    let mut model = InvoiceFormModel::initialize(InvoiceSource::Blank);
    model.set_field("name", "Invoice 1").unwrap();
    model.set_field("recipient.companyName", "Acme").unwrap();
    model.set_field("sender.companyName", "Acme Corp").unwrap();
    let keys: Vec<_> = model.items().iter().map(|i| i.key.clone()).collect();
    for key in keys {
      model.remove_line_item(&key);
    }
    model
  }

  #[test]
  fn test_blank_source_seeds_two_rows_and_today() {
    let model = InvoiceFormModel::initialize(InvoiceSource::Blank);
    assert_eq!(model.items().len(), 2);
    assert!(model.items().iter().all(|item| item.key.is_local()));
    assert_eq!(model.created_at(), Some(Local::now().date_naive()));
    assert!(model.id().is_none());
  }

  #[test]
  fn test_existing_source_is_copied() {
    let invoice = fetched_invoice();
    let before = invoice.clone();
    let mut model = InvoiceFormModel::initialize(InvoiceSource::Existing(&invoice));

    model.set_field("name", "Renamed").unwrap();
    model.add_line_item();

    assert_eq!(invoice, before);
    assert_eq!(model.items().len(), 2);
  }

  #[test]
  fn test_existing_source_with_no_items_stays_empty() {
    let invoice = Invoice {
      items: Vec::new(),
      ..fetched_invoice()
    };
    let model = InvoiceFormModel::initialize(InvoiceSource::Existing(&invoice));
    assert!(model.items().is_empty());
  }

  #[test]
  fn test_required_fields_reject_empty_and_whitespace() {
    let required_paths = ["name", "recipient.companyName", "sender.companyName"];
    for path in required_paths {
      for blank in ["", "   ", "\t"] {
        let mut model = valid_blank_model();
        let message = model.set_field(path, blank).unwrap();
        assert!(message.is_some(), "{} accepted {:?}", path, blank);
        assert!(!model.validate(Some(path)).unwrap().is_valid());
      }

      let mut model = valid_blank_model();
      assert_eq!(model.set_field(path, "filled").unwrap(), None);
      assert!(model.validate(Some(path)).unwrap().is_valid());
    }
  }

  #[test]
  fn test_line_item_name_is_required() {
    let mut model = valid_blank_model();
    let key = model.add_line_item();
    let path = FieldPath::item(key.clone(), ItemField::Name).to_string();
    model
      .set(&FieldPath::item(key.clone(), ItemField::Price), "10")
      .unwrap();

    let result = model.validate(Some(&path)).unwrap();
    assert_eq!(
      result.get(&FieldPath::item(key.clone(), ItemField::Name)),
      Some(messages::ITEM_NAME_REQUIRED)
    );
    assert!(!model.is_submittable());

    assert_eq!(model.set_field(&path, "Consulting").unwrap(), None);
    assert!(model.is_submittable());
  }

  #[test]
  fn test_optional_fields_have_no_rule() {
    let mut model = valid_blank_model();
    assert_eq!(model.set_field("recipient.city", "").unwrap(), None);
    assert!(model.validate(Some("recipient.city")).unwrap().is_valid());
  }

  #[test]
  fn test_not_submittable_when_any_required_field_empty() {
    for path in ["name", "recipient.companyName", "sender.companyName"] {
      let mut model = valid_blank_model();
      model.set_field(path, " ").unwrap();
      assert!(!model.is_submittable());

      model.add_line_item();
      assert!(!model.is_submittable());
    }
  }

  #[test]
  fn test_empty_item_list_is_submittable() {
    let model = valid_blank_model();
    assert!(model.items().is_empty());
    assert!(model.is_submittable());
  }

  #[test]
  fn test_full_validation_reports_every_failure() {
    let mut model = InvoiceFormModel::initialize(InvoiceSource::Blank);
    let result = model.validate(None).unwrap();

    // name and two company names; untouched rows are skipped
    assert_eq!(result.len(), 3);
    assert_eq!(model.errors(), &result);
    assert!(result.contains(&FieldPath::sender(PartyField::CompanyName)));
  }

  #[test]
  fn test_removing_row_clears_its_errors() {
    let mut model = InvoiceFormModel::initialize(InvoiceSource::Blank);
    let keys: Vec<_> = model.items().iter().map(|i| i.key.clone()).collect();
    for key in &keys {
      model
        .set(&FieldPath::item(key.clone(), ItemField::Unit), "pcs")
        .unwrap();
    }
    model.validate(None).unwrap();
    assert_eq!(model.errors().len(), 5);

    assert!(model.remove_line_item(&keys[0]));
    assert!(!model
      .errors()
      .contains(&FieldPath::item(keys[0].clone(), ItemField::Name)));
    assert_eq!(model.errors().len(), 4);
  }

  #[test]
  fn test_untouched_rows_are_neither_validated_nor_sent() {
    let mut model = InvoiceFormModel::initialize(InvoiceSource::Blank);
    model.set_field("name", "Invoice 1").unwrap();
    model.set_field("recipient.companyName", "Acme").unwrap();
    model.set_field("sender.companyName", "Acme Corp").unwrap();

    assert!(model.validate(None).unwrap().is_valid());
    assert!(model.is_submittable());
    assert!(model.to_persistable_payload().items.is_empty());

    let key = model.items().to_ordered_sequence()[1].key.clone();
    model
      .set(&FieldPath::item(key.clone(), ItemField::Amount), "3")
      .unwrap();
    assert!(!model.is_submittable());
    assert_eq!(
      model.validate(None).unwrap().get(&FieldPath::item(key, ItemField::Name)),
      Some(messages::ITEM_NAME_REQUIRED)
    );
    assert_eq!(model.to_persistable_payload().items.len(), 1);
  }

  #[test]
  fn test_blank_server_row_still_needs_a_name() {
    let invoice = Invoice {
      items: vec![LineItem::with_key(LineItemKey::server("11"))],
      ..fetched_invoice()
    };
    let mut model = InvoiceFormModel::initialize(InvoiceSource::Existing(&invoice));

    assert!(!model.validate(None).unwrap().is_valid());
    assert_eq!(model.to_persistable_payload().items.len(), 1);
  }

  #[test]
  fn test_unknown_paths_and_rows() {
    let mut model = valid_blank_model();
    assert!(matches!(
      model.set_field("recipient.fax", "1"),
      Err(FormError::Value(ValueObjectError::UnknownField(_)))
    ));

    let ghost = FieldPath::item(LineItemKey::local(), ItemField::Name).to_string();
    assert!(matches!(
      model.set_field(&ghost, "x"),
      Err(FormError::UnknownLineItem(_))
    ));
    assert!(model.validate(Some(&ghost)).is_err());
  }

  #[test]
  fn test_dates_and_number() {
    let mut model = valid_blank_model();
    model.set_field("createdAt", "2026-01-31").unwrap();
    assert_eq!(model.created_at(), NaiveDate::from_ymd_opt(2026, 1, 31));

    model.set_field("validUntil", "").unwrap();
    assert_eq!(model.valid_until(), None);

    model.set_field("number", "12").unwrap();
    assert_eq!(model.value(&FieldPath::Number).as_deref(), Some("12"));
    assert!(model.is_submittable());
  }

  #[test]
  fn test_unparsed_dates_and_numbers_become_field_errors() {
    let mut model = valid_blank_model();
    model.set_field("createdAt", "2026-01-31").unwrap();

    assert_eq!(
      model.set_field("createdAt", "31.01.2026").unwrap(),
      Some(messages::INVALID_DATE)
    );
    assert_eq!(model.created_at(), NaiveDate::from_ymd_opt(2026, 1, 31));
    assert_eq!(
      model.value(&FieldPath::CreatedAt).as_deref(),
      Some("31.01.2026")
    );

    for raw in ["1.5", "-1", "1e3"] {
      assert_eq!(
        model.set_field("number", raw).unwrap(),
        Some(messages::INVALID_NUMBER)
      );
      assert_eq!(model.value(&FieldPath::Number).as_deref(), Some(raw));
    }
    assert!(!model.is_submittable());
    assert_eq!(model.validate(None).unwrap().len(), 2);

    assert_eq!(model.set_field("number", "").unwrap(), None);
    assert_eq!(model.set_field("createdAt", "2026-02-01").unwrap(), None);
    assert!(model.is_submittable());
    assert_eq!(model.value(&FieldPath::Number), None);
  }

  #[test]
  fn test_payload_reproduces_hydrated_values() {
    let invoice = fetched_invoice();
    let model = InvoiceFormModel::initialize(InvoiceSource::Existing(&invoice));
    let payload = model.to_persistable_payload();

    assert_eq!(payload.id.as_deref(), Some("123"));
    assert_eq!(payload.number, Some(7));
    assert_eq!(payload.name, invoice.name);
    assert_eq!(payload.created_at.as_deref(), Some("2026-03-01"));
    assert_eq!(payload.valid_until.as_deref(), Some("2026-03-15"));
    assert_eq!(payload.recipient, invoice.recipient);
    assert_eq!(payload.sender, invoice.sender);

    let item = &payload.items[0];
    let source = &invoice.items[0];
    assert_eq!(item.id.as_deref(), Some("11"));
    assert_eq!(item.name, source.name);
    assert_eq!(item.amount.to_string(), source.amount);
    assert_eq!(item.unit, source.unit);
    assert_eq!(item.tax.to_string(), source.tax);
    assert_eq!(item.price.to_string(), source.price);
  }

  #[test]
  fn test_payload_never_sends_local_keys() {
    let invoice = fetched_invoice();
    let mut model = InvoiceFormModel::initialize(InvoiceSource::Existing(&invoice));
    let key = model.add_line_item();
    model
      .set(&FieldPath::item(key, ItemField::Name), "Support")
      .unwrap();

    let payload = model.to_persistable_payload();
    assert_eq!(payload.items.len(), 2);
    assert_eq!(payload.items[1].id, None);

    let json = serde_json::to_value(&payload).unwrap();
    assert!(json["items"][1].get("id").is_none());
    assert_eq!(json["items"][0]["id"], "11");
    assert_eq!(json["createdAt"], "2026-03-01");
  }

  #[test]
  fn test_restore_rebuilds_rows_in_order() {
    let first = LineItemKey::local();
    let second = LineItemKey::server("9");
    let fields = vec![
      ("name".to_string(), "Invoice 3".to_string()),
      (
        FieldPath::item(second.clone(), ItemField::Name).to_string(),
        "Second".to_string(),
      ),
      (
        FieldPath::item(first.clone(), ItemField::Name).to_string(),
        "First".to_string(),
      ),
      ("recipient.companyName".to_string(), String::new()),
      ("validUntil".to_string(), "soon".to_string()),
    ];

    let model =
      InvoiceFormModel::restore(Some("5".to_string()), vec![first.clone(), second], fields)
        .unwrap();

    let names: Vec<_> = model.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(model.id(), Some("5"));
    assert_eq!(model.value(&FieldPath::ValidUntil).as_deref(), Some("soon"));
    // restoring never runs rules
    assert!(model.errors().is_empty());
    assert!(!model.is_submittable());
  }
}
