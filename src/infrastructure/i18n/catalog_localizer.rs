use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::domain::presentation::{Language, Localizer, UnsupportedLanguage};

const EN_CATALOG: &str = include_str!("locales/en.json");
const PL_CATALOG: &str = include_str!("locales/pl.json");

/// Flattened translation tables for every bundled language
///
/// Nested objects become dotted keys: `{"INVOICE": {"NAME": ..}}` is looked
/// up as `INVOICE.NAME`.
#[derive(Debug, Default)]
pub struct Catalogs {
  en: HashMap<String, String>,
  pl: HashMap<String, String>,
}

impl Catalogs {
  pub fn embedded() -> Result<Self, serde_json::Error> {
    Ok(Self {
      en: flatten_catalog(EN_CATALOG)?,
      pl: flatten_catalog(PL_CATALOG)?,
    })
  }

  fn table(&self, language: Language) -> &HashMap<String, String> {
    match language {
      Language::En => &self.en,
      Language::Pl => &self.pl,
    }
  }
}

fn flatten_catalog(raw: &str) -> Result<HashMap<String, String>, serde_json::Error> {
  let value: Value = serde_json::from_str(raw)?;
  let mut entries = HashMap::new();
  flatten_into(None, &value, &mut entries);
  Ok(entries)
}

fn flatten_into(prefix: Option<&str>, value: &Value, entries: &mut HashMap<String, String>) {
  match value {
    Value::Object(map) => {
      for (key, nested) in map {
        let path = match prefix {
          Some(prefix) => format!("{}.{}", prefix, key),
          None => key.clone(),
        };
        flatten_into(Some(&path), nested, entries);
      }
    }
    Value::String(text) => {
      if let Some(prefix) = prefix {
        entries.insert(prefix.to_string(), text.clone());
      }
    }
    other => {
      if let Some(prefix) = prefix {
        entries.insert(prefix.to_string(), other.to_string());
      }
    }
  }
}

/// Localizer over the bundled catalogs, one per request
///
/// Missing keys fall back to English, then to the key itself.
pub struct CatalogLocalizer {
  catalogs: Arc<Catalogs>,
  language: AtomicU8,
}

impl CatalogLocalizer {
  pub fn new(catalogs: Arc<Catalogs>, language: Language) -> Self {
    Self {
      catalogs,
      language: AtomicU8::new(encode(language)),
    }
  }

  /// Every known key translated into the active language
  pub fn entries(&self) -> BTreeMap<String, String> {
    self
      .catalogs
      .en
      .keys()
      .chain(self.catalogs.pl.keys())
      .map(|key| (key.clone(), self.translate(key)))
      .collect()
  }
}

impl Default for CatalogLocalizer {
  fn default() -> Self {
    let catalogs = Catalogs::embedded().unwrap_or_else(|e| {
      tracing::error!("Bundled translation catalog is malformed: {}", e);
      Catalogs::default()
    });
    Self::new(Arc::new(catalogs), Language::default())
  }
}

fn encode(language: Language) -> u8 {
  match language {
    Language::En => 0,
    Language::Pl => 1,
  }
}

fn decode(raw: u8) -> Language {
  match raw {
    1 => Language::Pl,
    _ => Language::En,
  }
}

impl Localizer for CatalogLocalizer {
  fn translate(&self, key: &str) -> String {
    let language = self.language();
    self
      .catalogs
      .table(language)
      .get(key)
      .or_else(|| self.catalogs.table(Language::En).get(key))
      .cloned()
      .unwrap_or_else(|| {
        tracing::debug!(key, language = %language, "Missing translation");
        key.to_string()
      })
  }

  fn set_language(&self, code: &str) -> Result<Language, UnsupportedLanguage> {
    let language: Language = code.parse()?;
    self.language.store(encode(language), Ordering::Relaxed);
    Ok(language)
  }

  fn language(&self) -> Language {
    decode(self.language.load(Ordering::Relaxed))
  }
}
