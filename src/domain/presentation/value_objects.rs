use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Route - Screens the core may ask to navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  InvoiceList,
  NewInvoice,
  EditInvoice(String),
}

impl Route {
  pub fn path(&self) -> String {
    match self {
      Route::InvoiceList => "/list-of-invoices".to_string(),
      Route::NewInvoice => "/invoice-details".to_string(),
      Route::EditInvoice(id) => format!("/invoice-edit/{}", id),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
  Success,
  Error,
}

// Notification - Toast-style message with an already translated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub variant: NotificationVariant,
  pub message: String,
}

impl Notification {
  pub fn success(message: impl Into<String>) -> Self {
    Self {
      variant: NotificationVariant::Success,
      message: message.into(),
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      variant: NotificationVariant::Error,
      message: message.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

// Language - UI languages with a bundled catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
  #[default]
  En,
  Pl,
}

impl Language {
  pub fn code(&self) -> &'static str {
    match self {
      Language::En => "en",
      Language::Pl => "pl",
    }
  }

  /// The language the toggle button switches to
  pub fn toggled(&self) -> Self {
    match self {
      Language::En => Language::Pl,
      Language::Pl => Language::En,
    }
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.code())
  }
}

impl FromStr for Language {
  type Err = UnsupportedLanguage;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "en" => Ok(Language::En),
      "pl" => Ok(Language::Pl),
      _ => Err(UnsupportedLanguage(s.to_string())),
    }
  }
}
