use super::value_objects::{Language, Notification, Route, UnsupportedLanguage};

/// Performs screen transitions requested by the core
pub trait Navigator: Send + Sync {
  fn navigate(&self, route: Route);
}

/// Displays notifications requested by the core
pub trait Notifier: Send + Sync {
  fn notify(&self, notification: Notification);
}

/// Resolves display strings by key for the active language
pub trait Localizer: Send + Sync {
  fn translate(&self, key: &str) -> String;

  /// Translates `key` and substitutes `{{name}}` placeholders
  fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
    args
      .iter()
      .fold(self.translate(key), |text, (name, value)| {
        text.replace(&format!("{{{{{}}}}}", name), value)
      })
  }

  fn set_language(&self, code: &str) -> Result<Language, UnsupportedLanguage>;

  fn language(&self) -> Language;
}
