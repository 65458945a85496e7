use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use validator::Validate;

fn default_api_base_url() -> String {
  "http://localhost:4000/api/Invoices/".to_string()
}

fn default_api_connect_timeout() -> u64 {
  5
}

fn default_templates() -> String {
  "templates/**/*.html.tera".to_string()
}

fn default_static_dir() -> String {
  "./static".to_string()
}

fn default_language() -> String {
  "en".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
  #[validate(nested)]
  pub server: ServerConfig,
  #[validate(nested)]
  pub api: ApiConfig,
  #[serde(default)]
  #[validate(nested)]
  pub ui: UiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerConfig {
  #[validate(length(min = 1))]
  pub host: String,
  #[validate(range(min = 1))]
  pub port: u16,
}

/// Remote invoice API configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApiConfig {
  #[serde(default = "default_api_base_url")]
  #[validate(url)]
  pub base_url: String,
  #[serde(default = "default_api_connect_timeout")]
  pub connect_timeout_seconds: u64,
  /// Serve invoices from memory instead of the remote API
  #[serde(default)]
  pub mock: bool,
}

/// Rendering configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UiConfig {
  #[serde(default = "default_templates")]
  pub templates: String,
  #[serde(default = "default_static_dir")]
  pub static_dir: String,
  #[serde(default = "default_language")]
  #[validate(length(equal = 2))]
  pub default_language: String,
}

impl Default for UiConfig {
  fn default() -> Self {
    Self {
      templates: default_templates(),
      static_dir: default_static_dir(),
      default_language: default_language(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with INVOICE_DESK_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the INVOICE_DESK prefix and are separated by double underscores:
  /// - `INVOICE_DESK_SERVER__PORT=8080`
  /// - `INVOICE_DESK_API__BASE_URL=http://localhost:4000/api/Invoices/`
  /// - `INVOICE_DESK_API__MOCK=true`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if files are missing or malformed, or if a loaded
  /// value fails validation.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // Use double underscore as separator: INVOICE_DESK_SERVER__PORT=8080
      .add_source(
        Environment::with_prefix("INVOICE_DESK")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    let config: Config = config.try_deserialize()?;
    config
      .validate()
      .map_err(|e| ConfigError::Message(format!("Invalid configuration: {}", e)))?;
    Ok(config)
  }
}
