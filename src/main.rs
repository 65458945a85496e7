use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoice_desk::{
  adapters::http::{InvoiceRouteDependencies, TemplateEngine, configure_invoice_routes},
  domain::invoice::InvoiceRepository,
  domain::presentation::Language,
  infrastructure::{
    api::{HttpInvoiceRepository, InMemoryInvoiceRepository},
    config::Config,
    i18n::Catalogs,
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoice_desk=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoice desk");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  let repository: Arc<dyn InvoiceRepository> = if config.api.mock {
    tracing::warn!("Using in-memory invoice repository, nothing will be persisted");
    Arc::new(InMemoryInvoiceRepository::new())
  } else {
    tracing::info!("Using invoice API at {}", config.api.base_url);
    Arc::new(HttpInvoiceRepository::new(&config.api).context("Failed to create API client")?)
  };

  let catalogs = Arc::new(Catalogs::embedded().context("Failed to load translation catalogs")?);
  let default_language: Language = config.ui.default_language.parse().unwrap_or_else(|e| {
    tracing::warn!("{}, falling back to English", e);
    Language::En
  });

  let templates =
    TemplateEngine::new(&config.ui.templates).context("Failed to initialize template engine")?;
  tracing::info!("Template engine initialized");

  let deps = InvoiceRouteDependencies::new(templates, repository, catalogs, default_language);
  let static_dir = config.ui.static_dir.clone();

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Add logging middleware
      .wrap(Logger::default())
      .configure(|cfg| configure_invoice_routes(cfg, deps.clone()))
      // Static files
      .service(fs::Files::new("/static", &static_dir))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))
  .with_context(|| format!("Failed to bind {}:{}", server_host, server_port))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
