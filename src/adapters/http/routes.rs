use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{DeleteInvoiceUseCase, ListInvoicesUseCase};
use crate::domain::invoice::InvoiceRepository;
use crate::domain::presentation::Language;
use crate::infrastructure::i18n::Catalogs;

use super::handlers::{invoices_web, language_web};
use super::templates::TemplateEngine;

/// Shared state the invoice screens need
#[derive(Clone)]
pub struct InvoiceRouteDependencies {
  pub templates: TemplateEngine,
  pub repository: Arc<dyn InvoiceRepository>,
  pub catalogs: Arc<Catalogs>,
  pub default_language: Language,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub delete_invoice_use_case: Arc<DeleteInvoiceUseCase>,
}

impl InvoiceRouteDependencies {
  /// Builds the use cases on top of `repository`
  pub fn new(
    templates: TemplateEngine,
    repository: Arc<dyn InvoiceRepository>,
    catalogs: Arc<Catalogs>,
    default_language: Language,
  ) -> Self {
    Self {
      list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(repository.clone())),
      delete_invoice_use_case: Arc::new(DeleteInvoiceUseCase::new(repository.clone())),
      templates,
      repository,
      catalogs,
      default_language,
    }
  }
}

/// Configure the invoice screens
///
/// # Routes
///
/// - GET / - Create form
/// - GET /list-of-invoices - Invoice table
/// - GET|POST /invoice-details - Create form and its actions
/// - GET|POST /invoice-edit/{id} - Edit form and its actions
/// - POST /invoices/{id}/delete - Delete, then back to the list
/// - POST /language - Toggle the UI language
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, deps: InvoiceRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.templates))
    .app_data(web::Data::new(deps.repository))
    .app_data(web::Data::new(deps.catalogs))
    .app_data(web::Data::new(deps.default_language))
    .app_data(web::Data::new(deps.list_invoices_use_case))
    .app_data(web::Data::new(deps.delete_invoice_use_case));

  cfg
    .route("/", web::get().to(invoices_web::new_invoice_page))
    .route(
      "/list-of-invoices",
      web::get().to(invoices_web::invoices_page),
    )
    .route(
      "/invoice-details",
      web::get().to(invoices_web::new_invoice_page),
    )
    .route(
      "/invoice-details",
      web::post().to(invoices_web::new_invoice_submit),
    )
    .route(
      "/invoice-edit/{id}",
      web::get().to(invoices_web::edit_invoice_page),
    )
    .route(
      "/invoice-edit/{id}",
      web::post().to(invoices_web::edit_invoice_submit),
    )
    .route(
      "/invoices/{id}/delete",
      web::post().to(invoices_web::delete_invoice_submit),
    )
    .route("/language", web::post().to(language_web::toggle_language));
}
