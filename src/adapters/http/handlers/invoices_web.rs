use actix_web::{
  HttpRequest, HttpResponse,
  http::{StatusCode, header},
  web,
};
use std::sync::{Arc, Mutex, PoisonError};

use crate::adapters::http::{
  errors::WebError,
  flash::{expired_flash_cookie, flash_cookie, read_flash},
  forms::{FormAction, PostedForm},
  locale::RequestLocale,
  templates::TemplateEngine,
  views::{FormView, page_context},
};
use crate::application::invoice::{
  ControllerError, DeleteInvoiceCommand, DeleteInvoiceUseCase, FormCollaborators, FormFlow,
  FormState, InvoiceFormController, ListInvoicesUseCase, LoadFailure, SubmitOutcome,
};
use crate::domain::invoice::{InvoiceFormModel, InvoiceRepository};
use crate::domain::presentation::{Navigator, Notification, Notifier, Route};

/// Navigation and notifications requested while handling one request
#[derive(Default)]
pub struct RequestEffects {
  route: Mutex<Option<Route>>,
  notification: Mutex<Option<Notification>>,
}

impl RequestEffects {
  pub fn take_route(&self) -> Option<Route> {
    self.route.lock().unwrap_or_else(PoisonError::into_inner).take()
  }

  pub fn take_notification(&self) -> Option<Notification> {
    self
      .notification
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .take()
  }
}

impl Navigator for RequestEffects {
  fn navigate(&self, route: Route) {
    *self.route.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
  }
}

impl Notifier for RequestEffects {
  fn notify(&self, notification: Notification) {
    *self
      .notification
      .lock()
      .unwrap_or_else(PoisonError::into_inner) = Some(notification);
  }
}

/// 303 to `route`, carrying `notification` in the flash cookie
fn redirect(route: &Route, notification: Option<&Notification>) -> HttpResponse {
  let mut response = HttpResponse::SeeOther();
  response.insert_header((header::LOCATION, route.path()));
  if let Some(cookie) = notification.and_then(flash_cookie) {
    response.cookie(cookie);
  }
  response.finish()
}

fn html(status: StatusCode, body: String, consumed_flash: bool) -> HttpResponse {
  let mut response = HttpResponse::build(status);
  response.content_type("text/html");
  if consumed_flash {
    response.cookie(expired_flash_cookie());
  }
  response.body(body)
}

struct FormScreen {
  controller: InvoiceFormController,
  effects: Arc<RequestEffects>,
}

fn form_screen(repository: &Arc<dyn InvoiceRepository>, locale: &RequestLocale) -> FormScreen {
  let effects = Arc::new(RequestEffects::default());
  let controller = InvoiceFormController::new(FormCollaborators {
    repository: repository.clone(),
    navigator: effects.clone(),
    notifier: effects.clone(),
    localizer: locale.localizer(),
  });
  FormScreen {
    controller,
    effects,
  }
}

async fn render_form(
  screen: &FormScreen,
  status: StatusCode,
  templates: &TemplateEngine,
  locale: &RequestLocale,
  notification: Option<&Notification>,
) -> Result<HttpResponse, WebError> {
  let model = screen
    .controller
    .snapshot()
    .await
    .ok_or_else(|| WebError::Internal("Form rendered without a model".to_string()))?;
  let flow = screen.controller.flow().await;

  let localizer = locale.localizer();
  let mut context = page_context(locale, notification);
  context.insert("form", &FormView::build(&model, &flow, localizer.as_ref()));

  let body = templates.render("pages/invoice_form.html.tera", &context)?;
  Ok(html(status, body, false))
}

fn render_load_error(
  failure: LoadFailure,
  templates: &TemplateEngine,
  locale: &RequestLocale,
) -> Result<HttpResponse, WebError> {
  let (status, message) = match failure {
    LoadFailure::NotFound => (StatusCode::NOT_FOUND, "LOAD_ERROR.NOT_FOUND"),
    LoadFailure::Unavailable => (StatusCode::BAD_GATEWAY, "LOAD_ERROR.UNAVAILABLE"),
  };

  let mut context = page_context(locale, None);
  context.insert("message", &locale.translate(message));

  let body = templates.render("pages/load_error.html.tera", &context)?;
  Ok(html(status, body, false))
}

/// Runs the post's action against a screen resumed from the posted values
async fn handle_form_post(
  flow: FormFlow,
  body: &[u8],
  repository: &Arc<dyn InvoiceRepository>,
  templates: &TemplateEngine,
  locale: &RequestLocale,
) -> Result<HttpResponse, WebError> {
  let posted = PostedForm::parse(body)?;
  let model = InvoiceFormModel::restore(
    flow.invoice_id().map(str::to_string),
    posted.rows,
    posted.fields,
  )?;

  let screen = form_screen(repository, locale);
  screen.controller.resume(flow, model).await?;

  let status = match posted.action {
    FormAction::AddItem => {
      screen.controller.add_line_item().await?;
      StatusCode::OK
    }
    FormAction::RemoveItem(key) => {
      if !screen.controller.remove_line_item(&key).await? {
        tracing::debug!(key = %key, "Remove requested for a row that is not on the form");
      }
      StatusCode::OK
    }
    FormAction::Save => match screen.controller.submit().await? {
      SubmitOutcome::Saved(_) | SubmitOutcome::Ignored => StatusCode::OK,
      SubmitOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
      SubmitOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
    },
  };

  let notification = screen.effects.take_notification();
  if let Some(route) = screen.effects.take_route() {
    return Ok(redirect(&route, notification.as_ref()));
  }
  render_form(&screen, status, templates, locale, notification.as_ref()).await
}

// GET /list-of-invoices - Table of all invoices
pub async fn invoices_page(
  req: HttpRequest,
  locale: RequestLocale,
  templates: web::Data<TemplateEngine>,
  list_invoices_use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, WebError> {
  let flash = read_flash(&req);
  let mut context = page_context(&locale, flash.as_ref());

  match list_invoices_use_case.execute().await {
    Ok(response) => {
      context.insert("invoices", &response.invoices);
      context.insert("load_failed", &false);
    }
    Err(e) => {
      tracing::error!("Failed to load invoices: {}", e);
      context.insert("invoices", &Vec::<()>::new());
      context.insert("load_failed", &true);
    }
  }

  let body = templates.render("pages/invoices.html.tera", &context)?;
  Ok(html(StatusCode::OK, body, flash.is_some()))
}

// POST /invoices/{id}/delete - Delete an invoice and go back to the list
pub async fn delete_invoice_submit(
  path: web::Path<String>,
  locale: RequestLocale,
  delete_invoice_use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, WebError> {
  let invoice_id = path.into_inner();

  let notification = match delete_invoice_use_case
    .execute(DeleteInvoiceCommand {
      invoice_id: invoice_id.clone(),
    })
    .await
  {
    Ok(()) => Notification::success(locale.translate("NOTIFICATION.DELETED")),
    Err(e) => {
      tracing::error!(invoice_id = %invoice_id, "Failed to delete invoice: {}", e);
      Notification::error(locale.translate("NOTIFICATION.DELETE_FAILED"))
    }
  };

  Ok(redirect(&Route::InvoiceList, Some(&notification)))
}

// GET /invoice-details - Empty invoice form
pub async fn new_invoice_page(
  locale: RequestLocale,
  templates: web::Data<TemplateEngine>,
  repository: web::Data<Arc<dyn InvoiceRepository>>,
) -> Result<HttpResponse, WebError> {
  let screen = form_screen(&repository, &locale);
  screen.controller.load(None).await?;
  render_form(&screen, StatusCode::OK, &templates, &locale, None).await
}

// POST /invoice-details - Create form actions
pub async fn new_invoice_submit(
  body: web::Bytes,
  locale: RequestLocale,
  templates: web::Data<TemplateEngine>,
  repository: web::Data<Arc<dyn InvoiceRepository>>,
) -> Result<HttpResponse, WebError> {
  handle_form_post(FormFlow::Create, &body, &repository, &templates, &locale).await
}

// GET /invoice-edit/{id} - Invoice form hydrated from the API
pub async fn edit_invoice_page(
  path: web::Path<String>,
  locale: RequestLocale,
  templates: web::Data<TemplateEngine>,
  repository: web::Data<Arc<dyn InvoiceRepository>>,
) -> Result<HttpResponse, WebError> {
  let invoice_id = path.into_inner();
  let screen = form_screen(&repository, &locale);

  match screen.controller.load(Some(&invoice_id)).await {
    Ok(()) => render_form(&screen, StatusCode::OK, &templates, &locale, None).await,
    Err(ControllerError::Load(_)) => match screen.controller.state() {
      FormState::LoadError(failure) => render_load_error(failure, &templates, &locale),
      state => Err(WebError::Internal(format!(
        "Load failed in unexpected state {:?}",
        state
      ))),
    },
    Err(e) => Err(e.into()),
  }
}

// POST /invoice-edit/{id} - Edit form actions
pub async fn edit_invoice_submit(
  path: web::Path<String>,
  body: web::Bytes,
  locale: RequestLocale,
  templates: web::Data<TemplateEngine>,
  repository: web::Data<Arc<dyn InvoiceRepository>>,
) -> Result<HttpResponse, WebError> {
  let flow = FormFlow::Edit(path.into_inner());
  handle_form_post(flow, &body, &repository, &templates, &locale).await
}
