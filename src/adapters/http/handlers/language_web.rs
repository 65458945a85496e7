use actix_web::{
  HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::Duration},
  http::{Uri, header},
};

use crate::adapters::http::locale::{LANGUAGE_COOKIE, RequestLocale};
use crate::domain::presentation::Route;

/// Path of the page the toggle was pressed on, if the browser told us
fn return_path(req: &HttpRequest) -> String {
  req
    .headers()
    .get(header::REFERER)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.parse::<Uri>().ok())
    .and_then(|uri| uri.path_and_query().map(|pq| pq.as_str().to_string()))
    .filter(|path| path.starts_with('/') && !path.starts_with("//"))
    .unwrap_or_else(|| Route::InvoiceList.path())
}

// POST /language - Switch between English and Polish
pub async fn toggle_language(req: HttpRequest, locale: RequestLocale) -> HttpResponse {
  let language = locale.language().toggled();
  tracing::debug!(language = %language, "Switching UI language");

  let cookie = Cookie::build(LANGUAGE_COOKIE, language.code())
    .path("/")
    .same_site(SameSite::Lax)
    .max_age(Duration::days(365))
    .finish();

  HttpResponse::SeeOther()
    .cookie(cookie)
    .insert_header((header::LOCATION, return_path(&req)))
    .finish()
}
