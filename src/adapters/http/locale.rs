use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorInternalServerError, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use crate::domain::presentation::{Language, Localizer};
use crate::infrastructure::i18n::{CatalogLocalizer, Catalogs};

pub const LANGUAGE_COOKIE: &str = "lang";

/// Language chosen for the request, from the `lang` cookie or the configured default
pub struct RequestLocale {
  localizer: Arc<CatalogLocalizer>,
}

impl RequestLocale {
  pub fn new(catalogs: Arc<Catalogs>, language: Language) -> Self {
    Self {
      localizer: Arc::new(CatalogLocalizer::new(catalogs, language)),
    }
  }

  pub fn localizer(&self) -> Arc<CatalogLocalizer> {
    self.localizer.clone()
  }

  pub fn language(&self) -> Language {
    self.localizer.language()
  }

  pub fn translate(&self, key: &str) -> String {
    self.localizer.translate(key)
  }
}

fn requested_language(req: &HttpRequest) -> Language {
  let fallback = req
    .app_data::<web::Data<Language>>()
    .map(|language| *language.get_ref())
    .unwrap_or_default();

  req
    .cookie(LANGUAGE_COOKIE)
    .and_then(|cookie| cookie.value().parse().ok())
    .unwrap_or(fallback)
}

impl FromRequest for RequestLocale {
  type Error = actix_web::Error;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(catalogs) = req.app_data::<web::Data<Arc<Catalogs>>>() else {
      tracing::error!("Translation catalogs missing from app data");
      return ready(Err(ErrorInternalServerError("Localization not configured")));
    };

    let catalogs = Arc::clone(catalogs.get_ref());
    ready(Ok(RequestLocale::new(catalogs, requested_language(req))))
  }
}
