use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::application::invoice::ControllerError;
use crate::domain::invoice::{FormError, RepositoryError};

/// Error type for the HTML endpoints
#[derive(Debug)]
pub enum WebError {
  /// Malformed form post (400 Bad Request)
  BadRequest(String),

  /// Remote API unavailable (502 Bad Gateway)
  Upstream(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for WebError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WebError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
      WebError::Upstream(msg) => write!(f, "Invoice API error: {}", msg),
      WebError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for WebError {
  fn status_code(&self) -> StatusCode {
    match self {
      WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
      WebError::Upstream(_) => StatusCode::BAD_GATEWAY,
      WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let message = match self {
      WebError::BadRequest(msg) => msg.clone(),
      WebError::Upstream(msg) => {
        tracing::error!("Invoice API error: {}", msg);
        "The invoice service is unavailable".to_string()
      }
      WebError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        "An internal server error occurred".to_string()
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::plaintext())
      .body(message)
  }
}

impl From<FormError> for WebError {
  fn from(error: FormError) -> Self {
    WebError::BadRequest(error.to_string())
  }
}

impl From<RepositoryError> for WebError {
  fn from(error: RepositoryError) -> Self {
    WebError::Upstream(error.to_string())
  }
}

impl From<ControllerError> for WebError {
  fn from(error: ControllerError) -> Self {
    match error {
      ControllerError::Form(e) => e.into(),
      ControllerError::Load(e) => e.into(),
      ControllerError::NotReady(_) | ControllerError::TornDown => {
        WebError::Internal(error.to_string())
      }
    }
  }
}

impl From<tera::Error> for WebError {
  fn from(error: tera::Error) -> Self {
    WebError::Internal(format!("Template error: {}", error))
  }
}
