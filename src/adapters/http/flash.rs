use actix_web::{
  HttpRequest,
  cookie::{Cookie, SameSite},
};

use crate::domain::presentation::Notification;

pub const FLASH_COOKIE: &str = "flash";

/// One-shot cookie carrying a notification across a redirect
///
/// The JSON body is hex encoded so the value never needs cookie escaping.
pub fn flash_cookie(notification: &Notification) -> Option<Cookie<'static>> {
  let json = serde_json::to_vec(notification)
    .map_err(|e| tracing::warn!("Failed to encode flash notification: {}", e))
    .ok()?;

  Some(
    Cookie::build(FLASH_COOKIE, hex::encode(json))
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .finish(),
  )
}

/// Cookie that removes a consumed flash
pub fn expired_flash_cookie() -> Cookie<'static> {
  let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
  cookie.make_removal();
  cookie
}

pub fn read_flash(req: &HttpRequest) -> Option<Notification> {
  let cookie = req.cookie(FLASH_COOKIE)?;
  let bytes = hex::decode(cookie.value()).ok()?;
  serde_json::from_slice(&bytes)
    .map_err(|e| tracing::debug!("Ignoring malformed flash cookie: {}", e))
    .ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_flash_survives_cookie_round_trip() {
    let notification = Notification::success("You successfully created Faktura; 1/2026 & co");
    let cookie = flash_cookie(&notification).unwrap();
    assert!(cookie.value().chars().all(|c| c.is_ascii_hexdigit()));

    let req = TestRequest::default().cookie(cookie).to_http_request();
    assert_eq!(read_flash(&req), Some(notification));
  }

  #[test]
  fn test_malformed_flash_is_ignored() {
    let req = TestRequest::default()
      .cookie(Cookie::new(FLASH_COOKIE, "zz"))
      .to_http_request();
    assert_eq!(read_flash(&req), None);
  }

  #[test]
  fn test_expired_flash_cookie() {
    let cookie = expired_flash_cookie();
    assert_eq!(cookie.name(), FLASH_COOKIE);
    assert_eq!(cookie.value(), "");
  }
}
