//! Activation: hands the caller's activation code back as a cookie.

use axum::http::{HeaderValue, header};

use crate::{
  prelude::*,
  transport::{Request, Response},
};

const COOKIE_NAME: &str = "activation_code";
const EXPIRATION_HOURS: i64 = 1;

/// Drops bytes not allowed in a cookie value and quotes values containing a
/// space or comma.
fn cookie_value(raw: &str) -> String {
  let value: String = raw
    .chars()
    .filter(|&c| {
      (' '..='\u{7e}').contains(&c) && !matches!(c, '"' | ';' | '\\')
    })
    .collect();

  if value.contains([' ', ',']) { format!("\"{value}\"") } else { value }
}

pub fn set_cookie(code: &str, now: chrono::DateTime<Utc>) -> String {
  let expires = now + TimeDelta::hours(EXPIRATION_HOURS);
  format!(
    "{COOKIE_NAME}={}; Path=/; Expires={}",
    cookie_value(code),
    expires.format("%a, %d %b %Y %H:%M:%S GMT")
  )
}

pub fn handle(req: &Request) -> Result<Response> {
  // a bare 500 when the code is absent; callers have relied on it so far
  let Some(code) = req.path_param(COOKIE_NAME) else {
    return Err(Error::Internal("no activation code in path".into()));
  };

  let cookie = HeaderValue::try_from(set_cookie(code, Utc::now()))
    .map_err(|err| Error::Internal(err.to_string()))?;

  Ok(Response::ok().header(header::SET_COOKIE, cookie))
}
