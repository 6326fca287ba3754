use axum::{
  http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
  response::IntoResponse,
};
use serde::Serialize;

use crate::prelude::*;

/// Response of any function, always carrying the permissive CORS headers.
#[derive(Debug, Clone)]
pub struct Response {
  pub status: StatusCode,
  pub headers: HeaderMap,
  pub body: Option<String>,
}

impl Response {
  pub fn new(status: StatusCode) -> Self {
    let mut headers = HeaderMap::new();
    headers.insert(
      header::ACCESS_CONTROL_ALLOW_ORIGIN,
      HeaderValue::from_static("*"),
    );
    headers.insert(
      header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
      HeaderValue::from_static("true"),
    );
    Self { status, headers, body: None }
  }

  pub fn ok() -> Self {
    Self::new(StatusCode::OK)
  }

  pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
    match json::to_string(body) {
      Ok(body) => Self::new(status)
        .header(
          header::CONTENT_TYPE,
          HeaderValue::from_static("application/json"),
        )
        .body(body),
      Err(err) => {
        error!("Failed to serialize response body: {err}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
      }
    }
  }

  pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
    Self::new(status).body(body)
  }

  pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
    self.headers.insert(name, value);
    self
  }

  pub fn body(mut self, body: impl Into<String>) -> Self {
    self.body = Some(body.into());
    self
  }
}

impl IntoResponse for Response {
  fn into_response(self) -> axum::response::Response {
    (self.status, self.headers, self.body.unwrap_or_default()).into_response()
  }
}
