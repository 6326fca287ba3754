use axum::{
  body::to_bytes,
  extract::{FromRequest, FromRequestParts, Path, Query},
  http::StatusCode,
};

use super::Response;
use crate::prelude::*;

/// Matches axum's default body limit.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// A transport-independent request.
///
/// Query parameter, path parameter and header names are lowercased; when a
/// name repeats, its first value wins.
#[derive(Debug, Clone, Default)]
pub struct Request {
  pub method: String,
  pub path: String,
  pub path_params: HashMap<String, String>,
  pub query: HashMap<String, String>,
  /// Carried from both transports, though no function reads them yet.
  #[allow(dead_code)]
  pub headers: HashMap<String, String>,
  #[allow(dead_code)]
  pub body: String,
}

fn fold<K, V>(
  pairs: impl IntoIterator<Item = (K, V)>,
) -> HashMap<String, String>
where
  K: AsRef<str>,
  V: Into<String>,
{
  let mut map = HashMap::new();
  for (key, value) in pairs {
    map.entry(key.as_ref().to_lowercase()).or_insert_with(|| value.into());
  }
  map
}

impl Request {
  pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
    Self { method: method.into(), path: path.into(), ..Default::default() }
  }

  pub fn with_query<K: AsRef<str>, V: Into<String>>(
    mut self,
    pairs: impl IntoIterator<Item = (K, V)>,
  ) -> Self {
    self.query = fold(pairs);
    self
  }

  pub fn with_path_params<K: AsRef<str>, V: Into<String>>(
    mut self,
    pairs: impl IntoIterator<Item = (K, V)>,
  ) -> Self {
    self.path_params = fold(pairs);
    self
  }

  pub fn with_headers<K: AsRef<str>, V: Into<String>>(
    mut self,
    pairs: impl IntoIterator<Item = (K, V)>,
  ) -> Self {
    self.headers = fold(pairs);
    self
  }

  pub fn with_body(mut self, body: impl Into<String>) -> Self {
    self.body = body.into();
    self
  }

  /// Non-empty query parameter.
  pub fn query(&self, name: &str) -> Option<&str> {
    self.query.get(name).map(String::as_str).filter(|v| !v.is_empty())
  }

  /// Non-empty path parameter.
  pub fn path_param(&self, name: &str) -> Option<&str> {
    self.path_params.get(name).map(String::as_str).filter(|v| !v.is_empty())
  }

  /// Fetches every named query parameter, or fails with a bad request if any
  /// of them is missing or empty.
  pub fn require<const N: usize>(&self, names: [&str; N]) -> Result<[&str; N]> {
    let mut values = [""; N];
    for (value, name) in values.iter_mut().zip(names) {
      *value = self.query(name).ok_or_else(Error::missing_params)?;
    }
    Ok(values)
  }
}

impl<S: Send + Sync> FromRequest<S> for Request {
  type Rejection = Response;

  async fn from_request(
    req: axum::extract::Request,
    state: &S,
  ) -> std::result::Result<Self, Self::Rejection> {
    let (mut parts, body) = req.into_parts();

    // routes without captures reject, which just means no path params
    let path_params =
      Path::<Vec<(String, String)>>::from_request_parts(&mut parts, state)
        .await
        .map(|Path(params)| params)
        .unwrap_or_default();

    let Query(query) =
      Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(
        |err| {
          error!("Error parsing query string: {err}");
          Response::text(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Malformed query string: {err}"),
          )
        },
      )?;

    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| {
      error!("Error reading request body: {err}");
      Response::text(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to read body: {err}"),
      )
    })?;

    let headers = parts.headers.iter().filter_map(|(name, value)| {
      value.to_str().ok().map(|value| (name.as_str(), value.to_string()))
    });

    Ok(
      Request::new(parts.method.as_str(), parts.uri.path())
        .with_path_params(path_params)
        .with_query(query)
        .with_headers(headers)
        .with_body(String::from_utf8_lossy(&body)),
    )
  }
}
