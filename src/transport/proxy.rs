//! Proxy-integration event and response shapes exchanged with the managed
//! function runtime.

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use super::{Request, Response};
use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
  #[serde(default)]
  pub http_method: String,
  #[serde(default)]
  pub path: String,
  #[serde(default)]
  pub path_parameters: Option<HashMap<String, String>>,
  #[serde(default)]
  pub query_string_parameters: Option<HashMap<String, String>>,
  #[serde(default)]
  pub headers: Option<HashMap<String, String>>,
  #[serde(default)]
  pub body: Option<String>,
  #[serde(default)]
  pub is_base64_encoded: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
  pub status_code: u16,
  pub headers: HashMap<String, String>,
  pub body: String,
  pub is_base64_encoded: bool,
}

impl TryFrom<ProxyRequest> for Request {
  type Error = Error;

  fn try_from(event: ProxyRequest) -> Result<Self> {
    let body = match event.body {
      Some(body) if event.is_base64_encoded => {
        let bytes = BASE64_STANDARD
          .decode(body)
          .map_err(|err| Error::Internal(format!("undecodable body: {err}")))?;
        String::from_utf8_lossy(&bytes).into_owned()
      }
      Some(body) => body,
      None => String::new(),
    };

    Ok(
      Request::new(event.http_method, event.path)
        .with_path_params(event.path_parameters.unwrap_or_default())
        .with_query(event.query_string_parameters.unwrap_or_default())
        .with_headers(event.headers.unwrap_or_default())
        .with_body(body),
    )
  }
}

impl From<Response> for ProxyResponse {
  fn from(res: Response) -> Self {
    let headers = res
      .headers
      .iter()
      .filter_map(|(name, value)| {
        value.to_str().ok().map(|value| (name.to_string(), value.to_string()))
      })
      .collect();

    Self {
      status_code: res.status.as_u16(),
      headers,
      body: res.body.unwrap_or_default(),
      is_base64_encoded: false,
    }
  }
}
