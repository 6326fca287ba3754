//! Managed mode: pulls proxy events from the function runtime API and posts
//! back one response per invocation. The process never listens itself.

use axum::http::StatusCode;
use reqwest::Client;

use crate::{
  config::Mode,
  function::Function,
  prelude::*,
  state::AppState,
  transport::{ProxyRequest, ProxyResponse, Request, Response},
};

const API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "lambda-runtime-aws-request-id";

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let Mode::Managed { runtime_api, function } = &app.config.mode else {
      anyhow::bail!("Runtime client started outside of managed mode");
    };

    // invocations are long polls, so no request timeout
    let client = Client::builder().build()?;
    let base = format!("http://{runtime_api}/{API_VERSION}/runtime");
    info!("Serving `{function}` invocations from {runtime_api}");

    loop {
      let next = client
        .get(format!("{base}/invocation/next"))
        .send()
        .await?
        .error_for_status()?;

      let request_id = next
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .context("Invocation without request id")?
        .to_string();
      let event = next.bytes().await?;

      let res = invoke(&app, *function, &event).await;

      client
        .post(format!("{base}/invocation/{request_id}/response"))
        .json(&ProxyResponse::from(res))
        .send()
        .await?
        .error_for_status()?;
    }
  }
}

/// Decodes one proxy event and runs the function on it. Events that can't be
/// decoded are answered with a 500 rather than failing the invocation.
pub async fn invoke(
  app: &AppState,
  function: Function,
  event: &[u8],
) -> Response {
  let req = json::from_slice::<ProxyRequest>(event)
    .map_err(|err| Error::Internal(format!("malformed event: {err}")))
    .and_then(Request::try_from);

  match req {
    Ok(req) => function.invoke(app, &req).await,
    Err(err) => {
      error!("Error handling request: {err}");
      Response::new(StatusCode::INTERNAL_SERVER_ERROR)
    }
  }
}
