//! Development listener serving every function on its own route.

use std::net::SocketAddr;

use axum::{
  Router,
  extract::State,
  routing::{MethodRouter, any},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
  config::Mode,
  function::Function,
  prelude::*,
  state::AppState,
  transport::Request,
};

pub struct Plugin;

fn function(function: Function) -> MethodRouter<Arc<AppState>> {
  any(move |State(app): State<Arc<AppState>>, req: Request| async move {
    function.invoke(&app, &req).await
  })
}

pub fn router(app: Arc<AppState>) -> Router {
  Router::new()
    .route("/heartbeat", function(Function::Heartbeat))
    .route("/validate", function(Function::Validate))
    .route("/redeem", function(Function::Redeem))
    .route("/world", function(Function::World))
    .route("/world/{activation_code}", function(Function::World))
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    .with_state(app)
}

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let Mode::Local { port } = app.config.mode else {
      anyhow::bail!("Local server started outside of local mode");
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Starting local dev server on {addr}");

    let result =
      axum::serve(listener, router(app)).await.context("Axum server error");
    match &result {
      Ok(_) => info!("Server stopped gracefully"),
      Err(err) => error!("Server stopped with error: {err}"),
    }
    result
  }
}
