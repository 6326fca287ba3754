//! Rewards - loyalty program redemption functions
//!
//! Architecture:
//! - SeaORM over Postgres for the redemption store
//! - Axum listener for local development
//! - Function runtime client for managed deployments
//! - Tokio for async runtime

mod config;
mod entity;
mod error;
mod function;
mod plugins;
mod prelude;
mod state;
mod sv;
#[cfg(test)]
mod testing;
mod transport;

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
  config::{Config, Mode},
  plugins::{App, runtime, server},
  prelude::*,
  state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "rewards=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::from_env().context("Invalid configuration")?;
  info!("Starting Rewards v{}", env!("CARGO_PKG_VERSION"));

  let app = Arc::new(AppState::new(config).await?);

  let plugins = match app.config.mode {
    Mode::Local { .. } => App::new().register(server::Plugin),
    Mode::Managed { .. } => App::new().register(runtime::Plugin),
  };
  let mut services = plugins.run(app);

  tokio::signal::ctrl_c().await?;
  info!("Shutting down");
  services.shutdown().await;

  Ok(())
}
