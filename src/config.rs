//! Runtime configuration, read once from the environment at startup.

use std::env;

use crate::{function::Function, prelude::*};

/// Connection parameters of the backing Postgres store.
///
/// The connection is opened without TLS (`sslmode=disable`).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
  pub host: String,
  pub user: String,
  pub password: String,
  pub name: String,
  /// Full connection url, takes precedence over the discrete parameters
  pub url: Option<String>,
  pub max_connections: u32,
  pub max_lifetime: Duration,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      host: String::from("localhost"),
      user: String::new(),
      password: String::new(),
      name: String::new(),
      url: None,
      max_connections: 5,
      max_lifetime: Duration::from_secs(300),
    }
  }
}

impl DatabaseConfig {
  pub fn url(&self) -> String {
    if let Some(url) = &self.url {
      return url.clone();
    }

    format!(
      "postgres://{}:{}@{}/{}?sslmode=disable",
      urlencoding::encode(&self.user),
      urlencoding::encode(&self.password),
      self.host,
      self.name
    )
  }
}

/// How the process receives requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  /// Development listener serving every function on its own route
  Local { port: u16 },
  /// Hosted by a function runtime; one function per process
  Managed { runtime_api: String, function: Function },
}

#[derive(Debug, Clone)]
pub struct Config {
  pub database: DatabaseConfig,
  pub mode: Mode,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database: DatabaseConfig::default(),
      mode: Mode::Local { port: 8080 },
    }
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup(
    var: impl Fn(&str) -> Option<String>,
  ) -> anyhow::Result<Self> {
    let var = |key: &str| var(key).filter(|value| !value.trim().is_empty());
    let defaults = DatabaseConfig::default();

    let database = DatabaseConfig {
      host: var("DB_HOST").unwrap_or(defaults.host),
      user: var("DB_USER").unwrap_or_default(),
      password: var("DB_PASSWORD").unwrap_or_default(),
      name: var("DB_NAME").unwrap_or_default(),
      url: var("DATABASE_URL"),
      max_connections: var("DB_MAX_CONNECTIONS")
        .map(|n| n.parse())
        .transpose()
        .context("Invalid DB_MAX_CONNECTIONS")?
        .unwrap_or(defaults.max_connections),
      max_lifetime: var("DB_MAX_LIFETIME_SECS")
        .map(|secs| secs.parse().map(Duration::from_secs))
        .transpose()
        .context("Invalid DB_MAX_LIFETIME_SECS")?
        .unwrap_or(defaults.max_lifetime),
    };

    let mode = if var("AWS_LAMBDA_FUNCTION_NAME").is_some() {
      let runtime_api = var("AWS_LAMBDA_RUNTIME_API")
        .context("AWS_LAMBDA_RUNTIME_API not set")?;
      let function = var("REWARDS_FUNCTION")
        .or_else(|| var("_HANDLER"))
        .context("Neither REWARDS_FUNCTION nor _HANDLER is set")?
        .parse::<Function>()?;
      Mode::Managed { runtime_api, function }
    } else {
      let port = var("PORT")
        .map(|p| p.parse())
        .transpose()
        .context("Invalid PORT")?
        .unwrap_or(8080);
      Mode::Local { port }
    };

    Ok(Self { database, mode })
  }
}
