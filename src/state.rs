use sea_orm::ConnectOptions;

use crate::{config::Config, prelude::*, sv};

pub struct Services<'a> {
  pub store: sv::Store<'a>,
  pub coupon: sv::Coupon<'a>,
  pub instant: sv::Instant<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  /// Sets up the process-wide pool. Connections are opened on first use, so
  /// functions that never touch the store work without one.
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    let database = &config.database;

    let mut options = ConnectOptions::new(database.url());
    options
      .max_connections(database.max_connections)
      .max_lifetime(database.max_lifetime)
      .connect_lazy(true)
      .sqlx_logging(false);

    info!("Connecting to database at {}...", database.host);
    let db = Database::connect(options)
      .await
      .context("Failed to set up database pool")?;

    Ok(Self::with_db(db, config))
  }

  pub fn with_db(db: DatabaseConnection, config: Config) -> Self {
    Self { db, config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      store: sv::Store::new(&self.db),
      coupon: sv::Coupon::new(&self.db),
      instant: sv::Instant::new(&self.db),
    }
  }
}
