//! Run modes. Each mode is a plugin kept alive by [`App`].

pub mod runtime;
pub mod server;

use tokio::{task::JoinSet, time::sleep};

use crate::{prelude::*, state::AppState};

const RESTART_DELAY: Duration = Duration::from_secs(5);

#[async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

pub struct App {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl App {
  pub fn new() -> Self {
    Self { plugins: Vec::new() }
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Arc::new(plugin));
    self
  }

  /// Spawns every plugin under supervision. A plugin that returns, fails or
  /// panics is restarted after a short delay; dropping or aborting the
  /// returned set stops them all.
  pub fn run(self, app: Arc<AppState>) -> JoinSet<()> {
    let mut set = JoinSet::new();

    for plugin in self.plugins {
      let app = app.clone();
      set.spawn(supervise(plugin, app));
    }

    set
  }
}

async fn supervise(plugin: Arc<dyn Plugin>, app: Arc<AppState>) {
  let name = plugin.name();
  info!("SYSTEM: Service `{name}` initialized");

  loop {
    let task = {
      let (plugin, app) = (plugin.clone(), app.clone());
      tokio::spawn(async move { plugin.start(app).await })
    };

    match task.await {
      Ok(Ok(())) => warn!("Service `{name}` stopped unexpectedly (Ok)."),
      Ok(Err(err)) => error!("Service `{name}` crashed with error: {err:#}."),
      Err(err) if err.is_cancelled() => {
        info!("Service `{name}` shutdown.");
        return;
      }
      Err(_) => error!("Service `{name}` PANICKED!"),
    }

    sleep(RESTART_DELAY).await;
    info!("SYSTEM: Restarting service `{name}`...");
  }
}
