pub mod server;

use std::sync::Arc;

use crate::state::AppState;

/// A long-lived part of the service, started once the state is ready.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct App {
  plugins: Vec<Box<dyn Plugin>>,
}

impl App {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Box::new(plugin));
    self
  }

  /// Starts every plugin in registration order, stopping at the first one
  /// that fails.
  pub async fn run(self, app: Arc<AppState>) -> anyhow::Result<()> {
    for plugin in self.plugins {
      let name = plugin.name();
      tracing::info!("init `{}`", name);

      plugin.start(app.clone()).await.map_err(|err| {
        tracing::error!("failed `{}`: {err}", name);
        err.context(format!("plugin `{name}` failed to start"))
      })?;
    }
    Ok(())
  }
}
