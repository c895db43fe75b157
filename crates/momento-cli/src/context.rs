use std::sync::Arc;

use anyhow::Context;
use momento_assistant::Assistant;
use momento_config::MomentoConfig;
use momento_db::service::MomentoService;

/// Everything a command handler needs.
pub struct AppContext {
    pub config: MomentoConfig,
    pub service: Arc<MomentoService>,
}

impl AppContext {
    /// Open the store named by `database.path` and report trash conflicts.
    pub async fn init(config: MomentoConfig) -> anyhow::Result<Self> {
        let service = MomentoService::new_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?
            .with_display(config.display.options())
            .with_default_limit(config.general.default_limit);

        // Conflicts are logged by the store, one per task id.
        if let Err(error) = service.trash_conflicts().await {
            tracing::warn!(%error, "could not check trash for conflicts");
        }

        Ok(Self {
            config,
            service: Arc::new(service),
        })
    }

    /// Assistant built from the `assistant` config section.
    pub fn assistant(&self) -> anyhow::Result<Assistant> {
        Assistant::from_config(&self.config).map_err(anyhow::Error::from)
    }
}
