use anyhow::Context;
use momento_config::MomentoConfig;

use crate::cli::GlobalFlags;

/// Load `.env` files and extract the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<MomentoConfig> {
    load_dotenv(flags)?;

    let extra = flags
        .config_dir
        .as_ref()
        .map(|dir| dir.join("config.toml"))
        .filter(|path| path.exists());

    MomentoConfig::load_from(extra.as_deref()).context("failed to load momento configuration")
}

fn load_dotenv(flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(dir) = &flags.config_dir {
        let env_path = dir.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return Ok(());
        }
    }

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env"),
    }
    Ok(())
}
