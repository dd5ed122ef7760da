//! Configuration loading and logger setup for the binary

use ag_shared::config::{AppConfig, Environment};

/// Load `.env`, read the environment and refuse unsafe settings
pub fn load() -> anyhow::Result<AppConfig> {
    // A missing .env file is normal outside development
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

/// Initialize env_logger; `RUST_LOG` overrides the per-environment default
pub fn init_logging(environment: Environment) {
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(environment.default_log_filter()),
    );
}
