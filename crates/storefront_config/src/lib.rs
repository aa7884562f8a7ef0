use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

/// Errors raised while assembling the application configuration.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Failed to apply environment overrides: {0}")]
    Overrides(#[from] serde_json::Error),
}

/// Default directory that holds `default.*` and `{RUN_ENV}.*` config files.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Loads the layered configuration.
///
/// Sources, lowest precedence first:
/// 1. `{CONFIG_DIR}/default.(toml|yaml|json)`
/// 2. `{CONFIG_DIR}/{RUN_ENV}.(toml|yaml|json)` (RUN_ENV defaults to "debug")
/// 3. Environment variables `STOREFRONT__SECTION__KEY` (prefix overridable via `PREFIX`)
///
/// Afterwards every `"secret_from_env"` marker is replaced from the environment,
/// see [`env_vars::inject_env_vars`].
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string()));
    let prefix = env_vars::config_prefix();

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {} (env prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let raw_config: AppConfig = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    apply_env_overrides_from_marker(raw_config)
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigLoadError> {
    let mut json = serde_json::to_value(&config)?;
    let replaced = env_vars::inject_env_vars(&mut json);
    if replaced > 0 {
        debug!("Injected {} secrets from environment into config", replaced);
    }
    Ok(serde_json::from_value(json)?)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is taken from `DOTENV_OVERRIDE`, else from the first command line
/// argument when it starts with `.env`, else `.env`. Loading happens once per process.
/// Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
