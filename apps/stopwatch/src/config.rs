use std::{
    fs,
    path::{Path, PathBuf},
};

use game_core::EngineConfig;
use shared::error::ConfigError;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "stopwatch.toml";

const ENV_MAX_ATTEMPTS: &str = "STOPWATCH_MAX_ATTEMPTS";
const ENV_TICK_INTERVAL_MS: &str = "STOPWATCH_TICK_INTERVAL_MS";
const ENV_AUTO_RESET_DELAY_MS: &str = "STOPWATCH_AUTO_RESET_DELAY_MS";

/// Defaults, then the config file, then `STOPWATCH_*` environment overrides.
///
/// An explicit `path` must exist; the default `stopwatch.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let mut settings = match path {
        Some(path) => read_config_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_config_file(default_path)?
            } else {
                EngineConfig::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_config_file(path: &Path) -> Result<EngineConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw, path)
}

fn parse_config(raw: &str, path: &Path) -> Result<EngineConfig, ConfigError> {
    toml::from_str::<EngineConfig>(raw).map_err(|err| ConfigError::Parse {
        path: PathBuf::from(path),
        message: err.to_string(),
    })
}

fn apply_env_overrides(settings: &mut EngineConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = parsed_env(&lookup, ENV_MAX_ATTEMPTS) {
        settings.max_attempts = v;
    }
    if let Some(v) = parsed_env(&lookup, ENV_TICK_INTERVAL_MS) {
        settings.tick_interval_ms = v;
    }
    if let Some(v) = parsed_env(&lookup, ENV_AUTO_RESET_DELAY_MS) {
        settings.auto_reset_delay_ms = v;
    }
}

fn parsed_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
