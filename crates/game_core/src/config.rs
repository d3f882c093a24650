use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_attempts: u32,
    pub tick_interval_ms: u64,
    /// How long the final result stays visible before an exhausted session
    /// clears itself. Zero resets before `stop` returns.
    pub auto_reset_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            tick_interval_ms: 100,
            auto_reset_delay_ms: 1_000,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn auto_reset_delay(&self) -> Duration {
        Duration::from_millis(self.auto_reset_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stopwatch_game() {
        let config = EngineConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_attempt_cap() {
        let config = EngineConfig {
            max_attempts: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroMaxAttempts)));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let config = EngineConfig {
            tick_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTickInterval)));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: EngineConfig = toml::from_str("max_attempts = 3").expect("parse");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.auto_reset_delay_ms, 1_000);
    }
}
