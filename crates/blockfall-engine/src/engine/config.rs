use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Gravity period a session starts with and returns to on reset.
pub const DEFAULT_DROP_INTERVAL: Duration = Duration::from_millis(800);

/// Faster gravity period. Reserved; no session transition selects it yet.
pub const FAST_DROP_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("drop interval must be at least 1ms")]
pub struct ConfigError;

/// Tunables for a [`GameSession`](super::GameSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Gravity period.
    #[serde(rename = "drop_interval_ms", with = "duration_millis")]
    pub drop_interval: Duration,
    /// Seed for the piece bag. Each start reuses it, so every game deals the
    /// same sequence.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            drop_interval: DEFAULT_DROP_INTERVAL,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drop_interval.is_zero() {
            return Err(ConfigError);
        }
        Ok(())
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.drop_interval, Duration::from_millis(800));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let config = SessionConfig {
            drop_interval: Duration::ZERO,
            seed: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_uses_millis() {
        let config = SessionConfig {
            drop_interval: Duration::from_millis(250),
            seed: Some(9),
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "drop_interval_ms": 250, "seed": 9 })
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{ "seed": 3 }"#).unwrap();
        assert_eq!(config.drop_interval, DEFAULT_DROP_INTERVAL);
        assert_eq!(config.seed, Some(3));
    }
}
