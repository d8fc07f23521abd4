use std::{
    net::{SocketAddr, ToSocketAddrs},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{protocol::DEFAULT_PORT, LightClientError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulbConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(rename = "timeout_ms", with = "millis", default = "default_timeout")]
    pub timeout: Duration,
    #[serde(rename = "retry_delay_ms", with = "millis", default)]
    pub retry_delay: Duration,
    #[serde(
        rename = "max_retry_delay_ms",
        with = "millis",
        default = "default_max_retry_delay"
    )]
    pub max_retry_delay: Duration,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_attempts() -> u32 {
    3
}

fn default_timeout() -> Duration {
    Duration::from_secs(1)
}

fn default_max_retry_delay() -> Duration {
    Duration::from_secs(8)
}

impl BulbConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            max_attempts: default_max_attempts(),
            timeout: default_timeout(),
            retry_delay: Duration::ZERO,
            max_retry_delay: default_max_retry_delay(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_max_retry_delay(mut self, delay: Duration) -> Self {
        self.max_retry_delay = delay;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(LightClientError::InvalidConfig {
                reason: "host must not be empty".into(),
            });
        }
        if self.max_attempts == 0 {
            return Err(LightClientError::InvalidConfig {
                reason: "max_attempts must be at least 1".into(),
            });
        }
        if self.timeout.is_zero() {
            return Err(LightClientError::InvalidConfig {
                reason: "timeout must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Resolves `host:port` to the first socket address it maps to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| LightClientError::InvalidConfig {
                reason: format!("cannot resolve {}:{}: {e}", self.host, self.port),
            })?
            .next()
            .ok_or_else(|| LightClientError::InvalidConfig {
                reason: format!("{}:{} resolved to no addresses", self.host, self.port),
            })
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis().try_into().unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_device_conventions() {
        let config = BulbConfig::new("10.0.0.7");
        assert_eq!(config.port, 5577);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.retry_delay, Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserialize_fills_in_defaults() {
        let config: BulbConfig = serde_json::from_str(r#"{"host": "bulb.local"}"#).unwrap();
        assert_eq!(config, BulbConfig::new("bulb.local"));
    }

    #[test]
    fn deserialize_durations_in_millis() {
        let config: BulbConfig = serde_json::from_str(
            r#"{"host": "10.0.0.7", "port": 6000, "max_attempts": 5, "timeout_ms": 250, "retry_delay_ms": 20}"#,
        )
        .unwrap();
        assert_eq!(config.port, 6000);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.retry_delay, Duration::from_millis(20));

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout_ms"], 250);
        assert_eq!(json["max_retry_delay_ms"], 8000);
    }

    #[test]
    fn validate_rejects_unusable_settings() {
        assert!(BulbConfig::new("").validate().is_err());
        assert!(BulbConfig::new("10.0.0.7")
            .with_max_attempts(0)
            .validate()
            .is_err());
        assert!(BulbConfig::new("10.0.0.7")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn socket_addr_uses_configured_port() {
        let addr = BulbConfig::new("127.0.0.1")
            .with_port(4321)
            .socket_addr()
            .unwrap();
        assert_eq!(addr, "127.0.0.1:4321".parse().unwrap());
    }
}
