//! Configuration management for the satisfaction kiosk
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables prefixed with `KIOSK_` (`__` separates sections, e.g.
//! `KIOSK_ADMIN__PAGE_SIZE=50`).

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use kiosk_types::LocalZone;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "KIOSK_";

/// Main kiosk configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KioskConfig {
    /// Service configuration
    pub service: ServiceConfig,

    /// Kiosk surface settings
    pub kiosk: KioskSettings,

    /// Administrative surface settings
    pub admin: AdminConfig,

    /// Export settings
    pub export: ExportConfig,

    /// Local time interpretation
    pub locale: LocaleConfig,

    /// Observability settings
    pub observability: ObservabilityConfig,
}

impl KioskConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(KioskConfig::default()));

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::LoadError(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Load and validate in one step
    pub fn load_validated(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Self::load(config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.service.port == 0 {
            return Err(ConfigError::ValidationError("Invalid service port".to_string()));
        }

        if self.service.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.kiosk.lock_window_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Lock window must be greater than zero".to_string(),
            ));
        }

        if self.kiosk.notice_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Notice duration must be greater than zero".to_string(),
            ));
        }

        if self.kiosk.broadcast_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "Broadcast capacity must be greater than zero".to_string(),
            ));
        }

        if self.admin.secret.is_empty() {
            return Err(ConfigError::ValidationError("Admin secret required".to_string()));
        }

        if self.admin.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "Page size must be greater than zero".to_string(),
            ));
        }

        if self.admin.session_ttl_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Session TTL must be greater than zero".to_string(),
            ));
        }

        if self.export.file_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError("Export file prefix required".to_string()));
        }

        if let Some(minutes) = self.locale.utc_offset_minutes {
            if LocalZone::from_offset_minutes(minutes).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "UTC offset {minutes} minutes is out of range"
                )));
            }
        }

        Ok(())
    }
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Service host
    pub host: String,

    /// Service port
    pub port: u16,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    /// `host:port` socket address string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "satisfaction-kiosk".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

/// Kiosk surface settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KioskSettings {
    /// Time after an accepted submission during which new ones are rejected
    pub lock_window_ms: u64,

    /// How long the confirmation notice stays visible
    pub notice_ms: u64,

    /// Capacity of the new-record broadcast channel
    pub broadcast_capacity: usize,
}

impl KioskSettings {
    pub fn lock_window(&self) -> Duration {
        Duration::from_millis(self.lock_window_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            lock_window_ms: 2000,
            notice_ms: 1200,
            broadcast_capacity: 256,
        }
    }
}

/// Administrative surface settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared secret compared in plain text
    pub secret: String,

    /// History page size
    pub page_size: usize,

    /// Idle time after which an admin session is closed
    pub session_ttl_secs: u64,
}

impl AdminConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            secret: "1234".to_string(),
            page_size: 20,
            session_ttl_secs: 8 * 60 * 60,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// File name prefix, followed by `_<YYYY-MM-DD>.<ext>`
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "kiosk_feedback".to_string(),
        }
    }
}

/// Local time interpretation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocaleConfig {
    /// Fixed offset east of UTC in minutes; the host zone is used when unset
    pub utc_offset_minutes: Option<i32>,
}

impl LocaleConfig {
    /// Resolve the zone, falling back to the host zone for invalid offsets
    pub fn zone(&self) -> LocalZone {
        self.utc_offset_minutes
            .and_then(LocalZone::from_offset_minutes)
            .unwrap_or_default()
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,

    /// Enable structured JSON logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = KioskConfig::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.kiosk.lock_window(), Duration::from_millis(2000));
        assert_eq!(config.kiosk.notice_duration(), Duration::from_millis(1200));
        assert_eq!(config.admin.secret, "1234");
        assert_eq!(config.admin.page_size, 20);
        assert_eq!(config.admin.session_ttl(), Duration::from_secs(28_800));
        assert_eq!(config.export.file_prefix, "kiosk_feedback");
        assert_eq!(config.locale.zone(), LocalZone::System);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = KioskConfig::default();
        config.service.port = 0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.admin.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.admin.secret = String::new();
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.admin.session_ttl_secs = 0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.kiosk.lock_window_ms = 0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.locale.utc_offset_minutes = Some(24 * 60);
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_locale_zone() {
        let locale = LocaleConfig {
            utc_offset_minutes: Some(60),
        };
        assert_eq!(locale.zone(), LocalZone::from_offset_minutes(60).unwrap());
    }

    #[test]
    fn test_load_layers_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "kiosk.yaml",
                r#"
service:
  port: 9090
admin:
  secret: "4321"
locale:
  utc_offset_minutes: 0
"#,
            )?;
            jail.set_env("KIOSK_ADMIN__PAGE_SIZE", "50");
            jail.set_env("KIOSK_KIOSK__LOCK_WINDOW_MS", "3000");

            let config = KioskConfig::load_validated(Some(PathBuf::from("kiosk.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.service.port, 9090);
            assert_eq!(config.service.host, "0.0.0.0");
            assert_eq!(config.admin.secret, "4321");
            assert_eq!(config.admin.page_size, 50);
            assert_eq!(config.kiosk.lock_window_ms, 3000);
            assert_eq!(config.kiosk.notice_ms, 1200);
            assert_eq!(config.locale.zone(), LocalZone::utc());
            Ok(())
        });
    }

    #[test]
    fn test_load_missing_file() {
        Jail::expect_with(|_jail| {
            let result = KioskConfig::load(Some(PathBuf::from("missing.yaml")));
            assert!(matches!(result, Err(ConfigError::LoadError(_))));
            Ok(())
        });
    }
}
