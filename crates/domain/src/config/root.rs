use serde::{Deserialize, Serialize};
use std::path::Path;

use super::dns::DnsScanConfig;
use super::errors::ConfigError;
use super::forwarding::ForwardingConfig;
use super::logging::LoggingConfig;
use super::paths::PathsConfig;

const LOCAL_CONFIG_PATH: &str = "vortexl2.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/vortexl2/vortexl2.toml";

/// Main configuration structure for VortexL2
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// State directory, generated files and external binaries
    #[serde(default)]
    pub paths: PathsConfig,

    /// DNS scanning parameters
    #[serde(default)]
    pub dns: DnsScanConfig,

    /// Port forwarding daemon settings
    #[serde(default)]
    pub forwarding: ForwardingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. vortexl2.toml in current directory
    /// 3. /etc/vortexl2/vortexl2.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(dir) = overrides.state_dir {
            self.paths.state_dir = dir.into();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.probe_repetitions == 0 {
            return Err(ConfigError::Validation(
                "dns.probe_repetitions must be at least 1".to_string(),
            ));
        }

        if self.dns.probe_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "dns.probe_timeout_ms cannot be 0".to_string(),
            ));
        }

        if self.dns.primary_domain.trim().is_empty() || self.dns.secondary_domain.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "DNS validation domains cannot be empty".to_string(),
            ));
        }

        if self.dns.primary_domain == self.dns.secondary_domain {
            return Err(ConfigError::Validation(
                "dns.primary_domain and dns.secondary_domain must differ".to_string(),
            ));
        }

        if !(1..=24).contains(&self.dns.default_check_interval_hours) {
            return Err(ConfigError::Validation(format!(
                "dns.default_check_interval_hours must be 1-24, got {}",
                self.dns.default_check_interval_hours
            )));
        }

        if self.forwarding.watchdog_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "forwarding.watchdog_interval_secs cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub state_dir: Option<String>,
}
