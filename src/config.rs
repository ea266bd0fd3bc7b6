use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::matching::DEFAULT_THRESHOLD;

#[derive(Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConfig {
    pub fn to_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchConfig {
    /// Similarity threshold in 0..=1; members scoring at or above it are
    /// grouped as duplicates.
    pub threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct ExportConfig {
    pub out_path: Option<String>,
    pub json: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// User id the tool acts as; moderation operations require this user
    /// to hold the admin role.
    pub acting_user: String,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.host.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.host",
            });
        }
        if self.database.username.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.username",
            });
        }
        if self.database.database.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.database",
            });
        }
        if self.database.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.port",
                reason: "must be non-zero".into(),
            });
        }
        if self.acting_user.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "acting_user",
            });
        }
        if !(self.search.threshold > 0.0 && self.search.threshold <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "search.threshold",
                reason: format!("{} not in (0, 1]", self.search.threshold),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                username: "portal".into(),
                password: "secret".into(),
                host: "127.0.0.1".into(),
                port: 5432,
                database: "portal".into(),
            },
            acting_user: "9f3c2d1e-0000-0000-0000-000000000000".into(),
            search: SearchConfig::default(),
            export: ExportConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_missing_host_rejected() {
        let mut cfg = valid();
        cfg.database.host = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_threshold_range_enforced() {
        let mut cfg = valid();
        cfg.search.threshold = 0.0;
        assert!(cfg.validate().is_err());
        cfg.search.threshold = 1.2;
        assert!(cfg.validate().is_err());
        cfg.search.threshold = 1.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_password() {
        let cfg = valid();
        let dbg = format!("{:?}", cfg.database);
        assert!(dbg.contains("<redacted>"));
        assert!(!dbg.contains("secret"));
    }
}
