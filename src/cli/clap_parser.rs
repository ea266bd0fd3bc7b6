use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, DatabaseConfig, ExportConfig, SearchConfig};
use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "deputy_dedup",
    version,
    about = "Arabic fuzzy-duplicate finder for deputy records (CLI)",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// DB host (env: DB_HOST)
    #[arg(long, value_name = "HOST", env = "DB_HOST")]
    pub host: String,
    /// DB port (env: DB_PORT, default 5432)
    #[arg(long, value_name = "PORT", env = "DB_PORT", default_value_t = 5432)]
    pub port: u16,
    /// DB user (env: DB_USER)
    #[arg(long, value_name = "USER", env = "DB_USER")]
    pub user: String,
    /// DB password (env: DB_PASSWORD or DB_PASS)
    #[arg(long, value_name = "PASSWORD", env = "DB_PASSWORD", default_value = "")]
    pub password: String,
    /// Database name (env: DB_NAME)
    #[arg(long, value_name = "DATABASE", env = "DB_NAME")]
    pub database: String,
}

impl DbArgs {
    fn to_config(&self) -> DatabaseConfig {
        let password = if self.password.is_empty() {
            std::env::var("DB_PASS").unwrap_or_default()
        } else {
            self.password.clone()
        };
        DatabaseConfig {
            username: self.user.clone(),
            password,
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search deputy records for fuzzy-duplicate names
    Search {
        #[command(flatten)]
        db: DbArgs,
        /// Acting user id; must hold the application_admin role
        /// (env: DEPUTY_DEDUP_ACTING_USER)
        #[arg(
            long = "acting-user",
            value_name = "USER_ID",
            env = "DEPUTY_DEDUP_ACTING_USER"
        )]
        acting_user: String,
        /// Similarity threshold as a percentage, 50-100
        #[arg(long, value_name = "PCT", default_value_t = 85)]
        threshold: u8,
        /// Write the duplicate report to a CSV file
        #[arg(long, value_name = "OUT_PATH")]
        out: Option<String>,
        /// Print the report as JSON instead of the human summary
        #[arg(long)]
        json: bool,
    },
    /// Delete one duplicate deputy record (cascades to the deputy profile)
    Delete {
        #[command(flatten)]
        db: DbArgs,
        /// Acting user id; must hold the application_admin role
        /// (env: DEPUTY_DEDUP_ACTING_USER)
        #[arg(
            long = "acting-user",
            value_name = "USER_ID",
            env = "DEPUTY_DEDUP_ACTING_USER"
        )]
        acting_user: String,
        /// Deputy profile id to delete
        #[arg(value_name = "DEPUTY_ID")]
        deputy_id: String,
    },
    /// Generate a .env.template with connection placeholders
    EnvTemplate {
        #[arg(value_name = "PATH", default_value = ".env.template")]
        path: String,
    },
}

/// The moderation UI exposes the threshold as a 50-100% slider; the same
/// range applies here before conversion to the 0..=1 score scale.
fn threshold_from_pct(pct: u8) -> Result<f64, ConfigError> {
    if !(50..=100).contains(&pct) {
        return Err(ConfigError::InvalidValue {
            field: "threshold",
            reason: format!("{} not in 50..=100", pct),
        });
    }
    Ok(f64::from(pct) / 100.0)
}

pub fn search_config(
    db: &DbArgs,
    acting_user: &str,
    threshold_pct: u8,
    out_path: Option<String>,
    json: bool,
) -> Result<AppConfig, ConfigError> {
    let cfg = AppConfig {
        database: db.to_config(),
        acting_user: acting_user.to_string(),
        search: SearchConfig {
            threshold: threshold_from_pct(threshold_pct)?,
        },
        export: ExportConfig { out_path, json },
    };
    cfg.validate()?;
    Ok(cfg)
}

pub fn delete_config(db: &DbArgs, acting_user: &str) -> Result<AppConfig, ConfigError> {
    let cfg = AppConfig {
        database: db.to_config(),
        acting_user: acting_user.to_string(),
        search: SearchConfig::default(),
        export: ExportConfig::default(),
    };
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_args() -> DbArgs {
        DbArgs {
            host: "127.0.0.1".into(),
            port: 5432,
            user: "portal".into(),
            password: "secret".into(),
            database: "portal".into(),
        }
    }

    #[test]
    fn test_threshold_pct_conversion() {
        let cfg = search_config(&db_args(), "admin-id", 85, None, false).unwrap();
        assert!((cfg.search.threshold - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_pct_out_of_range() {
        assert!(search_config(&db_args(), "admin-id", 49, None, false).is_err());
        assert!(search_config(&db_args(), "admin-id", 101, None, false).is_err());
        assert!(search_config(&db_args(), "admin-id", 50, None, false).is_ok());
        assert!(search_config(&db_args(), "admin-id", 100, None, false).is_ok());
    }

    #[test]
    fn test_delete_config_requires_acting_user() {
        assert!(delete_config(&db_args(), "").is_err());
        assert!(delete_config(&db_args(), "admin-id").is_ok());
    }
}
