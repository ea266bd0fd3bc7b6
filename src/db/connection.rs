use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use crate::config::DatabaseConfig;

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

pub async fn make_pool(cfg: &DatabaseConfig) -> Result<PgPool> {
    let url = cfg.to_url();
    let max_conn: u32 = match std::env::var("DEPUTY_DEDUP_POOL_SIZE") {
        Ok(s) => match s.parse::<u32>() {
            Ok(v) if v > 0 => v,
            _ => {
                log::warn!("Invalid DEPUTY_DEDUP_POOL_SIZE='{}'; using default", s);
                8
            }
        },
        Err(_) => 8,
    };
    let acquire_ms = env_u64("DEPUTY_DEDUP_ACQUIRE_MS", 30_000);
    let idle_ms = env_u64("DEPUTY_DEDUP_IDLE_MS", 30_000);

    let pool = PgPoolOptions::new()
        .max_connections(max_conn)
        .acquire_timeout(Duration::from_millis(acquire_ms))
        .idle_timeout(Some(Duration::from_millis(idle_ms)))
        .connect(&url)
        .await?;
    Ok(pool)
}
