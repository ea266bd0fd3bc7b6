use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::DeputyRow;

/// Role string that unlocks moderation operations.
pub const ADMIN_ROLE: &str = "application_admin";

/// Look up the role of a user, if any. UUID columns are compared as text
/// so a malformed id reads as "no role" rather than a cast error.
pub async fn fetch_user_role(pool: &PgPool, user_id: &str) -> Result<Option<String>> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT role::text FROM user_roles WHERE user_id::text = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .with_context(|| format!("Failed to query role for user {}", user_id))?;
    Ok(row.map(|(role,)| role))
}

/// Fetch all deputy profiles with the joined display fields the
/// moderation view shows: the four-part name, status, governorate,
/// council and electoral district names.
pub async fn fetch_deputy_candidates(pool: &PgPool) -> Result<Vec<DeputyRow>> {
    let rows = sqlx::query_as::<_, DeputyRow>(
        r#"SELECT dp.id::text AS id,
                  dp.user_id::text AS user_id,
                  dp.display_name,
                  up.first_name,
                  up.father_name,
                  up.grandfather_name,
                  up.family_name,
                  dp.deputy_status::text AS deputy_status,
                  dp.governorate,
                  c.name AS council_name,
                  ed.name AS district_name
             FROM deputy_profiles dp
             JOIN user_profiles up ON up.id = dp.user_id
             LEFT JOIN councils c ON c.id = dp.council_id
             LEFT JOIN electoral_districts ed ON ed.id = dp.electoral_district_id
            ORDER BY up.first_name"#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to fetch deputy profiles")?;
    Ok(rows)
}

/// Resolve the user profile that owns a deputy profile.
pub async fn fetch_deputy_user_id(pool: &PgPool, deputy_id: &str) -> Result<Option<String>> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT user_id::text FROM deputy_profiles WHERE id::text = $1")
            .bind(deputy_id)
            .fetch_optional(pool)
            .await
            .with_context(|| format!("Failed to look up deputy {}", deputy_id))?;
    Ok(row.map(|(user_id,)| user_id))
}

/// Delete a user profile; the store cascades the delete to the dependent
/// deputy profile. Returns the number of rows affected (0 when the
/// profile was already gone).
pub async fn delete_user_profile(pool: &PgPool, user_id: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM user_profiles WHERE id::text = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to delete user profile {}", user_id))?;
    Ok(result.rows_affected())
}
