//! Admin moderation workflows: duplicate search and duplicate resolution.
//!
//! Every fallible step ends in a structured outcome rather than an error
//! crossing the caller boundary: authorization denial, fetch failure, and
//! storage failure all surface as `{success: false, error}` values the
//! caller renders to the moderator.

use log::{error, info, warn};
use sqlx::PgPool;
use std::time::Instant;

use crate::db::queries::{self, ADMIN_ROLE};
use crate::matching::find_duplicate_groups;
use crate::models::{
    Candidate, DeleteOutcome, DeputyDuplicate, DeputyDuplicateGroup, DeputyRow, SearchOutcome,
};

/// Moderation requires the application-admin role.
pub fn is_admin(role: Option<&str>) -> bool {
    role == Some(ADMIN_ROLE)
}

/// Check the acting user's role before touching any data. Returns the
/// human-readable denial reason on failure.
async fn authorize_admin(pool: &PgPool, acting_user: &str) -> Result<(), String> {
    match queries::fetch_user_role(pool, acting_user).await {
        Ok(role) if is_admin(role.as_deref()) => Ok(()),
        Ok(role) => {
            warn!(
                "User {} denied (role: {})",
                acting_user,
                role.as_deref().unwrap_or("none")
            );
            Err(format!(
                "not authorized: user {} does not hold the {} role",
                acting_user, ADMIN_ROLE
            ))
        }
        Err(e) => Err(format!("authorization check failed: {:#}", e)),
    }
}

/// Search all deputy records for fuzzy-duplicate names.
///
/// Advisory and read-only: the result drives a manual review, and actual
/// deletion is the separate, explicitly invoked [`delete_deputy`].
pub async fn find_duplicate_deputies(
    pool: &PgPool,
    acting_user: &str,
    threshold: f64,
) -> SearchOutcome {
    if let Err(reason) = authorize_admin(pool, acting_user).await {
        return SearchOutcome::failed(reason);
    }

    let started = Instant::now();
    let rows = match queries::fetch_deputy_candidates(pool).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Deputy fetch failed: {:#}", e);
            return SearchOutcome::failed(format!("failed to fetch deputy records: {:#}", e));
        }
    };
    if rows.is_empty() {
        return SearchOutcome::ok(Vec::new());
    }

    let candidates: Vec<Candidate> = rows
        .iter()
        .map(|row| Candidate {
            id: row.id.clone(),
            text: row.full_name(),
        })
        .collect();
    let groups = find_duplicate_groups(&candidates, threshold);

    let formatted: Vec<DeputyDuplicateGroup> = groups
        .into_iter()
        .map(|group| {
            let deputies: Vec<DeputyDuplicate> = group
                .items
                .iter()
                .filter_map(|member| {
                    rows.iter()
                        .find(|row| row.id == member.id)
                        .map(|row| enrich(row, &member.original_text, member.similarity))
                })
                .collect();
            DeputyDuplicateGroup {
                normalized: group.normalized,
                count: deputies.len(),
                deputies,
            }
        })
        .collect();

    info!(
        "Duplicate search over {} deputies took {:.2?}: {} group(s) at threshold {:.2}",
        rows.len(),
        started.elapsed(),
        formatted.len(),
        threshold
    );
    SearchOutcome::ok(formatted)
}

fn enrich(row: &DeputyRow, full_name: &str, similarity: f64) -> DeputyDuplicate {
    DeputyDuplicate {
        id: row.id.clone(),
        full_name: full_name.to_string(),
        display_name: row.display_name.clone(),
        first_name: row.first_name.clone(),
        father_name: row.father_name.clone(),
        grandfather_name: row.grandfather_name.clone(),
        family_name: row.family_name.clone(),
        deputy_status: row.deputy_status.clone(),
        governorate: row.governorate.clone(),
        council_name: row.council_name.clone(),
        district_name: row.district_name.clone(),
        similarity,
    }
}

/// Permanently remove one deputy after a moderator confirmed it is a true
/// duplicate. Deletes the owning user profile; the store cascades to the
/// deputy profile. Authorization is checked before any mutation.
pub async fn delete_deputy(pool: &PgPool, acting_user: &str, deputy_id: &str) -> DeleteOutcome {
    if let Err(reason) = authorize_admin(pool, acting_user).await {
        return DeleteOutcome::failed(reason);
    }

    let user_id = match queries::fetch_deputy_user_id(pool, deputy_id).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => return DeleteOutcome::failed(format!("deputy {} not found", deputy_id)),
        Err(e) => {
            return DeleteOutcome::failed(format!(
                "failed to look up deputy {}: {:#}",
                deputy_id, e
            ));
        }
    };

    match queries::delete_user_profile(pool, &user_id).await {
        Ok(0) => DeleteOutcome::failed(format!("user profile {} not found", user_id)),
        Ok(_) => {
            info!("Deleted deputy {} (user profile {})", deputy_id, user_id);
            DeleteOutcome::ok()
        }
        Err(e) => DeleteOutcome::failed(format!("failed to delete deputy {}: {:#}", deputy_id, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        assert!(is_admin(Some("application_admin")));
        assert!(!is_admin(Some("manager")));
        assert!(!is_admin(Some("deputy")));
        assert!(!is_admin(None));
    }

    #[test]
    fn test_enrich_carries_display_fields() {
        let row = DeputyRow {
            id: "d1".into(),
            user_id: "u1".into(),
            display_name: Some("د. محمد السيد".into()),
            first_name: Some("محمد".into()),
            father_name: None,
            grandfather_name: None,
            family_name: Some("السيد".into()),
            deputy_status: Some("current".into()),
            governorate: Some("الجيزة".into()),
            council_name: Some("مجلس النواب".into()),
            district_name: None,
        };
        let dup = enrich(&row, "د. محمد السيد", 0.92);
        assert_eq!(dup.id, "d1");
        assert_eq!(dup.similarity, 0.92);
        assert_eq!(dup.council_name.as_deref(), Some("مجلس النواب"));
    }
}
