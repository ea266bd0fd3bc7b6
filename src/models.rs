use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deputy row as fetched from the record store, with joined display fields.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeputyRow {
    pub id: String,
    pub user_id: String,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub father_name: Option<String>,
    pub grandfather_name: Option<String>,
    pub family_name: Option<String>,
    pub deputy_status: Option<String>,
    pub governorate: Option<String>,
    pub council_name: Option<String>,
    pub district_name: Option<String>,
}

impl DeputyRow {
    /// Display text used for duplicate detection: the curated display name
    /// when present, otherwise the four name parts joined with spaces.
    pub fn full_name(&self) -> String {
        if let Some(name) = self.display_name.as_deref() {
            let name = name.trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
        [
            self.first_name.as_deref(),
            self.father_name.as_deref(),
            self.grandfather_name.as_deref(),
            self.family_name.as_deref(),
        ]
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Input record for the duplicate engine. Candidates are read-only; the
/// engine never mutates or persists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub text: String,
}

/// One candidate inside a duplicate group, with its similarity to the
/// group's representative normalized form (1.0 for exact matches).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub original_text: String,
    pub similarity: f64,
}

/// A cluster of 2+ candidates judged to represent the same entity.
/// Members are ordered by descending similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub normalized: String,
    pub items: Vec<GroupMember>,
}

/// One deputy inside a duplicate group, enriched with display fields for
/// the moderation view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeputyDuplicate {
    pub id: String,
    pub full_name: String,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub father_name: Option<String>,
    pub grandfather_name: Option<String>,
    pub family_name: Option<String>,
    pub deputy_status: Option<String>,
    pub governorate: Option<String>,
    pub council_name: Option<String>,
    pub district_name: Option<String>,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeputyDuplicateGroup {
    pub normalized: String,
    pub count: usize,
    pub deputies: Vec<DeputyDuplicate>,
}

/// Result of a duplicate search. "No duplicates found" is a success with
/// an empty group list; `error` is set only when the search itself failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub success: bool,
    pub duplicate_groups: Vec<DeputyDuplicateGroup>,
    pub total_duplicates: usize,
    pub generated_utc: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutcome {
    pub fn ok(duplicate_groups: Vec<DeputyDuplicateGroup>) -> Self {
        let total_duplicates = duplicate_groups.iter().map(|g| g.count).sum();
        Self {
            success: true,
            duplicate_groups,
            total_duplicates,
            generated_utc: Utc::now(),
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            duplicate_groups: Vec::new(),
            total_duplicates: 0,
            generated_utc: Utc::now(),
            error: Some(reason.into()),
        }
    }
}

/// Result of a single-record deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> DeputyRow {
        DeputyRow {
            id: "d1".into(),
            user_id: "u1".into(),
            display_name: None,
            first_name: Some("محمد".into()),
            father_name: Some("حسن".into()),
            grandfather_name: None,
            family_name: Some("السيد".into()),
            deputy_status: Some("current".into()),
            governorate: Some("القاهرة".into()),
            council_name: None,
            district_name: None,
        }
    }

    #[test]
    fn test_full_name_joins_parts() {
        assert_eq!(row().full_name(), "محمد حسن السيد");
    }

    #[test]
    fn test_full_name_prefers_display_name() {
        let mut r = row();
        r.display_name = Some("د. محمد السيد".into());
        assert_eq!(r.full_name(), "د. محمد السيد");
        // Blank display names fall back to the name parts
        r.display_name = Some("   ".into());
        assert_eq!(r.full_name(), "محمد حسن السيد");
    }

    #[test]
    fn test_outcome_totals() {
        let group = DeputyDuplicateGroup {
            normalized: "محمد حسن السيد".into(),
            count: 2,
            deputies: Vec::new(),
        };
        let outcome = SearchOutcome::ok(vec![group]);
        assert!(outcome.success);
        assert_eq!(outcome.total_duplicates, 2);
        assert!(outcome.error.is_none());

        let failed = SearchOutcome::failed("boom");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }
}
