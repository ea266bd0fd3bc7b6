use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::BufWriter;

use crate::models::DeputyDuplicateGroup;

/// Write the duplicate report as CSV, one row per group member.
pub fn export_groups_csv(groups: &[DeputyDuplicateGroup], path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
    let buf_writer = BufWriter::with_capacity(64 * 1024, file);
    let mut w = WriterBuilder::new().from_writer(buf_writer);
    w.write_record([
        "Group",
        "Normalized",
        "DeputyID",
        "FullName",
        "Status",
        "Council",
        "District",
        "Governorate",
        "SimilarityPct",
    ])?;
    for (group_idx, group) in groups.iter().enumerate() {
        for deputy in &group.deputies {
            w.write_record([
                (group_idx + 1).to_string(),
                group.normalized.clone(),
                deputy.id.clone(),
                deputy.full_name.clone(),
                deputy.deputy_status.clone().unwrap_or_default(),
                deputy.council_name.clone().unwrap_or_default(),
                deputy.district_name.clone().unwrap_or_default(),
                deputy.governorate.clone().unwrap_or_default(),
                format!("{:.0}", deputy.similarity * 100.0),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeputyDuplicate;

    fn group() -> DeputyDuplicateGroup {
        let member = |id: &str, sim: f64| DeputyDuplicate {
            id: id.into(),
            full_name: "احمد علي".into(),
            display_name: None,
            first_name: Some("احمد".into()),
            father_name: None,
            grandfather_name: None,
            family_name: Some("علي".into()),
            deputy_status: Some("current".into()),
            governorate: Some("اسوان".into()),
            council_name: None,
            district_name: None,
            similarity: sim,
        };
        DeputyDuplicateGroup {
            normalized: "احمد علي".into(),
            count: 2,
            deputies: vec![member("d1", 1.0), member("d2", 0.88)],
        }
    }

    #[test]
    fn test_export_writes_one_row_per_member() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        export_groups_csv(&[group()], path.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Group,Normalized,DeputyID"));
        assert!(lines[1].contains("d1"));
        assert!(lines[1].ends_with("100"));
        assert!(lines[2].contains("d2"));
        assert!(lines[2].ends_with("88"));
    }
}
