use tracing::info;

use crate::client::ArtifactClient;
use crate::config::DatasetConfig;
use crate::errors::VulnScopeError;
use crate::models::{CveRecord, FixIndex, FixRow, ItemLocation, ItemRow, ProjectRow};

/// Fetch and convert the per-project table.
pub async fn load_records(
    client: &ArtifactClient,
    cfg: &DatasetConfig,
) -> Result<Vec<CveRecord>, VulnScopeError> {
    let rows: Vec<ProjectRow> = client.fetch_csv(&cfg.project_info).await?;
    let records: Vec<CveRecord> = rows.into_iter().map(CveRecord::from).collect();
    info!(records = records.len(), "Loaded project info");
    Ok(records)
}

/// Records fit for display, optionally narrowed to one CWE category.
pub fn browsable<'a>(records: &'a [CveRecord], cwe: Option<u32>) -> Vec<&'a CveRecord> {
    records
        .iter()
        .filter(|r| r.is_browsable())
        .filter(|r| cwe.map_or(true, |c| r.matches_cwe(c)))
        .collect()
}

pub fn find_record<'a>(records: &'a [CveRecord], cve_id: &str) -> Option<&'a CveRecord> {
    records.iter().find(|r| r.cve_id == cve_id)
}

/// Fetch the fix-info table and index the rows belonging to `cve_id`.
pub async fn load_fix_index(
    client: &ArtifactClient,
    cfg: &DatasetConfig,
    cve_id: &str,
) -> Result<FixIndex, VulnScopeError> {
    let rows: Vec<FixRow> = client.fetch_csv(&cfg.fix_info).await?;
    Ok(FixIndex::from_rows(cve_id, &rows))
}

pub async fn load_class_locations(
    client: &ArtifactClient,
    cfg: &DatasetConfig,
    db_name: &str,
    run_id: &str,
) -> Result<Vec<ItemLocation>, VulnScopeError> {
    load_item_locations(client, cfg, db_name, run_id, "fetch_class_locs").await
}

pub async fn load_func_locations(
    client: &ArtifactClient,
    cfg: &DatasetConfig,
    db_name: &str,
    run_id: &str,
) -> Result<Vec<ItemLocation>, VulnScopeError> {
    load_item_locations(client, cfg, db_name, run_id, "fetch_func_locs").await
}

async fn load_item_locations(
    client: &ArtifactClient,
    cfg: &DatasetConfig,
    db_name: &str,
    run_id: &str,
    query: &str,
) -> Result<Vec<ItemLocation>, VulnScopeError> {
    let path = format!(
        "{}/{}/{}/{}/results.csv",
        cfg.output_dir, db_name, run_id, query
    );
    let rows: Vec<ItemRow> = client.fetch_csv(&path).await?;
    Ok(ItemLocation::from_rows(&rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectRow;

    fn record(id: &str, cve: &str, cwes: &str, commits: &str) -> CveRecord {
        CveRecord::from(ProjectRow {
            id: id.to_string(),
            cve_id: cve.to_string(),
            project_slug: format!("owner__pkg_{}", cve),
            cwe_id: cwes.to_string(),
            fix_commit_ids: commits.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_browsable_drops_incomplete_rows() {
        let records = vec![
            record("1", "CVE-1", "CWE-79", "abc"),
            record("", "CVE-2", "CWE-79", "abc"),
            record("3", "", "CWE-79", "abc"),
            record("4", "CVE-4", "CWE-79", ""),
        ];
        let visible = browsable(&records, None);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].cve_id, "CVE-1");
    }

    #[test]
    fn test_browsable_cwe_filter() {
        let records = vec![
            record("1", "CVE-1", "CWE-22;CWE-79", "abc"),
            record("2", "CVE-2", "CWE-78", "abc"),
            record("3", "CVE-3", "", "abc"),
        ];
        let visible = browsable(&records, Some(22));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].cve_id, "CVE-1");
    }

    #[test]
    fn test_find_record_by_cve() {
        let records = vec![record("1", "CVE-1", "", "abc"), record("2", "CVE-2", "", "abc")];
        assert!(find_record(&records, "CVE-2").is_some());
        assert!(find_record(&records, "CVE-9").is_none());
    }
}
