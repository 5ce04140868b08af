use serde::{Deserialize, Serialize};

/// Raw row of `project_info.csv`, exactly as the artifact generator writes
/// it. List-valued columns are `;`-separated strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub cve_id: String,
    #[serde(default)]
    pub project_slug: String,
    #[serde(default)]
    pub cwe_id: String,
    #[serde(default)]
    pub github_username: String,
    #[serde(default)]
    pub github_repository_name: String,
    #[serde(default)]
    pub github_tag: String,
    #[serde(default)]
    pub repository_url: String,
    #[serde(default)]
    pub fix_commit_ids: String,
}

/// One benchmark entry: a CVE pinned to a project release, with its CWE
/// classification and the commits that fixed it.
#[derive(Debug, Clone, Serialize)]
pub struct CveRecord {
    pub id: String,
    pub cve_id: String,
    pub project_slug: String,
    pub author: String,
    pub package: String,
    pub tag: String,
    pub cwe_ids: Vec<String>,
    pub github_username: String,
    pub github_repository_name: String,
    pub repository_url: String,
    pub fix_commit_ids: Vec<String>,
}

impl From<ProjectRow> for CveRecord {
    fn from(row: ProjectRow) -> Self {
        // Slugs look like `author__package_CVE-2016-7051`; everything before
        // the CVE suffix splits into author and package on `__`.
        let stem = row
            .project_slug
            .split("_CVE-")
            .next()
            .unwrap_or("")
            .to_string();
        let (author, package) = match stem.split_once("__") {
            Some((author, package)) => (author.to_string(), package.to_string()),
            None => (stem, String::new()),
        };

        Self {
            id: row.id,
            cve_id: row.cve_id,
            project_slug: row.project_slug,
            author,
            package,
            tag: row.github_tag,
            cwe_ids: split_list(&row.cwe_id),
            github_username: row.github_username,
            github_repository_name: row.github_repository_name,
            repository_url: row.repository_url,
            fix_commit_ids: split_list(&row.fix_commit_ids),
        }
    }
}

impl CveRecord {
    /// A record is browsable when it carries a benchmark id, a CVE id, and
    /// at least one fixing commit. Rows failing this are artifacts of the
    /// CSV generator (padding rows, unfixed entries) and are hidden.
    pub fn is_browsable(&self) -> bool {
        !self.id.is_empty() && !self.cve_id.is_empty() && !self.fix_commit_ids.is_empty()
    }

    pub fn matches_cwe(&self, cwe: u32) -> bool {
        let wanted = format!("CWE-{}", cwe);
        self.cwe_ids.iter().any(|c| c == &wanted)
    }

    pub fn nvd_url(&self) -> String {
        format!("https://nvd.nist.gov/vuln/detail/{}", self.cve_id)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
