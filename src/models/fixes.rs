use serde::{Deserialize, Serialize};

/// Paths under the test tree are ground-truth noise, not fix locations.
const TEST_PATH_MARKER: &str = "src/test/";

/// Raw row of `fix_info.csv`: one method touched by a fixing commit.
#[derive(Debug, Clone, Deserialize)]
pub struct FixRow {
    #[serde(default)]
    pub cve_id: String,
    #[serde(default)]
    pub commit: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixLocation {
    pub commit: String,
    pub file: String,
    pub class: String,
    pub method: String,
}

/// Fixed-method ground truth for a single CVE, indexed at two granularities:
/// plain file paths and `file:class:method` keys.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FixIndex {
    file_level: Vec<String>,
    method_level: Vec<String>,
    locations: Vec<FixLocation>,
}

impl FixIndex {
    /// Build the index for `cve_id` from the full fix-info table. Rows for
    /// other CVEs and rows under the test tree are dropped.
    pub fn from_rows(cve_id: &str, rows: &[FixRow]) -> Self {
        let mut index = FixIndex::default();
        for row in rows {
            if row.cve_id != cve_id {
                continue;
            }
            if row.file.contains(TEST_PATH_MARKER) {
                continue;
            }

            index.file_level.push(row.file.clone());
            index
                .method_level
                .push(format!("{}:{}:{}", row.file, row.class, row.method));
            index.locations.push(FixLocation {
                commit: row.commit.clone(),
                file: row.file.clone(),
                class: row.class.clone(),
                method: row.method.clone(),
            });
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn locations(&self) -> &[FixLocation] {
        &self.locations
    }

    /// File-level match: the URI appears among the fixed files.
    pub fn has_file(&self, uri: &str) -> bool {
        self.file_level.iter().any(|f| f == uri)
    }

    /// Method-level match against a `file:class:method` key.
    pub fn has_method(&self, key: &str) -> bool {
        self.method_level.iter().any(|m| m == key)
    }

    /// Display labels for the fixed methods, deduplicated: the file stem
    /// (extension stripped) joined with the method name, paired with the
    /// location that produced it. Later duplicates are dropped.
    pub fn method_labels(&self, source_extension: &str) -> Vec<(String, &FixLocation)> {
        let mut labels: Vec<(String, &FixLocation)> = Vec::new();
        for loc in &self.locations {
            let stem = loc
                .file
                .rsplit('/')
                .next()
                .unwrap_or(&loc.file)
                .trim_end_matches(source_extension);
            let label = format!("{} : {}", stem, loc.method);
            if !labels.iter().any(|(existing, _)| existing == &label) {
                labels.push((label, loc));
            }
        }
        labels
    }
}
