use crate::models::CveRecord;

/// Every whitespace-separated term of `search_text` must match at least one
/// haystack, case-insensitively. An empty search matches everything.
pub fn matches_search(search_text: &str, haystacks: &[&str]) -> bool {
    search_text
        .split_whitespace()
        .map(|part| part.to_lowercase())
        .all(|part| {
            haystacks
                .iter()
                .any(|hay| hay.to_lowercase().contains(&part))
        })
}

/// Filter records by a free-text search over the fields shown in the list:
/// CVE id, CWE ids, author, package, tag, and the raw project slug.
pub fn search_records<'a>(records: &'a [CveRecord], search_text: &str) -> Vec<&'a CveRecord> {
    records
        .iter()
        .filter(|r| {
            let mut haystacks: Vec<&str> = vec![
                &r.cve_id,
                &r.author,
                &r.package,
                &r.tag,
                &r.project_slug,
            ];
            haystacks.extend(r.cwe_ids.iter().map(|c| c.as_str()));
            matches_search(search_text, &haystacks)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectRow;

    fn record(cve: &str, slug: &str, cwes: &str, tag: &str) -> CveRecord {
        CveRecord::from(ProjectRow {
            id: "1".to_string(),
            cve_id: cve.to_string(),
            project_slug: slug.to_string(),
            cwe_id: cwes.to_string(),
            github_tag: tag.to_string(),
            fix_commit_ids: "abc".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_single_term_matches_any_field() {
        assert!(matches_search("spark", &["CVE-2016-9177", "perwendel", "spark"]));
        assert!(!matches_search("jetty", &["CVE-2016-9177", "perwendel", "spark"]));
    }

    #[test]
    fn test_all_terms_must_match_somewhere() {
        let haystacks = ["CVE-2016-9177", "perwendel", "spark"];
        assert!(matches_search("spark 2016", &haystacks));
        assert!(!matches_search("spark jetty", &haystacks));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(matches_search("SPARK", &["spark"]));
        assert!(matches_search("cve", &["CVE-2016-9177"]));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        assert!(matches_search("", &["anything"]));
        assert!(matches_search("   ", &[]));
    }

    #[test]
    fn test_search_records_spans_fields() {
        let records = vec![
            record("CVE-2016-9177", "perwendel__spark_CVE-2016-9177", "CWE-22", "2.5.1"),
            record("CVE-2017-1000", "apache__struts_CVE-2017-1000", "CWE-94", "2.3.1"),
        ];

        let by_author = search_records(&records, "perwendel");
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].cve_id, "CVE-2016-9177");

        let by_cwe_and_tag = search_records(&records, "cwe-94 2.3");
        assert_eq!(by_cwe_and_tag.len(), 1);
        assert_eq!(by_cwe_and_tag[0].cve_id, "CVE-2017-1000");

        assert_eq!(search_records(&records, "cve").len(), 2);
    }
}
