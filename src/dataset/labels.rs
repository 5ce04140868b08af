use crate::models::{enclosing_item, FixIndex, FlowStep, ItemLocation, ThreadFlow};

/// Ground-truth match level of one code-flow step. `file_match` is the
/// weaker "silver" signal, `method_match` the exact "gold" one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepLabels {
    pub file_match: bool,
    pub method_match: bool,
}

/// The step touches a file that some fixing commit modified.
pub fn file_level_match(fix: &FixIndex, step: &FlowStep) -> bool {
    step.uri().map_or(false, |uri| fix.has_file(uri))
}

/// The step falls inside a fixed method: the enclosing function and class
/// at the step's line must both resolve, and the resulting
/// `file:class:method` key must appear in the fix index.
pub fn method_level_match(
    fix: &FixIndex,
    step: &FlowStep,
    classes: &[ItemLocation],
    funcs: &[ItemLocation],
) -> bool {
    let Some(uri) = step.uri() else {
        return false;
    };
    let Some(line) = step.start_line() else {
        return false;
    };
    let Some(func) = enclosing_item(uri, line, funcs) else {
        return false;
    };
    let Some(class) = enclosing_item(uri, line, classes) else {
        return false;
    };
    fix.has_method(&format!("{}:{}:{}", uri, class, func))
}

/// Label every step of a thread flow.
pub fn flow_labels(
    fix: &FixIndex,
    flow: &ThreadFlow,
    classes: &[ItemLocation],
    funcs: &[ItemLocation],
) -> Vec<StepLabels> {
    flow.locations
        .iter()
        .map(|step| StepLabels {
            file_match: file_level_match(fix, step),
            method_match: method_level_match(fix, step, classes, funcs),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixRow, ThreadFlow};

    const FILE: &str = "src/main/java/spark/resource/ClassPathResource.java";

    fn fix_index() -> FixIndex {
        FixIndex::from_rows(
            "CVE-1",
            &[FixRow {
                cve_id: "CVE-1".to_string(),
                commit: "abc123".to_string(),
                file: FILE.to_string(),
                class: "ClassPathResource".to_string(),
                method: "getInputStream".to_string(),
            }],
        )
    }

    fn item(name: &str, start: u32, end: u32) -> ItemLocation {
        ItemLocation {
            name: name.to_string(),
            file: FILE.to_string(),
            start_line: start,
            end_line: end,
        }
    }

    fn step(uri: &str, line: u32) -> FlowStep {
        serde_json::from_str(&format!(
            r#"{{"location": {{"physicalLocation": {{
                "artifactLocation": {{"uri": "{}"}},
                "region": {{"startLine": {}}}
            }}}}}}"#,
            uri, line
        ))
        .unwrap()
    }

    #[test]
    fn test_file_level_match() {
        let fix = fix_index();
        assert!(file_level_match(&fix, &step(FILE, 10)));
        assert!(!file_level_match(&fix, &step("src/main/java/Other.java", 10)));
    }

    #[test]
    fn test_method_level_match_requires_both_extents() {
        let fix = fix_index();
        let classes = vec![item("ClassPathResource", 1, 100)];
        let funcs = vec![item("getInputStream", 40, 60)];

        assert!(method_level_match(&fix, &step(FILE, 50), &classes, &funcs));
        // Outside the function extent: no enclosing function, no match
        assert!(!method_level_match(&fix, &step(FILE, 10), &classes, &funcs));
        // Without class extents nothing can resolve
        assert!(!method_level_match(&fix, &step(FILE, 50), &[], &funcs));
    }

    #[test]
    fn test_method_level_match_rejects_wrong_method() {
        let fix = fix_index();
        let classes = vec![item("ClassPathResource", 1, 100)];
        let funcs = vec![item("somethingElse", 40, 60)];
        assert!(!method_level_match(&fix, &step(FILE, 50), &classes, &funcs));
    }

    #[test]
    fn test_flow_labels_per_step() {
        let fix = fix_index();
        let classes = vec![item("ClassPathResource", 1, 100)];
        let funcs = vec![item("getInputStream", 40, 60)];

        let flow: ThreadFlow = serde_json::from_str(&format!(
            r#"{{"locations": [
                {{"location": {{"physicalLocation": {{
                    "artifactLocation": {{"uri": "{}"}},
                    "region": {{"startLine": 50}}}}}}}},
                {{"location": {{"physicalLocation": {{
                    "artifactLocation": {{"uri": "src/main/java/Other.java"}},
                    "region": {{"startLine": 5}}}}}}}}
            ]}}"#,
            FILE
        ))
        .unwrap();

        let labels = flow_labels(&fix, &flow, &classes, &funcs);
        assert_eq!(labels.len(), 2);
        assert!(labels[0].file_match && labels[0].method_match);
        assert!(!labels[1].file_match && !labels[1].method_match);
    }

    #[test]
    fn test_empty_fix_index_never_matches() {
        let fix = FixIndex::default();
        assert!(!file_level_match(&fix, &step(FILE, 50)));
        assert!(!method_level_match(&fix, &step(FILE, 50), &[], &[]));
    }
}
