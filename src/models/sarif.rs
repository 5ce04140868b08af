use serde::Deserialize;

/// Minimal SARIF 2.1 model: just the slice of the format the analysis
/// queries emit and the viewer consumes (results with code flows).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SarifLog {
    #[serde(default)]
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SarifRun {
    #[serde(default)]
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub message: Option<SarifMessage>,
    #[serde(default)]
    pub code_flows: Vec<CodeFlow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFlow {
    #[serde(default)]
    pub thread_flows: Vec<ThreadFlow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadFlow {
    #[serde(default)]
    pub locations: Vec<FlowStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlowStep {
    #[serde(default)]
    pub location: Option<SarifLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    #[serde(default)]
    pub message: Option<SarifMessage>,
    #[serde(default)]
    pub physical_location: Option<PhysicalLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    #[serde(default)]
    pub artifact_location: Option<ArtifactLocation>,
    #[serde(default)]
    pub region: Option<Region>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactLocation {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default)]
    pub start_line: Option<u32>,
    #[serde(default)]
    pub end_line: Option<u32>,
}

impl SarifResult {
    /// The first code flow's first thread flow, which is the path the
    /// analysis queries populate.
    pub fn primary_flow(&self) -> Option<&ThreadFlow> {
        self.code_flows.first()?.thread_flows.first()
    }
}

impl FlowStep {
    pub fn uri(&self) -> Option<&str> {
        self.location
            .as_ref()?
            .physical_location
            .as_ref()?
            .artifact_location
            .as_ref()?
            .uri
            .as_deref()
    }

    pub fn start_line(&self) -> Option<u32> {
        self.location
            .as_ref()?
            .physical_location
            .as_ref()?
            .region
            .as_ref()?
            .start_line
    }

    pub fn message_text(&self) -> Option<&str> {
        self.location.as_ref()?.message.as_ref()?.text.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SarifMessage {
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "2.1.0",
        "runs": [{
            "tool": {"driver": {"name": "codeql"}},
            "results": [{
                "ruleId": "java/path-injection",
                "message": {"text": "tainted path"},
                "codeFlows": [{
                    "threadFlows": [{
                        "locations": [{
                            "location": {
                                "message": {"text": "getPath(...) : String"},
                                "physicalLocation": {
                                    "artifactLocation": {"uri": "src/main/java/A.java"},
                                    "region": {"startLine": 51, "endLine": 55}
                                }
                            }
                        }]
                    }]
                }]
            }]
        }]
    }"#;

    #[test]
    fn test_parses_code_flow_slice() {
        let log: SarifLog = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(log.runs.len(), 1);
        let result = &log.runs[0].results[0];
        assert_eq!(result.rule_id.as_deref(), Some("java/path-injection"));

        let flow = result.primary_flow().unwrap();
        let step = &flow.locations[0];
        assert_eq!(step.uri(), Some("src/main/java/A.java"));
        assert_eq!(step.start_line(), Some(51));
        assert_eq!(step.message_text(), Some("getPath(...) : String"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let log: SarifLog = serde_json::from_str(r#"{"version": "2.1.0"}"#).unwrap();
        assert!(log.runs.is_empty());

        let result: SarifResult = serde_json::from_str("{}").unwrap();
        assert!(result.primary_flow().is_none());
    }

    #[test]
    fn test_step_without_physical_location() {
        let step: FlowStep =
            serde_json::from_str(r#"{"location": {"message": {"text": "sink"}}}"#).unwrap();
        assert_eq!(step.uri(), None);
        assert_eq!(step.start_line(), None);
        assert_eq!(step.message_text(), Some("sink"));
    }
}
