use serde::{Deserialize, Serialize};

/// A project as it travels over the worklog HTTP API.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_lead: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_contact: Option<String>,
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default)]
    pub project_work: Vec<String>,
    #[serde(default)]
    pub types_of_work: Vec<String>,
    /// Concurrency token. When sent on an update, the server rejects the
    /// write if the stored project has moved on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// The `{ "project": ... }` wrapper used by both project reads and updates.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectEnvelope<T> {
    pub project: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_project() {
        let json = r#"{ "_id": "p1", "title": "Roads" }"#;
        let doc: ProjectDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.id, "p1");
        assert!(doc.contributors.is_empty());
        assert!(doc.project_work.is_empty());
        assert_eq!(doc.version, None);
    }

    #[test]
    fn serializes_camel_case_and_skips_missing_version() {
        let doc = ProjectDocument {
            id: "p1".to_string(),
            title: "Roads".to_string(),
            project_work: vec!["w1".to_string()],
            ..Default::default()
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_id"], "p1");
        assert_eq!(value["projectWork"][0], "w1");
        assert!(value.get("version").is_none());
        assert!(value.get("projectLead").is_none());
    }
}
