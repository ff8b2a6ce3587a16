use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::display::Placeholder;

/// One build's `api/json` document.
///
/// Fields not listed here are ignored when decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    /// Server-assigned build id, usually the build number as text.
    pub id: Option<String>,

    /// Final status such as `SUCCESS`; absent while the build is running.
    pub result: Option<String>,

    /// Artifacts in server order.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,

    #[serde(default)]
    pub change_sets: Vec<ChangeSet>,

    #[serde(default)]
    pub in_progress: bool,

    pub next_build: Option<BuildInfo>,

    pub previous_build: Option<BuildInfo>,
}

impl BuildMetadata {
    pub fn display_id(&self) -> Placeholder<'_, str> {
        Placeholder::new(self.id.as_deref(), "<unknown>")
    }

    pub fn display_result(&self) -> Placeholder<'_, str> {
        Placeholder::new(self.result.as_deref(), "<nil>")
    }

    /// The build number, when the id is numeric.
    pub fn number(&self) -> Option<u64> {
        self.id.as_deref()?.parse().ok()
    }

    /// Every change-set item, across all change sets, in server order.
    pub fn changes(&self) -> impl Iterator<Item = &ChangeSetItem> {
        self.change_sets.iter().flat_map(|set| set.items.iter())
    }
}

/// A file produced by a build.
///
/// All three paths are required; a response missing any of them is rejected
/// as malformed rather than defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Relative path shown to users and matched by artifact filters.
    pub display_path: String,

    /// Base name used for the local destination.
    #[serde(rename = "fileName")]
    pub filename: String,

    /// Path segment appended to the build's `artifact/` URL.
    pub relative_path: String,
}

/// Link to a neighbouring build in the server's history chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub number: Option<serde_json::Number>,
    pub url: Option<String>,
}

impl BuildInfo {
    /// The build token this link points at, if the number is a usable build number.
    pub fn token(&self) -> Option<String> {
        let number = self.number.as_ref()?;
        number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
                    .map(|n| n as u64)
            })
            .map(|n| n.to_string())
    }

    pub fn display_number(&self) -> Placeholder<'_, serde_json::Number> {
        Placeholder::new(self.number.as_ref(), "<nil>")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    #[serde(rename = "_class")]
    pub kind: Option<String>,

    #[serde(default)]
    pub items: Vec<ChangeSetItem>,
}

/// A single commit recorded against a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSetItem {
    #[serde(rename = "_class")]
    pub kind: Option<String>,

    #[serde(default)]
    pub affected_paths: Vec<String>,

    pub commit_id: Option<String>,

    #[serde(default, with = "super::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,

    pub author: Option<ChangeSetAuthor>,

    pub author_email: Option<String>,

    pub comment: Option<String>,

    pub date: Option<String>,

    pub id: Option<String>,

    pub msg: Option<String>,

    #[serde(default)]
    pub paths: Vec<ChangeSetPath>,
}

impl ChangeSetItem {
    pub fn display_commit(&self) -> Placeholder<'_, str> {
        Placeholder::new(self.commit_id.as_deref(), "<unknown>")
    }

    pub fn display_author(&self) -> Placeholder<'_, str> {
        Placeholder::new(
            self.author.as_ref().and_then(|a| a.full_name.as_deref()),
            "<unknown>",
        )
    }

    pub fn display_msg(&self) -> Placeholder<'_, str> {
        Placeholder::new(self.msg.as_deref(), "<nil>")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSetAuthor {
    pub absolute_url: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSetPath {
    pub edit_type: Option<String>,
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(number: serde_json::Value) -> BuildInfo {
        BuildInfo {
            number: serde_json::from_value(number).unwrap(),
            url: None,
        }
    }

    #[test]
    fn test_build_info_token_from_integer() {
        assert_eq!(info(serde_json::json!(41)).token().as_deref(), Some("41"));
    }

    #[test]
    fn test_build_info_token_from_integral_float() {
        assert_eq!(info(serde_json::json!(41.0)).token().as_deref(), Some("41"));
    }

    #[test]
    fn test_build_info_token_rejects_unusable_numbers() {
        assert_eq!(info(serde_json::json!(-3)).token(), None);
        assert_eq!(info(serde_json::json!(2.5)).token(), None);
        assert_eq!(BuildInfo::default().token(), None);
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let metadata = BuildMetadata::default();
        assert_eq!(metadata.display_id().to_string(), "<unknown>");
        assert_eq!(metadata.display_result().to_string(), "<nil>");
        assert_eq!(BuildInfo::default().display_number().to_string(), "<nil>");
    }

    #[test]
    fn test_number_parses_numeric_id() {
        let metadata = BuildMetadata {
            id: Some("128".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.number(), Some(128));

        let metadata = BuildMetadata {
            id: Some("2024-01-01_10-00-00".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.number(), None);
    }

    #[test]
    fn test_changes_flatten_change_sets() {
        let item = |id: &str| ChangeSetItem {
            commit_id: Some(id.to_string()),
            ..Default::default()
        };
        let metadata = BuildMetadata {
            change_sets: vec![
                ChangeSet {
                    kind: None,
                    items: vec![item("a"), item("b")],
                },
                ChangeSet {
                    kind: None,
                    items: vec![item("c")],
                },
            ],
            ..Default::default()
        };

        let ids: Vec<_> = metadata
            .changes()
            .map(|c| c.display_commit().to_string())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
