//! Raw issue records as returned by a search.

use crate::config::FieldMap;
use crate::tracker::TrackerError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Person an issue is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    /// Login name.
    #[serde(default)]
    pub name: Option<String>,
    /// Human readable name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Email address, when visible to the token's user.
    #[serde(default)]
    pub email_address: Option<String>,
}

/// One search result with the fields the report needs.
///
/// Hierarchy links are keys of other issues; they are resolved into
/// [`Issue`](crate::issues::Issue)s by the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawIssue {
    pub key: String,
    pub summary: String,
    pub rank: Option<String>,
    /// Name of the status category, e.g. "In Progress".
    pub status_category: Option<String>,
    pub assignee: Option<Assignee>,
    pub epic_link: Option<String>,
    pub feature_link: Option<String>,
    pub resolution_date: Option<String>,
}

impl RawIssue {
    /// Creates a record with only a key and summary set.
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status_category: impl Into<String>) -> Self {
        self.status_category = Some(status_category.into());
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    #[must_use]
    pub fn with_epic(mut self, epic_key: impl Into<String>) -> Self {
        self.epic_link = Some(epic_key.into());
        self
    }

    #[must_use]
    pub fn with_feature(mut self, feature_key: impl Into<String>) -> Self {
        self.feature_link = Some(feature_key.into());
        self
    }

    /// Extracts a record from a Jira REST issue object.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Decode`] if the object has no key or fields.
    pub fn from_jira(value: &Value, fields: &FieldMap) -> Result<Self, TrackerError> {
        let key = value
            .get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| TrackerError::Decode {
                message: "issue without a key".to_string(),
            })?;
        let map = value
            .get("fields")
            .and_then(Value::as_object)
            .ok_or_else(|| TrackerError::Decode {
                message: format!("issue {key} has no fields"),
            })?;

        let assignee = match map.get("assignee") {
            Some(Value::Null) | None => None,
            Some(raw) => Some(serde_json::from_value(raw.clone()).map_err(|e| {
                TrackerError::Decode {
                    message: format!("issue {key} has an unreadable assignee: {e}"),
                }
            })?),
        };

        Ok(Self {
            key: key.to_string(),
            summary: string_field(map, "summary").unwrap_or_default(),
            rank: string_field(map, &fields.rank),
            status_category: map
                .get("status")
                .and_then(|status| status.pointer("/statusCategory/name"))
                .and_then(Value::as_str)
                .map(str::to_string),
            assignee,
            epic_link: link_field(map, &fields.epic_link),
            feature_link: link_field(map, &fields.feature_link),
            resolution_date: string_field(map, "resolutiondate"),
        })
    }
}

fn string_field(map: &Map<String, Value>, name: &str) -> Option<String> {
    map.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reads an issue link that is either a bare key or an object with a `key`.
fn link_field(map: &Map<String, Value>, name: &str) -> Option<String> {
    match map.get(name)? {
        Value::String(key) if !key.is_empty() => Some(key.clone()),
        Value::Object(obj) => obj.get("key").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_jira_reads_all_fields() {
        let value = json!({
            "key": "PROJ-7",
            "fields": {
                "summary": "Fix the thing",
                "status": { "name": "Review", "statusCategory": { "name": "In Progress" } },
                "assignee": { "name": "jdoe", "displayName": "J. Doe", "emailAddress": "j@example.com" },
                "resolutiondate": null,
                "customfield_12311940": "0|i00abc:",
                "customfield_12311140": "PROJ-1",
                "customfield_12313140": null
            }
        });

        let raw = RawIssue::from_jira(&value, &FieldMap::default()).unwrap();

        assert_eq!(raw.key, "PROJ-7");
        assert_eq!(raw.summary, "Fix the thing");
        assert_eq!(raw.rank.as_deref(), Some("0|i00abc:"));
        assert_eq!(raw.status_category.as_deref(), Some("In Progress"));
        assert_eq!(
            raw.assignee.and_then(|a| a.display_name).as_deref(),
            Some("J. Doe")
        );
        assert_eq!(raw.epic_link.as_deref(), Some("PROJ-1"));
        assert_eq!(raw.feature_link, None);
        assert_eq!(raw.resolution_date, None);
    }

    #[test]
    fn from_jira_accepts_link_objects() {
        let value = json!({
            "key": "PROJ-8",
            "fields": {
                "summary": "Child",
                "customfield_12313140": { "key": "FEAT-2", "id": "1000" }
            }
        });

        let raw = RawIssue::from_jira(&value, &FieldMap::default()).unwrap();
        assert_eq!(raw.feature_link.as_deref(), Some("FEAT-2"));
        assert_eq!(raw.assignee, None);
    }

    #[test]
    fn from_jira_rejects_missing_key() {
        let value = json!({ "fields": {} });
        let result = RawIssue::from_jira(&value, &FieldMap::default());
        assert!(matches!(result, Err(TrackerError::Decode { .. })));
    }

    #[test]
    fn from_jira_uses_configured_fields() {
        let fields = FieldMap {
            rank: "customfield_1".to_string(),
            epic_link: "customfield_2".to_string(),
            feature_link: "customfield_3".to_string(),
        };
        let value = json!({
            "key": "X-1",
            "fields": { "customfield_1": "r", "customfield_2": "X-0" }
        });

        let raw = RawIssue::from_jira(&value, &fields).unwrap();
        assert_eq!(raw.rank.as_deref(), Some("r"));
        assert_eq!(raw.epic_link.as_deref(), Some("X-0"));
    }
}
