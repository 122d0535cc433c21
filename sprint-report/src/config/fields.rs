//! Jira custom field mapping.

use crate::config::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Ids of the Jira custom fields that carry hierarchy and ordering data.
///
/// These differ between Jira instances; the defaults match the instance at
/// `issues.redhat.com`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FieldMap {
    /// Field holding the lexical rank.
    pub rank: String,

    /// Field holding the key of the issue's epic ("Epic Link").
    pub epic_link: String,

    /// Field holding the key of the issue's feature ("Parent Link").
    pub feature_link: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            rank: "customfield_12311940".to_string(),
            epic_link: "customfield_12311140".to_string(),
            feature_link: "customfield_12313140".to_string(),
        }
    }
}

impl FieldMap {
    /// Fields requested from the search endpoint.
    #[must_use]
    pub fn search_fields(&self) -> Vec<&str> {
        vec![
            "summary",
            "status",
            "assignee",
            "resolutiondate",
            self.rank.as_str(),
            self.epic_link.as_str(),
            self.feature_link.as_str(),
        ]
    }
}

/// Layout of the config file: a single `[fields]` table.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    fields: FieldMap,
}

/// Loads the field map from a TOML config file if it exists.
///
/// ```toml
/// [fields]
/// rank = "customfield_10019"
/// epic-link = "customfield_10014"
/// feature-link = "customfield_10018"
/// ```
///
/// Keys left out of the table keep their default ids.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_field_map(path: &Path) -> Result<Option<FieldMap>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(parsed.fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_field_map_returns_none_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");
        assert!(load_field_map(&path).unwrap().is_none());
    }

    #[test]
    fn load_field_map_overrides_some_fields() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[fields]
epic-link = "customfield_10014"
"#,
        );
        let fields = load_field_map(&path).unwrap().unwrap();

        assert_eq!(fields.epic_link, "customfield_10014");
        assert_eq!(fields.rank, FieldMap::default().rank);
        assert_eq!(fields.feature_link, FieldMap::default().feature_link);
    }

    #[test]
    fn load_field_map_accepts_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "");
        assert_eq!(load_field_map(&path).unwrap(), Some(FieldMap::default()));
    }

    #[test]
    fn load_field_map_reports_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[fields\nrank = ");
        let error = load_field_map(&path).unwrap_err();
        assert!(matches!(error, ConfigError::TomlError { .. }));
    }

    #[test]
    fn search_fields_include_custom_fields() {
        let fields = FieldMap::default();
        let requested = fields.search_fields();
        assert!(requested.contains(&"summary"));
        assert!(requested.contains(&"customfield_12311140"));
        assert!(requested.contains(&"customfield_12313140"));
    }
}
