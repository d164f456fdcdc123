//! WETL name resolution
//!
//! Each assessment keeps its client identifier at a different dotted path
//! inside the compiled config. The path table maps assessment names to those
//! paths.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CompileError;

/// Sentinel for "no WETL name"; never appears in a name list.
pub const NO_WETL: &str = "NOWETL";

/// Maximum length of a WETL name list.
pub const WETL_NAME_LIMIT: usize = 4;

/// Logged on every WETL name list request. The count in the text does not
/// match [`WETL_NAME_LIMIT`]; both are kept as deployed.
pub const TRUNCATION_WARNING: &str = "WARNING: truncating WETL name list to three items for testing";

const CHANGED_FILE_CLIENT_ID: &str = "changedFileProcess.wetl.clientId";

/// Assessment name -> dotted path of its WETL name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WetlPathTable {
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
}

impl WetlPathTable {
    /// The table used when the caller does not supply one
    pub fn builtin() -> Self {
        let paths = [
            ("fast-v1", CHANGED_FILE_CLIENT_ID),
            ("map-v1", CHANGED_FILE_CLIENT_ID),
            ("mca-v1", CHANGED_FILE_CLIENT_ID),
            (
                "plp-to-plans-v1",
                "db-retriever.credentialSource.parameters.clientId",
            ),
            (
                "plp-to-viewpoint-v1",
                "changedFileProcessParameters.credentialSource.parameters.clientId",
            ),
            ("star-v1", CHANGED_FILE_CLIENT_ID),
        ]
        .into_iter()
        .map(|(name, path)| (name.to_string(), path.to_string()))
        .collect();

        Self { paths }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CompileError> {
        toml::from_str(content).map_err(|e| CompileError::WetlTable(e.to_string()))
    }

    /// Load a table from a TOML file with a `[paths]` table.
    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CompileError::WetlTable(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn insert(&mut self, assessment_name: impl Into<String>, path: impl Into<String>) {
        self.paths.insert(assessment_name.into(), path.into());
    }

    pub fn path_for(&self, assessment_name: &str) -> Option<&str> {
        self.paths.get(assessment_name).map(String::as_str)
    }

    /// WETL name of one compiled config, or [`NO_WETL`] when the assessment
    /// has no path or the path does not lead to a scalar.
    pub fn resolve(&self, config: &Value) -> String {
        config
            .get(crate::config::ASSESSMENT_NAME_KEY)
            .and_then(Value::as_str)
            .and_then(|name| self.path_for(name))
            .and_then(|path| lookup_path(config, path))
            .and_then(scalar_text)
            .unwrap_or_else(|| NO_WETL.to_string())
    }
}

/// Walk a dotted path. Objects are indexed by key, arrays by position.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_table() {
        let table = WetlPathTable::builtin();
        assert_eq!(table.paths.len(), 6);
        assert_eq!(table.path_for("star-v1"), Some("changedFileProcess.wetl.clientId"));
        assert_eq!(
            table.path_for("plp-to-plans-v1"),
            Some("db-retriever.credentialSource.parameters.clientId")
        );
        assert_eq!(
            table.path_for("plp-to-viewpoint-v1"),
            Some("changedFileProcessParameters.credentialSource.parameters.clientId")
        );
        assert_eq!(table.path_for("unknown-v9"), None);
    }

    #[test]
    fn test_lookup_path_objects_and_arrays() {
        let value = json!({"a": {"b": [{"c": "deep"}]}});
        assert_eq!(lookup_path(&value, "a.b.0.c"), Some(&json!("deep")));
        assert_eq!(lookup_path(&value, "a.b.1.c"), None);
        assert_eq!(lookup_path(&value, "a.x"), None);
        assert_eq!(lookup_path(&value, "a.b.c"), None);
    }

    #[test]
    fn test_lookup_path_through_scalar() {
        let value = json!({"a": "text"});
        assert_eq!(lookup_path(&value, "a.b"), None);
    }

    #[test]
    fn test_resolve_known_assessment() {
        let config = json!({
            "assessmentName": "fast-v1",
            "changedFileProcess": {"wetl": {"clientId": "district-42"}}
        });
        assert_eq!(WetlPathTable::builtin().resolve(&config), "district-42");
    }

    #[test]
    fn test_resolve_unknown_assessment_is_sentinel() {
        let config = json!({
            "assessmentName": "brand-new-v1",
            "changedFileProcess": {"wetl": {"clientId": "district-42"}}
        });
        assert_eq!(WetlPathTable::builtin().resolve(&config), NO_WETL);
    }

    #[test]
    fn test_resolve_missing_path_is_sentinel() {
        let config = json!({"assessmentName": "fast-v1", "changedFileProcess": {}});
        assert_eq!(WetlPathTable::builtin().resolve(&config), NO_WETL);
    }

    #[test]
    fn test_resolve_non_scalar_is_sentinel() {
        let config = json!({
            "assessmentName": "fast-v1",
            "changedFileProcess": {"wetl": {"clientId": {"nested": true}}}
        });
        assert_eq!(WetlPathTable::builtin().resolve(&config), NO_WETL);
    }

    #[test]
    fn test_custom_table_from_toml() {
        let table = WetlPathTable::from_toml_str(
            r#"
[paths]
"custom-v1" = "client.id"
"#,
        )
        .unwrap();
        let config = json!({"assessmentName": "custom-v1", "client": {"id": 7}});

        assert_eq!(table.resolve(&config), "7");
        assert_eq!(table.path_for("fast-v1"), None);
    }

    #[test]
    fn test_bad_toml_is_error() {
        let err = WetlPathTable::from_toml_str("[paths]\n\"a\" = 3\n").unwrap_err();
        assert!(matches!(err, CompileError::WetlTable(_)));
    }
}
