//! Per-school compilation

use serde_json::{Map, Value};

use super::merge::{fill_missing, overlay_layers};
use crate::error::CompileError;
use crate::loader::ConfigPair;

/// Key injected into every compiled config
pub const ASSESSMENT_NAME_KEY: &str = "assessmentName";

/// Compile every school in a pair's `schoolList`, in index order.
pub fn expand_district(pair: &ConfigPair) -> Result<Vec<Value>, CompileError> {
    let assessment = pair.assessment_name.as_str();
    let school_list = pair
        .school_config
        .get("schoolList")
        .ok_or_else(|| CompileError::MissingSchoolList {
            assessment: assessment.to_string(),
        })?;

    let schools = match ini_tree::number_keys_to_array(school_list.clone()) {
        Value::Array(items) => items,
        Value::Object(map) if map.is_empty() => Vec::new(),
        _ => return Err(CompileError::shape(assessment, "schoolList", "a numbered list")),
    };

    schools
        .iter()
        .map(|school| compile_school(school, &pair.module_config, assessment))
        .collect()
}

/// Merge one school entry with its module config.
///
/// Precedence, lowest first: module defaults (with `fileList` entries filled
/// from `fileElements`), the school entry, module overrides, `assessmentName`.
/// Absent sections count as empty.
pub fn compile_school(
    school: &Value,
    module_config: &Value,
    assessment_name: &str,
) -> Result<Value, CompileError> {
    let mut defaults = mapping_or_empty(module_config.get("defaults"), assessment_name, "defaults")?;
    let overrides = mapping_or_empty(module_config.get("overrides"), assessment_name, "overrides")?;

    let file_elements = mapping_or_empty(
        defaults.get("fileElements"),
        assessment_name,
        "defaults.fileElements",
    )?;
    let file_list = match defaults.get("fileList") {
        None => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            return Err(CompileError::shape(assessment_name, "defaults.fileList", "a list"));
        }
    };

    let file_list = file_list
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            Value::Object(entry) => Ok(Value::Object(fill_missing(entry, &file_elements))),
            _ => Err(CompileError::shape(
                assessment_name,
                format!("defaults.fileList[{}]", i),
                "a mapping",
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;
    defaults.insert("fileList".to_string(), Value::Array(file_list));

    let school = match school {
        Value::Object(map) => map.clone(),
        _ => return Err(CompileError::shape(assessment_name, "schoolList entry", "a mapping")),
    };

    let mut name = Map::new();
    name.insert(
        ASSESSMENT_NAME_KEY.to_string(),
        Value::String(assessment_name.to_string()),
    );

    Ok(Value::Object(overlay_layers(vec![defaults, school, overrides, name])))
}

fn mapping_or_empty(
    value: Option<&Value>,
    assessment_name: &str,
    field: &str,
) -> Result<Map<String, Value>, CompileError> {
    match value {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(CompileError::shape(assessment_name, field, "a mapping")),
    }
}
