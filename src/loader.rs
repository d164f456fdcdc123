//! Config pair loading
//!
//! Reads `<assessment>.ini` from both config directories, folds numbered
//! tables into arrays and records where each fragment came from.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::CompileError;
use crate::layout::AssessmentDirs;

/// A fragment file that contributed to the compiled set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    /// SHA-256 of the raw file bytes, hex encoded
    pub digest: String,
}

/// Both source files of one assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSources {
    pub assessment_name: String,
    pub school_list: SourceFile,
    pub module_config: SourceFile,
}

/// The school list and module config for one assessment
#[derive(Debug, Clone)]
pub struct ConfigPair {
    pub school_config: Value,
    pub module_config: Value,
    pub assessment_name: String,
    pub sources: PairSources,
}

/// Strip a trailing `.ini` to get the assessment name.
pub fn assessment_name(file_name: &str) -> &str {
    file_name.strip_suffix(".ini").unwrap_or(file_name)
}

/// Load `file_name` from both directories. Read and parse failures are
/// returned as-is; there is no per-file isolation.
pub fn load_pair(dirs: &AssessmentDirs, file_name: &str) -> Result<ConfigPair, CompileError> {
    let (school_config, school_list) = load_fragment(&dirs.school_lists.join(file_name))?;
    let (module_config, module_config_source) = load_fragment(&dirs.module_configs.join(file_name))?;
    let assessment_name = assessment_name(file_name).to_string();

    Ok(ConfigPair {
        school_config,
        module_config,
        sources: PairSources {
            assessment_name: assessment_name.clone(),
            school_list,
            module_config: module_config_source,
        },
        assessment_name,
    })
}

fn load_fragment(path: &Path) -> Result<(Value, SourceFile), CompileError> {
    let (text, value) = ini_tree::load_with_text(path)?;

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hex::encode(hasher.finalize());

    Ok((
        ini_tree::number_keys_to_array(value),
        SourceFile {
            path: path.to_string_lossy().to_string(),
            digest,
        },
    ))
}
