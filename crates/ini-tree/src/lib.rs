//! INI reader producing nested JSON value trees.
//!
//! Section headers nest on dots, so `[defaults.fileList.0]` lands at
//! `defaults -> fileList -> "0"`. Numbered tables can then be folded into
//! arrays with [`number_keys_to_array`].

mod error;
mod numbered;
mod parser;

pub use error::IniError;
pub use numbered::number_keys_to_array;
pub use parser::parse_str;

use std::path::Path;

use serde_json::Value;

/// Read and parse an INI file.
pub fn load(path: &Path) -> Result<Value, IniError> {
    load_with_text(path).map(|(_, value)| value)
}

/// Read and parse an INI file, keeping the raw text alongside the tree.
pub fn load_with_text(path: &Path) -> Result<(String, Value), IniError> {
    let text = std::fs::read_to_string(path).map_err(|source| IniError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = parse_str(&text).map_err(|inner| IniError::InFile {
        path: path.to_path_buf(),
        inner: Box::new(inner),
    })?;
    Ok((text, value))
}
