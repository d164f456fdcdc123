//! Error types for config compilation.

use std::path::PathBuf;

/// Errors that stop a compile run
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A required config directory is absent. The message text is the one
    /// handed to the log sink and the completion callback.
    #[error("ERROR: {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Ini(#[from] ini_tree::IniError),

    #[error("Assessment '{assessment}': school list file has no schoolList section")]
    MissingSchoolList { assessment: String },

    #[error("Assessment '{assessment}': '{field}' must be {expected}")]
    InvalidShape {
        assessment: String,
        field: String,
        expected: &'static str,
    },

    #[error("Invalid WETL path table: {0}")]
    WetlTable(String),
}

impl CompileError {
    pub(crate) fn shape(assessment: &str, field: impl Into<String>, expected: &'static str) -> Self {
        CompileError::InvalidShape {
            assessment: assessment.to_string(),
            field: field.into(),
            expected,
        }
    }
}
