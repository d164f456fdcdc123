//! INI reader errors.

use std::path::PathBuf;

/// Errors produced while reading or parsing INI text
#[derive(Debug, thiserror::Error)]
pub enum IniError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {inner}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        inner: Box<IniError>,
    },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: section [{section}] collides with a plain value")]
    SectionConflict { line: usize, section: String },
}

impl IniError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        IniError::Syntax {
            line,
            message: message.into(),
        }
    }
}
