//! Compile options
//!
//! Everything a compile run needs beyond the directory tree itself: the WETL
//! path table, the pairing policy, where log lines go and who to tell when the
//! run finishes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::compiled::AssessmentConfigs;
use crate::layout::PairingPolicy;
use crate::wetl::WetlPathTable;

/// Destination for pipeline log lines.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Completion callback: `("", Some(configs))` on success,
/// `(message, None)` when a config directory is missing.
pub type CompletionCallback = Box<dyn FnOnce(&str, Option<&AssessmentConfigs>)>;

/// Default sink: forward every line to `tracing` at info level.
pub fn tracing_sink() -> LogSink {
    Arc::new(|message: &str| tracing::info!("{}", message))
}

/// Options for [`AssessmentConfigs::load`]
pub struct CompileOptions {
    pub(crate) assessment_configs_dir: PathBuf,
    pub(crate) wetl_paths: Option<WetlPathTable>,
    pub(crate) pairing: PairingPolicy,
    pub(crate) log: LogSink,
    pub(crate) on_complete: Option<CompletionCallback>,
}

impl CompileOptions {
    /// Options for the tree rooted at `assessment_configs_dir`, which must
    /// hold `schoolLists/` and `moduleConfigs/`.
    pub fn new(assessment_configs_dir: impl Into<PathBuf>) -> Self {
        Self {
            assessment_configs_dir: assessment_configs_dir.into(),
            wetl_paths: None,
            pairing: PairingPolicy::default(),
            log: tracing_sink(),
            on_complete: None,
        }
    }

    /// Use a caller-supplied WETL path table instead of the built-in one.
    pub fn wetl_paths(mut self, table: WetlPathTable) -> Self {
        self.wetl_paths = Some(table);
        self
    }

    pub fn pairing(mut self, pairing: PairingPolicy) -> Self {
        self.pairing = pairing;
        self
    }

    /// Route pipeline log lines to `sink`.
    pub fn log<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.log = Arc::new(sink);
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&str, Option<&AssessmentConfigs>) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn assessment_configs_dir(&self) -> &Path {
        &self.assessment_configs_dir
    }
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("assessment_configs_dir", &self.assessment_configs_dir)
            .field("wetl_paths", &self.wetl_paths)
            .field("pairing", &self.pairing)
            .field("on_complete", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}
