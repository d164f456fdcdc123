//! School Config Compiler - assessment config compilation
//!
//! Merges per-school and per-module INI fragments into one flat config per
//! (assessment, school) pair, and derives the client identifiers ("WETL
//! names") those configs point at.

pub mod compiled;
pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod options;
pub mod wetl;

pub use compiled::{keep_all, AssessmentConfigs};
pub use error::CompileError;
pub use layout::{AssessmentDirs, ListingSide, PairingPolicy, UnpairedFile};
pub use loader::{ConfigPair, PairSources, SourceFile};
pub use options::{tracing_sink, CompileOptions, CompletionCallback, LogSink};
pub use wetl::{WetlPathTable, NO_WETL, TRUNCATION_WARNING, WETL_NAME_LIMIT};
