//! The compiled assessment config set and its accessors

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::expand_district;
use crate::error::CompileError;
use crate::layout::{AssessmentDirs, UnpairedFile};
use crate::loader::{load_pair, PairSources};
use crate::options::{CompileOptions, LogSink};
use crate::wetl::{WetlPathTable, NO_WETL, TRUNCATION_WARNING, WETL_NAME_LIMIT};

/// Filter that keeps every config
pub fn keep_all(_: &Value) -> bool {
    true
}

/// Flat list of compiled configs, one per (assessment, school), in
/// file order then school order. Immutable once built.
pub struct AssessmentConfigs {
    configs: Vec<Value>,
    sources: Vec<PairSources>,
    unpaired: Vec<UnpairedFile>,
    wetl_paths: WetlPathTable,
    log: LogSink,
    compiled_at: DateTime<Utc>,
}

impl AssessmentConfigs {
    /// Compile the tree named by `options`.
    ///
    /// A missing `schoolLists` or `moduleConfigs` directory is logged and
    /// passed to the completion callback (with no configs) before being
    /// returned. Any other failure is returned without invoking the callback.
    pub fn load(mut options: CompileOptions) -> Result<Self, CompileError> {
        let on_complete = options.on_complete.take();

        let dirs = match AssessmentDirs::locate(&options.assessment_configs_dir) {
            Ok(dirs) => dirs,
            Err(err) => {
                let message = err.to_string();
                (options.log)(&message);
                if let Some(callback) = on_complete {
                    callback(&message, None);
                }
                return Err(err);
            }
        };

        let pairing = options
            .pairing
            .select(dirs.school_list_files()?, dirs.module_config_files()?);
        for unpaired in &pairing.unpaired {
            (options.log)(&format!(
                "WARNING: {}/{} has no counterpart in {}; skipped",
                unpaired.found_in.dir_name(),
                unpaired.file_name,
                unpaired.found_in.opposite().dir_name()
            ));
        }

        let mut configs = Vec::new();
        let mut sources = Vec::new();
        for file_name in &pairing.files {
            let pair = load_pair(&dirs, file_name)?;
            let compiled = expand_district(&pair)?;
            debug!(
                assessment = %pair.assessment_name,
                schools = compiled.len(),
                "compiled assessment"
            );
            configs.extend(compiled);
            sources.push(pair.sources);
        }

        info!(count = configs.len(), "compiled assessment configs");

        let compiled = Self {
            configs,
            sources,
            unpaired: pairing.unpaired,
            wetl_paths: options.wetl_paths.unwrap_or_else(WetlPathTable::builtin),
            log: options.log,
            compiled_at: Utc::now(),
        };

        if let Some(callback) = on_complete {
            callback("", Some(&compiled));
        }

        Ok(compiled)
    }

    /// Configs accepted by `filter`, in compiled order.
    pub fn get_config<F>(&self, filter: F) -> Vec<Value>
    where
        F: Fn(&Value) -> bool,
    {
        self.configs.iter().filter(|c| filter(c)).cloned().collect()
    }

    /// Every compiled config
    pub fn all(&self) -> &[Value] {
        &self.configs
    }

    /// Distinct WETL names of the configs accepted by `filter`, first seen
    /// first, at most [`WETL_NAME_LIMIT`] of them. Logs
    /// [`TRUNCATION_WARNING`] on every call.
    pub fn unique_wetl_names<F>(&self, filter: F) -> Vec<String>
    where
        F: Fn(&Value) -> bool,
    {
        let mut names: Vec<String> = Vec::new();
        for config in self.configs.iter().filter(|c| filter(c)) {
            let name = self.wetl_paths.resolve(config);
            if name != NO_WETL && !names.contains(&name) {
                names.push(name);
            }
        }
        names.truncate(WETL_NAME_LIMIT);

        (self.log)(TRUNCATION_WARNING);
        names
    }

    /// Provenance of every assessment that was compiled
    pub fn sources(&self) -> &[PairSources] {
        &self.sources
    }

    /// Files skipped for lack of a counterpart (intersection pairing only)
    pub fn unpaired(&self) -> &[UnpairedFile] {
        &self.unpaired
    }

    pub fn wetl_paths(&self) -> &WetlPathTable {
        &self.wetl_paths
    }

    pub fn compiled_at(&self) -> DateTime<Utc> {
        self.compiled_at
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl std::fmt::Debug for AssessmentConfigs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentConfigs")
            .field("configs", &self.configs.len())
            .field("sources", &self.sources)
            .field("unpaired", &self.unpaired)
            .field("compiled_at", &self.compiled_at)
            .finish_non_exhaustive()
    }
}
