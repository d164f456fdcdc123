//! Test fixtures: on-disk assessment config trees.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary `<base>/{schoolLists,moduleConfigs}` tree
pub struct ConfigTree {
    dir: TempDir,
}

impl ConfigTree {
    /// Both subdirectories, no files
    pub fn new() -> Self {
        let tree = Self::bare();
        fs::create_dir(tree.school_lists()).expect("create schoolLists");
        fs::create_dir(tree.module_configs()).expect("create moduleConfigs");
        tree
    }

    /// Base directory only
    pub fn bare() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn school_lists(&self) -> PathBuf {
        self.dir.path().join("schoolLists")
    }

    pub fn module_configs(&self) -> PathBuf {
        self.dir.path().join("moduleConfigs")
    }

    pub fn school_list(&self, file_name: &str, content: &str) -> &Self {
        fs::write(self.school_lists().join(file_name), content).expect("write school list");
        self
    }

    pub fn module_config(&self, file_name: &str, content: &str) -> &Self {
        fs::write(self.module_configs().join(file_name), content).expect("write module config");
        self
    }

    /// Write both halves of an assessment
    pub fn assessment(&self, file_name: &str, school_list: &str, module_config: &str) -> &Self {
        self.school_list(file_name, school_list)
            .module_config(file_name, module_config)
    }
}

/// A school list with one school per `(index, clientId)` pair
pub fn schools_with_clients(entries: &[(usize, &str)]) -> String {
    entries
        .iter()
        .map(|(i, client)| {
            format!(
                "[schoolList.{i}]\nschoolName = school-{i}\n\n[schoolList.{i}.changedFileProcess.wetl]\nclientId = {client}\n\n"
            )
        })
        .collect()
}

pub const SIMPLE_MODULE: &str = "\
[defaults.fileElements]
a = 1

[defaults.fileList.0]
b = 2
";
