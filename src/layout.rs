//! Config directory layout
//!
//! An assessment config tree looks like:
//!
//! ```text
//! <base>/schoolLists/<assessment>.ini
//! <base>/moduleConfigs/<assessment>.ini
//! ```
//!
//! Files are paired across the two directories by file name.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::CompileError;

pub const SCHOOL_LISTS_DIR: &str = "schoolLists";
pub const MODULE_CONFIGS_DIR: &str = "moduleConfigs";

/// The two validated config directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentDirs {
    pub school_lists: PathBuf,
    pub module_configs: PathBuf,
}

impl AssessmentDirs {
    /// Check that both subdirectories exist. `schoolLists` is checked first.
    pub fn locate(base: &Path) -> Result<Self, CompileError> {
        let school_lists = base.join(SCHOOL_LISTS_DIR);
        let module_configs = base.join(MODULE_CONFIGS_DIR);

        for dir in [&school_lists, &module_configs] {
            if !dir.exists() {
                return Err(CompileError::MissingDirectory(dir.clone()));
            }
        }

        Ok(Self {
            school_lists,
            module_configs,
        })
    }

    pub fn school_list_files(&self) -> Result<Vec<String>, CompileError> {
        list_files(&self.school_lists)
    }

    pub fn module_config_files(&self) -> Result<Vec<String>, CompileError> {
        list_files(&self.module_configs)
    }
}

/// File names of the regular files directly inside `dir`, sorted.
/// Symlinks count as the file they point at.
fn list_files(dir: &Path) -> Result<Vec<String>, CompileError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| CompileError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Which file names drive a compile run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingPolicy {
    /// Iterate whichever listing has fewer files. With equal counts the
    /// module config listing is used. Extra files on the other side are
    /// ignored without notice.
    #[default]
    ShorterListing,
    /// Iterate only names present in both listings and report the rest.
    Intersection,
}

/// Which directory an unpaired file was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingSide {
    SchoolLists,
    ModuleConfigs,
}

impl ListingSide {
    pub fn dir_name(self) -> &'static str {
        match self {
            ListingSide::SchoolLists => SCHOOL_LISTS_DIR,
            ListingSide::ModuleConfigs => MODULE_CONFIGS_DIR,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ListingSide::SchoolLists => ListingSide::ModuleConfigs,
            ListingSide::ModuleConfigs => ListingSide::SchoolLists,
        }
    }
}

/// A file with no counterpart in the other directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpairedFile {
    pub file_name: String,
    pub found_in: ListingSide,
}

/// Outcome of pairing the two listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairing {
    /// File names to load, in iteration order
    pub files: Vec<String>,
    /// Only populated by [`PairingPolicy::Intersection`]
    pub unpaired: Vec<UnpairedFile>,
}

impl PairingPolicy {
    pub fn select(self, school_files: Vec<String>, module_files: Vec<String>) -> Pairing {
        match self {
            PairingPolicy::ShorterListing => {
                let files = if school_files.len() < module_files.len() {
                    school_files
                } else {
                    module_files
                };
                Pairing {
                    files,
                    unpaired: Vec::new(),
                }
            }
            PairingPolicy::Intersection => {
                let schools: BTreeSet<String> = school_files.into_iter().collect();
                let modules: BTreeSet<String> = module_files.into_iter().collect();

                let files = schools.intersection(&modules).cloned().collect();
                let unpaired = schools
                    .difference(&modules)
                    .map(|name| UnpairedFile {
                        file_name: name.clone(),
                        found_in: ListingSide::SchoolLists,
                    })
                    .chain(modules.difference(&schools).map(|name| UnpairedFile {
                        file_name: name.clone(),
                        found_in: ListingSide::ModuleConfigs,
                    }))
                    .collect();

                Pairing { files, unpaired }
            }
        }
    }
}

impl std::str::FromStr for PairingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shorter" | "shorter_listing" => Ok(PairingPolicy::ShorterListing),
            "intersection" => Ok(PairingPolicy::Intersection),
            other => Err(format!(
                "unknown pairing policy '{}' (expected 'shorter' or 'intersection')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_locate_missing_school_lists_first() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssessmentDirs::locate(dir.path()).unwrap_err();
        let expected = format!("ERROR: {} does not exist", dir.path().join("schoolLists").display());
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_locate_missing_module_configs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("schoolLists")).unwrap();
        let err = AssessmentDirs::locate(dir.path()).unwrap_err();
        match err {
            CompileError::MissingDirectory(path) => {
                assert_eq!(path, dir.path().join("moduleConfigs"))
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_listing_skips_directories_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("schoolLists")).unwrap();
        std::fs::create_dir(dir.path().join("moduleConfigs")).unwrap();
        let schools = dir.path().join("schoolLists");
        std::fs::write(schools.join("star-v1.ini"), "").unwrap();
        std::fs::write(schools.join("fast-v1.ini"), "").unwrap();
        std::fs::create_dir(schools.join("archive")).unwrap();

        let dirs = AssessmentDirs::locate(dir.path()).unwrap();
        assert_eq!(dirs.school_list_files().unwrap(), names(&["fast-v1.ini", "star-v1.ini"]));
        assert!(dirs.module_config_files().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_listing_includes_symlinked_files() {
        let dir = tempfile::tempdir().unwrap();
        let schools = dir.path().join("schoolLists");
        std::fs::create_dir(&schools).unwrap();
        std::fs::create_dir(dir.path().join("moduleConfigs")).unwrap();
        let shared = dir.path().join("shared");
        std::fs::create_dir(&shared).unwrap();
        std::fs::write(shared.join("fast-v1.ini"), "").unwrap();
        std::os::unix::fs::symlink(shared.join("fast-v1.ini"), schools.join("fast-v1.ini")).unwrap();
        std::os::unix::fs::symlink(&shared, schools.join("linked-dir")).unwrap();

        let dirs = AssessmentDirs::locate(dir.path()).unwrap();
        assert_eq!(dirs.school_list_files().unwrap(), names(&["fast-v1.ini"]));
    }

    #[test]
    fn test_shorter_listing_prefers_fewer_files() {
        let pairing = PairingPolicy::ShorterListing.select(
            names(&["a.ini"]),
            names(&["a.ini", "b.ini"]),
        );
        assert_eq!(pairing.files, names(&["a.ini"]));
        assert!(pairing.unpaired.is_empty());
    }

    #[test]
    fn test_shorter_listing_tie_uses_module_configs() {
        let pairing = PairingPolicy::ShorterListing.select(names(&["a.ini"]), names(&["b.ini"]));
        assert_eq!(pairing.files, names(&["b.ini"]));
    }

    #[test]
    fn test_intersection_reports_both_sides() {
        let pairing = PairingPolicy::Intersection.select(
            names(&["a.ini", "b.ini", "c.ini"]),
            names(&["b.ini", "c.ini", "d.ini"]),
        );
        assert_eq!(pairing.files, names(&["b.ini", "c.ini"]));
        assert_eq!(
            pairing.unpaired,
            vec![
                UnpairedFile {
                    file_name: "a.ini".to_string(),
                    found_in: ListingSide::SchoolLists,
                },
                UnpairedFile {
                    file_name: "d.ini".to_string(),
                    found_in: ListingSide::ModuleConfigs,
                },
            ]
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("shorter".parse::<PairingPolicy>().unwrap(), PairingPolicy::ShorterListing);
        assert_eq!("intersection".parse::<PairingPolicy>().unwrap(), PairingPolicy::Intersection);
        assert!("union".parse::<PairingPolicy>().is_err());
    }
}
