//! Structured YAML data loading.
//!
//! A YAML tree is a directory of `.yml`/`.yaml` files merged into one JSON
//! object keyed by file stem. Recursive loads nest subdirectories under
//! their directory name.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::ContentError;

/// Whether [`load_yaml_tree`] descends into subdirectories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recursion {
    /// Only files directly in the directory.
    NonRecursive,
    /// Files in the directory and every subdirectory.
    Recursive,
}

/// Load every YAML file under `dir` into a JSON object.
///
/// A missing directory yields an empty object. Hidden entries are skipped.
///
/// # Errors
///
/// Returns an error if a file cannot be read or is not valid YAML.
pub fn load_yaml_tree(dir: &Path, recursion: Recursion) -> Result<Value, ContentError> {
    if !dir.is_dir() {
        return Ok(Value::Object(Map::new()));
    }

    let mut tree = Map::new();
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|e| ContentError::io(dir, e))?
        .filter_map(Result::ok)
        .collect();
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            if recursion == Recursion::Recursive {
                tree.insert(name, load_yaml_tree(&path, recursion)?);
            }
            continue;
        }

        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yml" || ext == "yaml");
        if !is_yaml {
            continue;
        }
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        let content = fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        let value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(&content).map_err(|source| ContentError::Data {
                path: path.clone(),
                source,
            })?
        };
        tree.insert(stem, value);
    }

    Ok(Value::Object(tree))
}
