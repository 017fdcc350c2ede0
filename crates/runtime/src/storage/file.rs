//! File-backed store backend: one JSON document per key.

use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// [`KeyValueStore`] persisting each key as `<root>/<key>.json`, with `/`
/// in keys mapping to subdirectories.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Per-user application data directory for the club site.
    pub fn default_data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "clubhouse")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in key.split('/') {
            path.push(segment);
        }
        path.set_extension("json");
        path
    }

    fn collect_keys(
        &self,
        dir: &Path,
        prefix: &str,
        out: &mut Vec<String>,
    ) -> Result<(), StorageError> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                let nested = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };
                self.collect_keys(&entry.path(), &nested, out)?;
            } else if let Some(stem) = name.strip_suffix(".json") {
                if prefix.is_empty() {
                    out.push(stem.to_string());
                } else {
                    out.push(format!("{prefix}/{stem}"));
                }
            }
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, value)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut out = Vec::new();
        self.collect_keys(&self.root, "", &mut out)?;
        out.sort();
        Ok(out)
    }
}
