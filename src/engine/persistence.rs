use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use crate::{Result, Error};
use log::warn;

#[allow(unused_imports)]
use crate::engine::MemStore;

/// Handles disk I/O for the [`MemStore`].
///
/// Every key is stored in its own `<key>.json` file inside the data directory.
/// Writes use an atomic "write-then-rename" strategy so a crash never leaves a
/// half-written blob behind.
pub struct Persistence {
    data_dir: PathBuf,
}

impl Persistence {
    /// Initializes a new `Persistence` handler in the specified directory.
    ///
    /// If the directory does not exist, it will be created.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { data_dir: dir })
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(Error::Internal(format!("invalid storage key {:?}", key)));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }

    /// Writes the value of a single key atomically.
    pub fn save_key(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.key_path(key)?;
        let temp_path = file_path.with_extension("json.tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &file_path)?;

        Ok(())
    }

    /// Loads every key found in the data directory.
    ///
    /// Files that cannot be read, or whose name is not a valid key, are
    /// skipped with a warning.
    pub fn load_all(&self) -> Result<HashMap<String, String>> {
        let mut all_data = HashMap::new();

        if !self.data_dir.exists() {
            return Ok(all_data);
        }

        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                let key = match path.file_stem().and_then(|s| s.to_str()) {
                    Some(stem) => stem.to_string(),
                    None => {
                        warn!("Skipping storage file with invalid name {:?}", path);
                        continue;
                    }
                };

                let content = match fs::read_to_string(&path) {
                    Ok(c) => c,
                    Err(e) => {
                        warn!("Could not read storage file {:?}: {}", path, e);
                        continue;
                    }
                };

                all_data.insert(key, content);
            }
        }

        Ok(all_data)
    }
}
