use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Local string-keyed storage, the process-side stand-in for browser
/// `localStorage`.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

fn check_key(key: &str) -> AppResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "Invalid storage key '{}'",
            key
        )))
    }
}

fn check_quota(quota_bytes: Option<usize>, key: &str, value: &str) -> AppResult<()> {
    match quota_bytes {
        Some(limit) if value.len() > limit => Err(AppError::StorageError(format!(
            "Quota exceeded writing '{}': {} bytes over a {} byte limit",
            key,
            value.len(),
            limit
        ))),
        _ => Ok(()),
    }
}

/// One JSON file per key inside a data directory.
pub struct FileKeyValueStore {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileKeyValueStore {
    pub fn new(dir: &Path, quota_bytes: Option<usize>) -> AppResult<Self> {
        fs::create_dir_all(dir)?;
        log::info!("Using file storage at {}", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            quota_bytes,
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        check_key(key)?;
        check_quota(self.quota_bytes, key, value)?;

        // Write-then-rename so readers never observe a half-written value.
        let tmp = self.dir.join(format!(".{}.{}.tmp", key, Uuid::new_v4()));
        let written = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, self.path_for(key)));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        check_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn values(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| AppError::StorageError("In-memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        check_key(key)?;
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        check_key(key)?;
        check_quota(self.quota_bytes, key, value)?;
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        check_key(key)?;
        self.values()?.remove(key);
        Ok(())
    }
}
