use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::ports::PreferenceStore;

// In-memory preference area; flush is a no-op.
#[derive(Clone, Default)]
pub struct InMemoryPreferences {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.values()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn put_string(&self, key: &str, value: &str) {
        self.values().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values().remove(key);
    }

    fn flush(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug)]
pub enum PreferencesError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferencesError::Io(err) => write!(f, "preferences io error: {err}"),
            PreferencesError::Parse(err) => write!(f, "preferences file is not valid toml: {err}"),
        }
    }
}

impl std::error::Error for PreferencesError {}

// TOML-file preference area. Writes stay in memory until `flush`.
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FilePreferences {
    // A missing file starts out empty and is created on first flush.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let values: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).map_err(PreferencesError::Parse)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(PreferencesError::Io(err)),
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn values(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for FilePreferences {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.values()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn put_string(&self, key: &str, value: &str) {
        self.values().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values().remove(key);
    }

    fn flush(&self) -> Result<(), String> {
        let contents = toml::to_string(&*self.values()).map_err(|err| err.to_string())?;

        // Write beside the target and rename so readers never see a partial file.
        let staging = self.path.with_extension("toml.tmp");
        std::fs::write(&staging, contents).map_err(|err| err.to_string())?;
        std::fs::rename(&staging, &self.path).map_err(|err| err.to_string())
    }
}
