//! User preference storage (last used shift strategy)

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use beatshift_core::ShiftStrategy;
use tracing::warn;

use crate::error::Result;

/// Key under which the last chosen strategy is remembered
pub const STRATEGY_KEY: &str = "moveNotesSidewaysStrategy";

/// String key/value store for small user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Last used strategy, or `default` if nothing valid is stored
pub fn load_strategy(store: &dyn PreferenceStore, default: ShiftStrategy) -> ShiftStrategy {
    let Some(value) = store.get(STRATEGY_KEY) else {
        return default;
    };
    value.parse().unwrap_or_else(|_| {
        warn!("Ignoring unknown stored strategy {:?}", value);
        default
    })
}

pub fn save_strategy(store: &mut dyn PreferenceStore, strategy: ShiftStrategy) -> Result<()> {
    store.set(STRATEGY_KEY, strategy.as_str())
}

/// Preferences held only for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat TOML table
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

/// `<config dir>/beatshift/preferences.toml`
pub fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("beatshift")
        .join("preferences.toml")
}

impl FilePreferences {
    /// Open the store at `path`. A missing or unreadable file yields an
    /// empty store; it is created on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!("Failed to read preferences from {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn open_default() -> Self {
        Self::open(default_preferences_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.write()
    }
}
