// Per-estancia display configuration read from `<data_dir>/<estancia>.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

static DEFAULT_TENANT_CONFIG: Lazy<Map<String, Value>> = Lazy::new(|| {
    match json!({ "themeColor": "blue", "notifications": true }) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
});

/// Display options of one estancia. Re-read on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TenantConfig(pub Map<String, Value>);

impl Default for TenantConfig {
    fn default() -> Self {
        Self(DEFAULT_TENANT_CONFIG.clone())
    }
}

/// Reads the file at `path`; returns the defaults (and `true`) when the file
/// is missing, unreadable or not a JSON object. Never fails.
pub fn load_config_or_default(path: &Path) -> (TenantConfig, bool) {
    let raw: String = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No tenant config at '{}', using defaults", path.display());
            return (TenantConfig::default(), true);
        }
        Err(e) => {
            error!("Error reading tenant config '{}': {}", path.display(), e);
            return (TenantConfig::default(), true);
        }
    };

    match serde_json::from_str::<Map<String, Value>>(&raw) {
        Ok(map) => (TenantConfig(map), false),
        Err(e) => {
            error!("Error parsing tenant config '{}': {}", path.display(), e);
            (TenantConfig::default(), true)
        }
    }
}

/// Resolves estancia identifiers to config files under one data directory.
#[derive(Debug, Clone)]
pub struct TenantConfigLoader {
    data_dir: PathBuf,
}

impl TenantConfigLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// `None` for identifiers that could escape the data directory.
    pub fn path_for(&self, estancia: &str) -> Option<PathBuf> {
        let safe: bool = !estancia.is_empty()
            && estancia
                .chars()
                .all(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        safe.then(|| self.data_dir.join(format!("{estancia}.json")))
    }

    pub fn load(&self, estancia: &str) -> (TenantConfig, bool) {
        match self.path_for(estancia) {
            Some(path) => load_config_or_default(&path),
            None => {
                warn!("Refusing to build a config path for estancia {:?}", estancia);
                (TenantConfig::default(), true)
            }
        }
    }
}
