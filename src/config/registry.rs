// Static registry of known estancias, loaded once at startup.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read tenant registry '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("tenant registry '{path}' is not a JSON object of estancias: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable set of valid estancias and their registry entries.
///
/// The file is a JSON object keyed by estancia identifier; each value is
/// that estancia's deployment-time settings (display name, etc.).
#[derive(Debug, Clone, Default)]
pub struct TenantRegistry {
    estancias: HashMap<String, Map<String, Value>>,
}

impl TenantRegistry {
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let path_display: String = path.display().to_string();

        let raw: String = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path_display.clone(),
            source,
        })?;

        let estancias: HashMap<String, Map<String, Value>> =
            serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
                path: path_display.clone(),
                source,
            })?;

        info!("Loaded {} estancias from '{}'", estancias.len(), path_display);
        Ok(Self { estancias })
    }

    pub fn contains(&self, estancia: &str) -> bool {
        self.estancias.contains_key(estancia)
    }

    pub fn get(&self, estancia: &str) -> Option<&Map<String, Value>> {
        self.estancias.get(estancia)
    }

    pub fn len(&self) -> usize {
        self.estancias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estancias.is_empty()
    }

    /// Sorted identifiers, for logs and diagnostics.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.estancias.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for TenantRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            estancias: iter.into_iter().map(|name| (name.into(), Map::new())).collect(),
        }
    }
}
