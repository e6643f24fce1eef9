use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, error, info};

use super::error::DatabaseError;
use super::postgres_connector::TenantConnector;

pub const DATABASE_PREFIX: &str = "db_";

/// `db_` followed by the ASCII alphanumeric characters of `tenant_id`.
/// `None` when nothing survives, which is treated as a missing tenant.
pub fn database_name_for(tenant_id: &str) -> Option<String> {
    let sanitized: String = tenant_id
        .chars()
        .filter(|c: &char| c.is_ascii_alphanumeric())
        .collect();

    if sanitized.is_empty() {
        None
    } else {
        Some(format!("{DATABASE_PREFIX}{sanitized}"))
    }
}

/// Pool of one tenant database, shared by every request of that tenant.
#[derive(Debug)]
pub struct TenantConnection {
    database: String,
    pool: PgPool,
}

impl TenantConnection {
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// A tenant connection paired with the model it was requested for.
#[derive(Debug, Clone)]
pub struct TenantModel {
    pub model_name: String,
    pub connection: Arc<TenantConnection>,
}

// Empty until the first successful connect; concurrent callers wait on the
// same initialisation.
type Slot = Arc<OnceCell<Arc<TenantConnection>>>;

/// Process-wide map of database name -> tenant pool.
///
/// Exactly one connect runs per database name, even when the first requests
/// for a tenant arrive together. A failed connect leaves the slot empty so
/// the next caller retries. The connect itself runs on its own task, so it
/// completes and fills the cache even when the caller that started it is
/// dropped. Entries are never evicted.
#[derive(Debug, Clone)]
pub struct TenantConnectionCache {
    connections: Arc<RwLock<HashMap<String, Slot>>>,
    connector: Arc<dyn TenantConnector>,
}

impl TenantConnectionCache {
    pub fn new(connector: Arc<dyn TenantConnector>) -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            connector,
        }
    }

    /// Returns the cached pool for `tenant_id`, opening it on first use.
    pub async fn get_connection(&self, tenant_id: &str) -> Result<Arc<TenantConnection>, DatabaseError> {
        let database: String = database_name_for(tenant_id).ok_or(DatabaseError::MissingTenant)?;
        let slot: Slot = self.slot_for(&database).await;

        if let Some(connection) = slot.get() {
            debug!("Reusing existing pool for: {}", database);
            return Ok(connection.clone());
        }

        // Runs detached so a caller that gives up (timeout, disconnect) does not
        // abort the connect; the slot is filled either way.
        let task = tokio::spawn(Self::initialize(slot, self.connector.clone(), database.clone()));

        task.await
            .map_err(|source| DatabaseError::ConnectTask { database, source })?
    }

    async fn initialize(
        slot: Slot,
        connector: Arc<dyn TenantConnector>,
        database: String,
    ) -> Result<Arc<TenantConnection>, DatabaseError> {
        let connection: &Arc<TenantConnection> = slot
            .get_or_try_init(|| async {
                info!("Creating new pool for: {}", database);

                let pool: PgPool = connector.connect(&database).await.map_err(|source| {
                    error!("Failed to open pool for '{}': {}", database, source);
                    DatabaseError::Connect {
                        database: database.clone(),
                        source,
                    }
                })?;

                info!("Pool for '{}' initialized successfully", database);
                Ok::<_, DatabaseError>(Arc::new(TenantConnection {
                    database: database.clone(),
                    pool,
                }))
            })
            .await?;

        Ok(connection.clone())
    }

    /// Like [`get_connection`](Self::get_connection) but also requires a model name.
    /// Entry point for model code that needs a tenant-scoped handle.
    ///
    /// Models share the tenant pool; there is no per-model schema selection.
    pub async fn get_tenant_model(&self, tenant_id: &str, model_name: &str) -> Result<TenantModel, DatabaseError> {
        if database_name_for(tenant_id).is_none() {
            return Err(DatabaseError::MissingTenant);
        }
        if model_name.trim().is_empty() {
            return Err(DatabaseError::MissingModel);
        }

        let connection: Arc<TenantConnection> = self.get_connection(tenant_id).await?;
        Ok(TenantModel {
            model_name: model_name.to_string(),
            connection,
        })
    }

    async fn slot_for(&self, database: &str) -> Slot {
        {
            let connections = self.connections.read().await;
            if let Some(slot) = connections.get(database) {
                return slot.clone();
            }
        }

        let mut connections = self.connections.write().await;
        connections.entry(database.to_string()).or_default().clone()
    }

    /// Database names with an open pool, sorted.
    pub async fn active_databases(&self) -> Vec<String> {
        let connections = self.connections.read().await;
        let mut names: Vec<String> = connections
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Closes every pool. Only called while the process is shutting down.
    pub async fn shutdown(&self) {
        info!("Closing tenant connection pools...");

        let drained: Vec<(String, Slot)> = self.connections.write().await.drain().collect();
        for (database, slot) in drained {
            if let Some(connection) = slot.get() {
                connection.pool.close().await;
                info!("Pool for '{}' closed", database);
            }
        }
    }
}
