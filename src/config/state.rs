// Application state shared by every handler

use std::sync::Arc;

use crate::config::environment::EnvironmentVariables;
use crate::config::registry::TenantRegistry;
use crate::config::tenant_config::TenantConfigLoader;
use crate::database::{PostgresConnector, TenantConnectionCache, TenantConnector};

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub registry: Arc<TenantRegistry>,
    pub tenant_configs: TenantConfigLoader,
    pub connections: TenantConnectionCache,
}

impl AppState {
    /// Builds the state from explicit parts; the registry is never re-read.
    pub fn new(
        environment: EnvironmentVariables,
        registry: TenantRegistry,
        connector: Arc<dyn TenantConnector>,
    ) -> Self {
        let tenant_configs: TenantConfigLoader = TenantConfigLoader::new(environment.tenant_data_dir.clone());

        Self {
            environment: Arc::new(environment),
            registry: Arc::new(registry),
            tenant_configs,
            connections: TenantConnectionCache::new(connector),
        }
    }

    /// Loads environment and registry from disk and connects to PostgreSQL.
    pub fn from_env() -> anyhow::Result<Self> {
        let environment: EnvironmentVariables = EnvironmentVariables::load()?;
        let registry: TenantRegistry = TenantRegistry::load(&environment.estancias_config)?;
        let connector: PostgresConnector = PostgresConnector::new(Arc::new(environment.clone()));

        Ok(Self::new(environment, registry, Arc::new(connector)))
    }

    /// Gracefully shutdown all tenant connections
    pub async fn shutdown(&self) {
        self.connections.shutdown().await;
        tracing::info!("AppState shutdown completed");
    }
}
