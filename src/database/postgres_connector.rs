use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tracing::info;

use crate::config::environment::EnvironmentVariables;

/// Opens the pool backing one tenant database.
///
/// The cache owns all bookkeeping; implementations only talk to the server.
#[async_trait]
pub trait TenantConnector: Send + Sync + std::fmt::Debug {
    async fn connect(&self, database: &str) -> Result<PgPool, sqlx::Error>;
}

/// Connects to `db_<estancia>` databases on the configured PostgreSQL server.
#[derive(Debug, Clone)]
pub struct PostgresConnector {
    config: Arc<EnvironmentVariables>,
}

impl PostgresConnector {
    pub fn new(config: Arc<EnvironmentVariables>) -> Self {
        Self { config }
    }

    /// Connection options with SSL mode and UTC timezone for `database`.
    pub fn connect_options(&self, database: &str) -> PgConnectOptions {
        let options: PgConnectOptions = PgConnectOptions::new()
            .host(&self.config.db_host)
            .port(self.config.db_port)
            .username(&self.config.db_user)
            .password(&self.config.db_password)
            .database(database)
            .options([("timezone", "UTC")]);

        // Production: require SSL. Development: prefer it.
        if self.config.is_production() {
            options.ssl_mode(PgSslMode::Require)
        } else {
            options.ssl_mode(PgSslMode::Prefer)
        }
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.config.db_max_connections)
            .acquire_timeout(self.config.db_connect_timeout())
    }
}

#[async_trait]
impl TenantConnector for PostgresConnector {
    async fn connect(&self, database: &str) -> Result<PgPool, sqlx::Error> {
        info!(
            "Opening pool for '{}' on {}:{} (max {} connections)",
            database, self.config.db_host, self.config.db_port, self.config.db_max_connections
        );

        self.pool_options()
            .connect_with(self.connect_options(database))
            .await
    }
}
