pub mod connection_cache;
pub mod error;
pub mod postgres_connector;

pub use connection_cache::{database_name_for, TenantConnection, TenantConnectionCache, TenantModel};
pub use error::DatabaseError;
pub use postgres_connector::{PostgresConnector, TenantConnector};
