use thiserror::Error;

/// Failures of the tenant connection cache.
///
/// `MissingTenant` and `MissingModel` are caller bugs and are raised before
/// any connection work starts.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("no estancia name was provided")]
    MissingTenant,

    #[error("no model name was provided (e.g. 'User')")]
    MissingModel,

    #[error("failed to connect to database '{database}': {source}")]
    Connect {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("connect task for database '{database}' did not complete: {source}")]
    ConnectTask {
        database: String,
        #[source]
        source: tokio::task::JoinError,
    },
}
