// Start of file: src/main.rs

use axum::{serve, Router};
use tokio::net::TcpListener;

use estancias::config::state::AppState;
use estancias::core::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let state: AppState = AppState::from_env()?;
    tracing::info!(
        "Serving estancias: {}",
        state.registry.names().join(", ")
    );

    let app: Router = server::create_app(state.clone());
    let listener: TcpListener = server::setup_listener(&state.environment).await?;

    tracing::info!("Server listening on: {}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal(state))
        .await?;

    Ok(())
}

// End of file: src/main.rs
