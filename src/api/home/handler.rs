// Handlers outside any estancia

use serde_json::json;
use axum::{http::StatusCode, extract::State};

use crate::config::state::AppState;
use crate::utils::response_handler::HandlerResponse;
use tracing::{instrument, info};

/// Welcome page
#[instrument(skip(_state))]
pub async fn welcome(State(_state): State<AppState>) -> HandlerResponse {
    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "view": "error/welcome",
            "title": "Inicio - Gestor Documental",
        }))
}

/// Tenant pools opened by this instance
#[instrument(skip(state))]
pub async fn monitoring(State(state): State<AppState>) -> HandlerResponse {
    info!("Database monitoring called");

    let active_databases: Vec<String> = state.connections.active_databases().await;

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "instance": get_instance_identifier(),
            "registered_estancias": state.registry.len(),
            "active_databases": active_databases,
            "active_pool_count": active_databases.len(),
        }))
        .message("Database monitoring data retrieved")
}

/// Generate a unique identifier for this application instance
fn get_instance_identifier() -> String {
    // Try to get container ID first (for Docker environments)
    if let Ok(hostname) = std::env::var("HOSTNAME") {
        if hostname.len() >= 12 && hostname.chars().all(|c: char| c.is_ascii_hexdigit() || c == '-') {
            return format!("container_{}", &hostname[..12]);
        }
        return format!("host_{}", hostname);
    }

    if let Some(hostname) = hostname::get().ok().and_then(|h| h.into_string().ok()) {
        return format!("host_{}", hostname);
    }

    // Last resort: a process-unique ID
    format!("process_{}", std::process::id())
}
