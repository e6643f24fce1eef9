// Estancia route definitions

use axum::{
    middleware::from_fn_with_state,
    routing::{any, get, post},
    Router,
};

use crate::api::middleware::tenant::{load_tenant_config, resolve_tenant};
use crate::config::state::AppState;
use crate::utils::response_handler::fallback_handler;
use super::handler;

/// Creates the router for `/{estancia}/...`.
/// The resolver runs first, then the config loader, then the handler.
pub fn estancia_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{estancia}", get(handler::landing))
        .route("/{estancia}/dashboard/tutor", get(handler::dashboard_tutor))
        .route("/{estancia}/dashboard/maestro", get(handler::dashboard_maestro))
        .route("/{estancia}/auth/login", get(handler::login))
        .route("/{estancia}/auth/register", get(handler::register))
        .route("/{estancia}/uploads", post(handler::upload))
        .route("/{estancia}/db/health", get(handler::db_health))
        // Unlisted sub-paths still go through the resolver
        .route("/{estancia}/{*rest}", any(fallback_handler))
        // route_layer: last added runs first
        .route_layer(from_fn_with_state(state.clone(), load_tenant_config))
        .route_layer(from_fn_with_state(state, resolve_tenant))
}
