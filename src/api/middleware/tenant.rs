use std::collections::HashMap;

use axum::{
    extract::{Extension, Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tracing::{debug, error};

use crate::config::state::AppState;
use crate::config::tenant_config::TenantConfig;
use crate::utils::response_handler::HandlerResponse;

/// Resolved estancia, stored in request extensions for downstream handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub estancia: String,
    /// Prefix for every estancia-scoped link, e.g. `/norte`
    pub base_url: String,
}

impl TenantContext {
    pub fn new(estancia: impl Into<String>) -> Self {
        let estancia: String = estancia.into();
        let base_url: String = format!("/{estancia}");
        Self { estancia, base_url }
    }
}

/// Middleware that rejects estancias missing from the registry with a 404
pub async fn resolve_tenant(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, HandlerResponse> {
    let estancia: String = params.get("estancia").cloned().unwrap_or_default();

    if !state.registry.contains(&estancia) {
        error!("Access attempt to unknown estancia: {}", estancia);

        return Err(HandlerResponse::new(StatusCode::NOT_FOUND)
            .data(json!({
                "view": "error/error_estancia",
                "title": "Error 404",
                "estancia": estancia,
            }))
            .message(format!("Estancia '{estancia}' does not exist")));
    }

    request.extensions_mut().insert(TenantContext::new(estancia));
    Ok(next.run(request).await)
}

/// Middleware that attaches the estancia's display configuration.
/// Missing or broken files fall back to the defaults; never rejects.
pub async fn load_tenant_config(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    mut request: Request,
    next: Next,
) -> Response {
    let (config, defaulted): (TenantConfig, bool) = state.tenant_configs.load(&ctx.estancia);
    if defaulted {
        debug!("Using default configuration for estancia {}", ctx.estancia);
    }

    request.extensions_mut().insert(config);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_slash_plus_estancia() {
        let ctx: TenantContext = TenantContext::new("norte");
        assert_eq!(ctx.estancia, "norte");
        assert_eq!(ctx.base_url, "/norte");
    }
}
