// Estancia-scoped view handlers.
// Views are described as JSON (view name plus locals); no templates are rendered here.

use std::path::PathBuf;

use axum::{
    extract::{Extension, Multipart, State},
    http::StatusCode,
};
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use serde_json::{json, Map, Value};
use tracing::{error, info, instrument, warn};

use crate::api::middleware::tenant::TenantContext;
use crate::config::state::AppState;
use crate::config::tenant_config::TenantConfig;
use crate::utils::response_handler::HandlerResponse;
use crate::utils::utils::safe_extension;

// America/Mexico_City has no daylight saving time since 2022
const MEXICO_CITY: FixedOffset = match FixedOffset::east_opt(-6 * 3600) {
    Some(offset) => offset,
    None => panic!("invalid UTC offset"),
};

const SHORT_MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// View payload with the estancia locals every template receives
fn tenant_view(view: &str, ctx: &TenantContext, config: &TenantConfig, locals: Value) -> Value {
    let mut data: Map<String, Value> = Map::new();
    data.insert("view".into(), json!(view));
    data.insert("estancia".into(), json!(ctx.estancia));
    data.insert("base_url".into(), json!(ctx.base_url));
    data.insert("config".into(), json!(config));

    if let Value::Object(extra) = locals {
        data.extend(extra);
    }

    Value::Object(data)
}

#[instrument(skip(state, config), fields(estancia = %ctx.estancia))]
pub async fn landing(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Extension(config): Extension<TenantConfig>,
) -> HandlerResponse {
    info!("Estancia landing page");

    let settings: Value = state
        .registry
        .get(&ctx.estancia)
        .map(|entry| Value::Object(entry.clone()))
        .unwrap_or(Value::Null);

    HandlerResponse::new(StatusCode::OK).data(tenant_view(
        "estancia/estancia",
        &ctx,
        &config,
        json!({
            "title": format!("Bienvenido a {}", ctx.estancia),
            "settings": settings,
        }),
    ))
}

/// Locals of the tutor dashboard for the instant `now`
pub fn tutor_dashboard_locals(now: DateTime<Utc>) -> Value {
    let local: DateTime<FixedOffset> = now.with_timezone(&MEXICO_CITY);

    let month: &str = SHORT_MONTHS_ES[local.month0() as usize];
    let (is_pm, hour12) = local.hour12();
    let hour: u32 = local.hour();
    let is_night: bool = hour >= 19 || hour < 6;

    json!({
        "title": "EduSmart",
        "today": format!("{} {} {}", local.day(), month, local.year()),
        "current_time": format!("{:02}:{:02} {}", hour12, local.minute(), if is_pm { "p.m." } else { "a.m." }),
        "is_night": is_night,
        "greeting": if is_night { "Buenas noches" } else { "Buenos días" },
    })
}

#[instrument(skip_all, fields(estancia = %ctx.estancia))]
pub async fn dashboard_tutor(
    Extension(ctx): Extension<TenantContext>,
    Extension(config): Extension<TenantConfig>,
) -> HandlerResponse {
    HandlerResponse::new(StatusCode::OK).data(tenant_view(
        "dashboard/dashboard_tutor",
        &ctx,
        &config,
        tutor_dashboard_locals(Utc::now()),
    ))
}

#[instrument(skip_all, fields(estancia = %ctx.estancia))]
pub async fn dashboard_maestro(
    Extension(ctx): Extension<TenantContext>,
    Extension(config): Extension<TenantConfig>,
) -> HandlerResponse {
    HandlerResponse::new(StatusCode::OK).data(tenant_view(
        "dashboard/dashboard_maestro",
        &ctx,
        &config,
        json!({ "title": "EduSmart" }),
    ))
}

#[instrument(skip_all, fields(estancia = %ctx.estancia))]
pub async fn login(
    Extension(ctx): Extension<TenantContext>,
    Extension(config): Extension<TenantConfig>,
) -> HandlerResponse {
    HandlerResponse::new(StatusCode::OK).data(tenant_view(
        "auth/login",
        &ctx,
        &config,
        json!({ "title": "Iniciar sesión" }),
    ))
}

#[instrument(skip_all, fields(estancia = %ctx.estancia))]
pub async fn register(
    Extension(ctx): Extension<TenantContext>,
    Extension(config): Extension<TenantConfig>,
) -> HandlerResponse {
    HandlerResponse::new(StatusCode::OK).data(tenant_view(
        "auth/register",
        &ctx,
        &config,
        json!({ "title": "Registro" }),
    ))
}

/// `<estancia>-<unix millis><ext>`
pub fn upload_file_name(estancia: &str, original_name: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}{}", estancia, now.timestamp_millis(), safe_extension(original_name))
}

/// Stores the first file field of a multipart body in the uploads directory
#[instrument(skip(state, multipart), fields(estancia = %ctx.estancia))]
pub async fn upload(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    mut multipart: Multipart,
) -> HandlerResponse {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.file_name().is_some() => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return HandlerResponse::new(StatusCode::BAD_REQUEST)
                    .data(json!({ "error": "missing_file" }))
                    .message("No file field in upload");
            }
            Err(e) => {
                warn!("Invalid multipart body: {}", e);
                return HandlerResponse::new(e.status())
                    .data(json!({ "error": "invalid_multipart", "details": e.body_text() }))
                    .message("Invalid upload body");
            }
        }
    };

    let original_name: String = field.file_name().unwrap_or_default().to_string();
    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read upload '{}': {}", original_name, e);
            return HandlerResponse::new(e.status())
                .data(json!({ "error": "invalid_multipart", "details": e.body_text() }))
                .message("Invalid upload body");
        }
    };

    let file_name: String = upload_file_name(&ctx.estancia, &original_name, Utc::now());
    let uploads_dir: &PathBuf = &state.environment.uploads_dir;

    let stored: std::io::Result<()> = async {
        tokio::fs::create_dir_all(uploads_dir).await?;
        tokio::fs::write(uploads_dir.join(&file_name), &bytes).await
    }
    .await;

    match stored {
        Ok(()) => {
            info!("Stored upload '{}' as '{}' ({} bytes)", original_name, file_name, bytes.len());
            HandlerResponse::new(StatusCode::CREATED)
                .data(json!({
                    "file_name": file_name,
                    "original_name": original_name,
                    "size": bytes.len(),
                    "url": format!("/uploads/{file_name}"),
                }))
                .message("File uploaded successfully")
        }
        Err(e) => {
            error!("Failed to store upload '{}': {}", file_name, e);
            HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
                .data(json!({ "error": "upload_failed", "details": e.to_string() }))
                .message("Failed to store file")
        }
    }
}

/// Obtains the estancia's pool through the connection cache and reports its stats
#[instrument(skip(state), fields(estancia = %ctx.estancia))]
pub async fn db_health(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> HandlerResponse {
    match state.connections.get_connection(&ctx.estancia).await {
        Ok(connection) => {
            HandlerResponse::new(StatusCode::OK)
                .data(json!({
                    "database": connection.database(),
                    "pool_size": connection.pool().size(),
                    "idle_connections": connection.pool().num_idle(),
                    "closed": connection.pool().is_closed(),
                }))
                .message("Tenant database connection healthy")
        }
        Err(e) => {
            error!("Tenant database unavailable for {}: {}", ctx.estancia, e);
            HandlerResponse::new(StatusCode::SERVICE_UNAVAILABLE)
                .data(json!({ "database": "disconnected", "error": e.to_string() }))
                .message("Tenant database connection failed")
        }
    }
}
