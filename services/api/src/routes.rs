use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use gesttravaux::error::AppError;
use gesttravaux::sites::{caller_identity, site_router, SiteAccessError, SiteId};
use gesttravaux::storage::UploadKind;
use serde_json::json;

pub(crate) fn with_site_routes(state: &AppState) -> axum::Router {
    site_router(state.service.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/sites/:site_id/document",
            axum::routing::get(download_document_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Serve the document currently attached to a site, after the same
/// ownership check as every other site read.
pub(crate) async fn download_document_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Path(site_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let caller = caller_identity(&headers)?;
    let record = state.service.site_document(SiteId(site_id), caller)?;

    let file_name = record
        .file_name
        .ok_or(AppError::Access(SiteAccessError::NotFound))?;
    let kind = if record.file_type == "photo" {
        UploadKind::Photo
    } else {
        UploadKind::Document
    };

    let path = state.store.directory_for(kind).join(&file_name);
    let data = tokio::fs::read(&path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::Access(SiteAccessError::NotFound)
        } else {
            AppError::Io(err)
        }
    })?;

    let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type.to_string())],
        data,
    ))
}
