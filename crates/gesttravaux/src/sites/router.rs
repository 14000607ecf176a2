use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use mime::Mime;

use super::domain::{InspectorId, SiteId};
use super::forms::{DocumentForm, ObservationForm, ValidationError, MAX_DOCUMENT_BYTES};
use super::repository::SiteRepository;
use super::service::SiteAccessService;
use super::views::{DashboardView, DocumentView, SiteDetailView, SiteSummaryView};
use crate::error::AppError;
use crate::storage::{DocumentStore, FileUpload};

/// Header carrying the caller's resolved inspector id. Authentication
/// happens upstream; this layer only reads the resolved identity.
pub const INSPECTOR_ID_HEADER: &str = "x-inspector-id";

/// Router builder exposing the inspector-facing site endpoints.
pub fn site_router<R, S>(service: Arc<SiteAccessService<R, S>>) -> Router
where
    R: SiteRepository + 'static,
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(dashboard_handler::<R, S>))
        .route("/api/v1/sites", get(list_sites_handler::<R, S>))
        .route("/api/v1/sites/active", get(list_active_handler::<R, S>))
        .route("/api/v1/sites/:site_id", get(site_detail_handler::<R, S>))
        .route(
            "/api/v1/sites/:site_id/observations",
            post(add_observation_handler::<R, S>),
        )
        .route(
            "/api/v1/sites/:site_id/documents",
            post(upload_document_handler::<R, S>),
        )
        // Leave room above the PDF cap so oversized uploads reach form
        // validation instead of being cut off mid-body.
        .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES + 2 * 1024 * 1024))
        .with_state(service)
}

/// Resolve the caller's inspector id from the request headers.
pub fn caller_identity(headers: &HeaderMap) -> Result<InspectorId, AppError> {
    let raw = headers
        .get(INSPECTOR_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Identity(format!("missing {INSPECTOR_ID_HEADER} header")))?;

    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::Identity(format!("invalid {INSPECTOR_ID_HEADER} header")))?;

    Ok(InspectorId(id))
}

pub(crate) async fn dashboard_handler<R, S>(
    State(service): State<Arc<SiteAccessService<R, S>>>,
    headers: HeaderMap,
) -> Result<Json<DashboardView>, AppError>
where
    R: SiteRepository + 'static,
    S: DocumentStore + 'static,
{
    let caller = caller_identity(&headers)?;
    Ok(Json(service.dashboard(caller)?))
}

pub(crate) async fn list_sites_handler<R, S>(
    State(service): State<Arc<SiteAccessService<R, S>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<SiteSummaryView>>, AppError>
where
    R: SiteRepository + 'static,
    S: DocumentStore + 'static,
{
    let caller = caller_identity(&headers)?;
    let sites = service.sites_for_inspector(caller)?;
    Ok(Json(sites.iter().map(SiteSummaryView::from_site).collect()))
}

pub(crate) async fn list_active_handler<R, S>(
    State(service): State<Arc<SiteAccessService<R, S>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<SiteSummaryView>>, AppError>
where
    R: SiteRepository + 'static,
    S: DocumentStore + 'static,
{
    let caller = caller_identity(&headers)?;
    let sites = service.active_sites_for_inspector(caller)?;
    Ok(Json(sites.iter().map(SiteSummaryView::from_site).collect()))
}

pub(crate) async fn site_detail_handler<R, S>(
    State(service): State<Arc<SiteAccessService<R, S>>>,
    headers: HeaderMap,
    Path(site_id): Path<i64>,
) -> Result<Json<SiteDetailView>, AppError>
where
    R: SiteRepository + 'static,
    S: DocumentStore + 'static,
{
    let caller = caller_identity(&headers)?;
    let aggregate = service.site_for_inspector(SiteId(site_id), caller)?;
    Ok(Json(SiteDetailView::from_aggregate(&aggregate)))
}

pub(crate) async fn add_observation_handler<R, S>(
    State(service): State<Arc<SiteAccessService<R, S>>>,
    headers: HeaderMap,
    Path(site_id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentView>), AppError>
where
    R: SiteRepository + 'static,
    S: DocumentStore + 'static,
{
    let caller = caller_identity(&headers)?;
    let form = read_observation_form(multipart).await?;
    let record = service.add_observation(SiteId(site_id), caller, form)?;
    Ok((StatusCode::CREATED, Json(DocumentView::from_record(&record))))
}

pub(crate) async fn upload_document_handler<R, S>(
    State(service): State<Arc<SiteAccessService<R, S>>>,
    headers: HeaderMap,
    Path(site_id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentView>), AppError>
where
    R: SiteRepository + 'static,
    S: DocumentStore + 'static,
{
    let caller = caller_identity(&headers)?;
    let form = read_document_form(multipart).await?;
    let record = service.upload_document(SiteId(site_id), caller, form)?;
    Ok((StatusCode::CREATED, Json(DocumentView::from_record(&record))))
}

async fn read_observation_form(mut multipart: Multipart) -> Result<ObservationForm, AppError> {
    let mut form = ObservationForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = field.text().await.map_err(multipart_error)?,
            "observation" => {
                form.observation = non_blank(field.text().await.map_err(multipart_error)?)
            }
            "photo" => form.photo = read_file_part(field).await?,
            _ => {}
        }
    }

    Ok(form)
}

async fn read_document_form(mut multipart: Multipart) -> Result<DocumentForm, AppError> {
    let mut form = DocumentForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file_type" => form.file_type = field.text().await.map_err(multipart_error)?,
            "label" => form.label = field.text().await.map_err(multipart_error)?,
            "observation" => {
                form.observation = non_blank(field.text().await.map_err(multipart_error)?)
            }
            "file" => form.file = read_file_part(field).await?,
            _ => {}
        }
    }

    Ok(form)
}

async fn read_file_part(
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<FileUpload>, AppError> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .and_then(|raw| raw.parse::<Mime>().ok())
        .unwrap_or(mime::APPLICATION_OCTET_STREAM);
    let data = field.bytes().await.map_err(multipart_error)?;

    // A file input submitted empty arrives as a part with no name and no
    // bytes; that is "no file", not an upload.
    if original_name.is_empty() && data.is_empty() {
        return Ok(None);
    }

    Ok(Some(FileUpload {
        data: data.to_vec(),
        original_name,
        content_type,
    }))
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn multipart_error(error: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Access(ValidationError::Multipart(error.to_string()).into())
}
