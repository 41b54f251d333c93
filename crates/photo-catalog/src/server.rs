//! HTTP surface for the photo catalog
//!
//! Provides `/` (photo list), `/upload`, `/photos/{id}`, `/photos/delete/{id}`,
//! `/api/photos`, `/health`, and serves stored files under the public prefix.

use crate::error::AppError;
use crate::lifecycle::PhotoLifecycle;
use crate::render;
use crate::types::{HealthResponse, PhotoView, UploadedFile};
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Headroom above the upload ceiling for form fields and multipart framing.
/// Oversized files must still reach the validator to get a descriptive 400.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Shared state for the HTTP server
pub struct ServerState {
    pub photos: PhotoLifecycle,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(photos: PhotoLifecycle) -> Self {
        Self {
            photos,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    let body_limit = usize::try_from(state.photos.policy().max_size)
        .unwrap_or(usize::MAX)
        .saturating_mul(2)
        .saturating_add(BODY_LIMIT_SLACK);
    let files = ServeDir::new(state.photos.blobs().root());
    let prefix = state.photos.blobs().public_prefix().to_string();

    let router = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/photos", get(list_photos))
        .route("/upload", post(upload_photo))
        .route("/photos/{id}", post(update_photo))
        .route("/photos/delete/{id}", post(delete_photo))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    let router = if prefix.is_empty() {
        router.fallback_service(files)
    } else {
        router.nest_service(&prefix, files)
    };

    router.layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Fields of the upload and update forms
#[derive(Debug, Default)]
struct PhotoForm {
    title: String,
    description: String,
    file: Option<UploadedFile>,
}

async fn read_form(mut multipart: Multipart) -> Result<PhotoForm, AppError> {
    let bad_form = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::BadRequest("File too large: request exceeds the upload limit".into())
        } else {
            AppError::BadRequest(format!("Invalid form data: {e}"))
        }
    };

    let mut form = PhotoForm::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("judul") => form.title = field.text().await.map_err(bad_form)?,
            Some("deskripsi") => form.description = field.text().await.map_err(bad_form)?,
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(bad_form)?;
                // Browsers send an empty, unnamed part when no file was chosen
                if !file_name.is_empty() {
                    form.file = Some(UploadedFile::new(file_name, content));
                }
            }
            _ => {}
        }
    }
    Ok(form)
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Photo not found".into()))
}

fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

async fn index(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let photos = state.photos.list().await?;
    Ok(Html(render::index_page(&photos)))
}

async fn list_photos(State(state): State<SharedState>) -> Result<Json<Vec<PhotoView>>, AppError> {
    Ok(Json(state.photos.list().await?))
}

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
    })
}

async fn upload_photo(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_form(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("File not found".into()))?;

    state
        .photos
        .create(&form.title, &form.description, &file)
        .await?;
    Ok(redirect_home())
}

async fn update_photo(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let form = read_form(multipart).await?;

    state
        .photos
        .update(id, &form.title, &form.description, form.file.as_ref())
        .await?;
    Ok(redirect_home())
}

async fn delete_photo(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    state.photos.delete(id).await?;
    Ok(redirect_home())
}
