use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form,
};
use bytes::Bytes;
use chrono::Datelike;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extract::ExtractError;
use crate::state::AppState;
use crate::ui::render_page;

/// Multipart field carrying the CV file.
pub const UPLOAD_FIELD: &str = "cv";
/// Form field carrying the field of work, on both the upload and analyze forms.
pub const INDUSTRY_FIELD: &str = "industry";

#[derive(Deserialize)]
pub struct IndustryForm {
    #[serde(default)]
    pub industry: String,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let session = state.controller.snapshot().await;
    debug!(phase = ?session.phase(), "rendering page");
    let page = render_page(&session, chrono::Utc::now().year())?;
    Ok(Html(page))
}

/// The parts of an upload form the page cares about.
#[derive(Default)]
struct UploadForm {
    industry: Option<String>,
    file: Option<(String, Option<String>, Bytes)>,
}

async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(INDUSTRY_FIELD) => form.industry = Some(field.text().await?),
            Some(UPLOAD_FIELD) if form.file.is_none() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mime = field.content_type().map(str::to_string);
                form.file = Some((file_name, mime, field.bytes().await?));
            }
            _ => {}
        }
    }
    Ok(form)
}

/// POST /upload
/// Extraction continues in the background; the page polls until it settles.
pub async fn handle_upload(State(state): State<AppState>, mut multipart: Multipart) -> Redirect {
    let controller = &state.controller;

    let form = match read_upload_form(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            warn!("multipart upload failed: {e}");
            controller.reject_upload(ExtractError::Unreadable).await;
            return Redirect::to("/");
        }
    };

    if let Some(industry) = &form.industry {
        controller.set_industry(industry).await;
    }

    match form.file {
        Some((file_name, mime, bytes)) if !(file_name.is_empty() && bytes.is_empty()) => {
            if let Some(job) = controller.begin_upload(file_name, mime.as_deref(), bytes).await {
                controller.spawn_upload(job);
            }
        }
        _ => controller.reject_upload(ExtractError::NoFile).await,
    }

    Redirect::to("/")
}

/// POST /industry
/// Keeps the typed industry across the page's automatic refreshes.
pub async fn handle_set_industry(
    State(state): State<AppState>,
    Form(form): Form<IndustryForm>,
) -> StatusCode {
    state.controller.set_industry(&form.industry).await;
    StatusCode::NO_CONTENT
}

/// POST /file/remove
pub async fn handle_remove_file(State(state): State<AppState>) -> Redirect {
    state.controller.remove_file().await;
    Redirect::to("/")
}

/// POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Form(form): Form<IndustryForm>,
) -> Redirect {
    let controller = &state.controller;
    if let Some(job) = controller.begin_analysis(&form.industry).await {
        controller.spawn_analysis(job);
    }
    Redirect::to("/")
}

/// POST /reset
pub async fn handle_reset(State(state): State<AppState>) -> Redirect {
    state.controller.reset().await;
    Redirect::to("/")
}
