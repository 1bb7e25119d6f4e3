use axum::{
    extract::{rejection::BytesRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::export::renderer_for;
use crate::layout::{analyze_page_fill, PageFillAnalysis, PageSize};
use crate::models::ResumeData;
use crate::render::{
    download_filename, DocumentRenderer, ExportFormat, HtmlRenderer, RenderError, RenderedDocument,
};
use crate::state::AppState;
use crate::validation::parse_resume;

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub page_size: PageSize,
    #[serde(flatten)]
    pub analysis: PageFillAnalysis,
}

/// POST /api/generate-pdf
/// Renders through the configured fallback chain; the first backend that succeeds wins.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let data = resume_from(body)?;

    let filename_source = data.personal_info.clone();
    let doc = state.chain.export(data).await?;
    let filename = download_filename(&filename_source, doc.format);
    Ok(attachment(doc, &filename))
}

/// POST /api/export/:format
/// A single backend with no fallback.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(format): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let format: ExportFormat = format.parse().map_err(AppError::UnsupportedFormat)?;
    let data = resume_from(body)?;

    let renderer = renderer_for(format, state.geometry);
    let filename = download_filename(&data.personal_info, format);
    let doc = blocking(move || renderer.render(&data)).await??;
    info!(
        format = format.extension(),
        bytes = doc.bytes.len(),
        "Single-format export done"
    );
    Ok(attachment(doc, &filename))
}

/// POST /api/preview
pub async fn handle_preview(
    body: Result<Bytes, BytesRejection>,
) -> Result<Html<String>, AppError> {
    let data = resume_from(body)?;
    let html = blocking(move || HtmlRenderer.render_string(&data)).await?;
    Ok(Html(html))
}

/// POST /api/layout
/// Page-fill report for the PDF layout, without producing the PDF.
pub async fn handle_layout(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<LayoutResponse>, AppError> {
    let data = resume_from(body)?;
    let pdf = state.pdf.clone();
    let analysis = blocking(move || analyze_page_fill(&pdf.layout(&data))).await?;
    info!(
        pages = analysis.page_count,
        last_page_fill = analysis.last_page_fill,
        "Layout analysed"
    );
    Ok(Json(LayoutResponse {
        page_size: state.geometry.size,
        analysis,
    }))
}

/// Reads and validates the request body. An over-limit body keeps its 413
/// status but answers with the usual error shape.
fn resume_from(body: Result<Bytes, BytesRejection>) -> Result<ResumeData, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(rejection.body_text())
        }
    })?;
    let data = parse_resume(&body)?;
    log_summary(&data);
    Ok(data)
}

/// Layout and rendering are CPU-bound; keep them off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, RenderError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RenderError::Task(e.to_string()))
}

fn attachment(doc: RenderedDocument, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, doc.format.content_type().to_string()),
            (header::CONTENT_LENGTH, doc.bytes.len().to_string()),
            (header::CACHE_CONTROL, "no-cache".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        doc.bytes,
    )
        .into_response()
}

fn log_summary(data: &ResumeData) {
    debug!(first_name = %data.personal_info.first_name, "Résumé submitted");
    info!(
        work = data.work_experience.len(),
        education = data.education.len(),
        courses = data.additional_education.len(),
        skills = data.skills.len(),
        languages = data.languages.len(),
        has_photo = data.personal_info.photo.is_some(),
        "Résumé received"
    );
}
