//! Report export handlers. The three legacy routes and `/export/:format` share one code path.

use crate::error::AppError;
use crate::report::ReportFormat;
use crate::service::ExportOutcome;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

async fn export(state: &AppState, format: ReportFormat) -> Result<Json<ExportOutcome>, AppError> {
    tracing::debug!(%format, "REST request to export Student report");
    let outcome = state.reports.export(format).await?;
    Ok(Json(outcome))
}

/// GET /api/export/:format with `pdf`, `rtf` (or `word`) and `html`.
pub async fn export_report(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<Json<ExportOutcome>, AppError> {
    let format: ReportFormat = format.parse()?;
    export(&state, format).await
}

pub async fn export_pdf(State(state): State<AppState>) -> Result<Json<ExportOutcome>, AppError> {
    export(&state, ReportFormat::Pdf).await
}

pub async fn export_word(State(state): State<AppState>) -> Result<Json<ExportOutcome>, AppError> {
    export(&state, ReportFormat::Rtf).await
}

pub async fn export_html(State(state): State<AppState>) -> Result<Json<ExportOutcome>, AppError> {
    export(&state, ReportFormat::Html).await
}
