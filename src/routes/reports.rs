//! Report export routes.

use crate::handlers::{export_html, export_pdf, export_report, export_word};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn report_routes(state: AppState) -> Router {
    Router::new()
        .route("/exportPDF", get(export_pdf))
        .route("/exportWord", get(export_word))
        .route("/exportHTML", get(export_html))
        .route("/export/:format", get(export_report))
        .with_state(state)
}
