//! Route assembly.

mod common;
mod reports;
mod students;

pub use common::common_routes_with_ready;
pub use reports::report_routes;
pub use students::student_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application: health routes at the root, students and exports under `/api`.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api", student_routes(state.clone()).merge(report_routes(state)))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
