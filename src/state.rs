//! Shared application state for all routes.

use crate::config::ReportSettings;
use crate::response::HeaderAlerts;
use crate::service::{ReportService, StudentService};
use crate::store::StudentRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub reports: ReportService,
    pub alerts: Arc<HeaderAlerts>,
}

impl AppState {
    pub fn new(repository: Arc<dyn StudentRepository>, report: ReportSettings, alerts: HeaderAlerts) -> Self {
        AppState {
            students: StudentService::new(repository.clone()),
            reports: ReportService::new(repository, report),
            alerts: Arc::new(alerts),
        }
    }
}
