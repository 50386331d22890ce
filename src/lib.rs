//! Student REST backend: CRUD over PostgreSQL (or memory) plus PDF, RTF and HTML report export.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod page;
pub mod report;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{AppConfig, ReportSettings};
pub use error::{AppError, ConfigError, ReportError};
pub use model::Student;
pub use page::{Page, PageRequest};
pub use report::ReportFormat;
pub use response::HeaderAlerts;
pub use routes::app_router;
pub use service::{ReportService, StudentService};
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_student_table, InMemoryStudentRepository, PgStudentRepository,
    StudentRepository,
};
