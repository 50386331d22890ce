//! Services between handlers and the store: student CRUD and report export.

mod reports;
mod students;
mod validation;
pub use reports::{ExportOutcome, ReportService, REPORT_PAGE_SIZE};
pub use students::StudentService;
pub use validation::StudentValidator;
