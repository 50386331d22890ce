//! HTTP handlers for student CRUD and report export.

pub mod reports;
pub mod students;
pub use reports::*;
pub use students::*;
