//! Student persistence: repository trait, PostgreSQL and in-memory implementations, bootstrap DDL.

mod bootstrap;
mod memory;
mod postgres;

pub use bootstrap::{ensure_database_exists, ensure_student_table};
pub use memory::InMemoryStudentRepository;
pub use postgres::PgStudentRepository;

use crate::error::AppError;
use crate::model::Student;
use crate::page::{Page, PageRequest};
use async_trait::async_trait;

/// Storage for students. `save` inserts when `id` is `None` (the store assigns it) and upserts otherwise.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn save(&self, student: &Student) -> Result<Student, AppError>;
    async fn find_all(&self, request: &PageRequest) -> Result<Page<Student>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError>;
    /// Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
    /// Readiness check.
    async fn ping(&self) -> Result<(), AppError>;
}
