//! Student CRUD on top of a repository.

use super::validation::StudentValidator;
use crate::error::AppError;
use crate::model::Student;
use crate::page::{Page, PageRequest};
use crate::store::StudentRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        StudentService { repository }
    }

    /// Validate then insert (no id) or upsert (id present). Returns the stored row.
    pub async fn save(&self, student: &Student) -> Result<Student, AppError> {
        StudentValidator::validate(student)?;
        let mut student = student.clone();
        student.name = student.name.trim().to_string();
        self.repository.save(&student).await
    }

    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<Student>, AppError> {
        self.repository.find_all(request).await
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<Student>, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete_by_id(id).await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
