use super::StudentRepository;
use crate::error::AppError;
use crate::model::Student;
use crate::page::{Page, PageRequest};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Process-local repository used when no database is configured, and by tests.
#[derive(Default)]
pub struct InMemoryStudentRepository {
    inner: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    rows: BTreeMap<i64, Student>,
    last_id: i64,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn save(&self, student: &Student) -> Result<Student, AppError> {
        let mut state = self.inner.write().await;
        let id = match student.id {
            Some(id) => {
                state.last_id = state.last_id.max(id);
                id
            }
            None => {
                state.last_id = state
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| AppError::Internal("id space exhausted".into()))?;
                state.last_id
            }
        };
        let stored = Student {
            id: Some(id),
            ..student.clone()
        };
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Student>, AppError> {
        let state = self.inner.read().await;
        let mut all: Vec<&Student> = state.rows.values().collect();
        all.sort_by(|a, b| request.compare(a, b));
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = all
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, state.rows.len() as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
