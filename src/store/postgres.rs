use super::StudentRepository;
use crate::error::AppError;
use crate::model::Student;
use crate::page::{Page, PageRequest};
use crate::sql::StudentSql;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL-backed repository. Ids come from the table's BIGSERIAL sequence.
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
    sql: StudentSql,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgStudentRepository {
            pool,
            sql: StudentSql::new(schema),
        }
    }

    async fn insert(&self, student: &Student) -> Result<Student, AppError> {
        let sql = self.sql.insert();
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.birth_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn upsert(&self, id: i64, student: &Student) -> Result<Student, AppError> {
        let sql = self.sql.upsert();
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.birth_date)
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query(&self.sql.advance_sequence())
            .bind(self.sql.table())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn save(&self, student: &Student) -> Result<Student, AppError> {
        match student.id {
            None => self.insert(student).await,
            Some(id) => self.upsert(id, student).await,
        }
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Student>, AppError> {
        let sql = self.sql.select_page(request);
        tracing::debug!(sql = %sql, page = request.page, size = request.size, "query");
        let limit = i64::from(request.size);
        let offset = i64::try_from(request.offset())
            .map_err(|_| AppError::BadRequest("page offset out of range".into()))?;
        let content = sqlx::query_as::<_, Student>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let (total,): (i64,) = sqlx::query_as(&self.sql.count()).fetch_one(&self.pool).await?;
        Ok(Page::new(content, request, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = self.sql.select_by_id();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let sql = self.sql.delete_by_id();
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
