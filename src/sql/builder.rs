//! Builds parameterized statements for the students table.

use crate::page::PageRequest;

/// Quote identifier for PostgreSQL (safe: only from code or config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

pub const STUDENT_TABLE: &str = "students";

const SELECT_COLUMNS: &str = "\"id\", \"name\", \"email\", \"birth_date\"";

/// Statements for the students table in one schema.
#[derive(Clone, Debug)]
pub struct StudentSql {
    table: String,
}

impl StudentSql {
    pub fn new(schema: &str) -> Self {
        StudentSql {
            table: qualified_table(schema, STUDENT_TABLE),
        }
    }

    /// Schema-qualified, quoted table name (also accepted by `pg_get_serial_sequence`).
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn create_table(&self) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                "id" BIGSERIAL PRIMARY KEY,
                "name" TEXT NOT NULL,
                "email" TEXT,
                "birth_date" DATE
            )
            "#,
            self.table
        )
    }

    /// SELECT by primary key. Caller binds id as $1.
    pub fn select_by_id(&self) -> String {
        format!("SELECT {} FROM {} WHERE \"id\" = $1", SELECT_COLUMNS, self.table)
    }

    /// SELECT one page. ORDER BY comes from whitelisted fields; caller binds LIMIT $1 and OFFSET $2.
    pub fn select_page(&self, request: &PageRequest) -> String {
        let order = request
            .effective_sort()
            .iter()
            .map(|o| {
                let column = quoted(o.field.column());
                if o.field.is_text() {
                    format!("LOWER({}) {}", column, o.direction.sql())
                } else {
                    format!("{} {}", column, o.direction.sql())
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "SELECT {} FROM {} ORDER BY {} LIMIT $1 OFFSET $2",
            SELECT_COLUMNS, self.table, order
        )
    }

    pub fn count(&self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.table)
    }

    /// INSERT without id; the sequence assigns it. Binds name, email, birth_date.
    pub fn insert(&self) -> String {
        format!(
            "INSERT INTO {} (\"name\", \"email\", \"birth_date\") VALUES ($1, $2, $3) RETURNING {}",
            self.table, SELECT_COLUMNS
        )
    }

    /// INSERT with explicit id, updating every column on conflict. Binds id, name, email, birth_date.
    pub fn upsert(&self) -> String {
        format!(
            "INSERT INTO {} (\"id\", \"name\", \"email\", \"birth_date\") VALUES ($1, $2, $3, $4) \
             ON CONFLICT (\"id\") DO UPDATE SET \"name\" = EXCLUDED.\"name\", \"email\" = EXCLUDED.\"email\", \
             \"birth_date\" = EXCLUDED.\"birth_date\" RETURNING {}",
            self.table, SELECT_COLUMNS
        )
    }

    /// Moves the id sequence to at least $2 so later inserts never collide with an explicit id.
    /// Caller binds the table name as $1.
    pub fn advance_sequence(&self) -> String {
        "SELECT setval(pg_get_serial_sequence($1, 'id'), GREATEST($2, nextval(pg_get_serial_sequence($1, 'id')) - 1, 1))"
            .to_string()
    }

    pub fn delete_by_id(&self) -> String {
        format!("DELETE FROM {} WHERE \"id\" = $1", self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentField;
    use crate::page::SortOrder;

    #[test]
    fn table_name_is_quoted_and_qualified() {
        let sql = StudentSql::new("school");
        assert_eq!(sql.table(), "\"school\".\"students\"");
        let odd = StudentSql::new("we\"ird");
        assert_eq!(odd.table(), "\"we\"\"ird\".\"students\"");
    }

    #[test]
    fn page_query_orders_by_requested_fields_then_id() {
        let sql = StudentSql::new("public");
        let req = PageRequest::new(2, 10).with_sort(SortOrder::desc(StudentField::BirthDate));
        assert_eq!(
            sql.select_page(&req),
            "SELECT \"id\", \"name\", \"email\", \"birth_date\" FROM \"public\".\"students\" \
             ORDER BY \"birth_date\" DESC, \"id\" ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn default_page_query_orders_by_id() {
        let sql = StudentSql::new("public");
        assert!(sql.select_page(&PageRequest::default()).contains("ORDER BY \"id\" ASC LIMIT"));
    }

    #[test]
    fn text_sorts_ignore_case() {
        let sql = StudentSql::new("public");
        let req = PageRequest::new(0, 5).with_sort(SortOrder::asc(StudentField::Name));
        assert!(sql
            .select_page(&req)
            .contains("ORDER BY LOWER(\"name\") ASC, \"id\" ASC LIMIT"));
    }

    #[test]
    fn insert_leaves_id_to_the_sequence() {
        let sql = StudentSql::new("public").insert();
        assert_eq!(
            sql,
            "INSERT INTO \"public\".\"students\" (\"name\", \"email\", \"birth_date\") VALUES ($1, $2, $3) \
             RETURNING \"id\", \"name\", \"email\", \"birth_date\""
        );
    }

    #[test]
    fn sequence_advance_never_moves_backwards() {
        let sql = StudentSql::new("public").advance_sequence();
        assert!(sql.starts_with("SELECT setval(pg_get_serial_sequence($1, 'id'), GREATEST($2, "));
        assert!(sql.contains("nextval(pg_get_serial_sequence($1, 'id')) - 1, 1)"));
        assert_eq!(sql.matches('$').count(), 3);
    }

    #[test]
    fn upsert_targets_primary_key() {
        let sql = StudentSql::new("public").upsert();
        assert!(sql.contains("ON CONFLICT (\"id\") DO UPDATE"));
        assert!(sql.ends_with("RETURNING \"id\", \"name\", \"email\", \"birth_date\""));
    }
}
