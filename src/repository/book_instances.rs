//! Book instances (physical copies) repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{
            BookInstance, BookInstanceDetails, BookInstanceQuery, CreateBookInstance,
            UpdateBookInstance,
        },
        enums::LoanStatus,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, b.title AS book_title
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List copies ordered by due-back date (copies without one come last)
    pub async fn list(&self, query: &BookInstanceQuery) -> AppResult<Vec<BookInstanceDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("bi.status = ${}", idx));
            idx += 1;
        }
        if query.book_id.is_some() {
            conditions.push(format!("bi.book_id = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY bi.due_back ASC NULLS LAST, bi.id",
            DETAILS_SELECT, where_clause
        );

        let mut builder = sqlx::query_as::<_, BookInstanceDetails>(&sql);
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(book_id) = query.book_id {
            builder = builder.bind(book_id);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get copy by ID, joined with its book title
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstanceDetails> {
        let sql = format!("{} WHERE bi.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, BookInstanceDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Create copy with a freshly generated random id
    pub async fn create(&self, data: &CreateBookInstance) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, imprint, due_back, status
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.due_back)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateBookInstance) -> AppResult<BookInstance> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.book_id, "book_id");
        add_field!(data.imprint, "imprint");
        add_field!(data.due_back, "due_back");
        add_field!(data.status, "status");

        let query = if sets.is_empty() {
            "SELECT id, book_id, imprint, due_back, status FROM book_instances WHERE id = $1"
                .to_string()
        } else {
            format!(
                "UPDATE book_instances SET {} WHERE id = ${} RETURNING id, book_id, imprint, due_back, status",
                sets.join(", "),
                idx
            )
        };

        let mut builder = sqlx::query_as::<_, BookInstance>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.book_id);
        bind_field!(data.imprint);
        bind_field!(data.due_back);
        bind_field!(data.status);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies with exactly this status
    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
