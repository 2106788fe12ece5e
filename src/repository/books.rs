//! Books repository.
//!
//! Genre membership is stored in the `book_genres` association table; its
//! `position` column keeps genres in the order they were assigned.

use std::collections::HashSet;

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetails, CreateBook, UpdateBook},
        genre::Genre,
    },
};

/// Distinct genre ids in first-seen order, paired with their positions
fn genre_positions(genre_ids: &[i32]) -> AppResult<(Vec<i32>, Vec<i32>)> {
    let mut seen = HashSet::with_capacity(genre_ids.len());
    let ids: Vec<i32> = genre_ids.iter().copied().filter(|id| seen.insert(*id)).collect();
    let count = i32::try_from(ids.len())
        .map_err(|_| AppError::BadRequest(format!("Too many genres: {}", ids.len())))?;
    Ok((ids, (0..count).collect()))
}

/// Replace the genre set of a book, preserving the given order.
/// Duplicate ids are ignored after their first occurrence.
async fn replace_genres(conn: &mut PgConnection, book_id: i32, genre_ids: &[i32]) -> AppResult<()> {
    sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
        .bind(book_id)
        .execute(&mut *conn)
        .await?;

    let (ids, positions) = genre_positions(genre_ids)?;
    if ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO book_genres (book_id, genre_id, position)
        SELECT $1, genre_id, position FROM UNNEST($2::int4[], $3::int4[]) AS g(genre_id, position)
        "#,
    )
    .bind(book_id)
    .bind(&ids)
    .bind(&positions)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Books whose author is `author_id`
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE author_id = $1 ORDER BY id")
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Genres of a book in association order
    pub async fn get_genres(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY bg.position, g.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Book with its author and genres
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => {
                sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
                    .bind(author_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let genres = self.get_genres(id).await?;

        Ok(BookDetails::new(book, author, genres))
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create book and its genre associations
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .fetch_one(&mut *tx)
        .await?;

        replace_genres(&mut *tx, book.id, &data.genre_ids).await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Update book fields present in `data`; `genre_ids` replaces the genre set
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

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

        add_field!(data.title, "title");
        add_field!(data.author_id, "author_id");
        add_field!(data.summary, "summary");
        add_field!(data.isbn, "isbn");

        let book = if sets.is_empty() {
            sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        } else {
            let query = format!(
                "UPDATE books SET {} WHERE id = ${} RETURNING *",
                sets.join(", "),
                idx
            );

            let mut builder = sqlx::query_as::<_, Book>(&query);

            macro_rules! bind_field {
                ($field:expr) => {
                    if let Some(ref val) = $field {
                        builder = builder.bind(val);
                    }
                };
            }

            bind_field!(data.title);
            bind_field!(data.author_id);
            bind_field!(data.summary);
            bind_field!(data.isbn);

            builder.bind(id).fetch_optional(&mut *tx).await?
        };

        let book = book.ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        if let Some(ref genre_ids) = data.genre_ids {
            replace_genres(&mut *tx, id, genre_ids).await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Delete book. Its copies are kept and lose their book reference.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query("UPDATE book_instances SET book_id = NULL WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        tx.commit().await?;
        tracing::debug!("Deleted book {}, detached {} instance(s)", id, detached);
        Ok(())
    }
}
