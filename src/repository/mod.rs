//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::LoanStatus};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub genres: genres::GenresRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Record counts the index report is built from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCounts: Send + Sync {
    async fn count_books(&self) -> AppResult<i64>;
    async fn count_book_instances(&self) -> AppResult<i64>;
    async fn count_book_instances_with_status(&self, status: LoanStatus) -> AppResult<i64>;
    async fn count_authors(&self) -> AppResult<i64>;
}

#[async_trait]
impl CatalogCounts for Repository {
    async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    async fn count_book_instances(&self) -> AppResult<i64> {
        self.book_instances.count().await
    }

    async fn count_book_instances_with_status(&self, status: LoanStatus) -> AppResult<i64> {
        self.book_instances.count_by_status(status).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors.count().await
    }
}
