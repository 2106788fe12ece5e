//! Book service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookDetails, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get book with author, genres and display helpers
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    pub async fn create(&self, data: &CreateBook) -> AppResult<BookDetails> {
        data.validate()?;
        let book = self.repository.books.create(data).await?;
        tracing::info!("Created book {} ({})", book.id, book);
        self.repository.books.get_details(book.id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<BookDetails> {
        data.validate()?;
        self.repository.books.update(id, data).await?;
        self.repository.books.get_details(id).await
    }

    /// Delete a book; its copies are kept without book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}
