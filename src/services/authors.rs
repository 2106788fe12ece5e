//! Author service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::Book,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Books written by an author
    pub async fn get_books(&self, id: i32) -> AppResult<Vec<Book>> {
        // Verify author exists
        self.repository.authors.get_by_id(id).await?;
        self.repository.books.list_by_author(id).await
    }

    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors.create(data).await?;
        tracing::info!("Created author {} ({})", author.id, author);
        Ok(author)
    }

    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        data.validate()?;
        self.repository.authors.update(id, data).await
    }

    /// Delete an author; their books are kept without author
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(())
    }
}
