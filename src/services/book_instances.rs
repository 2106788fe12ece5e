//! Book instance (copy) service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book_instance::{
        BookInstanceDetails, BookInstanceQuery, CreateBookInstance, UpdateBookInstance,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List copies, optionally filtered by exact status and/or book
    pub async fn list(&self, query: &BookInstanceQuery) -> AppResult<Vec<BookInstanceDetails>> {
        let rows = self.repository.book_instances.list(query).await?;
        Ok(rows.into_iter().map(BookInstanceDetails::with_label).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstanceDetails> {
        let details = self.repository.book_instances.get_by_id(id).await?;
        Ok(details.with_label())
    }

    pub async fn create(&self, data: &CreateBookInstance) -> AppResult<BookInstanceDetails> {
        data.validate()?;
        let instance = self.repository.book_instances.create(data).await?;
        tracing::info!("Created book instance {} (status: {})", instance.id, instance.status);
        self.get_by_id(instance.id).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateBookInstance) -> AppResult<BookInstanceDetails> {
        data.validate()?;
        self.repository.book_instances.update(id, data).await?;
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.book_instances.delete(id).await?;
        tracing::info!("Deleted book instance {}", id);
        Ok(())
    }
}
