//! Genre service

use validator::Validate;

use crate::{
    error::AppResult,
    models::genre::{CreateGenre, Genre, UpdateGenre},
    repository::Repository,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateGenre) -> AppResult<Genre> {
        data.validate()?;
        let genre = self.repository.genres.create(data).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre);
        Ok(genre)
    }

    pub async fn update(&self, id: i32, data: &UpdateGenre) -> AppResult<Genre> {
        data.validate()?;
        self.repository.genres.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(())
    }
}
