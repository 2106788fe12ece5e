//! Landing page report: aggregate catalog counts

use crate::{
    api::index::IndexResponse,
    error::AppResult,
    models::LoanStatus,
    repository::{CatalogCounts, Repository},
};

/// Compute the landing page counts from `store`.
///
/// Each count is an independent read; they are issued concurrently.
pub async fn index_counts<S>(store: &S) -> AppResult<IndexResponse>
where
    S: CatalogCounts + ?Sized,
{
    let (num_books, num_instances, num_instances_available, num_author) = tokio::try_join!(
        store.count_books(),
        store.count_book_instances(),
        store.count_book_instances_with_status(LoanStatus::Available),
        store.count_authors(),
    )?;

    Ok(IndexResponse {
        num_books,
        num_instances,
        num_instances_available,
        num_author,
    })
}

#[derive(Clone)]
pub struct IndexService {
    repository: Repository,
}

impl IndexService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_counts(&self) -> AppResult<IndexResponse> {
        index_counts(&self.repository).await
    }
}
