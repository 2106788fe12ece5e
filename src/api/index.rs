//! Landing page counts

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Aggregate catalog counts shown on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct IndexResponse {
    /// Total number of books
    pub num_books: i64,
    /// Total number of copies
    pub num_instances: i64,
    /// Copies with status "available"
    pub num_instances_available: i64,
    /// Total number of authors
    pub num_author: i64,
}

/// Home page counts
#[utoipa::path(
    get,
    path = "/index",
    tag = "index",
    responses(
        (status = 200, description = "Catalog counts", body = IndexResponse)
    )
)]
pub async fn get_index(State(state): State<crate::AppState>) -> AppResult<Json<IndexResponse>> {
    let counts = state.services.index.get_counts().await?;
    Ok(Json(counts))
}
