//! Author endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::Book,
    },
};

/// List authors (by last name, first name)
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}

/// List the books of an author
#[utoipa::path(
    get,
    path = "/authors/{id}/books",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Books by this author", body = Vec<Book>),
        (status = 404, description = "Author not found")
    )
)]
pub async fn list_author_books(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.authors.get_books(id).await?;
    Ok(Json(books))
}

/// Create author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.authors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Update author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.update(id, &data).await?;
    Ok(Json(author))
}

/// Delete author (their books are kept, with no author)
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
