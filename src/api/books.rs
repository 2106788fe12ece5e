//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookDetails, CreateBook, UpdateBook},
};

/// List books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book details (author, genres, genre summary, canonical url)
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.books.get_details(id).await?;
    Ok(Json(book))
}

/// Create book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookDetails),
        (status = 400, description = "Invalid input or unknown author/genre")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookDetails>)> {
    let book = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBook>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(book))
}

/// Delete book (its copies are kept, with no book)
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
