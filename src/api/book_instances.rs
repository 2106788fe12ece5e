//! Book instance (copy) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::{
        BookInstanceDetails, BookInstanceQuery, CreateBookInstance, UpdateBookInstance,
    },
};

/// List copies ordered by due-back date
#[utoipa::path(
    get,
    path = "/book-instances",
    tag = "book-instances",
    params(BookInstanceQuery),
    responses(
        (status = 200, description = "List of copies", body = Vec<BookInstanceDetails>)
    )
)]
pub async fn list_book_instances(
    State(state): State<crate::AppState>,
    Query(query): Query<BookInstanceQuery>,
) -> AppResult<Json<Vec<BookInstanceDetails>>> {
    let instances = state.services.book_instances.list(&query).await?;
    Ok(Json(instances))
}

/// Get copy by ID
#[utoipa::path(
    get,
    path = "/book-instances/{id}",
    tag = "book-instances",
    params(("id" = Uuid, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy details", body = BookInstanceDetails),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstanceDetails>> {
    let instance = state.services.book_instances.get_by_id(id).await?;
    Ok(Json(instance))
}

/// Create copy
#[utoipa::path(
    post,
    path = "/book-instances",
    tag = "book-instances",
    request_body = CreateBookInstance,
    responses(
        (status = 201, description = "Copy created", body = BookInstanceDetails),
        (status = 400, description = "Invalid input or unknown book")
    )
)]
pub async fn create_book_instance(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBookInstance>,
) -> AppResult<(StatusCode, Json<BookInstanceDetails>)> {
    let instance = state.services.book_instances.create(&data).await?;
    Ok((StatusCode::CREATED, Json(instance)))
}

/// Update copy
#[utoipa::path(
    put,
    path = "/book-instances/{id}",
    tag = "book-instances",
    params(("id" = Uuid, Path, description = "Copy ID")),
    request_body = UpdateBookInstance,
    responses(
        (status = 200, description = "Copy updated", body = BookInstanceDetails),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateBookInstance>,
) -> AppResult<Json<BookInstanceDetails>> {
    let instance = state.services.book_instances.update(id, &data).await?;
    Ok(Json(instance))
}

/// Delete copy
#[utoipa::path(
    delete,
    path = "/book-instances/{id}",
    tag = "book-instances",
    params(("id" = Uuid, Path, description = "Copy ID")),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.book_instances.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
