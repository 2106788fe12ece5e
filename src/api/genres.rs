//! Genre endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::genre::{CreateGenre, Genre, UpdateGenre},
};

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "List of genres", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.genres.list().await?;
    Ok(Json(genres))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.get_by_id(id).await?;
    Ok(Json(genre))
}

/// Create genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = CreateGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let genre = state.services.genres.create(&data).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// Rename genre
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = UpdateGenre,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateGenre>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.update(id, &data).await?;
    Ok(Json(genre))
}

/// Delete genre
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.genres.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
