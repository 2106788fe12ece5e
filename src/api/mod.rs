//! API handlers for the LocalLibrary REST endpoints

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod index;
pub mod openapi;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    models::{author::AUTHOR_DETAIL_ROUTE, book::BOOK_DETAIL_ROUTE},
    AppState,
};

/// CORS layer for the configured origins; any origin when none are listed
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let wildcard = server.cors_origins.iter().any(|origin| origin == "*");
    let allow_origin = if origins.is_empty() || wildcard {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Home page counts
        .route("/index", get(index::get_index))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/authors", post(authors::create_author))
        .route("/authors/:id", get(authors::get_author))
        .route("/authors/:id", put(authors::update_author))
        .route("/authors/:id", delete(authors::delete_author))
        .route("/authors/:id/books", get(authors::list_author_books))
        // Genres
        .route("/genres", get(genres::list_genres))
        .route("/genres", post(genres::create_genre))
        .route("/genres/:id", get(genres::get_genre))
        .route("/genres/:id", put(genres::update_genre))
        .route("/genres/:id", delete(genres::delete_genre))
        // Books
        .route("/books", get(books::list_books))
        .route("/books", post(books::create_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id", put(books::update_book))
        .route("/books/:id", delete(books::delete_book))
        // Book instances
        .route("/book-instances", get(book_instances::list_book_instances))
        .route("/book-instances", post(book_instances::create_book_instance))
        .route("/book-instances/:id", get(book_instances::get_book_instance))
        .route("/book-instances/:id", put(book_instances::update_book_instance))
        .route("/book-instances/:id", delete(book_instances::delete_book_instance))
        .with_state(state.clone());

    // Canonical detail paths built by Book::absolute_url / Author::absolute_url
    let catalog = Router::new()
        .route(BOOK_DETAIL_ROUTE, get(books::get_book))
        .route(AUTHOR_DETAIL_ROUTE, get(authors::get_author))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(catalog)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
