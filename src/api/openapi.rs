//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, genres, health, index};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLibrary API",
        version = "0.1.0",
        description = "Library catalog REST API: books, authors, genres and copies",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Index
        index::get_index,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::list_author_books,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Book instances
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance,
        book_instances::update_book_instance,
        book_instances::delete_book_instance,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Book instances
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::BookInstanceDetails,
            crate::models::book_instance::BookInstanceQuery,
            crate::models::book_instance::CreateBookInstance,
            crate::models::book_instance::UpdateBookInstance,
            crate::models::enums::LoanStatus,
            // Index
            index::IndexResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "index", description = "Home page counts"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "books", description = "Book management"),
        (name = "book-instances", description = "Copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
