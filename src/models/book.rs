//! Book model and related types.
//!
//! A book is the bibliographic record; physical copies live in
//! [`BookInstance`](super::book_instance::BookInstance).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{author::Author, genre::Genre};

/// Route the book detail handler is mounted on
pub const BOOK_DETAIL_ROUTE: &str = "/catalog/book/:id";

/// Number of genre names shown by [`genre_display`]
const GENRE_DISPLAY_LIMIT: usize = 3;

/// Full book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Author reference; becomes null when the author is deleted
    pub author_id: Option<i32>,
    pub summary: String,
    /// 13 character ISBN (not checksum-validated)
    pub isbn: String,
}

impl Book {
    /// Canonical detail path for this book
    pub fn absolute_url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// Comma-separated names of the first three genres, in association order
pub fn genre_display<'a, I>(genres: I) -> String
where
    I: IntoIterator<Item = &'a Genre>,
{
    genres
        .into_iter()
        .take(GENRE_DISPLAY_LIMIT)
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Book with its author and genres resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    /// Short genre summary, see [`genre_display`]
    pub genre_display: String,
    pub url: String,
}

impl BookDetails {
    pub fn new(book: Book, author: Option<Author>, genres: Vec<Genre>) -> Self {
        Self {
            genre_display: genre_display(&genres),
            url: book.absolute_url(),
            book,
            author,
            genres,
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub author_id: Option<i32>,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub summary: String,
    #[validate(length(min = 1, max = 13))]
    pub isbn: String,
    /// Genre ids, kept in the given order
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request.
///
/// `genre_ids`, when present, replaces the whole genre set.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub author_id: Option<Option<i32>>,
    #[validate(length(max = 1000))]
    pub summary: Option<String>,
    #[validate(length(min = 1, max = 13))]
    pub isbn: Option<String>,
    pub genre_ids: Option<Vec<i32>>,
}
