//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod enums;
pub mod genre;

// Re-export commonly used types
pub use author::Author;
pub use book::{genre_display, Book, BookDetails};
pub use book_instance::{BookInstance, BookInstanceDetails};
pub use enums::LoanStatus;
pub use genre::Genre;
