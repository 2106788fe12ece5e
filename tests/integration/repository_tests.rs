//! Repository integration tests (need PostgreSQL at DATABASE_URL)
//!
//! Run with: cargo test --test repository_tests -- --ignored --test-threads=1

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;

use locallibrary::{
    models::{
        author::{CreateAuthor, UpdateAuthor},
        book::{CreateBook, UpdateBook},
        book_instance::{BookInstanceQuery, CreateBookInstance, UpdateBookInstance},
        genre::CreateGenre,
        LoanStatus,
    },
    repository::Repository,
    services::index::index_counts,
    AppError,
};

async fn repository() -> Repository {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

fn new_author(last_name: &str) -> CreateAuthor {
    CreateAuthor {
        first_name: "Test".to_string(),
        last_name: last_name.to_string(),
        date_of_birth: None,
        date_of_death: None,
    }
}

fn new_book(title: &str, author_id: Option<i32>, genre_ids: Vec<i32>) -> CreateBook {
    CreateBook {
        title: title.to_string(),
        author_id,
        summary: String::new(),
        isbn: "0000000000000".to_string(),
        genre_ids,
    }
}

fn new_copy(book_id: i32, due_back: Option<NaiveDate>, status: LoanStatus) -> CreateBookInstance {
    CreateBookInstance {
        book_id: Some(book_id),
        imprint: "Test imprint".to_string(),
        due_back,
        status,
    }
}

#[tokio::test]
#[ignore]
async fn test_deleting_author_nulls_book_reference() {
    let repo = repository().await;

    let author = repo.authors.create(&new_author("Orphaned")).await.unwrap();
    let book = repo
        .books
        .create(&new_book("Left behind", Some(author.id), vec![]))
        .await
        .unwrap();
    assert_eq!(book.author_id, Some(author.id));

    repo.authors.delete(author.id).await.unwrap();

    let book = repo.books.get_by_id(book.id).await.unwrap();
    assert_eq!(book.author_id, None);
    assert!(matches!(
        repo.authors.get_by_id(author.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore]
async fn test_authors_listed_by_last_then_first_name() {
    let repo = repository().await;

    let mut ids = Vec::new();
    for (first_name, last_name) in [("Zora", "Adams"), ("Amy", "Baker"), ("Bob", "Adams")] {
        let author = repo
            .authors
            .create(&CreateAuthor {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap();
        ids.push(author.id);
    }

    let listed: Vec<String> = repo
        .authors
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|a| ids.contains(&a.id))
        .map(|a| a.to_string())
        .collect();
    assert_eq!(listed, vec!["Adams, Bob", "Adams, Zora", "Baker, Amy"]);
}

#[tokio::test]
#[ignore]
async fn test_author_update_clears_date_only_when_null() {
    let repo = repository().await;

    let born = NaiveDate::from_ymd_opt(1907, 8, 6);
    let died = NaiveDate::from_ymd_opt(1998, 1, 1);
    let author = repo
        .authors
        .create(&CreateAuthor {
            first_name: "Dated".to_string(),
            last_name: "Author".to_string(),
            date_of_birth: born,
            date_of_death: died,
        })
        .await
        .unwrap();

    // Absent date fields are left alone
    let renamed = repo
        .authors
        .update(
            author.id,
            &UpdateAuthor {
                first_name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.first_name, "Renamed");
    assert_eq!(renamed.date_of_death, died);

    // Explicit null clears the column
    let cleared = repo
        .authors
        .update(
            author.id,
            &UpdateAuthor {
                date_of_death: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.date_of_death, None);
    assert_eq!(cleared.date_of_birth, born);

    let stored = repo.authors.get_by_id(author.id).await.unwrap();
    assert_eq!(stored.date_of_death, None);
    assert_eq!(stored.first_name, "Renamed");
}

#[tokio::test]
#[ignore]
async fn test_deleting_book_keeps_copies() {
    let repo = repository().await;

    let book = repo.books.create(&new_book("Short lived", None, vec![])).await.unwrap();
    let copy = repo
        .book_instances
        .create(&new_copy(book.id, None, LoanStatus::Available))
        .await
        .unwrap();

    repo.books.delete(book.id).await.unwrap();

    let copy = repo.book_instances.get_by_id(copy.id).await.unwrap();
    assert_eq!(copy.instance.book_id, None);
    assert_eq!(copy.book_title, None);
    assert!(copy.describe().is_err());
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_records() {
    let repo = repository().await;

    assert!(matches!(repo.authors.delete(i32::MAX).await, Err(AppError::NotFound(_))));
    assert!(matches!(repo.books.delete(i32::MAX).await, Err(AppError::NotFound(_))));
    assert!(matches!(
        repo.book_instances.delete(uuid::Uuid::new_v4()).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore]
async fn test_genres_keep_assignment_order() {
    let repo = repository().await;

    let mut ids = Vec::new();
    for name in ["Fiction", "Drama", "History", "Mystery"] {
        let genre = repo
            .genres
            .create(&CreateGenre { name: name.to_string() })
            .await
            .unwrap();
        ids.push(genre.id);
    }

    let book = repo.books.create(&new_book("Genre soup", None, ids.clone())).await.unwrap();
    let details = repo.books.get_details(book.id).await.unwrap();
    assert_eq!(details.genre_display, "Fiction, Drama, History");
    assert_eq!(details.genres.len(), 4);

    // Replace with a reversed, duplicated list
    let update = UpdateBook {
        genre_ids: Some(vec![ids[3], ids[2], ids[3]]),
        ..Default::default()
    };
    repo.books.update(book.id, &update).await.unwrap();
    let details = repo.books.get_details(book.id).await.unwrap();
    assert_eq!(details.genre_display, "Mystery, History");

    // Deleting a genre only drops the association
    repo.genres.delete(ids[3]).await.unwrap();
    let details = repo.books.get_details(book.id).await.unwrap();
    assert_eq!(details.genre_display, "History");
    assert_eq!(details.book.title, "Genre soup");
}

#[tokio::test]
#[ignore]
async fn test_copies_ordered_by_due_back_nulls_last() {
    let repo = repository().await;

    let book = repo.books.create(&new_book("Ordered", None, vec![])).await.unwrap();
    let dates = [
        NaiveDate::from_ymd_opt(2024, 5, 1),
        None,
        NaiveDate::from_ymd_opt(2024, 1, 15),
        NaiveDate::from_ymd_opt(2024, 3, 9),
    ];
    for due_back in dates {
        repo.book_instances
            .create(&new_copy(book.id, due_back, LoanStatus::OnLoan))
            .await
            .unwrap();
    }

    let query = BookInstanceQuery {
        book_id: Some(book.id),
        ..Default::default()
    };
    let copies = repo.book_instances.list(&query).await.unwrap();
    let due: Vec<_> = copies.iter().map(|c| c.instance.due_back).collect();
    assert_eq!(
        due,
        vec![
            NaiveDate::from_ymd_opt(2024, 1, 15),
            NaiveDate::from_ymd_opt(2024, 3, 9),
            NaiveDate::from_ymd_opt(2024, 5, 1),
            None,
        ]
    );
}

#[tokio::test]
#[ignore]
async fn test_status_filter_and_partial_update() {
    let repo = repository().await;

    let book = repo.books.create(&new_book("Filtered", None, vec![])).await.unwrap();
    let copy = repo
        .book_instances
        .create(&CreateBookInstance {
            book_id: Some(book.id),
            imprint: "First".to_string(),
            due_back: None,
            status: LoanStatus::default(),
        })
        .await
        .unwrap();
    assert_eq!(copy.status, LoanStatus::Maintenance);

    let update = UpdateBookInstance {
        status: Some(LoanStatus::Reserved),
        ..Default::default()
    };
    let updated = repo.book_instances.update(copy.id, &update).await.unwrap();
    assert_eq!(updated.status, LoanStatus::Reserved);
    assert_eq!(updated.imprint, "First");

    let query = BookInstanceQuery {
        status: Some(LoanStatus::Reserved),
        book_id: Some(book.id),
    };
    let reserved = repo.book_instances.list(&query).await.unwrap();
    assert_eq!(reserved.len(), 1);
    assert_eq!(reserved[0].instance.id, copy.id);

    let query = BookInstanceQuery {
        status: Some(LoanStatus::Available),
        book_id: Some(book.id),
    };
    assert!(repo.book_instances.list(&query).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_index_counts_track_inserts() {
    let repo = repository().await;
    let before = index_counts(&repo).await.unwrap();

    let mut authors = Vec::new();
    for name in ["One", "Two"] {
        authors.push(repo.authors.create(&new_author(name)).await.unwrap());
    }
    let mut books = Vec::new();
    for i in 0..5 {
        let author_id = Some(authors[i % 2].id);
        books.push(
            repo.books
                .create(&new_book(&format!("Counted {}", i), author_id, vec![]))
                .await
                .unwrap(),
        );
    }
    for i in 0..10 {
        let status = if i < 3 { LoanStatus::Available } else { LoanStatus::OnLoan };
        repo.book_instances
            .create(&new_copy(books[i % 5].id, None, status))
            .await
            .unwrap();
    }

    let after = index_counts(&repo).await.unwrap();
    assert_eq!(after.num_books - before.num_books, 5);
    assert_eq!(after.num_instances - before.num_instances, 10);
    assert_eq!(after.num_instances_available - before.num_instances_available, 3);
    assert_eq!(after.num_author - before.num_author, 2);
}
