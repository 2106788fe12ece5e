//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::LoanStatus;
use crate::error::{AppError, AppResult};

/// One loanable copy of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    /// Unique id for this copy across the whole library
    pub id: Uuid,
    /// Book reference; becomes null when the book is deleted
    pub book_id: Option<i32>,
    /// Publisher / edition details
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
}

/// Copy joined with the title of its book
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookInstanceDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub instance: BookInstance,
    pub book_title: Option<String>,
    /// "{id} ({book title})", absent when the copy has no book
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BookInstanceDetails {
    /// Display string "{id} ({book title})".
    ///
    /// Fails when the copy is not attached to a book.
    pub fn describe(&self) -> AppResult<String> {
        let title = self.book_title.as_deref().ok_or_else(|| {
            AppError::NotFound(format!("Book instance {} has no book", self.instance.id))
        })?;
        Ok(format!("{} ({})", self.instance.id, title))
    }

    /// Fill `label` from [`describe`](Self::describe)
    pub fn with_label(mut self) -> Self {
        self.label = self.describe().ok();
        self
    }
}

/// Book instance list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookInstanceQuery {
    /// Exact status match
    pub status: Option<LoanStatus>,
    pub book_id: Option<i32>,
}

/// Create book instance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    /// Defaults to maintenance
    #[serde(default)]
    pub status: LoanStatus,
}

/// Update book instance request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBookInstance {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub book_id: Option<Option<i32>>,
    #[validate(length(min = 1, max = 200))]
    pub imprint: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub due_back: Option<Option<NaiveDate>>,
    pub status: Option<LoanStatus>,
}
