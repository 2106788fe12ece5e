//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book genre (free text, e.g. "Science Fiction")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Create genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenre {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Update genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGenre {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
}
