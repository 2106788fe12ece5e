//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Route the author detail handler is mounted on
pub const AUTHOR_DETAIL_ROUTE: &str = "/catalog/author/:id";

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Date of death ("Died")
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Canonical detail path for this author
    pub fn absolute_url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Update author request.
///
/// Absent fields are left unchanged; dates can be cleared with an explicit `null`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub date_of_death: Option<Option<NaiveDate>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tolkien() -> Author {
        Author {
            id: 7,
            first_name: "John Ronald Reuel".to_string(),
            last_name: "Tolkien".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1892, 1, 3),
            date_of_death: NaiveDate::from_ymd_opt(1973, 9, 2),
        }
    }

    #[test]
    fn test_display_is_last_comma_first() {
        assert_eq!(tolkien().to_string(), "Tolkien, John Ronald Reuel");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(tolkien().absolute_url(), "/catalog/author/7");
    }

    #[test]
    fn test_create_validation_limits() {
        let ok = CreateAuthor {
            first_name: "Ursula".to_string(),
            last_name: "Le Guin".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateAuthor {
            last_name: "x".repeat(101),
            ..ok
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let cleared: UpdateAuthor = serde_json::from_str(r#"{"date_of_death": null}"#).unwrap();
        assert_eq!(cleared.date_of_death, Some(None));
        assert_eq!(cleared.date_of_birth, None);

        let set: UpdateAuthor = serde_json::from_str(r#"{"date_of_birth": "1929-10-21"}"#).unwrap();
        assert_eq!(set.date_of_birth, Some(NaiveDate::from_ymd_opt(1929, 10, 21)));
    }
}
