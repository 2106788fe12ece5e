//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Availability of a physical copy. DB stores a one character code.
///
/// This is a plain classification: no transitions between values are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    #[default]
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 4] = [
        LoanStatus::Maintenance,
        LoanStatus::OnLoan,
        LoanStatus::Available,
        LoanStatus::Reserved,
    ];

    /// Storage code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            _ => Err(format!("Invalid loan status code: {:?}", s)),
        }
    }
}

// SQLx conversion for LoanStatus
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: &str = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_code(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
    }

    #[test]
    fn test_codes_parse_back() {
        for status in LoanStatus::ALL {
            assert_eq!(status.as_code().parse::<LoanStatus>(), Ok(status));
        }
        assert!("x".parse::<LoanStatus>().is_err());
        assert!("".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn test_json_names() {
        assert_eq!(serde_json::to_string(&LoanStatus::OnLoan).unwrap(), "\"on_loan\"");
        let parsed: LoanStatus = serde_json::from_str("\"available\"").unwrap();
        assert_eq!(parsed, LoanStatus::Available);
    }

    #[test]
    fn test_labels() {
        assert_eq!(LoanStatus::OnLoan.to_string(), "On loan");
        assert_eq!(LoanStatus::Maintenance.to_string(), "Maintenance");
    }
}
