use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Shortest identifier accepted as a plate number.
pub const MIN_LEN: usize = 4;
/// VIN length, also the upper bound for any identifier.
pub const VIN_LEN: usize = 17;

static VIN_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn vin_pattern() -> &'static Regex {
    // VIN alphabet excludes I, O and Q.
    VIN_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("Static regex pattern is guaranteed to be valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier must be {MIN_LEN}-{VIN_LEN} characters, got {0}")]
    Length(usize),

    #[error("identifier contains unsupported character {0:?}")]
    Character(char),

    #[error("17-character identifier is not a valid VIN")]
    InvalidVin,
}

/// A sanitized vehicle identifier: a VIN or a registration plate.
///
/// Whitespace is stripped and letters are uppercased, so `"aa 1234 bc"`
/// and `"AA1234BC"` are the same query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        if cleaned.is_empty() {
            return Err(QueryError::Empty);
        }

        if let Some(bad) = cleaned.chars().find(|c| !c.is_alphanumeric()) {
            return Err(QueryError::Character(bad));
        }

        let len = cleaned.chars().count();
        if !(MIN_LEN..=VIN_LEN).contains(&len) {
            return Err(QueryError::Length(len));
        }

        if len == VIN_LEN && !vin_pattern().is_match(&cleaned) {
            return Err(QueryError::InvalidVin);
        }

        Ok(Self(cleaned))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is a full VIN rather than a plate number.
    #[must_use]
    pub fn is_vin(&self) -> bool {
        self.0.chars().count() == VIN_LEN
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vin_is_accepted_and_uppercased() {
        let query = Query::parse("  1hgcm82633a004352 ").unwrap();
        assert_eq!(query.as_str(), "1HGCM82633A004352");
        assert!(query.is_vin());
    }

    #[test]
    fn plate_with_spaces_is_compacted() {
        let query = Query::parse("aa 1234 bc").unwrap();
        assert_eq!(query.as_str(), "AA1234BC");
        assert!(!query.is_vin());
    }

    #[test]
    fn cyrillic_plate_is_accepted() {
        let query = Query::parse("аа1234вс").unwrap();
        assert_eq!(query.as_str(), "АА1234ВС");
        assert!(!query.is_vin());
    }

    #[test]
    fn vin_with_forbidden_letters_is_rejected() {
        assert_eq!(
            Query::parse("1HGCM82633O004352"),
            Err(QueryError::InvalidVin)
        );
    }

    #[test]
    fn length_bounds() {
        assert_eq!(Query::parse("AB1"), Err(QueryError::Length(3)));
        assert_eq!(
            Query::parse("1HGCM82633A0043521"),
            Err(QueryError::Length(18))
        );
        assert!(Query::parse("AB12").is_ok());
    }

    #[test]
    fn punctuation_and_empty_are_rejected() {
        assert_eq!(Query::parse("AA-1234"), Err(QueryError::Character('-')));
        assert_eq!(Query::parse("   "), Err(QueryError::Empty));
    }
}
