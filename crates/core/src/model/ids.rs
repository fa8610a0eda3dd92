use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectIdError {
    #[error("subject id is empty")]
    Empty,
}

/// Identifier of the account under analysis. Always trimmed and non-empty.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// Account id used when a result has to be rendered without a subject.
    pub const PLACEHOLDER: &'static str = "U20260315007";

    /// Parses raw user input.
    ///
    /// # Errors
    ///
    /// Returns `SubjectIdError::Empty` if the input is blank after trimming.
    pub fn parse(raw: &str) -> Result<Self, SubjectIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SubjectIdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubjectId({})", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SubjectId {
    type Err = SubjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let id = SubjectId::parse("  USER_001\t").unwrap();
        assert_eq!(id.as_str(), "USER_001");
        assert_eq!(id.to_string(), "USER_001");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(SubjectId::parse(""), Err(SubjectIdError::Empty));
        assert_eq!(SubjectId::parse("   \n"), Err(SubjectIdError::Empty));
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: SubjectId = "USER_8829103".parse().unwrap();
        assert_eq!(parsed, SubjectId::parse("USER_8829103").unwrap());
    }
}
