//! Display Name Value Object
//!
//! Free-form name shown alongside an account. Not unique, not a login key.
//!
//! NFKC normalized and trimmed before validation; case is preserved.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::AuthError;

/// Maximum length in characters (after normalization)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, AuthError> {
        let normalized = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if normalized.is_empty() {
            return Err(AuthError::Validation("Name cannot be empty".to_string()));
        }

        let length = normalized.chars().count();
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Name is too long ({length} chars, maximum {DISPLAY_NAME_MAX_LENGTH})"
            )));
        }

        if normalized.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Name contains invalid control characters".to_string(),
            ));
        }

        Ok(Self(normalized))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_normalization() {
        let name = DisplayName::new("  Ａｌｉｃｅ  ").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_display_name_preserves_case_and_spaces() {
        let name = DisplayName::new("Mary Jane").unwrap();
        assert_eq!(name.as_str(), "Mary Jane");
    }

    #[test]
    fn test_display_name_invalid() {
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("bad\u{0000}name").is_err());
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX_LENGTH + 1)).is_err());
    }
}
