//! Domain Value Objects
//!
//! Validated field types for todos and categories.

use std::fmt;

use chrono::NaiveDate;

use crate::error::TodoError;

/// Wire and storage format of a due date
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Non-empty, trimmed todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TodoError> {
        let title = input.as_ref().trim();
        if title.is_empty() {
            return Err(TodoError::Validation("Title cannot be empty".to_string()));
        }
        Ok(Self(title.to_string()))
    }

    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Calendar day a todo is due, `YYYY-MM-DD` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DueDate(NaiveDate);

impl DueDate {
    pub fn parse(input: &str) -> Result<Self, TodoError> {
        NaiveDate::parse_from_str(input.trim(), DUE_DATE_FORMAT)
            .map(Self)
            .map_err(|_| {
                TodoError::Validation(format!(
                    "Invalid due date '{input}', expected YYYY-MM-DD"
                ))
            })
    }

    pub fn from_db(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DUE_DATE_FORMAT))
    }
}

/// Non-empty, trimmed category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TodoError> {
        let name = input.as_ref().trim();
        if name.is_empty() {
            return Err(TodoError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Optional free text where the empty string means "not set"
pub fn optional_text(input: Option<String>) -> Option<String> {
    input.filter(|s| !s.trim().is_empty())
}
