//! Book domain entity and its input validation.

use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_AUTHOR, FIELD_PUBLICATION_YEAR, FIELD_TITLE, MIN_PUBLICATION_YEAR};
use crate::error::{DomainError, DomainResult, FieldErrors};

/// Book domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Book {
    /// Server-assigned identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i32,
    #[cfg_attr(feature = "openapi", schema(example = "Dune"))]
    pub title: String,
    #[cfg_attr(feature = "openapi", schema(example = "Frank Herbert"))]
    pub author: String,
    #[cfg_attr(feature = "openapi", schema(example = 1965))]
    pub publication_year: i32,
}

/// Unvalidated book input as received from a client.
///
/// Every field is optional so that all missing fields can be reported
/// together by [`BookDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookDraft {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Dune"))]
    pub title: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Frank Herbert"))]
    pub author: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = 1965))]
    pub publication_year: Option<i32>,
}

/// Book fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, publication_year: i32) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            publication_year: Some(publication_year),
        }
    }

    /// Validate every field, collecting all failures into one error.
    pub fn validate(self) -> DomainResult<NewBook> {
        let mut errors = FieldErrors::new();

        let title = required_text(self.title, FIELD_TITLE, "Title is required", &mut errors);
        let author = required_text(self.author, FIELD_AUTHOR, "Author is required", &mut errors);

        let publication_year = match self.publication_year {
            None => {
                errors.insert(
                    FIELD_PUBLICATION_YEAR.to_string(),
                    "Publication year is required".to_string(),
                );
                None
            }
            Some(year) if year < MIN_PUBLICATION_YEAR => {
                errors.insert(
                    FIELD_PUBLICATION_YEAR.to_string(),
                    format!("Publication year must be at least {}", MIN_PUBLICATION_YEAR),
                );
                None
            }
            Some(year) => Some(year),
        };

        match (title, author, publication_year) {
            (Some(title), Some(author), Some(publication_year)) if errors.is_empty() => {
                Ok(NewBook {
                    title,
                    author,
                    publication_year,
                })
            }
            _ => Err(DomainError::InvalidFields(errors)),
        }
    }
}

fn required_text(
    value: Option<String>,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            errors.insert(field.to_string(), message.to_string());
            None
        }
    }
}

impl NewBook {
    /// Attach the identifier assigned by storage.
    pub fn with_id(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
        }
    }
}
