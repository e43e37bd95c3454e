//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user query to be put to the personas (Value Object)
///
/// The content is always trimmed and never empty. Construction goes through
/// [`Query::parse`], so an invalid query cannot reach the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query {
    content: String,
}

impl Query {
    /// Parse raw user input into a query, trimming surrounding whitespace.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the query content
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Query::parse(value)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Query::parse(value)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.content
    }
}
