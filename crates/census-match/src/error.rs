//! Error types for place-name resolution.

use thiserror::Error;

/// Errors that can occur while resolving a place query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Query split on commas into more than two parts.
    #[error("could not parse place query '{query}': expected \"name\" or \"name, qualifier\"")]
    InvalidQueryFormat { query: String },

    /// No candidate ends with the requested qualifier.
    #[error(
        "no candidate ends with qualifier '{qualifier}' from query '{query}': \
         expected a standard geographic abbreviation, like CA, AZ, NC, or PR"
    )]
    QualifierNotFound { qualifier: String, query: String },

    /// The candidate list was empty.
    #[error("no candidates to match query '{query}' against")]
    NoCandidates { query: String },
}

impl MatchError {
    /// The query that triggered this error.
    pub fn query(&self) -> &str {
        match self {
            Self::InvalidQueryFormat { query }
            | Self::QualifierNotFound { query, .. }
            | Self::NoCandidates { query } => query,
        }
    }
}

/// Result alias for place-name resolution.
pub type Result<T> = std::result::Result<T, MatchError>;
