//! Fuzzy place-name resolution for Census candidate lists.
//!
//! Census geographies come back as long display names like
//! `"Springfield city, Illinois"`. This crate matches a user's loose query
//! against such a list and always lands on one candidate, deterministically.
//!
//! # Overview
//!
//! - **Query parsing**: `"name"` or `"name, qualifier"`, where the
//!   qualifier (typically a state abbreviation) filters candidates by
//!   suffix after scoring.
//! - **Two-pass scoring**: a partial ratio ranks candidates, a
//!   whole-string ratio breaks ties at the top score.
//! - **Deterministic ambiguity handling**: a tie that survives both passes
//!   picks the first candidate in supply order, with the full tie reported
//!   through [`TieBreak`] and a `tracing` warning.
//!
//! # Example
//!
//! ```
//! use census_match::PlaceMatcher;
//!
//! let matcher = PlaceMatcher::new();
//! let candidates = [
//!     "Springfield city, IL",
//!     "Springfield town, MA",
//!     "Springfield village, IL",
//! ];
//!
//! let best = matcher.resolve("springfield, il", candidates).unwrap();
//! assert_eq!(best.name, "Springfield city, IL");
//! assert_eq!(best.score, 100.0);
//! ```

mod error;
mod matcher;
mod score;

// Resolution API
pub use matcher::{PlaceMatch, PlaceMatcher, ScoredCandidate, TieBreak};

// Scoring seam
pub use score::{FuzzScorer, SimilarityScorer};

// Errors
pub use error::{MatchError, Result};
