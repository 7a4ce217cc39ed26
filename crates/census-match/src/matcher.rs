//! Place-name resolution with deterministic tie-breaking.
//!
//! A query like `"Springfield, IL"` is split into a place name and an
//! optional qualifier. Every candidate is scored against the name with a
//! partial (substring-aware) ratio, candidates that do not end with the
//! qualifier are dropped, and the best-scoring survivor wins. Ties at the
//! top score are narrowed with a whole-string ratio; a tie that survives
//! both passes is resolved by candidate order and reported through
//! [`TieBreak::tied`] plus a `tracing` warning, never an error.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::score::{FuzzScorer, SimilarityScorer};

/// A candidate paired with its partial-similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Candidate text exactly as supplied.
    pub name: String,
    /// Partial similarity to the query name (0-100).
    pub score: f64,
}

/// Outcome of the whole-string tie-break pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieBreak {
    /// Whole-string similarity of the selected candidate (0-100).
    pub full_score: f64,
    /// Candidates still tied after whole-string scoring, in candidate
    /// order, the selected one included. Empty when the pass was decisive.
    pub tied: Vec<String>,
}

/// The single best match for a place query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceMatch {
    /// Matched candidate exactly as supplied.
    pub name: String,
    /// Partial similarity between the query name and this candidate
    /// (0-100), the maximum over every candidate that was considered.
    pub score: f64,
    /// Present only when several candidates shared the top score.
    pub tie_break: Option<TieBreak>,
}

impl PlaceMatch {
    /// True when candidate order had to decide the match because both
    /// scoring passes tied.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.tie_break.as_ref().is_some_and(|tie| !tie.tied.is_empty())
    }
}

/// Resolves place queries against a list of candidate place names.
///
/// Queries take the form `"name"` or `"name, qualifier"`, where the
/// qualifier is a suffix filter such as a state abbreviation. Matching is
/// ASCII-case-insensitive and ignores surrounding whitespace; candidates
/// come back exactly as supplied.
///
/// # Example
///
/// ```
/// use census_match::PlaceMatcher;
///
/// let matcher = PlaceMatcher::new();
/// let candidates = ["Springfield city, IL", "Springfield town, MA"];
/// let best = matcher.resolve("Springfield, IL", candidates).unwrap();
/// assert_eq!(best.name, "Springfield city, IL");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlaceMatcher<S = FuzzScorer> {
    scorer: S,
}

impl PlaceMatcher<FuzzScorer> {
    /// Create a matcher with the default `rapidfuzz` scorer.
    #[must_use]
    pub fn new() -> Self {
        Self { scorer: FuzzScorer }
    }
}

impl<S: SimilarityScorer> PlaceMatcher<S> {
    /// Create a matcher with a caller-supplied scorer.
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    /// Resolve `query` to the best-matching candidate.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidQueryFormat`] when the query has more
    /// than one comma, [`MatchError::QualifierNotFound`] when a qualifier
    /// filters out every candidate, and [`MatchError::NoCandidates`] when
    /// the candidate list is empty.
    pub fn resolve<I, T>(&self, query: &str, candidates: I) -> Result<PlaceMatch>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let (best, _) = self.resolve_inner(query, candidates)?;
        Ok(best)
    }

    /// Resolve `query` and also return every considered candidate with its
    /// score, sorted by ascending score.
    ///
    /// When the query carries a qualifier the table only contains the
    /// candidates that survived the qualifier filter.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PlaceMatcher::resolve`].
    pub fn resolve_with_scores<I, T>(
        &self,
        query: &str,
        candidates: I,
    ) -> Result<(PlaceMatch, Vec<ScoredCandidate>)>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let (best, mut scored) = self.resolve_inner(query, candidates)?;
        scored.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
        Ok((best, scored))
    }

    fn resolve_inner<I, T>(
        &self,
        query: &str,
        candidates: I,
    ) -> Result<(PlaceMatch, Vec<ScoredCandidate>)>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let (name_part, qualifier_part) = split_query(query)?;
        let name = normalize(name_part);

        // Score against the bare place name; the qualifier only filters.
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let candidate = candidate.as_ref();
                let score = self
                    .scorer
                    .partial_ratio(&name, &candidate.to_ascii_lowercase());
                ScoredCandidate {
                    name: candidate.to_string(),
                    score,
                }
            })
            .collect();

        if let Some(raw) = qualifier_part {
            let qualifier = normalize(raw);
            scored.retain(|c| c.name.to_ascii_lowercase().ends_with(&qualifier));
            if scored.is_empty() {
                return Err(MatchError::QualifierNotFound {
                    qualifier: raw.trim().to_string(),
                    query: query.to_string(),
                });
            }
        } else if scored.is_empty() {
            return Err(MatchError::NoCandidates {
                query: query.to_string(),
            });
        }

        let top = max_score(&scored);
        let mut winners: Vec<&ScoredCandidate> =
            scored.iter().filter(|c| c.score == top).collect();
        // A scorer that returns NaN defeats the equality filter; fall back
        // to supply order instead of selecting nothing.
        if winners.is_empty() {
            winners.extend(scored.first());
        }

        let best = if winners.len() == 1 {
            PlaceMatch {
                name: winners[0].name.clone(),
                score: top,
                tie_break: None,
            }
        } else {
            self.break_tie(query, &name, top, &winners)
        };

        tracing::debug!(query, matched = %best.name, score = best.score, "resolved place query");
        Ok((best, scored))
    }

    /// Separate candidates tied on the partial score with a whole-string
    /// score. A tie that survives goes to the first candidate in supply
    /// order so repeated calls always agree.
    fn break_tie(
        &self,
        query: &str,
        name: &str,
        score: f64,
        winners: &[&ScoredCandidate],
    ) -> PlaceMatch {
        let full_scores: Vec<f64> = winners
            .iter()
            .map(|c| self.scorer.ratio(name, &c.name.to_ascii_lowercase()))
            .collect();
        let top_full = full_scores
            .iter()
            .copied()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .unwrap_or(0.0);

        let double_winners: Vec<&ScoredCandidate> = winners
            .iter()
            .zip(&full_scores)
            .filter(|(_, full)| **full == top_full)
            .map(|(c, _)| *c)
            .collect();

        // Non-finite secondary scores leave no double winner; keep the
        // first primary winner in that case.
        let chosen = double_winners.first().copied().unwrap_or(winners[0]);
        let tied = if double_winners.len() > 1 {
            let names: Vec<String> = double_winners.iter().map(|c| c.name.clone()).collect();
            tracing::warn!(
                query,
                chosen = %chosen.name,
                tied = ?names,
                "cannot disambiguate place query; keeping the first candidate tied on both scores"
            );
            names
        } else {
            Vec::new()
        };

        PlaceMatch {
            name: chosen.name.clone(),
            score,
            tie_break: Some(TieBreak {
                full_score: top_full,
                tied,
            }),
        }
    }
}

/// Split a query into its place name and optional qualifier parts.
fn split_query(query: &str) -> Result<(&str, Option<&str>)> {
    let parts: Vec<&str> = query.split(',').collect();
    match parts.as_slice() {
        [name] => Ok((*name, None)),
        [name, qualifier] => Ok((*name, Some(*qualifier))),
        _ => Err(MatchError::InvalidQueryFormat {
            query: query.to_string(),
        }),
    }
}

/// Trim and ASCII-lowercase one query part.
fn normalize(part: &str) -> String {
    part.trim().to_ascii_lowercase()
}

fn max_score(scored: &[ScoredCandidate]) -> f64 {
    scored
        .iter()
        .map(|c| c.score)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .unwrap_or(0.0)
}
