//! Similarity scoring for place-name resolution.
//!
//! Candidates are ranked with a partial ratio that rewards substring
//! overlap, then separated with a full-string ratio when the ranking ties.
//! Both metrics sit behind [`SimilarityScorer`] so the selection logic in
//! [`crate::PlaceMatcher`] stays independent of the string algorithm.

use rapidfuzz::fuzz;

/// Two-pass string similarity used by the matcher.
///
/// Scores are on a 0-100 scale. `partial_ratio` looks for the best
/// alignment of the shorter string inside the longer one, so a bare place
/// name scores 100 against any candidate that contains it. `ratio`
/// compares the full strings and drops with every length difference, which
/// is what separates candidates that `partial_ratio` cannot tell apart.
/// Implementations are expected to return finite values; the matcher falls
/// back to candidate supply order when they do not.
pub trait SimilarityScorer {
    /// Substring-aware similarity between `query` and `candidate` (0-100).
    fn partial_ratio(&self, query: &str, candidate: &str) -> f64;

    /// Whole-string similarity between `query` and `candidate` (0-100).
    fn ratio(&self, query: &str, candidate: &str) -> f64;
}

/// Default scorer backed by the Indel ratio from `rapidfuzz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzScorer;

impl SimilarityScorer for FuzzScorer {
    fn partial_ratio(&self, query: &str, candidate: &str) -> f64 {
        best_window_ratio(query, candidate)
    }

    fn ratio(&self, query: &str, candidate: &str) -> f64 {
        // rapidfuzz reports similarity on the unit interval.
        fuzz::ratio(query.chars(), candidate.chars()) * 100.0
    }
}

/// Best full ratio over every alignment of the shorter string against
/// same-length windows of the longer one.
///
/// Equal-length inputs degenerate to a single whole-string comparison,
/// and an empty shorter side aligns perfectly anywhere.
fn best_window_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (needle, haystack) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if needle.is_empty() {
        return 100.0;
    }
    if needle.len() == haystack.len() {
        return fuzz::ratio(needle.iter().copied(), haystack.iter().copied()) * 100.0;
    }

    let comparator = fuzz::RatioBatchComparator::new(needle.iter().copied());
    let mut best = 0.0_f64;
    for window in haystack.windows(needle.len()) {
        let score = comparator.similarity(window.iter().copied()) * 100.0;
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}
