//! Candidate selection strategies
//!
//! The matching policy is isolated behind a trait so a stricter matcher
//! (e.g. exact name preferred over partial) can be substituted without
//! touching the reconciliation loop.

/// Strategy for picking the staged file for a logical identifier
pub trait MatchStrategy {
    /// Strategy name for reporting
    fn name(&self) -> &str;

    /// Pick the staged filename for `id` out of the directory listing,
    /// or `None` when nothing qualifies.
    fn select<'a>(&self, id: &str, files: &'a [String]) -> Option<&'a str>;
}

/// The original heuristic: case-sensitive exact prefix, first candidate in
/// listing order. No scoring, no disambiguation.
#[derive(Debug, Default)]
pub struct PrefixMatcher;

impl MatchStrategy for PrefixMatcher {
    fn name(&self) -> &str {
        "prefix"
    }

    fn select<'a>(&self, id: &str, files: &'a [String]) -> Option<&'a str> {
        files.iter().find(|f| f.starts_with(id)).map(String::as_str)
    }
}
