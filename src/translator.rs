//! Free text to a bounded list of candidates

use crate::index::{Candidate, IndexService, SearchRequest};

/// Look up `text` (optionally inside `scope`) and return at most `limit` hits
///
/// The service's order is kept as-is. A blank query without a scope has
/// nothing to show and does not reach the service. Service failures are
/// logged and produce an empty list.
pub fn translate<I: IndexService + ?Sized>(
    index: &I,
    text: &str,
    scope: Option<&str>,
    limit: usize,
) -> Vec<Candidate> {
    if text.trim().is_empty() && scope.is_none() {
        return Vec::new();
    }

    let request = SearchRequest {
        text: text.to_string(),
        scope: scope.map(str::to_string),
        limit,
    };

    match index.search(&request) {
        Ok(mut candidates) => {
            if candidates.len() > limit {
                tracing::debug!(
                    found = candidates.len(),
                    limit,
                    "truncating results"
                );
                candidates.truncate(limit);
            }
            candidates
        }
        Err(e) => {
            tracing::warn!(query = text, error = %e, "index query failed");
            Vec::new()
        }
    }
}
