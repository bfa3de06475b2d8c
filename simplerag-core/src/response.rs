//! Answer assembly
//!
//! Plain templating over retrieved texts: no deduplication, no generation.

use crate::retriever::SearchResult;

/// Answer when nothing clears the relevance threshold
pub fn not_found(query: &str) -> String {
    format!("Sorry, no information related to '{}' was found.", query)
}

/// Context block (one retrieved text per line, in retrieval order) followed by
/// the fixed trailer. Falls back to [`not_found`] for an empty result set.
pub fn compose(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return not_found(query);
    }

    let context = results
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the retrieved relevant documents:\n{}\n\nThe relevant information for the query '{}' is as shown above.",
        context, query
    )
}
