//! Transcript chunking under an approximate token budget.
//!
//! Long transcripts do not fit into a single model request, so they are split
//! into word-aligned chunks whose estimated token cost stays under a ceiling.
//! Costs are estimated with a characters-per-token heuristic rather than a
//! real tokenizer: each word costs `chars / 4 + 1`.

/// Approximate number of characters per token.
const CHARS_PER_TOKEN: usize = 4;

/// Estimated token cost of a single word.
pub fn word_cost(word: &str) -> usize {
    word.chars().count() / CHARS_PER_TOKEN + 1
}

/// Estimated token cost of a piece of text (sum of its word costs).
pub fn text_cost(text: &str) -> usize {
    text.split_whitespace().map(word_cost).sum()
}

/// Split text into chunks whose estimated cost does not exceed `max_chunk_cost`.
///
/// Words are kept whole and in order, and rejoined with single spaces. A word
/// that alone exceeds the ceiling becomes a chunk of its own. Empty input
/// yields no chunks.
pub fn chunk_text(text: &str, max_chunk_cost: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_cost = 0;

    for word in text.split_whitespace() {
        let cost = word_cost(word);

        if current_cost + cost > max_chunk_cost && !current.is_empty() {
            chunks.push(current.join(" "));
            current.clear();
            current_cost = 0;
        }

        current.push(word);
        current_cost += cost;
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}
