//! Case-insensitive substring matching for select mode.

use crate::domain::sidebar::MatchResult;

/// Lowercases `c` when it folds to a single char, otherwise keeps it as is.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// Case-folded copy of `text` plus, for each folded char, its byte offset in
/// the folded string and in `text`. A final pair marks both ends.
fn folded_with_offsets(text: &str) -> (String, Vec<(usize, usize)>) {
    let mut folded = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for (original, c) in text.char_indices() {
        offsets.push((folded.len(), original));
        folded.push(fold(c));
    }
    offsets.push((folded.len(), text.len()));
    (folded, offsets)
}

fn original_offset(offsets: &[(usize, usize)], folded: usize) -> Option<usize> {
    offsets
        .binary_search_by_key(&folded, |&(f, _)| f)
        .ok()
        .map(|idx| offsets[idx].1)
}

/// Splits `candidate` around the first case-insensitive occurrence of `query`.
///
/// Runs one folding pass over the candidate and a linear substring search.
/// An empty query matches everything with an empty matched part; callers
/// treat an empty query as "select mode inactive" and never filter with it.
#[must_use]
pub fn find_match(query: &str, candidate: &str) -> Option<MatchResult> {
    if query.is_empty() {
        return Some(MatchResult {
            prefix: String::new(),
            matched: String::new(),
            suffix: candidate.to_string(),
            full_key: candidate.to_string(),
        });
    }

    let needle: String = query.chars().map(fold).collect();
    let (haystack, offsets) = folded_with_offsets(candidate);

    let found = haystack.find(&needle)?;
    let start = original_offset(&offsets, found)?;
    let end = original_offset(&offsets, found + needle.len())?;

    Some(MatchResult {
        prefix: candidate[..start].to_string(),
        matched: candidate[start..end].to_string(),
        suffix: candidate[end..].to_string(),
        full_key: candidate.to_string(),
    })
}
