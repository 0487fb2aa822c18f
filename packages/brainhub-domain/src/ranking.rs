use std::collections::HashSet;

use crate::knowledge::SearchCandidate;

/// Resolves ranked identifiers against the candidate list.
///
/// Order follows `ranked_ids`. Unknown identifiers are dropped, repeats keep their first position,
/// and candidates the ranking left out are not appended.
pub fn select_ranked<'a>(
	ranked_ids: &[i64],
	items: &'a [SearchCandidate],
) -> Vec<&'a SearchCandidate> {
	let mut seen = HashSet::with_capacity(ranked_ids.len());
	let mut out = Vec::with_capacity(ranked_ids.len().min(items.len()));

	for id in ranked_ids {
		if !seen.insert(*id) {
			continue;
		}
		if let Some(item) = items.iter().find(|item| item.id() == *id) {
			out.push(item);
		}
	}

	out
}
