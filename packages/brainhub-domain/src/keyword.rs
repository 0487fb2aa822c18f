use crate::knowledge::SearchCandidate;

/// Case-insensitive substring filter over title, content, and tags.
///
/// Keeps the input order. This is a filter, not a ranking.
pub fn keyword_matches<'a>(query: &str, items: &'a [SearchCandidate]) -> Vec<&'a SearchCandidate> {
	let needle = query.to_lowercase();

	items.iter().filter(|item| matches_item(&needle, item)).collect()
}

fn matches_item(needle: &str, item: &SearchCandidate) -> bool {
	if item.title().to_lowercase().contains(needle) {
		return true;
	}
	if item.content().to_lowercase().contains(needle) {
		return true;
	}

	item.tags()
		.map(|tags| tags.iter().any(|tag| tag.to_lowercase().contains(needle)))
		.unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids(found: &[&SearchCandidate]) -> Vec<i64> {
		found.iter().map(|item| item.id()).collect()
	}

	#[test]
	fn matches_title_content_or_tag_in_input_order() {
		let items = vec![
			SearchCandidate::new(1, "AI basics", ""),
			SearchCandidate::new(2, "Cooking", "Pasta night"),
			SearchCandidate::new(3, "Tools", "").with_tags(["ai-tools"]),
		];

		assert_eq!(ids(&keyword_matches("ai", &items)), vec![1, 3]);
	}

	#[test]
	fn ignores_case_on_both_sides() {
		let items = vec![SearchCandidate::new(1, "ai basics", "")];

		assert_eq!(ids(&keyword_matches("AI", &items)), vec![1]);
	}

	#[test]
	fn missing_tags_do_not_match() {
		let items = vec![SearchCandidate::new(1, "Cooking", "Pasta")];

		assert!(keyword_matches("ai", &items).is_empty());
	}

	#[test]
	fn empty_query_matches_everything() {
		let items = vec![SearchCandidate::new(1, "a", ""), SearchCandidate::new(2, "b", "")];

		assert_eq!(ids(&keyword_matches("", &items)), vec![1, 2]);
	}
}
