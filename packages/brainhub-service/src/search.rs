//! Search over caller-supplied items.
//!
//! A request makes one ranking attempt against the generation provider. Any failure of that
//! attempt, including a timeout or an unusable reply, is logged and answered with the keyword
//! filter instead. The caller cannot tell which path produced the result.

use std::time::Duration;

use serde::Deserialize;

use brainhub_domain::{
	keyword::keyword_matches,
	knowledge::SearchCandidate,
	llm_json::{self, DecodeError},
	ranking::select_ranked,
};

use crate::{BrainService, Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub query: Option<String>,
	#[serde(default)]
	pub items: Option<Vec<SearchCandidate>>,
}

/// Why a ranking attempt produced nothing usable.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	#[error("Ranking call failed: {0}")]
	Unavailable(#[from] brainhub_providers::Error),
	#[error("Ranking reply is unusable: {0}")]
	Malformed(#[from] DecodeError),
	#[error("Ranking call exceeded {timeout_ms} ms.")]
	TimedOut { timeout_ms: u64 },
}

impl BrainService {
	pub async fn search(&self, req: SearchRequest) -> Result<Vec<SearchCandidate>> {
		let items = req.items.unwrap_or_default();

		if items.is_empty() {
			return Ok(Vec::new());
		}

		let Some(query) = req.query else {
			return Err(Error::InvalidRequest { message: "query is required.".to_string() });
		};
		let timeout_ms = self.cfg.search.dispatch_timeout_ms;
		let attempt = tokio::time::timeout(
			Duration::from_millis(timeout_ms),
			self.dispatch(&query, &items),
		)
		.await
		.unwrap_or(Err(DispatchError::TimedOut { timeout_ms }));
		let found = match attempt {
			Ok(ranked) => ranked,
			Err(err) => {
				tracing::warn!(error = %err, "Ranking failed. Falling back to keyword search.");

				keyword_matches(&query, &items)
			},
		};

		Ok(found.into_iter().cloned().collect())
	}

	/// Asks the generation provider to rank `items` against `query`.
	///
	/// An empty candidate list returns immediately without a provider call.
	pub async fn dispatch<'a>(
		&self,
		query: &str,
		items: &'a [SearchCandidate],
	) -> Result<Vec<&'a SearchCandidate>, DispatchError> {
		if items.is_empty() {
			return Ok(Vec::new());
		}

		let prompt =
			ranking_prompt(query, items, self.cfg.search.content_preview_chars as usize);
		let reply =
			self.providers.generation.generate(&self.cfg.providers.generation, &prompt).await?;
		let ranked_ids = llm_json::decode_ranked_ids(&reply)?;

		Ok(select_ranked(&ranked_ids, items))
	}
}

pub fn ranking_prompt(query: &str, items: &[SearchCandidate], preview_chars: usize) -> String {
	let context = items
		.iter()
		.map(|item| {
			format!(
				"ID: {} | Title: {} | Summary: {}",
				item.id(),
				item.title(),
				item.digest(preview_chars)
			)
		})
		.collect::<Vec<_>>()
		.join("\n");

	format!(
		"\
You are a semantic search engine.
Query: \"{query}\"

Below is a list of knowledge items. Find the items that are most relevant to the query based on meaning.

Items:
{context}

Return ONLY a JSON array of the matching IDs, sorted by relevance. Example: [12, 5, 3]
If nothing is relevant, return []."
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prompt_lists_every_item_with_its_digest() {
		let items = vec![
			SearchCandidate::new(4, "Borrowing", "References must not outlive their owner.")
				.with_summary("⚡ Insight: lifetimes"),
			SearchCandidate::new(9, "Tokio", "An async runtime for Rust with many features."),
		];
		let prompt = ranking_prompt("async", &items, 8);

		assert!(prompt.contains("Query: \"async\""));
		assert!(prompt.contains("ID: 4 | Title: Borrowing | Summary: ⚡ Insight: lifetimes"));
		assert!(prompt.contains("ID: 9 | Title: Tokio | Summary: An async"));
		assert!(prompt.contains("If nothing is relevant, return []."));
	}
}
