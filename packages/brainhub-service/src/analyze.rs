use serde::{Deserialize, Serialize};

use brainhub_domain::llm_json;

use crate::{BrainService, Error, Result};

pub const INSIGHT_PREFIX: &str = "⚡ Insight: ";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
	pub summary: String,
	pub tags: Vec<String>,
}

impl BrainService {
	/// Previews the summary and tags the capture flow would attach to a piece of content.
	pub async fn analyze(&self, req: AnalyzeRequest) -> Result<Analysis> {
		let content = req.content.unwrap_or_default();

		if content.is_empty() {
			return Err(Error::InvalidRequest { message: "Content is required".to_string() });
		}

		let prompt = analysis_prompt(
			req.title.as_deref().unwrap_or_default(),
			&content,
			self.cfg.analyze.max_content_chars as usize,
		);
		let reply =
			self.providers.generation.generate(&self.cfg.providers.generation, &prompt).await?;

		Ok(llm_json::decode_embedded_object(&reply)?)
	}
}

pub fn analysis_prompt(title: &str, content: &str, max_content_chars: usize) -> String {
	let excerpt: String = content.chars().take(max_content_chars).collect();

	format!(
		"\
Analyze this content for a personal knowledge base.
Title: {title}
Content: {excerpt}

Tasks:
1. Write a short summary. Start it with \"{INSIGHT_PREFIX}\".
2. Extract 3 relevant keywords/tags.

Return ONLY valid JSON in this format:
{{
  \"summary\": \"Your summary here...\",
  \"tags\": [\"tag1\", \"tag2\", \"tag3\"]
}}"
	)
}
