use serde::{Deserialize, Serialize};

use brainhub_domain::{knowledge::KnowledgeType, llm_json};
use brainhub_storage::models::{KnowledgeRow, NewKnowledgeRow};

use crate::{BrainService, Error, Result, analyze::INSIGHT_PREFIX};

pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable";
pub const MANUAL_TAG: &str = "manual";

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureRequest {
	pub title: String,
	#[serde(default)]
	pub content: String,
	#[serde(rename = "type", default = "default_kind")]
	pub kind: KnowledgeType,
	#[serde(rename = "sourceUrl", default)]
	pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
	pub id: i64,
	pub title: String,
	pub content: String,
	#[serde(rename = "type")]
	pub kind: KnowledgeType,
	pub tags: Vec<String>,
	pub summary: String,
	#[serde(rename = "sourceUrl")]
	pub source_url: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: time::OffsetDateTime,
}
impl TryFrom<KnowledgeRow> for KnowledgeItem {
	type Error = Error;

	fn try_from(row: KnowledgeRow) -> Result<Self> {
		let kind = row.kind.parse::<KnowledgeType>().map_err(|err| Error::Storage {
			message: format!("Item {} has an invalid type: {err}", row.id),
		})?;

		Ok(Self {
			id: row.id,
			title: row.title,
			content: row.content,
			kind,
			tags: row.tags,
			summary: row.summary,
			source_url: row.source_url,
			created_at: row.created_at,
		})
	}
}

#[derive(Debug, Deserialize)]
struct Enrichment {
	summary: String,
	tags: Vec<String>,
}

impl BrainService {
	/// Stores a new item for `user_id`, attaching a generated summary and tags when possible.
	pub async fn capture(&self, user_id: &str, req: CaptureRequest) -> Result<KnowledgeItem> {
		let (summary, tags) = self.enrich(&req.content).await;
		let row = NewKnowledgeRow {
			user_id: user_id.to_string(),
			title: req.title,
			content: req.content,
			kind: req.kind.as_str().to_string(),
			tags,
			summary,
			source_url: req.source_url.filter(|url| !url.trim().is_empty()),
		};
		let stored = self.store.insert(&row).await?;

		tracing::info!(item_id = stored.id, kind = %row.kind, "Knowledge item captured.");

		KnowledgeItem::try_from(stored)
	}

	/// Items owned by `user_id`, newest first.
	pub async fn list(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<KnowledgeItem>> {
		self.store.list(user_id, limit).await?.into_iter().map(KnowledgeItem::try_from).collect()
	}

	async fn enrich(&self, content: &str) -> (String, Vec<String>) {
		if content.is_empty() {
			return (String::new(), Vec::new());
		}

		let prompt = enrichment_prompt(content);
		let attempt = match self
			.providers
			.generation
			.generate(&self.cfg.providers.generation, &prompt)
			.await
		{
			Ok(reply) => llm_json::decode_fenced::<Enrichment>(&reply).map_err(Error::from),
			Err(err) => Err(Error::from(err)),
		};

		match attempt {
			Ok(enrichment) => (enrichment.summary, enrichment.tags),
			Err(err) => {
				tracing::warn!(error = %err, "Enrichment failed. Storing the item without it.");

				(SUMMARY_UNAVAILABLE.to_string(), vec![MANUAL_TAG.to_string()])
			},
		}
	}
}

pub fn enrichment_prompt(content: &str) -> String {
	format!(
		"\
Analyze the following text.

1. Write a short summary. Start it with \"{INSIGHT_PREFIX}\".
2. Extract 3 relevant keywords/tags.

Return the output strictly as a JSON object:
{{
  \"summary\": \"...\",
  \"tags\": [\"tag1\", \"tag2\", \"tag3\"]
}}

Text to analyze:
\"{content}\""
	)
}

fn default_kind() -> KnowledgeType {
	KnowledgeType::Note
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(kind: &str) -> KnowledgeRow {
		KnowledgeRow {
			id: 5,
			user_id: "u".to_string(),
			title: "t".to_string(),
			content: "c".to_string(),
			kind: kind.to_string(),
			tags: vec!["x".to_string()],
			summary: String::new(),
			source_url: None,
			created_at: time::macros::datetime!(2025-03-01 12:00 UTC),
		}
	}

	#[test]
	fn serializes_with_wire_field_names() {
		let item = KnowledgeItem::try_from(row("link")).expect("conversion failed");
		let json = serde_json::to_value(&item).expect("encode failed");

		assert_eq!(json["type"], "link");
		assert_eq!(json["sourceUrl"], serde_json::Value::Null);
		assert_eq!(json["created_at"], "2025-03-01T12:00:00Z");
	}

	#[test]
	fn rejects_rows_with_unknown_type() {
		assert!(matches!(KnowledgeItem::try_from(row("video")), Err(Error::Storage { .. })));
	}

	#[test]
	fn created_at_reads_back_from_rfc3339() {
		let item = KnowledgeItem::try_from(row("note")).expect("conversion failed");
		let json = serde_json::to_value(&item).expect("encode failed");
		let decoded: KnowledgeItem = serde_json::from_value(json).expect("decode failed");

		assert_eq!(decoded.created_at, time::macros::datetime!(2025-03-01 12:00 UTC));
	}

	#[test]
	fn capture_request_defaults_to_note() {
		let req: CaptureRequest =
			serde_json::from_value(serde_json::json!({ "title": "t" })).expect("decode failed");

		assert_eq!(req.kind, KnowledgeType::Note);
		assert!(req.content.is_empty());
	}
}
