use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeType {
	Note,
	Link,
	Insight,
}
impl KnowledgeType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Note => "note",
			Self::Link => "link",
			Self::Insight => "insight",
		}
	}
}
impl fmt::Display for KnowledgeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for KnowledgeType {
	type Err = UnknownKnowledgeType;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"note" => Ok(Self::Note),
			"link" => Ok(Self::Link),
			"insight" => Ok(Self::Insight),
			other => Err(UnknownKnowledgeType(other.to_string())),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown knowledge type {0:?}; expected note, link, or insight.")]
pub struct UnknownKnowledgeType(pub String);

/// A knowledge item as handed in by a search caller.
///
/// The fields the matchers read are decoded up front. The object the caller sent is kept as-is
/// and is what serializes back out, so unknown fields and explicit nulls survive untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct SearchCandidate {
	id: i64,
	title: String,
	content: String,
	summary: Option<String>,
	tags: Option<Vec<String>>,
	raw: Map<String, Value>,
}
impl SearchCandidate {
	pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
		let title = title.into();
		let content = content.into();
		let mut raw = Map::new();

		raw.insert("id".to_string(), Value::from(id));
		raw.insert("title".to_string(), Value::from(title.clone()));
		raw.insert("content".to_string(), Value::from(content.clone()));

		Self { id, title, content, summary: None, tags: None, raw }
	}

	pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
		let summary = summary.into();

		self.raw.insert("summary".to_string(), Value::from(summary.clone()));
		self.summary = Some(summary);

		self
	}

	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let tags: Vec<String> = tags.into_iter().map(Into::into).collect();

		self.raw.insert("tags".to_string(), Value::from(tags.clone()));
		self.tags = Some(tags);

		self
	}

	pub fn id(&self) -> i64 {
		self.id
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn summary(&self) -> Option<&str> {
		self.summary.as_deref()
	}

	pub fn tags(&self) -> Option<&[String]> {
		self.tags.as_deref()
	}

	/// The summary when one is present and non-empty, otherwise the first `max_chars` characters
	/// of the content.
	pub fn digest(&self, max_chars: usize) -> String {
		match self.summary() {
			Some(summary) if !summary.is_empty() => summary.to_string(),
			_ => self.content.chars().take(max_chars).collect(),
		}
	}
}
impl TryFrom<Map<String, Value>> for SearchCandidate {
	type Error = CandidateError;

	fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
		Ok(Self {
			id: required(&raw, "id")?,
			title: required(&raw, "title")?,
			content: required(&raw, "content")?,
			summary: optional(&raw, "summary")?,
			tags: optional(&raw, "tags")?,
			raw,
		})
	}
}
impl From<SearchCandidate> for Map<String, Value> {
	fn from(candidate: SearchCandidate) -> Self {
		candidate.raw
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateError {
	#[error("Search item is missing `{0}`.")]
	Missing(&'static str),
	#[error("Search item field `{0}` has an unexpected type.")]
	WrongType(&'static str),
}

fn optional<T>(raw: &Map<String, Value>, field: &'static str) -> Result<Option<T>, CandidateError>
where
	T: DeserializeOwned,
{
	match raw.get(field) {
		None | Some(Value::Null) => Ok(None),
		Some(value) => T::deserialize(value).map(Some).map_err(|_| CandidateError::WrongType(field)),
	}
}

fn required<T>(raw: &Map<String, Value>, field: &'static str) -> Result<T, CandidateError>
where
	T: DeserializeOwned,
{
	optional(raw, field)?.ok_or(CandidateError::Missing(field))
}
