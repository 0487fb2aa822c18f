//! Decoding of JSON payloads embedded in model replies.
//!
//! Models wrap JSON in Markdown fences often enough that every decoder strips them first. Nothing
//! here trusts the parse result: each decoder checks the shape it was asked for.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

static CODE_FENCE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"```(?:json)?").expect("Code fence pattern must compile."));

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("Reply is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Reply is not a JSON array.")]
	NotArray,
	#[error("Reply array element {index} is not an integer.")]
	NonInteger { index: usize },
	#[error("Reply does not contain a JSON object.")]
	MissingObject,
}

/// Removes every ```` ```json ```` and ```` ``` ```` marker and trims the rest.
pub fn strip_code_fences(text: &str) -> String {
	CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Decodes a reply that must be a JSON array of integer identifiers.
pub fn decode_ranked_ids(text: &str) -> Result<Vec<i64>, DecodeError> {
	let value: Value = serde_json::from_str(&strip_code_fences(text))?;
	let Value::Array(elements) = value else {
		return Err(DecodeError::NotArray);
	};

	elements
		.iter()
		.enumerate()
		.map(|(index, element)| element.as_i64().ok_or(DecodeError::NonInteger { index }))
		.collect()
}

/// Decodes a fenced reply directly into `T`.
pub fn decode_fenced<T>(text: &str) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	Ok(serde_json::from_str(&strip_code_fences(text))?)
}

/// Decodes the span from the first `{` to the last `}` into `T`, ignoring any prose around it.
pub fn decode_embedded_object<T>(text: &str) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let stripped = strip_code_fences(text);
	let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) else {
		return Err(DecodeError::MissingObject);
	};

	if end < start {
		return Err(DecodeError::MissingObject);
	}

	Ok(serde_json::from_str(&stripped[start..=end])?)
}

#[cfg(test)]
mod tests {
	use serde::Deserialize;

	use super::*;

	#[derive(Debug, Deserialize, PartialEq)]
	struct Analysis {
		summary: String,
		tags: Vec<String>,
	}

	#[test]
	fn strips_tagged_and_bare_fences() {
		assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
		assert_eq!(strip_code_fences("  ```\n[]\n```  "), "[]");
	}

	#[test]
	fn decodes_plain_and_fenced_id_arrays() {
		assert_eq!(decode_ranked_ids("[12, 5, 3]").expect("decode failed"), vec![12, 5, 3]);
		assert_eq!(decode_ranked_ids("```json\n[3,1]\n```").expect("decode failed"), vec![3, 1]);
		assert!(decode_ranked_ids("[]").expect("decode failed").is_empty());
	}

	#[test]
	fn rejects_non_array_payloads() {
		assert!(matches!(decode_ranked_ids("{\"ids\": [1]}"), Err(DecodeError::NotArray)));
		assert!(matches!(decode_ranked_ids("42"), Err(DecodeError::NotArray)));
	}

	#[test]
	fn rejects_non_integer_elements() {
		assert!(matches!(
			decode_ranked_ids("[1, \"2\"]"),
			Err(DecodeError::NonInteger { index: 1 })
		));
		assert!(matches!(decode_ranked_ids("[1.5]"), Err(DecodeError::NonInteger { index: 0 })));
	}

	#[test]
	fn rejects_prose() {
		assert!(matches!(
			decode_ranked_ids("The most relevant items are 3 and 1."),
			Err(DecodeError::Json(_))
		));
	}

	#[test]
	fn embedded_object_ignores_surrounding_prose() {
		let text = "Sure! Here it is:\n```json\n{\"summary\": \"s\", \"tags\": [\"a\"]}\n```\nDone.";
		let parsed: Analysis = decode_embedded_object(text).expect("decode failed");

		assert_eq!(parsed, Analysis { summary: "s".to_string(), tags: vec!["a".to_string()] });
	}

	#[test]
	fn embedded_object_requires_braces() {
		assert!(matches!(
			decode_embedded_object::<Analysis>("no json here"),
			Err(DecodeError::MissingObject)
		));
		assert!(matches!(
			decode_embedded_object::<Analysis>("} before {"),
			Err(DecodeError::MissingObject)
		));
	}
}
