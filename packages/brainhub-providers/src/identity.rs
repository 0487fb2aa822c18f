use std::time::Duration;

use reqwest::{Client, StatusCode, header::HeaderMap};
use serde_json::Value;

use crate::{Error, Result};

const API_KEY_HEADER: &str = "apikey";

/// Resolves a caller's bearer token into the owning user id.
///
/// `Ok(None)` means the session service rejected the token. Transport failures and unexpected
/// statuses are errors.
pub async fn resolve_user(
	cfg: &brainhub_config::IdentityProviderConfig,
	bearer_token: &str,
) -> Result<Option<String>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut headers: HeaderMap = crate::auth_headers(bearer_token, &cfg.default_headers)?;

	headers.insert(API_KEY_HEADER, cfg.api_key.parse()?);

	let res = client.get(&url).headers(headers).send().await?;

	if matches!(res.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
		return Ok(None);
	}

	let json: Value = res.error_for_status()?.json().await?;

	parse_user_id(json)
}

fn parse_user_id(json: Value) -> Result<Option<String>> {
	if !json.is_object() {
		return Err(Error::InvalidResponse {
			message: "Identity response must be a JSON object.".to_string(),
		});
	}

	Ok(json
		.get("id")
		.and_then(|v| v.as_str())
		.map(str::trim)
		.filter(|id| !id.is_empty())
		.map(str::to_string))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_user_id() {
		let json = serde_json::json!({ "id": "a1b2", "email": "me@example.com" });

		assert_eq!(parse_user_id(json).expect("parse failed"), Some("a1b2".to_string()));
	}

	#[test]
	fn blank_id_means_no_user() {
		let json = serde_json::json!({ "id": "  " });

		assert_eq!(parse_user_id(json).expect("parse failed"), None);
	}

	#[test]
	fn rejects_non_object_body() {
		assert!(parse_user_id(serde_json::json!([])).is_err());
	}
}
