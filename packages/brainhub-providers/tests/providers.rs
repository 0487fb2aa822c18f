use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};
use wiremock::{
	Mock, MockServer, ResponseTemplate,
	matchers::{body_partial_json, header, method, path},
};

use brainhub_config::{IdentityProviderConfig, LlmProviderConfig};
use brainhub_providers::{Error, generation, identity};

fn llm_config(api_base: String) -> LlmProviderConfig {
	LlmProviderConfig {
		provider_id: "test".to_string(),
		api_base,
		api_key: "test-key".to_string(),
		path: "/chat/completions".to_string(),
		model: "test-model".to_string(),
		temperature: 0.2,
		timeout_ms: 2_000,
		default_headers: Map::new(),
	}
}

fn identity_config(api_base: String) -> IdentityProviderConfig {
	IdentityProviderConfig {
		api_base,
		api_key: "anon-key".to_string(),
		path: "/auth/v1/user".to_string(),
		timeout_ms: 2_000,
		default_headers: Map::new(),
	}
}

#[test]
fn builds_bearer_auth_header() {
	let headers =
		brainhub_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut extra = Map::new();

	extra.insert("X-Retries".to_string(), Value::from(3));

	let err = brainhub_providers::auth_headers("secret", &extra).expect_err("Expected error.");

	assert!(matches!(err, Error::InvalidConfig { .. }));
}

#[tokio::test]
async fn generation_posts_prompt_and_returns_content() {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.and(path("/chat/completions"))
		.and(header("Authorization", "Bearer test-key"))
		.and(body_partial_json(serde_json::json!({
			"model": "test-model",
			"messages": [{ "role": "user", "content": "rank these" }]
		})))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"choices": [{ "message": { "role": "assistant", "content": "```json\n[2]\n```" } }]
		})))
		.expect(1)
		.mount(&server)
		.await;

	let text = generation::generate(&llm_config(server.uri()), "rank these")
		.await
		.expect("Generation failed.");

	assert_eq!(text, "```json\n[2]\n```");
}

#[tokio::test]
async fn generation_surfaces_non_success_status() {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.and(path("/chat/completions"))
		.respond_with(ResponseTemplate::new(429))
		.expect(1)
		.mount(&server)
		.await;

	let err = generation::generate(&llm_config(server.uri()), "rank these")
		.await
		.expect_err("Expected rate limit error.");

	assert!(matches!(err, Error::Reqwest(_)));
}

#[tokio::test]
async fn identity_resolves_user_id() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/auth/v1/user"))
		.and(header("apikey", "anon-key"))
		.and(header("Authorization", "Bearer session-token"))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "user-1" })),
		)
		.expect(1)
		.mount(&server)
		.await;

	let user = identity::resolve_user(&identity_config(server.uri()), "session-token")
		.await
		.expect("Identity call failed.");

	assert_eq!(user.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn identity_treats_unauthorized_as_no_user() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/auth/v1/user"))
		.respond_with(ResponseTemplate::new(401))
		.mount(&server)
		.await;

	let user = identity::resolve_user(&identity_config(server.uri()), "expired")
		.await
		.expect("Identity call failed.");

	assert_eq!(user, None);
}
