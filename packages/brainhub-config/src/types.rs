use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub analyze: Analyze,
	#[serde(default)]
	pub chat: Chat,
	#[serde(default)]
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	/// Used for search ranking, content analysis, and capture enrichment.
	pub generation: LlmProviderConfig,
	/// Used for the conversational endpoint. Usually a cheaper model.
	pub chat: LlmProviderConfig,
	pub identity: IdentityProviderConfig,
}

/// An OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// The hosted session service that resolves a bearer token into a user id.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Upper bound on the ranking call. Expiry falls back to keyword matching.
	pub dispatch_timeout_ms: u64,
	pub content_preview_chars: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { dispatch_timeout_ms: 15_000, content_preview_chars: 100 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Analyze {
	pub max_content_chars: u32,
}
impl Default for Analyze {
	fn default() -> Self {
		Self { max_content_chars: 5_000 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Chat {
	pub context_items: u32,
}
impl Default for Chat {
	fn default() -> Self {
		Self { context_items: 20 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Security {
	pub bind_localhost_only: bool,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: true }
	}
}
