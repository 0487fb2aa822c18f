pub mod analyze;
pub mod chat;
pub mod knowledge;
pub mod search;

mod error;

pub use analyze::{Analysis, AnalyzeRequest};
pub use chat::{ChatMessage, ChatReply, ChatRequest};
pub use error::{Error, Result};
pub use knowledge::{CaptureRequest, KnowledgeItem};
pub use search::{DispatchError, SearchRequest};

use std::{future::Future, pin::Pin, sync::Arc};

use brainhub_config::{Config, IdentityProviderConfig, LlmProviderConfig};
use brainhub_providers::{generation, identity};
use brainhub_storage::{
	db::Db,
	models::{KnowledgeRow, NewKnowledgeRow},
	queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, brainhub_providers::Result<String>>;
}

pub trait IdentityProvider
where
	Self: Send + Sync,
{
	fn resolve_user<'a>(
		&'a self,
		cfg: &'a IdentityProviderConfig,
		bearer_token: &'a str,
	) -> BoxFuture<'a, brainhub_providers::Result<Option<String>>>;
}

/// Per-user item persistence. Every call is scoped to one owner.
pub trait KnowledgeStore
where
	Self: Send + Sync,
{
	fn insert<'a>(
		&'a self,
		item: &'a NewKnowledgeRow,
	) -> BoxFuture<'a, brainhub_storage::Result<KnowledgeRow>>;

	fn list<'a>(
		&'a self,
		user_id: &'a str,
		limit: Option<u32>,
	) -> BoxFuture<'a, brainhub_storage::Result<Vec<KnowledgeRow>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub generation: Arc<dyn GenerationProvider>,
	pub identity: Arc<dyn IdentityProvider>,
}

pub struct BrainService {
	pub cfg: Config,
	pub store: Arc<dyn KnowledgeStore>,
	pub providers: Providers,
}

struct DefaultProviders;

/// [`KnowledgeStore`] backed by the Postgres pool.
pub struct PgKnowledgeStore {
	db: Db,
}

impl GenerationProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, brainhub_providers::Result<String>> {
		Box::pin(generation::generate(cfg, prompt))
	}
}

impl IdentityProvider for DefaultProviders {
	fn resolve_user<'a>(
		&'a self,
		cfg: &'a IdentityProviderConfig,
		bearer_token: &'a str,
	) -> BoxFuture<'a, brainhub_providers::Result<Option<String>>> {
		Box::pin(identity::resolve_user(cfg, bearer_token))
	}
}

impl PgKnowledgeStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}

impl KnowledgeStore for PgKnowledgeStore {
	fn insert<'a>(
		&'a self,
		item: &'a NewKnowledgeRow,
	) -> BoxFuture<'a, brainhub_storage::Result<KnowledgeRow>> {
		Box::pin(queries::insert_item(&self.db, item))
	}

	fn list<'a>(
		&'a self,
		user_id: &'a str,
		limit: Option<u32>,
	) -> BoxFuture<'a, brainhub_storage::Result<Vec<KnowledgeRow>>> {
		Box::pin(queries::list_items(&self.db, user_id, limit))
	}
}

impl Providers {
	pub fn new(generation: Arc<dyn GenerationProvider>, identity: Arc<dyn IdentityProvider>) -> Self {
		Self { generation, identity }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { generation: provider.clone(), identity: provider }
	}
}

impl BrainService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, store: Arc::new(PgKnowledgeStore::new(db)), providers: Providers::default() }
	}

	pub fn with_parts(cfg: Config, store: Arc<dyn KnowledgeStore>, providers: Providers) -> Self {
		Self { cfg, store, providers }
	}

	/// Resolves an `Authorization` header value into the owning user id.
	pub async fn authenticate(&self, authorization: Option<&str>) -> Result<String> {
		let token = authorization.map(bearer_token).unwrap_or_default();

		if token.is_empty() {
			return Err(Error::Unauthorized { message: "Missing Auth Token".to_string() });
		}

		match self.providers.identity.resolve_user(&self.cfg.providers.identity, token).await {
			Ok(Some(user_id)) => Ok(user_id),
			Ok(None) => Err(Error::Unauthorized { message: "Unauthorized".to_string() }),
			Err(err) => {
				tracing::warn!(error = %err, "Identity lookup failed.");

				Err(Error::Unauthorized { message: "Unauthorized".to_string() })
			},
		}
	}
}

fn bearer_token(header: &str) -> &str {
	let trimmed = header.trim();

	match trimmed.split_once(' ') {
		Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
		None if trimmed.eq_ignore_ascii_case("bearer") => "",
		_ => trimmed,
	}
}
