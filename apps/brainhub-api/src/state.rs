use std::sync::Arc;

use brainhub_service::BrainService;
use brainhub_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<BrainService>,
}
impl AppState {
	pub async fn new(config: brainhub_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(BrainService::new(config, db)))
	}

	pub fn from_service(service: BrainService) -> Self {
		Self { service: Arc::new(service) }
	}
}
