mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr};

use sqlx::{
	ConnectOptions, Connection,
	postgres::{PgConnectOptions, PgConnection},
};
use uuid::Uuid;

use brainhub_storage::db::Db;

const DSN_ENV: &str = "BRAINHUB_PG_DSN";
const ADMIN_DATABASE: &str = "postgres";

/// A per-test Postgres database with the knowledge schema already installed.
///
/// Call [`TestDatabase::cleanup`] at the end of the test. A database left behind by a panicking
/// test keeps its `brainhub_test_` prefix so it can be dropped by hand.
pub struct TestDatabase {
	name: String,
	admin_options: PgConnectOptions,
	db: Db,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base_options = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::Message(format!("Failed to parse {DSN_ENV}: {err}.")))?;
		let admin_options = base_options.clone().database(ADMIN_DATABASE);
		let name = format!("brainhub_test_{}", Uuid::new_v4().simple());
		let create_sql = format!(r#"CREATE DATABASE "{name}""#);
		let mut admin = PgConnection::connect_with(&admin_options).await?;

		sqlx::query(&create_sql).execute(&mut admin).await?;
		admin.close().await?;

		let cfg = brainhub_config::Postgres {
			dsn: base_options.database(&name).to_url_lossy().to_string(),
			pool_max_conns: 2,
		};
		let db = Db::connect(&cfg).await?;

		db.ensure_schema().await?;

		Ok(Self { name, admin_options, db })
	}

	pub fn db(&self) -> &Db {
		&self.db
	}

	pub async fn cleanup(self) -> Result<()> {
		self.db.pool.close().await;

		let drop_sql = format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE)"#, self.name);
		let mut admin = PgConnection::connect_with(&self.admin_options).await?;

		sqlx::query(&drop_sql).execute(&mut admin).await?;
		admin.close().await?;

		Ok(())
	}
}

pub fn env_dsn() -> Option<String> {
	env::var(DSN_ENV).ok()
}
