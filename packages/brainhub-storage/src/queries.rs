use crate::{
	Error, Result,
	db::Db,
	models::{KnowledgeRow, NewKnowledgeRow},
};

const ITEM_COLUMNS: &str = "\
id,
user_id,
title,
content,
type AS kind,
tags,
summary,
source_url,
created_at";

pub async fn insert_item(db: &Db, item: &NewKnowledgeRow) -> Result<KnowledgeRow> {
	if item.user_id.trim().is_empty() {
		return Err(Error::InvalidArgument("user_id must be non-empty.".to_string()));
	}

	let sql = format!(
		"\
INSERT INTO knowledge_items (
	user_id,
	title,
	content,
	type,
	tags,
	summary,
	source_url
)
VALUES ($1, $2, $3, $4, $5, $6, $7)
RETURNING {ITEM_COLUMNS}"
	);
	let row = sqlx::query_as::<_, KnowledgeRow>(&sql)
		.bind(item.user_id.as_str())
		.bind(item.title.as_str())
		.bind(item.content.as_str())
		.bind(item.kind.as_str())
		.bind(&item.tags)
		.bind(item.summary.as_str())
		.bind(item.source_url.as_deref())
		.fetch_one(&db.pool)
		.await?;

	Ok(row)
}

/// Items owned by `user_id`, newest first.
pub async fn list_items(db: &Db, user_id: &str, limit: Option<u32>) -> Result<Vec<KnowledgeRow>> {
	if user_id.trim().is_empty() {
		return Err(Error::InvalidArgument("user_id must be non-empty.".to_string()));
	}

	let sql = format!(
		"\
SELECT {ITEM_COLUMNS}
FROM knowledge_items
WHERE user_id = $1
ORDER BY created_at DESC, id DESC
LIMIT $2"
	);
	// LIMIT NULL means no limit in Postgres.
	let rows = sqlx::query_as::<_, KnowledgeRow>(&sql)
		.bind(user_id)
		.bind(limit.map(i64::from))
		.fetch_all(&db.pool)
		.await?;

	Ok(rows)
}
