use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KnowledgeRow {
	pub id: i64,
	pub user_id: String,
	pub title: String,
	pub content: String,
	pub kind: String,
	pub tags: Vec<String>,
	pub summary: String,
	pub source_url: Option<String>,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewKnowledgeRow {
	pub user_id: String,
	pub title: String,
	pub content: String,
	pub kind: String,
	pub tags: Vec<String>,
	pub summary: String,
	pub source_url: Option<String>,
}
