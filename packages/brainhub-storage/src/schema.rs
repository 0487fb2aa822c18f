pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_knowledge_items.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_knowledge_items.sql")),
				_ => {
					out.push_str(line);
					out.push('\n');
				},
			}

			continue;
		}

		out.push_str(line);
		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn expands_table_includes() {
		let sql = render_schema();

		assert!(sql.contains("CREATE TABLE IF NOT EXISTS knowledge_items"));
		assert!(!sql.contains("\\ir "));
	}
}
