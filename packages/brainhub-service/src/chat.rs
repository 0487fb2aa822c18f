use serde::{Deserialize, Serialize};

use crate::{BrainService, KnowledgeItem, Result};

pub const NO_MESSAGES: &str = "No messages provided.";
pub const NOT_AUTHENTICATED: &str = "User not authenticated.";
pub const NOTES_UNAVAILABLE: &str = "Failed to load notes.";
pub const NO_NOTES: &str = "No notes found for this user.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: String,
	pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
	#[serde(default)]
	pub messages: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
	pub reply: String,
}
impl ChatReply {
	fn new(reply: impl Into<String>) -> Self {
		Self { reply: reply.into() }
	}
}

impl BrainService {
	/// Answers the last message using the caller's most recent items as context.
	///
	/// Missing input, failed authentication, and an empty knowledge base come back as a reply the
	/// user can read. Only a failed generation call is an error.
	pub async fn chat(&self, authorization: Option<&str>, req: ChatRequest) -> Result<ChatReply> {
		let messages = req.messages.unwrap_or_default();
		let Some((question, history)) = messages.split_last() else {
			return Ok(ChatReply::new(NO_MESSAGES));
		};
		let Ok(user_id) = self.authenticate(authorization).await else {
			return Ok(ChatReply::new(NOT_AUTHENTICATED));
		};
		let notes = match self.list(&user_id, Some(self.cfg.chat.context_items)).await {
			Ok(notes) => notes,
			Err(err) => {
				tracing::error!(error = %err, "Failed to load chat context.");

				return Ok(ChatReply::new(NOTES_UNAVAILABLE));
			},
		};

		if notes.is_empty() {
			return Ok(ChatReply::new(NO_NOTES));
		}

		let prompt = chat_prompt(&notes, history, &question.content);
		let reply = self.providers.generation.generate(&self.cfg.providers.chat, &prompt).await?;

		Ok(ChatReply::new(reply))
	}
}

pub fn chat_prompt(notes: &[KnowledgeItem], history: &[ChatMessage], question: &str) -> String {
	let knowledge = notes
		.iter()
		.map(|note| {
			format!(
				"[Date: {}]\nTitle: {}\nType: {}\nTags: {}\nContent: {}\nSummary: {}\n---",
				note.created_at.date(),
				note.title,
				note.kind,
				note.tags.join(","),
				note.content,
				note.summary,
			)
		})
		.collect::<Vec<_>>()
		.join("\n");
	let conversation = history
		.iter()
		.map(|message| {
			let speaker = if message.role == "user" { "User" } else { "Assistant" };

			format!("{speaker}: {}", message.content)
		})
		.collect::<Vec<_>>()
		.join("\n");

	format!(
		"\
You are 'BrainHub', the user's personal second brain.

RULES:
1. Use the \"Knowledge Base\" section to answer questions.
2. Use the \"Conversation History\" to understand context (e.g., if user says \"that note\").
3. If the answer is found, cite the title.
4. Be concise and helpful.

=== KNOWLEDGE BASE ===
{knowledge}

=== CONVERSATION HISTORY ===
{conversation}

=== CURRENT QUESTION ===
{question}
"
	)
}

#[cfg(test)]
mod tests {
	use brainhub_domain::knowledge::KnowledgeType;

	use super::*;

	#[test]
	fn prompt_contains_notes_history_and_question() {
		let notes = vec![KnowledgeItem {
			id: 1,
			title: "Sourdough".to_string(),
			content: "Feed the starter daily.".to_string(),
			kind: KnowledgeType::Note,
			tags: vec!["baking".to_string(), "bread".to_string()],
			summary: "⚡ Insight: consistency".to_string(),
			source_url: None,
			created_at: time::macros::datetime!(2025-02-14 08:30 UTC),
		}];
		let history = vec![
			ChatMessage { role: "user".to_string(), content: "What did I save?".to_string() },
			ChatMessage { role: "assistant".to_string(), content: "A bread note.".to_string() },
		];
		let prompt = chat_prompt(&notes, &history, "How often do I feed it?");

		assert!(prompt.contains("[Date: 2025-02-14]\nTitle: Sourdough\nType: note\n"));
		assert!(prompt.contains("Tags: baking,bread\n"));
		assert!(prompt.contains("User: What did I save?\nAssistant: A bread note."));
		assert!(prompt.contains("=== CURRENT QUESTION ===\nHow often do I feed it?\n"));
	}
}
