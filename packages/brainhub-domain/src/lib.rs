pub mod keyword;
pub mod knowledge;
pub mod llm_json;
pub mod ranking;
