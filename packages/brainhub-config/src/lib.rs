mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Analyze, Chat, Config, IdentityProviderConfig, LlmProviderConfig, Postgres, Providers, Search,
	Security, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for (label, provider) in
		[("generation", &cfg.providers.generation), ("chat", &cfg.providers.chat)]
	{
		if provider.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
		if provider.model.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} model must be non-empty."),
			});
		}
		if provider.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
		if !provider.temperature.is_finite() || !(0.0..=2.0).contains(&provider.temperature) {
			return Err(Error::Validation {
				message: format!("Provider {label} temperature must be in the range 0.0-2.0."),
			});
		}
	}

	if cfg.providers.identity.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "Provider identity api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.identity.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "Provider identity timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.dispatch_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.dispatch_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.content_preview_chars == 0 {
		return Err(Error::Validation {
			message: "search.content_preview_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.analyze.max_content_chars == 0 {
		return Err(Error::Validation {
			message: "analyze.max_content_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.chat.context_items == 0 {
		return Err(Error::Validation {
			message: "chat.context_items must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for provider in [&mut cfg.providers.generation, &mut cfg.providers.chat] {
		provider.api_base = provider.api_base.trim_end_matches('/').to_string();
	}

	cfg.providers.identity.api_base =
		cfg.providers.identity.api_base.trim_end_matches('/').to_string();
}
