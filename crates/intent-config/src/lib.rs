//! Configuration loading for the intent prover.
//!
//! Settings are read from a TOML, JSON or YAML file. `${VAR}` references are
//! substituted from the environment before parsing, the result is checked
//! against [`ProverSettingsSchema`], and a few settings can be overridden by
//! prefixed environment variables.

use std::collections::HashSet;
use std::env;
use std::path::Path;

use alloy::primitives::Address;
use thiserror::Error;
use tracing::{debug, info};

pub mod schema;
pub mod serde_helpers;
pub mod types;

pub use schema::{ConfigSchema, Field, FieldType, ProverSettingsSchema, Schema, ValidationError};
pub use types::{ChainSettings, ProverSettings, SigningSettings, StorageSettings};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Unsupported config format: {0}")]
	UnsupportedFormat(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Schema error: {0}")]
	SchemaError(#[from] ValidationError),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
	Toml,
	Json,
	Yaml,
}

impl ConfigFormat {
	pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Ok(ConfigFormat::Toml),
			Some("json") => Ok(ConfigFormat::Json),
			Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
			_ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
		}
	}
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "INTENT_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<ProverSettings, ConfigError> {
		let file_path = self.file_path.as_ref().ok_or_else(|| {
			ConfigError::FileNotFound("No configuration file specified".to_string())
		})?;
		let path = Path::new(file_path);
		info!("Loading configuration from {}", path.display());

		let format = ConfigFormat::from_path(path)?;
		let content = match tokio::fs::read_to_string(path).await {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(ConfigError::FileNotFound(file_path.clone()))
			}
			Err(e) => return Err(e.into()),
		};

		self.load_str(&content, format)
	}

	/// Parses, overrides and validates configuration held in memory.
	pub fn load_str(
		&self,
		content: &str,
		format: ConfigFormat,
	) -> Result<ProverSettings, ConfigError> {
		let substituted = self.substitute_env_vars(content)?;
		let value = parse_value(&substituted, format)?;

		ProverSettingsSchema.validate(&value)?;

		let mut settings: ProverSettings = value
			.try_into()
			.map_err(|e: toml::de::Error| ConfigError::ParseError(e.to_string()))?;

		self.apply_env_overrides(&mut settings)?;
		validate_settings(&settings)?;

		debug!(
			chains = settings.chains.len(),
			batch_policy = %settings.batch_policy,
			"Configuration loaded"
		);
		Ok(settings)
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = regex::Regex::new(r"\$\{([^}]+)\}")
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, settings: &mut ProverSettings) -> Result<(), ConfigError> {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			debug!("Overriding log level from environment");
			settings.log_level = log_level;
		}

		if let Ok(policy) = env::var(format!("{}BATCH_POLICY", self.env_prefix)) {
			debug!("Overriding batch policy from environment");
			settings.batch_policy = policy.parse().map_err(ConfigError::ValidationError)?;
		}

		Ok(())
	}
}

fn parse_value(content: &str, format: ConfigFormat) -> Result<toml::Value, ConfigError> {
	let parse_err = |e: String| ConfigError::ParseError(e);

	match format {
		ConfigFormat::Toml => toml::from_str::<toml::Table>(content)
			.map(toml::Value::Table)
			.map_err(|e| parse_err(e.to_string())),
		ConfigFormat::Json => {
			let value: serde_json::Value =
				serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?;
			toml::Value::try_from(value).map_err(|e| parse_err(e.to_string()))
		}
		ConfigFormat::Yaml => {
			let value: serde_yaml::Value =
				serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
			toml::Value::try_from(value).map_err(|e| parse_err(e.to_string()))
		}
	}
}

/// Checks that hold across fields and survive environment overrides.
fn validate_settings(settings: &ProverSettings) -> Result<(), ConfigError> {
	if settings.oracle == Address::ZERO || settings.inbox == Address::ZERO {
		return Err(ConfigError::ValidationError(
			"Oracle and inbox addresses must be non-zero".to_string(),
		));
	}

	let mut seen = HashSet::new();
	for chain in &settings.chains {
		if !seen.insert(chain.chain_id) {
			return Err(ConfigError::ValidationError(format!(
				"Chain {} is configured more than once",
				chain.chain_id
			)));
		}
	}

	if !["trace", "debug", "info", "warn", "error"].contains(&settings.log_level.as_str()) {
		return Err(ConfigError::ValidationError(format!(
			"Invalid log level: {}",
			settings.log_level
		)));
	}

	Ok(())
}
