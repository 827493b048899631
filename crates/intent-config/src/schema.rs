//! Configuration validation utilities.

use alloy::primitives::{Address, B256};
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// Error that occurs when a required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// Error that occurs when a field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// Error that occurs when field type is incorrect.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Type of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	String,
	Integer { min: Option<i64>, max: Option<i64> },
	Boolean,
	/// Hex string holding a 20-byte address.
	Address,
	/// Hex string holding a 32-byte word.
	Bytes32,
	/// Either of the above; addresses are widened.
	WideId,
	Array(Box<FieldType>),
	Table(Schema),
}

/// Type alias for field validator functions.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A field definition with name and type.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom validator, run after the type check passes.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}

	fn check(&self, value: &toml::Value) -> Result<(), ValidationError> {
		validate_field_type(&self.name, value, &self.field_type)?;

		if let Some(validator) = &self.validator {
			validator(value).map_err(|message| ValidationError::InvalidValue {
				field: self.name.clone(),
				message,
			})?;
		}
		Ok(())
	}
}

/// Schema definition with required and optional fields.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			field.check(value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				field.check(value)?;
			}
		}

		Ok(())
	}
}

fn type_mismatch(field_name: &str, expected: &str, value: &toml::Value) -> ValidationError {
	ValidationError::TypeMismatch {
		field: field_name.to_string(),
		expected: expected.to_string(),
		actual: value.type_str().to_string(),
	}
}

fn hex_field<'a>(field_name: &str, value: &'a toml::Value) -> Result<&'a str, ValidationError> {
	value
		.as_str()
		.ok_or_else(|| type_mismatch(field_name, "hex string", value))
}

fn invalid(field_name: &str, message: String) -> ValidationError {
	ValidationError::InvalidValue {
		field: field_name.to_string(),
		message,
	}
}

/// Validates that a value matches the expected field type.
fn validate_field_type(
	field_name: &str,
	value: &toml::Value,
	expected_type: &FieldType,
) -> Result<(), ValidationError> {
	match expected_type {
		FieldType::String => {
			if !value.is_str() {
				return Err(type_mismatch(field_name, "string", value));
			}
		}
		FieldType::Integer { min, max } => {
			let int_val = value
				.as_integer()
				.ok_or_else(|| type_mismatch(field_name, "integer", value))?;

			if let Some(min_val) = min {
				if int_val < *min_val {
					return Err(invalid(
						field_name,
						format!("Value {} is less than minimum {}", int_val, min_val),
					));
				}
			}

			if let Some(max_val) = max {
				if int_val > *max_val {
					return Err(invalid(
						field_name,
						format!("Value {} is greater than maximum {}", int_val, max_val),
					));
				}
			}
		}
		FieldType::Boolean => {
			if !value.is_bool() {
				return Err(type_mismatch(field_name, "boolean", value));
			}
		}
		FieldType::Address => {
			let s = hex_field(field_name, value)?;
			s.parse::<Address>()
				.map_err(|e| invalid(field_name, format!("Invalid address {}: {}", s, e)))?;
		}
		FieldType::Bytes32 => {
			let s = hex_field(field_name, value)?;
			s.parse::<B256>()
				.map_err(|e| invalid(field_name, format!("Invalid bytes32 {}: {}", s, e)))?;
		}
		FieldType::WideId => {
			let s = hex_field(field_name, value)?;
			if s.parse::<Address>().is_err() && s.parse::<B256>().is_err() {
				return Err(invalid(
					field_name,
					format!("{} is neither an address nor a bytes32 value", s),
				));
			}
		}
		FieldType::Array(inner_type) => {
			let array = value
				.as_array()
				.ok_or_else(|| type_mismatch(field_name, "array", value))?;

			for (i, item) in array.iter().enumerate() {
				validate_field_type(&format!("{}[{}]", field_name, i), item, inner_type)?;
			}
		}
		FieldType::Table(schema) => {
			schema.validate(value).map_err(|e| match e {
				ValidationError::MissingField(f) => {
					ValidationError::MissingField(format!("{}.{}", field_name, f))
				}
				ValidationError::InvalidValue { field, message } => ValidationError::InvalidValue {
					field: format!("{}.{}", field_name, field),
					message,
				},
				ValidationError::TypeMismatch {
					field,
					expected,
					actual,
				} => ValidationError::TypeMismatch {
					field: format!("{}.{}", field_name, field),
					expected,
					actual,
				},
			})?;
		}
	}

	Ok(())
}

/// Trait defining a configuration schema that can validate TOML values.
pub trait ConfigSchema: Send + Sync {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

/// Schema of the prover settings file.
pub struct ProverSettingsSchema;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl ConfigSchema for ProverSettingsSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let chain = Schema::new(
			vec![
				Field::new(
					"chain_id",
					FieldType::Integer {
						min: Some(1),
						max: None,
					},
				),
				Field::new("emitter", FieldType::WideId),
			],
			vec![],
		);

		let storage = Schema::new(
			vec![Field::new("backend", FieldType::String).with_validator(|value| {
				match value.as_str() {
					Some("memory") | Some("file") => Ok(()),
					_ => Err("backend must be \"memory\" or \"file\"".to_string()),
				}
			})],
			vec![Field::new("path", FieldType::String)],
		);

		let signing = Schema::new(
			vec![
				Field::new("name", FieldType::String),
				Field::new("version", FieldType::String),
				Field::new(
					"chain_id",
					FieldType::Integer {
						min: Some(1),
						max: None,
					},
				),
				Field::new("verifying_contract", FieldType::Address),
			],
			vec![],
		);

		let schema = Schema::new(
			// Required fields
			vec![
				Field::new("oracle", FieldType::Address),
				Field::new("inbox", FieldType::Address),
				Field::new("chains", FieldType::Array(Box::new(FieldType::Table(chain))))
					.with_validator(|value| match value.as_array() {
						Some(chains) if !chains.is_empty() => Ok(()),
						_ => Err("At least one chain must be configured".to_string()),
					}),
			],
			// Optional fields
			vec![
				Field::new("batch_policy", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some("per_handle") | Some("atomic") => Ok(()),
						_ => Err("batch_policy must be \"per_handle\" or \"atomic\"".to_string()),
					}
				}),
				Field::new("log_level", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some(level) if LOG_LEVELS.contains(&level) => Ok(()),
						_ => Err(format!("log_level must be one of {:?}", LOG_LEVELS)),
					}
				}),
				Field::new("storage", FieldType::Table(storage)),
				Field::new("signing", FieldType::Table(signing)),
			],
		);

		schema.validate(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(s: &str) -> toml::Value {
		toml::Value::Table(toml::from_str::<toml::Table>(s).unwrap())
	}

	const VALID: &str = r#"
oracle = "0x0000000000000000000000000000000000000001"
inbox = "0x0000000000000000000000000000000000000002"

[[chains]]
chain_id = 10
emitter = "0x0000000000000000000000000000000000000003"

[[chains]]
chain_id = 8453
emitter = "0x0101010101010101010101010101010101010101010101010101010101010101"
"#;

	#[test]
	fn test_valid_config() {
		ProverSettingsSchema.validate(&parse(VALID)).unwrap();
	}

	#[test]
	fn test_missing_inbox() {
		let config = parse(
			r#"
oracle = "0x0000000000000000000000000000000000000001"
chains = []
"#,
		);

		assert!(matches!(
			ProverSettingsSchema.validate(&config),
			Err(ValidationError::MissingField(f)) if f == "inbox"
		));
	}

	#[test]
	fn test_empty_chains() {
		let config = parse(
			r#"
oracle = "0x0000000000000000000000000000000000000001"
inbox = "0x0000000000000000000000000000000000000002"
chains = []
"#,
		);

		assert!(matches!(
			ProverSettingsSchema.validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "chains"
		));
	}

	#[test]
	fn test_nested_errors_carry_path() {
		let config = parse(&format!(
			"{}\n[[chains]]\nchain_id = 1\nemitter = \"0x1234\"\n",
			VALID
		));

		assert!(matches!(
			ProverSettingsSchema.validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "chains[2].emitter"
		));
	}

	#[test]
	fn test_bad_address() {
		let config = parse(&VALID.replace(
			"0x0000000000000000000000000000000000000001",
			"not-an-address",
		));

		assert!(matches!(
			ProverSettingsSchema.validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "oracle"
		));
	}

	#[test]
	fn test_integer_bounds() {
		let schema = Schema::new(
			vec![Field::new(
				"n",
				FieldType::Integer {
					min: Some(1),
					max: Some(5),
				},
			)],
			vec![],
		);

		assert!(schema.validate(&parse("n = 3")).is_ok());
		assert!(schema.validate(&parse("n = 0")).is_err());
		assert!(schema.validate(&parse("n = 6")).is_err());
		assert!(matches!(
			schema.validate(&parse("n = \"3\"")),
			Err(ValidationError::TypeMismatch { .. })
		));
	}

	#[test]
	fn test_unknown_batch_policy() {
		let config = parse(&format!("batch_policy = \"sometimes\"\n{}", VALID));

		assert!(matches!(
			ProverSettingsSchema.validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "batch_policy"
		));
	}
}
