//! Settings for the checked tree operations, loadable from a JSON file.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use snafu::{ResultExt as _, Snafu};

/// Switches for the checked operations of [`Mount`](crate::tree::Mount).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
	/// Reject string values outside a parameter's documented enumeration.
	/// Vendor extensions often add values, so this can be relaxed.
	pub strict_enumerations: bool,
	/// Reject writes to read-only parameters and row creation in read-only
	/// tables. A CPE populating its own tree turns this off.
	pub enforce_access: bool,
	/// Report unset parameters from partial-path reads.
	pub include_unset: bool,
	/// Upper bound on the rows of any one table created through
	/// [`Mount::add_instance`](crate::tree::Mount::add_instance).
	pub max_table_rows: Option<u32>,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			strict_enumerations: true,
			enforce_access: true,
			include_unset: false,
			max_table_rows: None,
		}
	}
}

impl ModelConfig {
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		serde_json::from_str(json).context(Parse)
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let json = fs::read_to_string(path).context(Read { path })?;
		let config = Self::from_json_str(&json)?;
		tracing::debug!(?config, path = %path.display(), "Loaded model config");
		Ok(config)
	}
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
pub enum ConfigError {
	#[snafu(display("Cannot read {}", path.display()))]
	Read { path: std::path::PathBuf, source: std::io::Error },
	#[snafu(display("Invalid model config"))]
	Parse { source: serde_json::Error },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_fields_take_defaults() {
		let config = ModelConfig::from_json_str(r#"{ "strict_enumerations": false }"#).unwrap();
		assert!(!config.strict_enumerations);
		assert!(config.enforce_access);
		assert_eq!(config.max_table_rows, None);
		assert_eq!(ModelConfig::from_json_str("{}").unwrap(), ModelConfig::default());
	}

	#[test]
	fn test_load_from_file() {
		let name = format!("cwmp-model-config-{}.json", std::process::id());
		let path = std::env::temp_dir().join(name);
		fs::write(&path, r#"{ "enforce_access": false, "max_table_rows": 16 }"#).unwrap();
		let config = ModelConfig::from_path(&path);
		fs::remove_file(&path).unwrap();

		let config = config.unwrap();
		assert!(!config.enforce_access);
		assert!(config.strict_enumerations);
		assert_eq!(config.max_table_rows, Some(16));
	}

	#[test]
	fn test_invalid_config() {
		assert!(matches!(
			ModelConfig::from_json_str(r#"{ "max_table_rows": -1 }"#),
			Err(ConfigError::Parse { .. })
		));
		assert!(matches!(
			ModelConfig::from_path("/nonexistent/cwmp-model.json"),
			Err(ConfigError::Read { .. })
		));
	}
}
