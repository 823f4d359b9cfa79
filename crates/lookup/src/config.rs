//! Service configuration.
//!
//! Defaults reproduce the production deployment: two accepted file names,
//! the standard search directories, a fifteen minute cache and the usual
//! Portuguese particles. A TOML file may override any field, and the
//! `CADASTUR_CSV_PATH` environment variable sets the override path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cadastur_names::ParticleSet;
use serde::Deserialize;

use crate::ConfigError;
use crate::source::{SourceLocator, default_search_dirs};

/// Environment variable naming an explicit registry file.
pub const OVERRIDE_ENV: &str = "CADASTUR_CSV_PATH";

/// File names probed in each search directory, in order.
pub const DEFAULT_FILE_NAMES: &[&str] = &["BD_CADASTUR.csv", "CADASTUR.csv"];

/// Cache lifetime of a loaded index.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Registry file tried before any search directory.
	pub override_path: Option<PathBuf>,
	/// Directories probed for [`Self::file_names`], in order.
	pub search_dirs: Vec<PathBuf>,
	pub file_names: Vec<String>,
	/// Seconds a loaded index stays fresh. Zero reloads on every request.
	pub ttl_secs: u64,
	/// Tokens ignored by loose name matching.
	pub particles: ParticleSet,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			override_path: None,
			search_dirs: default_search_dirs(),
			file_names: DEFAULT_FILE_NAMES.iter().map(|name| name.to_string()).collect(),
			ttl_secs: DEFAULT_TTL.as_secs(),
			particles: ParticleSet::default(),
		}
	}
}

impl RegistryConfig {
	/// Defaults plus the process environment.
	pub fn from_env() -> Self {
		Self::default().with_env(|key| std::env::var(key).ok())
	}

	/// Applies environment overrides read through `lookup`.
	///
	/// A blank `CADASTUR_CSV_PATH` counts as unset.
	pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
		if let Some(path) = lookup(OVERRIDE_ENV)
			&& !path.trim().is_empty()
		{
			self.override_path = Some(PathBuf::from(path.trim()));
		}
		self
	}

	/// Parses a TOML document; absent fields keep their defaults.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Reads and parses a TOML configuration file.
	pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}

	pub fn ttl(&self) -> Duration {
		Duration::from_secs(self.ttl_secs)
	}

	pub fn locator(&self) -> SourceLocator {
		SourceLocator::new(
			self.override_path.clone(),
			self.search_dirs.iter().cloned(),
			self.file_names.iter().cloned(),
		)
	}
}
