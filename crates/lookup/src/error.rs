//! Error types for registry loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single registry load attempt.
///
/// None of these are cached: the next load retries from scratch, so fixing
/// the file on disk is enough to recover.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// No registry file exists at the override path or any candidate location.
	#[error("CADASTUR registry not found ({} locations searched)", searched.len())]
	Unavailable {
		/// Every path that was probed, in probe order.
		searched: Vec<PathBuf>,
	},

	/// The registry file was located but could not be read.
	#[error("failed to read CADASTUR registry {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The header lacks a required column.
	#[error("CADASTUR registry {path} has no {column} column")]
	DataInvalid { path: PathBuf, column: &'static str },

	/// The file parsed but produced no usable rows.
	#[error("CADASTUR registry {path} contains no usable rows")]
	DataEmpty { path: PathBuf },
}

impl RegistryError {
	/// Stable machine-readable code, shared with the HTTP error body.
	pub fn code(&self) -> &'static str {
		match self {
			Self::Unavailable { .. } => "CADASTUR_DATA_UNAVAILABLE",
			Self::FileRead { .. } => "CADASTUR_FILE_READ_ERROR",
			Self::DataInvalid { .. } => "CADASTUR_DATA_INVALID",
			Self::DataEmpty { .. } => "CADASTUR_DATA_EMPTY",
		}
	}

	/// Path of the file the failed attempt was working on, if one was located.
	pub fn path(&self) -> Option<&PathBuf> {
		match self {
			Self::Unavailable { .. } => None,
			Self::FileRead { path, .. } | Self::DataInvalid { path, .. } | Self::DataEmpty { path } => Some(path),
		}
	}
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}
