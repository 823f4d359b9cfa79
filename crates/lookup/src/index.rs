//! Parsed registry contents keyed by registration number.
//!
//! # Invariants
//!
//! * Bucket keys are non-empty ASCII digit strings.
//! * Every stored entry has a non-empty `normalized_name`; rows that cannot
//!   produce one are dropped, never stored as placeholders.
//! * Buckets keep file order, duplicates included.
//! * An index is never mutated after [`RegistryIndex::parse`] returns. A reload
//!   builds a new index and replaces the old one wholesale.

use std::path::{Path, PathBuf};

use cadastur_names::{digits_only, normalize, normalize_header};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::RegistryError;
use crate::columns::ColumnMap;
use crate::csv::{detect_delimiter, split_record};


/// One recorded spelling of a guide's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
	raw_name: String,
	normalized_name: String,
}

impl RegistryEntry {
	/// The name field as it appears in the file, trimmed.
	pub fn raw_name(&self) -> &str {
		&self.raw_name
	}

	/// Comparison key produced by [`cadastur_names::normalize`].
	pub fn normalized_name(&self) -> &str {
		&self.normalized_name
	}
}

/// Immutable registry snapshot.
#[derive(Debug, Clone)]
pub struct RegistryIndex {
	buckets: FxHashMap<String, Vec<RegistryEntry>>,
	total: usize,
	source: PathBuf,
	delimiter: char,
}

impl RegistryIndex {
	/// Reads and parses the registry file at `path`.
	pub fn load(path: &Path) -> Result<Self, RegistryError> {
		let bytes = std::fs::read(path).map_err(|source| RegistryError::FileRead {
			path: path.to_path_buf(),
			source,
		})?;
		let index = Self::parse(&decode(bytes), path)?;
		info!(
			path = %path.display(),
			rows = index.total,
			numbers = index.buckets.len(),
			"CADASTUR registry loaded"
		);
		Ok(index)
	}

	/// Parses registry text. `source` is recorded for diagnostics only.
	pub fn parse(content: &str, source: impl Into<PathBuf>) -> Result<Self, RegistryError> {
		let source = source.into();
		let unified = content.replace("\r\n", "\n").replace('\r', "\n");
		let mut lines = unified.lines().map(str::trim).filter(|line| !line.is_empty());

		let Some(header) = lines.next() else {
			return Err(RegistryError::DataEmpty { path: source });
		};
		let header = header.trim_start_matches('\u{FEFF}');
		let delimiter = detect_delimiter(header);
		let headers: Vec<String> = split_record(header, delimiter)
			.iter()
			.map(|field| normalize_header(field))
			.collect();
		let columns = ColumnMap::resolve(&headers).map_err(|missing| RegistryError::DataInvalid {
			path: source.clone(),
			column: missing.label(),
		})?;

		let mut buckets: FxHashMap<String, Vec<RegistryEntry>> = FxHashMap::default();
		let mut total = 0;
		let mut skipped = 0;
		for line in lines {
			match parse_row(line, delimiter, columns) {
				Some((number, entry)) => {
					buckets.entry(number).or_default().push(entry);
					total += 1;
				}
				None => skipped += 1,
			}
		}

		if buckets.is_empty() {
			return Err(RegistryError::DataEmpty { path: source });
		}
		if skipped > 0 {
			debug!(path = %source.display(), skipped, "skipped unusable CADASTUR rows");
		}

		Ok(Self {
			buckets,
			total,
			source,
			delimiter,
		})
	}

	/// Entries recorded for a digits-only registration number, in file order.
	///
	/// Unknown numbers yield an empty slice.
	pub fn get(&self, number: &str) -> &[RegistryEntry] {
		self.buckets.get(number).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn contains_number(&self, number: &str) -> bool {
		!self.get(number).is_empty()
	}

	/// Number of stored entries across all buckets.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of distinct registration numbers.
	pub fn numbers(&self) -> usize {
		self.buckets.len()
	}

	pub fn source(&self) -> &Path {
		&self.source
	}

	pub fn delimiter(&self) -> char {
		self.delimiter
	}
}

fn parse_row(line: &str, delimiter: char, columns: ColumnMap) -> Option<(String, RegistryEntry)> {
	let fields = split_record(line, delimiter);
	if fields.len() < columns.min_fields() {
		return None;
	}

	let raw_name = fields[columns.name].trim();
	let raw_number = fields[columns.number].trim();
	if raw_name.is_empty() || raw_number.is_empty() {
		return None;
	}

	let number = digits_only(raw_number);
	let normalized_name = normalize(raw_name);
	if number.is_empty() || normalized_name.is_empty() {
		return None;
	}

	Some((
		number,
		RegistryEntry {
			raw_name: raw_name.to_string(),
			normalized_name,
		},
	))
}

/// UTF-8 when valid, otherwise Latin-1, the encoding of older official exports.
fn decode(bytes: Vec<u8>) -> String {
	match String::from_utf8(bytes) {
		Ok(text) => text,
		Err(err) => {
			debug!("CADASTUR registry is not UTF-8, decoding as Latin-1");
			err.into_bytes().into_iter().map(char::from).collect()
		}
	}
}
