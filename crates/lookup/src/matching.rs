//! Claimed-name validation against one index snapshot.

use cadastur_names::{ParticleSet, digits_only, is_loose_match, normalize};
use serde::Serialize;

use crate::RegistryIndex;

/// Outcome of checking a claimed name against a registration number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
	/// The claimed name matched an entry, exactly or loosely.
	pub valid: bool,
	/// The match was on the normalized name itself, not via particle elision.
	pub exact_match: bool,
	/// The registry holds at least one entry for the number.
	pub number_exists: bool,
	/// Raw spelling of the matched entry.
	pub matched_name: Option<String>,
	pub normalized_matched_name: Option<String>,
	/// Raw spellings recorded for the number, in file order, duplicates kept.
	pub available_names: Vec<String>,
}

/// Validates `name` against the entries recorded for `number`.
///
/// `number` may carry punctuation; only its digits are used. Exact matches
/// take precedence over loose ones, and within each kind the earliest entry
/// in file order wins.
pub fn match_entries(index: &RegistryIndex, name: &str, number: &str, particles: &ParticleSet) -> ValidationResult {
	let number = digits_only(number);
	if number.is_empty() {
		return ValidationResult::default();
	}

	let entries = index.get(&number);
	if entries.is_empty() {
		return ValidationResult::default();
	}

	let mut result = ValidationResult {
		number_exists: true,
		available_names: entries.iter().map(|entry| entry.raw_name().to_string()).collect(),
		..ValidationResult::default()
	};

	let claimed = normalize(name);
	if claimed.is_empty() {
		return result;
	}

	let exact = entries.iter().find(|entry| entry.normalized_name() == claimed);
	let matched = exact.or_else(|| {
		entries
			.iter()
			.find(|entry| is_loose_match(&claimed, entry.normalized_name(), particles))
	});

	if let Some(entry) = matched {
		result.valid = true;
		result.exact_match = exact.is_some();
		result.matched_name = Some(entry.raw_name().to_string());
		result.normalized_matched_name = Some(entry.normalized_name().to_string());
	}
	result
}
