//! Response vocabulary of the guide signup check.
//!
//! The engine accepts any non-empty digit string. The signup endpoint is
//! stricter: it requires a name and an eleven digit number before querying,
//! and reports the result with stable codes and status numbers. This module
//! holds that mapping so any HTTP layer can reuse it unchanged.

use cadastur_names::digits_only;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::{RegistryError, RegistryService, ValidationResult};

/// Length of a registration number once punctuation is removed.
pub const REGISTRATION_NUMBER_DIGITS: usize = 11;

/// A signup check as submitted, sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
	name: String,
	number: String,
}

/// Why a request was refused before reaching the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestRejection {
	#[error("Nome é obrigatório")]
	NameRequired,
	#[error("Número CADASTUR deve conter 11 dígitos")]
	InvalidNumberLength { digits: usize },
}

impl RequestRejection {
	pub fn code(self) -> &'static str {
		match self {
			Self::NameRequired => "NAME_REQUIRED",
			Self::InvalidNumberLength { .. } => "INVALID_NUMBER_LENGTH",
		}
	}
}

impl RegistrationRequest {
	/// Trims the name and strips everything but digits from the number.
	pub fn new(name: &str, number: &str) -> Self {
		Self {
			name: name.trim().to_string(),
			number: digits_only(number),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn number(&self) -> &str {
		&self.number
	}

	pub fn check(&self) -> Result<(), RequestRejection> {
		if self.name.is_empty() {
			return Err(RequestRejection::NameRequired);
		}
		if self.number.len() != REGISTRATION_NUMBER_DIGITS {
			return Err(RequestRejection::InvalidNumberLength {
				digits: self.number.len(),
			});
		}
		Ok(())
	}
}

/// Final answer for a signup check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
	/// The request itself was malformed.
	Rejected(RequestRejection),
	NumberNotFound,
	/// The number exists but no recorded spelling matches the claimed name.
	NameMismatch { suggestions: Vec<String> },
	Confirmed {
		exact_match: bool,
		official_name: String,
		normalized_official_name: String,
		suggestions: Vec<String>,
	},
	/// The registry could not be loaded; `code` is [`RegistryError::code`].
	RegistryUnavailable { code: &'static str },
}

impl Verdict {
	/// Runs the full check: request validation, registry lookup, mapping.
	pub fn evaluate(service: &RegistryService, name: &str, number: &str) -> Self {
		let request = RegistrationRequest::new(name, number);
		if let Err(rejection) = request.check() {
			debug!(code = rejection.code(), "CADASTUR check rejected before lookup");
			return Self::Rejected(rejection);
		}
		match service.validate(request.name(), request.number()) {
			Ok(result) => Self::from_result(result),
			Err(error) => Self::from_error(&error),
		}
	}

	pub fn from_result(result: ValidationResult) -> Self {
		if !result.number_exists {
			return Self::NumberNotFound;
		}
		match (result.valid, result.matched_name, result.normalized_matched_name) {
			(true, Some(official_name), Some(normalized_official_name)) => Self::Confirmed {
				exact_match: result.exact_match,
				official_name,
				normalized_official_name,
				suggestions: result.available_names,
			},
			_ => Self::NameMismatch {
				suggestions: result.available_names,
			},
		}
	}

	pub fn from_error(error: &RegistryError) -> Self {
		Self::RegistryUnavailable { code: error.code() }
	}

	pub fn is_confirmed(&self) -> bool {
		matches!(self, Self::Confirmed { .. })
	}

	pub fn status(&self) -> u16 {
		match self {
			Self::Rejected(_) => 400,
			Self::NumberNotFound => 404,
			Self::NameMismatch { .. } => 409,
			Self::Confirmed { .. } => 200,
			Self::RegistryUnavailable { .. } => 503,
		}
	}

	pub fn code(&self) -> Option<&'static str> {
		match self {
			Self::Rejected(rejection) => Some(rejection.code()),
			Self::NumberNotFound => Some("CADASTUR_NUMBER_NOT_FOUND"),
			Self::NameMismatch { .. } => Some("CADASTUR_NAME_MISMATCH"),
			Self::Confirmed { .. } => None,
			Self::RegistryUnavailable { code } => Some(*code),
		}
	}

	/// User-facing explanation for every outcome except a confirmation.
	pub fn message(&self) -> Option<String> {
		match self {
			Self::Rejected(rejection) => Some(rejection.to_string()),
			Self::NumberNotFound => Some("Número CADASTUR não encontrado na base oficial.".into()),
			Self::NameMismatch { .. } => {
				Some("O nome informado não corresponde ao cadastro oficial. Verifique a grafia conforme CADASTUR.".into())
			}
			Self::Confirmed { .. } => None,
			Self::RegistryUnavailable { .. } => Some("Base oficial CADASTUR indisponível no momento.".into()),
		}
	}

	fn suggestions(&self) -> Option<&[String]> {
		match self {
			Self::NameMismatch { suggestions } | Self::Confirmed { suggestions, .. } => Some(suggestions.as_slice()),
			_ => None,
		}
	}
}

#[derive(Serialize)]
struct Body<'a> {
	valid: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	exact_match: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	official_name: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	normalized_official_name: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	suggestions: Option<&'a [String]>,
	#[serde(skip_serializing_if = "Option::is_none")]
	code: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<String>,
}

/// Serializes to the endpoint's JSON response body.
impl Serialize for Verdict {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let (exact_match, official_name, normalized_official_name) = match self {
			Self::Confirmed {
				exact_match,
				official_name,
				normalized_official_name,
				..
			} => (
				Some(*exact_match),
				Some(official_name.as_str()),
				Some(normalized_official_name.as_str()),
			),
			_ => (None, None, None),
		};
		Body {
			valid: self.is_confirmed(),
			exact_match,
			official_name,
			normalized_official_name,
			suggestions: self.suggestions(),
			code: self.code(),
			message: self.message(),
		}
		.serialize(serializer)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	#[rstest]
	#[case("Julieli", "214.679.858-79", Ok(()))]
	#[case("  ", "21467985879", Err(RequestRejection::NameRequired))]
	#[case("Julieli", "1234567890", Err(RequestRejection::InvalidNumberLength { digits: 10 }))]
	#[case("Julieli", "123456789012", Err(RequestRejection::InvalidNumberLength { digits: 12 }))]
	fn checks_requests(#[case] name: &str, #[case] number: &str, #[case] expected: Result<(), RequestRejection>) {
		assert_eq!(RegistrationRequest::new(name, number).check(), expected);
	}

	#[test]
	fn request_is_sanitized() {
		let request = RegistrationRequest::new("  Julieli Santos ", "214.679.858-79");
		assert_eq!(request.name(), "Julieli Santos");
		assert_eq!(request.number(), "21467985879");
	}

	#[test]
	fn unknown_number_is_not_found() {
		let verdict = Verdict::from_result(ValidationResult::default());
		assert_eq!(verdict, Verdict::NumberNotFound);
		assert_eq!(verdict.status(), 404);
		assert_eq!(verdict.code(), Some("CADASTUR_NUMBER_NOT_FOUND"));
	}

	#[test]
	fn mismatch_carries_suggestions() {
		let verdict = Verdict::from_result(ValidationResult {
			number_exists: true,
			available_names: vec!["JULIELI FERRARI DOS SANTOS".into()],
			..ValidationResult::default()
		});
		assert_eq!(verdict.status(), 409);
		assert_eq!(
			serde_json::to_value(&verdict).unwrap(),
			json!({
				"valid": false,
				"suggestions": ["JULIELI FERRARI DOS SANTOS"],
				"code": "CADASTUR_NAME_MISMATCH",
				"message": "O nome informado não corresponde ao cadastro oficial. Verifique a grafia conforme CADASTUR.",
			})
		);
	}

	#[test]
	fn confirmation_body() {
		let verdict = Verdict::from_result(ValidationResult {
			valid: true,
			exact_match: false,
			number_exists: true,
			matched_name: Some("JULIELI FERRARI DOS SANTOS".into()),
			normalized_matched_name: Some("JULIELI FERRARI DOS SANTOS".into()),
			available_names: vec!["JULIELI FERRARI DOS SANTOS".into()],
		});
		assert!(verdict.is_confirmed());
		assert_eq!(verdict.status(), 200);
		assert_eq!(
			serde_json::to_value(&verdict).unwrap(),
			json!({
				"valid": true,
				"exact_match": false,
				"official_name": "JULIELI FERRARI DOS SANTOS",
				"normalized_official_name": "JULIELI FERRARI DOS SANTOS",
				"suggestions": ["JULIELI FERRARI DOS SANTOS"],
			})
		);
	}

	#[test]
	fn rejection_body() {
		let verdict = Verdict::Rejected(RequestRejection::InvalidNumberLength { digits: 10 });
		assert_eq!(verdict.status(), 400);
		assert_eq!(
			serde_json::to_value(&verdict).unwrap(),
			json!({
				"valid": false,
				"code": "INVALID_NUMBER_LENGTH",
				"message": "Número CADASTUR deve conter 11 dígitos",
			})
		);
	}

	#[test]
	fn registry_errors_are_service_unavailable() {
		let verdict = Verdict::from_error(&RegistryError::Unavailable { searched: Vec::new() });
		assert_eq!(verdict.status(), 503);
		assert_eq!(verdict.code(), Some("CADASTUR_DATA_UNAVAILABLE"));
	}
}
