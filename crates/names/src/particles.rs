use serde::{Deserialize, Serialize};

use crate::normalize;

/// Linking particles registries include or omit inconsistently.
pub const DEFAULT_PARTICLES: &[&str] = &["DE", "DA", "DO", "DOS", "DAS", "E"];

/// Set of name tokens ignored by [`is_loose_match`].
///
/// Tokens are stored in normalized form, so `"dos"` and `"DOS"` configure the
/// same particle. Deserializes from a plain list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ParticleSet {
	tokens: Vec<String>,
}

impl ParticleSet {
	pub fn new<I, S>(particles: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut tokens: Vec<String> = Vec::new();
		for particle in particles {
			let token = normalize(particle.as_ref());
			if !token.is_empty() && !tokens.contains(&token) {
				tokens.push(token);
			}
		}
		Self { tokens }
	}

	/// A set that ignores nothing; loose matching degrades to token-set equality.
	pub fn empty() -> Self {
		Self { tokens: Vec::new() }
	}

	pub fn contains(&self, token: &str) -> bool {
		self.tokens.iter().any(|t| t == token)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

impl Default for ParticleSet {
	fn default() -> Self {
		Self::new(DEFAULT_PARTICLES)
	}
}

impl From<Vec<String>> for ParticleSet {
	fn from(particles: Vec<String>) -> Self {
		Self::new(particles)
	}
}

impl From<ParticleSet> for Vec<String> {
	fn from(set: ParticleSet) -> Self {
		set.tokens
	}
}

/// Compares two normalized names while tolerating linking particles.
///
/// The names match when, with particles removed, their token sequences are
/// equal. Failing that, they match when the token set of one contains the
/// other's and every extra token is a particle. Both names need at least one
/// token outside `particles`; two particle-only names never match loosely.
///
/// Inputs are expected to come from [`normalize`]; raw strings compare
/// case- and accent-sensitively.
pub fn is_loose_match(a: &str, b: &str, particles: &ParticleSet) -> bool {
	let left: Vec<&str> = a.split_whitespace().collect();
	let right: Vec<&str> = b.split_whitespace().collect();

	let left_core: Vec<&str> = left.iter().copied().filter(|t| !particles.contains(t)).collect();
	let right_core: Vec<&str> = right.iter().copied().filter(|t| !particles.contains(t)).collect();
	if left_core.is_empty() || right_core.is_empty() {
		return false;
	}
	if left_core == right_core {
		return true;
	}

	covers_with_particles(&left, &right, particles) || covers_with_particles(&right, &left, particles)
}

/// `wide` holds every token of `narrow`, and whatever else it holds is a particle.
fn covers_with_particles(wide: &[&str], narrow: &[&str], particles: &ParticleSet) -> bool {
	narrow.iter().all(|t| wide.contains(t)) && wide.iter().filter(|t| !narrow.contains(*t)).all(|t| particles.contains(t))
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("JULIELI FERRARI DOS SANTOS", "JULIELI FERRARI SANTOS")]
	#[case("JOAO DA SILVA", "JOAO SILVA")]
	#[case("MARIA DE LOURDES E SOUZA", "MARIA LOURDES SOUZA")]
	#[case("ANA DO CARMO", "ANA DA CARMO")]
	#[case("PEDRO ALVES", "PEDRO ALVES")]
	fn particles_are_ignored(#[case] a: &str, #[case] b: &str) {
		let particles = ParticleSet::default();
		assert!(is_loose_match(a, b, &particles));
		assert!(is_loose_match(b, a, &particles));
	}

	#[rstest]
	#[case("JULIELI FERRARI DOS SANTOS", "OUTRA PESSOA")]
	#[case("JOAO DA SILVA", "JOAO SILVA SAURO")]
	#[case("JOAO SILVA", "JOAO")]
	#[case("DE DA", "DO DOS")]
	#[case("", "JOAO")]
	fn different_names_do_not_match(#[case] a: &str, #[case] b: &str) {
		let particles = ParticleSet::default();
		assert!(!is_loose_match(a, b, &particles));
	}

	#[test]
	fn reordered_tokens_match_as_sets() {
		let particles = ParticleSet::default();
		assert!(is_loose_match("SANTOS JULIELI DOS", "JULIELI SANTOS", &particles));
	}

	#[test]
	fn particle_set_is_configuration() {
		let defaults = ParticleSet::default();
		assert!(!is_loose_match("ANA VON BRAUN", "ANA BRAUN", &defaults));

		let custom = ParticleSet::new(["von", "de"]);
		assert!(is_loose_match("ANA VON BRAUN", "ANA BRAUN", &custom));
		assert!(!is_loose_match("JOAO DOS SANTOS", "JOAO SANTOS", &custom));
	}

	#[test]
	fn particle_set_normalizes_and_dedups() {
		let set = ParticleSet::new([" dos ", "DOS", "", "Dà"]);
		assert_eq!(set.iter().collect::<Vec<_>>(), ["DOS", "DA"]);
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn particle_set_deserializes_from_list() {
		#[derive(Deserialize)]
		struct Wrapper {
			particles: ParticleSet,
		}

		let parsed: Wrapper = toml::from_str(r#"particles = ["de", "van"]"#).unwrap();
		assert!(parsed.particles.contains("DE"));
		assert!(parsed.particles.contains("VAN"));
		assert!(!parsed.particles.contains("DOS"));
	}
}
