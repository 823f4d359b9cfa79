//! Registry file discovery.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::RegistryError;

/// Finds the registry file on disk.
///
/// An explicit override path is tried first. When it is unset or does not
/// point at a regular file, each search directory is probed for each accepted
/// file name in turn. The first regular file found wins.
#[derive(Debug, Clone, Default)]
pub struct SourceLocator {
	override_path: Option<PathBuf>,
	dirs: Vec<PathBuf>,
	file_names: Vec<String>,
}

impl SourceLocator {
	pub fn new(override_path: Option<PathBuf>, dirs: impl IntoIterator<Item = PathBuf>, file_names: impl IntoIterator<Item = String>) -> Self {
		let mut unique: Vec<PathBuf> = Vec::new();
		for dir in dirs {
			let dir = absolute(&dir);
			if !unique.contains(&dir) {
				unique.push(dir);
			}
		}
		Self {
			override_path: override_path.map(|p| absolute(&p)),
			dirs: unique,
			file_names: file_names.into_iter().collect(),
		}
	}

	pub fn override_path(&self) -> Option<&Path> {
		self.override_path.as_deref()
	}

	pub fn dirs(&self) -> &[PathBuf] {
		&self.dirs
	}

	/// Probe order after the override: every file name in the first
	/// directory, then every file name in the next.
	pub fn candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
		self.dirs
			.iter()
			.flat_map(|dir| self.file_names.iter().map(move |name| dir.join(name)))
	}

	pub fn locate(&self) -> Result<PathBuf, RegistryError> {
		let mut searched = Vec::new();

		if let Some(path) = &self.override_path {
			if is_file(path) {
				info!(path = %path.display(), "CADASTUR registry located via override");
				return Ok(path.clone());
			}
			warn!(path = %path.display(), "CADASTUR override path unavailable, probing candidate directories");
			searched.push(path.clone());
		}

		for candidate in self.candidates() {
			if is_file(&candidate) {
				info!(path = %candidate.display(), "CADASTUR registry located in candidate directory");
				return Ok(candidate);
			}
			searched.push(candidate);
		}

		debug!(searched = searched.len(), "no CADASTUR registry file found");
		Err(RegistryError::Unavailable { searched })
	}
}

/// Directories probed when no search path is configured.
///
/// Working directory, its `public` and `static` children, its parent, the
/// conventional web root, then the executable's directory and two ancestors.
pub fn default_search_dirs() -> Vec<PathBuf> {
	let mut dirs = Vec::new();
	if let Ok(cwd) = std::env::current_dir() {
		dirs.push(cwd.join("public"));
		dirs.push(cwd.join("static"));
		if let Some(parent) = cwd.parent() {
			dirs.push(parent.to_path_buf());
		}
		dirs.insert(0, cwd);
	}
	dirs.push(PathBuf::from("/var/www/html"));

	let exe = std::env::current_exe().ok();
	if let Some(exe_dir) = exe.as_deref().and_then(Path::parent) {
		dirs.extend(exe_dir.ancestors().take(3).map(Path::to_path_buf));
	}
	dirs
}

fn absolute(path: &Path) -> PathBuf {
	std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn is_file(path: &Path) -> bool {
	std::fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use pretty_assertions::assert_eq;

	use super::*;

	fn names() -> Vec<String> {
		vec!["BD_CADASTUR.csv".to_string(), "CADASTUR.csv".to_string()]
	}

	#[test]
	fn override_wins_over_directories() {
		let temp_dir = tempfile::tempdir().expect("create tempdir");
		let custom = temp_dir.path().join("export.csv");
		fs::write(&custom, "NOME;NUMERO_CADASTUR\n").expect("write override");
		fs::write(temp_dir.path().join("BD_CADASTUR.csv"), "x").expect("write candidate");

		let locator = SourceLocator::new(Some(custom.clone()), [temp_dir.path().to_path_buf()], names());
		assert_eq!(locator.locate().unwrap(), custom);
	}

	#[test]
	fn missing_override_falls_back_to_directories() {
		let temp_dir = tempfile::tempdir().expect("create tempdir");
		let fallback = temp_dir.path().join("CADASTUR.csv");
		fs::write(&fallback, "x").expect("write candidate");

		let locator = SourceLocator::new(Some(temp_dir.path().join("missing.csv")), [temp_dir.path().to_path_buf()], names());
		assert_eq!(locator.locate().unwrap(), fallback);
	}

	#[test]
	fn first_directory_then_first_name_wins() {
		let temp_dir = tempfile::tempdir().expect("create tempdir");
		let first = temp_dir.path().join("first");
		let second = temp_dir.path().join("second");
		fs::create_dir_all(&first).expect("create first");
		fs::create_dir_all(&second).expect("create second");
		fs::write(first.join("CADASTUR.csv"), "x").expect("write first");
		fs::write(second.join("BD_CADASTUR.csv"), "x").expect("write second");

		let locator = SourceLocator::new(None, [first.clone(), second], names());
		assert_eq!(locator.locate().unwrap(), first.join("CADASTUR.csv"));
	}

	#[test]
	fn directories_named_like_the_file_are_skipped() {
		let temp_dir = tempfile::tempdir().expect("create tempdir");
		fs::create_dir_all(temp_dir.path().join("BD_CADASTUR.csv")).expect("create decoy dir");
		fs::write(temp_dir.path().join("CADASTUR.csv"), "x").expect("write candidate");

		let locator = SourceLocator::new(None, [temp_dir.path().to_path_buf()], names());
		assert_eq!(locator.locate().unwrap(), temp_dir.path().join("CADASTUR.csv"));
	}

	#[test]
	fn nothing_found_lists_every_probe() {
		let temp_dir = tempfile::tempdir().expect("create tempdir");
		let override_path = temp_dir.path().join("missing.csv");
		let locator = SourceLocator::new(Some(override_path.clone()), [temp_dir.path().to_path_buf()], names());

		let Err(RegistryError::Unavailable { searched }) = locator.locate() else {
			panic!("expected Unavailable");
		};
		assert_eq!(
			searched,
			vec![
				override_path,
				temp_dir.path().join("BD_CADASTUR.csv"),
				temp_dir.path().join("CADASTUR.csv"),
			]
		);
	}

	#[test]
	fn duplicate_directories_are_probed_once() {
		let temp_dir = tempfile::tempdir().expect("create tempdir");
		let dir = temp_dir.path().to_path_buf();
		let locator = SourceLocator::new(None, [dir.clone(), dir.clone()], names());
		assert_eq!(locator.dirs(), [dir]);
		assert_eq!(locator.candidates().count(), 2);
	}

	#[test]
	fn default_dirs_start_with_working_directory() {
		let dirs = default_search_dirs();
		let cwd = std::env::current_dir().expect("cwd");
		assert_eq!(dirs.first(), Some(&cwd));
		assert!(dirs.contains(&PathBuf::from("/var/www/html")));
	}
}
