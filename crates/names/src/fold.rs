use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const BOM: char = '\u{FEFF}';

/// Returns the comparison key for a person's name.
///
/// Leading byte-order marks and whitespace are dropped, diacritics are
/// removed through canonical decomposition, letters are uppercased and
/// whitespace runs collapse to a single space. Blank input yields an empty
/// string, which callers must treat as "no name given".
pub fn normalize(raw: &str) -> String {
	let folded = fold(strip_leading(raw));
	let mut out = String::with_capacity(folded.len());
	for token in folded.split_whitespace() {
		if !out.is_empty() {
			out.push(' ');
		}
		out.push_str(token);
	}
	out
}

/// Returns the lookup key for a CSV header cell.
///
/// `"Número do Cadastur"` becomes `"NUMERO_DO_CADASTUR"`: every run of
/// characters outside `[A-Z0-9]` is replaced by one underscore.
pub fn normalize_header(raw: &str) -> String {
	let folded = fold(strip_leading(raw).trim_end());
	let mut out = String::with_capacity(folded.len());
	let mut in_gap = false;
	for ch in folded.chars() {
		if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
			out.push(ch);
			in_gap = false;
		} else if !in_gap {
			out.push('_');
			in_gap = true;
		}
	}
	out
}

/// Keeps only the ASCII digits of a registration number.
pub fn digits_only(raw: &str) -> String {
	raw.chars().filter(char::is_ascii_digit).collect()
}

fn strip_leading(raw: &str) -> &str {
	raw.trim_start_matches(|c: char| c == BOM || c.is_whitespace())
}

fn fold(s: &str) -> String {
	s.to_uppercase()
		.nfd()
		.filter(|&c| !is_combining_mark(c))
		.collect()
}
