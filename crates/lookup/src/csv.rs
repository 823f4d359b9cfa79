//! Delimited-text splitting for registry exports.
//!
//! Exports come in several regional dialects (comma, semicolon, tab or pipe
//! separated), so the delimiter is inferred from the header instead of being
//! configured. Records never span lines.
//!
//! The `csv` crate is not used here: it needs the delimiter up front, and it
//! only honours quotes at the start of a field, whereas registry rows treat
//! `"` as a quoting toggle wherever it appears.

/// Delimiters tried by [`detect_delimiter`], in tie-break order.
pub const DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Picks the delimiter that splits `header` into the most fields.
///
/// Occurrences are counted without regard to quoting. Ties go to the
/// candidate listed first in [`DELIMITERS`].
pub fn detect_delimiter(header: &str) -> char {
	let mut best = DELIMITERS[0];
	let mut best_count = 0;
	for delimiter in DELIMITERS {
		let count = header.matches(delimiter).count();
		if count > best_count {
			best = delimiter;
			best_count = count;
		}
	}
	best
}

/// Splits one record into fields.
///
/// A double quote toggles quoting wherever it appears; while quoted, the
/// delimiter is literal text and `""` yields one `"`. Quote characters are
/// not part of the returned fields. Fields are returned untrimmed.
pub fn split_record(line: &str, delimiter: char) -> Vec<String> {
	let mut fields = Vec::new();
	let mut current = String::new();
	let mut quoted = false;
	let mut chars = line.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch == '"' {
			if quoted && chars.peek() == Some(&'"') {
				current.push('"');
				chars.next();
			} else {
				quoted = !quoted;
			}
			continue;
		}
		if ch == delimiter && !quoted {
			fields.push(std::mem::take(&mut current));
			continue;
		}
		current.push(ch);
	}
	fields.push(current);
	fields
}
