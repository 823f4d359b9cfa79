//! Header resolution for the columns the index needs.
//!
//! Exports have renamed their columns over the years. Each logical column is
//! matched against an ordered list of accepted spellings, compared after
//! [`cadastur_names::normalize_header`]. Supporting a new dialect means adding
//! a spelling to [`COLUMN_SYNONYMS`].

/// Logical column read from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
	/// Guide's full name.
	Name,
	/// Registration number, possibly punctuated.
	Number,
}

/// Accepted header spellings per column, most preferred first.
pub const COLUMN_SYNONYMS: &[(Column, &[&str])] = &[
	(
		Column::Name,
		&["NOME_COMPLETO", "NOME", "NOME_COMPLETO_DO_GUIA", "NOME_DO_GUIA"],
	),
	(
		Column::Number,
		&[
			"NUMERO_CADASTUR",
			"NUMERO_DO_CADASTUR",
			"NUMERO_DO_CERTIFICADO",
			"NUMERO_CADASTRU",
		],
	),
];

impl Column {
	pub fn label(self) -> &'static str {
		match self {
			Column::Name => "name",
			Column::Number => "registration number",
		}
	}

	pub fn synonyms(self) -> &'static [&'static str] {
		COLUMN_SYNONYMS
			.iter()
			.find(|(column, _)| *column == self)
			.map(|(_, synonyms)| *synonyms)
			.unwrap_or(&[])
	}

	/// Position of the first synonym present in `headers`.
	///
	/// Synonym order decides, not header order: a file with both `NOME` and
	/// `NOME_COMPLETO` resolves to `NOME_COMPLETO`.
	pub fn find(self, headers: &[String]) -> Option<usize> {
		self.synonyms()
			.iter()
			.find_map(|synonym| headers.iter().position(|header| header == synonym))
	}
}

/// Field positions of the required columns in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
	pub name: usize,
	pub number: usize,
}

impl ColumnMap {
	/// Resolves both columns from normalized headers, or reports the first missing one.
	pub fn resolve(headers: &[String]) -> Result<Self, Column> {
		let name = Column::Name.find(headers).ok_or(Column::Name)?;
		let number = Column::Number.find(headers).ok_or(Column::Number)?;
		Ok(Self { name, number })
	}

	/// Rows with fewer fields cannot supply both columns.
	pub fn min_fields(&self) -> usize {
		self.name.max(self.number) + 1
	}
}
