//! The solution table: the fully-populated input the rest of the crate
//! narrows a clue set around.

use std::collections::HashSet;

use ustr::Ustr;

use crate::error::GenerationError;

/// An opaque domain element (e.g. a name, a color). Equality is by identity,
/// which [`Ustr`] gives us for free since equal strings intern to the same
/// pointer.
pub type Value = Ustr;

/// One category and its `M` values in solution order, e.g. `Nationality:
/// [norwegian, english, ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
	/// Human-readable name of the attribute, used when rendering clues.
	pub name: String,
	/// The value occupying each column, in solution order.
	pub values: Vec<Value>,
}

impl AttributeRow {
	/// Create a new attribute row from a name and an ordered list of values.
	pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
		Self {
			name: name.into(),
			values: values.into_iter().collect(),
		}
	}

	/// The column index at which `value` sits, if it belongs to this row.
	pub(crate) fn column_of(&self, value: Value) -> Option<usize> {
		self.values.iter().position(|&v| v == value)
	}
}

/// The fully-populated solution table: `N` attribute rows, each a bijection
/// from `M` columns to `M` distinct values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
	/// The attribute rows, in the order they were given.
	pub rows: Vec<AttributeRow>,
}

impl Table {
	/// Build a table from its rows without validating it; use
	/// [`Table::validated`] at any boundary that accepts untrusted input.
	pub fn new(rows: Vec<AttributeRow>) -> Self {
		Self { rows }
	}

	/// The number of attribute rows, `N`.
	pub fn n_attributes(&self) -> usize {
		self.rows.len()
	}

	/// The number of columns, `M`. Assumes the table has already been
	/// validated to have at least one row of consistent length.
	pub fn n_columns(&self) -> usize {
		self.rows.first().map_or(0, |r| r.values.len())
	}

	/// Validate the table against the entry constraints in the
	/// specification, returning `self` on success.
	///
	/// Checks, in order: `N >= 1`, every row has the same length `M`, and no
	/// row contains a duplicated value (the row-bijection invariant would
	/// otherwise silently break).
	pub fn validated(self) -> Result<Self, GenerationError> {
		if self.rows.is_empty() {
			return Err(GenerationError::NoAttributes);
		}
		let m = self.rows[0].values.len();
		for row in &self.rows {
			if row.values.len() != m {
				return Err(GenerationError::InconsistentColumns {
					expected: m,
					found: row.values.len(),
					row: row.name.clone(),
				});
			}
			let mut seen = HashSet::with_capacity(row.values.len());
			for &v in &row.values {
				if !seen.insert(v) {
					return Err(GenerationError::DuplicateValue {
						row: row.name.clone(),
						value: v.to_string(),
					});
				}
			}
		}
		Ok(self)
	}
}
