//! Errors surfaced to callers of [`crate::generate`].
//!
//! Only configuration mistakes reach this type; internal infeasibility
//! signals encountered while searching for a clue set are retried
//! transparently and never escape the crate (see [`crate::generator`]).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors that can occur when validating a [`crate::GenerationRequest`] or
/// the [`crate::Table`] it wraps.
pub enum GenerationError {
	#[error("level must be between 1 and 20, found {0}")]
	/// The requested difficulty level was outside `[1..20]`.
	InvalidLevel(u8),
	#[error("too few objects: puzzle needs at least {needed} columns, found {found}")]
	/// The table did not have enough columns for the requested level.
	TooFewObjects {
		/// Minimum number of columns required at the requested level.
		needed: usize,
		/// Number of columns the table actually had.
		found: usize,
	},
	#[error("table must have at least one attribute row")]
	/// The table had zero attribute rows.
	NoAttributes,
	#[error("attribute row `{row}' has {found} values, expected {expected}")]
	/// An attribute row's column count did not match the others.
	InconsistentColumns {
		/// Column count shared by the other rows.
		expected: usize,
		/// Column count found in the offending row.
		found: usize,
		/// Name of the offending row.
		row: String,
	},
	#[error("attribute row `{row}' contains the value `{value}' more than once")]
	/// An attribute row assigned the same value to more than one column,
	/// which would break the row-bijection invariant.
	DuplicateValue {
		/// Name of the offending row.
		row: String,
		/// The duplicated value, rendered for display.
		value: String,
	},
	#[error("tries must be at least 1")]
	/// The generator attempt budget was zero.
	InvalidTries,
}
