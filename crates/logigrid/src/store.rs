//! The candidate store: for every attribute row and column, the set of
//! values that could still occupy that column.
//!
//! Per §9 of the design, each cell is a fixed-width bitmask over that row's
//! own value ordinals (`M <= 64`), so the per-row bijection rules reduce to
//! plain bitwise operations instead of hash-set churn.

use index_vec::{define_index_type, IndexVec};
use ustr::{Ustr, UstrMap};

use crate::table::Table;

define_index_type! {
	/// Index of an attribute row within a [`Table`]/[`CandidateStore`].
	pub struct AttrIdx = u32;
}

define_index_type! {
	/// Index of a column within a [`Table`]/[`CandidateStore`].
	pub struct ColIdx = u32;
}

/// A bitmask over value ordinals `0..M` within a single attribute row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct ValueMask(u64);

impl ValueMask {
	/// A mask with the first `m` ordinals set.
	pub(crate) fn full(m: usize) -> Self {
		debug_assert!(m <= 64, "candidate store supports at most 64 columns");
		if m == 64 {
			ValueMask(u64::MAX)
		} else {
			ValueMask((1u64 << m) - 1)
		}
	}

	/// A mask with only ordinal `v` set.
	pub(crate) fn singleton(v: usize) -> Self {
		ValueMask(1u64 << v)
	}

	/// An empty mask.
	pub(crate) fn empty() -> Self {
		ValueMask(0)
	}

	pub(crate) fn is_empty(self) -> bool {
		self.0 == 0
	}

	pub(crate) fn len(self) -> u32 {
		self.0.count_ones()
	}

	pub(crate) fn contains(self, v: usize) -> bool {
		self.0 & (1u64 << v) != 0
	}

	pub(crate) fn insert(&mut self, v: usize) {
		self.0 |= 1u64 << v;
	}

	pub(crate) fn remove(&mut self, v: usize) {
		self.0 &= !(1u64 << v);
	}

	/// The single ordinal this mask contains, if it contains exactly one.
	pub(crate) fn only(self) -> Option<usize> {
		if self.len() == 1 {
			Some(self.0.trailing_zeros() as usize)
		} else {
			None
		}
	}

	pub(crate) fn iter(self) -> impl Iterator<Item = usize> {
		let mut bits = self.0;
		std::iter::from_fn(move || {
			if bits == 0 {
				None
			} else {
				let v = bits.trailing_zeros() as usize;
				bits &= bits - 1;
				Some(v)
			}
		})
	}
}

/// Per-row bookkeeping translating between [`Value`](crate::table::Value)s
/// and the ordinals used inside [`ValueMask`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowOrdinals {
	/// Ordinal -> value, i.e. the row's values in solution order.
	by_ordinal: Vec<Ustr>,
	/// Value -> ordinal.
	rank: UstrMap<u32>,
}

impl RowOrdinals {
	fn new(values: &[Ustr]) -> Self {
		let rank = values
			.iter()
			.enumerate()
			.map(|(i, &v)| (v, i as u32))
			.collect();
		Self {
			by_ordinal: values.to_vec(),
			rank,
		}
	}

	fn ordinal(&self, value: Ustr) -> Option<usize> {
		self.rank.get(&value).map(|&r| r as usize)
	}

	fn value(&self, ordinal: usize) -> Ustr {
		self.by_ordinal[ordinal]
	}
}

/// The candidate store `S`. `S[i][j]` is the set of values still possible at
/// attribute row `i`, column `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateStore {
	ordinals: IndexVec<AttrIdx, RowOrdinals>,
	cells: IndexVec<AttrIdx, IndexVec<ColIdx, ValueMask>>,
}

impl CandidateStore {
	/// Build a store in which, for every attribute row, every value is
	/// possible at every column.
	pub fn full(table: &Table) -> Self {
		let m = table.n_columns();
		let ordinals = table
			.rows
			.iter()
			.map(|r| RowOrdinals::new(&r.values))
			.collect();
		let cells = table
			.rows
			.iter()
			.map(|_| -> IndexVec<ColIdx, ValueMask> { vec![ValueMask::full(m); m].into_iter().collect() })
			.collect();
		Self { ordinals, cells }
	}

	/// Number of attribute rows.
	pub(crate) fn n_attributes(&self) -> usize {
		self.cells.len()
	}

	/// Number of columns.
	pub(crate) fn n_columns(&self) -> usize {
		self.cells.first().map_or(0, |row| row.len())
	}

	/// The ordinal of `value` within row `i`, or `None` if it is not a value
	/// of that row.
	pub(crate) fn ordinal_of(&self, i: AttrIdx, value: Ustr) -> Option<usize> {
		self.ordinals[i].ordinal(value)
	}

	/// Whether `value` (a value belonging to row `i`) is still possible at
	/// column `j`.
	pub(crate) fn possible(&self, i: AttrIdx, j: ColIdx, value: Ustr) -> bool {
		match self.ordinal_of(i, value) {
			Some(ord) => self.cells[i][j].contains(ord),
			None => false,
		}
	}

	/// Remove `value` from the candidates of row `i`, column `j`.
	pub(crate) fn exclude(&mut self, i: AttrIdx, j: ColIdx, value: Ustr) -> bool {
		if let Some(ord) = self.ordinal_of(i, value) {
			let mask = &mut self.cells[i][j];
			if mask.contains(ord) {
				mask.remove(ord);
				return true;
			}
		}
		false
	}

	/// `true` if some cell has an empty candidate set.
	pub fn is_dead(&self) -> bool {
		self.cells
			.iter()
			.any(|row| row.iter().any(|c| c.is_empty()))
	}

	/// `true` if every cell has exactly one candidate.
	pub fn is_solved(&self) -> bool {
		self.cells.iter().all(|row| row.iter().all(|c| c.len() == 1))
	}

	/// All `(row, column)` pairs whose candidate set has more than one
	/// member.
	pub(crate) fn unresolved_cells(&self) -> Vec<(AttrIdx, ColIdx)> {
		let mut out = Vec::new();
		for (i, row) in self.cells.iter_enumerated() {
			for (j, c) in row.iter_enumerated() {
				if c.len() > 1 {
					out.push((i, j));
				}
			}
		}
		out
	}

	/// The single value occupying row `i`, column `j`, if resolved.
	pub(crate) fn singleton_value(&self, i: AttrIdx, j: ColIdx) -> Option<Ustr> {
		self.cells[i][j].only().map(|ord| self.ordinals[i].value(ord))
	}

	/// Number of values still possible at row `i`, column `j`.
	pub(crate) fn candidate_count(&self, i: AttrIdx, j: ColIdx) -> u32 {
		self.cells[i][j].len()
	}

	/// The values still possible at row `i`, column `j`.
	pub(crate) fn candidate_values(&self, i: AttrIdx, j: ColIdx) -> Vec<Ustr> {
		self.cells[i][j]
			.iter()
			.map(|ord| self.ordinals[i].value(ord))
			.collect()
	}

	/// Force row `i`, column `j` to `value`, discarding every other
	/// candidate. Used by the solver when branching.
	pub(crate) fn assign(&mut self, i: AttrIdx, j: ColIdx, value: Ustr) {
		if let Some(ord) = self.ordinal_of(i, value) {
			self.cells[i][j] = ValueMask::singleton(ord);
		}
	}

	/// Apply the per-row bijection rules (singleton propagates; unique
	/// column placement) to row `i` once. Returns whether anything changed.
	pub(crate) fn refine_row_bijection(&mut self, i: AttrIdx) -> bool {
		let mut changed = false;
		let row = &mut self.cells[i];
		let m = row.len();

		// Rule 1: singletons propagate.
		let singletons: Vec<(ColIdx, usize)> = row
			.iter_enumerated()
			.filter_map(|(j, c)| c.only().map(|ord| (j, ord)))
			.collect();
		for (j, ord) in &singletons {
			for (k, cell) in row.iter_mut_enumerated() {
				if k != *j && cell.contains(*ord) {
					cell.remove(*ord);
					changed = true;
				}
			}
		}

		// Rule 2: a value appearing in exactly one column's candidate set is
		// assigned there, unless that column is already a singleton.
		for ord in 0..m {
			let mut only_col: Option<ColIdx> = None;
			let mut count = 0;
			for (j, cell) in row.iter_enumerated() {
				if cell.contains(ord) {
					count += 1;
					only_col = Some(j);
				}
			}
			if count == 1 {
				let j = only_col.unwrap();
				let cell = &mut row[j];
				if cell.len() > 1 {
					*cell = ValueMask::singleton(ord);
					changed = true;
				}
			}
		}

		changed
	}
}

#[cfg(test)]
mod tests {
	use ustr::ustr;

	use super::*;
	use crate::table::{AttributeRow, Table};

	fn sample_table() -> Table {
		Table::new(vec![AttributeRow::new(
			"Pet",
			["cat", "dog", "fish"].map(ustr),
		)])
	}

	#[test]
	fn full_store_is_not_solved_or_dead() {
		let table = sample_table();
		let store = CandidateStore::full(&table);
		assert!(!store.is_solved());
		assert!(!store.is_dead());
		assert_eq!(store.unresolved_cells().len(), 3);
	}

	#[test]
	fn singleton_propagates_within_row() {
		let table = sample_table();
		let mut store = CandidateStore::full(&table);
		let i = AttrIdx::new(0);
		store.assign(i, ColIdx::new(0), ustr("cat"));
		let changed = store.refine_row_bijection(i);
		assert!(changed);
		assert!(!store.possible(i, ColIdx::new(1), ustr("cat")));
		assert!(!store.possible(i, ColIdx::new(2), ustr("cat")));
	}

	#[test]
	fn unique_column_placement_assigns() {
		let table = sample_table();
		let mut store = CandidateStore::full(&table);
		let i = AttrIdx::new(0);
		// Remove "dog" from columns 1 and 2, leaving it possible only at column 0.
		store.exclude(i, ColIdx::new(1), ustr("dog"));
		store.exclude(i, ColIdx::new(2), ustr("dog"));
		let changed = store.refine_row_bijection(i);
		assert!(changed);
		assert_eq!(store.singleton_value(i, ColIdx::new(0)), Some(ustr("dog")));
	}

	#[test]
	fn excluding_every_candidate_makes_the_store_dead() {
		let table = sample_table();
		let mut store = CandidateStore::full(&table);
		let i = AttrIdx::new(0);
		for col in 0..3 {
			store.exclude(i, ColIdx::new(col), ustr("cat"));
		}
		// "cat" still has no remaining column, but the cell for "cat" is the
		// *row*'s set of candidates per column, not per value, so force a
		// genuinely empty cell directly to exercise is_dead.
		for value in ["cat", "dog", "fish"] {
			store.exclude(i, ColIdx::new(0), ustr(value));
		}
		assert!(store.is_dead());
	}
}
