//! The propagation kernel: drives a [`CandidateStore`] to a fixed point
//! under the per-row bijection rules and a set of bound [`Clue`]s.

use itertools::Itertools;

use crate::{
	clue::Clue,
	store::{CandidateStore, ColIdx},
};

/// Run one fixed-point pass: repeatedly apply the per-row bijection rules to
/// every attribute row and the witness-tuple pruning rule for every clue,
/// until nothing changes or the store goes dead.
///
/// Returns whether anything changed during the pass (a caller that already
/// knows the store is fresh can skip re-checking).
pub(crate) fn propagate(store: &mut CandidateStore, clues: &[Clue]) -> bool {
	let mut any_change = false;
	loop {
		let mut changed = false;

		for i in 0..store.n_attributes() {
			let i = crate::store::AttrIdx::new(i);
			if store.refine_row_bijection(i) {
				changed = true;
			}
			if store.is_dead() {
				return true;
			}
		}

		for clue in clues {
			if propagate_clue(store, clue) {
				changed = true;
			}
			if store.is_dead() {
				return true;
			}
		}

		if changed {
			any_change = true;
		} else {
			break;
		}
	}
	any_change
}

/// Prune candidate columns that cannot participate in any witness tuple
/// satisfying `clue`'s predicate.
///
/// For each binding `(row, value)` in the clue, the candidate columns are
/// the columns where that value is still possible in that row. The
/// cartesian product of those column sets, filtered to the tuples that
/// satisfy the predicate, gives the set of columns each binding can still
/// legally occupy; anything outside that set is excluded.
fn propagate_clue(store: &mut CandidateStore, clue: &Clue) -> bool {
	let m = store.n_columns();
	let candidate_cols: Vec<Vec<usize>> = clue
		.rows
		.iter()
		.zip(&clue.values)
		.map(|(&row, &value)| {
			(0..m)
				.filter(|&j| store.possible(row, ColIdx::new(j), value))
				.collect()
		})
		.collect();

	if candidate_cols.iter().any(Vec::is_empty) {
		// Already unsatisfiable; the store will be reported dead elsewhere.
		return false;
	}

	let arity = clue.arity();
	let mut allowed: Vec<Vec<bool>> = candidate_cols.iter().map(|cs| vec![false; cs.len()]).collect();

	for combo in candidate_cols.iter().map(|cs| cs.iter().copied()).multi_cartesian_product() {
		debug_assert_eq!(combo.len(), arity);
		if clue.predicate.eval(&combo) {
			for (slot, &j) in combo.iter().enumerate() {
				let idx = candidate_cols[slot].iter().position(|&c| c == j).unwrap();
				allowed[slot][idx] = true;
			}
		}
	}

	let mut changed = false;
	for (slot, (&row, &value)) in clue.rows.iter().zip(&clue.values).enumerate() {
		for (idx, &j) in candidate_cols[slot].iter().enumerate() {
			if !allowed[slot][idx] && store.exclude(row, ColIdx::new(j), value) {
				changed = true;
			}
		}
	}
	changed
}

#[cfg(test)]
mod tests {
	use ustr::ustr;

	use super::*;
	use crate::{
		clue::{Predicate, Predicate2},
		store::AttrIdx,
		table::{AttributeRow, Table},
	};

	fn sample_store() -> (Table, CandidateStore) {
		let table = Table::new(vec![
			AttributeRow::new("Pet", ["cat", "dog", "fish"].map(ustr)),
			AttributeRow::new("Job", ["chef", "nurse", "pilot"].map(ustr)),
		]);
		let store = CandidateStore::full(&table);
		(table, store)
	}

	#[test]
	fn same_column_clue_links_two_rows() {
		let (_table, mut store) = sample_store();
		let clue = Clue::new(
			vec![AttrIdx::new(0), AttrIdx::new(1)],
			vec![ustr("cat"), ustr("chef")],
			Predicate::Binary(Predicate2::SameColumn),
			"cat:Pet == chef:Job".to_string(),
		);
		store.assign(AttrIdx::new(0), ColIdx::new(1), ustr("cat"));
		let changed = propagate(&mut store, std::slice::from_ref(&clue));
		assert!(changed);
		assert_eq!(
			store.singleton_value(AttrIdx::new(1), ColIdx::new(1)),
			Some(ustr("chef"))
		);
	}

	#[test]
	fn immediately_left_excludes_incompatible_columns() {
		let (_table, mut store) = sample_store();
		let clue = Clue::new(
			vec![AttrIdx::new(0), AttrIdx::new(1)],
			vec![ustr("dog"), ustr("nurse")],
			Predicate::Binary(crate::clue::Predicate2::ImmediatelyLeft),
			"dog is left of nurse".to_string(),
		);
		store.assign(AttrIdx::new(1), ColIdx::new(0), ustr("nurse"));
		propagate(&mut store, std::slice::from_ref(&clue));
		assert!(!store.possible(AttrIdx::new(0), ColIdx::new(0), ustr("dog")));
		assert!(!store.possible(AttrIdx::new(0), ColIdx::new(1), ustr("dog")));
		assert!(!store.possible(AttrIdx::new(0), ColIdx::new(2), ustr("dog")));
		assert!(store.is_dead());
	}
}
