//! Uniqueness checking: does a clue set pin the table down to exactly one
//! solution?

use crate::{
	clue::Clue,
	propagate::propagate,
	store::{AttrIdx, CandidateStore, ColIdx},
};

/// Count solutions consistent with `clues`, stopping as soon as `cap` are
/// found. A puzzle is well-posed iff this returns exactly `1` for
/// `cap >= 2`.
pub(crate) fn count_solutions(store: &CandidateStore, clues: &[Clue], cap: usize) -> usize {
	let mut store = store.clone();
	propagate(&mut store, clues);
	if store.is_dead() {
		return 0;
	}

	let mut found = 0;
	search(&mut store, clues, cap, &mut found);
	found
}

fn search(store: &mut CandidateStore, clues: &[Clue], cap: usize, found: &mut usize) {
	if *found >= cap {
		return;
	}
	if store.is_dead() {
		return;
	}
	if store.is_solved() {
		*found += 1;
		return;
	}

	let (i, j, branch_values) = match pick_branch_cell(store) {
		Some(b) => b,
		None => return,
	};

	for value in branch_values {
		let mut branch = store.clone();
		branch.assign(i, j, value);
		propagate(&mut branch, clues);
		search(&mut branch, clues, cap, found);
		if *found >= cap {
			return;
		}
	}
}

/// Pick the unresolved cell with the fewest remaining candidates (most
/// constrained first), and the list of values still possible there.
fn pick_branch_cell(
	store: &CandidateStore,
) -> Option<(AttrIdx, ColIdx, Vec<crate::table::Value>)> {
	let mut best: Option<(AttrIdx, ColIdx, u32)> = None;
	for (i, j) in store.unresolved_cells() {
		let n = store.candidate_count(i, j);
		if best.map_or(true, |(_, _, best_n)| n < best_n) {
			best = Some((i, j, n));
		}
	}
	let (i, j, _) = best?;
	Some((i, j, store.candidate_values(i, j)))
}

#[cfg(test)]
mod tests {
	use ustr::ustr;

	use super::*;
	use crate::{
		clue::Predicate,
		table::{AttributeRow, Table},
	};

	#[test]
	fn empty_clue_set_has_many_solutions() {
		let table = Table::new(vec![AttributeRow::new("Pet", ["cat", "dog"].map(ustr))]);
		let store = CandidateStore::full(&table);
		assert_eq!(count_solutions(&store, &[], 2), 2);
	}

	#[test]
	fn a_full_binding_chain_is_unique() {
		let table = Table::new(vec![
			AttributeRow::new("Pet", ["cat", "dog"].map(ustr)),
			AttributeRow::new("Job", ["chef", "nurse"].map(ustr)),
		]);
		let store = CandidateStore::full(&table);
		let clues = vec![Clue::new(
			vec![AttrIdx::new(0), AttrIdx::new(1)],
			vec![ustr("cat"), ustr("chef")],
			Predicate::Binary(crate::clue::Predicate2::SameColumn),
			"cat == chef".to_string(),
		)];
		// Still two solutions: cat/chef pinned together, but which column
		// they land in, and where dog/nurse land, is symmetric.
		assert_eq!(count_solutions(&store, &clues, 3), 2);
	}

	#[test]
	fn contradictory_clues_have_no_solution() {
		let table = Table::new(vec![AttributeRow::new("Pet", ["cat", "dog"].map(ustr))]);
		let store = CandidateStore::full(&table);
		let clues = vec![
			Clue::new(
				vec![AttrIdx::new(0)],
				vec![ustr("cat")],
				Predicate::Unary(crate::clue::Predicate1::LeftEdge),
				"cat is on the far left".to_string(),
			),
			Clue::new(
				vec![AttrIdx::new(0)],
				vec![ustr("cat")],
				Predicate::Unary(crate::clue::Predicate1::RightEdge(1)),
				"cat is on the far right".to_string(),
			),
		];
		assert_eq!(count_solutions(&store, &clues, 2), 0);
	}
}
