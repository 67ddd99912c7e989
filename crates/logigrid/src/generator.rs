//! Clue selection: grow a clue set, one true statement at a time, until it
//! pins the solution table down to a unique answer.
//!
//! Each iteration samples a small local neighbourhood of cells (an anchor,
//! optionally a second anchor, and one column-adjacent neighbour of the
//! first anchor) and only tries catalog templates against permutations of
//! that handful of cells, rather than against the whole table.

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use tracing::trace;

use crate::{
	catalog::{build_catalog, Template},
	clue::{render, Clue, Predicate},
	error::GenerationError,
	propagate::propagate,
	store::{AttrIdx, CandidateStore, ColIdx},
	table::Table,
};

/// Why a single attempt at building a clue set ended the way it did. Each
/// variant carries the clues accumulated before the attempt ended, since a
/// failed attempt's partial progress is still a candidate fallback result.
#[derive(Debug)]
pub(crate) enum AttemptOutcome {
	/// The accumulated clue set pins the table to exactly one solution.
	Solved(Vec<Clue>),
	/// Propagation drove some cell's candidate set empty.
	Dead(Vec<Clue>),
	/// No candidate clue held on the solution for the sampled cells.
	Stuck(Vec<Clue>),
}

/// A clue that is true of `table` and not yet in the accumulated set, along
/// with the rendering choices still open to it.
struct Candidate {
	rows: Vec<AttrIdx>,
	values: Vec<crate::table::Value>,
	predicate: Predicate,
	parts: Vec<String>,
	renderings: Vec<&'static str>,
}

impl Candidate {
	fn into_clue<R: Rng + ?Sized>(self, rng: &mut R) -> Clue {
		let template = self.renderings.choose(rng).copied().unwrap_or_default();
		let rendered = render(template, &self.parts);
		Clue::new(self.rows, self.values, self.predicate, rendered)
	}
}

/// Attempt to build a clue set for `table` at `level`, using `rng` for every
/// random choice. Returns as soon as the store is uniquely solved, goes
/// dead, or a sampled neighbourhood yields no candidate clue.
pub(crate) fn attempt<R: Rng + ?Sized>(
	table: &Table,
	level: u8,
	rng: &mut R,
) -> Result<AttemptOutcome, GenerationError> {
	let catalog = build_catalog(level, table.n_columns())?;
	let mut store = CandidateStore::full(table);
	let mut clues: Vec<Clue> = Vec::new();

	loop {
		if store.is_dead() {
			return Ok(AttemptOutcome::Dead(clues));
		}
		if store.is_solved() {
			return Ok(AttemptOutcome::Solved(clues));
		}

		let needs_clarification = store.unresolved_cells();
		let Some(&anchor) = needs_clarification.choose(rng) else {
			return Ok(AttemptOutcome::Stuck(clues));
		};

		let mut second_anchor = None;
		if level >= 2 && needs_clarification.len() >= 2 {
			let remainder: Vec<(AttrIdx, ColIdx)> =
				needs_clarification.iter().copied().filter(|&c| c != anchor).collect();
			second_anchor = remainder.choose(rng).copied();
		}

		let neighbours = neighbour_set(table, anchor);
		let neighbour = neighbours.choose(rng).copied();

		if level >= 2 && second_anchor.is_none() {
			let right_neighbours: Vec<(AttrIdx, ColIdx)> = neighbours
				.iter()
				.copied()
				.filter(|&(_, j)| usize::from(j) == usize::from(anchor.1) + 1)
				.collect();
			second_anchor = right_neighbours.choose(rng).copied();
		}

		let mut cells = vec![anchor];
		for extra in [second_anchor, neighbour].into_iter().flatten() {
			if !cells.contains(&extra) {
				cells.push(extra);
			}
		}

		let candidates = candidate_clues(table, &catalog, &clues, anchor, &cells);
		let Some(candidate) = pick(candidates, rng) else {
			return Ok(AttemptOutcome::Stuck(clues));
		};

		let clue = candidate.into_clue(rng);
		trace!(clue = clue.rendered_text(), "accepted clue");
		clues.push(clue);
		propagate(&mut store, &clues);
	}
}

/// All cells `(i', anchor.1 + delta)` for `delta in {-1, 0, 1}`, across
/// every attribute row, within column bounds and excluding `anchor` itself.
fn neighbour_set(table: &Table, anchor: (AttrIdx, ColIdx)) -> Vec<(AttrIdx, ColIdx)> {
	let n = table.n_attributes();
	let m = table.n_columns() as i64;
	let j = usize::from(anchor.1) as i64;
	let mut out = Vec::new();
	for ri in 0..n {
		for delta in [-1i64, 0, 1] {
			let nj = j + delta;
			if nj < 0 || nj >= m {
				continue;
			}
			let cell = (AttrIdx::new(ri), ColIdx::new(nj as usize));
			if cell != anchor {
				out.push(cell);
			}
		}
	}
	out
}

/// Every clue, true of `table` and not already in `existing`, obtainable by
/// binding a catalog template's arity against the sampled `cells` (arity 1
/// always binds to `anchor` alone; arity 2/3 try every ordered permutation
/// of `cells`).
fn candidate_clues(
	table: &Table,
	catalog: &[Template],
	existing: &[Clue],
	anchor: (AttrIdx, ColIdx),
	cells: &[(AttrIdx, ColIdx)],
) -> Vec<Candidate> {
	let mut out = Vec::new();

	for template in catalog {
		let arity = template.predicate.arity();
		let bindings: Vec<Vec<(AttrIdx, ColIdx)>> = match arity {
			1 => vec![vec![anchor]],
			2 if cells.len() >= 2 => cells.iter().copied().permutations(2).collect(),
			3 if cells.len() >= 3 => cells.iter().copied().permutations(3).collect(),
			_ => continue,
		};

		for binding in bindings {
			if template.except_flag && !rows_distinct(&binding) {
				continue;
			}
			let cols: Vec<usize> = binding.iter().map(|&(_, c)| usize::from(c)).collect();
			if !template.predicate.eval(&cols) {
				continue;
			}

			let rows: Vec<AttrIdx> = binding.iter().map(|&(r, _)| r).collect();
			let values: Vec<_> = binding
				.iter()
				.map(|&(r, c)| table.rows[usize::from(r)].values[usize::from(c)])
				.collect();
			let parts = binding
				.iter()
				.flat_map(|&(r, c)| {
					let row = &table.rows[usize::from(r)];
					[row.name.clone(), row.values[usize::from(c)].to_string()]
				})
				.collect::<Vec<_>>();

			if existing.iter().any(|c| c.rows == rows && c.values == values && c.predicate == template.predicate) {
				continue;
			}

			out.push(Candidate {
				rows,
				values,
				predicate: template.predicate,
				parts,
				renderings: template.renderings.clone(),
			});
		}
	}
	out
}

fn pick<R: Rng + ?Sized>(mut candidates: Vec<Candidate>, rng: &mut R) -> Option<Candidate> {
	if candidates.is_empty() {
		return None;
	}
	let i = rng.gen_range(0..candidates.len());
	Some(candidates.swap_remove(i))
}

/// Whether every cell in `binding` refers to a distinct attribute row.
fn rows_distinct(binding: &[(AttrIdx, ColIdx)]) -> bool {
	let mut rows: Vec<usize> = binding.iter().map(|&(r, _)| usize::from(r)).collect();
	rows.sort_unstable();
	rows.dedup();
	rows.len() == binding.len()
}

#[cfg(test)]
mod tests {
	use rand::{rngs::StdRng, SeedableRng};
	use tracing_test::traced_test;
	use ustr::ustr;

	use super::*;
	use crate::table::AttributeRow;

	#[test]
	#[traced_test]
	fn attempt_eventually_terminates_on_a_small_table() {
		let table = Table::new(vec![
			AttributeRow::new("Pet", ["cat", "dog", "fish"].map(ustr)),
			AttributeRow::new("Job", ["chef", "nurse", "pilot"].map(ustr)),
		]);
		let mut rng = StdRng::seed_from_u64(7);
		let outcome = attempt(&table, 6, &mut rng).unwrap();
		assert!(matches!(
			outcome,
			AttemptOutcome::Solved(_) | AttemptOutcome::Stuck(_) | AttemptOutcome::Dead(_)
		));
	}

	#[test]
	fn neighbour_set_stays_within_column_bounds_and_spans_every_row() {
		let table = Table::new(vec![
			AttributeRow::new("Pet", ["cat", "dog", "fish"].map(ustr)),
			AttributeRow::new("Job", ["chef", "nurse", "pilot"].map(ustr)),
		]);
		let anchor = (AttrIdx::new(0), ColIdx::new(0));
		let neighbours = neighbour_set(&table, anchor);
		assert!(neighbours.iter().all(|&(_, j)| usize::from(j) <= 1));
		assert!(!neighbours.contains(&anchor));
		assert!(neighbours.contains(&(AttrIdx::new(1), ColIdx::new(0))));
		assert!(neighbours.contains(&(AttrIdx::new(1), ColIdx::new(1))));
	}

	#[test]
	fn rows_distinct_rejects_repeated_rows() {
		let a = AttrIdx::new(0);
		let b = AttrIdx::new(1);
		assert!(rows_distinct(&[(a, ColIdx::new(0)), (b, ColIdx::new(1))]));
		assert!(!rows_distinct(&[(a, ColIdx::new(0)), (a, ColIdx::new(1))]));
	}
}
