//! Shrinking a clue set that already pins the table down to a unique
//! solution, without ever giving up uniqueness.

use std::{
	collections::VecDeque,
	sync::atomic::{AtomicBool, Ordering},
	time::Instant,
};

use tracing::info;

use crate::{clue::Clue, solver::count_solutions, store::CandidateStore, table::Table};

/// Result of a minimization pass.
pub(crate) struct MinimizeOutcome {
	/// The smallest clue set found before the deadline, still unique.
	pub(crate) clues: Vec<Clue>,
	/// Whether the deadline (or the interrupt flag) cut the search short.
	pub(crate) timed_out: bool,
}

/// Starting from a clue set known to uniquely solve `table`, breadth-first
/// search the space of "remove one clue" neighbours for a smaller unique
/// clue set, until no neighbour improves on the current best, `deadline`
/// passes (if set; `None` means unbounded), or `interrupted` is set.
///
/// `clues` is assumed to already be unique; callers that are not sure should
/// verify with [`count_solutions`] first.
pub(crate) fn minimize(
	table: &Table,
	clues: Vec<Clue>,
	deadline: Option<Instant>,
	interrupted: &AtomicBool,
) -> MinimizeOutcome {
	let store = CandidateStore::full(table);
	let mut best = clues.clone();
	let mut queue: VecDeque<Vec<Clue>> = VecDeque::new();
	queue.push_back(clues);
	let mut timed_out = false;

	'outer: while let Some(current) = queue.pop_front() {
		for i in 0..current.len() {
			let deadline_passed = deadline.map_or(false, |dl| Instant::now() >= dl);
			if deadline_passed || interrupted.load(Ordering::Relaxed) {
				timed_out = true;
				break 'outer;
			}
			let mut reduced = current.clone();
			reduced.remove(i);
			if count_solutions(&store, &reduced, 2) == 1 {
				if reduced.len() < best.len() {
					best = reduced.clone();
				}
				queue.push_back(reduced);
			}
		}
	}

	info!(
		clues = best.len(),
		timed_out, "minimization finished"
	);
	MinimizeOutcome {
		clues: best,
		timed_out,
	}
}
