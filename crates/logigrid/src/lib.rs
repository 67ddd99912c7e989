//! # logigrid
//!
//! A generator for logic-grid ("zebra") puzzles: given a fully populated
//! solution table, produce a set of natural-language clues that pins the
//! table down to exactly one solution, at a chosen difficulty level.
//!
//! The crate owns the puzzle domain model: [`Table`], [`Clue`] and the
//! candidate-propagation kernel that both the uniqueness checker and the
//! clue generator build on. It has no notion of I/O, word lists, or
//! rendering beyond a clue's own premise text; the `logigrid-cli` binary
//! crate is responsible for all of that.

pub(crate) mod catalog;
pub(crate) mod clue;
pub mod error;
pub(crate) mod generator;
pub(crate) mod minimize;
pub(crate) mod propagate;
pub(crate) mod solver;
pub(crate) mod store;
pub mod table;

use std::{
	sync::atomic::AtomicBool,
	time::{Duration, Instant},
};

use rand::Rng;
use tracing::{info, warn};

pub use crate::{
	clue::Clue,
	error::GenerationError,
	table::{AttributeRow, Table, Value},
};
use crate::{
	generator::{attempt, AttemptOutcome},
	minimize::minimize,
};

/// Default number of generation attempts before giving up, used by
/// [`GenerationRequest::new`].
pub const DEFAULT_TRIES: u32 = 10;

/// A fully specified request to generate a puzzle from a solution [`Table`].
#[derive(Debug, Clone)]
pub struct GenerationRequest {
	table: Table,
	level: u8,
	tries: u32,
	minimal_conditions: bool,
	deadline: Option<Instant>,
}

impl GenerationRequest {
	/// Build a request for `table` at `level`, with [`DEFAULT_TRIES`]
	/// attempts, no minimization (raw clue set returned as found), and no
	/// minimization deadline.
	pub fn new(table: Table, level: u8) -> Self {
		Self {
			table,
			level,
			tries: DEFAULT_TRIES,
			minimal_conditions: false,
			deadline: None,
		}
	}

	/// Override the number of clue-set generation attempts.
	pub fn with_tries(mut self, tries: u32) -> Self {
		self.tries = tries;
		self
	}

	/// Request the shortest clue set to be shrunk further by minimization
	/// before it is returned. Without this, the raw clue set found by the
	/// generator is returned as-is.
	pub fn with_minimal_conditions(mut self, minimal_conditions: bool) -> Self {
		self.minimal_conditions = minimal_conditions;
		self
	}

	/// Bound the minimization pass to `budget` wall-clock time, measured
	/// from the moment [`generate`] is called. Without this, minimization
	/// (when requested via [`GenerationRequest::with_minimal_conditions`])
	/// runs unbounded, to a true local minimum.
	pub fn with_minimize_budget(mut self, budget: Duration) -> Self {
		self.deadline = Some(Instant::now() + budget);
		self
	}
}

/// A generated puzzle: the clue set and whether minimization ran to
/// completion.
#[derive(Debug, Clone)]
pub struct Puzzle {
	/// The solution table the clues were generated against.
	pub table: Table,
	/// The minimized, uniquely-solving clue set.
	pub clues: Vec<Clue>,
	/// `true` if the minimization deadline elapsed before the search
	/// exhausted every "remove one clue" neighbour of the final clue set.
	/// The returned clue set is still guaranteed unique; it may simply not
	/// be as small as it could be.
	pub minimize_timed_out: bool,
}

/// Generate a puzzle for `request`, using `rng` for every random choice made
/// while searching for a clue set.
///
/// Validates the request's table, then makes up to `request.tries` attempts
/// to grow a uniquely-solving clue set (see [`generator::attempt`]), keeping
/// the shortest one found across every attempt. If
/// [`GenerationRequest::with_minimal_conditions`] was set, the shortest set
/// is then shrunk further by [`minimize`], bounded by the request's deadline
/// (or unbounded, if none was set). If no attempt solved the table, the last
/// attempt's (possibly non-unique) clue set is returned as-is, without
/// minimizing it.
pub fn generate<R: Rng + ?Sized>(
	request: GenerationRequest,
	rng: &mut R,
) -> Result<Puzzle, GenerationError> {
	generate_cancellable(request, rng, &AtomicBool::new(false))
}

/// As [`generate`], but the minimization pass stops early (reporting
/// [`Puzzle::minimize_timed_out`]) as soon as `interrupted` is set, in
/// addition to its own deadline. Used by the CLI to let a single Ctrl-C
/// shorten an in-progress minimization rather than killing the process.
pub fn generate_cancellable<R: Rng + ?Sized>(
	request: GenerationRequest,
	rng: &mut R,
	interrupted: &AtomicBool,
) -> Result<Puzzle, GenerationError> {
	if request.tries == 0 {
		return Err(GenerationError::InvalidTries);
	}
	let table = request.table.validated()?;
	// Validate the catalog up front so an invalid level/column combination
	// fails before any attempt runs.
	let _ = catalog::build_catalog(request.level, table.n_columns())?;

	let mut shortest: Option<Vec<Clue>> = None;
	let mut last_attempt: Vec<Clue> = Vec::new();

	for attempt_no in 1..=request.tries {
		match attempt(&table, request.level, rng)? {
			AttemptOutcome::Solved(clues) => {
				info!(attempt_no, clues = clues.len(), "attempt found a uniquely-solving clue set");
				last_attempt = clues.clone();
				if shortest.as_ref().map_or(true, |best: &Vec<Clue>| clues.len() < best.len()) {
					shortest = Some(clues);
				}
			}
			AttemptOutcome::Dead(clues) => {
				info!(attempt_no, "attempt went dead, retrying");
				last_attempt = clues;
			}
			AttemptOutcome::Stuck(clues) => {
				info!(attempt_no, "attempt got stuck, retrying");
				last_attempt = clues;
			}
		}
	}

	let Some(clues) = shortest else {
		warn!(
			tries = request.tries,
			"no attempt found a uniquely-solving clue set; returning the last attempt's clues as-is"
		);
		return Ok(Puzzle {
			table,
			clues: last_attempt,
			minimize_timed_out: false,
		});
	};

	if !request.minimal_conditions {
		return Ok(Puzzle {
			table,
			clues,
			minimize_timed_out: false,
		});
	}

	let outcome = minimize(&table, clues, request.deadline, interrupted);
	if outcome.timed_out {
		warn!("minimization cut short before the search converged");
	}
	Ok(Puzzle {
		table,
		clues: outcome.clues,
		minimize_timed_out: outcome.timed_out,
	})
}

#[cfg(test)]
mod tests {
	use rand::{rngs::StdRng, SeedableRng};
	use ustr::ustr;

	use super::*;

	fn sample_table() -> Table {
		Table::new(vec![
			AttributeRow::new("Pet", ["cat", "dog", "fish"].map(ustr)),
			AttributeRow::new("Job", ["chef", "nurse", "pilot"].map(ustr)),
		])
	}

	#[test]
	fn generate_produces_a_unique_clue_set() {
		let request = GenerationRequest::new(sample_table(), 6)
			.with_tries(200)
			.with_minimal_conditions(true);
		let mut rng = StdRng::seed_from_u64(42);
		let puzzle = generate(request, &mut rng).unwrap();
		assert!(!puzzle.clues.is_empty());

		let store = store::CandidateStore::full(&puzzle.table);
		assert_eq!(solver::count_solutions(&store, &puzzle.clues, 2), 1);
	}

	#[test]
	fn without_minimal_conditions_the_raw_clue_set_is_returned_unminimized() {
		let request = GenerationRequest::new(sample_table(), 6).with_tries(200);
		let mut rng = StdRng::seed_from_u64(42);
		let puzzle = generate(request, &mut rng).unwrap();
		assert!(!puzzle.minimize_timed_out);

		let store = store::CandidateStore::full(&puzzle.table);
		assert_eq!(solver::count_solutions(&store, &puzzle.clues, 2), 1);
	}

	#[test]
	fn zero_tries_is_rejected() {
		let request = GenerationRequest::new(sample_table(), 6).with_tries(0);
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(
			generate(request, &mut rng),
			Err(GenerationError::InvalidTries)
		));
	}

	#[test]
	fn invalid_level_is_rejected_before_any_attempt() {
		let request = GenerationRequest::new(sample_table(), 0);
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(
			generate(request, &mut rng),
			Err(GenerationError::InvalidLevel(0))
		));
	}
}
