//! Command line interface for `logigrid`, the logic-grid puzzle generator.

mod trace;
mod wordlists;

use std::{
	fs::File,
	io::{self, IsTerminal, Write},
	path::PathBuf,
	process::ExitCode,
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
	time::Duration,
};

use logigrid::{generate_cancellable, AttributeRow, GenerationError, GenerationRequest, Table};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use ustr::ustr;

const HELP: &str = "\
logigrid - generate logic-grid puzzles

USAGE:
    logigrid [OPTIONS]

OPTIONS:
    -l, --level <1-20>         Difficulty level [default: 5]
    -n, --objects <N>          Number of columns in the puzzle [default: 5]
    -a, --attributes <N>       Number of attribute categories [default: 4]
        --table <PATH>         Load the solution table from a JSON file
                                instead of the built-in word lists
        --tries <N>             Clue-set generation attempts [default: 10]
        --minimal               Shrink the generated clue set to a local
                                minimum before printing it
        --minimize-budget <DUR> Wall-clock budget for shrinking the clue set,
                                e.g. \"5s\", \"500ms\" [default: unbounded]
        --seed <N>              RNG seed, for reproducible output
        --reveal                Also print the solution table
        --output <PATH>         Write the generated puzzle as JSON to PATH
    -v                          Increase log verbosity (repeatable)
    -h, --help                  Print this message
";

#[derive(Debug, Error)]
enum CliError {
	#[error(transparent)]
	Args(#[from] pico_args::Error),
	#[error(transparent)]
	Io(#[from] io::Error),
	#[error(transparent)]
	Json(#[from] serde_json::Error),
	#[error(transparent)]
	Duration(#[from] humantime::DurationError),
	#[error(transparent)]
	Generation(#[from] GenerationError),
	#[error("failed to install Ctrl-C handler: {0}")]
	CtrlC(#[from] ctrlc::Error),
}

/// On-disk representation of a solution table, as loaded from `--table`.
#[derive(Debug, Deserialize, Serialize)]
struct TableDoc {
	rows: Vec<RowDoc>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RowDoc {
	name: String,
	values: Vec<String>,
}

impl From<&Table> for TableDoc {
	fn from(table: &Table) -> Self {
		TableDoc {
			rows: table
				.rows
				.iter()
				.map(|r| RowDoc {
					name: r.name.clone(),
					values: r.values.iter().map(|v| v.to_string()).collect(),
				})
				.collect(),
		}
	}
}

impl TableDoc {
	fn into_table(self) -> Table {
		Table::new(
			self.rows
				.into_iter()
				.map(|r| AttributeRow::new(r.name, r.values.iter().map(|v| ustr(v))))
				.collect(),
		)
	}
}

#[derive(Debug, Serialize)]
struct PuzzleDoc {
	table: TableDoc,
	clues: Vec<String>,
	minimize_timed_out: bool,
}

fn main() -> ExitCode {
	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!(%err, "logigrid failed");
			eprintln!("error: {err}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<(), CliError> {
	let mut args = pico_args::Arguments::from_env();

	if args.contains(["-h", "--help"]) {
		print!("{HELP}");
		return Ok(());
	}

	let mut verbose: u8 = 0;
	while args.contains("-v") {
		verbose += 1;
	}
	let level: u8 = args.opt_value_from_str(["-l", "--level"])?.unwrap_or(5);
	let objects: usize = args.opt_value_from_str(["-n", "--objects"])?.unwrap_or(5);
	let attributes: usize = args.opt_value_from_str(["-a", "--attributes"])?.unwrap_or(4);
	let table_path: Option<PathBuf> = args.opt_value_from_str("--table")?;
	let tries: u32 = args.opt_value_from_str("--tries")?.unwrap_or(logigrid::DEFAULT_TRIES);
	let minimal = args.contains("--minimal");
	let minimize_budget: Option<Duration> =
		args.opt_value_from_fn("--minimize-budget", humantime::parse_duration)?;
	let seed: Option<u64> = args.opt_value_from_str("--seed")?;
	let reveal = args.contains("--reveal");
	let output: Option<PathBuf> = args.opt_value_from_str("--output")?;
	let leftover = args.finish();
	if !leftover.is_empty() {
		return Err(CliError::Args(pico_args::Error::ArgumentParsingFailed {
			cause: format!("unrecognized arguments: {leftover:?}"),
		}));
	}

	let ansi = io::stderr().is_terminal();
	tracing::subscriber::set_global_default(trace::create_subscriber(verbose, io::stderr, ansi))
		.expect("no global subscriber has been set yet");

	let interrupted = Arc::new(AtomicBool::new(false));
	{
		let interrupted = Arc::clone(&interrupted);
		ctrlc::set_handler(move || {
			eprintln!("\ninterrupted, finishing with the best clue set found so far...");
			interrupted.store(true, Ordering::SeqCst);
		})?;
	}

	let mut rng = match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	};

	let table = match table_path {
		Some(path) => {
			let file = File::open(path)?;
			let doc: TableDoc = serde_json::from_reader(file)?;
			doc.into_table().validated()?
		}
		None => wordlists::sample_table(attributes, objects, &mut rng).validated()?,
	};

	let mut request = GenerationRequest::new(table, level)
		.with_tries(tries)
		.with_minimal_conditions(minimal);
	if let Some(budget) = minimize_budget {
		request = request.with_minimize_budget(budget);
	}

	let puzzle = generate_cancellable(request, &mut rng, &interrupted)?;

	if reveal {
		println!("Solution:");
		for row in &puzzle.table.rows {
			println!(
				"  {}: {}",
				row.name,
				row.values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
			);
		}
		println!();
	}

	println!("Clues ({}):", puzzle.clues.len());
	for (i, clue) in puzzle.clues.iter().enumerate() {
		println!("  {}. {}", i + 1, clue.rendered_text());
	}
	if puzzle.minimize_timed_out {
		println!("\n(minimization did not finish; the clue set may not be as small as possible)");
	}

	if let Some(path) = output {
		let doc = PuzzleDoc {
			table: TableDoc::from(&puzzle.table),
			clues: puzzle.clues.iter().map(|c| c.rendered_text().to_string()).collect(),
			minimize_timed_out: puzzle.minimize_timed_out,
		};
		let mut file = File::create(path)?;
		file.write_all(serde_json::to_string_pretty(&doc)?.as_bytes())?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use logigrid::generate;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;

	fn sample_table() -> Table {
		Table::new(vec![
			AttributeRow::new("Pet", ["cat", "dog", "fish"].map(ustr)),
			AttributeRow::new("Job", ["chef", "nurse", "pilot"].map(ustr)),
		])
	}

	#[test]
	fn json_round_tripped_table_generates_the_same_premises_for_a_fixed_seed() {
		let table = sample_table();
		let json = serde_json::to_string(&TableDoc::from(&table)).unwrap();
		let round_tripped = serde_json::from_str::<TableDoc>(&json).unwrap().into_table();
		assert_eq!(round_tripped, table);

		let request_a = GenerationRequest::new(table, 6).with_tries(200);
		let mut rng_a = StdRng::seed_from_u64(11);
		let puzzle_a = generate(request_a, &mut rng_a).unwrap();

		let request_b = GenerationRequest::new(round_tripped, 6).with_tries(200);
		let mut rng_b = StdRng::seed_from_u64(11);
		let puzzle_b = generate(request_b, &mut rng_b).unwrap();

		let premises_a: Vec<&str> = puzzle_a.clues.iter().map(|c| c.rendered_text()).collect();
		let premises_b: Vec<&str> = puzzle_b.clues.iter().map(|c| c.rendered_text()).collect();
		assert_eq!(premises_a, premises_b);
	}
}
