//! Built-in word lists used to build a demo solution table when the user
//! does not supply one with `--table`.

use logigrid::{AttributeRow, Table};
use rand::{seq::SliceRandom, Rng};
use ustr::ustr;

/// Classic logic-grid attribute categories and their candidate values, in no
/// particular order. Large enough to cover every level's column count.
const CATEGORIES: &[(&str, &[&str])] = &[
	(
		"Nationality",
		&["Norwegian", "Englishman", "Dane", "German", "Swede", "Finn", "Scot", "Dutchman"],
	),
	(
		"Color",
		&["red", "blue", "green", "yellow", "white", "purple", "orange", "black"],
	),
	(
		"Pet",
		&["dog", "cat", "bird", "fish", "horse", "rabbit", "hamster", "snake"],
	),
	(
		"Drink",
		&["coffee", "tea", "milk", "water", "juice", "soda", "beer", "wine"],
	),
	(
		"Job",
		&["chef", "nurse", "pilot", "teacher", "lawyer", "artist", "mechanic", "diver"],
	),
	(
		"Sport",
		&["tennis", "chess", "darts", "cricket", "archery", "rowing", "golf", "rugby"],
	),
	(
		"Flower",
		&["rose", "tulip", "daisy", "lily", "orchid", "iris", "lotus", "violet"],
	),
	(
		"Instrument",
		&["piano", "violin", "guitar", "flute", "drums", "cello", "harp", "trumpet"],
	),
];

/// Build a random solution table with `n_attributes` categories (clamped to
/// the number available) and `n_objects` columns (clamped to the smallest
/// category's size), using `rng` to choose both the categories and the
/// per-category value subsets.
pub(crate) fn sample_table<R: Rng + ?Sized>(n_attributes: usize, n_objects: usize, rng: &mut R) -> Table {
	let n_attributes = n_attributes.clamp(1, CATEGORIES.len());
	let max_objects = CATEGORIES.iter().map(|(_, values)| values.len()).min().unwrap_or(1);
	let n_objects = n_objects.clamp(2, max_objects);

	let mut categories: Vec<&(&str, &[&str])> = CATEGORIES.iter().collect();
	categories.shuffle(rng);

	let rows = categories
		.into_iter()
		.take(n_attributes)
		.map(|&(name, values)| {
			let mut values: Vec<&str> = values.to_vec();
			values.shuffle(rng);
			values.truncate(n_objects);
			AttributeRow::new(name, values.into_iter().map(ustr))
		})
		.collect();

	Table::new(rows)
}

#[cfg(test)]
mod tests {
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;

	#[test]
	fn sample_table_honors_requested_shape() {
		let mut rng = StdRng::seed_from_u64(3);
		let table = sample_table(3, 4, &mut rng);
		assert_eq!(table.n_attributes(), 3);
		assert_eq!(table.n_columns(), 4);
	}

	#[test]
	fn sample_table_clamps_out_of_range_requests() {
		let mut rng = StdRng::seed_from_u64(3);
		let table = sample_table(100, 1, &mut rng);
		assert_eq!(table.n_attributes(), CATEGORIES.len());
		assert_eq!(table.n_columns(), 2);
	}
}
