//! The level-gated catalog of clue templates (§4.1).
//!
//! `build_catalog` is the only entry point; everything else is catalog
//! construction detail. Levels `1..=12` each *add* templates to the head of
//! the previous level's catalog (monotonic); levels `13..=20` each remove one
//! named group from the catalog built at level 12, in the fixed order given
//! in the specification.

use crate::{
	clue::{Predicate, Predicate1, Predicate2, Predicate3},
	error::GenerationError,
};

/// A clue template: a predicate, whether it forbids bindings that reuse the
/// same attribute row twice, and the candidate rendering strings.
#[derive(Debug, Clone)]
pub(crate) struct Template {
	pub(crate) predicate: Predicate,
	/// Forbids two or more bindings from referring to the same attribute
	/// row (such clues would be trivially true or false).
	pub(crate) except_flag: bool,
	pub(crate) renderings: Vec<&'static str>,
}

impl Template {
	fn unary(p: Predicate1, renderings: &[&'static str]) -> Self {
		Self {
			predicate: Predicate::Unary(p),
			except_flag: false,
			renderings: renderings.to_vec(),
		}
	}

	fn binary(p: Predicate2, except_flag: bool, renderings: &[&'static str]) -> Self {
		Self {
			predicate: Predicate::Binary(p),
			except_flag,
			renderings: renderings.to_vec(),
		}
	}

	fn ternary(p: Predicate3, except_flag: bool, renderings: &[&'static str]) -> Self {
		Self {
			predicate: Predicate::Ternary(p),
			except_flag,
			renderings: renderings.to_vec(),
		}
	}
}

/// Build the catalog of clue templates admissible at `level` for a table
/// with `m` columns.
///
/// Fails with [`GenerationError::InvalidLevel`] if `level` is outside
/// `[1..=20]`, or with [`GenerationError::TooFewObjects`] if `m < 2`, or if
/// `m < 3` while `level >= 19`.
pub(crate) fn build_catalog(level: u8, m: usize) -> Result<Vec<Template>, GenerationError> {
	if !(1..=20).contains(&level) {
		return Err(GenerationError::InvalidLevel(level));
	}
	if m < 2 {
		return Err(GenerationError::TooFewObjects { needed: 2, found: m });
	}
	if level >= 19 && m < 3 {
		return Err(GenerationError::TooFewObjects { needed: 3, found: m });
	}

	let last = m - 1;
	let mid = m / 2;

	let mut catalog = vec![
		Template::binary(
			Predicate2::SameColumn,
			false,
			&["{0}:{1} == {2}:{3}", "{2}:{3} == {0}:{1}"],
		),
		Template::binary(
			Predicate2::ImmediatelyLeft,
			false,
			&["{0}:{1} is on the left of {2}:{3}"],
		),
		Template::binary(
			Predicate2::ImmediatelyRight,
			false,
			&["{0}:{1} is on the right of {2}:{3}"],
		),
		Template::unary(Predicate1::LeftEdge, &["{0}:{1} is on the far left"]),
		Template::unary(Predicate1::RightEdge(last), &["{0}:{1} is on the far right"]),
	];
	if m % 2 != 0 {
		catalog.push(Template::unary(Predicate1::Middle(mid), &["{0}:{1} is in the middle"]));
	}

	if level >= 2 {
		catalog.push(Template::ternary(
			Predicate3::ImmediatelyBetween,
			false,
			&[
				"{0}:{1} is between {2}:{3} and {4}:{5}",
				"{0}:{1} is between {4}:{5} and {2}:{3}",
			],
		));
	}
	if level >= 3 {
		catalog.push(Template::binary(
			Predicate2::AdjacentEitherSide,
			false,
			&["{0}:{1} is on the left or right of {2}:{3}"],
		));
		catalog.push(Template::unary(
			Predicate1::LeftOrRightEdge(last),
			&["{0}:{1} is on the far left or far right"],
		));
	}
	if level >= 4 {
		catalog.push(Template::unary(Predicate1::OddPosition, &["{0}:{1} is in an odd position"]));
		catalog.push(Template::unary(Predicate1::EvenPosition, &["{0}:{1} is in an even position"]));
	}
	if level >= 5 {
		catalog.push(Template::binary(
			Predicate2::SomewhereLeft,
			false,
			&["{0}:{1} is somewhere to the left of {2}:{3}"],
		));
		catalog.push(Template::binary(
			Predicate2::SomewhereRight,
			false,
			&["{0}:{1} is somewhere to the right of {2}:{3}"],
		));
	}
	if level >= 6 {
		catalog.push(Template::binary(
			Predicate2::NotEqual,
			true,
			&["{0}:{1} != {2}:{3}", "{2}:{3} != {0}:{1}"],
		));
	}
	if level >= 7 {
		catalog.push(Template::ternary(
			Predicate3::SomewhereBetween,
			false,
			&[
				"{0}:{1} is somewhere between {2}:{3} and {4}:{5}",
				"{0}:{1} is somewhere between {4}:{5} and {2}:{3}",
			],
		));
	}
	if level >= 8 {
		catalog.push(Template::binary(
			Predicate2::NotLeftOf,
			false,
			&["{0}:{1} is not to the left of {2}:{3}"],
		));
		catalog.push(Template::binary(
			Predicate2::NotRightOf,
			false,
			&["{0}:{1} is not to the right of {2}:{3}"],
		));
	}
	if level >= 9 {
		catalog.push(Template::binary(
			Predicate2::DifferentParity,
			true,
			&[
				"{0}:{1} and {2}:{3} have different parity positions",
				"{2}:{3} and {0}:{1} have different parity positions",
			],
		));
		catalog.push(Template::binary(
			Predicate2::SameParity,
			true,
			&[
				"{0}:{1} and {2}:{3} have the same parity positions",
				"{2}:{3} and {0}:{1} have the same parity positions",
			],
		));
	}
	if level >= 10 {
		catalog.push(Template::ternary(
			Predicate3::XorEquals,
			true,
			&["{0}:{1} matches exactly one of {2}:{3} and {4}:{5}"],
		));
	}
	if level >= 11 {
		catalog.push(Template::ternary(
			Predicate3::OrEquals,
			true,
			&["{0}:{1} matches {2}:{3} or {4}:{5} (or both)"],
		));
	}
	if level >= 12 {
		catalog.push(Template::ternary(
			Predicate3::OrNotEquals,
			true,
			&["{0}:{1} differs from {2}:{3} or {4}:{5} (or both)"],
		));
	}

	// Levels 13..=20 remove one named group each, from the head of the
	// catalog, in this fixed order: identity, adjacency, boundary/middle,
	// between, left-or-right, parity-position, somewhere-left/right,
	// inequality.
	if level >= 13 {
		catalog.retain(|t| !matches!(t.predicate, Predicate::Binary(Predicate2::SameColumn)));
	}
	if level >= 14 {
		catalog.retain(|t| {
			!matches!(
				t.predicate,
				Predicate::Binary(Predicate2::ImmediatelyLeft | Predicate2::ImmediatelyRight)
			)
		});
	}
	if level >= 15 {
		catalog.retain(|t| {
			!matches!(
				t.predicate,
				Predicate::Unary(Predicate1::LeftEdge | Predicate1::RightEdge(_) | Predicate1::Middle(_))
			)
		});
	}
	if level >= 16 {
		catalog.retain(|t| !matches!(t.predicate, Predicate::Ternary(Predicate3::ImmediatelyBetween)));
	}
	if level >= 17 {
		catalog.retain(|t| {
			!matches!(
				t.predicate,
				Predicate::Binary(Predicate2::AdjacentEitherSide)
					| Predicate::Unary(Predicate1::LeftOrRightEdge(_))
			)
		});
	}
	if level >= 18 {
		catalog.retain(|t| {
			!matches!(
				t.predicate,
				Predicate::Unary(Predicate1::OddPosition | Predicate1::EvenPosition)
			)
		});
	}
	if level >= 19 {
		catalog.retain(|t| {
			!matches!(
				t.predicate,
				Predicate::Binary(Predicate2::SomewhereLeft | Predicate2::SomewhereRight)
			)
		});
	}
	if level >= 20 {
		catalog.retain(|t| !matches!(t.predicate, Predicate::Binary(Predicate2::NotEqual)));
	}

	Ok(catalog)
}

#[cfg(test)]
mod tests {
	use expect_test::expect;

	use super::*;

	fn predicate_set(level: u8, m: usize) -> Vec<Predicate> {
		build_catalog(level, m)
			.unwrap()
			.into_iter()
			.map(|t| t.predicate)
			.collect()
	}

	#[test]
	fn rejects_invalid_level() {
		assert!(matches!(
			build_catalog(0, 4),
			Err(GenerationError::InvalidLevel(0))
		));
		assert!(matches!(
			build_catalog(21, 4),
			Err(GenerationError::InvalidLevel(21))
		));
	}

	#[test]
	fn rejects_too_few_columns() {
		assert!(matches!(
			build_catalog(1, 1),
			Err(GenerationError::TooFewObjects { .. })
		));
		assert!(matches!(
			build_catalog(19, 2),
			Err(GenerationError::TooFewObjects { .. })
		));
		assert!(build_catalog(19, 3).is_ok());
	}

	#[test]
	fn catalog_is_monotonically_additive_below_level_13() {
		for level in 1..13u8 {
			let smaller = predicate_set(level, 5);
			let bigger = predicate_set(level + 1, 5);
			for p in &smaller {
				assert!(bigger.contains(p), "level {level} predicate {p:?} missing from level {}", level + 1);
			}
		}
	}

	#[test]
	fn middle_template_only_appears_for_odd_m() {
		assert!(predicate_set(1, 4)
			.iter()
			.all(|p| !matches!(p, Predicate::Unary(Predicate1::Middle(_)))));
		assert!(predicate_set(1, 5)
			.iter()
			.any(|p| matches!(p, Predicate::Unary(Predicate1::Middle(_)))));
	}

	#[test]
	fn level_1_catalog_has_the_base_templates_for_an_even_m() {
		let rendered: Vec<&str> = build_catalog(1, 4)
			.unwrap()
			.into_iter()
			.flat_map(|t| t.renderings)
			.collect();
		expect![[r#"["{0}:{1} == {2}:{3}", "{2}:{3} == {0}:{1}", "{0}:{1} is on the left of {2}:{3}", "{0}:{1} is on the right of {2}:{3}", "{0}:{1} is on the far left", "{0}:{1} is on the far right"]"#]]
		.assert_eq(&format!("{rendered:?}"));
	}

	#[test]
	fn level_20_catalog_only_retains_late_templates() {
		let catalog = build_catalog(20, 5).unwrap();
		for t in &catalog {
			assert!(matches!(
				t.predicate,
				Predicate::Binary(
					Predicate2::SomewhereLeft
						| Predicate2::SomewhereRight
						| Predicate2::NotLeftOf
						| Predicate2::NotRightOf
						| Predicate2::DifferentParity
						| Predicate2::SameParity
				) | Predicate::Ternary(
					Predicate3::SomewhereBetween
						| Predicate3::XorEquals
						| Predicate3::OrEquals
						| Predicate3::OrNotEquals
				)
			));
		}
	}
}
