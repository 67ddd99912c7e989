//! Clues: quantified predicates over column positions, paired with the
//! rendering template that turns them into a human-readable premise.

use ustr::Ustr;

use crate::store::AttrIdx;

/// A unary predicate on a single column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Predicate1 {
	/// `j == 0`.
	LeftEdge,
	/// `j == last`.
	RightEdge(usize),
	/// `j == mid` (only constructed when `M` is odd).
	Middle(usize),
	/// `j == 0 || j == last`.
	LeftOrRightEdge(usize),
	/// `(j + 1)` is odd.
	OddPosition,
	/// `(j + 1)` is even.
	EvenPosition,
}

impl Predicate1 {
	pub(crate) fn eval(self, j: usize) -> bool {
		match self {
			Predicate1::LeftEdge => j == 0,
			Predicate1::RightEdge(last) => j == last,
			Predicate1::Middle(mid) => j == mid,
			Predicate1::LeftOrRightEdge(last) => j == 0 || j == last,
			Predicate1::OddPosition => (j + 1) % 2 != 0,
			Predicate1::EvenPosition => (j + 1) % 2 == 0,
		}
	}
}

/// A binary predicate on a pair of column indices `(j1, j2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Predicate2 {
	/// `j1 == j2`.
	SameColumn,
	/// `j1 == j2 - 1`.
	ImmediatelyLeft,
	/// `j1 == j2 + 1`.
	ImmediatelyRight,
	/// `j1 == j2 - 1 || j1 == j2 + 1`.
	AdjacentEitherSide,
	/// `j1 < j2`.
	SomewhereLeft,
	/// `j1 > j2`.
	SomewhereRight,
	/// `j1 != j2`.
	NotEqual,
	/// `j1 >= j2`.
	NotLeftOf,
	/// `j1 <= j2`.
	NotRightOf,
	/// `j1 % 2 != j2 % 2`.
	DifferentParity,
	/// `j1 % 2 == j2 % 2`.
	SameParity,
}

/// A ternary predicate on three column indices `(j1, j2, j3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Predicate3 {
	/// `j1` sits immediately between `j2` and `j3`, in either order.
	ImmediatelyBetween,
	/// `j1` sits strictly between `j2` and `j3`, in either order.
	SomewhereBetween,
	/// `(j1 == j2) XOR (j1 == j3)`.
	XorEquals,
	/// `(j1 == j2) OR (j1 == j3)`.
	OrEquals,
	/// `(j1 != j2) OR (j1 != j3)`.
	OrNotEquals,
}

impl Predicate3 {
	pub(crate) fn eval(self, j1: usize, j2: usize, j3: usize) -> bool {
		match self {
			Predicate3::ImmediatelyBetween => {
				(j2 + 1 == j1 && j1 + 1 == j3) || (j3 + 1 == j1 && j1 + 1 == j2)
			}
			Predicate3::SomewhereBetween => (j2 < j1 && j1 < j3) || (j3 < j1 && j1 < j2),
			Predicate3::XorEquals => (j1 == j2) != (j1 == j3),
			Predicate3::OrEquals => j1 == j2 || j1 == j3,
			Predicate3::OrNotEquals => j1 != j2 || j1 != j3,
		}
	}
}

impl Predicate2 {
	pub(crate) fn eval(self, j1: usize, j2: usize) -> bool {
		match self {
			Predicate2::SameColumn => j1 == j2,
			Predicate2::ImmediatelyLeft => j2 > 0 && j1 == j2 - 1,
			Predicate2::ImmediatelyRight => j1 == j2 + 1,
			Predicate2::AdjacentEitherSide => {
				(j2 > 0 && j1 == j2 - 1) || j1 == j2 + 1
			}
			Predicate2::SomewhereLeft => j1 < j2,
			Predicate2::SomewhereRight => j1 > j2,
			Predicate2::NotEqual => j1 != j2,
			Predicate2::NotLeftOf => j1 >= j2,
			Predicate2::NotRightOf => j1 <= j2,
			Predicate2::DifferentParity => j1 % 2 != j2 % 2,
			Predicate2::SameParity => j1 % 2 == j2 % 2,
		}
	}
}

/// The predicate carried by a clue, tagged by arity. Kept as an enum rather
/// than a trait object: witness enumeration runs this on the hot path of
/// propagation and generation, and a plain match is cheaper and more
/// predictable than a vtable call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Predicate {
	/// Arity-1 predicate.
	Unary(Predicate1),
	/// Arity-2 predicate.
	Binary(Predicate2),
	/// Arity-3 predicate.
	Ternary(Predicate3),
}

impl Predicate {
	/// Number of column arguments this predicate expects.
	pub(crate) fn arity(self) -> usize {
		match self {
			Predicate::Unary(_) => 1,
			Predicate::Binary(_) => 2,
			Predicate::Ternary(_) => 3,
		}
	}

	/// Evaluate the predicate against a slice of column indices, whose
	/// length must equal [`Predicate::arity`].
	pub(crate) fn eval(self, cols: &[usize]) -> bool {
		match self {
			Predicate::Unary(p) => p.eval(cols[0]),
			Predicate::Binary(p) => p.eval(cols[0], cols[1]),
			Predicate::Ternary(p) => p.eval(cols[0], cols[1], cols[2]),
		}
	}
}

/// A fully bound clue: the predicate, the attribute rows and values it
/// constrains, and the rendered premise text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
	pub(crate) rows: Vec<AttrIdx>,
	pub(crate) values: Vec<Ustr>,
	pub(crate) predicate: Predicate,
	rendered: String,
}

impl Clue {
	pub(crate) fn new(
		rows: Vec<AttrIdx>,
		values: Vec<Ustr>,
		predicate: Predicate,
		rendered: String,
	) -> Self {
		debug_assert_eq!(rows.len(), values.len());
		debug_assert_eq!(rows.len(), predicate.arity());
		Self {
			rows,
			values,
			predicate,
			rendered,
		}
	}

	/// Number of `(row, value)` bindings, i.e. the predicate's arity.
	pub(crate) fn arity(&self) -> usize {
		self.rows.len()
	}

	/// The human-readable premise text.
	pub fn rendered_text(&self) -> &str {
		&self.rendered
	}
}

/// Substitute `{0}`, `{1}`, ... in `template` with `parts`, in order. Pure
/// textual replacement; no locale-dependent case transforms.
pub(crate) fn render(template: &str, parts: &[String]) -> String {
	let mut out = template.to_string();
	for (i, part) in parts.iter().enumerate() {
		out = out.replace(&format!("{{{i}}}"), part);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_substitutes_every_placeholder() {
		let rendered = render(
			"{0}:{1} is on the left of {2}:{3}",
			&[
				"Pet".to_string(),
				"cat".to_string(),
				"Job".to_string(),
				"nurse".to_string(),
			],
		);
		assert_eq!(rendered, "Pet:cat is on the left of Job:nurse");
	}

	#[test]
	fn immediately_between_holds_in_either_order() {
		let p = Predicate3::ImmediatelyBetween;
		assert!(p.eval(1, 0, 2));
		assert!(p.eval(1, 2, 0));
		assert!(!p.eval(1, 0, 3));
	}

	#[test]
	fn xor_equals_is_exclusive() {
		let p = Predicate3::XorEquals;
		assert!(p.eval(1, 1, 2));
		assert!(p.eval(1, 2, 1));
		assert!(!p.eval(1, 1, 1));
		assert!(!p.eval(1, 2, 3));
	}
}
