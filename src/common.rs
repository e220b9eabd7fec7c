use std::{
	cell::{Ref, RefCell},
	fmt,
	rc::Rc,
};

use lasso::{Rodeo, Spur};

use crate::utility::cell;

pub type Name = Spur;
pub type Label = Option<Name>;

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// A shared store of interned names, capable of minting fresh ones.
///
/// Cloning yields another handle to the same store, so names interned anywhere
/// in a run resolve everywhere in that run.
#[derive(Clone)]
pub struct NameSupply(Rc<RefCell<Rodeo>>);

impl NameSupply {
	pub fn new() -> Self { Self(cell!(Rodeo::new())) }

	pub fn intern(&self, spelling: &str) -> Name { self.0.borrow_mut().get_or_intern(spelling) }

	pub fn resolve(&self, name: Name) -> String { self.0.borrow().resolve(&name).to_owned() }

	/// Borrows the underlying store for resolver-consuming callers such as the printer.
	pub fn resolver(&self) -> Ref<'_, Rodeo> { self.0.borrow() }

	/// Picks a spelling based on the hint that collides with none of the used names.
	pub fn freshen(&self, used: &[Name], hint: Name) -> Name {
		if !used.contains(&hint) {
			return hint;
		}
		let (base, subscript) = split_name(&self.resolve(hint));
		let base = if base.is_empty() { "x".to_owned() } else { base };
		let mut attempt = subscript.map_or(1, |index| index + 1);
		loop {
			let candidate = self.intern(&unsplit_name(&base, attempt));
			if !used.contains(&candidate) {
				return candidate;
			}
			attempt += 1;
		}
	}
}

impl fmt::Debug for NameSupply {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("NameSupply").finish_non_exhaustive()
	}
}

impl Default for NameSupply {
	fn default() -> Self { Self::new() }
}

impl From<Rodeo> for NameSupply {
	fn from(rodeo: Rodeo) -> Self { Self(cell!(rodeo)) }
}

fn split_name(spelling: &str) -> (String, Option<u64>) {
	let trailing: Vec<char> = spelling.chars().rev().take_while(|c| SUBSCRIPT_DIGITS.contains(c)).collect();
	if trailing.is_empty() {
		return (spelling.to_owned(), None);
	}
	let base: String = spelling.chars().take(spelling.chars().count() - trailing.len()).collect();
	let mut subscript: u64 = 0;
	for digit in trailing.into_iter().rev() {
		let value = SUBSCRIPT_DIGITS.iter().position(|d| *d == digit).unwrap() as u64;
		subscript = subscript * 10 + value;
	}
	(base, Some(subscript))
}

fn unsplit_name(base: &str, subscript: u64) -> String {
	let mut spelling = base.to_owned();
	for digit in subscript.to_string().chars() {
		spelling.push(SUBSCRIPT_DIGITS[digit.to_digit(10).unwrap() as usize]);
	}
	spelling
}

#[cfg(test)]
mod test {
	use super::*;

	fn freshened(used: &[&str], hint: &str) -> String {
		let supply = NameSupply::new();
		let used: Vec<Name> = used.iter().map(|name| supply.intern(name)).collect();
		let hint = supply.intern(hint);
		supply.resolve(supply.freshen(&used, hint))
	}

	#[test]
	fn unused_hints_are_kept() {
		assert_eq!(freshened(&[], "x"), "x");
		assert_eq!(freshened(&["y"], "x"), "x");
	}

	#[test]
	fn collisions_gain_subscripts() {
		assert_eq!(freshened(&["x"], "x"), "x₁");
		assert_eq!(freshened(&["x", "x₁"], "x"), "x₂");
		assert_eq!(freshened(&["x", "x₁", "x₂"], "x₁"), "x₃");
		assert_eq!(freshened(&["so-far"], "so-far"), "so-far₁");
	}

	#[test]
	fn subscripts_carry_more_than_one_digit() {
		assert_eq!(freshened(&["n₉"], "n₉"), "n₁₀");
		assert_eq!(freshened(&["n₁₀"], "n₁₀"), "n₁₁");
	}

	#[test]
	fn bare_subscripts_get_a_base() {
		assert_eq!(freshened(&["₂"], "₂"), "x₃");
	}
}
