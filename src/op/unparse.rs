use std::fmt::Write;

use lasso::Resolver;

use crate::ir::syntax::Term;

/// Prints a core term in surface syntax. Canonical naturals come out as
/// decimal numerals and application spines are flattened.
pub fn print(term: &Term, f: &mut impl Write, interner: &impl Resolver) -> std::fmt::Result {
	if let Some(numeral) = as_numeral(term) {
		return write!(f, "{numeral}");
	}
	match term {
		Term::Variable(name) => write!(f, "{}", interner.resolve(name)),
		Term::The { ty, expression } => form(f, interner, "the", &[ty, expression]),
		Term::Universe => write!(f, "U"),

		// Natural numbers.
		Term::Nat => write!(f, "Nat"),
		Term::Zero => write!(f, "0"),
		Term::Add1(n) => form(f, interner, "add1", &[n]),
		Term::WhichNat { scrutinee, base_ty, base, step } =>
			recursor(f, interner, "which-Nat", scrutinee, base_ty, base, step),
		Term::IterNat { scrutinee, base_ty, base, step } =>
			recursor(f, interner, "iter-Nat", scrutinee, base_ty, base, step),
		Term::RecNat { scrutinee, base_ty, base, step } =>
			recursor(f, interner, "rec-Nat", scrutinee, base_ty, base, step),
		Term::IndNat { scrutinee, motive, base, step } =>
			form(f, interner, "ind-Nat", &[scrutinee, motive, base, step]),

		// Atoms.
		Term::Atom => write!(f, "Atom"),
		Term::Tick(name) => write!(f, "'{}", interner.resolve(name)),

		// Dependent functions.
		Term::Pi { parameter, base, family } => {
			write!(f, "(Π (({} ", interner.resolve(parameter))?;
			print(base, f, interner)?;
			write!(f, ")) ")?;
			print(family, f, interner)?;
			write!(f, ")")
		}
		Term::Lambda { parameter, body } => {
			write!(f, "(λ ({}) ", interner.resolve(parameter))?;
			print(body, f, interner)?;
			write!(f, ")")
		}
		Term::Apply { .. } => {
			let mut arguments = Vec::new();
			let mut head = term;
			while let Term::Apply { scrutinee, argument } = head {
				arguments.push(argument.as_ref());
				head = scrutinee;
			}
			write!(f, "(")?;
			print(head, f, interner)?;
			for argument in arguments.iter().rev() {
				write!(f, " ")?;
				print(argument, f, interner)?;
			}
			write!(f, ")")
		}

		// Dependent pairs.
		Term::Sigma { parameter, base, family } => {
			write!(f, "(Σ (({} ", interner.resolve(parameter))?;
			print(base, f, interner)?;
			write!(f, ")) ")?;
			print(family, f, interner)?;
			write!(f, ")")
		}
		Term::Cons { car, cdr } => form(f, interner, "cons", &[car, cdr]),
		Term::Car(scrutinee) => form(f, interner, "car", &[scrutinee]),
		Term::Cdr(scrutinee) => form(f, interner, "cdr", &[scrutinee]),

		// Trivialities.
		Term::Trivial => write!(f, "Trivial"),
		Term::Sole => write!(f, "sole"),

		// Lists.
		Term::List(entry) => form(f, interner, "List", &[entry]),
		Term::Nil => write!(f, "nil"),
		Term::ListCons { head, tail } => form(f, interner, "::", &[head, tail]),
		Term::RecList { scrutinee, base_ty, base, step } =>
			recursor(f, interner, "rec-List", scrutinee, base_ty, base, step),
		Term::IndList { scrutinee, motive, base, step } =>
			form(f, interner, "ind-List", &[scrutinee, motive, base, step]),

		// Length-indexed vectors.
		Term::Vec { entry, length } => form(f, interner, "Vec", &[entry, length]),
		Term::VecNil => write!(f, "vecnil"),
		Term::VecCons { head, tail } => form(f, interner, "vec::", &[head, tail]),
		Term::Head(scrutinee) => form(f, interner, "head", &[scrutinee]),
		Term::Tail(scrutinee) => form(f, interner, "tail", &[scrutinee]),
		Term::IndVec { length, scrutinee, motive, base, step } =>
			form(f, interner, "ind-Vec", &[length, scrutinee, motive, base, step]),

		// Sums.
		Term::Either { left, right } => form(f, interner, "Either", &[left, right]),
		Term::Left(value) => form(f, interner, "left", &[value]),
		Term::Right(value) => form(f, interner, "right", &[value]),
		Term::IndEither { scrutinee, motive, on_left, on_right } =>
			form(f, interner, "ind-Either", &[scrutinee, motive, on_left, on_right]),

		// Equality.
		Term::Equal { ty, from, to } => form(f, interner, "=", &[ty, from, to]),
		Term::Same(expression) => form(f, interner, "same", &[expression]),
		Term::Symm(scrutinee) => form(f, interner, "symm", &[scrutinee]),
		// The stored codomain is an elaboration artifact; the surface form
		// has two arguments.
		Term::Cong { scrutinee, function, .. } => form(f, interner, "cong", &[scrutinee, function]),
		Term::Replace { scrutinee, motive, base } =>
			form(f, interner, "replace", &[scrutinee, motive, base]),
		Term::Trans { left, right } => form(f, interner, "trans", &[left, right]),
		Term::IndEqual { scrutinee, motive, base } =>
			form(f, interner, "ind-=", &[scrutinee, motive, base]),

		// The empty type.
		Term::Absurd => write!(f, "Absurd"),
		Term::IndAbsurd { scrutinee, motive } => form(f, interner, "ind-Absurd", &[scrutinee, motive]),

		Term::Todo { .. } => write!(f, "TODO"),
	}
}

pub fn pretty(term: &Term, interner: &impl Resolver) -> String {
	let mut string = String::new();
	print(term, &mut string, interner).unwrap();
	string
}

fn as_numeral(term: &Term) -> Option<usize> {
	let mut numeral = 0;
	let mut term = term;
	loop {
		match term {
			Term::Zero => return Some(numeral),
			Term::Add1(n) => {
				numeral += 1;
				term = n;
			}
			_ => return None,
		}
	}
}

fn form(f: &mut impl Write, interner: &impl Resolver, head: &str, parts: &[&Term]) -> std::fmt::Result {
	write!(f, "({head}")?;
	for part in parts {
		write!(f, " ")?;
		print(part, f, interner)?;
	}
	write!(f, ")")
}

// Recursors over non-dependent base types carry the base's type; it prints as
// an annotation on the base, which keeps the form synthesizable as written.
fn recursor(
	f: &mut impl Write,
	interner: &impl Resolver,
	head: &str,
	scrutinee: &Term,
	base_ty: &Term,
	base: &Term,
	step: &Term,
) -> std::fmt::Result {
	write!(f, "({head} ")?;
	print(scrutinee, f, interner)?;
	write!(f, " (the ")?;
	print(base_ty, f, interner)?;
	write!(f, " ")?;
	print(base, f, interner)?;
	write!(f, ") ")?;
	print(step, f, interner)?;
	write!(f, ")")
}
