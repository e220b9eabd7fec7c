use crate::{common::Name, ir::syntax::Term};

/// Decides alpha-equivalence of two core terms. Terms here are normal forms,
/// so this is the entire definitional equality check: bound variables are
/// compared by binding depth, free variables by identity, and any two proofs
/// annotated with the empty type are identified.
pub fn alpha_equivalent(left: &Term, right: &Term) -> bool {
	Bindings::default().terms(left, right)
}

#[derive(Clone, Default)]
struct Bindings {
	left: Vec<(Name, usize)>,
	right: Vec<(Name, usize)>,
	depth: usize,
}

impl Bindings {
	fn bind(&self, left: Name, right: Name) -> Self {
		let mut bindings = self.clone();
		bindings.left.push((left, self.depth));
		bindings.right.push((right, self.depth));
		bindings.depth += 1;
		bindings
	}

	fn variable(&self, left: Name, right: Name) -> bool {
		let left_depth = self.left.iter().rev().find(|(name, _)| *name == left);
		let right_depth = self.right.iter().rev().find(|(name, _)| *name == right);
		match (left_depth, right_depth) {
			(Some((_, left)), Some((_, right))) => left == right,
			(None, None) => left == right,
			_ => false,
		}
	}

	fn terms(&self, left: &Term, right: &Term) -> bool {
		use Term::*;
		match (left, right) {
			(Variable(left), Variable(right)) => self.variable(*left, *right),

			// Any two proofs of the empty type are equal, whatever their shape.
			(The { ty: left_ty, .. }, The { ty: right_ty, .. })
				if matches!(**left_ty, Absurd) && matches!(**right_ty, Absurd) =>
				true,
			(
				The { ty: left_ty, expression: left },
				The { ty: right_ty, expression: right },
			) => self.terms(left_ty, right_ty) && self.terms(left, right),

			(Universe, Universe) => true,

			(Nat, Nat) => true,
			(Zero, Zero) => true,
			(Add1(left), Add1(right)) => self.terms(left, right),
			(
				WhichNat { scrutinee: ls, base_ty: lt, base: lb, step: lp },
				WhichNat { scrutinee: rs, base_ty: rt, base: rb, step: rp },
			) =>
				self.terms(ls, rs) && self.terms(lt, rt) && self.terms(lb, rb) && self.terms(lp, rp),
			(
				IterNat { scrutinee: ls, base_ty: lt, base: lb, step: lp },
				IterNat { scrutinee: rs, base_ty: rt, base: rb, step: rp },
			) =>
				self.terms(ls, rs) && self.terms(lt, rt) && self.terms(lb, rb) && self.terms(lp, rp),
			(
				RecNat { scrutinee: ls, base_ty: lt, base: lb, step: lp },
				RecNat { scrutinee: rs, base_ty: rt, base: rb, step: rp },
			) =>
				self.terms(ls, rs) && self.terms(lt, rt) && self.terms(lb, rb) && self.terms(lp, rp),
			(
				IndNat { scrutinee: ls, motive: lm, base: lb, step: lp },
				IndNat { scrutinee: rs, motive: rm, base: rb, step: rp },
			) =>
				self.terms(ls, rs) && self.terms(lm, rm) && self.terms(lb, rb) && self.terms(lp, rp),

			(Atom, Atom) => true,
			(Tick(left), Tick(right)) => left == right,

			(
				Pi { parameter: lp, base: lb, family: lf },
				Pi { parameter: rp, base: rb, family: rf },
			) => self.terms(lb, rb) && self.bind(*lp, *rp).terms(lf, rf),
			(
				Lambda { parameter: lp, body: lb },
				Lambda { parameter: rp, body: rb },
			) => self.bind(*lp, *rp).terms(lb, rb),
			(
				Apply { scrutinee: ls, argument: la },
				Apply { scrutinee: rs, argument: ra },
			) => self.terms(ls, rs) && self.terms(la, ra),

			(
				Sigma { parameter: lp, base: lb, family: lf },
				Sigma { parameter: rp, base: rb, family: rf },
			) => self.terms(lb, rb) && self.bind(*lp, *rp).terms(lf, rf),
			(Cons { car: lc, cdr: ld }, Cons { car: rc, cdr: rd }) =>
				self.terms(lc, rc) && self.terms(ld, rd),
			(Car(left), Car(right)) => self.terms(left, right),
			(Cdr(left), Cdr(right)) => self.terms(left, right),

			(Trivial, Trivial) => true,
			(Sole, Sole) => true,

			(List(left), List(right)) => self.terms(left, right),
			(Nil, Nil) => true,
			(ListCons { head: lh, tail: lt }, ListCons { head: rh, tail: rt }) =>
				self.terms(lh, rh) && self.terms(lt, rt),
			(
				RecList { scrutinee: ls, base_ty: lt, base: lb, step: lp },
				RecList { scrutinee: rs, base_ty: rt, base: rb, step: rp },
			) =>
				self.terms(ls, rs) && self.terms(lt, rt) && self.terms(lb, rb) && self.terms(lp, rp),
			(
				IndList { scrutinee: ls, motive: lm, base: lb, step: lp },
				IndList { scrutinee: rs, motive: rm, base: rb, step: rp },
			) =>
				self.terms(ls, rs) && self.terms(lm, rm) && self.terms(lb, rb) && self.terms(lp, rp),

			(Vec { entry: le, length: ll }, Vec { entry: re, length: rl }) =>
				self.terms(le, re) && self.terms(ll, rl),
			(VecNil, VecNil) => true,
			(VecCons { head: lh, tail: lt }, VecCons { head: rh, tail: rt }) =>
				self.terms(lh, rh) && self.terms(lt, rt),
			(Head(left), Head(right)) => self.terms(left, right),
			(Tail(left), Tail(right)) => self.terms(left, right),
			(
				IndVec { length: ll, scrutinee: ls, motive: lm, base: lb, step: lp },
				IndVec { length: rl, scrutinee: rs, motive: rm, base: rb, step: rp },
			) =>
				self.terms(ll, rl)
					&& self.terms(ls, rs)
					&& self.terms(lm, rm)
					&& self.terms(lb, rb)
					&& self.terms(lp, rp),

			(Either { left: ll, right: lr }, Either { left: rl, right: rr }) =>
				self.terms(ll, rl) && self.terms(lr, rr),
			(Left(left), Left(right)) => self.terms(left, right),
			(Right(left), Right(right)) => self.terms(left, right),
			(
				IndEither { scrutinee: ls, motive: lm, on_left: ll, on_right: lr },
				IndEither { scrutinee: rs, motive: rm, on_left: rl, on_right: rr },
			) =>
				self.terms(ls, rs) && self.terms(lm, rm) && self.terms(ll, rl) && self.terms(lr, rr),

			(
				Equal { ty: lt, from: lf, to: ll },
				Equal { ty: rt, from: rf, to: rl },
			) => self.terms(lt, rt) && self.terms(lf, rf) && self.terms(ll, rl),
			(Same(left), Same(right)) => self.terms(left, right),
			(Symm(left), Symm(right)) => self.terms(left, right),
			(
				Cong { scrutinee: ls, codomain: lc, function: lf },
				Cong { scrutinee: rs, codomain: rc, function: rf },
			) => self.terms(ls, rs) && self.terms(lc, rc) && self.terms(lf, rf),
			(
				Replace { scrutinee: ls, motive: lm, base: lb },
				Replace { scrutinee: rs, motive: rm, base: rb },
			) => self.terms(ls, rs) && self.terms(lm, rm) && self.terms(lb, rb),
			(Trans { left: ll, right: lr }, Trans { left: rl, right: rr }) =>
				self.terms(ll, rl) && self.terms(lr, rr),
			(
				IndEqual { scrutinee: ls, motive: lm, base: lb },
				IndEqual { scrutinee: rs, motive: rm, base: rb },
			) => self.terms(ls, rs) && self.terms(lm, rm) && self.terms(lb, rb),

			(Absurd, Absurd) => true,
			(
				IndAbsurd { scrutinee: ls, motive: lm },
				IndAbsurd { scrutinee: rs, motive: rm },
			) => self.terms(ls, rs) && self.terms(lm, rm),

			// Two holes are the same hole exactly when they come from the same
			// source position.
			(Todo { range: left, .. }, Todo { range: right, .. }) => left == right,

			_ => false,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{common::NameSupply, utility::bx};

	fn var(name: Name) -> Term { Term::Variable(name) }

	fn lambda(parameter: Name, body: Term) -> Term { Term::Lambda { parameter, body: bx!(body) } }

	#[test]
	fn binders_compare_by_position() {
		let names = NameSupply::new();
		let (x, y, f) = (names.intern("x"), names.intern("y"), names.intern("f"));
		assert!(alpha_equivalent(&lambda(x, var(x)), &lambda(y, var(y))));
		assert!(!alpha_equivalent(&lambda(x, var(x)), &lambda(y, var(f))));
		assert!(alpha_equivalent(&lambda(x, var(f)), &lambda(y, var(f))));
	}

	#[test]
	fn shadowing_rebinds_names() {
		let names = NameSupply::new();
		let (x, y, z) = (names.intern("x"), names.intern("y"), names.intern("z"));
		let left = lambda(x, lambda(x, var(x)));
		assert!(alpha_equivalent(&left, &lambda(y, lambda(z, var(z)))));
		assert!(!alpha_equivalent(&left, &lambda(y, lambda(z, var(y)))));
	}

	#[test]
	fn free_variables_compare_by_name() {
		let names = NameSupply::new();
		let (f, g) = (names.intern("f"), names.intern("g"));
		assert!(alpha_equivalent(&var(f), &var(f)));
		assert!(!alpha_equivalent(&var(f), &var(g)));
	}

	#[test]
	fn absurd_proofs_are_all_equal() {
		let names = NameSupply::new();
		let (p, q) = (names.intern("p"), names.intern("q"));
		let annotated =
			|e: Term| Term::The { ty: bx!(Term::Absurd), expression: bx!(e) };
		assert!(alpha_equivalent(&annotated(var(p)), &annotated(var(q))));
		let at_nat = |e: Term| Term::The { ty: bx!(Term::Nat), expression: bx!(e) };
		assert!(!alpha_equivalent(&at_nat(var(p)), &at_nat(var(q))));
	}
}
