use crate::{
	ir::{
		semantics::{Neutral, Normal, Value},
		syntax::Term,
	},
	op::{
		elaborate::Context,
		evaluate::{do_apply, do_car, do_cdr, now},
	},
	utility::bx,
};

/// Reads a value back to the core term denoting its normal form. Readback is
/// directed by the type, so functions and pairs come back eta-expanded and
/// every value of `Trivial` type comes back as `sole`.
pub fn read_back(context: &Context, ty: &Value, value: &Value) -> Term {
	match now(ty) {
		Value::Universe => read_back_type(context, value),

		Value::Nat => match now(value) {
			Value::Zero => Term::Zero,
			Value::Add1(previous) => Term::Add1(bx!(read_back(context, &Value::Nat, &previous))),
			Value::Neutral(_, neutral) => read_back_neutral(context, &neutral),
			_ => panic!(),
		},

		Value::Atom => match now(value) {
			Value::Tick(name) => Term::Tick(name),
			Value::Neutral(_, neutral) => read_back_neutral(context, &neutral),
			_ => panic!(),
		},

		Value::Pi { parameter, base, family } => {
			let name = context.fresh(parameter);
			let argument = Value::variable(base.as_ref().clone(), name);
			Term::Lambda {
				parameter: name,
				body: bx!(read_back(
					&context.bind_free(name, base.as_ref().clone()),
					&family.apply(argument.clone()),
					&do_apply(value.clone(), argument),
				)),
			}
		}

		Value::Sigma { base, family, .. } => {
			let car = do_car(value.clone());
			Term::Cons {
				car: bx!(read_back(context, &base, &car)),
				cdr: bx!(read_back(context, &family.apply(car.clone()), &do_cdr(value.clone()))),
			}
		}

		Value::Trivial => Term::Sole,

		Value::List(entry) => match now(value) {
			Value::Nil => Term::Nil,
			Value::ListCons { head, tail } => Term::ListCons {
				head: bx!(read_back(context, &entry, &head)),
				tail: bx!(read_back(context, &Value::List(entry), &tail)),
			},
			Value::Neutral(_, neutral) => read_back_neutral(context, &neutral),
			_ => panic!(),
		},

		Value::Vec { entry, length } => match now(value) {
			Value::VecNil => Term::VecNil,
			Value::VecCons { head, tail } => match now(&length) {
				Value::Add1(previous) => Term::VecCons {
					head: bx!(read_back(context, &entry, &head)),
					tail: bx!(read_back(context, &Value::Vec { entry, length: previous }, &tail)),
				},
				_ => panic!(),
			},
			Value::Neutral(_, neutral) => read_back_neutral(context, &neutral),
			_ => panic!(),
		},

		Value::Either { left, right } => match now(value) {
			Value::Left(value) => Term::Left(bx!(read_back(context, &left, &value))),
			Value::Right(value) => Term::Right(bx!(read_back(context, &right, &value))),
			Value::Neutral(_, neutral) => read_back_neutral(context, &neutral),
			_ => panic!(),
		},

		Value::Equal { ty, .. } => match now(value) {
			Value::Same(value) => Term::Same(bx!(read_back(context, &ty, &value))),
			Value::Neutral(_, neutral) => read_back_neutral(context, &neutral),
			_ => panic!(),
		},

		// The only values of the empty type are stuck, and they are all
		// definitionally equal; their normal form keeps the annotation.
		Value::Absurd => match now(value) {
			Value::Neutral(_, neutral) => Term::The {
				ty: bx!(Term::Absurd),
				expression: bx!(read_back_neutral(context, &neutral)),
			},
			_ => panic!(),
		},

		Value::Neutral(..) => match now(value) {
			Value::Neutral(_, neutral) => read_back_neutral(context, &neutral),
			_ => panic!(),
		},

		_ => panic!(),
	}
}

pub fn read_back_normal(context: &Context, normal: &Normal) -> Term {
	read_back(context, &normal.ty, &normal.value)
}

pub fn read_back_type(context: &Context, ty: &Value) -> Term {
	match now(ty) {
		Value::Universe => Term::Universe,
		Value::Nat => Term::Nat,
		Value::Atom => Term::Atom,
		Value::Trivial => Term::Trivial,
		Value::Absurd => Term::Absurd,

		Value::Pi { parameter, base, family } => {
			let name = context.fresh(parameter);
			Term::Pi {
				parameter: name,
				base: bx!(read_back_type(context, &base)),
				family: bx!(read_back_type(
					&context.bind_free(name, base.as_ref().clone()),
					&family.apply(Value::variable(base.as_ref().clone(), name)),
				)),
			}
		}

		Value::Sigma { parameter, base, family } => {
			let name = context.fresh(Some(parameter));
			Term::Sigma {
				parameter: name,
				base: bx!(read_back_type(context, &base)),
				family: bx!(read_back_type(
					&context.bind_free(name, base.as_ref().clone()),
					&family.apply(Value::variable(base.as_ref().clone(), name)),
				)),
			}
		}

		Value::List(entry) => Term::List(bx!(read_back_type(context, &entry))),

		Value::Vec { entry, length } => Term::Vec {
			entry: bx!(read_back_type(context, &entry)),
			length: bx!(read_back(context, &Value::Nat, &length)),
		},

		Value::Either { left, right } => Term::Either {
			left: bx!(read_back_type(context, &left)),
			right: bx!(read_back_type(context, &right)),
		},

		Value::Equal { ty, from, to } => Term::Equal {
			ty: bx!(read_back_type(context, &ty)),
			from: bx!(read_back(context, &ty, &from)),
			to: bx!(read_back(context, &ty, &to)),
		},

		Value::Neutral(_, neutral) => read_back_neutral(context, &neutral),

		_ => panic!(),
	}
}

pub fn read_back_neutral(context: &Context, neutral: &Neutral) -> Term {
	match neutral {
		Neutral::Variable(name) => Term::Variable(*name),

		Neutral::Todo { range, ty } =>
			Term::Todo { range: *range, ty: bx!(read_back_type(context, ty)) },

		// Natural numbers.
		Neutral::WhichNat { scrutinee, base, step } => Term::WhichNat {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			base_ty: bx!(read_back_type(context, &base.ty)),
			base: bx!(read_back_normal(context, base)),
			step: bx!(read_back_normal(context, step)),
		},
		Neutral::IterNat { scrutinee, base, step } => Term::IterNat {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			base_ty: bx!(read_back_type(context, &base.ty)),
			base: bx!(read_back_normal(context, base)),
			step: bx!(read_back_normal(context, step)),
		},
		Neutral::RecNat { scrutinee, base, step } => Term::RecNat {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			base_ty: bx!(read_back_type(context, &base.ty)),
			base: bx!(read_back_normal(context, base)),
			step: bx!(read_back_normal(context, step)),
		},
		Neutral::IndNat { scrutinee, motive, base, step } => Term::IndNat {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			motive: bx!(read_back_normal(context, motive)),
			base: bx!(read_back_normal(context, base)),
			step: bx!(read_back_normal(context, step)),
		},

		// Dependent functions.
		Neutral::Apply { scrutinee, argument } => Term::Apply {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			argument: bx!(read_back_normal(context, argument)),
		},

		// Dependent pairs.
		Neutral::Car(scrutinee) => Term::Car(bx!(read_back_neutral(context, scrutinee))),
		Neutral::Cdr(scrutinee) => Term::Cdr(bx!(read_back_neutral(context, scrutinee))),

		// Lists.
		Neutral::RecList { scrutinee, base, step } => Term::RecList {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			base_ty: bx!(read_back_type(context, &base.ty)),
			base: bx!(read_back_normal(context, base)),
			step: bx!(read_back_normal(context, step)),
		},
		Neutral::IndList { scrutinee, motive, base, step } => Term::IndList {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			motive: bx!(read_back_normal(context, motive)),
			base: bx!(read_back_normal(context, base)),
			step: bx!(read_back_normal(context, step)),
		},

		// Length-indexed vectors.
		Neutral::Head(scrutinee) => Term::Head(bx!(read_back_neutral(context, scrutinee))),
		Neutral::Tail(scrutinee) => Term::Tail(bx!(read_back_neutral(context, scrutinee))),
		Neutral::IndVec12 { length, scrutinee, motive, base, step } => Term::IndVec {
			length: bx!(read_back_neutral(context, length)),
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			motive: bx!(read_back_normal(context, motive)),
			base: bx!(read_back_normal(context, base)),
			step: bx!(read_back_normal(context, step)),
		},
		Neutral::IndVec2 { length, scrutinee, motive, base, step } => Term::IndVec {
			length: bx!(read_back_normal(context, length)),
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			motive: bx!(read_back_normal(context, motive)),
			base: bx!(read_back_normal(context, base)),
			step: bx!(read_back_normal(context, step)),
		},

		// Sums.
		Neutral::IndEither { scrutinee, motive, on_left, on_right } => Term::IndEither {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			motive: bx!(read_back_normal(context, motive)),
			on_left: bx!(read_back_normal(context, on_left)),
			on_right: bx!(read_back_normal(context, on_right)),
		},

		// Equality.
		Neutral::Symm(scrutinee) => Term::Symm(bx!(read_back_neutral(context, scrutinee))),
		Neutral::Cong { scrutinee, codomain, function } => Term::Cong {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			codomain: bx!(read_back_type(context, codomain)),
			function: bx!(read_back_normal(context, function)),
		},
		Neutral::Replace { scrutinee, motive, base } => Term::Replace {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			motive: bx!(read_back_normal(context, motive)),
			base: bx!(read_back_normal(context, base)),
		},
		Neutral::Trans1 { left, right } => Term::Trans {
			left: bx!(read_back_neutral(context, left)),
			right: bx!(read_back_normal(context, right)),
		},
		Neutral::Trans2 { left, right } => Term::Trans {
			left: bx!(read_back_normal(context, left)),
			right: bx!(read_back_neutral(context, right)),
		},
		Neutral::Trans12 { left, right } => Term::Trans {
			left: bx!(read_back_neutral(context, left)),
			right: bx!(read_back_neutral(context, right)),
		},
		Neutral::IndEqual { scrutinee, motive, base } => Term::IndEqual {
			scrutinee: bx!(read_back_neutral(context, scrutinee)),
			motive: bx!(read_back_normal(context, motive)),
			base: bx!(read_back_normal(context, base)),
		},

		// The empty type.
		Neutral::IndAbsurd { scrutinee, motive } => Term::IndAbsurd {
			scrutinee: bx!(Term::The {
				ty: bx!(Term::Absurd),
				expression: bx!(read_back_neutral(context, scrutinee)),
			}),
			motive: bx!(read_back_normal(context, motive)),
		},
	}
}
