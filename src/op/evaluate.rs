use std::rc::Rc;

use crate::{
	ir::{
		semantics::{Closure, Delayed, Environment, Neutral, Normal, Value},
		syntax::Term,
	},
	utility::{cell, rc},
};

pub trait Evaluate {
	type Value;
	/// Transforms a core term into a value.
	fn evaluate(self) -> Self::Value
	where
		Self: Sized,
	{
		self.evaluate_in(&Environment::new())
	}

	fn evaluate_in(self, environment: &Environment) -> Self::Value;
}

impl Evaluate for Term {
	type Value = Value;
	fn evaluate_in(self, environment: &Environment) -> Self::Value {
		use Term::*;
		match self {
			// Variables.
			Variable(name) => environment.lookup(name),

			// Annotations.
			The { expression, .. } => expression.evaluate_in(environment),

			// Types.
			Universe => Value::Universe,

			// Natural numbers.
			Nat => Value::Nat,
			Zero => Value::Zero,
			Add1(n) => Value::Add1(rc!(later(environment, *n))),
			WhichNat { scrutinee, base_ty, base, step } => do_which_nat(
				later(environment, *scrutinee),
				later(environment, *base_ty),
				later(environment, *base),
				later(environment, *step),
			),
			IterNat { scrutinee, base_ty, base, step } => do_iter_nat(
				later(environment, *scrutinee),
				later(environment, *base_ty),
				later(environment, *base),
				later(environment, *step),
			),
			RecNat { scrutinee, base_ty, base, step } => do_rec_nat(
				later(environment, *scrutinee),
				later(environment, *base_ty),
				later(environment, *base),
				later(environment, *step),
			),
			IndNat { scrutinee, motive, base, step } => do_ind_nat(
				later(environment, *scrutinee),
				later(environment, *motive),
				later(environment, *base),
				later(environment, *step),
			),

			// Atoms.
			Atom => Value::Atom,
			Tick(name) => Value::Tick(name),

			// Dependent functions.
			Pi { parameter, base, family } => Value::Pi {
				parameter: Some(parameter),
				base: rc!(later(environment, *base)),
				family: rc!(Closure::Source {
					environment: environment.clone(),
					parameter,
					body: *family,
				}),
			},
			Lambda { parameter, body } => Value::Lambda {
				parameter,
				body: rc!(Closure::Source { environment: environment.clone(), parameter, body: *body }),
			},
			Apply { scrutinee, argument } =>
				do_apply(later(environment, *scrutinee), later(environment, *argument)),

			// Dependent pairs.
			Sigma { parameter, base, family } => Value::Sigma {
				parameter,
				base: rc!(later(environment, *base)),
				family: rc!(Closure::Source {
					environment: environment.clone(),
					parameter,
					body: *family,
				}),
			},
			Cons { car, cdr } =>
				Value::Cons { car: rc!(later(environment, *car)), cdr: rc!(later(environment, *cdr)) },
			Car(scrutinee) => do_car(later(environment, *scrutinee)),
			Cdr(scrutinee) => do_cdr(later(environment, *scrutinee)),

			// Trivialities.
			Trivial => Value::Trivial,
			Sole => Value::Sole,

			// Lists.
			List(entry) => Value::List(rc!(later(environment, *entry))),
			Nil => Value::Nil,
			ListCons { head, tail } =>
				Value::ListCons { head: rc!(later(environment, *head)), tail: rc!(later(environment, *tail)) },
			RecList { scrutinee, base_ty, base, step } => do_rec_list(
				later(environment, *scrutinee),
				later(environment, *base_ty),
				later(environment, *base),
				later(environment, *step),
			),
			IndList { scrutinee, motive, base, step } => do_ind_list(
				later(environment, *scrutinee),
				later(environment, *motive),
				later(environment, *base),
				later(environment, *step),
			),

			// Length-indexed vectors.
			Vec { entry, length } =>
				Value::Vec { entry: rc!(later(environment, *entry)), length: rc!(later(environment, *length)) },
			VecNil => Value::VecNil,
			VecCons { head, tail } =>
				Value::VecCons { head: rc!(later(environment, *head)), tail: rc!(later(environment, *tail)) },
			Head(scrutinee) => do_head(later(environment, *scrutinee)),
			Tail(scrutinee) => do_tail(later(environment, *scrutinee)),
			IndVec { length, scrutinee, motive, base, step } => do_ind_vec(
				later(environment, *length),
				later(environment, *scrutinee),
				later(environment, *motive),
				later(environment, *base),
				later(environment, *step),
			),

			// Sums.
			Either { left, right } =>
				Value::Either { left: rc!(later(environment, *left)), right: rc!(later(environment, *right)) },
			Left(value) => Value::Left(rc!(later(environment, *value))),
			Right(value) => Value::Right(rc!(later(environment, *value))),
			IndEither { scrutinee, motive, on_left, on_right } => do_ind_either(
				later(environment, *scrutinee),
				later(environment, *motive),
				later(environment, *on_left),
				later(environment, *on_right),
			),

			// Equality.
			Equal { ty, from, to } => Value::Equal {
				ty: rc!(later(environment, *ty)),
				from: rc!(later(environment, *from)),
				to: rc!(later(environment, *to)),
			},
			Same(value) => Value::Same(rc!(later(environment, *value))),
			Symm(scrutinee) => do_symm(later(environment, *scrutinee)),
			Cong { scrutinee, codomain, function } => do_cong(
				later(environment, *scrutinee),
				later(environment, *codomain),
				later(environment, *function),
			),
			Replace { scrutinee, motive, base } => do_replace(
				later(environment, *scrutinee),
				later(environment, *motive),
				later(environment, *base),
			),
			Trans { left, right } => do_trans(later(environment, *left), later(environment, *right)),
			IndEqual { scrutinee, motive, base } => do_ind_equal(
				later(environment, *scrutinee),
				later(environment, *motive),
				later(environment, *base),
			),

			// The empty type.
			Absurd => Value::Absurd,
			IndAbsurd { scrutinee, motive } =>
				do_ind_absurd(later(environment, *scrutinee), later(environment, *motive)),

			// Unfinished programs.
			Todo { range, ty } => {
				let ty = later(environment, *ty);
				Value::Neutral(rc!(ty.clone()), rc!(Neutral::Todo { range, ty }))
			}
		}
	}
}

/// Defers the evaluation of a term in an environment until the first time its
/// head is needed.
pub fn later(environment: &Environment, term: Term) -> Value {
	Value::Delay(cell!(Delayed::Pending(environment.clone(), term)))
}

/// Forces a value far enough to expose a head that is not a delay, memoizing
/// the result in place so each delayed term is evaluated at most once.
pub fn now(value: &Value) -> Value {
	let Value::Delay(cell) = value else { return value.clone() };
	let (environment, term) = match &*cell.borrow() {
		Delayed::Forced(forced) => return forced.clone(),
		Delayed::Pending(environment, term) => (environment.clone(), term.clone()),
	};
	let forced = now(&term.evaluate_in(&environment));
	*cell.borrow_mut() = Delayed::Forced(forced.clone());
	forced
}

impl Closure {
	/// Instantiates the closure's parameter with an argument, which may itself
	/// be delayed.
	pub fn apply(&self, argument: Value) -> Value {
		match self {
			Self::Source { environment, parameter, body } =>
				body.clone().evaluate_in(&environment.extend(*parameter, argument)),
			Self::Native(function) => function(argument),
		}
	}
}

/// Builds a function type whose family is computed by the evaluator rather
/// than read from a source binder.
pub fn native_pi(base: Value, family: impl Fn(Value) -> Value + 'static) -> Value {
	Value::Pi { parameter: None, base: rc!(base), family: rc!(Closure::Native(Rc::new(family))) }
}

/// Builds a non-dependent function type.
pub fn arrow(base: Value, codomain: Value) -> Value { native_pi(base, move |_| codomain.clone()) }

// The types ascribed to eliminator motives and steps when an elimination gets
// stuck. These are shared with the elaborator, which checks the corresponding
// expressions against the same types.

pub fn ind_nat_step_type(motive: &Value) -> Value {
	let motive = motive.clone();
	native_pi(Value::Nat, move |previous| {
		let motive = motive.clone();
		native_pi(do_apply(motive.clone(), previous.clone()), move |_| {
			do_apply(motive.clone(), Value::Add1(rc!(previous.clone())))
		})
	})
}

pub fn rec_list_step_type(entry: &Value, base_ty: &Value) -> Value {
	let base_ty = base_ty.clone();
	arrow(
		entry.clone(),
		arrow(Value::List(rc!(entry.clone())), arrow(base_ty.clone(), base_ty)),
	)
}

pub fn ind_list_step_type(entry: &Value, motive: &Value) -> Value {
	let entry = entry.clone();
	let motive = motive.clone();
	native_pi(entry.clone(), move |head| {
		let entry = entry.clone();
		let motive = motive.clone();
		native_pi(Value::List(rc!(entry)), move |tail| {
			let result = do_apply(
				motive.clone(),
				Value::ListCons { head: rc!(head.clone()), tail: rc!(tail.clone()) },
			);
			arrow(do_apply(motive.clone(), tail), result)
		})
	})
}

pub fn ind_vec_motive_type(entry: &Value) -> Value {
	let entry = entry.clone();
	native_pi(Value::Nat, move |length| {
		arrow(Value::Vec { entry: rc!(entry.clone()), length: rc!(length) }, Value::Universe)
	})
}

pub fn ind_vec_step_type(entry: &Value, motive: &Value) -> Value {
	let entry = entry.clone();
	let motive = motive.clone();
	native_pi(Value::Nat, move |length| {
		let entry = entry.clone();
		let motive = motive.clone();
		native_pi(entry.clone(), move |head| {
			let entry = entry.clone();
			let motive = motive.clone();
			let length = length.clone();
			native_pi(Value::Vec { entry: rc!(entry), length: rc!(length.clone()) }, move |tail| {
				let result = do_apply(
					do_apply(motive.clone(), Value::Add1(rc!(length.clone()))),
					Value::VecCons { head: rc!(head.clone()), tail: rc!(tail.clone()) },
				);
				arrow(do_apply(do_apply(motive.clone(), length.clone()), tail), result)
			})
		})
	})
}

pub fn ind_either_left_type(left: &Value, motive: &Value) -> Value {
	let motive = motive.clone();
	native_pi(left.clone(), move |value| do_apply(motive.clone(), Value::Left(rc!(value))))
}

pub fn ind_either_right_type(right: &Value, motive: &Value) -> Value {
	let motive = motive.clone();
	native_pi(right.clone(), move |value| do_apply(motive.clone(), Value::Right(rc!(value))))
}

pub fn ind_equal_motive_type(ty: &Value, from: &Value) -> Value {
	let ty = ty.clone();
	let from = from.clone();
	native_pi(ty.clone(), move |to| {
		arrow(
			Value::Equal { ty: rc!(ty.clone()), from: rc!(from.clone()), to: rc!(to) },
			Value::Universe,
		)
	})
}

pub fn do_apply(function: Value, argument: Value) -> Value {
	match now(&function) {
		Value::Lambda { body, .. } => body.apply(argument),
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Pi { base, family, .. } => Value::Neutral(
				rc!(family.apply(argument.clone())),
				rc!(Neutral::Apply {
					scrutinee: neutral,
					argument: Normal { ty: base.as_ref().clone(), value: argument },
				}),
			),
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_car(target: Value) -> Value {
	match now(&target) {
		Value::Cons { car, .. } => car.as_ref().clone(),
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Sigma { base, .. } => Value::Neutral(base, rc!(Neutral::Car(neutral))),
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_cdr(target: Value) -> Value {
	match now(&target) {
		Value::Cons { cdr, .. } => cdr.as_ref().clone(),
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Sigma { family, .. } =>
				Value::Neutral(rc!(family.apply(do_car(target.clone()))), rc!(Neutral::Cdr(neutral))),
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_which_nat(target: Value, base_ty: Value, base: Value, step: Value) -> Value {
	match now(&target) {
		Value::Zero => base,
		Value::Add1(previous) => do_apply(step, previous.as_ref().clone()),
		Value::Neutral(_, neutral) => Value::Neutral(
			rc!(base_ty.clone()),
			rc!(Neutral::WhichNat {
				scrutinee: neutral,
				base: Normal { ty: base_ty.clone(), value: base },
				step: Normal { ty: arrow(Value::Nat, base_ty), value: step },
			}),
		),
		_ => panic!(),
	}
}

pub fn do_iter_nat(target: Value, base_ty: Value, base: Value, step: Value) -> Value {
	match now(&target) {
		Value::Zero => base,
		Value::Add1(previous) =>
			do_apply(step.clone(), do_iter_nat(previous.as_ref().clone(), base_ty, base, step)),
		Value::Neutral(_, neutral) => Value::Neutral(
			rc!(base_ty.clone()),
			rc!(Neutral::IterNat {
				scrutinee: neutral,
				base: Normal { ty: base_ty.clone(), value: base },
				step: Normal { ty: arrow(base_ty.clone(), base_ty), value: step },
			}),
		),
		_ => panic!(),
	}
}

pub fn do_rec_nat(target: Value, base_ty: Value, base: Value, step: Value) -> Value {
	match now(&target) {
		Value::Zero => base,
		Value::Add1(previous) => do_apply(
			do_apply(step.clone(), previous.as_ref().clone()),
			do_rec_nat(previous.as_ref().clone(), base_ty, base, step),
		),
		Value::Neutral(_, neutral) => Value::Neutral(
			rc!(base_ty.clone()),
			rc!(Neutral::RecNat {
				scrutinee: neutral,
				base: Normal { ty: base_ty.clone(), value: base },
				step: Normal {
					ty: arrow(Value::Nat, arrow(base_ty.clone(), base_ty)),
					value: step,
				},
			}),
		),
		_ => panic!(),
	}
}

pub fn do_ind_nat(target: Value, motive: Value, base: Value, step: Value) -> Value {
	match now(&target) {
		Value::Zero => base,
		Value::Add1(previous) => do_apply(
			do_apply(step.clone(), previous.as_ref().clone()),
			do_ind_nat(previous.as_ref().clone(), motive, base, step),
		),
		Value::Neutral(_, neutral) => Value::Neutral(
			rc!(do_apply(motive.clone(), target.clone())),
			rc!(Neutral::IndNat {
				scrutinee: neutral,
				motive: Normal { ty: arrow(Value::Nat, Value::Universe), value: motive.clone() },
				base: Normal { ty: do_apply(motive.clone(), Value::Zero), value: base },
				step: Normal { ty: ind_nat_step_type(&motive), value: step },
			}),
		),
		_ => panic!(),
	}
}

pub fn do_rec_list(target: Value, base_ty: Value, base: Value, step: Value) -> Value {
	match now(&target) {
		Value::Nil => base,
		Value::ListCons { head, tail } => do_apply(
			do_apply(do_apply(step.clone(), head.as_ref().clone()), tail.as_ref().clone()),
			do_rec_list(tail.as_ref().clone(), base_ty, base, step),
		),
		Value::Neutral(ty, neutral) => {
			let Value::List(entry) = now(&ty) else { panic!() };
			Value::Neutral(
				rc!(base_ty.clone()),
				rc!(Neutral::RecList {
					scrutinee: neutral,
					base: Normal { ty: base_ty.clone(), value: base },
					step: Normal { ty: rec_list_step_type(&entry, &base_ty), value: step },
				}),
			)
		}
		_ => panic!(),
	}
}

pub fn do_ind_list(target: Value, motive: Value, base: Value, step: Value) -> Value {
	match now(&target) {
		Value::Nil => base,
		Value::ListCons { head, tail } => do_apply(
			do_apply(do_apply(step.clone(), head.as_ref().clone()), tail.as_ref().clone()),
			do_ind_list(tail.as_ref().clone(), motive, base, step),
		),
		Value::Neutral(ty, neutral) => {
			let Value::List(entry) = now(&ty) else { panic!() };
			Value::Neutral(
				rc!(do_apply(motive.clone(), target.clone())),
				rc!(Neutral::IndList {
					scrutinee: neutral,
					motive: Normal {
						ty: arrow(Value::List(entry.clone()), Value::Universe),
						value: motive.clone(),
					},
					base: Normal { ty: do_apply(motive.clone(), Value::Nil), value: base },
					step: Normal { ty: ind_list_step_type(&entry, &motive), value: step },
				}),
			)
		}
		_ => panic!(),
	}
}

pub fn do_head(target: Value) -> Value {
	match now(&target) {
		Value::VecCons { head, .. } => head.as_ref().clone(),
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Vec { entry, .. } => Value::Neutral(entry, rc!(Neutral::Head(neutral))),
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_tail(target: Value) -> Value {
	match now(&target) {
		Value::VecCons { tail, .. } => tail.as_ref().clone(),
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Vec { entry, length } => match now(&length) {
				Value::Add1(length) =>
					Value::Neutral(rc!(Value::Vec { entry, length }), rc!(Neutral::Tail(neutral))),
				_ => panic!(),
			},
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_ind_vec(length: Value, target: Value, motive: Value, base: Value, step: Value) -> Value {
	match (now(&length), now(&target)) {
		(Value::Zero, Value::VecNil) => base,
		(Value::Add1(previous), Value::VecCons { head, tail }) => do_apply(
			do_apply(
				do_apply(do_apply(step.clone(), previous.as_ref().clone()), head.as_ref().clone()),
				tail.as_ref().clone(),
			),
			do_ind_vec(previous.as_ref().clone(), tail.as_ref().clone(), motive, base, step),
		),
		(Value::Neutral(_, length_neutral), Value::Neutral(ty, target_neutral)) => {
			let Value::Vec { entry, .. } = now(&ty) else { panic!() };
			Value::Neutral(
				rc!(do_apply(do_apply(motive.clone(), length.clone()), target.clone())),
				rc!(Neutral::IndVec12 {
					length: length_neutral,
					scrutinee: target_neutral,
					motive: Normal { ty: ind_vec_motive_type(&entry), value: motive.clone() },
					base: Normal {
						ty: do_apply(do_apply(motive.clone(), Value::Zero), Value::VecNil),
						value: base,
					},
					step: Normal { ty: ind_vec_step_type(&entry, &motive), value: step },
				}),
			)
		}
		(_, Value::Neutral(ty, target_neutral)) => {
			let Value::Vec { entry, .. } = now(&ty) else { panic!() };
			Value::Neutral(
				rc!(do_apply(do_apply(motive.clone(), length.clone()), target.clone())),
				rc!(Neutral::IndVec2 {
					length: Normal { ty: Value::Nat, value: length.clone() },
					scrutinee: target_neutral,
					motive: Normal { ty: ind_vec_motive_type(&entry), value: motive.clone() },
					base: Normal {
						ty: do_apply(do_apply(motive.clone(), Value::Zero), Value::VecNil),
						value: base,
					},
					step: Normal { ty: ind_vec_step_type(&entry, &motive), value: step },
				}),
			)
		}
		_ => panic!(),
	}
}

pub fn do_ind_either(target: Value, motive: Value, on_left: Value, on_right: Value) -> Value {
	match now(&target) {
		Value::Left(value) => do_apply(on_left, value.as_ref().clone()),
		Value::Right(value) => do_apply(on_right, value.as_ref().clone()),
		Value::Neutral(ty, neutral) => {
			let Value::Either { left, right } = now(&ty) else { panic!() };
			Value::Neutral(
				rc!(do_apply(motive.clone(), target.clone())),
				rc!(Neutral::IndEither {
					scrutinee: neutral,
					motive: Normal {
						ty: arrow(
							Value::Either { left: left.clone(), right: right.clone() },
							Value::Universe,
						),
						value: motive.clone(),
					},
					on_left: Normal { ty: ind_either_left_type(&left, &motive), value: on_left },
					on_right: Normal { ty: ind_either_right_type(&right, &motive), value: on_right },
				}),
			)
		}
		_ => panic!(),
	}
}

pub fn do_symm(target: Value) -> Value {
	match now(&target) {
		same @ Value::Same(_) => same,
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Equal { ty, from, to } => Value::Neutral(
				rc!(Value::Equal { ty, from: to, to: from }),
				rc!(Neutral::Symm(neutral)),
			),
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_cong(target: Value, codomain: Value, function: Value) -> Value {
	match now(&target) {
		Value::Same(value) => Value::Same(rc!(do_apply(function, value.as_ref().clone()))),
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Equal { ty, from, to } => Value::Neutral(
				rc!(Value::Equal {
					ty: rc!(codomain.clone()),
					from: rc!(do_apply(function.clone(), from.as_ref().clone())),
					to: rc!(do_apply(function.clone(), to.as_ref().clone())),
				}),
				rc!(Neutral::Cong {
					scrutinee: neutral,
					codomain: rc!(codomain.clone()),
					function: Normal { ty: arrow(ty.as_ref().clone(), codomain), value: function },
				}),
			),
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_replace(target: Value, motive: Value, base: Value) -> Value {
	match now(&target) {
		Value::Same(_) => base,
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Equal { ty, from, to } => Value::Neutral(
				rc!(do_apply(motive.clone(), to.as_ref().clone())),
				rc!(Neutral::Replace {
					scrutinee: neutral,
					motive: Normal {
						ty: arrow(ty.as_ref().clone(), Value::Universe),
						value: motive.clone(),
					},
					base: Normal { ty: do_apply(motive, from.as_ref().clone()), value: base },
				}),
			),
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_trans(left: Value, right: Value) -> Value {
	match (now(&left), now(&right)) {
		(Value::Same(value), Value::Same(_)) => Value::Same(value),
		(Value::Same(value), Value::Neutral(ty, neutral)) => match now(&ty) {
			Value::Equal { ty, to, .. } => Value::Neutral(
				rc!(Value::Equal { ty: ty.clone(), from: rc!(value.as_ref().clone()), to }),
				rc!(Neutral::Trans2 {
					left: Normal {
						ty: Value::Equal {
							ty,
							from: rc!(value.as_ref().clone()),
							to: rc!(value.as_ref().clone()),
						},
						value: Value::Same(value),
					},
					right: neutral,
				}),
			),
			_ => panic!(),
		},
		(Value::Neutral(ty, neutral), Value::Same(value)) => match now(&ty) {
			Value::Equal { ty, from, .. } => Value::Neutral(
				rc!(Value::Equal { ty: ty.clone(), from, to: rc!(value.as_ref().clone()) }),
				rc!(Neutral::Trans1 {
					left: neutral,
					right: Normal {
						ty: Value::Equal {
							ty,
							from: rc!(value.as_ref().clone()),
							to: rc!(value.as_ref().clone()),
						},
						value: Value::Same(value),
					},
				}),
			),
			_ => panic!(),
		},
		(Value::Neutral(left_ty, left_neutral), Value::Neutral(right_ty, right_neutral)) => {
			let Value::Equal { ty, from, .. } = now(&left_ty) else { panic!() };
			let Value::Equal { to, .. } = now(&right_ty) else { panic!() };
			Value::Neutral(
				rc!(Value::Equal { ty, from, to }),
				rc!(Neutral::Trans12 { left: left_neutral, right: right_neutral }),
			)
		}
		_ => panic!(),
	}
}

pub fn do_ind_equal(target: Value, motive: Value, base: Value) -> Value {
	match now(&target) {
		Value::Same(_) => base,
		Value::Neutral(ty, neutral) => match now(&ty) {
			Value::Equal { ty, from, to } => Value::Neutral(
				rc!(do_apply(do_apply(motive.clone(), to.as_ref().clone()), target.clone())),
				rc!(Neutral::IndEqual {
					scrutinee: neutral,
					motive: Normal { ty: ind_equal_motive_type(&ty, &from), value: motive.clone() },
					base: Normal {
						ty: do_apply(
							do_apply(motive, from.as_ref().clone()),
							Value::Same(from.clone()),
						),
						value: base,
					},
				}),
			),
			_ => panic!(),
		},
		_ => panic!(),
	}
}

pub fn do_ind_absurd(target: Value, motive: Value) -> Value {
	match now(&target) {
		Value::Neutral(_, neutral) => Value::Neutral(
			rc!(motive.clone()),
			rc!(Neutral::IndAbsurd {
				scrutinee: neutral,
				motive: Normal { ty: Value::Universe, value: motive },
			}),
		),
		_ => panic!(),
	}
}
