use std::{cell::RefCell, rc::Rc};

use super::{
	conversion::alpha_equivalent,
	evaluate::{
		arrow, do_apply, do_car, ind_equal_motive_type, ind_either_left_type, ind_either_right_type,
		ind_list_step_type, ind_nat_step_type, ind_vec_motive_type, ind_vec_step_type, now,
		rec_list_step_type, Evaluate,
	},
	unevaluate::{read_back, read_back_type},
};
use crate::{
	common::{Label, Name, NameSupply},
	ir::{
		presyntax::{Expression, Preterm},
		semantics::{Environment, Value},
		syntax::Term,
	},
	utility::{bx, rc},
};

/// A located elaboration failure. The message is an ordered sequence of
/// fragments so that core terms can be rendered late, once a resolver is at
/// hand.
#[derive(Clone, Debug)]
pub struct Stop {
	pub range: (usize, usize),
	pub message: Vec<MessagePart>,
}

#[derive(Clone, Debug)]
pub enum MessagePart {
	Text(String),
	Term(Term),
}

impl Stop {
	pub fn at(range: (usize, usize), message: Vec<MessagePart>) -> Self { Self { range, message } }
}

fn text(message: impl Into<String>) -> MessagePart { MessagePart::Text(message.into()) }

/// An entry in the append-only log the elaborator leaves behind for tooling.
#[derive(Clone, Debug)]
pub enum Event {
	/// A binder was opened; carries the core form of its annotation.
	BindingSite(Term),
	/// A hole was elaborated, with the free hypotheses visible to it.
	Hole { hypotheses: Vec<(Name, Term)>, ty: Term },
	Claimed { name: Name },
	Defined { name: Name },
}

#[derive(Clone, Debug, Default)]
pub struct EventLog(Rc<RefCell<Vec<((usize, usize), Event)>>>);

impl EventLog {
	pub fn push(&self, range: (usize, usize), event: Event) {
		self.0.borrow_mut().push((range, event));
	}

	pub fn snapshot(&self) -> Vec<((usize, usize), Event)> { self.0.borrow().clone() }
}

/// Maps the names a source program wrote to the fresh names chosen for their
/// binders. Names with no entry are top-level and pass through unchanged.
#[derive(Clone, Debug, Default)]
pub struct Renaming(Vec<(Name, Name)>);

impl Renaming {
	pub fn rename(&self, name: Name) -> Name {
		self.0.iter().rev().find(|(from, _)| *from == name).map_or(name, |(_, to)| *to)
	}

	#[must_use]
	pub fn extend(&self, from: Name, to: Name) -> Self {
		let mut renaming = self.clone();
		renaming.0.push((from, to));
		renaming
	}
}

#[derive(Clone, Debug)]
pub enum Binder {
	/// A variable postulated while working under a binder.
	Free { ty: Value },
	/// A top-level name whose type is known but whose definition is pending.
	Claim { ty: Value },
	/// A top-level name with a definition.
	Define { ty: Value, value: Value },
}

/// The elaboration context: an ordered sequence of bindings, the name supply
/// used to mint fresh names against it, and a shared event log. Extension
/// clones; earlier contexts are never mutated.
#[derive(Clone, Debug)]
pub struct Context {
	pub names: NameSupply,
	pub events: EventLog,
	frames: Vec<(Name, Binder)>,
}

impl Context {
	pub fn new(names: NameSupply) -> Self {
		Self { names, events: EventLog::default(), frames: Vec::new() }
	}

	/// Chooses a name not bound in this context, preferring the given hint.
	pub fn fresh(&self, hint: Label) -> Name {
		let bound = self.frames.iter().map(|(name, _)| *name).collect::<Vec<_>>();
		self.names.freshen(&bound, hint.unwrap_or_else(|| self.names.intern("x")))
	}

	#[must_use]
	pub fn bind_free(&self, name: Name, ty: Value) -> Self {
		let mut context = self.clone();
		context.frames.push((name, Binder::Free { ty }));
		context
	}

	pub fn var_type(&self, range: (usize, usize), name: Name) -> Result<Value, Stop> {
		for (bound, binder) in self.frames.iter().rev() {
			if *bound != name {
				continue;
			}
			match binder {
				Binder::Free { ty } | Binder::Define { ty, .. } => return Ok(ty.clone()),
				// A claim has no value yet, so it cannot be referenced.
				Binder::Claim { .. } => continue,
			}
		}
		Err(Stop::at(range, vec![text("Unknown variable"), MessagePart::Term(Term::Variable(name))]))
	}

	pub fn to_environment(&self) -> Environment {
		let mut environment = Environment::new();
		for (name, binder) in &self.frames {
			match binder {
				Binder::Free { ty } => environment.0.push((*name, Value::variable(ty.clone(), *name))),
				Binder::Define { value, .. } => environment.0.push((*name, value.clone())),
				Binder::Claim { .. } => {}
			}
		}
		environment
	}

	pub fn evaluate(&self, term: &Term) -> Value { term.clone().evaluate_in(&self.to_environment()) }

	fn hypotheses(&self) -> Vec<(Name, Term)> {
		self.frames
			.iter()
			.filter_map(|(name, binder)| match binder {
				Binder::Free { ty } => Some((*name, read_back_type(self, ty))),
				_ => None,
			})
			.collect()
	}
}

// Definitional equality.
impl Context {
	/// Requires two types to have alpha-equivalent normal forms.
	pub fn same_type(&self, range: (usize, usize), given: &Value, expected: &Value) -> Result<(), Stop> {
		let given = read_back_type(self, given);
		let expected = read_back_type(self, expected);
		if alpha_equivalent(&given, &expected) {
			Ok(())
		} else {
			Err(Stop::at(range, vec![
				text("Expected"),
				MessagePart::Term(expected),
				text("but given"),
				MessagePart::Term(given),
			]))
		}
	}

	/// Requires two values of the given type to have alpha-equivalent normal
	/// forms.
	pub fn convert(
		&self,
		range: (usize, usize),
		ty: &Value,
		left: &Value,
		right: &Value,
	) -> Result<(), Stop> {
		let left = read_back(self, ty, left);
		let right = read_back(self, ty, right);
		if alpha_equivalent(&left, &right) {
			Ok(())
		} else {
			Err(Stop::at(range, vec![
				text("The expressions"),
				MessagePart::Term(left),
				text("and"),
				MessagePart::Term(right),
				text("are not the same"),
				MessagePart::Term(read_back_type(self, ty)),
			]))
		}
	}
}

fn valid_atom_name(name: &str) -> bool {
	!name.is_empty() && name.chars().all(|c| c.is_alphabetic() || c == '-')
}

// Type formation.
impl Context {
	pub fn is_type(&self, renaming: &Renaming, expression: &Expression) -> Result<Term, Stop> {
		let range = expression.range;
		match &expression.preterm {
			Preterm::Universe => Ok(Term::Universe),
			Preterm::Nat => Ok(Term::Nat),
			Preterm::Atom => Ok(Term::Atom),
			Preterm::Trivial => Ok(Term::Trivial),
			Preterm::Absurd => Ok(Term::Absurd),

			Preterm::Pi { binders, family } => {
				let ((binder_range, parameter, base), rest) = binders.split_first().unwrap();
				let base_core = self.is_type(renaming, base)?;
				let fresh = self.fresh(Some(*parameter));
				self.events.push(*binder_range, Event::BindingSite(base_core.clone()));
				let context = self.bind_free(fresh, self.evaluate(&base_core));
				let renaming = renaming.extend(*parameter, fresh);
				let family_core = if rest.is_empty() {
					context.is_type(&renaming, family)?
				} else {
					let remainder =
						Preterm::Pi { binders: rest.to_vec(), family: family.clone() }.at(range);
					context.is_type(&renaming, &remainder)?
				};
				Ok(Term::Pi { parameter: fresh, base: bx!(base_core), family: bx!(family_core) })
			}
			Preterm::Arrow { base, family, rest } => {
				let base_core = self.is_type(renaming, base)?;
				let fresh = self.fresh(None);
				let context = self.bind_free(fresh, self.evaluate(&base_core));
				let family_core = if let Some((next, rest)) = rest.split_first() {
					let remainder = Preterm::Arrow {
						base: family.clone(),
						family: bx!(next.clone()),
						rest: rest.to_vec(),
					}
					.at(range);
					context.is_type(renaming, &remainder)?
				} else {
					context.is_type(renaming, family)?
				};
				Ok(Term::Pi { parameter: fresh, base: bx!(base_core), family: bx!(family_core) })
			}

			Preterm::Sigma { binders, family } => {
				let ((binder_range, parameter, base), rest) = binders.split_first().unwrap();
				let base_core = self.is_type(renaming, base)?;
				let fresh = self.fresh(Some(*parameter));
				self.events.push(*binder_range, Event::BindingSite(base_core.clone()));
				let context = self.bind_free(fresh, self.evaluate(&base_core));
				let renaming = renaming.extend(*parameter, fresh);
				let family_core = if rest.is_empty() {
					context.is_type(&renaming, family)?
				} else {
					let remainder =
						Preterm::Sigma { binders: rest.to_vec(), family: family.clone() }.at(range);
					context.is_type(&renaming, &remainder)?
				};
				Ok(Term::Sigma { parameter: fresh, base: bx!(base_core), family: bx!(family_core) })
			}
			Preterm::Pair { base, family } => {
				let base_core = self.is_type(renaming, base)?;
				let fresh = self.fresh(None);
				let context = self.bind_free(fresh, self.evaluate(&base_core));
				let family_core = context.is_type(renaming, family)?;
				Ok(Term::Sigma { parameter: fresh, base: bx!(base_core), family: bx!(family_core) })
			}

			Preterm::List(entry) => Ok(Term::List(bx!(self.is_type(renaming, entry)?))),
			Preterm::Vec { entry, length } => Ok(Term::Vec {
				entry: bx!(self.is_type(renaming, entry)?),
				length: bx!(self.check(renaming, length, &Value::Nat)?),
			}),
			Preterm::Either { left, right } => Ok(Term::Either {
				left: bx!(self.is_type(renaming, left)?),
				right: bx!(self.is_type(renaming, right)?),
			}),
			Preterm::Equal { ty, from, to } => {
				let ty_core = self.is_type(renaming, ty)?;
				let ty_value = self.evaluate(&ty_core);
				Ok(Term::Equal {
					ty: bx!(ty_core),
					from: bx!(self.check(renaming, from, &ty_value)?),
					to: bx!(self.check(renaming, to, &ty_value)?),
				})
			}

			// Anything else must be an expression of type U.
			_ => self.check(renaming, expression, &Value::Universe),
		}
	}
}

// Type synthesis. Returns the synthesized type and the elaborated expression,
// both in core form.
impl Context {
	pub fn synth(&self, renaming: &Renaming, expression: &Expression) -> Result<(Term, Term), Stop> {
		let range = expression.range;
		match &expression.preterm {
			Preterm::Variable(name) => {
				let name = renaming.rename(*name);
				let ty = self.var_type(range, name)?;
				Ok((read_back_type(self, &ty), Term::Variable(name)))
			}

			Preterm::The { ty, expression } => {
				let ty_core = self.is_type(renaming, ty)?;
				let expression_core = self.check(renaming, expression, &self.evaluate(&ty_core))?;
				Ok((ty_core, expression_core))
			}

			Preterm::Universe =>
				Err(Stop::at(range, vec![text("U is a type, but it does not have a type.")])),

			// Natural numbers.
			Preterm::Nat => Ok((Term::Universe, Term::Nat)),
			Preterm::Zero => Ok((Term::Nat, Term::Zero)),
			Preterm::Add1(n) =>
				Ok((Term::Nat, Term::Add1(bx!(self.check(renaming, n, &Value::Nat)?)))),
			Preterm::Number(n) => {
				let mut term = Term::Zero;
				for _ in 0..*n {
					term = Term::Add1(bx!(term));
				}
				Ok((Term::Nat, term))
			}
			Preterm::WhichNat { scrutinee, base, step } => {
				let scrutinee_core = self.check(renaming, scrutinee, &Value::Nat)?;
				let (base_ty, base_core) = self.synth(renaming, base)?;
				let base_ty_value = self.evaluate(&base_ty);
				let step_core = self.check(renaming, step, &arrow(Value::Nat, base_ty_value))?;
				Ok((base_ty.clone(), Term::WhichNat {
					scrutinee: bx!(scrutinee_core),
					base_ty: bx!(base_ty),
					base: bx!(base_core),
					step: bx!(step_core),
				}))
			}
			Preterm::IterNat { scrutinee, base, step } => {
				let scrutinee_core = self.check(renaming, scrutinee, &Value::Nat)?;
				let (base_ty, base_core) = self.synth(renaming, base)?;
				let base_ty_value = self.evaluate(&base_ty);
				let step_core =
					self.check(renaming, step, &arrow(base_ty_value.clone(), base_ty_value))?;
				Ok((base_ty.clone(), Term::IterNat {
					scrutinee: bx!(scrutinee_core),
					base_ty: bx!(base_ty),
					base: bx!(base_core),
					step: bx!(step_core),
				}))
			}
			Preterm::RecNat { scrutinee, base, step } => {
				let scrutinee_core = self.check(renaming, scrutinee, &Value::Nat)?;
				let (base_ty, base_core) = self.synth(renaming, base)?;
				let base_ty_value = self.evaluate(&base_ty);
				let step_core = self.check(
					renaming,
					step,
					&arrow(Value::Nat, arrow(base_ty_value.clone(), base_ty_value)),
				)?;
				Ok((base_ty.clone(), Term::RecNat {
					scrutinee: bx!(scrutinee_core),
					base_ty: bx!(base_ty),
					base: bx!(base_core),
					step: bx!(step_core),
				}))
			}
			Preterm::IndNat { scrutinee, motive, base, step } => {
				let scrutinee_core = self.check(renaming, scrutinee, &Value::Nat)?;
				let motive_core =
					self.check(renaming, motive, &arrow(Value::Nat, Value::Universe))?;
				let motive_value = self.evaluate(&motive_core);
				let base_core =
					self.check(renaming, base, &do_apply(motive_value.clone(), Value::Zero))?;
				let step_core = self.check(renaming, step, &ind_nat_step_type(&motive_value))?;
				let ty =
					read_back_type(self, &do_apply(motive_value, self.evaluate(&scrutinee_core)));
				Ok((ty, Term::IndNat {
					scrutinee: bx!(scrutinee_core),
					motive: bx!(motive_core),
					base: bx!(base_core),
					step: bx!(step_core),
				}))
			}

			// Atoms.
			Preterm::Atom => Ok((Term::Universe, Term::Atom)),
			Preterm::Tick(name) => {
				if !valid_atom_name(&self.names.resolve(*name)) {
					return Err(Stop::at(range, vec![
						text("Invalid atom name"),
						MessagePart::Term(Term::Tick(*name)),
					]));
				}
				Ok((Term::Atom, Term::Tick(*name)))
			}

			// Dependent functions. Synthesized function types live in U, so
			// their components are checked against U rather than merely being
			// types.
			Preterm::Pi { binders, family } => {
				let ((binder_range, parameter, base), rest) = binders.split_first().unwrap();
				let base_core = self.check(renaming, base, &Value::Universe)?;
				let fresh = self.fresh(Some(*parameter));
				self.events.push(*binder_range, Event::BindingSite(base_core.clone()));
				let context = self.bind_free(fresh, self.evaluate(&base_core));
				let renaming = renaming.extend(*parameter, fresh);
				let family_core = if rest.is_empty() {
					context.check(&renaming, family, &Value::Universe)?
				} else {
					let remainder =
						Preterm::Pi { binders: rest.to_vec(), family: family.clone() }.at(range);
					context.check(&renaming, &remainder, &Value::Universe)?
				};
				Ok((Term::Universe, Term::Pi {
					parameter: fresh,
					base: bx!(base_core),
					family: bx!(family_core),
				}))
			}
			Preterm::Arrow { base, family, rest } => {
				let base_core = self.check(renaming, base, &Value::Universe)?;
				let fresh = self.fresh(None);
				let context = self.bind_free(fresh, self.evaluate(&base_core));
				let family_core = if let Some((next, rest)) = rest.split_first() {
					let remainder = Preterm::Arrow {
						base: family.clone(),
						family: bx!(next.clone()),
						rest: rest.to_vec(),
					}
					.at(range);
					context.check(renaming, &remainder, &Value::Universe)?
				} else {
					context.check(renaming, family, &Value::Universe)?
				};
				Ok((Term::Universe, Term::Pi {
					parameter: fresh,
					base: bx!(base_core),
					family: bx!(family_core),
				}))
			}
			Preterm::Apply { scrutinee, arguments } => {
				let (mut ty, mut term) = self.synth(renaming, scrutinee)?;
				for argument in arguments {
					match now(&self.evaluate(&ty)) {
						Value::Pi { base, family, .. } => {
							let argument_core = self.check(renaming, argument, &base)?;
							let result = family.apply(self.evaluate(&argument_core));
							ty = read_back_type(self, &result);
							term = Term::Apply { scrutinee: bx!(term), argument: bx!(argument_core) };
						}
						other => {
							return Err(Stop::at(range, vec![
								text("Not a function type:"),
								MessagePart::Term(read_back_type(self, &other)),
							]));
						}
					}
				}
				Ok((ty, term))
			}

			// Dependent pairs.
			Preterm::Sigma { binders, family } => {
				let ((binder_range, parameter, base), rest) = binders.split_first().unwrap();
				let base_core = self.check(renaming, base, &Value::Universe)?;
				let fresh = self.fresh(Some(*parameter));
				self.events.push(*binder_range, Event::BindingSite(base_core.clone()));
				let context = self.bind_free(fresh, self.evaluate(&base_core));
				let renaming = renaming.extend(*parameter, fresh);
				let family_core = if rest.is_empty() {
					context.check(&renaming, family, &Value::Universe)?
				} else {
					let remainder =
						Preterm::Sigma { binders: rest.to_vec(), family: family.clone() }.at(range);
					context.check(&renaming, &remainder, &Value::Universe)?
				};
				Ok((Term::Universe, Term::Sigma {
					parameter: fresh,
					base: bx!(base_core),
					family: bx!(family_core),
				}))
			}
			Preterm::Pair { base, family } => {
				let base_core = self.check(renaming, base, &Value::Universe)?;
				let fresh = self.fresh(None);
				let context = self.bind_free(fresh, self.evaluate(&base_core));
				let family_core = context.check(renaming, family, &Value::Universe)?;
				Ok((Term::Universe, Term::Sigma {
					parameter: fresh,
					base: bx!(base_core),
					family: bx!(family_core),
				}))
			}
			Preterm::Car(scrutinee) => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				match now(&self.evaluate(&scrutinee_ty)) {
					Value::Sigma { base, .. } =>
						Ok((read_back_type(self, &base), Term::Car(bx!(scrutinee_core)))),
					other => Err(Stop::at(range, vec![
						text("car requires a Pair type, but was given"),
						MessagePart::Term(read_back_type(self, &other)),
					])),
				}
			}
			Preterm::Cdr(scrutinee) => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				match now(&self.evaluate(&scrutinee_ty)) {
					Value::Sigma { family, .. } => {
						let car = do_car(self.evaluate(&scrutinee_core));
						Ok((read_back_type(self, &family.apply(car)), Term::Cdr(bx!(scrutinee_core))))
					}
					other => Err(Stop::at(range, vec![
						text("cdr requires a Pair type, but was given"),
						MessagePart::Term(read_back_type(self, &other)),
					])),
				}
			}

			// Trivialities.
			Preterm::Trivial => Ok((Term::Universe, Term::Trivial)),
			Preterm::Sole => Ok((Term::Trivial, Term::Sole)),

			// Lists.
			Preterm::List(entry) =>
				Ok((Term::Universe, Term::List(bx!(self.check(renaming, entry, &Value::Universe)?)))),
			Preterm::ListCons { head, tail } => {
				let (head_ty, head_core) = self.synth(renaming, head)?;
				let entry = self.evaluate(&head_ty);
				let tail_core =
					self.check(renaming, tail, &Value::List(rc!(entry)))?;
				Ok((Term::List(bx!(head_ty)), Term::ListCons {
					head: bx!(head_core),
					tail: bx!(tail_core),
				}))
			}
			Preterm::RecList { scrutinee, base, step } => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				let entry = match now(&self.evaluate(&scrutinee_ty)) {
					Value::List(entry) => entry,
					other =>
						return Err(Stop::at(scrutinee.range, vec![
							text("rec-List requires a List type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				let (base_ty, base_core) = self.synth(renaming, base)?;
				let base_ty_value = self.evaluate(&base_ty);
				let step_core =
					self.check(renaming, step, &rec_list_step_type(&entry, &base_ty_value))?;
				Ok((base_ty.clone(), Term::RecList {
					scrutinee: bx!(scrutinee_core),
					base_ty: bx!(base_ty),
					base: bx!(base_core),
					step: bx!(step_core),
				}))
			}
			Preterm::IndList { scrutinee, motive, base, step } => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				let entry = match now(&self.evaluate(&scrutinee_ty)) {
					Value::List(entry) => entry,
					other =>
						return Err(Stop::at(scrutinee.range, vec![
							text("ind-List requires a List type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				let motive_core = self.check(
					renaming,
					motive,
					&arrow(Value::List(entry.clone()), Value::Universe),
				)?;
				let motive_value = self.evaluate(&motive_core);
				let base_core =
					self.check(renaming, base, &do_apply(motive_value.clone(), Value::Nil))?;
				let step_core =
					self.check(renaming, step, &ind_list_step_type(&entry, &motive_value))?;
				let ty =
					read_back_type(self, &do_apply(motive_value, self.evaluate(&scrutinee_core)));
				Ok((ty, Term::IndList {
					scrutinee: bx!(scrutinee_core),
					motive: bx!(motive_core),
					base: bx!(base_core),
					step: bx!(step_core),
				}))
			}

			// Length-indexed vectors.
			Preterm::Vec { entry, length } => Ok((Term::Universe, Term::Vec {
				entry: bx!(self.check(renaming, entry, &Value::Universe)?),
				length: bx!(self.check(renaming, length, &Value::Nat)?),
			})),
			Preterm::Head(scrutinee) => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				match now(&self.evaluate(&scrutinee_ty)) {
					Value::Vec { entry, length } => match now(&length) {
						Value::Add1(_) =>
							Ok((read_back_type(self, &entry), Term::Head(bx!(scrutinee_core)))),
						other => Err(Stop::at(scrutinee.range, vec![
							text("head requires a Vec with an add1 length, but the length is"),
							MessagePart::Term(read_back(self, &Value::Nat, &other)),
						])),
					},
					other => Err(Stop::at(scrutinee.range, vec![
						text("head requires a Vec type, but was given"),
						MessagePart::Term(read_back_type(self, &other)),
					])),
				}
			}
			Preterm::Tail(scrutinee) => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				match now(&self.evaluate(&scrutinee_ty)) {
					Value::Vec { entry, length } => match now(&length) {
						Value::Add1(previous) => Ok((
							read_back_type(self, &Value::Vec { entry, length: previous }),
							Term::Tail(bx!(scrutinee_core)),
						)),
						other => Err(Stop::at(scrutinee.range, vec![
							text("tail requires a Vec with an add1 length, but the length is"),
							MessagePart::Term(read_back(self, &Value::Nat, &other)),
						])),
					},
					other => Err(Stop::at(scrutinee.range, vec![
						text("tail requires a Vec type, but was given"),
						MessagePart::Term(read_back_type(self, &other)),
					])),
				}
			}
			Preterm::IndVec { length, scrutinee, motive, base, step } => {
				let length_core = self.check(renaming, length, &Value::Nat)?;
				let length_value = self.evaluate(&length_core);
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				let (entry, scrutinee_length) = match now(&self.evaluate(&scrutinee_ty)) {
					Value::Vec { entry, length } => (entry, length),
					other =>
						return Err(Stop::at(scrutinee.range, vec![
							text("ind-Vec requires a Vec type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				self.convert(scrutinee.range, &Value::Nat, &length_value, &scrutinee_length)?;
				let motive_core = self.check(renaming, motive, &ind_vec_motive_type(&entry))?;
				let motive_value = self.evaluate(&motive_core);
				let base_core = self.check(
					renaming,
					base,
					&do_apply(do_apply(motive_value.clone(), Value::Zero), Value::VecNil),
				)?;
				let step_core =
					self.check(renaming, step, &ind_vec_step_type(&entry, &motive_value))?;
				let ty = read_back_type(
					self,
					&do_apply(
						do_apply(motive_value, length_value),
						self.evaluate(&scrutinee_core),
					),
				);
				Ok((ty, Term::IndVec {
					length: bx!(length_core),
					scrutinee: bx!(scrutinee_core),
					motive: bx!(motive_core),
					base: bx!(base_core),
					step: bx!(step_core),
				}))
			}

			// Sums.
			Preterm::Either { left, right } => Ok((Term::Universe, Term::Either {
				left: bx!(self.check(renaming, left, &Value::Universe)?),
				right: bx!(self.check(renaming, right, &Value::Universe)?),
			})),
			Preterm::IndEither { scrutinee, motive, on_left, on_right } => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				let (left, right) = match now(&self.evaluate(&scrutinee_ty)) {
					Value::Either { left, right } => (left, right),
					other =>
						return Err(Stop::at(scrutinee.range, vec![
							text("ind-Either requires an Either type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				let motive_core = self.check(
					renaming,
					motive,
					&arrow(
						Value::Either { left: left.clone(), right: right.clone() },
						Value::Universe,
					),
				)?;
				let motive_value = self.evaluate(&motive_core);
				let on_left_core =
					self.check(renaming, on_left, &ind_either_left_type(&left, &motive_value))?;
				let on_right_core =
					self.check(renaming, on_right, &ind_either_right_type(&right, &motive_value))?;
				let ty =
					read_back_type(self, &do_apply(motive_value, self.evaluate(&scrutinee_core)));
				Ok((ty, Term::IndEither {
					scrutinee: bx!(scrutinee_core),
					motive: bx!(motive_core),
					on_left: bx!(on_left_core),
					on_right: bx!(on_right_core),
				}))
			}

			// Equality.
			Preterm::Equal { ty, from, to } => {
				let ty_core = self.check(renaming, ty, &Value::Universe)?;
				let ty_value = self.evaluate(&ty_core);
				Ok((Term::Universe, Term::Equal {
					ty: bx!(ty_core),
					from: bx!(self.check(renaming, from, &ty_value)?),
					to: bx!(self.check(renaming, to, &ty_value)?),
				}))
			}
			Preterm::Symm(scrutinee) => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				match now(&self.evaluate(&scrutinee_ty)) {
					Value::Equal { ty, from, to } => Ok((
						read_back_type(self, &Value::Equal { ty, from: to, to: from }),
						Term::Symm(bx!(scrutinee_core)),
					)),
					other => Err(Stop::at(scrutinee.range, vec![
						text("symm requires an = type, but was given"),
						MessagePart::Term(read_back_type(self, &other)),
					])),
				}
			}
			Preterm::Cong { scrutinee, function } => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				let (entry, from, to) = match now(&self.evaluate(&scrutinee_ty)) {
					Value::Equal { ty, from, to } => (ty, from, to),
					other =>
						return Err(Stop::at(scrutinee.range, vec![
							text("cong requires an = type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				let (function_ty, function_core) = self.synth(renaming, function)?;
				let (base, family) = match now(&self.evaluate(&function_ty)) {
					Value::Pi { base, family, .. } => (base, family),
					other =>
						return Err(Stop::at(function.range, vec![
							text("cong requires a function, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				self.same_type(function.range, &base, &entry)?;
				let codomain = family.apply(from.as_ref().clone());
				let function_value = self.evaluate(&function_core);
				let ty = read_back_type(self, &Value::Equal {
					ty: rc!(codomain.clone()),
					from: rc!(do_apply(function_value.clone(), from.as_ref().clone())),
					to: rc!(do_apply(function_value, to.as_ref().clone())),
				});
				Ok((ty, Term::Cong {
					scrutinee: bx!(scrutinee_core),
					codomain: bx!(read_back_type(self, &codomain)),
					function: bx!(function_core),
				}))
			}
			Preterm::Replace { scrutinee, motive, base } => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				let (entry, from, to) = match now(&self.evaluate(&scrutinee_ty)) {
					Value::Equal { ty, from, to } => (ty, from, to),
					other =>
						return Err(Stop::at(scrutinee.range, vec![
							text("replace requires an = type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				let motive_core = self.check(
					renaming,
					motive,
					&arrow(entry.as_ref().clone(), Value::Universe),
				)?;
				let motive_value = self.evaluate(&motive_core);
				let base_core = self.check(
					renaming,
					base,
					&do_apply(motive_value.clone(), from.as_ref().clone()),
				)?;
				let ty = read_back_type(self, &do_apply(motive_value, to.as_ref().clone()));
				Ok((ty, Term::Replace {
					scrutinee: bx!(scrutinee_core),
					motive: bx!(motive_core),
					base: bx!(base_core),
				}))
			}
			Preterm::Trans { left, right } => {
				let (left_ty, left_core) = self.synth(renaming, left)?;
				let (left_entry, from, left_to) = match now(&self.evaluate(&left_ty)) {
					Value::Equal { ty, from, to } => (ty, from, to),
					other =>
						return Err(Stop::at(left.range, vec![
							text("trans requires an = type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				let (right_ty, right_core) = self.synth(renaming, right)?;
				let (right_entry, right_from, to) = match now(&self.evaluate(&right_ty)) {
					Value::Equal { ty, from, to } => (ty, from, to),
					other =>
						return Err(Stop::at(right.range, vec![
							text("trans requires an = type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				self.same_type(right.range, &right_entry, &left_entry)?;
				self.convert(right.range, &left_entry, &left_to, &right_from)?;
				let ty =
					read_back_type(self, &Value::Equal { ty: left_entry, from, to });
				Ok((ty, Term::Trans { left: bx!(left_core), right: bx!(right_core) }))
			}
			Preterm::IndEqual { scrutinee, motive, base } => {
				let (scrutinee_ty, scrutinee_core) = self.synth(renaming, scrutinee)?;
				let (entry, from, to) = match now(&self.evaluate(&scrutinee_ty)) {
					Value::Equal { ty, from, to } => (ty, from, to),
					other =>
						return Err(Stop::at(scrutinee.range, vec![
							text("ind-= requires an = type, but was given"),
							MessagePart::Term(read_back_type(self, &other)),
						])),
				};
				let motive_core =
					self.check(renaming, motive, &ind_equal_motive_type(&entry, &from))?;
				let motive_value = self.evaluate(&motive_core);
				let base_core = self.check(
					renaming,
					base,
					&do_apply(
						do_apply(motive_value.clone(), from.as_ref().clone()),
						Value::Same(from.clone()),
					),
				)?;
				let ty = read_back_type(
					self,
					&do_apply(
						do_apply(motive_value, to.as_ref().clone()),
						self.evaluate(&scrutinee_core),
					),
				);
				Ok((ty, Term::IndEqual {
					scrutinee: bx!(scrutinee_core),
					motive: bx!(motive_core),
					base: bx!(base_core),
				}))
			}

			// The empty type.
			Preterm::Absurd => Ok((Term::Universe, Term::Absurd)),
			Preterm::IndAbsurd { scrutinee, motive } => {
				let scrutinee_core = self.check(renaming, scrutinee, &Value::Absurd)?;
				let motive_core = self.check(renaming, motive, &Value::Universe)?;
				Ok((motive_core.clone(), Term::IndAbsurd {
					scrutinee: bx!(scrutinee_core),
					motive: bx!(motive_core),
				}))
			}

			_ => Err(Stop::at(range, vec![text("Unable to synthesize a type for this expression")])),
		}
	}
}

// Type checking.
impl Context {
	pub fn check(
		&self,
		renaming: &Renaming,
		expression: &Expression,
		ty: &Value,
	) -> Result<Term, Stop> {
		let range = expression.range;
		match &expression.preterm {
			Preterm::Lambda { parameters, body } => match now(ty) {
				Value::Pi { base, family, .. } => {
					let ((parameter_range, parameter), rest) = parameters.split_first().unwrap();
					let fresh = self.fresh(Some(*parameter));
					self.events
						.push(*parameter_range, Event::BindingSite(read_back_type(self, &base)));
					let argument = Value::variable(base.as_ref().clone(), fresh);
					let context = self.bind_free(fresh, base.as_ref().clone());
					let renaming = renaming.extend(*parameter, fresh);
					let body_core = if rest.is_empty() {
						context.check(&renaming, body, &family.apply(argument))?
					} else {
						let remainder =
							Preterm::Lambda { parameters: rest.to_vec(), body: body.clone() }
								.at(range);
						context.check(&renaming, &remainder, &family.apply(argument))?
					};
					Ok(Term::Lambda { parameter: fresh, body: bx!(body_core) })
				}
				other => Err(Stop::at(range, vec![
					text("Lambda requires a function type, but was checked against"),
					MessagePart::Term(read_back_type(self, &other)),
				])),
			},

			Preterm::Cons { base, fiber } => match now(ty) {
				Value::Sigma { base: base_ty, family, .. } => {
					let base_core = self.check(renaming, base, &base_ty)?;
					let fiber_core =
						self.check(renaming, fiber, &family.apply(self.evaluate(&base_core)))?;
					Ok(Term::Cons { car: bx!(base_core), cdr: bx!(fiber_core) })
				}
				other => Err(Stop::at(range, vec![
					text("cons requires a Pair type, but was checked against"),
					MessagePart::Term(read_back_type(self, &other)),
				])),
			},

			Preterm::Nil => match now(ty) {
				Value::List(_) => Ok(Term::Nil),
				other => Err(Stop::at(range, vec![
					text("nil requires a List type, but was checked against"),
					MessagePart::Term(read_back_type(self, &other)),
				])),
			},

			Preterm::VecNil => match now(ty) {
				Value::Vec { length, .. } => match now(&length) {
					Value::Zero => Ok(Term::VecNil),
					other => Err(Stop::at(range, vec![
						text("vecnil requires that the length be zero, but it is"),
						MessagePart::Term(read_back(self, &Value::Nat, &other)),
					])),
				},
				other => Err(Stop::at(range, vec![
					text("vecnil requires a Vec type, but was checked against"),
					MessagePart::Term(read_back_type(self, &other)),
				])),
			},
			Preterm::VecCons { head, tail } => match now(ty) {
				Value::Vec { entry, length } => match now(&length) {
					Value::Add1(previous) => {
						let head_core = self.check(renaming, head, &entry)?;
						let tail_core = self.check(
							renaming,
							tail,
							&Value::Vec { entry, length: previous },
						)?;
						Ok(Term::VecCons { head: bx!(head_core), tail: bx!(tail_core) })
					}
					other => Err(Stop::at(range, vec![
						text("vec:: requires that the length have add1 on top, but it is"),
						MessagePart::Term(read_back(self, &Value::Nat, &other)),
					])),
				},
				other => Err(Stop::at(range, vec![
					text("vec:: requires a Vec type, but was checked against"),
					MessagePart::Term(read_back_type(self, &other)),
				])),
			},

			Preterm::Left(value) => match now(ty) {
				Value::Either { left, .. } =>
					Ok(Term::Left(bx!(self.check(renaming, value, &left)?))),
				other => Err(Stop::at(range, vec![
					text("left requires an Either type, but was checked against"),
					MessagePart::Term(read_back_type(self, &other)),
				])),
			},
			Preterm::Right(value) => match now(ty) {
				Value::Either { right, .. } =>
					Ok(Term::Right(bx!(self.check(renaming, value, &right)?))),
				other => Err(Stop::at(range, vec![
					text("right requires an Either type, but was checked against"),
					MessagePart::Term(read_back_type(self, &other)),
				])),
			},

			Preterm::Same(expression) => match now(ty) {
				Value::Equal { ty: entry, from, to } => {
					let core = self.check(renaming, expression, &entry)?;
					let value = self.evaluate(&core);
					self.convert(range, &entry, &from, &value)?;
					self.convert(range, &entry, &value, &to)?;
					Ok(Term::Same(bx!(core)))
				}
				other => Err(Stop::at(range, vec![
					text("same requires an = type, but was checked against"),
					MessagePart::Term(read_back_type(self, &other)),
				])),
			},

			Preterm::Todo => {
				let ty_core = read_back_type(self, ty);
				self.events.push(range, Event::Hole {
					hypotheses: self.hypotheses(),
					ty: ty_core.clone(),
				});
				Ok(Term::Todo { range, ty: bx!(ty_core) })
			}

			_ => {
				let (synthesized, core) = self.synth(renaming, expression)?;
				self.same_type(range, &self.evaluate(&synthesized), ty)?;
				Ok(core)
			}
		}
	}
}

// Declaration-level operations, consumed by the driver loop and the tests.
impl Context {
	pub fn add_claim(
		&self,
		range: (usize, usize),
		name: Name,
		ty: &Expression,
	) -> Result<Self, Stop> {
		if self.frames.iter().any(|(bound, _)| *bound == name) {
			return Err(Stop::at(range, vec![
				text("The name"),
				MessagePart::Term(Term::Variable(name)),
				text("is already used in this context"),
			]));
		}
		let ty_core = self.is_type(&Renaming::default(), ty)?;
		let ty_value = self.evaluate(&ty_core);
		let mut context = self.clone();
		context.frames.push((name, Binder::Claim { ty: ty_value }));
		context.events.push(range, Event::Claimed { name });
		Ok(context)
	}

	pub fn add_define(
		&self,
		range: (usize, usize),
		name: Name,
		body: &Expression,
	) -> Result<Self, Stop> {
		let ty = match self.frames.iter().rev().find(|(bound, _)| *bound == name) {
			Some((_, Binder::Claim { ty })) => ty.clone(),
			Some((_, Binder::Define { .. })) =>
				return Err(Stop::at(range, vec![
					text("The name"),
					MessagePart::Term(Term::Variable(name)),
					text("is already defined"),
				])),
			_ =>
				return Err(Stop::at(range, vec![
					text("The name"),
					MessagePart::Term(Term::Variable(name)),
					text("must be claimed before it is defined"),
				])),
		};
		let body_core = self.check(&Renaming::default(), body, &ty)?;
		let value = self.evaluate(&body_core);
		let mut context = self.clone();
		context.frames.push((name, Binder::Define { ty, value }));
		context.events.push(range, Event::Defined { name });
		Ok(context)
	}

	pub fn check_same(
		&self,
		range: (usize, usize),
		ty: &Expression,
		left: &Expression,
		right: &Expression,
	) -> Result<(), Stop> {
		let renaming = Renaming::default();
		let ty_core = self.is_type(&renaming, ty)?;
		let ty_value = self.evaluate(&ty_core);
		let left_core = self.check(&renaming, left, &ty_value)?;
		let right_core = self.check(&renaming, right, &ty_value)?;
		self.convert(range, &ty_value, &self.evaluate(&left_core), &self.evaluate(&right_core))
	}

	/// Synthesizes a bare expression and reads back the normal forms of both
	/// its type and its value.
	pub fn normalize(&self, expression: &Expression) -> Result<(Term, Term), Stop> {
		let (ty, term) = self.synth(&Renaming::default(), expression)?;
		let ty_value = self.evaluate(&ty);
		let value = self.evaluate(&term);
		Ok((read_back_type(self, &ty_value), read_back(self, &ty_value, &value)))
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		ir::{presyntax::Declaration, source::LexedSource},
		op::{parse::parse, unparse::pretty},
	};

	fn run(source: &str) -> Result<(Context, Vec<(Term, Term)>), Stop> {
		let lexed = LexedSource::new(source).unwrap_or_else(|_| panic!("lex failure on {source:?}"));
		let (declarations, interner) =
			parse(&lexed).unwrap_or_else(|_| panic!("parse failure on {source:?}"));
		let mut context = Context::new(NameSupply::from(interner));
		let mut outputs = Vec::new();
		for declaration in declarations {
			match declaration {
				Declaration::Claim { range, name, ty } =>
					context = context.add_claim(range, name, &ty)?,
				Declaration::Define { range, name, body } =>
					context = context.add_define(range, name, &body)?,
				Declaration::CheckSame { range, ty, left, right } =>
					context.check_same(range, &ty, &left, &right)?,
				Declaration::Example { expression } => outputs.push(context.normalize(&expression)?),
			}
		}
		Ok((context, outputs))
	}

	fn normal_form(source: &str) -> String {
		let (context, outputs) = run(source).unwrap_or_else(|stop| panic!("stopped: {stop:?}"));
		let (_, value) = outputs.last().expect("program has no bare expression");
		let printed = pretty(value, &*context.names.resolver());
		printed
	}

	fn normal_type(source: &str) -> String {
		let (context, outputs) = run(source).unwrap_or_else(|stop| panic!("stopped: {stop:?}"));
		let (ty, _) = outputs.last().expect("program has no bare expression");
		let printed = pretty(ty, &*context.names.resolver());
		printed
	}

	#[test]
	fn annotations_check_and_erase() {
		assert_eq!(normal_form("(the Nat zero)"), "0");
		assert_eq!(normal_type("(the Nat zero)"), "Nat");
		assert_eq!(normal_form("(the (-> Nat Nat) (λ (x) x))"), "(λ (x) x)");
	}

	#[test]
	fn applications_reduce() {
		assert_eq!(normal_form("((the (-> Nat Nat) (λ (x) x)) zero)"), "0");
		assert_eq!(normal_type("((the (-> Nat Nat) (λ (x) x)) zero)"), "Nat");
	}

	#[test]
	fn numerals_expand_and_refold() {
		assert_eq!(normal_form("3"), "3");
		assert_eq!(normal_form("(add1 (add1 zero))"), "2");
	}

	#[test]
	fn nat_eliminators_compute() {
		assert_eq!(normal_form("(which-Nat 2 'naught (λ (k) 'more))"), "'more");
		assert_eq!(normal_form("(which-Nat zero 'naught (λ (k) 'more))"), "'naught");
		assert_eq!(normal_form("(which-Nat 2 0 (λ (k) k))"), "1");
		assert_eq!(normal_form("(iter-Nat 3 1 (λ (ih) (add1 ih)))"), "4");
		assert_eq!(normal_form("(rec-Nat 2 0 (λ (k ih) k))"), "1");
		assert_eq!(normal_form("(ind-Nat 2 (λ (n) Nat) 0 (λ (k ih) (add1 ih)))"), "2");
	}

	#[test]
	fn pairs_project() {
		assert_eq!(normal_form("(car (the (Pair Nat Atom) (cons 2 'two)))"), "2");
		assert_eq!(normal_form("(cdr (the (Pair Nat Atom) (cons 2 'two)))"), "'two");
	}

	// Readback names binders after the function type's own hints, not after
	// whatever the source lambda called them.
	#[test]
	fn functions_eta_expand() {
		assert_eq!(
			normal_form("(the (Π ((f (-> Nat Nat))) (-> Nat Nat)) (λ (g) g))"),
			"(λ (f) (λ (x) (f x)))"
		);
	}

	#[test]
	fn pairs_eta_expand() {
		assert_eq!(
			normal_form("(the (Π ((p (Pair Nat Atom))) (Pair Nat Atom)) (λ (q) q))"),
			"(λ (p) (cons (car p) (cdr p)))"
		);
	}

	#[test]
	fn trivial_inhabitants_are_sole() {
		assert_eq!(normal_form("(the (Π ((t Trivial)) Trivial) (λ (u) u))"), "(λ (t) sole)");
	}

	// Printed normal forms are valid surface syntax and normalize to themselves.
	#[test]
	fn normalization_is_idempotent() {
		let ty = "(Π ((f (-> Nat Nat))) (-> Nat Nat))";
		let normal = normal_form(&format!("(the {ty} (λ (g) g))"));
		assert_eq!(normal_form(&format!("(the {ty} {normal})")), normal);
	}

	#[test]
	fn vectors_check_their_lengths() {
		assert!(run("(the (Vec Nat 2) (vec:: 1 (vec:: 2 vecnil)))").is_ok());
		assert!(run("(the (Vec Nat 1) (vec:: 1 (vec:: 2 vecnil)))").is_err());
		assert_eq!(normal_form("(head (the (Vec Atom 2) (vec:: 'a (vec:: 'b vecnil))))"), "'a");
		assert_eq!(
			normal_form("(tail (the (Vec Atom 2) (vec:: 'a (vec:: 'b vecnil))))"),
			"(vec:: 'b vecnil)"
		);
	}

	#[test]
	fn simple_pairs_check() {
		assert!(run("(the (Pair Trivial Trivial) (cons sole sole))").is_ok());
	}

	#[test]
	fn non_functions_do_not_apply() {
		let stop = run("(zero zero)").unwrap_err();
		assert!(stop.message.iter().any(
			|part| matches!(part, MessagePart::Text(text) if text.contains("Not a function type"))
		));
	}

	#[test]
	fn universe_has_no_type() {
		assert!(run("U").is_err());
		assert!(run("(the U Nat)").is_ok());
	}

	#[test]
	fn atoms_are_validated() {
		assert!(run("'ratatouille").is_ok());
		assert!(run("'baked-potato").is_ok());
		assert!(run("'not4u").is_err());
	}

	#[test]
	fn unknown_variables_stop() {
		assert!(run("x").is_err());
		assert!(run("(the Nat x)").is_err());
	}

	#[test]
	fn mismatches_stop() {
		assert!(run("(the Nat 'apple)").is_err());
		assert!(run("(the Atom zero)").is_err());
	}

	#[test]
	fn claims_then_defines() {
		let source = "
			(claim three Nat)
			(define three 3)
			(check-same Nat three 3)
		";
		assert!(run(source).is_ok());
	}

	#[test]
	fn claims_are_not_values() {
		assert!(run("(claim three Nat) three").is_err());
	}

	#[test]
	fn duplicate_claims_stop() {
		assert!(run("(claim x Nat) (claim x Atom)").is_err());
	}

	#[test]
	fn defines_need_claims() {
		assert!(run("(define x zero)").is_err());
		assert!(run("(claim x Nat) (define x zero) (define x zero)").is_err());
	}

	#[test]
	fn definitions_unfold_in_later_declarations() {
		let source = "
			(claim + (-> Nat Nat Nat))
			(define + (λ (a b) (iter-Nat a b (λ (ih) (add1 ih)))))
			(check-same Nat (+ 2 3) 5)
			(+ 2 2)
		";
		assert_eq!(normal_form(source), "4");
	}

	#[test]
	fn lists_append() {
		let source = "
			(claim append (Π ((E U)) (-> (List E) (List E) (List E))))
			(define append
				(λ (E xs ys) (rec-List xs ys (λ (h t ih) (:: h ih)))))
			(append Atom (:: 'a nil) (:: 'b nil))
		";
		assert_eq!(normal_form(source), "(:: 'a (:: 'b nil))");
	}

	#[test]
	fn equality_proofs_normalize() {
		let source = "
			(claim plus-two-two (= Nat (iter-Nat 2 2 (λ (ih) (add1 ih))) 4))
			(define plus-two-two (same 4))
			plus-two-two
		";
		assert_eq!(normal_form(source), "(same 4)");
	}

	#[test]
	fn same_checks_both_endpoints() {
		assert!(run("(the (= Nat 2 2) (same 2))").is_ok());
		assert!(run("(the (= Nat 2 3) (same 2))").is_err());
		assert!(run("(the (= Nat 2 3) (same 3))").is_err());
	}

	#[test]
	fn stuck_equality_proofs_read_back() {
		assert_eq!(
			normal_form("(the (Π ((p (= Nat 0 1))) (= Nat 1 0)) (λ (p) (symm p)))"),
			"(λ (p) (symm p))"
		);
		let source = "
			(the (Π ((p (= Nat 0 1)) (q (= Nat 1 2))) (= Nat 0 2))
				(λ (p q) (trans p q)))
		";
		assert_eq!(normal_form(source), "(λ (p) (λ (q) (trans p q)))");
		// One canonical side is absorbed into the spine, not discarded.
		let source = "
			(the (Π ((p (= Nat 0 1))) (= Nat 0 1))
				(λ (p) (trans p (the (= Nat 1 1) (same 1)))))
		";
		assert_eq!(normal_form(source), "(λ (p) (trans p (same 1)))");
		let source = "
			(the (Π ((p (= Nat 0 1))) (= Nat 0 1))
				(λ (p) (trans (the (= Nat 0 0) (same 0)) p)))
		";
		assert_eq!(normal_form(source), "(λ (p) (trans (same 0) p))");
	}

	#[test]
	fn stuck_transports_carry_their_operands() {
		let source = "
			(the (Π ((p (= Nat 1 2))) (= Nat 2 3))
				(λ (p) (cong p (the (-> Nat Nat) (λ (n) (add1 n))))))
		";
		assert_eq!(normal_form(source), "(λ (p) (cong p (λ (x) (add1 x))))");
		let source = "
			(the (Π ((p (= Nat 0 1)) (es (Vec Atom 0))) (Vec Atom 1))
				(λ (p es) (replace p (λ (k) (Vec Atom k)) es)))
		";
		assert_eq!(normal_form(source), "(λ (p) (λ (es) (replace p (λ (x) (Vec Atom x)) es)))");
		let source = "
			(the (Π ((p (= Nat 0 1))) (= Nat 1 0))
				(λ (p) (ind-= p (λ (to q) (= Nat to 0)) (same 0))))
		";
		assert_eq!(normal_form(source), "(λ (p) (ind-= p (λ (x) (λ (x₁) (= Nat x 0))) (same 0)))");
	}

	#[test]
	fn stuck_case_splits_read_back() {
		assert_eq!(
			normal_form("(the (Π ((n Nat)) Atom) (λ (n) (which-Nat n 'naught (λ (k) 'more))))"),
			"(λ (n) (which-Nat n (the Atom 'naught) (λ (x) 'more)))"
		);
		assert_eq!(
			normal_form("(the (Π ((es (Vec Atom 3))) Atom) (λ (es) (head es)))"),
			"(λ (es) (head es))"
		);
		assert_eq!(
			normal_form("(the (Π ((es (Vec Atom 3))) (Vec Atom 2)) (λ (es) (tail es)))"),
			"(λ (es) (tail es))"
		);
	}

	#[test]
	fn stuck_spines_compare_by_their_parts() {
		let source = "
			(claim positive? (-> Nat Atom))
			(define positive? (λ (n) (which-Nat n 'no (λ (k) 'yes))))
			(check-same (-> Nat Atom) positive? (λ (m) (which-Nat m 'no (λ (j) 'yes))))
		";
		assert!(run(source).is_ok());
		let source = "
			(claim positive? (-> Nat Atom))
			(define positive? (λ (n) (which-Nat n 'no (λ (k) 'yes))))
			(check-same (-> Nat Atom) positive? (λ (m) (which-Nat m 'maybe (λ (j) 'yes))))
		";
		assert!(run(source).is_err());
		// The two one-sided compositions prove the same equation but are
		// different normal forms.
		let source = "
			(check-same (Π ((p (= Nat 1 1))) (= Nat 1 1))
				(λ (p) (trans p (the (= Nat 1 1) (same 1))))
				(λ (p) (trans (the (= Nat 1 1) (same 1)) p)))
		";
		assert!(run(source).is_err());
	}

	#[test]
	fn holes_record_their_expectations() {
		let (context, _) = run("(claim f (-> Nat Atom)) (define f (λ (n) TODO))").unwrap();
		let events = context.events.snapshot();
		let hole = events
			.iter()
			.find_map(|(_, event)| match event {
				Event::Hole { hypotheses, ty } => Some((hypotheses.clone(), ty.clone())),
				_ => None,
			})
			.expect("no hole event");
		assert!(matches!(hole.1, Term::Atom));
		assert_eq!(hole.0.len(), 1);
		let resolver = context.names.resolver();
		assert_eq!(resolver.resolve(&hole.0[0].0), "n");
		assert!(matches!(hole.0[0].1, Term::Nat));
	}

	#[test]
	fn binder_collisions_freshen() {
		// The outer binder is named x, so the inner hint x is renamed apart.
		assert_eq!(
			normal_form("(the (-> (-> Nat Nat) (-> Nat Nat)) (λ (x) x))"),
			"(λ (x) (λ (x₁) (x x₁)))"
		);
	}

	#[test]
	fn defined_lengths_force_during_checking() {
		// The length below is a delayed variable reference, not a literal, so
		// checking vec:: has to force it down to add1 before peeling.
		let source = "
			(claim two Nat)
			(define two 2)
			(the (Vec Atom two) (vec:: 'a (vec:: 'b vecnil)))
		";
		assert!(run(source).is_ok());
	}

	#[test]
	fn absurd_eliminations_stay_stuck() {
		let source = "
			(claim magic (Π ((void Absurd)) Nat))
			(define magic (λ (void) (ind-Absurd void Nat)))
			magic
		";
		assert_eq!(normal_form(source), "(λ (void) (ind-Absurd (the Absurd void) Nat))");
	}

	#[test]
	fn absurd_proofs_convert() {
		let source = "
			(claim use (-> Absurd Absurd))
			(define use (λ (void) void))
			(claim spin (-> Absurd Absurd))
			(define spin (λ (void) (ind-Absurd void Absurd)))
			(check-same (-> Absurd Absurd) use spin)
		";
		assert!(run(source).is_ok());
	}

	#[test]
	fn ind_nat_proves_plus_n_zero() {
		let source = "
			(claim + (-> Nat Nat Nat))
			(define + (λ (a b) (iter-Nat a b (λ (ih) (add1 ih)))))
			(claim plus-n-zero (Π ((n Nat)) (= Nat (+ n zero) n)))
			(define plus-n-zero
				(λ (n)
					(ind-Nat n
						(λ (k) (= Nat (+ k zero) k))
						(same zero)
						(λ (k ih) (cong ih (the (-> Nat Nat) (λ (m) (add1 m))))))))
			(plus-n-zero 2)
		";
		assert_eq!(normal_form(source), "(same 2)");
	}
}
