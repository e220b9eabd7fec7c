use std::{cell::RefCell, fmt, rc::Rc};

use super::syntax::Term;
use crate::common::{Label, Name};

/// A call-by-need environment: names bound to (possibly delayed) values.
#[derive(Clone, Debug)]
pub struct Environment(pub Vec<(Name, Value)>);

impl Environment {
	pub fn new() -> Self { Self(Vec::new()) }

	#[must_use]
	pub fn extend(&self, name: Name, value: Value) -> Self {
		let mut environment = self.clone();
		environment.0.push((name, value));
		environment
	}

	pub fn lookup(&self, name: Name) -> Value {
		let Some((_, value)) = self.0.iter().rev().find(|(bound, _)| *bound == name) else {
			panic!("evaluated a variable not bound in its environment")
		};
		value.clone()
	}
}

impl Default for Environment {
	fn default() -> Self { Self::new() }
}

/// A deferred computation, memoized in place the first time it is forced.
#[derive(Clone, Debug)]
pub enum Delayed {
	Pending(Environment, Term),
	Forced(Value),
}

#[derive(Clone, Debug)]
pub enum Value {
	// Deferred computations. Eliminators force these before inspecting any
	// head, so a canonical value underneath is never observed twice.
	Delay(Rc<RefCell<Delayed>>),

	// Neutrals, tagged with the type at which they are stuck.
	Neutral(Rc<Self>, Rc<Neutral>),

	// Types.
	Universe,

	// Natural numbers.
	Nat,
	Zero,
	Add1(Rc<Self>),

	// Atoms.
	Atom,
	Tick(Name),

	// Dependent functions. A parameter of `None` marks a family synthesized
	// by the evaluator rather than written in any source program.
	Pi { parameter: Label, base: Rc<Self>, family: Rc<Closure> },
	Lambda { parameter: Name, body: Rc<Closure> },

	// Dependent pairs.
	Sigma { parameter: Name, base: Rc<Self>, family: Rc<Closure> },
	Cons { car: Rc<Self>, cdr: Rc<Self> },

	// Trivialities.
	Trivial,
	Sole,

	// Lists.
	List(Rc<Self>),
	Nil,
	ListCons { head: Rc<Self>, tail: Rc<Self> },

	// Length-indexed vectors.
	Vec { entry: Rc<Self>, length: Rc<Self> },
	VecNil,
	VecCons { head: Rc<Self>, tail: Rc<Self> },

	// Sums.
	Either { left: Rc<Self>, right: Rc<Self> },
	Left(Rc<Self>),
	Right(Rc<Self>),

	// Equality.
	Equal { ty: Rc<Self>, from: Rc<Self>, to: Rc<Self> },
	Same(Rc<Self>),

	// The empty type.
	Absurd,
}

impl Value {
	pub fn variable(ty: Self, name: Name) -> Self {
		Self::Neutral(Rc::new(ty), Rc::new(Neutral::Variable(name)))
	}
}

/// A value paired with its type, as stored in neutral spines so that readback
/// can proceed type-directedly without consulting a context.
#[derive(Clone, Debug)]
pub struct Normal {
	pub ty: Value,
	pub value: Value,
}

/// A stuck elimination. Every variant records the normal forms of the
/// arguments that were already canonical when the elimination got stuck.
#[derive(Clone, Debug)]
pub enum Neutral {
	Variable(Name),
	Todo { range: (usize, usize), ty: Value },

	// Natural numbers.
	WhichNat { scrutinee: Rc<Self>, base: Normal, step: Normal },
	IterNat { scrutinee: Rc<Self>, base: Normal, step: Normal },
	RecNat { scrutinee: Rc<Self>, base: Normal, step: Normal },
	IndNat { scrutinee: Rc<Self>, motive: Normal, base: Normal, step: Normal },

	// Dependent functions.
	Apply { scrutinee: Rc<Self>, argument: Normal },

	// Dependent pairs.
	Car(Rc<Self>),
	Cdr(Rc<Self>),

	// Lists.
	RecList { scrutinee: Rc<Self>, base: Normal, step: Normal },
	IndList { scrutinee: Rc<Self>, motive: Normal, base: Normal, step: Normal },

	// Length-indexed vectors.
	Head(Rc<Self>),
	Tail(Rc<Self>),
	// Stuck on both the length and the vector.
	IndVec12 { length: Rc<Self>, scrutinee: Rc<Self>, motive: Normal, base: Normal, step: Normal },
	// Stuck on the vector alone, the length being canonical.
	IndVec2 { length: Normal, scrutinee: Rc<Self>, motive: Normal, base: Normal, step: Normal },

	// Sums.
	IndEither { scrutinee: Rc<Self>, motive: Normal, on_left: Normal, on_right: Normal },

	// Equality.
	Symm(Rc<Self>),
	Cong { scrutinee: Rc<Self>, codomain: Rc<Value>, function: Normal },
	Replace { scrutinee: Rc<Self>, motive: Normal, base: Normal },
	Trans1 { left: Rc<Self>, right: Normal },
	Trans2 { left: Normal, right: Rc<Self> },
	Trans12 { left: Rc<Self>, right: Rc<Self> },
	IndEqual { scrutinee: Rc<Self>, motive: Normal, base: Normal },

	// The empty type.
	IndAbsurd { scrutinee: Rc<Self>, motive: Normal },
}

/// A suspended one-argument computation: either a binder's body closed over
/// its environment, or a function built by the evaluator itself for the types
/// of eliminator motives and steps.
#[derive(Clone)]
pub enum Closure {
	Source { environment: Environment, parameter: Name, body: Term },
	Native(Rc<dyn Fn(Value) -> Value>),
}

impl fmt::Debug for Closure {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Source { environment, parameter, body } => f
				.debug_struct("Source")
				.field("environment", environment)
				.field("parameter", parameter)
				.field("body", body)
				.finish(),
			Self::Native(_) => f.debug_tuple("Native").field(&format_args!("_")).finish(),
		}
	}
}
