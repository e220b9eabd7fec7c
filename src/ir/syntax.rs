use crate::common::Name;

/// A core term: the elaborated form in which every construction is explicit,
/// every eliminator carries the annotations evaluation needs, and all sugar
/// has been expanded away.
#[derive(Clone, Debug)]
pub enum Term {
	// Variables.
	Variable(Name),

	// Annotations.
	The { ty: Box<Self>, expression: Box<Self> },

	// Types.
	Universe,

	// Natural numbers.
	Nat,
	Zero,
	Add1(Box<Self>),
	WhichNat { scrutinee: Box<Self>, base_ty: Box<Self>, base: Box<Self>, step: Box<Self> },
	IterNat { scrutinee: Box<Self>, base_ty: Box<Self>, base: Box<Self>, step: Box<Self> },
	RecNat { scrutinee: Box<Self>, base_ty: Box<Self>, base: Box<Self>, step: Box<Self> },
	IndNat { scrutinee: Box<Self>, motive: Box<Self>, base: Box<Self>, step: Box<Self> },

	// Atoms.
	Atom,
	Tick(Name),

	// Dependent functions.
	Pi { parameter: Name, base: Box<Self>, family: Box<Self> },
	Lambda { parameter: Name, body: Box<Self> },
	Apply { scrutinee: Box<Self>, argument: Box<Self> },

	// Dependent pairs.
	Sigma { parameter: Name, base: Box<Self>, family: Box<Self> },
	Cons { car: Box<Self>, cdr: Box<Self> },
	Car(Box<Self>),
	Cdr(Box<Self>),

	// Trivialities.
	Trivial,
	Sole,

	// Lists.
	List(Box<Self>),
	Nil,
	ListCons { head: Box<Self>, tail: Box<Self> },
	RecList { scrutinee: Box<Self>, base_ty: Box<Self>, base: Box<Self>, step: Box<Self> },
	IndList { scrutinee: Box<Self>, motive: Box<Self>, base: Box<Self>, step: Box<Self> },

	// Length-indexed vectors.
	Vec { entry: Box<Self>, length: Box<Self> },
	VecNil,
	VecCons { head: Box<Self>, tail: Box<Self> },
	Head(Box<Self>),
	Tail(Box<Self>),
	IndVec {
		length: Box<Self>,
		scrutinee: Box<Self>,
		motive: Box<Self>,
		base: Box<Self>,
		step: Box<Self>,
	},

	// Sums.
	Either { left: Box<Self>, right: Box<Self> },
	Left(Box<Self>),
	Right(Box<Self>),
	IndEither { scrutinee: Box<Self>, motive: Box<Self>, on_left: Box<Self>, on_right: Box<Self> },

	// Equality.
	Equal { ty: Box<Self>, from: Box<Self>, to: Box<Self> },
	Same(Box<Self>),
	Symm(Box<Self>),
	Cong { scrutinee: Box<Self>, codomain: Box<Self>, function: Box<Self> },
	Replace { scrutinee: Box<Self>, motive: Box<Self>, base: Box<Self> },
	Trans { left: Box<Self>, right: Box<Self> },
	IndEqual { scrutinee: Box<Self>, motive: Box<Self>, base: Box<Self> },

	// The empty type.
	Absurd,
	IndAbsurd { scrutinee: Box<Self>, motive: Box<Self> },

	// Unfinished programs.
	Todo { range: (usize, usize), ty: Box<Self> },
}
