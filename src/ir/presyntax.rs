use crate::common::Name;

#[derive(Debug, Clone)]
pub struct Expression {
	pub range: (usize, usize),
	pub preterm: Preterm,
}

#[derive(Debug, Clone)]
pub enum Declaration {
	Claim { range: (usize, usize), name: Name, ty: Expression },
	Define { range: (usize, usize), name: Name, body: Expression },
	CheckSame { range: (usize, usize), ty: Expression, left: Expression, right: Expression },
	Example { expression: Expression },
}

// One parenthesized binder group: the range covers `(x A)`.
pub type BinderGroup = ((usize, usize), Name, Expression);

#[derive(Debug, Clone)]
pub enum Preterm {
	Variable(Name),
	The { ty: Box<Expression>, expression: Box<Expression> },
	Universe,

	// Naturals.
	Nat,
	Zero,
	Add1(Box<Expression>),
	Number(usize),
	WhichNat { scrutinee: Box<Expression>, base: Box<Expression>, step: Box<Expression> },
	IterNat { scrutinee: Box<Expression>, base: Box<Expression>, step: Box<Expression> },
	RecNat { scrutinee: Box<Expression>, base: Box<Expression>, step: Box<Expression> },
	IndNat { scrutinee: Box<Expression>, motive: Box<Expression>, base: Box<Expression>, step: Box<Expression> },

	// Atoms.
	Atom,
	Tick(Name),

	// Functions.
	Pi { binders: Vec<BinderGroup>, family: Box<Expression> },
	Arrow { base: Box<Expression>, family: Box<Expression>, rest: Vec<Expression> },
	Lambda { parameters: Vec<((usize, usize), Name)>, body: Box<Expression> },
	Apply { scrutinee: Box<Expression>, arguments: Vec<Expression> },

	// Pairs.
	Sigma { binders: Vec<BinderGroup>, family: Box<Expression> },
	Pair { base: Box<Expression>, family: Box<Expression> },
	Cons { base: Box<Expression>, fiber: Box<Expression> },
	Car(Box<Expression>),
	Cdr(Box<Expression>),

	// Trivialities.
	Trivial,
	Sole,

	// Lists.
	List(Box<Expression>),
	Nil,
	ListCons { head: Box<Expression>, tail: Box<Expression> },
	RecList { scrutinee: Box<Expression>, base: Box<Expression>, step: Box<Expression> },
	IndList { scrutinee: Box<Expression>, motive: Box<Expression>, base: Box<Expression>, step: Box<Expression> },

	// Length-indexed vectors.
	Vec { entry: Box<Expression>, length: Box<Expression> },
	VecNil,
	VecCons { head: Box<Expression>, tail: Box<Expression> },
	Head(Box<Expression>),
	Tail(Box<Expression>),
	IndVec {
		length: Box<Expression>,
		scrutinee: Box<Expression>,
		motive: Box<Expression>,
		base: Box<Expression>,
		step: Box<Expression>,
	},

	// Sums.
	Either { left: Box<Expression>, right: Box<Expression> },
	Left(Box<Expression>),
	Right(Box<Expression>),
	IndEither {
		scrutinee: Box<Expression>,
		motive: Box<Expression>,
		on_left: Box<Expression>,
		on_right: Box<Expression>,
	},

	// Equality.
	Equal { ty: Box<Expression>, from: Box<Expression>, to: Box<Expression> },
	Same(Box<Expression>),
	Symm(Box<Expression>),
	Cong { scrutinee: Box<Expression>, function: Box<Expression> },
	Replace { scrutinee: Box<Expression>, motive: Box<Expression>, base: Box<Expression> },
	Trans { left: Box<Expression>, right: Box<Expression> },
	IndEqual { scrutinee: Box<Expression>, motive: Box<Expression>, base: Box<Expression> },

	// The empty type.
	Absurd,
	IndAbsurd { scrutinee: Box<Expression>, motive: Box<Expression> },

	Todo,
}

impl Preterm {
	pub fn at(self, range: (usize, usize)) -> Expression { Expression { range, preterm: self } }
}
