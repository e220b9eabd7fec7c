use lasso::Rodeo;

use crate::{
	common::Name,
	ir::{
		presyntax::{BinderGroup, Declaration, Expression, Preterm},
		source::{Keyword, LexedSource, Token},
	},
};

/// Parses a sequence of declarations from a lexed source. Ranges throughout
/// the presyntax are pairs of token indices into the lexed source, to be
/// resolved against its byte ranges when reporting.
pub fn parse(lexed: &LexedSource) -> Result<(Vec<Declaration>, Rodeo), peg::error::ParseError<usize>> {
	let mut parser = Parser { source: lexed.source, interner: Rodeo::new(), ranges: lexed.ranges.clone() };
	let declarations = presyntax_parse::program(&lexed.tokens, &mut parser)?;
	Ok((declarations, parser.interner))
}

pub struct Parser<'s> {
	source: &'s str,
	pub interner: Rodeo,
	ranges: Box<[(usize, usize)]>,
}

impl<'s> Parser<'s> {
	fn identifier(&mut self, token_index: usize) -> Name {
		let range = self.ranges[token_index];
		let span = &self.source[range.0..range.1];
		self.interner.get_or_intern(span)
	}

	// The token range includes the tick; the atom's name starts after it.
	fn tick(&mut self, token_index: usize) -> Name {
		let range = self.ranges[token_index];
		let span = &self.source[range.0 + 1..range.1];
		self.interner.get_or_intern(span)
	}

	fn number(&self, token_index: usize) -> Option<usize> {
		let range = self.ranges[token_index];
		let span = &self.source[range.0..range.1];
		span.parse::<usize>().ok()
	}
}

peg::parser! {
  grammar presyntax_parse(parser: &mut Parser) for [Token] {
		rule _ = [Token::Whitespace]*

		rule identifier() -> Name
			= pos:position!() [Token::Identifier] {parser.identifier(pos)}

		rule number() -> usize
			= pos:position!() [Token::Number] {parser.number(pos).unwrap()}

		rule tick() -> Name
			= pos:position!() [Token::Tick] {parser.tick(pos)}

		rule parameter() -> ((usize, usize), Name)
			= init:position!() name:identifier() fini:position!() {((init, fini), name)}

		rule binder_group() -> BinderGroup
			= init:position!() [Token::ParenL] _ name:identifier() _ ty:expression() _ [Token::ParenR] fini:position!()
				{((init, fini), name, ty)}

		rule binder_groups() -> Vec<BinderGroup>
			= [Token::ParenL] _ binders:(b:binder_group() _ {b})+ [Token::ParenR] {binders}

		rule parameters() -> Vec<((usize, usize), Name)>
			= [Token::ParenL] _ parameters:(p:parameter() _ {p})+ [Token::ParenR] {parameters}

		#[cache]
		rule expression() -> Expression
			= init:position!() preterm:(
				  name:identifier() {Preterm::Variable(name)}
				/ number:number() {Preterm::Number(number)}
				/ name:tick() {Preterm::Tick(name)}
				/ [Token::Keyword(Keyword::Universe)] {Preterm::Universe}
				/ [Token::Keyword(Keyword::Nat)] {Preterm::Nat}
				/ [Token::Keyword(Keyword::Zero)] {Preterm::Zero}
				/ [Token::Keyword(Keyword::Atom)] {Preterm::Atom}
				/ [Token::Keyword(Keyword::Trivial)] {Preterm::Trivial}
				/ [Token::Keyword(Keyword::Sole)] {Preterm::Sole}
				/ [Token::Keyword(Keyword::Nil)] {Preterm::Nil}
				/ [Token::Keyword(Keyword::VecNil)] {Preterm::VecNil}
				/ [Token::Keyword(Keyword::Absurd)] {Preterm::Absurd}
				/ [Token::Keyword(Keyword::Todo)] {Preterm::Todo}
				/ [Token::ParenL] _ preterm:compound() _ [Token::ParenR] {preterm}
			) fini:position!() {preterm.at((init, fini))}

		rule compound() -> Preterm
			= [Token::Keyword(Keyword::The)] _ ty:expression() _ expression:expression()
				{Preterm::The {ty: ty.into(), expression: expression.into()}}

			// Natural numbers.
			/ [Token::Keyword(Keyword::Add1)] _ n:expression() {Preterm::Add1(n.into())}
			/ [Token::Keyword(Keyword::WhichNat)] _ scrutinee:expression() _ base:expression() _ step:expression()
				{Preterm::WhichNat {scrutinee: scrutinee.into(), base: base.into(), step: step.into()}}
			/ [Token::Keyword(Keyword::IterNat)] _ scrutinee:expression() _ base:expression() _ step:expression()
				{Preterm::IterNat {scrutinee: scrutinee.into(), base: base.into(), step: step.into()}}
			/ [Token::Keyword(Keyword::RecNat)] _ scrutinee:expression() _ base:expression() _ step:expression()
				{Preterm::RecNat {scrutinee: scrutinee.into(), base: base.into(), step: step.into()}}
			/ [Token::Keyword(Keyword::IndNat)] _ scrutinee:expression() _ motive:expression() _ base:expression() _ step:expression()
				{Preterm::IndNat {scrutinee: scrutinee.into(), motive: motive.into(), base: base.into(), step: step.into()}}

			// Functions.
			/ [Token::Keyword(Keyword::Pi)] _ binders:binder_groups() _ family:expression()
				{Preterm::Pi {binders, family: family.into()}}
			/ [Token::Keyword(Keyword::Arrow)] _ base:expression() _ family:expression() rest:(_ r:expression() {r})*
				{Preterm::Arrow {base: base.into(), family: family.into(), rest}}
			/ [Token::Keyword(Keyword::Lambda)] _ parameters:parameters() _ body:expression()
				{Preterm::Lambda {parameters, body: body.into()}}

			// Pairs.
			/ [Token::Keyword(Keyword::Sigma)] _ binders:binder_groups() _ family:expression()
				{Preterm::Sigma {binders, family: family.into()}}
			/ [Token::Keyword(Keyword::Pair)] _ base:expression() _ family:expression()
				{Preterm::Pair {base: base.into(), family: family.into()}}
			/ [Token::Keyword(Keyword::Cons)] _ base:expression() _ fiber:expression()
				{Preterm::Cons {base: base.into(), fiber: fiber.into()}}
			/ [Token::Keyword(Keyword::Car)] _ scrutinee:expression() {Preterm::Car(scrutinee.into())}
			/ [Token::Keyword(Keyword::Cdr)] _ scrutinee:expression() {Preterm::Cdr(scrutinee.into())}

			// Lists.
			/ [Token::Keyword(Keyword::List)] _ entry:expression() {Preterm::List(entry.into())}
			/ [Token::Keyword(Keyword::ListCons)] _ head:expression() _ tail:expression()
				{Preterm::ListCons {head: head.into(), tail: tail.into()}}
			/ [Token::Keyword(Keyword::RecList)] _ scrutinee:expression() _ base:expression() _ step:expression()
				{Preterm::RecList {scrutinee: scrutinee.into(), base: base.into(), step: step.into()}}
			/ [Token::Keyword(Keyword::IndList)] _ scrutinee:expression() _ motive:expression() _ base:expression() _ step:expression()
				{Preterm::IndList {scrutinee: scrutinee.into(), motive: motive.into(), base: base.into(), step: step.into()}}

			// Length-indexed vectors.
			/ [Token::Keyword(Keyword::Vec)] _ entry:expression() _ length:expression()
				{Preterm::Vec {entry: entry.into(), length: length.into()}}
			/ [Token::Keyword(Keyword::VecCons)] _ head:expression() _ tail:expression()
				{Preterm::VecCons {head: head.into(), tail: tail.into()}}
			/ [Token::Keyword(Keyword::Head)] _ scrutinee:expression() {Preterm::Head(scrutinee.into())}
			/ [Token::Keyword(Keyword::Tail)] _ scrutinee:expression() {Preterm::Tail(scrutinee.into())}
			/ [Token::Keyword(Keyword::IndVec)] _ length:expression() _ scrutinee:expression() _ motive:expression() _ base:expression() _ step:expression()
				{Preterm::IndVec {length: length.into(), scrutinee: scrutinee.into(), motive: motive.into(), base: base.into(), step: step.into()}}

			// Sums.
			/ [Token::Keyword(Keyword::Either)] _ left:expression() _ right:expression()
				{Preterm::Either {left: left.into(), right: right.into()}}
			/ [Token::Keyword(Keyword::Left)] _ value:expression() {Preterm::Left(value.into())}
			/ [Token::Keyword(Keyword::Right)] _ value:expression() {Preterm::Right(value.into())}
			/ [Token::Keyword(Keyword::IndEither)] _ scrutinee:expression() _ motive:expression() _ on_left:expression() _ on_right:expression()
				{Preterm::IndEither {scrutinee: scrutinee.into(), motive: motive.into(), on_left: on_left.into(), on_right: on_right.into()}}

			// Equality.
			/ [Token::Keyword(Keyword::Equal)] _ ty:expression() _ from:expression() _ to:expression()
				{Preterm::Equal {ty: ty.into(), from: from.into(), to: to.into()}}
			/ [Token::Keyword(Keyword::Same)] _ expression:expression() {Preterm::Same(expression.into())}
			/ [Token::Keyword(Keyword::Symm)] _ scrutinee:expression() {Preterm::Symm(scrutinee.into())}
			/ [Token::Keyword(Keyword::Cong)] _ scrutinee:expression() _ function:expression()
				{Preterm::Cong {scrutinee: scrutinee.into(), function: function.into()}}
			/ [Token::Keyword(Keyword::Replace)] _ scrutinee:expression() _ motive:expression() _ base:expression()
				{Preterm::Replace {scrutinee: scrutinee.into(), motive: motive.into(), base: base.into()}}
			/ [Token::Keyword(Keyword::Trans)] _ left:expression() _ right:expression()
				{Preterm::Trans {left: left.into(), right: right.into()}}
			/ [Token::Keyword(Keyword::IndEqual)] _ scrutinee:expression() _ motive:expression() _ base:expression()
				{Preterm::IndEqual {scrutinee: scrutinee.into(), motive: motive.into(), base: base.into()}}

			// The empty type.
			/ [Token::Keyword(Keyword::IndAbsurd)] _ scrutinee:expression() _ motive:expression()
				{Preterm::IndAbsurd {scrutinee: scrutinee.into(), motive: motive.into()}}

			// Applications.
			/ scrutinee:expression() arguments:(_ a:expression() {a})+
				{Preterm::Apply {scrutinee: scrutinee.into(), arguments}}

		rule declaration() -> Declaration
			= init:position!() [Token::ParenL] _ [Token::Keyword(Keyword::Claim)] _ name:identifier() _ ty:expression() _ [Token::ParenR] fini:position!()
				{Declaration::Claim {range: (init, fini), name, ty}}
			/ init:position!() [Token::ParenL] _ [Token::Keyword(Keyword::Define)] _ name:identifier() _ body:expression() _ [Token::ParenR] fini:position!()
				{Declaration::Define {range: (init, fini), name, body}}
			/ init:position!() [Token::ParenL] _ [Token::Keyword(Keyword::CheckSame)] _ ty:expression() _ left:expression() _ right:expression() _ [Token::ParenR] fini:position!()
				{Declaration::CheckSame {range: (init, fini), ty, left, right}}
			/ expression:expression() {Declaration::Example {expression}}

		pub rule program() -> Vec<Declaration>
			= _ declarations:(d:declaration() _ {d})* {declarations}
  }
}

#[cfg(test)]
mod test {
	use super::*;

	fn declarations(source: &str) -> (Vec<Declaration>, Rodeo) {
		let lexed = LexedSource::new(source).unwrap_or_else(|_| panic!("lex failure on {source:?}"));
		parse(&lexed).unwrap_or_else(|error| panic!("parse failure on {source:?}: {error}"))
	}

	#[test]
	fn declaration_forms_parse() {
		let (declarations, _) = declarations("(claim x Nat) (define x 4) (check-same Nat x 4) x");
		assert_eq!(declarations.len(), 4);
		assert!(matches!(declarations[0], Declaration::Claim { .. }));
		assert!(matches!(declarations[1], Declaration::Define { .. }));
		assert!(matches!(declarations[2], Declaration::CheckSame { .. }));
		assert!(matches!(declarations[3], Declaration::Example { .. }));
	}

	#[test]
	fn telescopes_keep_their_binder_groups() {
		let (declarations, _) = declarations("(Π ((A U) (a A)) A)");
		let Declaration::Example { expression } = &declarations[0] else { panic!() };
		let Preterm::Pi { binders, .. } = &expression.preterm else { panic!() };
		assert_eq!(binders.len(), 2);
	}

	#[test]
	fn applications_collect_their_arguments() {
		let (declarations, _) = declarations("(f a b c)");
		let Declaration::Example { expression } = &declarations[0] else { panic!() };
		let Preterm::Apply { arguments, .. } = &expression.preterm else { panic!() };
		assert_eq!(arguments.len(), 3);
	}

	#[test]
	fn ticks_intern_without_their_tick() {
		let (declarations, interner) = declarations("'pea");
		let Declaration::Example { expression } = &declarations[0] else { panic!() };
		let Preterm::Tick(name) = &expression.preterm else { panic!() };
		assert_eq!(interner.resolve(name), "pea");
	}

	#[test]
	fn ranges_are_token_index_pairs() {
		let (declarations, _) = declarations("(add1 zero)");
		let Declaration::Example { expression } = &declarations[0] else { panic!() };
		// ( add1 ␣ zero ) is five tokens.
		assert_eq!(expression.range, (0, 5));
		let Preterm::Add1(argument) = &expression.preterm else { panic!() };
		assert_eq!(argument.range, (3, 4));
	}

	#[test]
	fn stray_heads_do_not_parse() {
		let lexed = LexedSource::new("(claim x)").unwrap_or_else(|_| panic!());
		assert!(parse(&lexed).is_err());
		let lexed = LexedSource::new("(zero zero").unwrap_or_else(|_| panic!());
		assert!(parse(&lexed).is_err());
	}
}
