use std::str::Chars;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Token {
	Whitespace,
	Keyword(Keyword),
	Identifier,
	Number,
	// A quoted atom, including its tick.
	Tick,
	ParenL,
	ParenR,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Keyword {
	The,
	Universe,

	Nat,
	Zero,
	Add1,
	WhichNat,
	IterNat,
	RecNat,
	IndNat,

	Atom,

	Pi,
	Arrow,
	Lambda,

	Sigma,
	Pair,
	Cons,
	Car,
	Cdr,

	Trivial,
	Sole,

	List,
	Nil,
	ListCons,
	RecList,
	IndList,

	Vec,
	VecNil,
	VecCons,
	Head,
	Tail,
	IndVec,

	Either,
	Left,
	Right,
	IndEither,

	Equal,
	Same,
	Symm,
	Cong,
	Replace,
	Trans,
	IndEqual,

	Absurd,
	IndAbsurd,

	Todo,

	Claim,
	Define,
	CheckSame,
}

pub struct LexError(pub usize, pub LexErrorKind);

pub enum LexErrorKind {
	UnrecognizedLexemePrefix,
	EmptyAtom,
}

struct Scanner<'s> {
	len: usize,
	chars: Chars<'s>,
}

impl<'s> Scanner<'s> {
	pub fn new(source: &'s str) -> Self { Self { len: source.len(), chars: source.chars() } }

	pub fn position(&self) -> usize { self.len - self.chars.as_str().len() }

	pub fn next(&mut self) -> Option<(char, usize)> {
		let position = self.position();
		Some((self.chars.next()?, position))
	}

	pub fn pop(&mut self) -> Option<char> { self.chars.next() }

	pub fn peek(&mut self) -> Option<char> { self.chars.clone().next() }
}

// Any character that can continue a symbol: everything except delimiters.
fn is_symbolic(c: char) -> bool { !c.is_whitespace() && !matches!(c, '(' | ')' | '[' | ']' | '\'' | ';') }

pub struct LexedSource<'s> {
	pub source: &'s str,
	pub tokens: Box<[Token]>,
	pub ranges: Box<[(usize, usize)]>,
}

impl<'s> LexedSource<'s> {
	fn keyword_or_identifier(string: &str) -> Token {
		use Token::*;

		use self::Keyword::*;
		match string {
			"the" => Keyword(The),
			"U" => Keyword(Universe),

			"Nat" => Keyword(Nat),
			"zero" => Keyword(Zero),
			"add1" => Keyword(Add1),
			"which-Nat" => Keyword(WhichNat),
			"iter-Nat" => Keyword(IterNat),
			"rec-Nat" => Keyword(RecNat),
			"ind-Nat" => Keyword(IndNat),

			"Atom" => Keyword(Atom),

			"Pi" | "Π" => Keyword(Pi),
			"->" | "→" => Keyword(Arrow),
			"lambda" | "λ" => Keyword(Lambda),

			"Sigma" | "Σ" => Keyword(Sigma),
			"Pair" => Keyword(Pair),
			"cons" => Keyword(Cons),
			"car" => Keyword(Car),
			"cdr" => Keyword(Cdr),

			"Trivial" => Keyword(Trivial),
			"sole" => Keyword(Sole),

			"List" => Keyword(List),
			"nil" => Keyword(Nil),
			"::" => Keyword(ListCons),
			"rec-List" => Keyword(RecList),
			"ind-List" => Keyword(IndList),

			"Vec" => Keyword(Vec),
			"vecnil" => Keyword(VecNil),
			"vec::" => Keyword(VecCons),
			"head" => Keyword(Head),
			"tail" => Keyword(Tail),
			"ind-Vec" => Keyword(IndVec),

			"Either" => Keyword(Either),
			"left" => Keyword(Left),
			"right" => Keyword(Right),
			"ind-Either" => Keyword(IndEither),

			"=" => Keyword(Equal),
			"same" => Keyword(Same),
			"symm" => Keyword(Symm),
			"cong" => Keyword(Cong),
			"replace" => Keyword(Replace),
			"trans" => Keyword(Trans),
			"ind-=" => Keyword(IndEqual),

			"Absurd" => Keyword(Absurd),
			"ind-Absurd" => Keyword(IndAbsurd),

			"TODO" => Keyword(Todo),

			"claim" => Keyword(Claim),
			"define" => Keyword(Define),
			"check-same" => Keyword(CheckSame),

			_ => Identifier,
		}
	}

	pub fn new(source: &'s str) -> Result<Self, LexError> {
		use LexErrorKind::*;
		use Token::*;
		let mut scanner = Scanner::new(source);
		let mut tokens = Vec::new();
		let mut ranges = Vec::new();
		while let Some((initial, start)) = scanner.next() {
			let token = match initial {
				c if c.is_whitespace() => {
					while let Some(c) = scanner.peek() {
						if !c.is_whitespace() {
							break;
						}
						scanner.pop();
					}
					Whitespace
				}
				';' => {
					while let Some(c) = scanner.peek() {
						scanner.pop();
						if c == '\n' {
							break;
						}
					}
					Whitespace
				}
				'(' | '[' => ParenL,
				')' | ']' => ParenR,
				'\'' => {
					if !scanner.peek().is_some_and(is_symbolic) {
						return Err(LexError(start, EmptyAtom));
					}
					while scanner.peek().is_some_and(is_symbolic) {
						scanner.pop();
					}
					Tick
				}
				'0'..='9' => {
					while scanner.peek().is_some_and(is_symbolic) {
						scanner.pop();
					}
					let lexeme = &source[start..scanner.position()];
					if lexeme.bytes().all(|b| b.is_ascii_digit()) {
						Number
					} else {
						Self::keyword_or_identifier(lexeme)
					}
				}
				c if is_symbolic(c) => {
					while scanner.peek().is_some_and(is_symbolic) {
						scanner.pop();
					}
					Self::keyword_or_identifier(&source[start..scanner.position()])
				}
				_ => return Err(LexError(start, UnrecognizedLexemePrefix)),
			};
			tokens.push(token);
			ranges.push((start, scanner.position()));
		}

		debug_assert!(tokens.len() == ranges.len());
		Ok(Self { source, tokens: tokens.into_boxed_slice(), ranges: ranges.into_boxed_slice() })
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn tokens(source: &str) -> Vec<Token> {
		LexedSource::new(source)
			.unwrap_or_else(|_| panic!("lex failure on {source:?}"))
			.tokens
			.iter()
			.copied()
			.filter(|token| *token != Token::Whitespace)
			.collect()
	}

	#[test]
	fn symbols_classify_as_keywords_or_identifiers() {
		use Keyword::*;
		assert_eq!(
			tokens("(which-Nat n zero (λ (k) k))"),
			vec![
				Token::ParenL,
				Token::Keyword(WhichNat),
				Token::Identifier,
				Token::Keyword(Zero),
				Token::ParenL,
				Token::Keyword(Lambda),
				Token::ParenL,
				Token::Identifier,
				Token::ParenR,
				Token::Identifier,
				Token::ParenR,
				Token::ParenR,
			]
		);
		assert_eq!(tokens("ind-= vec:: ->"), vec![
			Token::Keyword(IndEqual),
			Token::Keyword(VecCons),
			Token::Keyword(Arrow)
		]);
	}

	#[test]
	fn ticks_numbers_and_comments() {
		assert_eq!(tokens("'ratatouille 17 ; a comment\n'pea"), vec![
			Token::Tick,
			Token::Number,
			Token::Tick
		]);
		assert!(LexedSource::new("' (").is_err());
	}

	#[test]
	fn brackets_are_parens() {
		assert_eq!(tokens("[the Nat 4]"), vec![
			Token::ParenL,
			Token::Keyword(Keyword::The),
			Token::Keyword(Keyword::Nat),
			Token::Number,
			Token::ParenR
		]);
	}
}
