use lasso::Resolver;
use peg::error::ParseError;

use crate::{
	ir::source::{LexError, LexErrorKind, LexedSource},
	op::{
		elaborate::{MessagePart, Stop},
		unparse::print,
	},
};

pub fn report_tokenization_error(source: &str, lex_error: LexError) {
	report_line_error(source, (lex_error.0, lex_error.0 + 1), &format_lex_error(source, lex_error))
}

pub fn report_parse_error(source: LexedSource, error: ParseError<usize>) {
	report_line_error(
		source.source,
		token_byte_range(&source, (error.location, error.location + 1)),
		&format!("parse error: expected one of: {:?}", error.expected.tokens().collect::<Vec<_>>()),
	);
}

pub fn report_stop(source: LexedSource, interner: &impl Resolver, stop: Stop) {
	report_line_error(
		source.source,
		token_byte_range(&source, stop.range),
		&format!("elaboration error: {}", display_message(&stop.message, interner)),
	);
}

// Ranges in the presyntax and the core count tokens; the caret needs bytes.
fn token_byte_range(source: &LexedSource, range: (usize, usize)) -> (usize, usize) {
	let Some(&(start, first_end)) = source.ranges.get(range.0) else {
		return (source.source.len(), source.source.len() + 1);
	};
	let end = if range.1 > range.0 + 1 {
		source.ranges.get(range.1 - 1).map_or(first_end, |last| last.1)
	} else {
		first_end
	};
	(start, end)
}

fn display_message(message: &[MessagePart], interner: &impl Resolver) -> String {
	let mut string = String::new();
	for (index, part) in message.iter().enumerate() {
		if index > 0 {
			string.push(' ');
		}
		match part {
			MessagePart::Text(text) => string.push_str(text),
			MessagePart::Term(term) => print(term, &mut string, interner).unwrap(),
		}
	}
	string
}

fn report_line_error(source: &str, range: (usize, usize), error_string: &str) {
	const TAB_WIDTH: usize = 3;
	// SAFETY: Repeated spaces form a valid string.
	const TAB_REPLACEMENT: &str = unsafe { std::str::from_utf8_unchecked(&[b' '; TAB_WIDTH]) };

	let mut lines = source.split_inclusive('\n');
	let mut line_number: usize = 0;
	let mut bytes_left = range.0;
	let (line, bytes_left, width) = loop {
		if let Some(line) = lines.next() {
			line_number += 1;
			if line.len() <= bytes_left {
				bytes_left -= line.len();
			} else {
				// A multiline range is pointed at from its first line only.
				break (line, bytes_left, (range.1 - range.0).min(line.len() - bytes_left).max(1));
			}
		} else {
			// This is a cold path, so this is fine.
			let (i, last) = source.split('\n').enumerate().last().unwrap();
			line_number = i + 1;
			break (last, last.len(), 1);
		}
	};

	print!("[{}:{}] ", line_number, bytes_left);
	println!("error: {error_string}");

	let visual_line = line.replace('\t', TAB_REPLACEMENT).trim_end().to_owned();
	let visual_offset: usize =
		unicode_width::UnicodeWidthStr::width(line[0..bytes_left].replace('\t', TAB_REPLACEMENT).as_str());

	let displayed_line_number = line_number.to_string();
	let dummy_line_number = " ".repeat(displayed_line_number.len());
	println!("{} |", dummy_line_number);
	println!("{} | {}", displayed_line_number, visual_line);
	println!("{} | {}{}", dummy_line_number, " ".repeat(visual_offset), "^".repeat(width));
}

fn format_lex_error(source: &str, LexError(location, kind): LexError) -> String {
	match kind {
		LexErrorKind::UnrecognizedLexemePrefix =>
			format!("lex error: unrecognized lexeme prefix `{}`", &source[location..location + 1]),
		LexErrorKind::EmptyAtom => "lex error: expected an atom name after `'`".to_owned(),
	}
}
