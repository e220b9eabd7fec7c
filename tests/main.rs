mod common;

use std::{ffi::OsStr, fs};

use common::{execute, pass_program, EXTENSION};
use galette::{common::NameSupply, ir::source::LexedSource, op::parse::parse};

#[test]
fn run_programs() {
	for path in fs::read_dir("tests/programs")
		.unwrap()
		.flatten()
		.map(|x| x.path())
		.filter(|x| x.extension() == Some(OsStr::new(EXTENSION)))
	{
		pass_program(path);
	}
}

#[test]
fn run_fail_tests() {
	for path in fs::read_dir("tests/fail")
		.unwrap()
		.flatten()
		.map(|x| x.path())
		.filter(|x| x.extension() == Some(OsStr::new(EXTENSION)))
	{
		let path_str = path.as_os_str().to_str().unwrap().to_owned();
		let source = fs::read_to_string(path).expect(&path_str);
		let lexed_source = LexedSource::new(&source).ok().expect(&path_str);
		let (declarations, interner) = parse(&lexed_source).expect(&path_str);
		let result = execute(&declarations, NameSupply::from(interner));
		assert!(result.is_err(), "{}", path_str);
	}
}
