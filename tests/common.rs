use std::{fs, path::PathBuf};

use galette::{
	common::NameSupply,
	ir::{presyntax::Declaration, source::LexedSource},
	op::{
		elaborate::{Context, Stop},
		parse::parse,
	},
	report::report_stop,
};

pub const EXTENSION: &str = "pie";

/// Runs a program's declarations in order against a growing context, as the driver does.
pub fn execute(declarations: &[Declaration], names: NameSupply) -> Result<Context, Stop> {
	let mut context = Context::new(names);
	for declaration in declarations {
		match declaration {
			Declaration::Claim { range, name, ty } => context = context.add_claim(*range, *name, ty)?,
			Declaration::Define { range, name, body } =>
				context = context.add_define(*range, *name, body)?,
			Declaration::CheckSame { range, ty, left, right } =>
				context.check_same(*range, ty, left, right)?,
			Declaration::Example { expression } => {
				context.normalize(expression)?;
			}
		}
	}
	Ok(context)
}

pub fn pass_program(path: PathBuf) -> Context {
	let path_str = path.as_os_str().to_str().unwrap().to_owned();
	let source = fs::read_to_string(path).expect(&path_str);
	let lexed_source = LexedSource::new(&source).ok().expect(&path_str);
	let (declarations, interner) = parse(&lexed_source).expect(&path_str);
	let names = NameSupply::from(interner);
	match execute(&declarations, names.clone()) {
		Ok(context) => context,
		Err(stop) => {
			report_stop(lexed_source, &*names.resolver(), stop);
			panic!("{}", path_str);
		}
	}
}
