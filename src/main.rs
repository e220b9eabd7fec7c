use bpaf::{construct, short, Parser};
use galette::{
	common::NameSupply,
	ir::{presyntax::Declaration, source::LexedSource},
	op::{
		elaborate::{Context, Stop},
		parse::parse,
		unparse::pretty,
	},
	report::{report_parse_error, report_stop, report_tokenization_error},
};

pub fn run(source: &str) {
	let lexed_source = match LexedSource::new(source) {
		Ok(x) => x,
		Err(e) => {
			report_tokenization_error(source, e);
			panic!()
		}
	};

	let (declarations, interner) = match parse(&lexed_source) {
		Ok(x) => x,
		Err(e) => {
			report_parse_error(lexed_source, e);
			panic!()
		}
	};

	let names = NameSupply::from(interner);
	if let Err(e) = execute(&declarations, &names) {
		report_stop(lexed_source, &*names.resolver(), e);
		panic!()
	}
}

/// Processes declarations in order against a growing context, printing the
/// normal form of each bare expression as an annotated value.
fn execute(declarations: &[Declaration], names: &NameSupply) -> Result<(), Stop> {
	let mut context = Context::new(names.clone());
	for declaration in declarations {
		match declaration {
			Declaration::Claim { range, name, ty } => context = context.add_claim(*range, *name, ty)?,
			Declaration::Define { range, name, body } =>
				context = context.add_define(*range, *name, body)?,
			Declaration::CheckSame { range, ty, left, right } =>
				context.check_same(*range, ty, left, right)?,
			Declaration::Example { expression } => {
				let (ty, value) = context.normalize(expression)?;
				let resolver = names.resolver();
				println!("(the {} {})", pretty(&ty, &*resolver), pretty(&value, &*resolver));
			}
		}
	}
	Ok(())
}

enum InputOption {
	Direct(String),
	FilePath(String),
}

struct Options {
	input: InputOption,
}

fn main() {
	let options: Options = construct!(Options {
		input(construct!([
			c(short('c').argument::<String>("\"program\"").help("Read input from argument").map(InputOption::Direct)),
			f(short('f').argument::<String>("PATH").help("Read input from file").map(InputOption::FilePath)),
		]))
	})
	.to_options()
	.run();

	let input = match options.input {
		InputOption::Direct(command) => command,
		InputOption::FilePath(file_path) => std::fs::read_to_string(file_path).unwrap(),
	};

	run(&input);
}
