use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use decaf::{
    ast::{printer::print_tree, unparse::unparse},
    errors::{
        errors::render_error,
        session::{ConsoleReporter, Session},
    },
    lexer::lexer::Lexer,
    parser::parser::parse,
};
use log::info;

fn usage() {
    print!(
        "\
usage:
  decafc [options] <file>

options:
  -h, --help    show this help
  --tree        print the syntax tree (default)
  --source      print the program back as canonical source, instead of the tree

Set RUST_LOG=debug or RUST_LOG=trace to follow the parser.
"
    );
}

enum Output {
    Tree,
    Source,
}

fn run() -> u8 {
    if let Err(e) = env_logger::try_init_from_env(env_logger::Env::default().default_filter_or("error")) {
        eprintln!("could not start env logger: {e}");
        return 1;
    }

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        usage();
        return 0;
    }
    let output = match (args.contains("--tree"), args.contains("--source")) {
        (true, true) => {
            eprintln!("error: `--tree` and `--source` cannot be used together");
            return 1;
        }
        (_, true) => Output::Source,
        _ => Output::Tree,
    };
    let file_path: PathBuf = match args.free_from_str() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("error: {e}");
            usage();
            return 1;
        }
    };
    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("error: unexpected arguments: {rest:?}");
        usage();
        return 1;
    }

    let file_name = file_path
        .file_name()
        .and_then(|name| name.to_str())
        .map(String::from)
        .unwrap_or_else(|| file_path.display().to_string());

    let contents = match read_to_string(&file_path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("error: could not read {}: {e}", file_path.display());
            return 1;
        }
    };

    let start = Instant::now();
    let mut session = Session::new(Box::new(ConsoleReporter::new(file_name.clone(), contents.clone())));
    let lexer = Lexer::new(&contents, Some(file_name.clone()));
    let result = parse(lexer, &mut session);

    info!("Parsed in {:?}", start.elapsed());

    let program = match result {
        Ok(program) => program,
        Err(error) => {
            eprint!("{}", render_error(&error, &file_name, &contents));
            return 1;
        }
    };

    if session.has_errors() {
        eprintln!("{}: {} error(s)", file_name, session.error_count());
        return 1;
    }

    match output {
        Output::Tree => print!("{}", print_tree(&program)),
        Output::Source => print!("{}", unparse(&program)),
    }

    info!("Total time: {:?}", start.elapsed());
    0
}

fn main() -> ExitCode {
    ExitCode::from(run())
}
