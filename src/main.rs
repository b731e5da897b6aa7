use std::{env, fs::read_to_string, process::exit, rc::Rc, time::Instant};

use transpiler::{display_error, lexer::lexer::tokenize, parser::parser::parse};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: transpiler <file>");
        exit(1);
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains('/') {
        file_path.split('/').last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let source = read_to_string(file_path).expect("Failed to read file!");

    let (tokens, lex_errors) = tokenize(source.clone(), Some(String::from(file_name)));
    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (ast, parse_errors) = parse(tokens, Rc::new(String::from(file_name)));
    println!("Parsed in {:?}", parse_start.elapsed());
    println!("Total front end time: {:?}", start.elapsed());

    for error in lex_errors.iter().chain(parse_errors.iter()) {
        display_error(error, &source, file_path);
    }

    let error_count = lex_errors.len() + parse_errors.len();
    if error_count > 0 {
        println!("{} error(s) found", error_count);
        exit(1);
    }

    println!("{} top level statement(s)", ast.stmts.len());
}
