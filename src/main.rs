#[macro_use]
extern crate clap;

use std::process;

use clap::AppSettings;
use plotter::{eval_in_range, lex, parse};

fn main() {
    let matches = clap_app!(plotter =>
        (version: "0.1.0")
        (about: "Evaluates a single-variable expression over a stepped domain")
        (@subcommand tokenize =>
            (about: "Tokenize the expression and print out the tokens")
            (@arg EXPR: +required "Expression to tokenize")
        )
        (@subcommand parse =>
            (about: "Parse the expression and print out the tree")
            (@arg EXPR: +required "Expression to parse")
        )
        (@subcommand sample =>
            (about: "Print (x, f(x)) pairs across the domain")
            (@arg EXPR: +required "Expression to evaluate")
            (@arg START: "Start of the domain (default 0)")
            (@arg STOP: "End of the domain, exclusive (default 1)")
            (@arg INCREMENT: "Step between samples (default 0.1)")
        )
    )
    .setting(AppSettings::SubcommandRequiredElseHelp)
    .get_matches();

    if let Some(sub) = matches.subcommand_matches("tokenize") {
        for token in lex(sub.value_of("EXPR").unwrap()) {
            println!("{}", token);
        }
    }

    if let Some(sub) = matches.subcommand_matches("parse") {
        match parse(sub.value_of("EXPR").unwrap()) {
            Ok(expr) => println!("{:#?}", expr),
            Err(error) => {
                eprintln!("error: {}", error);
                process::exit(1);
            }
        }
    }

    if let Some(sub) = matches.subcommand_matches("sample") {
        let expression = sub.value_of("EXPR").unwrap();
        let start = value_t!(sub, "START", f64).unwrap_or(0.0);
        let stop = value_t!(sub, "STOP", f64).unwrap_or(1.0);
        let increment = value_t!(sub, "INCREMENT", f64).unwrap_or(0.1);

        match eval_in_range(expression, start, stop, increment) {
            Ok((domain, values)) => {
                // the expression doubles as the legend label downstream
                println!("# {}", expression);
                for (x, value) in domain.iter().zip(values.iter()) {
                    println!("{}\t{}", x, value);
                }
            }
            Err(error) => {
                eprintln!("error: {}", error);
                process::exit(1);
            }
        }
    }
}
