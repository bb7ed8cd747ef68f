//! Prints the NFA, DFA and minimal DFA transition tables of a regex.

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use thompson_regex::{Stages, accepts, compile_stages};

fn build_cli() -> Command {
    Command::new("regex-tables")
        .about("Compile a regex into a minimal DFA and print every stage")
        .arg(
            Arg::new("regex")
                .value_name("REGEX")
                .required(true)
                .help("Regex over ';' ',' '#' '*' '+' and parentheses, e.g. \"(a;b)*,c\""),
        )
        .arg(
            Arg::new("check")
                .short('c')
                .long("check")
                .value_name("INPUT")
                .action(ArgAction::Append)
                .help("Input to run through every stage, can be repeated"),
        )
}

fn print_checks(stages: &Stages, matches: &ArgMatches) {
    let Some(inputs) = matches.get_many::<String>("check") else {
        return;
    };
    println!();
    for input in inputs {
        println!(
            "{input:?}: NFA {}, DFA {}, minimal DFA {}",
            verdict(accepts(&stages.nfa, input)),
            verdict(accepts(&stages.dfa, input)),
            verdict(accepts(&stages.minimal, input)),
        );
    }
}

fn verdict(accepted: bool) -> &'static str {
    if accepted { "accepts" } else { "rejects" }
}

fn main() -> ExitCode {
    env_logger::init();
    let matches = build_cli().get_matches();
    let Some(regex) = matches.get_one::<String>("regex") else {
        unreachable!("clap should have caught this");
    };

    match compile_stages(regex) {
        Ok(stages) => {
            println!("{stages}");
            print_checks(&stages, &matches);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
