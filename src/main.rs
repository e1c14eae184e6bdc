// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use nfa2dfa::dfa::simulator::CandidateReader;
use nfa2dfa::dfa::subset::{EpsilonMode, SubsetConstructor};
use nfa2dfa::nfa::core::EPSILON;
use nfa2dfa::nfa::reader::NFAReader;

fn build_cli() -> Command {
    Command::new("nfa2dfa")
        .about("Convert a NFA into a DFA and print the accepted candidate strings")
        .after_help(
            r#"EXAMPLES:
  nfa2dfa nfa.txt inputs.txt                        # print both automata and the accepted strings
  nfa2dfa nfa.txt inputs.txt --quiet                # accepted strings only
  nfa2dfa nfa.txt inputs.txt --epsilon single-hop   # keep lambda transitions in the DFA"#,
        )
        .arg(
            Arg::new("nfa_path")
                .value_name("NFA_FILE")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("File describing the NFA"),
        )
        .arg(
            Arg::new("inputs_path")
                .value_name("INPUT_FILE")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("File of candidate strings separated by white characters"),
        )
        .arg(
            Arg::new("epsilon")
                .long("epsilon")
                .value_name("MODE")
                .default_value("closure")
                .value_parser(["closure", "single-hop"])
                .help("Handling of the lambda transitions during the construction"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only print the accepted strings"),
        )
}

struct RunParams {
    nfa_path: PathBuf,
    inputs_path: PathBuf,
    mode: EpsilonMode,
    quiet: bool,
}

impl RunParams {
    fn from_matches(m: &ArgMatches) -> RunParams {
        let (nfa_path, inputs_path) = match (
            m.get_one::<PathBuf>("nfa_path"),
            m.get_one::<PathBuf>("inputs_path"),
        ) {
            (Some(nfa_path), Some(inputs_path)) => (nfa_path.clone(), inputs_path.clone()),
            _ => unreachable!("clap should have caught this"),
        };
        let mode = match m.get_one::<String>("epsilon").map(String::as_str) {
            Some("single-hop") => EpsilonMode::SingleHop,
            _ => EpsilonMode::Closure,
        };
        RunParams {
            nfa_path,
            inputs_path,
            mode,
            quiet: m.get_flag("quiet"),
        }
    }
}

fn run(params: RunParams) {
    // both files are loaded before anything is printed
    let candidates = CandidateReader::new_from_file(&params.inputs_path).unwrap_or_else(|e| {
        eprintln!("error: {}: {}", params.inputs_path.display(), e);
        process::exit(1);
    });
    let nfa = NFAReader::new_from_file(&params.nfa_path).unwrap_or_else(|e| {
        eprintln!("error: {}: {}", params.nfa_path.display(), e);
        process::exit(1);
    });

    let dfa = SubsetConstructor::with_mode(params.mode).build(&nfa);

    if !params.quiet {
        println!("NOTE: '{}' represents a lambda transition", EPSILON);
        println!("{}", nfa);
        println!("To DFA:");
        println!("{}", dfa);
        println!("The following strings are accepted:");
    }
    for input in dfa.accepted(candidates) {
        println!("{}", input);
    }
}

fn main() {
    let matches = build_cli().get_matches();
    run(RunParams::from_matches(&matches));
}
