//! Command-line interface for r-parser
//! This binary dumps the tokens and syntax tree of an R file and reports parse problems.
//!
//! Usage:
//!   rparse tokens `<path>` [--format text|json]     - List the tokens of a file
//!   rparse tree `<path>` [--format treeviz|json]    - Print the syntax tree
//!   rparse check `<path>`                           - Report parse errors, exit 1 if any
//!
//! Every command accepts `--config <file>` to layer settings over the built-in defaults.

use clap::{Arg, ArgAction, ArgMatches, Command};
use r_parser::r::ast::{snapshot_from_root, SourceLocation};
use r_parser::r::config::{Loader, RConfig};
use r_parser::r::formats::{format_tokens, to_treeviz_str_with_params};
use r_parser::r::lexing::{tokenize_text, Token};
use r_parser::r::parsing::parse;
use std::fs;

fn main() {
    let path_arg = || {
        Arg::new("path")
            .help("Path to the R source file")
            .required(true)
            .index(1)
    };

    let matches = Command::new("rparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting how R source text is tokenized and parsed")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .subcommand(
            Command::new("tokens")
                .about("List the tokens of a file")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the syntax tree of a file")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["treeviz", "json"])
                        .default_value("treeviz"),
                )
                .arg(
                    Arg::new("line-numbers")
                        .long("line-numbers")
                        .help("Prefix tree lines with source line numbers")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report parse errors, exiting with status 1 when there are any")
                .arg(path_arg()),
        )
        .get_matches();

    let config = load_config(&matches);

    match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens_command(sub, &config),
        Some(("tree", sub)) => handle_tree_command(sub, &config),
        Some(("check", sub)) => handle_check_command(sub, &config),
        _ => {
            eprintln!("Unknown command, see rparse --help");
            std::process::exit(1);
        }
    }
}

fn load_config(matches: &ArgMatches) -> RConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn string_arg<'m>(matches: &'m ArgMatches, name: &str) -> &'m str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => {
            eprintln!("Missing argument: {}", name);
            std::process::exit(1);
        }
    }
}

fn read_source(matches: &ArgMatches) -> (String, String) {
    let path = string_arg(matches, "path").to_string();
    let source = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });
    (path, source)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error formatting JSON: {}", e);
        std::process::exit(1);
    })
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches, config: &RConfig) {
    let (_, source) = read_source(matches);
    let tokens: Vec<Token> = tokenize_text(&source)
        .filter(|token| config.inspect.tokens.include_trivia || !token.kind.is_trivia())
        .collect();

    match string_arg(matches, "format") {
        "json" => println!("{}", to_json(&tokens)),
        _ => print!("{}", format_tokens(&source, &tokens)),
    }
}

/// Handle the tree command
fn handle_tree_command(matches: &ArgMatches, config: &RConfig) {
    let (_, source) = read_source(matches);
    let (ast, _) = parse(&source);

    match string_arg(matches, "format") {
        "json" => println!("{}", to_json(&snapshot_from_root(&ast))),
        _ => {
            let mut params = config.inspect.treeviz.to_params();
            if matches.get_flag("line-numbers") {
                params.insert("show-linum".to_string(), "true".to_string());
            }
            print!("{}", to_treeviz_str_with_params(&ast, &params));
        }
    }
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches, config: &RConfig) {
    let (path, source) = read_source(matches);
    let (_, errors) = parse(&source);
    if errors.is_empty() {
        println!("{}: no problems found", path);
        return;
    }

    let location = SourceLocation::new(&source);
    let limit = match config.check.max_errors {
        0 => errors.len(),
        max => max,
    };
    for error in errors.iter().take(limit) {
        eprintln!("{}:{}", path, error.display_with_position(&location));
    }
    if errors.len() > limit {
        eprintln!("... and {} more", errors.len() - limit);
    }
    std::process::exit(1);
}
