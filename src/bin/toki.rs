//! Command-line interface for toki
//! Scans a file with the rules from a TOML rule file and prints the token stream.
//!
//! Usage:
//!   toki scan `<path>` --rules `<rules.toml>` [--format `<format>`] [--allow-errors]
//!   toki check --rules `<rules.toml>`                 - Compile a rule file and report problems
//!   toki formats                                    - List all available output formats

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use toki::{render, Loader, OutputFormat, ScanResult, TokiConfig};
use tracing::level_filters::LevelFilter;

fn main() {
    let rules_arg = Arg::new("rules")
        .long("rules")
        .short('r')
        .help("Path to the TOML rule file")
        .required(true);

    let matches = Command::new("toki")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A regex-driven scanner for splitting text into tokens")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .help("Log level written to stderr (off, error, warn, info, debug, trace)")
                .value_parser(value_parser!(LevelFilter))
                .default_value("warn"),
        )
        .subcommand(
            Command::new("scan")
                .about("Scan a file and print its tokens")
                .arg(
                    Arg::new("path")
                        .help("Path to the input file, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(rules_arg.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (text, json, yaml); defaults to the rule file setting"),
                )
                .arg(
                    Arg::new("allow-errors")
                        .long("allow-errors")
                        .help("Exit successfully even if the input contains unrecognized text")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Compile a rule file and report problems")
                .arg(rules_arg),
        )
        .subcommand(Command::new("formats").about("List all available output formats"))
        .get_matches();

    let level = matches
        .get_one::<LevelFilter>("log")
        .copied()
        .unwrap_or(LevelFilter::WARN);
    init_logging(level);

    match matches.subcommand() {
        Some(("scan", scan_matches)) => handle_scan_command(scan_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("formats", _)) => handle_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_config(matches: &ArgMatches) -> TokiConfig {
    let rules_path = matches.get_one::<String>("rules").unwrap();
    let mut loader = Ok(Loader::new().with_rules_file(rules_path));

    if let Some(format) = matches.try_get_one::<String>("format").ok().flatten() {
        let format = format.parse::<OutputFormat>().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        loader = loader.and_then(|l| l.with_format(format));
    }
    if matches!(matches.try_get_one::<bool>("allow-errors"), Ok(Some(true))) {
        loader = loader.and_then(|l| l.with_fail_on_error(false));
    }

    loader.and_then(Loader::build).unwrap_or_else(|e| {
        eprintln!("Error loading rules from {}: {}", rules_path, e);
        std::process::exit(1);
    })
}

fn read_input(path: &str) -> String {
    let result = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Handle the scan command
fn handle_scan_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let rules = config.rule_set();
    let scanner = rules.compile().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let path = matches.get_one::<String>("path").unwrap();
    let source = read_input(path);

    let mut session = scanner.scan(source);
    let mut results: Vec<ScanResult> = Vec::new();
    let last = loop {
        let result = session.next_token();
        let terminal = result.token.is_terminal();
        results.push(result);
        if terminal {
            break results.last().cloned();
        }
    };

    let output = render(&results, &rules, config.output.format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    print!("{}", output);

    if let Some(error) = last.filter(|r| r.is_error()) {
        tracing::debug!(position = %error.pos, remaining = session.remaining().len(), "scan stopped");
        if config.output.fail_on_error {
            eprintln!("Error: unrecognized input at {}", error.pos);
            std::process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let rules = config.rule_set();
    match rules.compile() {
        Ok(scanner) => {
            println!("{} rule(s) compiled", scanner.len());
            for rule in rules.rules() {
                println!(
                    "  {:>4}  {:<16} {}",
                    rule.definition.token, rule.name, rule.definition.pattern
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available output formats:\n");
    for format in OutputFormat::ALL {
        println!("  {}", format);
    }
}
