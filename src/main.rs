// splike - A small Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use splike_core::config::{ENV_MAX_DEPTH, parse_max_depth, parse_namespaces};
use splike_core::{Config, Error, Interpreter};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
Usage: splike [OPTIONS] [FILE...]

Runs each FILE in order, or starts a REPL when none are given.
A FILE without an extension has .splike appended.

Options:
      --no-prelude        Do not load the standard prelude
      --max-depth <N>     Evaluation depth limit
      --allow-host <NS>   Comma-separated host namespaces to allow
  -v, --version           Print version
  -h, --help              Print this help

Environment:
  SPLIKE_MAX_DEPTH, SPLIKE_ALLOW_HOST   Defaults for the options above
  SPLIKE_LOG (or RUST_LOG)              Log filter, e.g. splike_core=debug";

fn main() {
    init_tracing();

    let (config, files) = match parse_args(env::args().skip(1)) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => return,
        Err(e) => {
            eprintln!("{}: {}", e.kind(), e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };
    debug!(?config, files = files.len(), "starting");

    let interp = match Interpreter::new(&config) {
        Ok(interp) => interp,
        Err(e) => {
            eprintln!("Failed to load prelude: {}", e.report());
            process::exit(1);
        }
    };

    if files.is_empty() {
        run_repl(&interp);
    } else {
        run_files(&files, &interp);
    }
}

/// Install a stderr subscriber when `SPLIKE_LOG` or `RUST_LOG` is set.
fn init_tracing() {
    let directives = env::var("SPLIKE_LOG").or_else(|_| env::var("RUST_LOG"));
    if let Ok(directives) = directives {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::new(directives))
            .init();
    }
}

/// Parse command-line arguments on top of the environment configuration.
/// Returns `None` when the process should exit successfully without
/// running anything.
fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> Result<Option<(Config, Vec<PathBuf>)>, Error> {
    let mut config = Config::from_env()?;
    let mut files = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--version" => {
                println!("Splike v{}", VERSION);
                return Ok(None);
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(None);
            }
            "--no-prelude" => config.load_prelude = false,
            "--max-depth" => {
                let value = args.next().ok_or_else(|| missing_value("--max-depth"))?;
                config.max_depth = parse_max_depth(ENV_MAX_DEPTH, &value)?;
            }
            "--allow-host" => {
                let value = args.next().ok_or_else(|| missing_value("--allow-host"))?;
                config.host_namespaces = Some(parse_namespaces(&value));
            }
            flag if flag.starts_with("--max-depth=") => {
                let value = &flag["--max-depth=".len()..];
                config.max_depth = parse_max_depth(ENV_MAX_DEPTH, value)?;
            }
            flag if flag.starts_with("--allow-host=") => {
                let value = &flag["--allow-host=".len()..];
                config.host_namespaces = Some(parse_namespaces(value));
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(Error::InvalidConfig {
                    key: "option".to_string(),
                    value: flag.to_string(),
                });
            }
            file => files.push(source_path(file)),
        }
    }

    Ok(Some((config, files)))
}

fn missing_value(flag: &str) -> Error {
    Error::InvalidConfig {
        key: flag.to_string(),
        value: String::new(),
    }
}

/// `name` becomes `name.splike`; paths with an extension are kept.
fn source_path(arg: &str) -> PathBuf {
    let path = Path::new(arg);
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("splike")
    }
}

/// Evaluate a sequence of source files, stopping at the first error.
fn run_files(files: &[PathBuf], interp: &Interpreter) {
    for path in files {
        if let Err(e) = interp.run_file(path) {
            report(&e);
            process::exit(1);
        }
    }
}

fn report(error: &Error) {
    if error.is_fatal() {
        eprintln!("Fatal: {}", error.report());
    } else {
        eprintln!("{}", error.report());
    }
}

/// Run the interactive REPL. Input is buffered until it parses as one or
/// more complete forms.
fn run_repl(interp: &Interpreter) {
    println!("Splike v{}", VERSION);
    println!("Ctrl-C clears the current input, Ctrl-D exits.");

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Could not initialise the REPL: {}", e);
            process::exit(1);
        }
    };
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { "splike> " } else { "   ...> " };
        match rl.readline(prompt) {
            Ok(line) => {
                buffer.push_str(&line);
                buffer.push('\n');
                if buffer.trim().is_empty() {
                    buffer.clear();
                    continue;
                }

                let nodes = match splike_parser::parse(&buffer, "<repl>") {
                    Ok(nodes) => nodes,
                    Err(e) if e.incomplete => continue,
                    Err(e) => {
                        report(&Error::from(e));
                        buffer.clear();
                        continue;
                    }
                };
                if let Err(e) = rl.add_history_entry(buffer.trim_end()) {
                    debug!(error = %e, "could not record history entry");
                }
                buffer.clear();

                match interp.evaluate_all(&nodes) {
                    Ok(value) => println!("{}", value.inspect()),
                    Err(e) => report(&e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if buffer.is_empty() {
                    break;
                }
                buffer.clear();
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_source_path_appends_extension() {
        assert_eq!(source_path("demo"), PathBuf::from("demo.splike"));
        assert_eq!(source_path("demo.txt"), PathBuf::from("demo.txt"));
    }

    #[test]
    fn test_parse_flags() {
        let (config, files) = parse_args(args(&[
            "--no-prelude",
            "--max-depth",
            "50",
            "--allow-host=Math,JSON",
            "main",
        ]))
        .unwrap()
        .unwrap();
        assert!(!config.load_prelude);
        assert_eq!(config.max_depth, 50);
        assert_eq!(
            config.host_namespaces,
            Some(vec!["Math".to_string(), "JSON".to_string()])
        );
        assert_eq!(files, vec![PathBuf::from("main.splike")]);
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        assert!(parse_args(args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_depth() {
        assert!(parse_args(args(&["--max-depth", "zero"])).is_err());
    }
}
