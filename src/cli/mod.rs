//! The pathstore command-line interface.
//!
//! A thin shell over the library: each subcommand loads a JSON document,
//! runs one store operation, and prints the result. Failures are rendered
//! as miette reports on stderr with a non-zero exit code.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use miette::{miette, Report};

use crate::store::PathStore;

pub mod args;

use args::{Command, StoreArgs};

/// The main entry point for the CLI.
pub fn run() {
    let args = StoreArgs::parse();
    match execute(args.command) {
        Ok(code) => process::exit(code),
        Err(report) => {
            eprintln!("{report:?}");
            process::exit(2);
        }
    }
}

fn execute(command: Command) -> Result<i32, Report> {
    match command {
        Command::Get {
            file,
            path,
            delimiter,
        } => {
            let mut store = load(&file, &delimiter)?;
            let value = store.get(&path).map_err(Report::new)?;
            let text = serde_json::to_string_pretty(value)
                .map_err(|e| miette!("could not encode the value: {e}"))?;
            println!("{text}");
            Ok(0)
        }
        Command::Exists {
            file,
            path,
            delimiter,
        } => {
            let mut store = load(&file, &delimiter)?;
            let found = store.exists(&path);
            println!("{found}");
            Ok(if found { 0 } else { 1 })
        }
        Command::Set {
            file,
            path,
            value,
            delimiter,
            in_place,
        } => {
            let mut store = load(&file, &delimiter)?;
            store.set(&path, parse_value(&value)).map_err(Report::new)?;
            emit(&store, &file, in_place)
        }
        Command::Remove {
            file,
            path,
            delimiter,
            in_place,
        } => {
            let mut store = load(&file, &delimiter)?;
            store.remove(&path).map_err(Report::new)?;
            emit(&store, &file, in_place)
        }
        Command::Keys { file, delimiter } => {
            let store = load(&file, &delimiter)?;
            for (key, _) in &store {
                println!("{key}");
            }
            Ok(0)
        }
    }
}

fn load(file: &Path, delimiter: &str) -> Result<PathStore, Report> {
    let text = fs::read_to_string(file)
        .map_err(|e| miette!("could not read '{}': {e}", file.display()))?;
    PathStore::with_delimiter(text, delimiter).map_err(Report::new)
}

// A value argument is JSON when it parses as JSON, a bare string otherwise,
// so `set cfg.json user.name ada` works without shell-quoted quotes.
fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

fn emit(store: &PathStore, file: &Path, in_place: bool) -> Result<i32, Report> {
    let text = store.to_json_pretty().map_err(Report::new)?;
    if in_place {
        fs::write(file, text)
            .map_err(|e| miette!("could not write '{}': {e}", file.display()))?;
    } else {
        println!("{text}");
    }
    Ok(0)
}
