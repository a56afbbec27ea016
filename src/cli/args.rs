//! Defines the command-line arguments and subcommands for the pathstore CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "pathstore",
    version,
    about = "Delimiter-keyed access into nested JSON documents."
)]
pub struct StoreArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a path and print its value as JSON.
    Get {
        /// The JSON document to read.
        #[arg(required = true)]
        file: PathBuf,
        /// The delimited key path, e.g. `user.name`.
        #[arg(required = true)]
        path: String,
        /// Segment separator used in PATH.
        #[arg(long, default_value = ".")]
        delimiter: String,
    },
    /// Report whether a path resolves; exits 0 when it does, 1 when not.
    Exists {
        /// The JSON document to read.
        #[arg(required = true)]
        file: PathBuf,
        /// The delimited key path to probe.
        #[arg(required = true)]
        path: String,
        /// Segment separator used in PATH.
        #[arg(long, default_value = ".")]
        delimiter: String,
    },
    /// Write a value at a path, creating intermediate mappings as needed.
    Set {
        /// The JSON document to edit.
        #[arg(required = true)]
        file: PathBuf,
        /// The delimited key path to write at.
        #[arg(required = true)]
        path: String,
        /// The value to write, parsed as JSON with a bare-string fallback.
        #[arg(required = true)]
        value: String,
        /// Segment separator used in PATH.
        #[arg(long, default_value = ".")]
        delimiter: String,
        /// Rewrite FILE instead of printing the updated document.
        #[arg(long)]
        in_place: bool,
    },
    /// Delete the value at a path.
    Remove {
        /// The JSON document to edit.
        #[arg(required = true)]
        file: PathBuf,
        /// The delimited key path to delete.
        #[arg(required = true)]
        path: String,
        /// Segment separator used in PATH.
        #[arg(long, default_value = ".")]
        delimiter: String,
        /// Rewrite FILE instead of printing the updated document.
        #[arg(long)]
        in_place: bool,
    },
    /// Print the document's top-level keys in order.
    Keys {
        /// The JSON document to read.
        #[arg(required = true)]
        file: PathBuf,
        /// Segment separator (accepted for symmetry; keys are printed verbatim).
        #[arg(long, default_value = ".")]
        delimiter: String,
    },
}
