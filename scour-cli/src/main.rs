//! scour CLI
//!
//! Clean or check HTML fragments against a tag whitelist from the command
//! line. Input comes from a file argument, an `--html` literal, or stdin.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use scour_sanitize::{Cleanser, Validator};
use serde::Serialize;

/// The default whitelist: basic formatting, lists and links.
const DEFAULT_TAGS: &str = "a,strong,b,em,i,br,p,ul,ol,li,div";

#[derive(Parser)]
#[command(name = "scour", about = "Whitelist-based HTML fragment sanitizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove non-whitelisted markup and print the cleaned fragment.
    ///
    /// Malformed input prints an empty fragment (the cleanser fails closed).
    Clean {
        /// File to read; omit to read stdin.
        input: Option<PathBuf>,

        /// Inline HTML instead of a file.
        #[arg(long, conflicts_with = "input")]
        html: Option<String>,

        /// Comma-separated allowed tag names (case-insensitive).
        #[arg(long, value_delimiter = ',', default_value = DEFAULT_TAGS)]
        tags: Vec<String>,
    },

    /// Check a fragment and report every violation.
    Check {
        /// File to read; omit to read stdin.
        input: Option<PathBuf>,

        /// Inline HTML instead of a file.
        #[arg(long, conflicts_with = "input")]
        html: Option<String>,

        /// Comma-separated allowed tag names (case-insensitive).
        #[arg(long, value_delimiter = ',', default_value = DEFAULT_TAGS)]
        tags: Vec<String>,

        /// Emit the report as JSON instead of colored text.
        #[arg(long)]
        json: bool,
    },
}

/// Machine-readable result of `scour check`.
#[derive(Serialize)]
struct CheckReport {
    valid: bool,
    violations: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Clean { input, html, tags } => {
            let source = read_source(input.as_deref(), html)?;
            let cleaned = Cleanser::new(&tags).clean(&source);
            println!("{cleaned}");
        }
        Command::Check {
            input,
            html,
            tags,
            json,
        } => {
            let source = read_source(input.as_deref(), html)?;
            let (valid, violations) = Validator::new(&tags).is_valid(&source);

            if json {
                let report = CheckReport { valid, violations };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if valid {
                println!("{}", "valid".green());
            } else {
                for violation in &violations {
                    eprintln!("{}", violation.red());
                }
            }
            if !valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Read the fragment from `--html`, a file path, or stdin, in that order of
/// preference.
fn read_source(path: Option<&std::path::Path>, html: Option<String>) -> Result<String> {
    if let Some(html) = html {
        return Ok(html);
    }
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    let _ = std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}
