//! `enigma` — encrypt or decrypt message streams with a configured rotor machine.
//!
//! **Usage:**
//! ```text
//! enigma <config> [<input>] [<output>]
//! ```
//!
//! Reads messages from `<input>` (default: standard input) and writes the
//! result to `<output>` (default: standard output). Exits with status 1 and
//! a one-line diagnostic on any error. Set `ENIGMA_LOG=debug` to trace
//! configuration and settings changes on stderr.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use enigma::{stream, EnigmaError, MachineConfig};
use tracing_subscriber::EnvFilter;

/// Simulate a rotor cipher machine.
#[derive(Parser)]
#[command(name = "enigma", version, about = "Encrypt or decrypt messages with a rotor cipher machine")]
struct Args {
    /// Machine configuration file.
    config: PathBuf,

    /// Message file (default: standard input).
    input: Option<PathBuf>,

    /// Output file (default: standard output).
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ENIGMA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // clap's message up to its usage block, folded onto one line.
            let rendered = e.to_string();
            let reason = rendered
                .lines()
                .take_while(|line| !line.trim().is_empty())
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(" ");
            let reason = reason.trim_start_matches("error: ");
            let usage = EnigmaError::Usage(format!(
                "{}; usage: enigma <config> [<input>] [<output>]",
                reason
            ));
            eprintln!("Error: {}", usage);
            process::exit(1);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let text = fs::read_to_string(&args.config).map_err(|_| could_not_open(&args.config))?;
    let mut machine = MachineConfig::parse(&text)?.into_machine()?;

    let processed = match (&args.input, &args.output) {
        (Some(input), Some(output)) => {
            let reader = BufReader::new(File::open(input).map_err(|_| could_not_open(input))?);
            let writer = BufWriter::new(File::create(output).map_err(|_| could_not_open(output))?);
            stream::process(&mut machine, reader, writer)
        }
        (Some(input), None) => {
            let reader = BufReader::new(File::open(input).map_err(|_| could_not_open(input))?);
            stream::process(&mut machine, reader, io::stdout().lock())
        }
        _ => stream::process(&mut machine, io::stdin().lock(), io::stdout().lock()),
    };
    Ok(processed?)
}

fn could_not_open(path: &Path) -> EnigmaError {
    EnigmaError::Usage(format!("could not open {}", path.display()))
}
