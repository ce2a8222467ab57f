//! # rstparam
//!
//! A CLI tool that appends `# @param[in]` records extracted from the
//! parameter tables of a reStructuredText document to an output file.
//!
//! ## Usage
//!
//! ```bash
//! # Append the parameters documented in cimager.rst to params.txt
//! rstparam docs/cimager.rst params.txt
//!
//! # Emit JSON lines instead
//! rstparam docs/cimager.rst params.jsonl --format json
//!
//! # Trace the table state machine on stderr
//! rstparam docs/cimager.rst params.txt --verbose
//! ```
//!
//! The output file is opened in append mode, so several documents can be
//! collected into one file by running the tool once per document.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use rstparamlib::{extract_file, ExtractOptions, OutputFormat};
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("rstparam")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract parameter records from reStructuredText grid tables")
        .arg(
            Arg::new("input")
                .required(true)
                .help("reStructuredText file to process"),
        )
        .arg(
            Arg::new("output")
                .required(true)
                .help("File the records are appended to"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(OutputFormat::NAMES)
                .default_value("param")
                .help("Output record format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log table scanning on stderr"),
        )
}

/// Route tracing output to stderr; `--verbose` overrides `RUST_LOG`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Handler for the single extract command
fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let input = matches
        .get_one::<String>("input")
        .ok_or_else(|| anyhow::anyhow!("missing input file"))?;
    let output = matches
        .get_one::<String>("output")
        .ok_or_else(|| anyhow::anyhow!("missing output file"))?;
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or_default();

    let options = ExtractOptions::new().format(format);
    extract_file(input, output, options)?;

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn requires_input_and_output() {
        let result = build_command().try_get_matches_from(["rstparam", "in.rst"]);
        assert!(result.is_err());
    }

    #[test]
    fn format_defaults_to_param() {
        let matches = build_command()
            .try_get_matches_from(["rstparam", "in.rst", "out.txt"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("format").map(String::as_str),
            Some("param")
        );
        assert!(!matches.get_flag("verbose"));
    }

    #[test]
    fn rejects_unknown_format() {
        let result = build_command().try_get_matches_from([
            "rstparam", "in.rst", "out.txt", "--format", "xml",
        ]);
        assert!(result.is_err());
    }
}
