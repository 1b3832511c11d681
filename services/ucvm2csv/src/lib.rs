//! Shared entry point of the ucvm2csv converters.
//!
//! Every converter takes its input files as positional arguments (a data
//! file followed by its descriptor, once per property), prints the output
//! path and header block to stdout, and writes the table next to the first
//! data file. Diagnostics go to stderr; set `RUST_LOG` for more detail.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{error::ErrorKind as ClapErrorKind, CommandFactory, FromArgMatches, Parser};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use grid_table::{pair_arguments, ErrorKind, InputPair, PreparedTable, TableError};

pub use grid_table::ConversionVariant;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Data file and descriptor, in pairs
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// One-line description shown by `--help`.
fn about(variant: ConversionVariant) -> &'static str {
    match variant {
        ConversionVariant::CrossSection => "Convert a cross section into a wide CSV table",
        ConversionVariant::CrossSectionLine => "Convert a cross section into one CSV row per point",
        ConversionVariant::CrossSectionAll => {
            "Combine vp, vs and density cross sections into one CSV table"
        }
        ConversionVariant::HorizontalSlice => "Convert a horizontal slice into a wide CSV table",
        ConversionVariant::HorizontalSliceLine => {
            "Convert a horizontal slice into one CSV row per non-zero point"
        }
        ConversionVariant::HorizontalSliceAll => {
            "Combine vp, vs and density horizontal slices into one CSV table"
        }
        ConversionVariant::VerticalProfile => "Convert a vertical profile into a CSV table",
        ConversionVariant::Ucvm1d => "Convert a vertical profile into a CSV table in km/s",
    }
}

/// Install the stderr log subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the converter for `variant` with the process arguments.
///
/// Exit status: 0 on success, 2 on usage errors, 1 on any other failure.
pub fn run(variant: ConversionVariant) -> ExitCode {
    init_tracing();

    let mut cmd = Args::command()
        .name(variant.binary_name())
        .bin_name(variant.binary_name())
        .about(about(variant))
        .override_usage(variant.usage());

    let matches = cmd.get_matches_mut();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let inputs = match pair_arguments(variant, &args.files) {
        Ok(inputs) => inputs,
        Err(err) => cmd.error(ClapErrorKind::WrongNumberOfValues, err).exit(),
    };

    match convert(variant, &inputs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Exit status for a failed conversion: 2 for usage errors, 1 otherwise.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<TableError>().map(TableError::kind) {
        Some(ErrorKind::Usage) => 2,
        _ => 1,
    }
}

/// Validate, announce and write one table.
pub fn convert(variant: ConversionVariant, inputs: &[InputPair]) -> Result<()> {
    debug!(variant = %variant, inputs = ?inputs, "Starting conversion");

    let prepared = PreparedTable::prepare(variant, inputs)?;

    println!("Writing CSV file: {}", prepared.output().display());
    println!("{}", prepared.header());

    let rows = prepared.write()?;
    info!(output = %prepared.output().display(), rows, "Conversion complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_accept_pairs() {
        let args = Args::try_parse_from(["ucvm1d2csv", "a.json", "b.json"]).unwrap();
        assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn test_args_require_files() {
        let err = Args::try_parse_from(["ucvm1d2csv"]).unwrap_err();
        assert_eq!(err.kind(), ClapErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_exit_status_follows_error_kind() {
        let usage = anyhow::Error::new(TableError::Usage("expected 2 files".to_string()));
        assert_eq!(exit_status(&usage), 2);

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let io = anyhow::Error::new(TableError::io("meta.json", missing));
        assert_eq!(exit_status(&io), 1);

        let other = anyhow::anyhow!("unexpected");
        assert_eq!(exit_status(&other), 1);
    }

    #[test]
    fn test_every_variant_has_help_text() {
        for variant in ConversionVariant::ALL {
            assert!(!about(variant).is_empty());
        }
    }
}
