//! Wide cross-section converter: one row per depth, one column per position.

use std::process::ExitCode;

use ucvm2csv::ConversionVariant;

fn main() -> ExitCode {
    ucvm2csv::run(ConversionVariant::CrossSection)
}
