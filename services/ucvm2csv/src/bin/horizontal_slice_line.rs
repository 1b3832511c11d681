//! Long horizontal-slice converter; zero-valued points are dropped.

use std::process::ExitCode;

use ucvm2csv::ConversionVariant;

fn main() -> ExitCode {
    ucvm2csv::run(ConversionVariant::HorizontalSliceLine)
}
