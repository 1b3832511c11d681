//! Combined vp/vs/density horizontal-slice converter.

use std::process::ExitCode;

use ucvm2csv::ConversionVariant;

fn main() -> ExitCode {
    ucvm2csv::run(ConversionVariant::HorizontalSliceAll)
}
