//! Wide horizontal-slice converter: one row per latitude, one column per longitude.

use std::process::ExitCode;

use ucvm2csv::ConversionVariant;

fn main() -> ExitCode {
    ucvm2csv::run(ConversionVariant::HorizontalSlice)
}
