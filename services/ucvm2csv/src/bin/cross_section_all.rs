//! Combined vp/vs/density cross-section converter.

use std::process::ExitCode;

use ucvm2csv::ConversionVariant;

fn main() -> ExitCode {
    ucvm2csv::run(ConversionVariant::CrossSectionAll)
}
