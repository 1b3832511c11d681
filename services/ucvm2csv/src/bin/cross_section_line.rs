//! Long cross-section converter: one `lon,lat,depth,value` row per grid point.

use std::process::ExitCode;

use ucvm2csv::ConversionVariant;

fn main() -> ExitCode {
    ucvm2csv::run(ConversionVariant::CrossSectionLine)
}
