//! Vertical profile converter, velocities in km/s.

use std::process::ExitCode;

use ucvm2csv::ConversionVariant;

fn main() -> ExitCode {
    ucvm2csv::run(ConversionVariant::Ucvm1d)
}
