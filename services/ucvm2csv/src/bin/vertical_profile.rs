//! Vertical profile converter, velocities in m/s.

use std::process::ExitCode;

use ucvm2csv::ConversionVariant;

fn main() -> ExitCode {
    ucvm2csv::run(ConversionVariant::VerticalProfile)
}
