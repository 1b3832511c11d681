//! Conversion of velocity-model query results into CSV tables.
//!
//! A query result is a data file (a `.npy` grid, or a JSON list of samples
//! for vertical profiles) plus a JSON descriptor naming its axes. Conversion
//! runs in three stages, all of which complete before anything is written:
//!
//! ```text
//! descriptor ──► GridDescriptor (axes cross-checked)
//!                     │
//! data file ───► NumericGrid ──► shape / point count checked
//!                     │
//!                     ▼
//!              TableFlattener ──► RowIter ──► CSV (header block + rows)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_table::{convert, ConversionVariant, InputPair};
//!
//! let inputs = [InputPair::new("cross_data.bin", "cross_meta.json")];
//! let report = convert(ConversionVariant::CrossSectionLine, &inputs)?;
//! println!("wrote {} rows to {}", report.rows_written, report.output.display());
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod flatten;
pub mod header;
pub mod loader;
pub mod pipeline;
pub mod types;
pub mod validate;
pub mod variant;

pub use config::{FlattenConfig, ProfileScale, TableShape, Topology};
pub use emit::{csv_field, write_table, write_table_file, HeaderBlock};
pub use error::{ErrorKind, Result, TableError, ValidationError};
pub use flatten::{RowIter, TableFlattener};
pub use header::{build_header, HeaderContext};
pub use loader::{load_descriptor, load_grid, load_profile_samples};
pub use pipeline::{convert, pair_arguments, ConversionReport, InputPair, PreparedTable};
pub use types::{ElementType, NumericGrid, PropertyGrid, Row};
pub use validate::{GridAxes, GridDescriptor};
pub use variant::ConversionVariant;
