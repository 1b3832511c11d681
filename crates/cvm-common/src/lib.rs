//! Common types shared by the velocity-model table converters.
//!
//! A velocity-model query produces a *descriptor* (JSON metadata) and a data
//! file. The types here model the descriptor side and the rendering rules
//! used for every emitted table cell.

pub mod descriptor;
pub mod error;
pub mod grid;
pub mod property;
pub mod value;

pub use descriptor::{DepthField, ProfileMode, QueryDescriptor};
pub use error::{CvmError, CvmResult};
pub use grid::Axis;
pub use property::PropertyKind;
pub use value::{python_str, CellValue, NumberFormat};
