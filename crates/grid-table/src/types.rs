//! Core types for grid conversion.

use cvm_common::value::MISSING_SENTINEL;
use cvm_common::{CellValue, PropertyKind};
use npy_parser::{Dtype, NpyArray};

/// Element type a grid was stored with, which decides how its cells print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Float64,
    Float32,
    /// All samples were JSON integers.
    Integer,
}

impl ElementType {
    /// Wrap a raw sample as a cell, mapping the sentinel to `Missing`.
    pub fn cell(&self, raw: f64) -> CellValue {
        if raw == MISSING_SENTINEL {
            return CellValue::Missing;
        }
        match self {
            Self::Float64 => CellValue::Real(raw),
            Self::Float32 => CellValue::Single(raw as f32),
            Self::Integer => CellValue::Integer(raw as i64),
        }
    }
}

impl From<Dtype> for ElementType {
    fn from(dtype: Dtype) -> Self {
        match dtype {
            Dtype::Float32 => Self::Float32,
            Dtype::Float64 => Self::Float64,
        }
    }
}

/// A dense array of property samples in row-major order.
///
/// 1-D grids behave as a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericGrid {
    shape: Vec<usize>,
    values: Vec<f64>,
    element: ElementType,
}

impl NumericGrid {
    /// A 1-D grid.
    pub fn column(values: Vec<f64>, element: ElementType) -> Self {
        Self {
            shape: vec![values.len()],
            values,
            element,
        }
    }

    /// A 2-D grid of 64-bit floats built from rows.
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != ncols) {
            return None;
        }
        Some(Self {
            shape: vec![rows.len(), ncols],
            values: rows.iter().flatten().copied().collect(),
            element: ElementType::Float64,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn element(&self) -> ElementType {
        self.element
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Extent of the first axis.
    pub fn rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    /// Extent of the second axis (1 for 0-D and 1-D grids).
    pub fn cols(&self) -> usize {
        self.shape.get(1).copied().unwrap_or(1)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Raw sample at (row, col).
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        let cols = self.cols();
        if row >= self.rows() || col >= cols {
            return None;
        }
        self.values.get(row * cols + col).copied()
    }

    /// Sample at (row, col) as a table cell.
    pub fn cell(&self, row: usize, col: usize) -> CellValue {
        self.value(row, col)
            .map(|raw| self.element.cell(raw))
            .unwrap_or(CellValue::Missing)
    }

    /// Sample at (row, col) divided by `divisor`; missing cells stay missing.
    pub fn scaled_cell(&self, row: usize, col: usize, divisor: f64) -> CellValue {
        if divisor == 1.0 {
            return self.cell(row, col);
        }
        match self.value(row, col) {
            Some(raw) if raw != MISSING_SENTINEL => CellValue::Real(raw / divisor),
            _ => CellValue::Missing,
        }
    }
}

impl From<NpyArray> for NumericGrid {
    fn from(array: NpyArray) -> Self {
        let shape = array.shape().to_vec();
        let element = array.dtype().into();
        Self {
            shape,
            values: array.into_data(),
            element,
        }
    }
}

/// One property grid together with the kind it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGrid {
    pub kind: PropertyKind,
    pub grid: NumericGrid,
}

impl PropertyGrid {
    pub fn new(kind: PropertyKind, grid: NumericGrid) -> Self {
        Self { kind, grid }
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
