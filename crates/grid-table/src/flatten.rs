//! Flattening of validated grids into table rows.
//!
//! Rows are produced lazily by [`RowIter`] in the order they are written:
//!
//! | Topology | Shape | Outer loop | Inner loop | Row |
//! |---|---|---|---|---|
//! | cross section | long | position | depth | `lon, lat, depth, values...` |
//! | cross section | wide | depth | - | `depth, value per position...` |
//! | horizontal slice | long | longitude | latitude | `lon, lat, values...` |
//! | horizontal slice | wide | latitude | - | `lat, value per longitude...` |
//! | profile | long | sample | - | `depth or elevation, vp, vs, density` |

use cvm_common::{Axis, CellValue, PropertyKind};

use crate::config::{FlattenConfig, TableShape};
use crate::error::ValidationError;
use crate::types::{PropertyGrid, Row};
use crate::validate::{GridAxes, GridDescriptor};

/// Column name of the depth axis in wide cross sections.
pub const WIDE_DEPTH_COLUMN: &str = "Depths[m]";

/// Column name of the latitude axis in wide horizontal slices.
pub const WIDE_LAT_COLUMN: &str = "Lats";

/// Turns a validated descriptor and its property grids into rows.
#[derive(Debug)]
pub struct TableFlattener<'a> {
    config: FlattenConfig,
    descriptor: &'a GridDescriptor,
    grids: &'a [PropertyGrid],
}

impl<'a> TableFlattener<'a> {
    /// Check the configuration and every grid against the descriptor.
    pub fn new(
        config: FlattenConfig,
        descriptor: &'a GridDescriptor,
        grids: &'a [PropertyGrid],
    ) -> Result<Self, ValidationError> {
        config.validate()?;

        if config.topology != descriptor.topology() {
            return Err(ValidationError::InvalidConfig(format!(
                "configured for {} but descriptor is a {}",
                config.topology,
                descriptor.topology()
            )));
        }

        if grids.len() != config.property_count {
            return Err(ValidationError::InvalidConfig(format!(
                "expected {} property grids, got {}",
                config.property_count,
                grids.len()
            )));
        }

        for property in grids {
            descriptor.check_grid(&property.grid)?;
        }

        Ok(Self {
            config,
            descriptor,
            grids,
        })
    }

    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Column names of wide tables and profiles; `None` for long grid tables,
    /// whose column legend is part of the header block.
    pub fn column_names(&self) -> Option<Vec<String>> {
        match (&self.descriptor.axes, self.config.shape) {
            (GridAxes::CrossSection { lat, lon, .. }, TableShape::Wide) => {
                let mut names = vec![WIDE_DEPTH_COLUMN.to_string()];
                names.extend((0..lat.len()).map(|i| {
                    format!("({},{})", coord(lat, i), coord(lon, i))
                }));
                Some(names)
            }
            (GridAxes::HorizontalSlice { lon, .. }, TableShape::Wide) => {
                let mut names = vec![WIDE_LAT_COLUMN.to_string()];
                names.extend(lon.points().iter().map(|p| p.to_string()));
                Some(names)
            }
            (GridAxes::Profile { mode, .. }, _) => {
                let mut names = vec![format!("# {}", mode.column_label())];
                names.extend(self.grids.iter().map(|g| self.profile_label(g.kind).to_string()));
                Some(names)
            }
            _ => None,
        }
    }

    /// Unit label of a profile column under the configured scaling.
    pub fn profile_label(&self, kind: PropertyKind) -> &'static str {
        let scaled = self.config.profile_scale.velocity_divisor() != 1.0;
        match (kind, scaled) {
            (PropertyKind::Vp, false) => "Vp(m)",
            (PropertyKind::Vs, false) => "Vs(m)",
            (PropertyKind::Vp, true) => "Vp(km/s)",
            (PropertyKind::Vs, true) => "Vs(km/s)",
            (other, _) => other.combined_label(),
        }
    }

    /// Iterate over the rows in output order.
    pub fn rows(&self) -> RowIter<'_, 'a> {
        let (outer_len, inner_len) = self.loop_extents();
        RowIter {
            flattener: self,
            outer: 0,
            inner: 0,
            outer_len,
            inner_len,
        }
    }

    fn loop_extents(&self) -> (usize, usize) {
        match (&self.descriptor.axes, self.config.shape) {
            (GridAxes::Profile { vertical, .. }, _) => (vertical.len(), 1),
            (GridAxes::CrossSection { depth, lat, .. }, TableShape::Long) => (lat.len(), depth.len()),
            (GridAxes::CrossSection { depth, .. }, TableShape::Wide) => (depth.len(), 1),
            (GridAxes::HorizontalSlice { lat, lon }, TableShape::Long) => (lon.len(), lat.len()),
            (GridAxes::HorizontalSlice { lat, .. }, TableShape::Wide) => (lat.len(), 1),
        }
    }

    /// Build the row at (outer, inner), or `None` if it is suppressed.
    fn build_row(&self, outer: usize, inner: usize) -> Option<Row> {
        let cells = match (&self.descriptor.axes, self.config.shape) {
            (GridAxes::Profile { vertical, .. }, _) => {
                let divisor = self.config.profile_scale.velocity_divisor();
                let mut cells = vec![coord(vertical, outer)];
                cells.extend(self.grids.iter().map(|g| match g.kind {
                    PropertyKind::Vp | PropertyKind::Vs => g.grid.scaled_cell(outer, 0, divisor),
                    _ => g.grid.cell(outer, 0),
                }));
                cells
            }
            (GridAxes::CrossSection { depth, lat, lon }, TableShape::Long) => {
                let mut cells = vec![coord(lon, outer), coord(lat, outer), coord(depth, inner)];
                cells.extend(self.grids.iter().map(|g| g.grid.cell(inner, outer)));
                cells
            }
            (GridAxes::CrossSection { depth, lat, .. }, TableShape::Wide) => {
                let grid = &self.grids[0].grid;
                let mut cells = vec![coord(depth, outer)];
                cells.extend((0..lat.len()).map(|p| grid.cell(outer, p)));
                cells
            }
            (GridAxes::HorizontalSlice { lat, lon }, TableShape::Long) => {
                if self.config.skip_zero && self.grids[0].grid.value(inner, outer) == Some(0.0) {
                    return None;
                }
                let mut cells = vec![coord(lon, outer), coord(lat, inner)];
                cells.extend(self.grids.iter().map(|g| g.grid.cell(inner, outer)));
                cells
            }
            (GridAxes::HorizontalSlice { lat, lon }, TableShape::Wide) => {
                let grid = &self.grids[0].grid;
                let mut cells = vec![coord(lat, outer)];
                cells.extend((0..lon.len()).map(|c| grid.cell(outer, c)));
                cells
            }
        };
        Some(Row::new(cells))
    }
}

fn coord(axis: &Axis, idx: usize) -> CellValue {
    axis.get(idx).cloned().unwrap_or(CellValue::Missing)
}

/// Lazy iterator over the rows of a [`TableFlattener`].
#[derive(Debug)]
pub struct RowIter<'f, 'a> {
    flattener: &'f TableFlattener<'a>,
    outer: usize,
    inner: usize,
    outer_len: usize,
    inner_len: usize,
}

impl Iterator for RowIter<'_, '_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.inner_len == 0 {
            return None;
        }
        while self.outer < self.outer_len {
            let (outer, inner) = (self.outer, self.inner);
            self.inner += 1;
            if self.inner == self.inner_len {
                self.inner = 0;
                self.outer += 1;
            }
            if let Some(row) = self.flattener.build_row(outer, inner) {
                return Some(row);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let done = self.outer * self.inner_len + self.inner;
        let remaining = (self.outer_len * self.inner_len).saturating_sub(done);
        if self.flattener.config.skip_zero {
            (0, Some(remaining))
        } else {
            (remaining, Some(remaining))
        }
    }
}
