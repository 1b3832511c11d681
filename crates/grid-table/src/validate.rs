//! Grid descriptors: the axes of a query result, checked against each other
//! and against the loaded data before anything is written.

use cvm_common::{Axis, ProfileMode, PropertyKind, QueryDescriptor};
use serde_json::Value;
use tracing::warn;

use crate::config::Topology;
use crate::error::ValidationError;
use crate::types::NumericGrid;

/// Coordinate axes of a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum GridAxes {
    Profile {
        vertical: Axis,
        mode: ProfileMode,
    },
    /// `lat` and `lon` are parallel: position `i` is `(lat[i], lon[i])`.
    CrossSection { depth: Axis, lat: Axis, lon: Axis },
    HorizontalSlice { lat: Axis, lon: Axis },
}

/// Validated view of a descriptor for one topology.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDescriptor {
    pub axes: GridAxes,
    pub declared_points: usize,
    /// Kind of a single-property grid. Profiles always carry vp, vs and
    /// density, so theirs is only checked when the descriptor names one.
    pub property: Option<PropertyKind>,
}

impl GridDescriptor {
    /// Extract and cross-check the axes `topology` needs.
    ///
    /// Checks run in order: property kind, parallel axes, declared point count.
    pub fn from_query(topology: Topology, query: &QueryDescriptor) -> Result<Self, ValidationError> {
        let property = match (topology, &query.data_type) {
            (Topology::Profile, None) => None,
            _ => Some(query.property_kind()?),
        };

        let (axes, declared_points) = match topology {
            Topology::Profile => {
                let mode = query.profile_mode();
                let vertical = query.profile_axis()?;
                // Profiles carry no point count; the axis is the declaration.
                let declared = vertical.len();
                (GridAxes::Profile { vertical, mode }, declared)
            }
            Topology::CrossSection => {
                let lat = query.axis("lat_list")?;
                let lon = query.axis("lon_list")?;
                if lat.len() != lon.len() {
                    return Err(axis_mismatch(&lat, &lon));
                }
                let depth = query.axis("depth_list")?;
                let declared = query.declared_point_count()?;
                check_declared(declared, depth.len() * lat.len(), "depth_list x lat_list")?;
                warn_on_num_xy(query, declared);
                (GridAxes::CrossSection { depth, lat, lon }, declared)
            }
            Topology::HorizontalSlice => {
                let lat = query.axis("lat_list")?;
                let lon = query.axis("lon_list")?;
                let declared = query.declared_point_count()?;
                check_declared(declared, lat.len() * lon.len(), "lat_list x lon_list")?;
                warn_on_num_xy(query, declared);
                (GridAxes::HorizontalSlice { lat, lon }, declared)
            }
        };

        Ok(Self {
            axes,
            declared_points,
            property,
        })
    }

    /// Property kind of a single-property grid.
    pub fn grid_property(&self) -> Result<PropertyKind, ValidationError> {
        self.property
            .ok_or_else(|| ValidationError::MissingField("data_type".to_string()))
    }

    pub fn topology(&self) -> Topology {
        match self.axes {
            GridAxes::Profile { .. } => Topology::Profile,
            GridAxes::CrossSection { .. } => Topology::CrossSection,
            GridAxes::HorizontalSlice { .. } => Topology::HorizontalSlice,
        }
    }

    /// Expected (rows, cols) of the data grid.
    ///
    /// Cross sections are stored depth-major, horizontal slices
    /// latitude-major, profiles as a single column.
    pub fn expected_shape(&self) -> (usize, usize) {
        match &self.axes {
            GridAxes::Profile { vertical, .. } => (vertical.len(), 1),
            GridAxes::CrossSection { depth, lat, .. } => (depth.len(), lat.len()),
            GridAxes::HorizontalSlice { lat, lon } => (lat.len(), lon.len()),
        }
    }

    /// Check a loaded grid against the declared point count and the axes.
    pub fn check_grid(&self, grid: &NumericGrid) -> Result<(), ValidationError> {
        check_declared(self.declared_points, grid.len(), "data array")?;

        let (rows, cols) = self.expected_shape();
        if grid.rows() != rows || grid.cols() != cols {
            return Err(ValidationError::ShapeMismatch {
                expected_rows: rows,
                expected_cols: cols,
                actual: grid.shape().to_vec(),
            });
        }
        Ok(())
    }
}

fn axis_mismatch(first: &Axis, second: &Axis) -> ValidationError {
    ValidationError::AxisLengthMismatch {
        first: first.name().to_string(),
        first_len: first.len(),
        second: second.name().to_string(),
        second_len: second.len(),
    }
}

fn check_declared(declared: usize, actual: usize, against: &str) -> Result<(), ValidationError> {
    if declared != actual {
        return Err(ValidationError::PointCountMismatch {
            declared,
            actual,
            against: against.to_string(),
        });
    }
    Ok(())
}

/// `num_x * num_y` is informational; a disagreement is logged, not fatal.
fn warn_on_num_xy(query: &QueryDescriptor, declared: usize) {
    let as_count = |key: &str| match query.fields.get(key) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    if let (Some(x), Some(y)) = (as_count("num_x"), as_count("num_y")) {
        if x.checked_mul(y) != Some(declared as u64) {
            warn!(
                num_x = x,
                num_y = y,
                datapoints = declared,
                "num_x * num_y does not match datapoints"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cross_section(depths: Value, lats: Value, lons: Value, datapoints: Value) -> QueryDescriptor {
        serde_json::from_value(json!({
            "cvm": "cvmsi",
            "data_type": "vs",
            "depth_list": depths,
            "lat_list": lats,
            "lon_list": lons,
            "datapoints": datapoints,
        }))
        .unwrap()
    }

    #[test]
    fn test_cross_section_descriptor() {
        let query = cross_section(json!([0, 100]), json!([34.0, 34.1]), json!([-118.0, -118.1]), json!(4));
        let desc = GridDescriptor::from_query(Topology::CrossSection, &query).unwrap();

        assert_eq!(desc.topology(), Topology::CrossSection);
        assert_eq!(desc.property, Some(PropertyKind::Vs));
        assert_eq!(desc.grid_property().unwrap(), PropertyKind::Vs);
        assert_eq!(desc.expected_shape(), (2, 2));

        let grid = NumericGrid::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert!(desc.check_grid(&grid).is_ok());
    }

    #[test]
    fn test_parallel_axes_must_match() {
        let query = cross_section(json!([0]), json!([34.0, 34.1, 34.2]), json!([-118.0, -118.1]), json!(3));
        let err = GridDescriptor::from_query(Topology::CrossSection, &query).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::AxisLengthMismatch { first_len: 3, second_len: 2, .. }
        ));
    }

    #[test]
    fn test_declared_points_against_axes() {
        let query = cross_section(json!([0, 100]), json!([34.0]), json!([-118.0]), json!(5));
        let err = GridDescriptor::from_query(Topology::CrossSection, &query).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::PointCountMismatch { declared: 5, actual: 2, .. }
        ));
    }

    #[test]
    fn test_declared_points_against_grid() {
        let query = cross_section(json!([0, 100]), json!([34.0, 34.1]), json!([-118.0, -118.1]), json!(4));
        let desc = GridDescriptor::from_query(Topology::CrossSection, &query).unwrap();

        let short = NumericGrid::from_rows(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(matches!(
            desc.check_grid(&short),
            Err(ValidationError::PointCountMismatch { declared: 4, actual: 3, .. })
        ));

        let transposed = NumericGrid::from_rows(&[vec![1.0], vec![2.0], vec![3.0], vec![4.0]]).unwrap();
        assert!(matches!(
            desc.check_grid(&transposed),
            Err(ValidationError::ShapeMismatch { expected_rows: 2, expected_cols: 2, .. })
        ));
    }

    #[test]
    fn test_horizontal_slice_axes_may_differ() {
        let query: QueryDescriptor = serde_json::from_value(json!({
            "cvm": "cvmsi",
            "data_type": "vp",
            "depth": 0,
            "lat_list": [34.0, 34.1],
            "lon_list": [-118.0, -118.1, -118.2],
            "datapoints": 6,
            "num_x": 3,
            "num_y": 3,
        }))
        .unwrap();
        let desc = GridDescriptor::from_query(Topology::HorizontalSlice, &query).unwrap();
        assert_eq!(desc.expected_shape(), (2, 3));
    }

    #[test]
    fn test_unknown_property_checked_first() {
        let query: QueryDescriptor = serde_json::from_value(json!({
            "cvm": "cvmsi",
            "data_type": "unknown_type",
        }))
        .unwrap();
        assert!(matches!(
            GridDescriptor::from_query(Topology::CrossSection, &query),
            Err(ValidationError::UnknownPropertyKind(ref k)) if k == "unknown_type"
        ));
    }

    #[test]
    fn test_data_type_required_only_for_grids() {
        let profile: QueryDescriptor = serde_json::from_value(json!({
            "cvm": "cvmh",
            "starting_depth": 0,
            "depth": [0, 50],
        }))
        .unwrap();
        let desc = GridDescriptor::from_query(Topology::Profile, &profile).unwrap();
        assert_eq!(desc.property, None);
        assert!(matches!(desc.grid_property(), Err(ValidationError::MissingField(_))));

        let slice: QueryDescriptor = serde_json::from_value(json!({
            "cvm": "cvmsi",
            "lat_list": [34.0],
            "lon_list": [-118.0],
            "datapoints": 1,
        }))
        .unwrap();
        assert!(matches!(
            GridDescriptor::from_query(Topology::HorizontalSlice, &slice),
            Err(ValidationError::MissingField(ref k)) if k == "data_type"
        ));
    }

    #[test]
    fn test_profile_declares_its_axis_length() {
        let query: QueryDescriptor = serde_json::from_value(json!({
            "cvm": "cvmh",
            "data_type": "vs",
            "starting_depth": 0,
            "depth": [0, 50, 100],
        }))
        .unwrap();
        let desc = GridDescriptor::from_query(Topology::Profile, &query).unwrap();
        assert_eq!(desc.declared_points, 3);

        let grid = NumericGrid::column(vec![1.0, 2.0], crate::types::ElementType::Float64);
        assert!(matches!(
            desc.check_grid(&grid),
            Err(ValidationError::PointCountMismatch { declared: 3, actual: 2, .. })
        ));
    }
}
