//! Coordinate axes of a rectilinear query grid.

use serde_json::Value;

use crate::error::{CvmError, CvmResult};
use crate::value::CellValue;

/// A named, ordered list of coordinate values (depth, latitude, longitude...).
///
/// Coordinates keep the representation they had in the descriptor so that
/// `50` and `50.0` are echoed back exactly as the query tool wrote them.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    name: String,
    points: Vec<CellValue>,
}

impl Axis {
    /// Create an axis from a descriptor JSON list.
    ///
    /// Each element must be a number or a numeric string.
    pub fn from_json(name: impl Into<String>, values: &[Value]) -> CvmResult<Self> {
        let name = name.into();
        let mut points = Vec::with_capacity(values.len());

        for (idx, value) in values.iter().enumerate() {
            let cell = match value {
                Value::Number(_) => CellValue::from_json(value),
                Value::String(s) if s.trim().parse::<f64>().is_ok() => CellValue::Text(s.clone()),
                other => {
                    return Err(CvmError::invalid_field(
                        name.clone(),
                        format!("element {} is not a coordinate: {}", idx, other),
                    ))
                }
            };
            points.push(cell);
        }

        Ok(Self { name, points })
    }

    /// Axis name as used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of coordinate points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the axis has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[CellValue] {
        &self.points
    }

    /// Coordinate at `idx`.
    pub fn get(&self, idx: usize) -> Option<&CellValue> {
        self.points.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_axis_from_json_preserves_representation() {
        let values = vec![json!(0), json!(50.0), json!("100")];
        let axis = Axis::from_json("depth_list", &values).unwrap();

        assert_eq!(axis.len(), 3);
        assert_eq!(axis.get(0).unwrap().to_string(), "0");
        assert_eq!(axis.get(1).unwrap().to_string(), "50.0");
        assert_eq!(axis.get(2).unwrap().to_string(), "100");
        assert_eq!(axis.get(2), Some(&CellValue::Text("100".to_string())));
    }

    #[test]
    fn test_axis_from_json_rejects_non_coordinates() {
        let values = vec![json!(1.0), json!("north")];
        let err = Axis::from_json("lat_list", &values).unwrap_err();
        assert!(matches!(err, CvmError::InvalidField { ref field, .. } if field == "lat_list"));

        let values = vec![json!([1.0])];
        assert!(Axis::from_json("lat_list", &values).is_err());
    }
}
