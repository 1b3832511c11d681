//! Query descriptor (the `*_meta.json` file written next to each result).
//!
//! Only the fields that drive conversion are typed; everything else the
//! query tool writes (`color`, `outfile`, `installdir`, statistics...) is
//! retained as-is so header lines can quote it back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{CvmError, CvmResult};
use crate::grid::Axis;
use crate::property::PropertyKind;
use crate::value::python_str;

/// `depth` is a single level for horizontal slices and a list of samples
/// for depth-mode vertical profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepthField {
    Samples(Vec<Value>),
    Level(Value),
}

/// Descriptor of one query result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Model abbreviation.
    pub cvm: String,
    /// Property kind as written by the query tool (`vp`, `vs`, ...).
    /// Profile descriptors may omit it.
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub datapoints: Option<Value>,
    #[serde(default)]
    pub depth_list: Option<Vec<Value>>,
    #[serde(default)]
    pub lat_list: Option<Vec<Value>>,
    #[serde(default)]
    pub lon_list: Option<Vec<Value>>,
    #[serde(default)]
    pub depth: Option<DepthField>,
    #[serde(default)]
    pub elevation: Option<Vec<Value>>,
    #[serde(default)]
    pub comment: Option<String>,
    /// All remaining descriptor keys.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl QueryDescriptor {
    /// Parse a descriptor from JSON text.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Validated property kind.
    pub fn property_kind(&self) -> CvmResult<PropertyKind> {
        self.data_type
            .as_deref()
            .ok_or_else(|| CvmError::MissingField("data_type".to_string()))?
            .parse()
    }

    /// Text of a scalar descriptor field, rendered as the query tool's
    /// Python tooling would print it.
    pub fn text(&self, key: &str) -> CvmResult<String> {
        let missing = || CvmError::MissingField(key.to_string());
        match key {
            "cvm" => Ok(self.cvm.clone()),
            "data_type" => self.data_type.clone().ok_or_else(missing),
            "comment" => self.comment.clone().ok_or_else(missing),
            "datapoints" => self.datapoints.as_ref().map(python_str).ok_or_else(missing),
            "depth" => match &self.depth {
                Some(DepthField::Level(v)) => Ok(python_str(v)),
                Some(DepthField::Samples(v)) => Ok(python_str(&Value::Array(v.clone()))),
                None => Err(missing()),
            },
            other => self.fields.get(other).map(python_str).ok_or_else(missing),
        }
    }

    /// Declared total number of grid points (`datapoints`).
    pub fn declared_point_count(&self) -> CvmResult<usize> {
        let value = self
            .datapoints
            .as_ref()
            .ok_or_else(|| CvmError::MissingField("datapoints".to_string()))?;

        let count = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        count
            .map(|c| c as usize)
            .ok_or_else(|| CvmError::invalid_field("datapoints", format!("not a point count: {}", value)))
    }

    /// Coordinate axis stored under a list-valued key.
    pub fn axis(&self, key: &str) -> CvmResult<Axis> {
        let values = match key {
            "depth_list" => self.depth_list.as_deref(),
            "lat_list" => self.lat_list.as_deref(),
            "lon_list" => self.lon_list.as_deref(),
            "elevation" => self.elevation.as_deref(),
            "depth" => match &self.depth {
                Some(DepthField::Samples(v)) => Some(v.as_slice()),
                Some(DepthField::Level(_)) => {
                    return Err(CvmError::invalid_field("depth", "expected a list of samples"))
                }
                None => None,
            },
            other => match self.fields.get(other) {
                Some(Value::Array(v)) => Some(v.as_slice()),
                Some(_) => return Err(CvmError::invalid_field(other, "expected a list")),
                None => None,
            },
        };

        let values = values.ok_or_else(|| CvmError::MissingField(key.to_string()))?;
        Axis::from_json(key, values)
    }

    /// Vertical sampling mode of a profile descriptor.
    pub fn profile_mode(&self) -> ProfileMode {
        if self.fields.contains_key("starting_depth") {
            ProfileMode::Depth
        } else {
            ProfileMode::Elevation
        }
    }

    /// Vertical axis of a profile descriptor, in its sampling mode.
    pub fn profile_axis(&self) -> CvmResult<Axis> {
        self.axis(self.profile_mode().axis_key())
    }
}

/// Whether a vertical profile is sampled by depth or by elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMode {
    Depth,
    Elevation,
}

impl ProfileMode {
    /// Descriptor key holding the sample coordinates.
    pub fn axis_key(&self) -> &'static str {
        match self {
            Self::Depth => "depth",
            Self::Elevation => "elevation",
        }
    }

    /// Descriptor key of the first sample coordinate.
    pub fn start_key(&self) -> &'static str {
        match self {
            Self::Depth => "starting_depth",
            Self::Elevation => "starting_elevation",
        }
    }

    /// Descriptor key of the last sample coordinate.
    pub fn end_key(&self) -> &'static str {
        match self {
            Self::Depth => "ending_depth",
            Self::Elevation => "ending_elevation",
        }
    }

    /// Column label of the vertical coordinate.
    pub fn column_label(&self) -> &'static str {
        match self {
            Self::Depth => "Depth(m)",
            Self::Elevation => "Elevation(m)",
        }
    }

    /// Header key prefix (`Start_depth(m)` / `Start_elevation(m)`).
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Depth => "depth",
            Self::Elevation => "elevation",
        }
    }
}
