//! Flattening configuration.

use cvm_common::NumberFormat;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Spatial arrangement of a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// 1-D samples along depth or elevation at one location.
    Profile,
    /// 2-D grid over (depth, position along a transect).
    CrossSection,
    /// 2-D grid over (latitude, longitude) at one depth.
    HorizontalSlice,
}

impl Topology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::CrossSection => "cross_section",
            Self::HorizontalSlice => "horizontal_slice",
        }
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Row layout of the emitted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    /// One row per grid point with its coordinates repeated.
    #[default]
    Long,
    /// One row per outer coordinate, one column per inner coordinate.
    Wide,
}

/// Units of profile velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileScale {
    /// Values as stored (m/s).
    #[default]
    Native,
    /// vp and vs divided by 1000 (km/s).
    KilometersPerSecond,
}

impl ProfileScale {
    /// Divisor applied to velocity samples.
    pub fn velocity_divisor(&self) -> f64 {
        match self {
            Self::Native => 1.0,
            Self::KilometersPerSecond => 1000.0,
        }
    }
}

/// How a validated grid is turned into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenConfig {
    pub topology: Topology,

    /// Number of parallel property grids (1, or 3 for vp/vs/density).
    pub property_count: usize,

    pub shape: TableShape,

    /// Drop rows whose value is exactly 0.0.
    pub skip_zero: bool,

    pub number_format: NumberFormat,

    pub profile_scale: ProfileScale,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            topology: Topology::CrossSection,
            property_count: 1,
            shape: TableShape::Long,
            skip_zero: false,
            number_format: NumberFormat::Shortest,
            profile_scale: ProfileScale::Native,
        }
    }
}

impl FlattenConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.property_count != 1 && self.property_count != 3 {
            return Err(ValidationError::InvalidConfig(format!(
                "property_count must be 1 or 3, got {}",
                self.property_count
            )));
        }

        if self.shape == TableShape::Wide {
            if self.topology == Topology::Profile {
                return Err(ValidationError::InvalidConfig(
                    "profiles have no wide form".to_string(),
                ));
            }
            if self.property_count != 1 {
                return Err(ValidationError::InvalidConfig(
                    "wide tables hold a single property".to_string(),
                ));
            }
        }

        if self.skip_zero
            && (self.topology != Topology::HorizontalSlice
                || self.shape != TableShape::Long
                || self.property_count != 1)
        {
            return Err(ValidationError::InvalidConfig(
                "skip_zero applies only to single-property long horizontal slices".to_string(),
            ));
        }

        if self.profile_scale != ProfileScale::Native && self.topology != Topology::Profile {
            return Err(ValidationError::InvalidConfig(
                "profile_scale applies only to profiles".to_string(),
            ));
        }

        Ok(())
    }
}
