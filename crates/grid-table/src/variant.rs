//! The conversion tools and the table layout each one produces.

use std::path::{Path, PathBuf};

use cvm_common::NumberFormat;
use serde::{Deserialize, Serialize};

use crate::config::{FlattenConfig, ProfileScale, TableShape, Topology};

/// One of the supported conversions, named after the command that runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionVariant {
    /// Wide cross section, one column per transect position.
    CrossSection,
    /// Long cross section, one row per grid point.
    CrossSectionLine,
    /// Long cross section of vp, vs and density.
    CrossSectionAll,
    /// Wide horizontal slice, one column per longitude.
    HorizontalSlice,
    /// Long horizontal slice, zero-valued points dropped.
    HorizontalSliceLine,
    /// Long horizontal slice of vp, vs and density.
    HorizontalSliceAll,
    /// Vertical profile in native units.
    VerticalProfile,
    /// Vertical profile with velocities in km/s.
    Ucvm1d,
}

impl ConversionVariant {
    pub const ALL: [ConversionVariant; 8] = [
        Self::CrossSection,
        Self::CrossSectionLine,
        Self::CrossSectionAll,
        Self::HorizontalSlice,
        Self::HorizontalSliceLine,
        Self::HorizontalSliceAll,
        Self::VerticalProfile,
        Self::Ucvm1d,
    ];

    /// Name of the command-line tool.
    pub fn binary_name(&self) -> &'static str {
        match self {
            Self::CrossSection => "ucvm-cross-section2csv",
            Self::CrossSectionLine => "ucvm-cross-section2csv-line",
            Self::CrossSectionAll => "ucvm-cross-section2csv-all",
            Self::HorizontalSlice => "ucvm-horizontal-slice2csv",
            Self::HorizontalSliceLine => "ucvm-horizontal-slice2csv-line",
            Self::HorizontalSliceAll => "ucvm-horizontal-slice2csv-all",
            Self::VerticalProfile => "ucvm-vertical-profile2csv",
            Self::Ucvm1d => "ucvm1d2csv",
        }
    }

    /// Look a variant up by tool name.
    pub fn from_binary_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.binary_name() == name)
    }

    pub fn topology(&self) -> Topology {
        match self {
            Self::CrossSection | Self::CrossSectionLine | Self::CrossSectionAll => Topology::CrossSection,
            Self::HorizontalSlice | Self::HorizontalSliceLine | Self::HorizontalSliceAll => {
                Topology::HorizontalSlice
            }
            Self::VerticalProfile | Self::Ucvm1d => Topology::Profile,
        }
    }

    /// Whether the variant combines vp, vs and density query results.
    pub fn is_triple(&self) -> bool {
        matches!(self, Self::CrossSectionAll | Self::HorizontalSliceAll)
    }

    /// Number of (data, descriptor) pairs on the command line.
    pub fn pair_count(&self) -> usize {
        if self.is_triple() {
            3
        } else {
            1
        }
    }

    /// Number of file arguments.
    pub fn input_count(&self) -> usize {
        self.pair_count() * 2
    }

    /// Whether a CSV column-name row precedes the data rows.
    pub fn emits_column_names(&self) -> bool {
        matches!(
            self,
            Self::CrossSection | Self::HorizontalSlice | Self::VerticalProfile
        )
    }

    pub fn flatten_config(&self) -> FlattenConfig {
        let property_count = match self.topology() {
            Topology::Profile => 3,
            _ => self.pair_count(),
        };
        let shape = match self {
            Self::CrossSection | Self::HorizontalSlice => TableShape::Wide,
            _ => TableShape::Long,
        };
        let number_format = match self {
            Self::CrossSection | Self::HorizontalSlice | Self::Ucvm1d => NumberFormat::four_decimals(),
            _ => NumberFormat::Shortest,
        };
        let profile_scale = match self {
            Self::Ucvm1d => ProfileScale::KilometersPerSecond,
            _ => ProfileScale::Native,
        };

        FlattenConfig {
            topology: self.topology(),
            property_count,
            shape,
            skip_zero: *self == Self::HorizontalSliceLine,
            number_format,
            profile_scale,
        }
    }

    /// Usage line for the tool.
    pub fn usage(&self) -> String {
        match self {
            Self::CrossSectionAll | Self::HorizontalSliceAll => format!(
                "{} vp_data.bin vp_meta.json vs_data.bin vs_meta.json density_data.bin density_meta.json",
                self.binary_name()
            ),
            Self::VerticalProfile | Self::Ucvm1d => {
                format!("{} matprops.json meta.json", self.binary_name())
            }
            _ => format!("{} data.bin meta.json", self.binary_name()),
        }
    }

    /// Output path derived from the first data file.
    ///
    /// The output lands next to the data file. If the expected marker is not
    /// in the file name, the extension is replaced with `.csv` instead.
    pub fn output_path(&self, data: &Path) -> PathBuf {
        let name = data.file_name().and_then(|n| n.to_str());
        let derived = name.and_then(|name| match self {
            Self::CrossSectionAll | Self::HorizontalSliceAll => name
                .contains("vp_data.bin")
                .then(|| name.replace("vp_data.bin", "all_data.csv")),
            Self::VerticalProfile => {
                name.contains(".json").then(|| name.replace(".json", ".csv"))
            }
            Self::Ucvm1d => {
                let mut parts = name.split('_');
                match (parts.next(), parts.next()) {
                    (Some(first), Some(second)) => Some(format!("{}{}.csv", first, second)),
                    _ => None,
                }
            }
            _ => name.contains(".bin").then(|| name.replace(".bin", ".csv")),
        });

        match derived {
            Some(file_name) => data.with_file_name(file_name),
            None => data.with_extension("csv"),
        }
    }
}

impl std::fmt::Display for ConversionVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary_name())
    }
}
