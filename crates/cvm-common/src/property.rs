//! Physical properties carried by velocity-model query results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CvmError;

/// Kind of property stored in one query result (`data_type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// P-wave velocity.
    Vp,
    /// S-wave velocity.
    Vs,
    Density,
    Poisson,
}

impl PropertyKind {
    /// The three properties of a combined (vp, vs, density) conversion, in
    /// argument order.
    pub const TRIPLE: [PropertyKind; 3] = [PropertyKind::Vp, PropertyKind::Vs, PropertyKind::Density];

    /// Descriptor spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vp => "vp",
            Self::Vs => "vs",
            Self::Density => "density",
            Self::Poisson => "poisson",
        }
    }

    /// Column label used by single-property tables.
    ///
    /// The misspelling of the Poisson label is what existing consumers parse.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Vp => "Vp(km/s)",
            Self::Vs => "Vs(km/s)",
            Self::Density => "Density(kg/m^3)",
            Self::Poisson => "PoissionRatio",
        }
    }

    /// Column label used by the combined three-property tables, independent
    /// of what any descriptor says.
    pub fn combined_label(&self) -> &'static str {
        match self {
            Self::Vp => "Vp(m/s)",
            Self::Vs => "Vs(m/s)",
            Self::Density => "Density(kg/m^3)",
            Self::Poisson => "PoissionRatio",
        }
    }
}

impl FromStr for PropertyKind {
    type Err = CvmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vp" => Ok(Self::Vp),
            "vs" => Ok(Self::Vs),
            "density" => Ok(Self::Density),
            "poisson" => Ok(Self::Poisson),
            other => Err(CvmError::UnknownPropertyKind(other.to_string())),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("vp".parse::<PropertyKind>().unwrap(), PropertyKind::Vp);
        assert_eq!("vs".parse::<PropertyKind>().unwrap(), PropertyKind::Vs);
        assert_eq!("density".parse::<PropertyKind>().unwrap(), PropertyKind::Density);
        assert_eq!("poisson".parse::<PropertyKind>().unwrap(), PropertyKind::Poisson);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "unknown_type".parse::<PropertyKind>().unwrap_err();
        assert!(matches!(err, CvmError::UnknownPropertyKind(ref k) if k == "unknown_type"));
        // Matching is exact
        assert!("VP".parse::<PropertyKind>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PropertyKind::Vp.display_label(), "Vp(km/s)");
        assert_eq!(PropertyKind::Vp.combined_label(), "Vp(m/s)");
        assert_eq!(PropertyKind::Poisson.display_label(), "PoissionRatio");
        assert_eq!(PropertyKind::Density.to_string(), "density");
    }
}
