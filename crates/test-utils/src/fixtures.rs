//! Descriptor and profile fixtures shaped like real query tool output.

use serde_json::{json, Value};

/// Descriptor of a cross section along parallel `lats`/`lons`.
///
/// `datapoints` is set to `depths.len() * lats.len()`.
pub fn cross_section_meta(data_type: &str, depths: &[f64], lats: &[f64], lons: &[f64]) -> Value {
    json!({
        "cvm": "cvmsi",
        "data_type": data_type,
        "title": "cvmsi Cross Section",
        "color": "sd",
        "starting_depth": depths.first().copied().unwrap_or(0.0),
        "ending_depth": depths.last().copied().unwrap_or(0.0),
        "vertical_spacing": 50,
        "horizontal_spacing": 1000,
        "num_x": lats.len(),
        "num_y": depths.len(),
        "datapoints": depths.len() * lats.len(),
        "min": 0.5,
        "max": 4.5,
        "mean": 2.5,
        "lat1": lats.first().copied().unwrap_or(0.0),
        "lon1": lons.first().copied().unwrap_or(0.0),
        "lat2": lats.last().copied().unwrap_or(0.0),
        "lon2": lons.last().copied().unwrap_or(0.0),
        "depth_list": depths,
        "lat_list": lats,
        "lon_list": lons,
    })
}

/// Descriptor of a horizontal slice over `lats` x `lons`.
pub fn horizontal_slice_meta(data_type: &str, lats: &[f64], lons: &[f64]) -> Value {
    json!({
        "cvm": "cvmsi",
        "data_type": data_type,
        "title": "cvmsi Horizontal Slice",
        "depth": 1000,
        "spacing": 0.01,
        "num_x": lons.len(),
        "num_y": lats.len(),
        "datapoints": lats.len() * lons.len(),
        "min": 0.5,
        "max": 4.5,
        "mean": 2.5,
        "lat1": lats.first().copied().unwrap_or(0.0),
        "lon1": lons.first().copied().unwrap_or(0.0),
        "lat2": lats.last().copied().unwrap_or(0.0),
        "lon2": lons.last().copied().unwrap_or(0.0),
        "lat_list": lats,
        "lon_list": lons,
    })
}

/// Depth-mode vertical profile descriptor.
pub fn profile_meta(depths: &[i64]) -> Value {
    json!({
        "cvm": "cvmh",
        "data_type": "vs",
        "comment": "CVM-H v15.1",
        "lat1": 34.0,
        "lon1": -118.0,
        "starting_depth": depths.first().copied().unwrap_or(0),
        "ending_depth": depths.last().copied().unwrap_or(0),
        "vertical_spacing": 50,
        "depth": depths,
    })
}

/// Elevation-mode vertical profile descriptor.
///
/// Profile tools do not always record `data_type`, so none is set here.
pub fn elevation_profile_meta(elevations: &[i64]) -> Value {
    json!({
        "cvm": "cvmh",
        "comment": "CVM-H v15.1",
        "lat1": 34.0,
        "lon1": -118.0,
        "starting_elevation": elevations.first().copied().unwrap_or(0),
        "ending_elevation": elevations.last().copied().unwrap_or(0),
        "vertical_spacing": 50,
        "elevation": elevations,
    })
}

/// Profile data file with one `{vp, vs, density}` record per sample.
pub fn profile_matprops(samples: &[(f64, f64, f64)]) -> Value {
    let records: Vec<Value> = samples
        .iter()
        .map(|(vp, vs, density)| json!({"vp": vp, "vs": vs, "density": density}))
        .collect();
    json!({ "matprops": records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_section_point_count() {
        let meta = cross_section_meta("vp", &[0.0, 50.0, 100.0], &[34.0, 34.1], &[-118.0, -118.1]);
        assert_eq!(meta["datapoints"], 6);
        assert_eq!(meta["lat2"], 34.1);
    }

    #[test]
    fn test_elevation_profile_has_no_depth_keys() {
        let meta = elevation_profile_meta(&[0, -50]);
        assert_eq!(meta["ending_elevation"], -50);
        assert!(meta.get("starting_depth").is_none());
        assert!(meta.get("data_type").is_none());
    }

    #[test]
    fn test_profile_matprops_records() {
        let data = profile_matprops(&[(1500.0, 500.0, 2000.0)]);
        assert_eq!(data["matprops"][0]["vs"], 500.0);
    }
}
