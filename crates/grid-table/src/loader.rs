//! Loading of descriptors and data files.

use std::path::Path;

use cvm_common::{PropertyKind, QueryDescriptor};
use npy_parser::NpyError;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, TableError};
use crate::types::{ElementType, NumericGrid, PropertyGrid};

/// Read and parse a query descriptor.
pub fn load_descriptor(path: &Path) -> Result<QueryDescriptor> {
    let text = std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    let descriptor = QueryDescriptor::from_json_str(&text)
        .map_err(|e| TableError::parse(path, format!("invalid descriptor: {}", e)))?;

    debug!(
        path = %path.display(),
        cvm = %descriptor.cvm,
        data_type = ?descriptor.data_type,
        "Loaded descriptor"
    );
    Ok(descriptor)
}

/// Read a binary (.npy) property grid.
pub fn load_grid(path: &Path) -> Result<NumericGrid> {
    let array = npy_parser::read_npy(path).map_err(|e| match e {
        NpyError::IoError(source) => TableError::io(path, source),
        source => TableError::Array {
            path: path.to_path_buf(),
            source,
        },
    })?;

    debug!(path = %path.display(), shape = ?array.shape(), "Loaded grid");
    Ok(array.into())
}

#[derive(Deserialize)]
struct MatProps {
    matprops: Vec<Map<String, Value>>,
}

/// Read a profile data file: a JSON object whose `matprops` list holds one
/// `{vp, vs, density}` record per vertical sample.
///
/// Returns one column grid per property, in vp, vs, density order.
pub fn load_profile_samples(path: &Path) -> Result<Vec<PropertyGrid>> {
    let text = std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    let parsed: MatProps = serde_json::from_str(&text)
        .map_err(|e| TableError::parse(path, format!("invalid profile data: {}", e)))?;

    let grids = PropertyKind::TRIPLE
        .iter()
        .map(|kind| property_column(path, &parsed.matprops, *kind))
        .collect::<Result<Vec<_>>>()?;

    debug!(path = %path.display(), samples = parsed.matprops.len(), "Loaded profile samples");
    Ok(grids)
}

fn property_column(
    path: &Path,
    records: &[Map<String, Value>],
    kind: PropertyKind,
) -> Result<PropertyGrid> {
    let mut values = Vec::with_capacity(records.len());
    let mut all_integers = true;

    for (idx, record) in records.iter().enumerate() {
        let number = match record.get(kind.as_str()) {
            Some(Value::Number(n)) => n,
            Some(other) => {
                return Err(TableError::parse(
                    path,
                    format!("sample {} has non-numeric {}: {}", idx, kind, other),
                ))
            }
            None => {
                return Err(TableError::parse(
                    path,
                    format!("sample {} has no {}", idx, kind),
                ))
            }
        };
        all_integers &= number.is_i64();
        values.push(number.as_f64().unwrap_or(f64::NAN));
    }

    let element = if all_integers && !values.is_empty() {
        ElementType::Integer
    } else {
        ElementType::Float64
    };
    Ok(PropertyGrid::new(kind, NumericGrid::column(values, element)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvm_common::CellValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_profile_columns_keep_integer_type() {
        let file = write_temp(
            r#"{"matprops": [
                {"vp": 1500, "vs": 500, "density": 2000.5},
                {"vp": 1600, "vs": 550, "density": 2100}
            ]}"#,
        );
        let grids = load_profile_samples(file.path()).unwrap();

        assert_eq!(grids.len(), 3);
        assert_eq!(grids[0].kind, PropertyKind::Vp);
        assert_eq!(grids[0].grid.element(), ElementType::Integer);
        assert_eq!(grids[0].grid.cell(1, 0), CellValue::Integer(1600));
        assert_eq!(grids[2].grid.element(), ElementType::Float64);
        assert_eq!(grids[2].grid.cell(1, 0).to_string(), "2100.0");
    }

    #[test]
    fn test_profile_missing_property() {
        let file = write_temp(r#"{"matprops": [{"vp": 1500, "vs": 500}]}"#);
        let err = load_profile_samples(file.path()).unwrap_err();
        assert!(matches!(err, TableError::Parse { .. }));
    }

    #[test]
    fn test_profile_not_json() {
        let file = write_temp("vp,vs,density\n1,2,3\n");
        assert!(matches!(
            load_profile_samples(file.path()),
            Err(TableError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_files_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        assert!(matches!(load_grid(&path), Err(TableError::Io { .. })));
        assert!(matches!(load_descriptor(&path), Err(TableError::Io { .. })));
    }

    #[test]
    fn test_descriptor_without_data_type() {
        let file = write_temp(r#"{"cvm": "cvmh"}"#);
        assert!(matches!(
            load_descriptor(file.path()),
            Err(TableError::Parse { .. })
        ));
    }
}
