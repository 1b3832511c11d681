//! Temporary directories and fixture file writers.

use std::path::{Path, PathBuf};

use npyz::WriterBuilder;

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Writes a 2-D float64 `.npy` file to `dir/name` and returns its path.
pub fn write_npy(dir: &Path, name: &str, rows: &[Vec<f64>]) -> PathBuf {
    let cols = rows.first().map(|r| r.len()).unwrap_or(0);
    assert!(rows.iter().all(|r| r.len() == cols), "Rows must not be ragged");
    let shape = [rows.len() as u64, cols as u64];
    write_array(dir, name, &shape, rows.iter().flatten().copied())
}

/// Writes a float32 `.npy` file of the given shape to `dir/name`.
pub fn write_npy_f32(dir: &Path, name: &str, shape: &[u64], values: &[f32]) -> PathBuf {
    write_array(dir, name, shape, values.iter().copied())
}

fn write_array<T, I>(dir: &Path, name: &str, shape: &[u64], values: I) -> PathBuf
where
    T: npyz::AutoSerialize,
    I: IntoIterator<Item = T>,
{
    let mut buf = Vec::new();
    let mut writer = npyz::WriteOptions::<T>::new()
        .default_dtype()
        .shape(shape)
        .writer(&mut buf)
        .begin_nd()
        .expect("Failed to start .npy fixture");
    for value in values {
        writer.push(&value).expect("Failed to encode .npy fixture");
    }
    writer.finish().expect("Failed to finish .npy fixture");

    let path = dir.join(name);
    std::fs::write(&path, buf).expect("Failed to write .npy fixture");
    path
}

/// Writes a JSON fixture to `dir/name` and returns its path.
pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(value).expect("Fixture must serialize");
    std::fs::write(&path, text).expect("Failed to write JSON fixture");
    path
}
