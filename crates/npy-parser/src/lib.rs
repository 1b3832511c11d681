//! Reader for dense floating point arrays stored in the NumPy `.npy` format.
//!
//! Velocity-model cross sections and horizontal slices are exported by the
//! query tooling with `numpy.save`, so the array shape travels in the file
//! header and callers do not need to supply strides. Header decoding is done
//! by [`npyz`]; this crate narrows the result to what the converters accept.
//!
//! Only 32-bit and 64-bit floats with at most two dimensions are accepted.
//! Fortran-ordered arrays are transposed on load so [`NpyArray::data`] is
//! always row-major.

pub mod error;

use npyz::{DType, NpyFile, Order};
use std::path::Path;
use tracing::debug;

pub use error::{NpyError, NpyResult};

/// Element type of the stored array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    Float32,
    Float64,
}

impl Dtype {
    /// Size of one element in bytes.
    pub fn item_size(&self) -> usize {
        match self {
            Dtype::Float32 => 4,
            Dtype::Float64 => 8,
        }
    }
}

/// A dense array of floating point values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct NpyArray {
    shape: Vec<usize>,
    dtype: Dtype,
    data: Vec<f64>,
}

impl NpyArray {
    /// Create an array from row-major values.
    pub fn new(shape: Vec<usize>, dtype: Dtype, data: Vec<f64>) -> NpyResult<Self> {
        if shape.len() > 2 {
            return Err(NpyError::UnsupportedShape(
                shape.iter().map(|d| *d as u64).collect(),
            ));
        }
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(NpyError::InvalidHeader(format!(
                "shape {:?} needs {} values, got {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, dtype, data })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Element type as stored on disk.
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major values, widened to f64.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}

/// Read a .npy file.
///
/// The file is read fully and closed before decoding starts.
pub fn read_npy<P: AsRef<Path>>(path: P) -> NpyResult<NpyArray> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "Read .npy file");
    parse_npy(&data)
}

/// Decode an in-memory .npy buffer.
pub fn parse_npy(bytes: &[u8]) -> NpyResult<NpyArray> {
    let npy = NpyFile::new(bytes).map_err(decode_error)?;

    let dims = npy.shape().to_vec();
    if dims.len() > 2 {
        return Err(NpyError::UnsupportedShape(dims));
    }
    let shape = dims
        .iter()
        .map(|d| {
            usize::try_from(*d)
                .map_err(|_| NpyError::InvalidHeader(format!("dimension {} does not fit in memory", d)))
        })
        .collect::<NpyResult<Vec<usize>>>()?;

    let dtype = element_type(&npy.dtype())?;
    let fortran_order = matches!(npy.order(), Order::Fortran);

    // The payload must fit in the file; this bounds the allocation below.
    let needed = element_count(&shape)?
        .checked_mul(dtype.item_size())
        .ok_or_else(|| NpyError::InvalidHeader(format!("shape {:?} overflows the payload size", shape)))?;
    if needed > bytes.len() {
        return Err(NpyError::Truncated {
            expected: needed,
            actual: bytes.len(),
        });
    }

    let mut values = match dtype {
        Dtype::Float64 => npy.into_vec::<f64>().map_err(decode_error)?,
        Dtype::Float32 => npy
            .into_vec::<f32>()
            .map_err(decode_error)?
            .into_iter()
            .map(f64::from)
            .collect(),
    };

    if fortran_order {
        values = fortran_to_row_major(&shape, values);
    }

    debug!(
        shape = ?shape,
        dtype = ?dtype,
        fortran_order,
        "Parsed .npy array"
    );

    NpyArray::new(shape, dtype, values)
}

fn decode_error(err: std::io::Error) -> NpyError {
    NpyError::Decode(err.to_string())
}

/// Number of elements described by `shape` (1 for a scalar).
fn element_count(shape: &[usize]) -> NpyResult<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, d| acc.checked_mul(*d))
        .ok_or_else(|| NpyError::InvalidHeader(format!("shape {:?} has too many elements", shape)))
}

fn element_type(dtype: &DType) -> NpyResult<Dtype> {
    let DType::Plain(type_str) = dtype else {
        return Err(NpyError::UnsupportedDtype(format!("{:?}", dtype)));
    };
    let descr = type_str.to_string();
    match descr.trim_start_matches(['<', '>', '=', '|']) {
        "f8" => Ok(Dtype::Float64),
        "f4" => Ok(Dtype::Float32),
        _ => Err(NpyError::UnsupportedDtype(descr)),
    }
}

/// Reorder a column-major 2-D buffer into row-major order.
fn fortran_to_row_major(shape: &[usize], values: Vec<f64>) -> Vec<f64> {
    let [rows, cols] = shape else {
        // 0-D and 1-D layouts are identical in both orders
        return values;
    };

    let mut out = Vec::with_capacity(values.len());
    for r in 0..*rows {
        for c in 0..*cols {
            out.push(values[c * rows + r]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Version 1.0 file with a hand-written header dict.
    fn raw_npy(descr: &str, fortran: bool, shape: &str, payload: &[u8]) -> Vec<u8> {
        let mut dict = format!(
            "{{'descr': '{}', 'fortran_order': {}, 'shape': {}, }}",
            descr,
            if fortran { "True" } else { "False" },
            shape
        );
        // numpy pads the preamble to a 64-byte boundary
        while (10 + dict.len() + 1) % 64 != 0 {
            dict.push(' ');
        }
        dict.push('\n');

        let mut buf = b"\x93NUMPY\x01\x00".to_vec();
        buf.extend_from_slice(&(dict.len() as u16).to_le_bytes());
        buf.extend_from_slice(dict.as_bytes());
        buf.extend_from_slice(payload);
        buf
    }

    fn le_f64(values: &[f64]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_read_c_order_2d() {
        let bytes = raw_npy("<f8", false, "(2, 2)", &le_f64(&[1.1, 2.2, 3.3, 4.4]));
        let array = parse_npy(&bytes).unwrap();
        assert_eq!(array.shape(), &[2, 2]);
        assert_eq!(array.dtype(), Dtype::Float64);
        assert_eq!(array.data(), &[1.1, 2.2, 3.3, 4.4]);
    }

    #[test]
    fn test_fortran_order_is_transposed() {
        // Column-major storage of [[1, 2, 3], [4, 5, 6]]
        let payload = le_f64(&[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        let array = parse_npy(&raw_npy("<f8", true, "(2, 3)", &payload)).unwrap();
        assert_eq!(array.shape(), &[2, 3]);
        assert_eq!(array.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_big_endian_float32() {
        let payload: Vec<u8> = [0.5f32, -1.0].iter().flat_map(|v| v.to_be_bytes()).collect();
        let array = parse_npy(&raw_npy(">f4", false, "(2,)", &payload)).unwrap();
        assert_eq!(array.dtype(), Dtype::Float32);
        assert_eq!(array.data(), &[0.5, -1.0]);
    }

    #[test]
    fn test_bad_magic() {
        let err = parse_npy(b"PK\x03\x04not an npy").unwrap_err();
        assert!(matches!(err, NpyError::Decode(_)));
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = raw_npy("<f8", false, "(20, 20)", &le_f64(&[1.0]));
        let err = parse_npy(&bytes).unwrap_err();
        assert!(matches!(err, NpyError::Truncated { expected: 3200, .. }));
    }

    #[test]
    fn test_oversized_shape_is_an_error() {
        // 2^61 float64 elements overflow the payload size
        let bytes = raw_npy("<f8", false, "(2305843009213693952, 1)", &le_f64(&[1.0]));
        let err = parse_npy(&bytes).unwrap_err();
        assert!(!matches!(err, NpyError::IoError(_)), "{:?}", err);
    }

    #[test]
    fn test_three_dimensions_rejected() {
        let bytes = raw_npy("<f8", false, "(2, 2, 2)", &vec![0u8; 64]);
        let err = parse_npy(&bytes).unwrap_err();
        assert!(matches!(err, NpyError::UnsupportedShape(ref s) if s == &vec![2, 2, 2]));
    }

    #[test]
    fn test_integer_dtype_rejected() {
        let bytes = raw_npy("<i8", false, "(1,)", &7i64.to_le_bytes());
        let err = parse_npy(&bytes).unwrap_err();
        assert!(matches!(err, NpyError::UnsupportedDtype(ref d) if d == "<i8"));
    }

    #[test]
    fn test_array_shape_must_match_values() {
        assert!(NpyArray::new(vec![2, 2], Dtype::Float64, vec![1.0]).is_err());
        assert!(NpyArray::new(vec![1, 1, 1], Dtype::Float64, vec![1.0]).is_err());
    }
}
