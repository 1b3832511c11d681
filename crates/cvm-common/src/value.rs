//! Table cell values and their textual rendering.
//!
//! The default rendering follows Python's `str()` rules, which existing
//! consumers of the tables parse: shortest round-trip digits, a trailing
//! `.0` on integral floats, scientific notation outside `1e-4 <= |x| < 1e16`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw cell value that marks "no data" in model query output.
pub const MISSING_SENTINEL: f64 = -1.0;

/// Text emitted for a missing cell.
pub const MISSING_TEXT: &str = "nan";

/// How floating point cells are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// Shortest round-trip representation (Python `str`).
    #[default]
    Shortest,
    /// Fixed decimals, right aligned to a minimum width (`{:5.4f}`).
    Fixed { width: usize, precision: usize },
}

impl NumberFormat {
    /// The `{:5.4f}` format used by the tabular emitters.
    pub const fn four_decimals() -> Self {
        Self::Fixed {
            width: 5,
            precision: 4,
        }
    }
}

/// One field of an output row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No data at this cell; rendered as `nan`.
    Missing,
    Integer(i64),
    /// 64-bit float.
    Real(f64),
    /// 32-bit float; rendered with 32-bit shortest digits.
    Single(f32),
    /// Passed through verbatim (string-typed descriptor values).
    Text(String),
}

impl CellValue {
    /// Build a cell from a descriptor JSON scalar.
    ///
    /// Integral JSON numbers stay integers, other numbers become `Real`,
    /// strings are kept as text. Non-scalar values render via [`python_str`].
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else {
                    CellValue::Real(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(python_str(other)),
        }
    }

    /// Render the cell as output text.
    ///
    /// `format` applies to floating point cells only; integers and text are
    /// always printed as-is.
    pub fn render(&self, format: NumberFormat) -> String {
        match self {
            CellValue::Missing => MISSING_TEXT.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Real(v) => match format {
                NumberFormat::Shortest => repr_f64(*v),
                NumberFormat::Fixed { width, precision } => fixed(*v, width, precision),
            },
            CellValue::Single(v) => match format {
                NumberFormat::Shortest => repr_f32(*v),
                NumberFormat::Fixed { width, precision } => fixed(*v as f64, width, precision),
            },
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(NumberFormat::Shortest))
    }
}

/// Render a descriptor JSON value the way Python's `str()` prints it.
pub fn python_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => python_repr(other),
    }
}

fn python_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                repr_f64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => format!("'{}'", s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(python_repr).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("'{}': {}", k, python_repr(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

/// Shortest round-trip text for a 64-bit float, Python style.
pub fn repr_f64(v: f64) -> String {
    if let Some(special) = non_finite(v) {
        return special;
    }
    shortest_from_scientific(&format!("{:e}", v))
}

/// Shortest round-trip text for a 32-bit float, NumPy `float32` style.
pub fn repr_f32(v: f32) -> String {
    if let Some(special) = non_finite(v as f64) {
        return special;
    }
    shortest_from_scientific(&format!("{:e}", v))
}

fn non_finite(v: f64) -> Option<String> {
    if v.is_nan() {
        Some(MISSING_TEXT.to_string())
    } else if v.is_infinite() {
        Some(if v > 0.0 { "inf" } else { "-inf" }.to_string())
    } else {
        None
    }
}

fn fixed(v: f64, width: usize, precision: usize) -> String {
    match non_finite(v) {
        Some(special) => format!("{:>width$}", special, width = width),
        None => format!("{:>width$.precision$}", v, width = width, precision = precision),
    }
}

/// Re-layout Rust's `{:e}` output (`1.5e-7`) using Python's repr thresholds.
fn shortest_from_scientific(sci: &str) -> String {
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exp) {
        if exp >= 0 {
            let int_len = exp as usize + 1;
            if digits.len() <= int_len {
                format!("{sign}{digits}{}.0", "0".repeat(int_len - digits.len()))
            } else {
                format!("{sign}{}.{}", &digits[..int_len], &digits[int_len..])
            }
        } else {
            format!("{sign}0.{}{digits}", "0".repeat((-exp - 1) as usize))
        }
    } else {
        let (head, tail) = digits.split_at(1);
        let exp_sign = if exp < 0 { '-' } else { '+' };
        if tail.is_empty() {
            format!("{sign}{head}e{exp_sign}{:02}", exp.abs())
        } else {
            format!("{sign}{head}.{tail}e{exp_sign}{:02}", exp.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repr_matches_python_str() {
        assert_eq!(repr_f64(1.1), "1.1");
        assert_eq!(repr_f64(100.0), "100.0");
        assert_eq!(repr_f64(0.0), "0.0");
        assert_eq!(repr_f64(-0.0), "-0.0");
        assert_eq!(repr_f64(-122.658), "-122.658");
        assert_eq!(repr_f64(0.0001), "0.0001");
        assert_eq!(repr_f64(0.00001), "1e-05");
        assert_eq!(repr_f64(1e16), "1e+16");
        assert_eq!(repr_f64(1.5e16), "1.5e+16");
        assert_eq!(repr_f64(123456.0), "123456.0");
        assert_eq!(repr_f64(3.454256057739258), "3.454256057739258");
    }

    #[test]
    fn test_repr_f32_uses_single_precision_digits() {
        assert_eq!(repr_f32(0.1), "0.1");
        assert_eq!(repr_f32(3502.5), "3502.5");
        assert_eq!(repr_f64(0.1f32 as f64), "0.10000000149011612");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(repr_f64(f64::NAN), "nan");
        assert_eq!(repr_f64(f64::INFINITY), "inf");
        assert_eq!(repr_f64(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_fixed_format() {
        let fmt = NumberFormat::four_decimals();
        assert_eq!(CellValue::Real(1.1).render(fmt), "1.1000");
        assert_eq!(CellValue::Real(-2.0).render(fmt), "-2.0000");
        assert_eq!(CellValue::Single(0.5).render(fmt), "0.5000");
        assert_eq!(CellValue::Integer(50).render(fmt), "50");
        assert_eq!(CellValue::Missing.render(fmt), "nan");
    }

    #[test]
    fn test_cell_from_json() {
        assert_eq!(CellValue::from_json(&json!(160)), CellValue::Integer(160));
        assert_eq!(CellValue::from_json(&json!(37.5)), CellValue::Real(37.5));
        assert_eq!(
            CellValue::from_json(&json!("37.5783")),
            CellValue::Text("37.5783".to_string())
        );
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Text("None".to_string()));
    }

    #[test]
    fn test_python_str() {
        assert_eq!(python_str(&json!("sfcvm")), "sfcvm");
        assert_eq!(python_str(&json!(16160)), "16160");
        assert_eq!(python_str(&json!(2.0)), "2.0");
        assert_eq!(python_str(&json!(null)), "None");
        assert_eq!(python_str(&json!([1, "a", 2.5])), "[1, 'a', 2.5]");
    }
}
