//! Text rendering of arrays and scalars.
//!
//! Arrays print with square brackets and no commas. Elements share a common
//! width so columns line up, and floats align on their decimal point:
//!
//! ```text
//! [ 6  7  8  9 10]
//! [[1]
//!  [2]]
//! [1.5 2.  3. ]
//! ```

use std::fmt;

use crate::array::NdArray;
use crate::dtype::Element;

/// Render a float the way Python's `repr` does for ordinary values
/// (`3.0`, `2.5`, `-0.125`, `nan`, `inf`).
pub fn format_scalar(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        let sign = if v > 0.0 { "" } else { "-" };
        format!("{}inf", sign)
    } else if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// Digits kept after the decimal point for float array elements.
const FLOAT_PRECISION: usize = 8;

/// Unpadded text of a single element. Floats are rounded to
/// [`FLOAT_PRECISION`] digits with trailing zeros dropped, keeping the point.
fn element_token<T: Element>(x: T) -> String {
    if !T::IS_FLOAT {
        return x.to_string();
    }
    let v = x.to_f64();
    if !v.is_finite() {
        return format_scalar(v);
    }
    format!("{:.*}", FLOAT_PRECISION, v)
        .trim_end_matches('0')
        .to_string()
}

/// Pad every token so the printed array has aligned columns.
fn pad_tokens<T: Element>(tokens: Vec<String>) -> Vec<String> {
    if !T::IS_FLOAT {
        let width = tokens.iter().map(String::len).max().unwrap_or(0);
        return tokens
            .into_iter()
            .map(|t| format!("{:>width$}", t, width = width))
            .collect();
    }

    let (mut int_w, mut frac_w) = (0, 0);
    for t in &tokens {
        if let Some((int, frac)) = t.split_once('.') {
            int_w = int_w.max(int.len());
            frac_w = frac_w.max(frac.len());
        }
    }
    let total = tokens
        .iter()
        .filter(|t| !t.contains('.'))
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(int_w + 1 + frac_w);

    tokens
        .into_iter()
        .map(|t| match t.split_once('.') {
            Some((int, frac)) => {
                let aligned = format!("{:>iw$}.{:<fw$}", int, frac, iw = int_w, fw = frac_w);
                format!("{:>width$}", aligned, width = total)
            }
            // nan / inf
            None => format!("{:>width$}", t, width = total),
        })
        .collect()
}

fn write_nested(
    f: &mut fmt::Formatter<'_>,
    tokens: &[String],
    dims: &[usize],
    depth: usize,
) -> fmt::Result {
    write!(f, "[")?;
    let stride = tokens.len() / dims[0].max(1);
    for i in 0..dims[0] {
        if i > 0 {
            if dims.len() == 1 {
                write!(f, " ")?;
            } else {
                write!(f, "{}{}", "\n".repeat(dims.len() - 1), " ".repeat(depth + 1))?;
            }
        }
        if dims.len() == 1 {
            write!(f, "{}", tokens[i])?;
        } else {
            write_nested(f, &tokens[i * stride..(i + 1) * stride], &dims[1..], depth + 1)?;
        }
    }
    write!(f, "]")
}

impl<T: Element> fmt::Display for NdArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalar() {
            return write!(f, "{}", element_token(self.data()[0]));
        }
        if self.numel() == 0 {
            return write!(f, "[]");
        }
        let tokens = pad_tokens::<T>(self.data().iter().map(|&x| element_token(x)).collect());
        write_nested(f, &tokens, self.shape().dims(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scalar() {
        assert_eq!(format_scalar(3.0), "3.0");
        assert_eq!(format_scalar(2.5), "2.5");
        assert_eq!(format_scalar(-0.125), "-0.125");
        assert_eq!(format_scalar(f64::NAN), "nan");
        assert_eq!(format_scalar(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_int_vector() {
        let a = NdArray::from_slice(&[1i64, 2, 3, 4, 5]);
        assert_eq!(a.to_string(), "[1 2 3 4 5]");
        assert_eq!(a.add_scalar(5).to_string(), "[ 6  7  8  9 10]");
        assert_eq!(NdArray::from_slice(&[-1i32, 10]).to_string(), "[-1 10]");
    }

    #[test]
    fn test_column_vector() {
        let a = NdArray::from_slice(&[1i64, 2, 3, 4, 5])
            .reshape(vec![5, 1])
            .unwrap();
        assert_eq!(a.to_string(), "[[1]\n [2]\n [3]\n [4]\n [5]]");
    }

    #[test]
    fn test_matrix() {
        let m = NdArray::from_vec2d(&[vec![19i64, 22], vec![43, 50]]).unwrap();
        assert_eq!(m.to_string(), "[[19 22]\n [43 50]]");
    }

    #[test]
    fn test_three_dimensional() {
        let a = NdArray::new((0..8).collect::<Vec<i64>>(), vec![2, 2, 2]).unwrap();
        assert_eq!(a.to_string(), "[[[0 1]\n  [2 3]]\n\n [[4 5]\n  [6 7]]]");
    }

    #[test]
    fn test_floats_align_on_decimal_point() {
        let a = NdArray::from_slice(&[1.0f64, 2.0, 3.0]);
        assert_eq!(a.to_string(), "[1. 2. 3.]");
        let b = NdArray::from_slice(&[1.5f64, 2.0, 3.0]);
        assert_eq!(b.to_string(), "[1.5 2.  3. ]");
        let c = NdArray::from_slice(&[-1.5f64, 2.0]);
        assert_eq!(c.to_string(), "[-1.5  2. ]");
        let d = NdArray::from_slice(&[0.1f32, 10.25]);
        assert_eq!(d.to_string(), "[ 0.1  10.25]");
    }

    #[test]
    fn test_floats_round_to_eight_digits() {
        let a = NdArray::from_slice(&[0.1f64, 0.2]).add_scalar(0.1);
        assert_eq!(a.to_string(), "[0.2 0.3]");
        let b = NdArray::from_slice(&[1.123456789f64, 2.0]);
        assert_eq!(b.to_string(), "[1.12345679 2.        ]");
        assert_eq!(NdArray::from_slice(&[-0.0f64]).to_string(), "[-0.]");
        assert_eq!(NdArray::scalar(1.0f64 / 3.0).to_string(), "0.33333333");
    }

    #[test]
    fn test_non_finite_floats() {
        let a = NdArray::from_slice(&[1.5f64, f64::NAN]);
        assert_eq!(a.to_string(), "[1.5 nan]");
        let b = NdArray::from_slice(&[f64::NEG_INFINITY, 2.0]);
        assert_eq!(b.to_string(), "[-inf   2.]");
    }

    #[test]
    fn test_scalar_and_empty() {
        assert_eq!(NdArray::scalar(32i64).to_string(), "32");
        assert_eq!(NdArray::scalar(2.0f64).to_string(), "2.");
        assert_eq!(NdArray::<i64>::from_slice(&[]).to_string(), "[]");
        assert_eq!(NdArray::<f64>::zeros(vec![2, 0]).to_string(), "[]");
    }
}
