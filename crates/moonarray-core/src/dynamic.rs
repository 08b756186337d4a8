use std::fmt;

use serde_json::Number;

use crate::array::NdArray;
use crate::dtype::DType;
use crate::error::{ArrayError, ArrayResult};

/// An array whose element type is chosen at runtime from literal input.
///
/// Integer literals produce `Int`; any non-integer literal promotes the whole
/// array to `Float`. Mixed operations promote to `Float` as well.
#[derive(Debug, Clone, PartialEq)]
pub enum DynArray {
    Int(NdArray<i64>),
    Float(NdArray<f64>),
}

fn number_to_f64(n: &Number) -> ArrayResult<f64> {
    n.as_f64()
        .ok_or_else(|| ArrayError::InvalidOperation(format!("unsupported number literal {}", n)))
}

fn number_to_i64(n: &Number) -> ArrayResult<i64> {
    match n.as_i64() {
        Some(v) => Ok(v),
        None => {
            let v = number_to_f64(n)?;
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(ArrayError::NonIntegral(v))
            }
        }
    }
}

fn infer_dtype<'a>(values: impl IntoIterator<Item = &'a Number>) -> DType {
    if values.into_iter().all(Number::is_i64) {
        DType::Int64
    } else {
        DType::Float64
    }
}

impl DynArray {
    /// Build a 1-D array, inferring the element type from the literals.
    pub fn from_numbers(values: &[Number]) -> ArrayResult<Self> {
        Self::from_numbers_as(values, infer_dtype(values))
    }

    /// Build a 1-D array with an explicit element type.
    pub fn from_numbers_as(values: &[Number], dtype: DType) -> ArrayResult<Self> {
        match dtype {
            DType::Int64 => {
                let data = values.iter().map(number_to_i64).collect::<ArrayResult<Vec<_>>>()?;
                Ok(DynArray::Int(NdArray::from_slice(&data)))
            }
            DType::Float64 => {
                let data = values.iter().map(number_to_f64).collect::<ArrayResult<Vec<_>>>()?;
                Ok(DynArray::Float(NdArray::from_slice(&data)))
            }
        }
    }

    /// Build a 2-D array from nested rows, inferring the element type.
    pub fn from_rows(rows: &[Vec<Number>]) -> ArrayResult<Self> {
        Self::from_rows_as(rows, infer_dtype(rows.iter().flatten()))
    }

    /// Build a 2-D array from nested rows with an explicit element type.
    pub fn from_rows_as(rows: &[Vec<Number>], dtype: DType) -> ArrayResult<Self> {
        match dtype {
            DType::Int64 => {
                let rows = rows
                    .iter()
                    .map(|r| r.iter().map(number_to_i64).collect::<ArrayResult<Vec<_>>>())
                    .collect::<ArrayResult<Vec<_>>>()?;
                Ok(DynArray::Int(NdArray::from_vec2d(&rows)?))
            }
            DType::Float64 => {
                let rows = rows
                    .iter()
                    .map(|r| r.iter().map(number_to_f64).collect::<ArrayResult<Vec<_>>>())
                    .collect::<ArrayResult<Vec<_>>>()?;
                Ok(DynArray::Float(NdArray::from_vec2d(&rows)?))
            }
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            DynArray::Int(_) => DType::Int64,
            DynArray::Float(_) => DType::Float64,
        }
    }

    pub fn shape_vec(&self) -> Vec<usize> {
        match self {
            DynArray::Int(a) => a.shape_vec(),
            DynArray::Float(a) => a.shape_vec(),
        }
    }

    /// View the values as `f64`, converting integers.
    pub fn to_float(&self) -> NdArray<f64> {
        match self {
            DynArray::Int(a) => a.cast(),
            DynArray::Float(a) => a.clone(),
        }
    }

    /// Elementwise addition of a scalar literal.
    pub fn add_number(&self, n: &Number) -> ArrayResult<Self> {
        match (self, n.as_i64()) {
            (DynArray::Int(a), Some(s)) => Ok(DynArray::Int(a.add_scalar(s))),
            _ => Ok(DynArray::Float(self.to_float().add_scalar(number_to_f64(n)?))),
        }
    }

    /// Elementwise broadcasting addition of another array.
    pub fn add(&self, other: &DynArray) -> ArrayResult<Self> {
        match (self, other) {
            (DynArray::Int(a), DynArray::Int(b)) => Ok(DynArray::Int(a.add(b)?)),
            _ => Ok(DynArray::Float(self.to_float().add(&other.to_float())?)),
        }
    }

    pub fn mean(&self) -> ArrayResult<f64> {
        match self {
            DynArray::Int(a) => a.mean_all(),
            DynArray::Float(a) => a.mean_all(),
        }
    }

    pub fn reshape_inferred(&self, dims: &[i64]) -> ArrayResult<Self> {
        match self {
            DynArray::Int(a) => Ok(DynArray::Int(a.reshape_inferred(dims)?)),
            DynArray::Float(a) => Ok(DynArray::Float(a.reshape_inferred(dims)?)),
        }
    }

    pub fn dot(&self, other: &DynArray) -> ArrayResult<Self> {
        match (self, other) {
            (DynArray::Int(a), DynArray::Int(b)) => Ok(DynArray::Int(a.dot(b)?)),
            _ => Ok(DynArray::Float(self.to_float().dot(&other.to_float())?)),
        }
    }
}

impl From<NdArray<i64>> for DynArray {
    fn from(a: NdArray<i64>) -> Self {
        DynArray::Int(a)
    }
}

impl From<NdArray<f64>> for DynArray {
    fn from(a: NdArray<f64>) -> Self {
        DynArray::Float(a)
    }
}

impl fmt::Display for DynArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynArray::Int(a) => write!(f, "{}", a),
            DynArray::Float(a) => write!(f, "{}", a),
        }
    }
}
