use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Trait bound for numeric types storable in an [`NdArray`](crate::NdArray).
/// Implemented for `i32`, `i64`, `f32` and `f64`.
pub trait Element:
    Copy
    + Clone
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + Sum
    + Serialize
    + for<'de> Deserialize<'de>
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    /// Whether values print with a decimal point.
    const IS_FLOAT: bool;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
    fn from_usize(v: usize) -> Self;
    /// Exact for integer types, truncating for floats.
    fn from_i64(v: i64) -> Self;
    fn to_i64(self) -> i64;

    /// Integer arithmetic wraps on overflow; float arithmetic is plain IEEE.
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    /// `None` when an integer addition would overflow.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_int_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const IS_FLOAT: bool = false;

            #[inline] fn from_f64(v: f64) -> Self { v as $t }
            #[inline] fn to_f64(self) -> f64 { self as f64 }
            #[inline] fn from_usize(v: usize) -> Self { v as $t }
            #[inline] fn from_i64(v: i64) -> Self { v as $t }
            #[inline] fn to_i64(self) -> i64 { self as i64 }
            #[inline] fn wrapping_add(self, rhs: Self) -> Self { <$t>::wrapping_add(self, rhs) }
            #[inline] fn wrapping_sub(self, rhs: Self) -> Self { <$t>::wrapping_sub(self, rhs) }
            #[inline] fn wrapping_mul(self, rhs: Self) -> Self { <$t>::wrapping_mul(self, rhs) }
            #[inline] fn wrapping_neg(self) -> Self { <$t>::wrapping_neg(self) }
            #[inline] fn checked_add(self, rhs: Self) -> Option<Self> { <$t>::checked_add(self, rhs) }
        }
    )*};
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const IS_FLOAT: bool = true;

            #[inline] fn from_f64(v: f64) -> Self { v as $t }
            #[inline] fn to_f64(self) -> f64 { self as f64 }
            #[inline] fn from_usize(v: usize) -> Self { v as $t }
            #[inline] fn from_i64(v: i64) -> Self { v as $t }
            #[inline] fn to_i64(self) -> i64 { self as i64 }
            #[inline] fn wrapping_add(self, rhs: Self) -> Self { self + rhs }
            #[inline] fn wrapping_sub(self, rhs: Self) -> Self { self - rhs }
            #[inline] fn wrapping_mul(self, rhs: Self) -> Self { self * rhs }
            #[inline] fn wrapping_neg(self) -> Self { -self }
            #[inline] fn checked_add(self, rhs: Self) -> Option<Self> { Some(self + rhs) }
        }
    )*};
}

impl_int_element!(i32, i64);
impl_float_element!(f32, f64);

/// Element type of a [`DynArray`](crate::DynArray).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Int64,
    Float64,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Int64 => write!(f, "int64"),
            DType::Float64 => write!(f, "float64"),
        }
    }
}
