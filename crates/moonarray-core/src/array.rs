use crate::dtype::Element;
use crate::error::{ArrayError, ArrayResult};
use crate::shape::Shape;

use serde::{Deserialize, Serialize};
use std::ops;

/// N-dimensional array, the fundamental data structure of moonarray.
///
/// Stores data in a flat contiguous `Vec<T>` with row-major (C-order) layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Element")]
pub struct NdArray<T: Element> {
    data: Vec<T>,
    shape: Shape,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl<T: Element> NdArray<T> {
    /// Create an array from raw data and shape.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> ArrayResult<Self> {
        let s = Shape::new(shape);
        if s.checked_numel() != Some(data.len()) {
            return Err(ArrayError::ShapeMismatch {
                expected: s.to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(NdArray { data, shape: s })
    }

    /// Create an array filled with zeros.
    pub fn zeros(shape: Vec<usize>) -> Self {
        Self::full(shape, T::ZERO)
    }

    /// Create an array filled with ones.
    pub fn ones(shape: Vec<usize>) -> Self {
        Self::full(shape, T::ONE)
    }

    /// Create an array filled with a constant value.
    pub fn full(shape: Vec<usize>, value: T) -> Self {
        let s = Shape::new(shape);
        NdArray {
            data: vec![value; s.numel()],
            shape: s,
        }
    }

    /// Create a scalar array (0-d).
    pub fn scalar(value: T) -> Self {
        NdArray {
            data: vec![value],
            shape: Shape::scalar(),
        }
    }

    /// Create a 1-D array from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        NdArray {
            data: data.to_vec(),
            shape: Shape::new(vec![data.len()]),
        }
    }

    /// Create a 2-D array from nested rows. Every row must have the same length.
    pub fn from_vec2d(data: &[Vec<T>]) -> ArrayResult<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ArrayError::RaggedRows {
                row,
                expected: cols,
                got: r.len(),
            });
        }
        let flat: Vec<T> = data.iter().flat_map(|r| r.iter().copied()).collect();
        NdArray::new(flat, vec![rows, cols])
    }

    /// Range of values from `start` to `end` (exclusive) with step.
    pub fn arange(start: T, end: T, step: T) -> Self {
        let mut data = Vec::new();
        let mut val = start;
        // Stop once the next value would overflow the element type.
        if step > T::ZERO {
            while val < end {
                data.push(val);
                match val.checked_add(step) {
                    Some(next) => val = next,
                    None => break,
                }
            }
        } else if step < T::ZERO {
            while val > end {
                data.push(val);
                match val.checked_add(step) {
                    Some(next) => val = next,
                    None => break,
                }
            }
        }
        NdArray::from_slice(&data)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_vec(&self) -> Vec<usize> {
        self.shape.to_vec()
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.ndim() == 0
    }

    /// Get the single element of a one-element array.
    pub fn item(&self) -> ArrayResult<T> {
        if self.data.len() != 1 {
            return Err(ArrayError::InvalidOperation(format!(
                "item() requires exactly 1 element, got {}",
                self.data.len()
            )));
        }
        Ok(self.data[0])
    }

    /// Multi-dimensional indexing.
    pub fn get(&self, indices: &[usize]) -> ArrayResult<T> {
        if indices.len() != self.ndim() {
            return Err(ArrayError::DimensionMismatch(format!(
                "Expected {} indices, got {}",
                self.ndim(),
                indices.len()
            )));
        }
        let strides = self.shape.strides();
        let mut offset = 0;
        for (axis, &idx) in indices.iter().enumerate() {
            let size = self.shape.dim(axis)?;
            if idx >= size {
                return Err(ArrayError::IndexOutOfBounds {
                    index: idx,
                    axis,
                    size,
                });
            }
            offset += idx * strides[axis];
        }
        Ok(self.data[offset])
    }

    // ─── Shape Manipulation ─────────────────────────────────────────────────

    /// Reshape the array (data order is preserved, only the shape changes).
    pub fn reshape(&self, new_shape: Vec<usize>) -> ArrayResult<NdArray<T>> {
        let ns = Shape::new(new_shape);
        if ns.checked_numel() != Some(self.numel()) {
            return Err(ArrayError::InvalidReshape {
                numel: self.numel(),
                shape: ns.dims().iter().map(|&d| d as i64).collect(),
            });
        }
        Ok(NdArray {
            data: self.data.clone(),
            shape: ns,
        })
    }

    /// Reshape where one dimension may be `-1` and is inferred.
    pub fn reshape_inferred(&self, new_shape: &[i64]) -> ArrayResult<NdArray<T>> {
        let ns = Shape::infer(self.numel(), new_shape)?;
        Ok(NdArray {
            data: self.data.clone(),
            shape: ns,
        })
    }

    /// Flatten to 1-D.
    pub fn flatten(&self) -> NdArray<T> {
        NdArray::from_slice(&self.data)
    }

    /// Convert every element to another element type.
    ///
    /// Integer to integer casts go through `i64` and are exact (narrowing
    /// truncates like `as`). Any cast involving a float goes through `f64`.
    pub fn cast<U: Element>(&self) -> NdArray<U> {
        let data = if T::IS_FLOAT || U::IS_FLOAT {
            self.data.iter().map(|&x| U::from_f64(x.to_f64())).collect()
        } else {
            self.data.iter().map(|&x| U::from_i64(x.to_i64())).collect()
        };
        NdArray {
            data,
            shape: self.shape.clone(),
        }
    }

    // ─── Element-wise Operations ────────────────────────────────────────────

    pub fn apply<F: Fn(T) -> T>(&self, f: F) -> NdArray<T> {
        NdArray {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    // Integer overflow wraps, matching fixed-width machine arithmetic.
    pub fn add_scalar(&self, s: T) -> NdArray<T> { self.apply(|x| x.wrapping_add(s)) }
    pub fn sub_scalar(&self, s: T) -> NdArray<T> { self.apply(|x| x.wrapping_sub(s)) }
    pub fn mul_scalar(&self, s: T) -> NdArray<T> { self.apply(|x| x.wrapping_mul(s)) }

    fn broadcast_binary_op<F: Fn(T, T) -> T>(
        &self,
        other: &NdArray<T>,
        op: F,
    ) -> ArrayResult<NdArray<T>> {
        // Fast path: same shape
        if self.shape == other.shape {
            let data: Vec<T> = self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| op(a, b))
                .collect();
            return Ok(NdArray {
                data,
                shape: self.shape.clone(),
            });
        }

        let out_shape = Shape::broadcast_shape(&self.shape, &other.shape)?;
        let out_strides = out_shape.strides();
        let a_strides = self.shape.strides();
        let b_strides = other.shape.strides();
        let a_dims = self.shape.dims();
        let b_dims = other.shape.dims();
        let ndim = out_shape.ndim();
        let a_lead = ndim - a_dims.len();
        let b_lead = ndim - b_dims.len();

        let mut data = Vec::with_capacity(out_shape.numel());
        for flat_idx in 0..out_shape.numel() {
            let mut remaining = flat_idx;
            let mut a_offset = 0usize;
            let mut b_offset = 0usize;

            for d in 0..ndim {
                let idx = remaining / out_strides[d];
                remaining %= out_strides[d];

                // Size-1 axes stretch, so they contribute no offset.
                if d >= a_lead && a_dims[d - a_lead] > 1 {
                    a_offset += idx * a_strides[d - a_lead];
                }
                if d >= b_lead && b_dims[d - b_lead] > 1 {
                    b_offset += idx * b_strides[d - b_lead];
                }
            }

            data.push(op(self.data[a_offset], other.data[b_offset]));
        }

        Ok(NdArray {
            data,
            shape: out_shape,
        })
    }

    pub fn add(&self, other: &NdArray<T>) -> ArrayResult<NdArray<T>> {
        self.broadcast_binary_op(other, T::wrapping_add)
    }

    pub fn sub(&self, other: &NdArray<T>) -> ArrayResult<NdArray<T>> {
        self.broadcast_binary_op(other, T::wrapping_sub)
    }

    pub fn mul(&self, other: &NdArray<T>) -> ArrayResult<NdArray<T>> {
        self.broadcast_binary_op(other, T::wrapping_mul)
    }

    // ─── Reduction Operations ───────────────────────────────────────────────

    /// Sum of all elements.
    pub fn sum_all(&self) -> T {
        self.data.iter().fold(T::ZERO, |acc, &x| acc.wrapping_add(x))
    }

    /// Arithmetic mean of all elements, always computed in `f64`.
    pub fn mean_all(&self) -> ArrayResult<f64> {
        if self.data.is_empty() {
            return Err(ArrayError::EmptyArray);
        }
        let sum: f64 = self.data.iter().map(|x| x.to_f64()).sum();
        Ok(sum / self.data.len() as f64)
    }

    /// Sum along a specific axis, collapsing that dimension.
    pub fn sum_axis(&self, axis: usize) -> ArrayResult<NdArray<T>> {
        let dims = self.shape.dims();
        if axis >= dims.len() {
            return Err(ArrayError::InvalidAxis {
                axis,
                ndim: self.ndim(),
            });
        }

        let outer: usize = dims[..axis].iter().product();
        let axis_size = dims[axis];
        let inner: usize = dims[axis + 1..].iter().product();

        let mut new_dims: Vec<usize> = dims.to_vec();
        new_dims.remove(axis);

        let mut result = vec![T::ZERO; outer * inner];
        for o in 0..outer {
            for a in 0..axis_size {
                for i in 0..inner {
                    let src = o * axis_size * inner + a * inner + i;
                    let dst = o * inner + i;
                    result[dst] = result[dst].wrapping_add(self.data[src]);
                }
            }
        }

        NdArray::new(result, new_dims)
    }

    /// Mean along a specific axis.
    pub fn mean_axis(&self, axis: usize) -> ArrayResult<NdArray<f64>> {
        let axis_size = self.shape.dim(axis)?;
        if axis_size == 0 {
            return Err(ArrayError::EmptyArray);
        }
        let sums = self.sum_axis(axis)?.cast::<f64>();
        Ok(sums.apply(|x| x / axis_size as f64))
    }

    // ─── Dot Product / Matrix Multiply ──────────────────────────────────────

    /// Matrix multiply: supports 2D×2D and batched.
    pub fn matmul(&self, other: &NdArray<T>) -> ArrayResult<NdArray<T>> {
        if self.ndim() < 2 || other.ndim() < 2 {
            return Err(ArrayError::InvalidOperation(
                "matmul requires arrays with at least 2 dimensions".to_string(),
            ));
        }

        let a_dims = self.shape.dims();
        let b_dims = other.shape.dims();
        let m = a_dims[a_dims.len() - 2];
        let k = a_dims[a_dims.len() - 1];
        let k2 = b_dims[b_dims.len() - 2];
        let n = b_dims[b_dims.len() - 1];

        if k != k2 {
            return Err(ArrayError::DimensionMismatch(format!(
                "matmul: inner dimensions must match, got {} and {}",
                k, k2
            )));
        }

        let batch_a: usize = a_dims[..a_dims.len() - 2].iter().product();
        let batch_b: usize = b_dims[..b_dims.len() - 2].iter().product();
        if batch_a != batch_b && batch_a != 1 && batch_b != 1 {
            return Err(ArrayError::BroadcastError {
                a: a_dims[..a_dims.len() - 2].to_vec(),
                b: b_dims[..b_dims.len() - 2].to_vec(),
            });
        }
        let batch = batch_a.max(batch_b);

        let mut data = vec![T::ZERO; batch * m * n];
        for b_idx in 0..batch {
            let a_off = if batch_a == 1 { 0 } else { b_idx * m * k };
            let b_off = if batch_b == 1 { 0 } else { b_idx * k * n };
            let c_off = b_idx * m * n;

            for i in 0..m {
                for j in 0..n {
                    let mut sum = T::ZERO;
                    for p in 0..k {
                        let prod = self.data[a_off + i * k + p].wrapping_mul(other.data[b_off + p * n + j]);
                        sum = sum.wrapping_add(prod);
                    }
                    data[c_off + i * n + j] = sum;
                }
            }
        }

        let mut out_shape = if batch_a >= batch_b {
            a_dims[..a_dims.len() - 2].to_vec()
        } else {
            b_dims[..b_dims.len() - 2].to_vec()
        };
        out_shape.push(m);
        out_shape.push(n);
        NdArray::new(data, out_shape)
    }

    /// Generalised dot product.
    ///
    /// - either operand 0-d: elementwise scaling
    /// - 1-D · 1-D: inner product, returned as a 0-d array
    /// - N-D · 1-D: sum product over the last axis of `self`
    /// - N-D · M-D (M ≥ 2): sum product over the last axis of `self` and the
    ///   second-to-last axis of `other`, shaped `self[:-1] + other[:-2] + other[-1:]`
    pub fn dot(&self, other: &NdArray<T>) -> ArrayResult<NdArray<T>> {
        if self.is_scalar() || other.is_scalar() {
            return self.mul(other);
        }

        let a_dims = self.shape.dims();
        let b_dims = other.shape.dims();
        let k = a_dims[a_dims.len() - 1];
        let contract_axis = if b_dims.len() == 1 { 0 } else { b_dims.len() - 2 };
        let k2 = b_dims[contract_axis];
        if k != k2 {
            return Err(ArrayError::DimensionMismatch(format!(
                "shapes {} and {} not aligned: {} (dim {}) != {} (dim {})",
                self.shape,
                other.shape,
                k,
                a_dims.len() - 1,
                k2,
                contract_axis
            )));
        }

        let outer_a: usize = a_dims[..a_dims.len() - 1].iter().product();
        let mut out_shape = a_dims[..a_dims.len() - 1].to_vec();

        if b_dims.len() == 1 {
            let data: Vec<T> = (0..outer_a)
                .map(|i| {
                    (0..k)
                        .fold(T::ZERO, |acc, p| {
                            acc.wrapping_add(self.data[i * k + p].wrapping_mul(other.data[p]))
                        })
                })
                .collect();
            return NdArray::new(data, out_shape);
        }

        let n = b_dims[b_dims.len() - 1];
        let batch_b: usize = b_dims[..b_dims.len() - 2].iter().product();
        out_shape.extend_from_slice(&b_dims[..b_dims.len() - 2]);
        out_shape.push(n);

        let mut data = Vec::with_capacity(outer_a * batch_b * n);
        for i in 0..outer_a {
            for b in 0..batch_b {
                let b_off = b * k * n;
                for j in 0..n {
                    let mut sum = T::ZERO;
                    for p in 0..k {
                        let prod = self.data[i * k + p].wrapping_mul(other.data[b_off + p * n + j]);
                        sum = sum.wrapping_add(prod);
                    }
                    data.push(sum);
                }
            }
        }
        NdArray::new(data, out_shape)
    }
}

// ─── Operator Overloads ─────────────────────────────────────────────────────

impl<T: Element> ops::Neg for &NdArray<T> {
    type Output = NdArray<T>;
    fn neg(self) -> NdArray<T> {
        self.apply(T::wrapping_neg)
    }
}

impl<T: Element> ops::Add for &NdArray<T> {
    type Output = ArrayResult<NdArray<T>>;
    fn add(self, rhs: Self) -> ArrayResult<NdArray<T>> {
        NdArray::add(self, rhs)
    }
}

impl<T: Element> ops::Sub for &NdArray<T> {
    type Output = ArrayResult<NdArray<T>>;
    fn sub(self, rhs: Self) -> ArrayResult<NdArray<T>> {
        NdArray::sub(self, rhs)
    }
}

impl<T: Element> ops::Mul for &NdArray<T> {
    type Output = ArrayResult<NdArray<T>>;
    fn mul(self, rhs: Self) -> ArrayResult<NdArray<T>> {
        NdArray::mul(self, rhs)
    }
}

impl<T: Element> PartialEq for NdArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}
