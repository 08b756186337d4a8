use crate::error::{ArrayError, ArrayResult};
use serde::{Deserialize, Serialize};

/// Represents the shape of an array (dimensions).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    pub fn from_slice(dims: &[usize]) -> Self {
        Shape {
            dims: dims.to_vec(),
        }
    }

    pub fn scalar() -> Self {
        Shape { dims: vec![] }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Size along a specific axis.
    pub fn dim(&self, axis: usize) -> ArrayResult<usize> {
        self.dims.get(axis).copied().ok_or(ArrayError::InvalidAxis {
            axis,
            ndim: self.ndim(),
        })
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        if self.dims.is_empty() {
            1 // scalar
        } else {
            self.dims.iter().product()
        }
    }

    /// Total number of elements, or `None` if the product overflows `usize`.
    pub fn checked_numel(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.dims.clone()
    }

    /// Compute row-major (C-order) strides.
    pub fn strides(&self) -> Vec<usize> {
        if self.dims.is_empty() {
            return vec![];
        }
        let mut strides = vec![1usize; self.dims.len()];
        for i in (0..self.dims.len() - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Resulting shape of broadcasting `a` against `b` (NumPy rules).
    pub fn broadcast_shape(a: &Shape, b: &Shape) -> ArrayResult<Shape> {
        let max_ndim = a.ndim().max(b.ndim());
        let mut result = vec![0usize; max_ndim];

        for i in 0..max_ndim {
            let da = if i < a.ndim() {
                a.dims[a.ndim() - 1 - i]
            } else {
                1
            };
            let db = if i < b.ndim() {
                b.dims[b.ndim() - 1 - i]
            } else {
                1
            };

            result[max_ndim - 1 - i] = match (da, db) {
                _ if da == db => da,
                (1, _) => db,
                (_, 1) => da,
                _ => {
                    return Err(ArrayError::BroadcastError {
                        a: a.to_vec(),
                        b: b.to_vec(),
                    })
                }
            };
        }

        Ok(Shape::new(result))
    }

    /// Resolve a requested shape that may contain a single `-1` wildcard
    /// against an element count.
    pub fn infer(numel: usize, requested: &[i64]) -> ArrayResult<Shape> {
        let invalid = || ArrayError::InvalidReshape {
            numel,
            shape: requested.to_vec(),
        };

        let mut wildcard = None;
        let mut known = 1usize;
        for (axis, &d) in requested.iter().enumerate() {
            match d {
                -1 if wildcard.is_none() => wildcard = Some(axis),
                d if d >= 0 => known = known.checked_mul(d as usize).ok_or_else(invalid)?,
                _ => return Err(invalid()),
            }
        }

        let mut dims: Vec<usize> = requested.iter().map(|&d| d.max(0) as usize).collect();
        if let Some(axis) = wildcard {
            if known == 0 || numel % known != 0 {
                return Err(invalid());
            }
            dims[axis] = numel / known;
        } else if known != numel {
            return Err(invalid());
        }
        Ok(Shape::new(dims))
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        if self.dims.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::from_slice(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_basics() {
        let s = Shape::new(vec![3, 4, 5]);
        assert_eq!(s.ndim(), 3);
        assert_eq!(s.numel(), 60);
        assert_eq!(s.dim(0).unwrap(), 3);
        assert_eq!(s.dim(2).unwrap(), 5);
        assert!(s.dim(3).is_err());
    }

    #[test]
    fn test_strides() {
        let s = Shape::new(vec![3, 4, 5]);
        assert_eq!(s.strides(), vec![20, 5, 1]);

        let s2 = Shape::new(vec![5, 1]);
        assert_eq!(s2.strides(), vec![1, 1]);
    }

    #[test]
    fn test_broadcast() {
        let a = Shape::new(vec![3, 1]);
        let b = Shape::new(vec![1, 4]);
        let c = Shape::broadcast_shape(&a, &b).unwrap();
        assert_eq!(c.dims(), &[3, 4]);

        let a = Shape::new(vec![5]);
        let c = Shape::broadcast_shape(&a, &Shape::scalar()).unwrap();
        assert_eq!(c.dims(), &[5]);
    }

    #[test]
    fn test_broadcast_error() {
        let a = Shape::new(vec![3, 4]);
        let b = Shape::new(vec![3, 5]);
        assert_eq!(
            Shape::broadcast_shape(&a, &b),
            Err(ArrayError::BroadcastError {
                a: vec![3, 4],
                b: vec![3, 5]
            })
        );
    }

    #[test]
    fn test_infer() {
        assert_eq!(Shape::infer(5, &[5, 1]).unwrap().dims(), &[5, 1]);
        assert_eq!(Shape::infer(6, &[-1, 2]).unwrap().dims(), &[3, 2]);
        assert_eq!(Shape::infer(6, &[-1]).unwrap().dims(), &[6]);
    }

    #[test]
    fn test_infer_rejects_bad_requests() {
        assert!(Shape::infer(5, &[2, 2]).is_err());
        assert!(Shape::infer(6, &[-1, -1]).is_err());
        assert!(Shape::infer(5, &[-1, 2]).is_err());
        assert!(Shape::infer(5, &[-3, 5]).is_err());
        assert!(Shape::infer(0, &[0, -1]).is_err());
    }

    #[test]
    fn test_checked_numel() {
        assert_eq!(Shape::new(vec![5, 1]).checked_numel(), Some(5));
        assert_eq!(Shape::scalar().checked_numel(), Some(1));
        assert_eq!(Shape::new(vec![usize::MAX, 2]).checked_numel(), None);
    }

    #[test]
    fn test_infer_rejects_overflowing_product() {
        let requested = [4_611_686_018_427_387_904, 4, -1];
        assert_eq!(
            Shape::infer(1, &requested),
            Err(ArrayError::InvalidReshape {
                numel: 1,
                shape: requested.to_vec()
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(vec![5, 1]).to_string(), "(5, 1)");
        assert_eq!(Shape::new(vec![5]).to_string(), "(5,)");
        assert_eq!(Shape::scalar().to_string(), "()");
    }
}
