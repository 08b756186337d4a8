//! N-dimensional numeric arrays: creation, broadcasting arithmetic,
//! reductions, reshaping and matrix products.

pub mod array;
pub mod dtype;
pub mod dynamic;
pub mod error;
pub mod format;
pub mod shape;

pub use array::NdArray;
pub use dtype::{DType, Element};
pub use dynamic::DynArray;
pub use error::{ArrayError, ArrayResult};
pub use format::format_scalar;
pub use shape::Shape;
