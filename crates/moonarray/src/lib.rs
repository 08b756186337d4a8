//! # moonarray
//!
//! ## Modules
//!
//! - **core**: N-dimensional arrays with broadcasting, reductions, reshape and dot products
//! - **greeting**: the `print_hello` helper

/// Numeric array engine.
pub use moonarray_core as core;

/// Greeting helpers.
pub use moonarray_greeting as greeting;

pub mod prelude {
    pub use moonarray_core::{format_scalar, ArrayError, ArrayResult, DType, DynArray, NdArray, Shape};
    pub use moonarray_greeting::{print_hello, write_hello};
}
