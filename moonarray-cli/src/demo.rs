//! The demo run: greet, then walk through array creation, scalar addition,
//! mean, reshape and matrix multiplication, printing each result.
use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use moonarray::core::{format_scalar, DType, DynArray};
use moonarray::greeting::write_hello;

use crate::config::DemoConfig;

/// Results of a demo run, rendered the same way they are printed.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub dtype: DType,
    pub original: String,
    pub added: String,
    pub mean: f64,
    pub reshaped: String,
    pub product: String,
}

/// `[5, 1]` -> `5x1`
fn dims_label(dims: &[usize]) -> String {
    dims.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("x")
}

fn vector(config: &DemoConfig) -> Result<DynArray> {
    let arr = match config.dtype {
        Some(dtype) => DynArray::from_numbers_as(&config.values, dtype),
        None => DynArray::from_numbers(&config.values),
    };
    arr.context("Failed to create the array")
}

fn matrix(rows: &[Vec<serde_json::Number>], dtype: Option<DType>, name: &str) -> Result<DynArray> {
    let m = match dtype {
        Some(dtype) => DynArray::from_rows_as(rows, dtype),
        None => DynArray::from_rows(rows),
    };
    m.with_context(|| format!("Failed to create {}", name))
}

/// Run every demo step in order, writing the text output to `out`.
pub fn run_demo<W: Write>(config: &DemoConfig, out: &mut W) -> Result<DemoReport> {
    write_hello(out)?;
    writeln!(out, "{}", config.moon_greeting)?;

    let arr = vector(config)?;
    info!("Created {} array with shape {:?}", arr.dtype(), arr.shape_vec());
    writeln!(out, "Original array: {}", arr)?;

    let added = arr
        .add_number(&config.addend)
        .with_context(|| format!("Failed to add {} to the array", config.addend))?;
    writeln!(
        out,
        "Array after adding {} to each element: {}",
        config.addend, added
    )?;

    let mean = arr.mean().context("Failed to compute the mean")?;
    debug!("mean = {}", mean);
    writeln!(out, "Mean of the array: {}", format_scalar(mean))?;

    let reshaped = arr
        .reshape_inferred(&config.reshape)
        .with_context(|| format!("Failed to reshape the array to {:?}", config.reshape))?;
    info!("Reshaped to {:?}", reshaped.shape_vec());
    writeln!(
        out,
        "Reshaped array ({}):\n {}",
        dims_label(&reshaped.shape_vec()),
        reshaped
    )?;

    let a = matrix(&config.matrix_a, config.dtype, "matrix_a")?;
    let b = matrix(&config.matrix_b, config.dtype, "matrix_b")?;
    let product = a.dot(&b).context("Failed to multiply the matrices")?;
    info!(
        "Multiplied {:?} by {:?} -> {:?}",
        a.shape_vec(),
        b.shape_vec(),
        product.shape_vec()
    );
    writeln!(out, "Result of matrix multiplication:\n {}", product)?;

    Ok(DemoReport {
        dtype: arr.dtype(),
        original: arr.to_string(),
        added: added.to_string(),
        mean,
        reshaped: reshaped.to_string(),
        product: product.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn run(config: &DemoConfig) -> (String, DemoReport) {
        let mut buf = Vec::new();
        let report = run_demo(config, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), report)
    }

    #[test]
    fn test_dims_label() {
        assert_eq!(dims_label(&[5, 1]), "5x1");
        assert_eq!(dims_label(&[2, 3, 4]), "2x3x4");
    }

    #[test]
    fn test_report_matches_output() {
        let (text, report) = run(&DemoConfig::default());
        assert_eq!(report.dtype, DType::Int64);
        assert_relative_eq!(report.mean, 3.0);
        assert!(text.contains(&format!("Original array: {}", report.original)));
        assert!(text.ends_with(&format!("{}\n", report.product)));
    }

    #[test]
    fn test_inferred_reshape_label() {
        let config = DemoConfig {
            values: (1..=6).map(serde_json::Number::from).collect(),
            reshape: vec![-1, 2],
            ..DemoConfig::default()
        };
        let (text, report) = run(&config);
        assert!(text.contains("Reshaped array (3x2):\n [[1 2]\n [3 4]\n [5 6]]"));
        assert_relative_eq!(report.mean, 3.5);
    }

    #[test]
    fn test_float_dtype() {
        let config = DemoConfig {
            dtype: Some(DType::Float64),
            ..DemoConfig::default()
        };
        let (text, report) = run(&config);
        assert_eq!(report.original, "[1. 2. 3. 4. 5.]");
        assert_eq!(report.added, "[ 6.  7.  8.  9. 10.]");
        assert!(text.contains("Result of matrix multiplication:\n [[19. 22.]\n [43. 50.]]"));
    }

    #[test]
    fn test_bad_reshape_is_reported() {
        let config = DemoConfig {
            reshape: vec![2, 2],
            ..DemoConfig::default()
        };
        let err = run_demo(&config, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to reshape"));
    }

    #[test]
    fn test_misaligned_matrices_are_reported() {
        let config = DemoConfig {
            matrix_b: vec![vec![serde_json::Number::from(1); 2]; 3],
            ..DemoConfig::default()
        };
        let err = run_demo(&config, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to multiply"));
    }
}
