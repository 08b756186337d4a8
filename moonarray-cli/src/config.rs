//! Demo configuration.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use moonarray::core::DType;

/// Inputs for a demo run. Every field is optional in the JSON file; missing
/// fields fall back to the built-in demo values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub moon_greeting: String,
    /// Element type of every array. Inferred from the literals when absent.
    pub dtype: Option<DType>,
    pub values: Vec<Number>,
    pub addend: Number,
    /// Target shape; a single `-1` is inferred from the element count.
    pub reshape: Vec<i64>,
    pub matrix_a: Vec<Vec<Number>>,
    pub matrix_b: Vec<Vec<Number>>,
}

fn numbers(values: &[i64]) -> Vec<Number> {
    values.iter().copied().map(Number::from).collect()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            moon_greeting: "Hello Moon!".to_string(),
            dtype: None,
            values: numbers(&[1, 2, 3, 4, 5]),
            addend: Number::from(5),
            reshape: vec![5, 1],
            matrix_a: vec![numbers(&[1, 2]), numbers(&[3, 4])],
            matrix_b: vec![numbers(&[5, 6]), numbers(&[7, 8])],
        }
    }
}

/// Load a demo configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DemoConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: DemoConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
