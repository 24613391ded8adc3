//! Reading area lists from text.
//!
//! Values are separated by whitespace or commas; `#` starts a comment that
//! runs to the end of the line.

use crate::error::{PartitionError, Result};
use std::fs;
use std::path::Path;

/// Parse every area in `text`.
pub fn parse_areas(text: &str) -> Result<Vec<f64>> {
    let mut areas = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("");
        for token in content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let value: f64 = token.parse().map_err(|_| {
                PartitionError::data_loss(format!(
                    "line {}: '{}' is not a number",
                    line_no + 1,
                    token
                ))
            })?;
            areas.push(value);
        }
    }
    Ok(areas)
}

/// Read and parse an area file.
pub fn read_areas(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        let err = PartitionError::from(e);
        PartitionError::new(err.code(), format!("{}: {}", path.display(), err.message()))
    })?;
    parse_areas(&text).map_err(|e| {
        PartitionError::new(e.code(), format!("{}: {}", path.display(), e.message()))
    })
}
