//! CSV persistence for sample datasets
//!
//! One header line followed by one row per sample. Loading is tolerant: rows
//! that cannot be parsed are skipped with a warning instead of failing the
//! whole file.

use std::fs;
use std::path::Path;

use crate::error::{BenchError, Result};
use crate::sample::{Dataset, Sample};

/// Header row of every sample file
pub const CSV_HEADER: &str =
    "Algorithm,DataType,InputSize,ExecutionTime(ns),MemoryUsage(bytes),Comparisons,Swaps,Timestamp";

/// Minimum number of fields a data row must carry (timestamp is optional)
const MIN_FIELDS: usize = 7;

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one CSV row, honouring quoted fields
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Format a sample as one CSV row (no trailing newline)
pub fn format_row(sample: &Sample) -> String {
    let memory = sample
        .memory_bytes
        .map(|m| m.to_string())
        .unwrap_or_default();
    format!(
        "{},{},{},{},{},{},{},{}",
        escape_field(&sample.algorithm),
        escape_field(&sample.shape),
        sample.input_size,
        sample.time_ns,
        memory,
        sample.comparisons,
        sample.swaps,
        sample.timestamp_ms
    )
}

fn parse_number<T: std::str::FromStr>(field: &str, name: &str, line: usize) -> Result<T> {
    field.trim().parse().map_err(|_| BenchError::Parse {
        line,
        reason: format!("invalid {} '{}'", name, field),
    })
}

/// Parse one CSV data row; `line` is the 1-based line number for messages
pub fn parse_row(row: &str, line: usize) -> Result<Sample> {
    let fields = split_row(row);
    if fields.len() < MIN_FIELDS {
        return Err(BenchError::Parse {
            line,
            reason: format!("expected at least {} fields, got {}", MIN_FIELDS, fields.len()),
        });
    }

    let memory_bytes = if fields[4].trim().is_empty() {
        None
    } else {
        Some(parse_number(&fields[4], "memory usage", line)?)
    };
    let timestamp_ms = match fields.get(7) {
        Some(ts) if !ts.trim().is_empty() => parse_number(ts, "timestamp", line)?,
        _ => 0,
    };

    Ok(Sample {
        algorithm: fields[0].clone(),
        shape: fields[1].clone(),
        input_size: parse_number(&fields[2], "input size", line)?,
        time_ns: parse_number(&fields[3], "execution time", line)?,
        memory_bytes,
        comparisons: parse_number(&fields[5], "comparisons", line)?,
        swaps: parse_number(&fields[6], "swaps", line)?,
        timestamp_ms,
    })
}

/// Render a dataset as CSV text
pub fn to_csv(dataset: &Dataset) -> String {
    let mut output = String::new();
    output.push_str(CSV_HEADER);
    output.push('\n');
    for sample in dataset {
        output.push_str(&format_row(sample));
        output.push('\n');
    }
    output
}

/// Parse CSV text, skipping the header and any malformed row
pub fn from_csv(text: &str) -> Dataset {
    let mut dataset = Dataset::new();
    for (idx, row) in text.lines().enumerate().skip(1) {
        if row.trim().is_empty() {
            continue;
        }
        match parse_row(row, idx + 1) {
            Ok(sample) => dataset.push(sample),
            Err(e) => tracing::warn!("Skipping malformed row: {}", e),
        }
    }
    dataset
}

/// Write a dataset to `path`
pub fn save(dataset: &Dataset, path: &Path) -> Result<()> {
    fs::write(path, to_csv(dataset))?;
    tracing::info!(
        "Saved {} samples to {}",
        dataset.len(),
        path.display()
    );
    Ok(())
}

/// Load a dataset from `path`
pub fn load(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path)?;
    let dataset = from_csv(&text);
    tracing::info!("Loaded {} samples from {}", dataset.len(), path.display());
    Ok(dataset)
}
