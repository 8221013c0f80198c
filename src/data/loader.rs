use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{ChromatogramData, Transition};

/// Extensions understood by [`load_file`], for file dialogs.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["tsv", "txt", "tab", "csv", "json", "parquet", "pq"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a chromatogram from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.tsv` / `.txt` / `.tab` – tab-separated, header row, first column is time
/// * `.csv`     – same layout, comma-separated
/// * `.json`    – `{ "times": [...], "transitions": [{ "name": ..., "intensities": [...] }] }`
/// * `.parquet` – flat numeric table, first column is time
pub fn load_file(path: &Path) -> Result<ChromatogramData> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let data = match ext.as_str() {
        "tsv" | "txt" | "tab" => load_delimited(path, b'\t'),
        "csv" => load_delimited(path, b','),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} transitions over {} time points from {}",
        data.len(),
        data.n_points(),
        path.display()
    );
    Ok(data)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, delimiter: u8) -> Result<ChromatogramData> {
    let file = std::fs::File::open(path).context("opening delimited file")?;
    read_delimited(file, delimiter)
}

/// Parse a delimited table: a header row, then one row per time point.
///
/// Column 0 holds the time values; every further column is a transition
/// named by its header, in column order.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<ChromatogramData> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        bail!("Table has no header row");
    }

    let mut times = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len() - 1];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Row {row_no}"))?;
        for (col_idx, cell) in record.iter().enumerate() {
            let value = parse_cell(cell, row_no, &headers[col_idx])?;
            match col_idx {
                0 => times.push(value),
                _ => columns[col_idx - 1].push(value),
            }
        }
    }

    let transitions = headers
        .into_iter()
        .skip(1)
        .zip(columns)
        .map(|(name, intensities)| Transition { name, intensities })
        .collect();

    Ok(ChromatogramData::try_new(times, transitions)?)
}

fn parse_cell(cell: &str, row: usize, col: &str) -> Result<f64> {
    if cell.is_empty() {
        bail!("Row {row}, column '{col}': empty cell");
    }
    cell.parse::<f64>()
        .with_context(|| format!("Row {row}, column '{col}': '{cell}' is not a number"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonChromatogram {
    times: Vec<f64>,
    transitions: Vec<Transition>,
}

fn load_json(path: &Path) -> Result<ChromatogramData> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

/// Expected JSON schema:
///
/// ```json
/// {
///   "times": [0.0, 0.05, 0.1],
///   "transitions": [
///     { "name": "y7", "intensities": [10.0, 250.0, 12.0] },
///     { "name": "b3", "intensities": [0.0, 40.0, 1.0] }
///   ]
/// }
/// ```
pub fn read_json(text: &str) -> Result<ChromatogramData> {
    let parsed: JsonChromatogram = serde_json::from_str(text).context("parsing JSON")?;
    Ok(ChromatogramData::try_new(parsed.times, parsed.transitions)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one row per time point.
///
/// Expected schema:
/// - column 0: time (Float64, Float32, Int64 or Int32)
/// - every further column: one transition of the same numeric types
///
/// Nulls are rejected, like empty cells in the text formats.
fn load_parquet(path: &Path) -> Result<ChromatogramData> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    if names.is_empty() {
        bail!("Parquet file has no columns");
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (col_idx, name) in names.iter().enumerate() {
            let values = extract_f64_column(batch.column(col_idx))
                .with_context(|| format!("column '{name}'"))?;
            columns[col_idx].extend(values);
        }
    }

    let mut columns = columns.into_iter();
    let times = columns.next().unwrap_or_default();
    let transitions = names
        .into_iter()
        .skip(1)
        .zip(columns)
        .map(|(name, intensities)| Transition { name, intensities })
        .collect();

    Ok(ChromatogramData::try_new(times, transitions)?)
}

// -- Parquet / Arrow helpers --

/// Read a flat numeric Arrow column as `f64`.
fn extract_f64_column(col: &ArrayRef) -> Result<Vec<f64>> {
    if col.null_count() > 0 {
        bail!("{} null value(s) in numeric column", col.null_count());
    }

    let values = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.values().to_vec(),
        DataType::Float32 => downcast::<Float32Array>(col)?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int64 => downcast::<Int64Array>(col)?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int32 => downcast::<Int32Array>(col)?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(values)
}

fn downcast<T: 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type for {:?}", col.data_type()))
}
