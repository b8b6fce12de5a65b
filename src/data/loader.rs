use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, DataType, Reader, open_workbook_auto_from_rs};

use super::model::{CellValue, SalesTable};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse an uploaded file.  Dispatch by the extension of `file_name`.
///
/// Supported formats:
/// * `.csv` – header row followed by records, cell types are inferred
/// * anything else – spreadsheet workbook (xlsx, xls, xlsb, ods), first sheet
pub fn load_bytes(file_name: &str, bytes: &[u8]) -> Result<SalesTable> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(bytes),
        _ => load_workbook(bytes),
    }
}

/// Read a file from disk and parse it like an upload.
pub fn load_file(path: &Path) -> Result<SalesTable> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    load_bytes(name, &bytes)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per sales entry.
fn load_csv(bytes: &[u8]) -> Result<SalesTable> {
    let mut reader = csv::Reader::from_reader(bytes);
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    if columns.is_empty() {
        bail!("CSV file has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(SalesTable::new(columns, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of a workbook.  The format is sniffed from the
/// content, so a mislabelled extension still works.
///
/// The first row holds the column names; every following row is a record.
fn load_workbook(bytes: &[u8]) -> Result<SalesTable> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).context("opening workbook")?;

    let range = workbook
        .worksheet_range_at(0)
        .context("workbook contains no worksheets")?
        .context("reading first worksheet")?;

    let mut sheet_rows = range.rows();
    let header = match sheet_rows.next() {
        Some(header) => header,
        None => bail!("first worksheet is empty"),
    };

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Data::Empty => format!("Unnamed: {i}"),
            other => other.to_string(),
        })
        .collect();

    let rows = sheet_rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(SalesTable::new(columns, rows))
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        // Spreadsheets store every number as a float; whole values read back as integers.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            CellValue::Integer(*f as i64)
        }
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => CellValue::Date(dt.date()),
            None => CellValue::Text(cell.to_string()),
        },
        other => CellValue::Text(other.to_string()),
    }
}
