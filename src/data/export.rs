use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::forecast::ForecastPoint;

/// One line of the exported forecast table.
#[derive(Debug, Serialize)]
struct ExportRow {
    ds: NaiveDate,
    yhat: f64,
    yhat_lower: f64,
    yhat_upper: f64,
}

impl From<&ForecastPoint> for ExportRow {
    fn from(p: &ForecastPoint) -> Self {
        ExportRow {
            ds: p.ds,
            yhat: p.yhat,
            yhat_lower: p.yhat_lower,
            yhat_upper: p.yhat_upper,
        }
    }
}

/// Write forecast rows as CSV with a `ds,yhat,yhat_lower,yhat_upper` header.
pub fn write_forecast_csv<W: Write>(writer: W, rows: &[ForecastPoint]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(ExportRow::from(row))
            .with_context(|| format!("writing forecast row for {}", row.ds))?;
    }
    csv.flush().context("flushing forecast CSV")?;
    Ok(())
}

pub fn save_forecast_csv(path: &Path, rows: &[ForecastPoint]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_forecast_csv(file, rows)
}
