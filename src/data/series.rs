use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::filter::{Selection, matching_rows};
use super::model::{CellValue, SalesTable};
use super::schema::{QUANTITY, YEAR_MONTH};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("row {row}: '{value}' in '{col}' does not match the format YYYY-MM", col = YEAR_MONTH)]
    InvalidYearMonth { row: usize, value: String },

    #[error("row {row}: '{value}' in '{col}' is not a number", col = QUANTITY)]
    NonNumericQuantity { row: usize, value: String },

    #[error("column '{0}' not found")]
    MissingColumn(&'static str),
}

/// One observation: first day of the month and the quantity sold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub ds: NaiveDate,
    pub y: f64,
}

/// Chronological sales history of one (product, branch) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesSeries {
    pub points: Vec<SeriesPoint>,
}

impl SalesSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_month(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.ds)
    }
}

/// Filter `table` to `selection` and project onto (month, quantity).
///
/// Every selected row must carry a valid month; a bad one fails the whole
/// build rather than being dropped.  Empty quantity cells become `NaN`.
/// The result is sorted by month, stable on ties.
pub fn build_series(table: &SalesTable, selection: &Selection) -> Result<SalesSeries, SeriesError> {
    let ym_idx = table
        .column_index(YEAR_MONTH)
        .ok_or(SeriesError::MissingColumn(YEAR_MONTH))?;
    let qty_idx = table
        .column_index(QUANTITY)
        .ok_or(SeriesError::MissingColumn(QUANTITY))?;

    let mut points = matching_rows(table, selection)
        .into_iter()
        .map(|row| -> Result<SeriesPoint, SeriesError> {
            let cells = &table.rows[row];
            Ok(SeriesPoint {
                ds: parse_year_month(&cells[ym_idx]).ok_or_else(|| {
                    SeriesError::InvalidYearMonth {
                        row,
                        value: cells[ym_idx].to_string(),
                    }
                })?,
                y: quantity(&cells[qty_idx]).ok_or_else(|| SeriesError::NonNumericQuantity {
                    row,
                    value: cells[qty_idx].to_string(),
                })?,
            })
        })
        .collect::<Result<Vec<_>, SeriesError>>()?;

    points.sort_by_key(|p| p.ds);
    Ok(SalesSeries { points })
}

/// Strict `YYYY-MM`; native date cells are truncated to their month.
pub fn parse_year_month(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Text(s) => {
            let (year, month) = s.split_once('-')?;
            let well_formed = year.len() == 4
                && month.len() == 2
                && year.bytes().all(|b| b.is_ascii_digit())
                && month.bytes().all(|b| b.is_ascii_digit());
            if !well_formed {
                return None;
            }
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        CellValue::Date(d) => d.with_day(1),
        _ => None,
    }
}

fn quantity(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Null => Some(f64::NAN),
        other => other.as_f64(),
    }
}
