/// Forecasting layer: model trait, result types, and the additive model.
///
/// ```text
///   SalesSeries (monthly history)
///        │
///        ▼
///   ┌──────────────┐
///   │ AdditiveModel │  Prophet: trend + yearly seasonality
///   └──────────────┘
///        │  history axis + N month-end steps
///        ▼
///   ┌──────────────┐
///   │ForecastResult │  yhat / lower / upper per timestamp
///   └──────────────┘
/// ```

pub mod additive;
pub mod calendar;

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::series::SalesSeries;

pub use additive::{AdditiveModel, ModelOptions};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("need at least 2 non-empty observations to fit, got {got}")]
    TooFewObservations { got: usize },

    #[error("observation for {0} is not a finite number")]
    NonFiniteValue(NaiveDate),

    #[error("all observations fall on the same date; cannot fit a trend")]
    ZeroTimeSpan,

    #[error("forecast model failed: {0}")]
    Fit(String),

    #[error("forecast model returned no uncertainty interval")]
    MissingIntervals,

    #[error("forecast dates run past the supported calendar")]
    DateOverflow,
}

/// One timestamp of the forecast axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub ds: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Point forecasts and bounds over history + future horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Historical timestamps first, then `horizon` future ones.
    pub points: Vec<ForecastPoint>,
    pub horizon: usize,
    /// Coverage of `[yhat_lower, yhat_upper]`, e.g. `0.8`.
    pub interval_width: f64,
}

impl ForecastResult {
    /// The trailing `horizon` rows.
    pub fn future(&self) -> &[ForecastPoint] {
        let start = self.points.len().saturating_sub(self.horizon);
        &self.points[start..]
    }

    pub fn history(&self) -> &[ForecastPoint] {
        let end = self.points.len().saturating_sub(self.horizon);
        &self.points[..end]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A model that extends a monthly history by `horizon` months.
pub trait Forecaster {
    /// Short display name.
    fn name(&self) -> &str;

    /// Fit on `series` and predict over the historical axis plus `horizon`
    /// future month-end timestamps.
    fn forecast(&self, series: &SalesSeries, horizon: usize) -> Result<ForecastResult, ModelError>;
}
