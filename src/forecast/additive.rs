use augurs::prophet::wasmstan::WasmstanOptimizer;
use augurs::prophet::{IntervalWidth, PredictionData, Prophet, ProphetOptions, TrainingData};
use chrono::NaiveDate;

use super::calendar::{epoch_seconds, future_month_ends};
use super::{ForecastPoint, ForecastResult, Forecaster, ModelError};
use crate::data::series::SalesSeries;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs passed through to Prophet.  Everything else keeps Prophet's
/// defaults: linear growth, additive seasonality, yearly terms switched on
/// automatically once the history covers two years.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    pub n_changepoints: u32,
    /// Coverage of the uncertainty interval.
    pub interval_width: f64,
    pub uncertainty_samples: u32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            n_changepoints: 25,
            interval_width: 0.8,
            uncertainty_samples: 1000,
        }
    }
}

impl ModelOptions {
    fn to_prophet(&self) -> Result<ProphetOptions, ModelError> {
        let interval_width = IntervalWidth::try_from(self.interval_width)
            .map_err(|e| ModelError::Fit(format!("interval width {}: {e}", self.interval_width)))?;
        Ok(ProphetOptions {
            n_changepoints: self.n_changepoints,
            interval_width,
            uncertainty_samples: self.uncertainty_samples,
            ..Default::default()
        })
    }
}

// ---------------------------------------------------------------------------
// AdditiveModel
// ---------------------------------------------------------------------------

/// Prophet (trend + seasonality, additive mode) behind the [`Forecaster`] seam.
#[derive(Debug, Clone, Default)]
pub struct AdditiveModel {
    pub options: ModelOptions,
}

impl AdditiveModel {
    pub fn new(options: ModelOptions) -> Self {
        Self { options }
    }
}

impl Forecaster for AdditiveModel {
    fn name(&self) -> &str {
        "prophet"
    }

    fn forecast(&self, series: &SalesSeries, horizon: usize) -> Result<ForecastResult, ModelError> {
        let training = training_data(series)?;

        let mut axis: Vec<NaiveDate> = series.points.iter().map(|p| p.ds).collect();
        axis.dedup();
        let last = series
            .last_month()
            .ok_or(ModelError::TooFewObservations { got: 0 })?;
        axis.extend(future_month_ends(last, horizon).ok_or(ModelError::DateOverflow)?);

        let mut prophet = Prophet::new(self.options.to_prophet()?, WasmstanOptimizer::new());
        prophet
            .fit(training, Default::default())
            .map_err(|e| ModelError::Fit(e.to_string()))?;

        let timestamps: Vec<i64> = axis.iter().map(|ds| epoch_seconds(*ds)).collect();
        let predictions = prophet
            .predict(Some(PredictionData::new(timestamps)))
            .map_err(|e| ModelError::Fit(e.to_string()))?;

        let yhat = predictions.yhat;
        let (Some(lower), Some(upper)) = (yhat.lower, yhat.upper) else {
            return Err(ModelError::MissingIntervals);
        };
        if yhat.point.len() != axis.len() || lower.len() != axis.len() || upper.len() != axis.len() {
            return Err(ModelError::Fit(format!(
                "expected {} predictions, got {}",
                axis.len(),
                yhat.point.len()
            )));
        }

        let points = axis
            .iter()
            .enumerate()
            .map(|(i, &ds)| ForecastPoint {
                ds,
                yhat: yhat.point[i],
                yhat_lower: lower[i],
                yhat_upper: upper[i],
            })
            .collect();
        log::debug!(
            "prophet forecast: {} training points, {} predicted timestamps",
            series.len(),
            axis.len()
        );

        Ok(ForecastResult {
            points,
            horizon,
            interval_width: self.options.interval_width,
        })
    }
}

/// Observations with a quantity, as epoch seconds.  Empty quantities keep
/// their month on the axis but are left out of the fit.
fn training_data(series: &SalesSeries) -> Result<TrainingData, ModelError> {
    let mut ds = Vec::with_capacity(series.len());
    let mut y = Vec::with_capacity(series.len());
    for p in &series.points {
        if p.y.is_infinite() {
            return Err(ModelError::NonFiniteValue(p.ds));
        }
        if !p.y.is_nan() {
            ds.push(epoch_seconds(p.ds));
            y.push(p.y);
        }
    }
    if y.len() < 2 {
        return Err(ModelError::TooFewObservations { got: y.len() });
    }
    if ds.first() == ds.last() {
        return Err(ModelError::ZeroTimeSpan);
    }
    TrainingData::new(ds, y).map_err(|e| ModelError::Fit(e.to_string()))
}
