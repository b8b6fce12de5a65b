use std::sync::Arc;

use thiserror::Error;

use crate::config::PipelineConfig;
use crate::data::filter::{FilterChoices, Selection};
use crate::data::loader;
use crate::data::model::{CellValue, SalesTable};
use crate::data::schema::{self, SchemaError};
use crate::data::series::{self, SalesSeries, SeriesError};
use crate::forecast::{AdditiveModel, ForecastResult, Forecaster, ModelError};

// ---------------------------------------------------------------------------
// Session: the only state that survives between runs
// ---------------------------------------------------------------------------

/// File as received from the file dialog or a drop.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Upload plus the user's current choices.  Everything else is derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub upload: Option<UploadedFile>,
    pub product: Option<CellValue>,
    pub branch: Option<CellValue>,
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error while processing: {0:#}")]
    Ingest(anyhow::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Error while processing: {0}")]
    Series(#[from] SeriesError),

    #[error("Error while processing: {0}")]
    Model(#[from] ModelError),
}

/// Everything the presenter needs for a successful run.
#[derive(Debug, Clone)]
pub struct ForecastView {
    pub selection: Selection,
    pub history: SalesSeries,
    pub forecast: ForecastResult,
    pub model_name: String,
}

impl ForecastView {
    pub fn title(&self) -> String {
        format!(
            "Sales forecast - {} ({})",
            self.selection.product, self.selection.branch
        )
    }
}

/// How a run ended.  Insufficient data is a warning, not a failure.
#[derive(Debug, Default)]
pub enum RunOutcome {
    /// No file uploaded yet.
    #[default]
    Idle,
    Failed(PipelineError),
    InsufficientData { points: usize, min_points: usize },
    Forecast(Box<ForecastView>),
}

#[derive(Debug, Default)]
pub struct RunOutput {
    /// First rows of the parsed table.
    pub preview: Option<SalesTable>,
    /// Options for the selection controls, once the schema is valid.
    pub choices: Option<FilterChoices>,
    /// The (product, branch) pair the run actually used.
    pub selection: Option<Selection>,
    pub outcome: RunOutcome,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Run the whole pipeline for `session` with the default additive model.
pub fn run(session: &Session, config: &PipelineConfig) -> RunOutput {
    let model = AdditiveModel::new(config.model.clone());
    run_with(session, config, &model)
}

/// Run the whole pipeline with an explicit forecaster.
///
/// Upload → parse → schema check → selection → series → forecast.
/// Every failure lands in [`RunOutcome::Failed`]; partial results gathered
/// before the failure (preview, choices) are kept.
pub fn run_with(session: &Session, config: &PipelineConfig, model: &dyn Forecaster) -> RunOutput {
    let mut output = RunOutput::default();
    let Some(upload) = &session.upload else {
        return output;
    };

    output.outcome = match stages(session, upload, config, model, &mut output) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("{}: {e}", upload.name);
            RunOutcome::Failed(e)
        }
    };
    output
}

fn stages(
    session: &Session,
    upload: &UploadedFile,
    config: &PipelineConfig,
    model: &dyn Forecaster,
    output: &mut RunOutput,
) -> Result<RunOutcome, PipelineError> {
    let table = loader::load_bytes(&upload.name, &upload.bytes).map_err(PipelineError::Ingest)?;
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.columns,
        upload.name
    );
    output.preview = Some(SalesTable::new(
        table.columns.clone(),
        table.head(config.preview_rows).to_vec(),
    ));

    schema::validate(&table)?;

    let choices = FilterChoices::from_table(&table);
    let selection = choices.resolve(session.product.as_ref(), session.branch.as_ref());
    output.choices = Some(choices);
    let Some(selection) = selection else {
        log::warn!("{} has no rows to choose from", upload.name);
        return Ok(RunOutcome::InsufficientData {
            points: 0,
            min_points: config.min_points,
        });
    };
    output.selection = Some(selection.clone());

    let history = series::build_series(&table, &selection)?;
    if history.is_empty() {
        log::warn!("No sales for {} / {}", selection.product, selection.branch);
    }
    if history.len() < config.min_points {
        log::warn!(
            "Only {} points for {} / {}, skipping forecast",
            history.len(),
            selection.product,
            selection.branch
        );
        return Ok(RunOutcome::InsufficientData {
            points: history.len(),
            min_points: config.min_points,
        });
    }

    let forecast = model.forecast(&history, config.horizon)?;
    log::info!(
        "Forecast {} / {}: {} history points, {} future months",
        selection.product,
        selection.branch,
        history.len(),
        forecast.future().len()
    );

    Ok(RunOutcome::Forecast(Box::new(ForecastView {
        selection,
        history,
        forecast,
        model_name: model.name().to_string(),
    })))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::forecast::ForecastPoint;

    /// Records calls and returns a flat forecast.
    #[derive(Default)]
    struct CountingForecaster {
        calls: Cell<usize>,
    }

    impl Forecaster for CountingForecaster {
        fn name(&self) -> &str {
            "counting"
        }

        fn forecast(
            &self,
            series: &SalesSeries,
            horizon: usize,
        ) -> Result<ForecastResult, ModelError> {
            self.calls.set(self.calls.get() + 1);
            let points = series
                .points
                .iter()
                .map(|p| ForecastPoint {
                    ds: p.ds,
                    yhat: p.y,
                    yhat_lower: p.y,
                    yhat_upper: p.y,
                })
                .collect();
            Ok(ForecastResult {
                points,
                horizon,
                interval_width: 0.8,
            })
        }
    }

    fn csv_session(body: &str) -> Session {
        Session {
            upload: Some(UploadedFile::new("sales.csv", body.as_bytes().to_vec())),
            ..Session::default()
        }
    }

    const HEADER: &str = "Produto,Ano-Mês,Filial,Quantidade de Vendas\n";

    #[test]
    fn no_upload_is_idle() {
        let out = run(&Session::default(), &PipelineConfig::default());
        assert!(matches!(out.outcome, RunOutcome::Idle));
        assert!(out.preview.is_none());
    }

    #[test]
    fn two_points_warn_without_calling_the_model() {
        let body = format!("{HEADER}A,2023-01,X,1\nA,2023-02,X,2\n");
        let model = CountingForecaster::default();
        let out = run_with(&csv_session(&body), &PipelineConfig::default(), &model);

        assert!(matches!(
            out.outcome,
            RunOutcome::InsufficientData { points: 2, min_points: 3 }
        ));
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn three_points_call_the_model_once() {
        let body = format!("{HEADER}A,2023-01,X,1\nA,2023-02,X,2\nA,2023-03,X,3\n");
        let model = CountingForecaster::default();
        let out = run_with(&csv_session(&body), &PipelineConfig::default(), &model);

        assert!(matches!(out.outcome, RunOutcome::Forecast(_)));
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn schema_failure_stops_before_selection() {
        let body = "Produto,Filial\nA,X\n";
        let model = CountingForecaster::default();
        let out = run_with(&csv_session(body), &PipelineConfig::default(), &model);

        match out.outcome {
            RunOutcome::Failed(PipelineError::Schema(e)) => {
                assert_eq!(e.missing, vec!["Ano-Mês", "Quantidade de Vendas"]);
            }
            other => panic!("expected schema failure, got {other:?}"),
        }
        assert!(out.preview.is_some());
        assert!(out.choices.is_none());
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn header_only_file_is_insufficient_data() {
        let out = run(&csv_session(HEADER), &PipelineConfig::default());
        assert!(matches!(
            out.outcome,
            RunOutcome::InsufficientData { points: 0, .. }
        ));
        assert!(out.selection.is_none());
    }

    #[test]
    fn stored_selection_is_honoured() {
        let body = format!(
            "{HEADER}A,2023-01,X,1\nB,2023-01,Y,1\nB,2023-02,Y,1\nB,2023-03,Y,1\n"
        );
        let mut session = csv_session(&body);
        session.product = Some("B".into());
        session.branch = Some("Y".into());

        let model = CountingForecaster::default();
        let out = run_with(&session, &PipelineConfig::default(), &model);
        let Some(sel) = out.selection else {
            panic!("no selection")
        };
        assert_eq!(sel.product, CellValue::from("B"));
        assert_eq!(sel.branch, CellValue::from("Y"));
        assert!(matches!(out.outcome, RunOutcome::Forecast(_)));
    }

    #[test]
    fn title_names_product_and_branch() {
        let body = format!("{HEADER}Widget,2023-01,North,1\nWidget,2023-02,North,2\nWidget,2023-03,North,3\n");
        let out = run_with(
            &csv_session(&body),
            &PipelineConfig::default(),
            &CountingForecaster::default(),
        );
        let RunOutcome::Forecast(view) = out.outcome else {
            panic!("expected forecast")
        };
        assert_eq!(view.title(), "Sales forecast - Widget (North)");
        assert_eq!(view.model_name, "counting");
    }

    #[test]
    fn unreadable_file_reports_the_cause() {
        let session = Session {
            upload: Some(UploadedFile::new("sales.xlsx", b"not a workbook".to_vec())),
            ..Session::default()
        };
        let out = run(&session, &PipelineConfig::default());
        let RunOutcome::Failed(err) = out.outcome else {
            panic!("expected failure")
        };
        assert!(matches!(err, PipelineError::Ingest(_)));
        assert!(err.to_string().starts_with("Error while processing: opening workbook"));
    }
}
