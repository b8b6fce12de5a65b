use demand_ai::data::filter::FilterChoices;
use demand_ai::data::model::CellValue;
use demand_ai::pipeline::{self, ForecastView, RunOutcome, RunOutput, Session, UploadedFile};
use demand_ai::PipelineConfig;

use crate::color::ChartPalette;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Upload and current selections; the pipeline's only input.
    pub session: Session,

    pub config: PipelineConfig,

    /// Result of the last pipeline run (cached until the session changes).
    pub output: RunOutput,

    /// Draw the lower/upper bound lines on the chart.
    pub show_bounds: bool,

    pub palette: ChartPalette,

    /// Errors raised outside the pipeline (file read, export).
    pub status_message: Option<String>,

    /// Session changed since `output` was computed.
    stale: bool,
}

impl AppState {
    /// Replace the uploaded file.  Previous choices are kept and re-checked
    /// against the new file's values on the next run.
    pub fn set_upload(&mut self, file: UploadedFile) {
        log::info!("Received {} ({} bytes)", file.name, file.bytes.len());
        self.session.upload = Some(file);
        self.status_message = None;
        self.stale = true;
    }

    pub fn select_product(&mut self, product: CellValue) {
        if self.session.product.as_ref() != Some(&product) {
            self.session.product = Some(product);
            self.stale = true;
        }
    }

    pub fn select_branch(&mut self, branch: CellValue) {
        if self.session.branch.as_ref() != Some(&branch) {
            self.session.branch = Some(branch);
            self.stale = true;
        }
    }

    /// Re-run the pipeline if the session changed since the last run.
    pub fn refresh(&mut self) {
        if !self.stale {
            return;
        }
        self.output = pipeline::run(&self.session, &self.config);
        if let Some(sel) = &self.output.selection {
            self.session.product = Some(sel.product.clone());
            self.session.branch = Some(sel.branch.clone());
        }
        self.stale = false;
    }

    pub fn choices(&self) -> Option<&FilterChoices> {
        self.output.choices.as_ref()
    }

    pub fn forecast_view(&self) -> Option<&ForecastView> {
        match &self.output.outcome {
            RunOutcome::Forecast(view) => Some(&**view),
            _ => None,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.session.upload.as_ref().map(|f| f.name.as_str())
    }
}
