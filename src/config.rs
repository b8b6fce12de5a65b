use crate::forecast::ModelOptions;

/// Tunables of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Future months appended to the history.
    pub horizon: usize,
    /// Below this many points the run stops with a warning.
    pub min_points: usize,
    /// Rows shown in the "loaded data" preview.
    pub preview_rows: usize,
    pub model: ModelOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            horizon: 6,
            min_points: 3,
            preview_rows: 5,
            model: ModelOptions::default(),
        }
    }
}
