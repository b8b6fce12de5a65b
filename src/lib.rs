//! Sales demand forecasting: upload a sales history, pick a product and a
//! branch, get a six month forecast.

pub mod config;
pub mod data;
pub mod forecast;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{RunOutcome, RunOutput, Session, UploadedFile, run};
