pub mod config;
mod estimate;
mod orchestrator;
mod types;

pub use estimate::{estimate_bpm, estimate_sliding, min_window_samples, Estimation};
pub use orchestrator::{run_pipeline, run_pipeline_reported, run_samples, PulsePipeline};
pub use types::{PipelineStage, ProgressReporter, PulseReport, WindowEstimate};
