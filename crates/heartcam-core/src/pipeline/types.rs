use serde::{Deserialize, Serialize};

use crate::signal::SpectralEstimate;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum PipelineStage {
    Reading,
    Estimating,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading frames"),
            Self::Estimating => write!(f, "Estimating heart rate"),
        }
    }
}

/// Heart-rate estimate for one window of the signal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowEstimate {
    /// Index of the window's first sample.
    pub start_sample: usize,
    pub start_secs: f64,
    /// 0 when the window produced no estimate.
    pub bpm: f64,
}

/// Everything a run produces, for reporting and diagnostics.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PulseReport {
    /// Beats per minute; 0 means "no estimate".
    pub bpm: f64,
    pub estimate: Option<SpectralEstimate>,
    /// Buffer snapshot, one sample per frame with a usable ROI.
    pub raw: Vec<f64>,
    /// Detrended, band-passed signal. Empty when the minimum window was not reached.
    pub conditioned: Vec<f64>,
    pub sampling_rate: f64,
    pub frames_seen: usize,
    pub frames_skipped: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<WindowEstimate>,
}

impl PulseReport {
    pub fn has_estimate(&self) -> bool {
        self.bpm > 0.0
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
