use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{DEFAULT_MIN_WINDOW_SECS, DEFAULT_SAMPLING_RATE};
use crate::error::{HeartcamError, Result};
use crate::roi::RoiConfig;
use crate::signal::FilterSpec;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Frames per second. Overrides the rate reported by the source;
    /// `None` or 0 means unknown.
    #[serde(default)]
    pub sampling_rate: Option<f64>,
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub roi: RoiConfig,
    #[serde(default)]
    pub estimation: EstimationConfig,
    #[serde(default)]
    pub sliding_window: Option<SlidingWindowConfig>,
}

impl PipelineConfig {
    /// Pick the run's sampling rate: explicit config, then the source's
    /// reported rate, then [`DEFAULT_SAMPLING_RATE`].
    pub fn resolve_sampling_rate(&self, source_rate: Option<f64>) -> f64 {
        let usable = |r: &f64| r.is_finite() && *r > 0.0;
        if let Some(rate) = self.sampling_rate.filter(usable) {
            return rate;
        }
        if let Some(rate) = source_rate.filter(usable) {
            return rate;
        }
        warn!(
            fallback = DEFAULT_SAMPLING_RATE,
            "Sampling rate unknown, assuming default"
        );
        DEFAULT_SAMPLING_RATE
    }

    /// Fail fast on settings that cannot produce a meaningful run at `sampling_rate`.
    pub fn validate(&self, sampling_rate: f64) -> Result<()> {
        if let Some(rate) = self.sampling_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(HeartcamError::InvalidSamplingRate(rate));
            }
        }
        self.filter.validate(sampling_rate)?;

        let min_window = self.estimation.min_window_secs;
        if !min_window.is_finite() || min_window <= 0.0 {
            return Err(HeartcamError::Pipeline(format!(
                "minimum window must be positive, got {min_window} s"
            )));
        }

        if let Some(ref sw) = self.sliding_window {
            if !(sw.hop_secs.is_finite() && sw.hop_secs > 0.0) {
                return Err(HeartcamError::Pipeline(format!(
                    "sliding window hop must be positive, got {} s",
                    sw.hop_secs
                )));
            }
            if !(sw.window_secs.is_finite() && sw.window_secs >= min_window) {
                return Err(HeartcamError::Pipeline(format!(
                    "sliding window of {} s is shorter than the {} s minimum",
                    sw.window_secs, min_window
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimationConfig {
    /// Seconds of signal required before estimating; shorter buffers report 0 BPM.
    #[serde(default = "default_min_window_secs")]
    pub min_window_secs: f64,
    #[serde(default)]
    pub gap_policy: GapPolicy,
}

fn default_min_window_secs() -> f64 {
    DEFAULT_MIN_WINDOW_SECS
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            min_window_secs: DEFAULT_MIN_WINDOW_SECS,
            gap_policy: GapPolicy::default(),
        }
    }
}

/// What to do about frames that produced no sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapPolicy {
    /// Drop them and keep assuming the fixed sampling rate.
    #[default]
    Skip,
    /// Interpolate the samples onto a uniform grid using their frame ticks.
    Resample,
}

impl std::fmt::Display for GapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "Skip"),
            Self::Resample => write!(f, "Resample"),
        }
    }
}

/// Re-estimate over a moving window instead of once over the whole run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlidingWindowConfig {
    pub window_secs: f64,
    pub hop_secs: f64,
}

impl Default for SlidingWindowConfig {
    fn default() -> Self {
        Self {
            window_secs: 10.0,
            hop_secs: 1.0,
        }
    }
}
