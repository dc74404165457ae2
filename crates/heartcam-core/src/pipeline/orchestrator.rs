use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::frame::ColorFrame;
use crate::io::landmarks::LandmarkTrack;
use crate::io::FrameSource;
use crate::roi::{LandmarkPoint, RoiReducer};
use crate::signal::{resample_uniform, BandpassFilter, SignalBuffer};

use super::config::{GapPolicy, PipelineConfig};
use super::estimate::{estimate_bpm, estimate_sliding, min_window_samples, Estimation};
use super::types::{NoOpReporter, PipelineStage, ProgressReporter, PulseReport};

/// Frame-by-frame heart-rate pipeline.
///
/// Feed it frames (or pre-reduced samples) in capture order, then call
/// [`finish`](Self::finish) for a batch result, or
/// [`estimate_now`](Self::estimate_now) / [`estimate_latest`](Self::estimate_latest)
/// at any point for a streaming one. Estimation never mutates the buffer.
pub struct PulsePipeline {
    config: PipelineConfig,
    reducer: RoiReducer,
    filter: BandpassFilter,
    buffer: SignalBuffer,
    min_window: usize,
    frames_seen: usize,
    frames_skipped: usize,
}

impl PulsePipeline {
    /// Validate the configuration and derive filter coefficients for the run.
    pub fn new(config: &PipelineConfig, sampling_rate: f64) -> Result<Self> {
        config.validate(sampling_rate)?;
        let filter = BandpassFilter::design(sampling_rate, &config.filter)?;
        let min_window = min_window_samples(sampling_rate, config.estimation.min_window_secs);

        info!(
            sampling_rate,
            low_hz = config.filter.low_cut_hz,
            high_hz = config.filter.high_cut_hz,
            order = config.filter.order,
            min_window,
            roi = %config.roi.strategy,
            "Pipeline configured"
        );

        Ok(Self {
            config: config.clone(),
            reducer: RoiReducer::new(&config.roi),
            filter,
            buffer: SignalBuffer::new(sampling_rate),
            min_window,
            frames_seen: 0,
            frames_skipped: 0,
        })
    }

    /// Reduce one frame to a sample and append it.
    ///
    /// Returns the sample, or `None` for a tracking gap (no landmarks, or no
    /// usable region), in which case the buffer does not grow.
    pub fn push_frame(
        &mut self,
        frame: &ColorFrame,
        landmarks: Option<&[LandmarkPoint]>,
    ) -> Option<f64> {
        let sample = landmarks.and_then(|points| self.reducer.reduce(frame, points));
        self.push_sample(sample);
        sample
    }

    /// Append an already-reduced sample for the next frame tick.
    /// `None` and non-finite values count as tracking gaps.
    pub fn push_sample(&mut self, sample: Option<f64>) {
        let tick = self.frames_seen;
        self.frames_seen += 1;
        match sample.filter(|s| s.is_finite()) {
            Some(value) => self.buffer.append_at(value, tick),
            None => {
                self.frames_skipped += 1;
                debug!(frame = tick, "Tracking gap, frame skipped");
            }
        }
    }

    pub fn buffer(&self) -> &SignalBuffer {
        &self.buffer
    }

    pub fn sampling_rate(&self) -> f64 {
        self.buffer.sampling_rate()
    }

    pub fn min_window_samples(&self) -> usize {
        self.min_window
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    pub fn frames_skipped(&self) -> usize {
        self.frames_skipped
    }

    /// The series handed to the estimator, per the gap policy.
    fn series(&self, raw: &[f64]) -> Vec<f64> {
        match self.config.estimation.gap_policy {
            GapPolicy::Skip => raw.to_vec(),
            GapPolicy::Resample => {
                resample_uniform(&self.buffer.timestamps(), raw, self.sampling_rate())
            }
        }
    }

    /// Estimate over the most recent `window_secs` of signal.
    pub fn estimate_latest(&self, window_secs: f64) -> Estimation {
        let window_len = min_window_samples(self.sampling_rate(), window_secs);
        let recent = match self.config.estimation.gap_policy {
            GapPolicy::Skip => self.buffer.latest(window_len),
            GapPolicy::Resample => {
                let series = self.series(&self.buffer.snapshot());
                let start = series.len().saturating_sub(window_len);
                series[start..].to_vec()
            }
        };
        estimate_bpm(&recent, &self.filter, self.min_window)
    }

    /// Estimate over everything buffered so far.
    pub fn estimate_now(&self) -> PulseReport {
        let raw = self.buffer.snapshot();
        let series = self.series(&raw);
        let estimation = estimate_bpm(&series, &self.filter, self.min_window);

        let windows = match self.config.sliding_window {
            Some(ref sw) => {
                let rate = self.sampling_rate();
                estimate_sliding(
                    &series,
                    &self.filter,
                    self.min_window,
                    min_window_samples(rate, sw.window_secs),
                    min_window_samples(rate, sw.hop_secs),
                )
            }
            None => Vec::new(),
        };

        if estimation.estimate.is_some() {
            info!(
                samples = series.len(),
                skipped = self.frames_skipped,
                duration_secs = self.buffer.duration_secs(),
                bpm = estimation.bpm,
                "Estimate complete"
            );
        } else {
            info!(
                samples = series.len(),
                required = self.min_window,
                "No heart-rate estimate"
            );
        }

        PulseReport {
            bpm: estimation.bpm,
            estimate: estimation.estimate,
            raw,
            conditioned: estimation.conditioned,
            sampling_rate: self.sampling_rate(),
            frames_seen: self.frames_seen,
            frames_skipped: self.frames_skipped,
            windows,
        }
    }

    /// End of stream: final estimate over the whole buffer.
    pub fn finish(self) -> PulseReport {
        self.estimate_now()
    }
}

/// Run the full pipeline over a frame source with a thread-safe progress reporter.
///
/// Frame `i` of `source` is paired with entry `i` of `landmarks`.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    source: &dyn FrameSource,
    landmarks: &LandmarkTrack,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PulseReport> {
    let sampling_rate = config.resolve_sampling_rate(source.frame_rate());
    let mut pipeline = PulsePipeline::new(config, sampling_rate)?;

    let total = source.frame_count();
    info!(
        total_frames = total,
        tracked = landmarks.tracked_count(),
        "Reading frames"
    );

    reporter.begin_stage(PipelineStage::Reading, Some(total));
    for (i, frame) in source.color_frames().enumerate() {
        let frame = frame?;
        pipeline.push_frame(&frame, landmarks.get(i));
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Estimating, None);
    let report = pipeline.finish();
    reporter.finish_stage();

    Ok(report)
}

/// Run the full pipeline over a frame source.
pub fn run_pipeline(
    config: &PipelineConfig,
    source: &dyn FrameSource,
    landmarks: &LandmarkTrack,
) -> Result<PulseReport> {
    run_pipeline_reported(config, source, landmarks, Arc::new(NoOpReporter))
}

/// Estimate from an already-extracted sample series (one entry per frame;
/// `None` marks a tracking gap).
pub fn run_samples(
    config: &PipelineConfig,
    sampling_rate: Option<f64>,
    samples: &[Option<f64>],
) -> Result<PulseReport> {
    let rate = config.resolve_sampling_rate(sampling_rate);
    let mut pipeline = PulsePipeline::new(config, rate)?;
    for &sample in samples {
        pipeline.push_sample(sample);
    }
    Ok(pipeline.finish())
}
