use rayon::prelude::*;
use tracing::debug;

use crate::signal::{condition_with, estimate, BandpassFilter, SpectralEstimate};

use super::types::WindowEstimate;

/// Samples needed for `min_window_secs` at `sampling_rate`, rounded up.
pub fn min_window_samples(sampling_rate: f64, min_window_secs: f64) -> usize {
    // Absorb rounding noise so 5 s x 30 fps is 150, not 151.
    (min_window_secs * sampling_rate - 1e-9).ceil().max(1.0) as usize
}

/// Result of gating, conditioning and spectral search over one snapshot.
#[derive(Clone, Debug, Default)]
pub struct Estimation {
    pub bpm: f64,
    pub estimate: Option<SpectralEstimate>,
    pub conditioned: Vec<f64>,
}

/// Estimate heart rate from a sample snapshot.
///
/// Snapshots shorter than `min_window` yield 0 BPM and an empty conditioned
/// signal without touching the filter. A pass band with no resolvable bins
/// yields 0 BPM but keeps the conditioned signal for inspection.
pub fn estimate_bpm(samples: &[f64], filter: &BandpassFilter, min_window: usize) -> Estimation {
    if samples.len() < min_window {
        debug!(
            samples = samples.len(),
            required = min_window,
            "Not enough samples to estimate"
        );
        return Estimation::default();
    }

    let conditioned = condition_with(filter, samples);
    let estimate = estimate(&conditioned, filter.sampling_rate(), filter.spec());
    let bpm = estimate.map_or(0.0, |e| e.bpm());

    Estimation {
        bpm,
        estimate,
        conditioned,
    }
}

/// Estimate every `window_len`-sample window starting at multiples of `hop`.
///
/// Windows are independent, so they are evaluated in parallel; the result
/// is in window order.
pub fn estimate_sliding(
    samples: &[f64],
    filter: &BandpassFilter,
    min_window: usize,
    window_len: usize,
    hop: usize,
) -> Vec<WindowEstimate> {
    if window_len == 0 || hop == 0 || samples.len() < window_len {
        return Vec::new();
    }

    let starts: Vec<usize> = (0..=samples.len() - window_len).step_by(hop).collect();
    let rate = filter.sampling_rate();

    starts
        .into_par_iter()
        .map(|start| {
            let window = &samples[start..start + window_len];
            WindowEstimate {
                start_sample: start,
                start_secs: start as f64 / rate,
                bpm: estimate_bpm(window, filter, min_window).bpm,
            }
        })
        .collect()
}
