use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{BAND_EDGE_TOLERANCE_HZ, PEAK_TIE_TOLERANCE, SECONDS_PER_MINUTE};

use super::butterworth::FilterSpec;

/// One-sided magnitude spectrum of a real signal.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Spectrum {
    /// Bin centre frequencies, `k * sampling_rate / n` for `k = 0..=n/2`.
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

/// Dominant in-band frequency of a conditioned signal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectralEstimate {
    pub peak_frequency_hz: f64,
    pub peak_magnitude: f64,
}

impl SpectralEstimate {
    pub fn bpm(&self) -> f64 {
        self.peak_frequency_hz * SECONDS_PER_MINUTE
    }
}

/// Magnitude of the real-input DFT at the non-negative frequency bins.
pub fn magnitude_spectrum(signal: &[f64], sampling_rate: f64) -> Spectrum {
    let n = signal.len();
    if n == 0 {
        return Spectrum::default();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    let bins = n / 2 + 1;
    let resolution = sampling_rate / n as f64;
    Spectrum {
        frequencies: (0..bins).map(|k| k as f64 * resolution).collect(),
        magnitudes: buffer[..bins].iter().map(|c| c.norm()).collect(),
    }
}

impl Spectrum {
    /// Strongest bin with frequency in the closed interval `[low_hz, high_hz]`.
    ///
    /// Ties resolve to the lowest frequency: a later bin must exceed the
    /// current best by more than a relative [`PEAK_TIE_TOLERANCE`] to win.
    /// Returns `None` when no bin falls inside the band.
    pub fn peak_in_band(&self, low_hz: f64, high_hz: f64) -> Option<SpectralEstimate> {
        let mut best: Option<SpectralEstimate> = None;

        for (&freq, &mag) in self.frequencies.iter().zip(&self.magnitudes) {
            if freq < low_hz - BAND_EDGE_TOLERANCE_HZ || freq > high_hz + BAND_EDGE_TOLERANCE_HZ {
                continue;
            }
            let better = match best {
                None => true,
                Some(b) => mag > b.peak_magnitude * (1.0 + PEAK_TIE_TOLERANCE),
            };
            if better {
                best = Some(SpectralEstimate {
                    peak_frequency_hz: freq,
                    peak_magnitude: mag,
                });
            }
        }

        best
    }

    /// Number of bins inside `[low_hz, high_hz]`.
    pub fn bins_in_band(&self, low_hz: f64, high_hz: f64) -> usize {
        self.frequencies
            .iter()
            .filter(|&&f| {
                f >= low_hz - BAND_EDGE_TOLERANCE_HZ && f <= high_hz + BAND_EDGE_TOLERANCE_HZ
            })
            .count()
    }
}

/// Spectral peak of `conditioned` restricted to the filter's pass band.
pub fn estimate(
    conditioned: &[f64],
    sampling_rate: f64,
    spec: &FilterSpec,
) -> Option<SpectralEstimate> {
    let spectrum = magnitude_spectrum(conditioned, sampling_rate);
    let bins = spectrum.bins_in_band(spec.low_cut_hz, spec.high_cut_hz);
    if bins == 0 {
        debug!(
            samples = conditioned.len(),
            resolution_hz = sampling_rate / conditioned.len().max(1) as f64,
            "No spectral bins inside the pass band"
        );
        return None;
    }
    spectrum.peak_in_band(spec.low_cut_hz, spec.high_cut_hz)
}
