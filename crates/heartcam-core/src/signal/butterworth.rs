//! Butterworth band-pass design and causal filtering.
//!
//! Design path: analog low-pass prototype -> low-pass to band-pass
//! transform -> bilinear transform with pre-warped band edges. The result
//! is stored as cascaded second-order sections, which stay well conditioned
//! at the low normalized cutoffs typical of video frame rates.

use std::f64::consts::PI;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FILTER_ORDER, DEFAULT_HIGH_CUT_HZ, DEFAULT_LOW_CUT_HZ, POLE_IMAG_TOLERANCE,
};
use crate::error::{HeartcamError, Result};

/// Pass band of physiologically plausible heart rates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default = "default_low_cut")]
    pub low_cut_hz: f64,
    #[serde(default = "default_high_cut")]
    pub high_cut_hz: f64,
    /// Prototype order; the band-pass filter has `2 * order` poles.
    #[serde(default = "default_order")]
    pub order: usize,
}

fn default_low_cut() -> f64 {
    DEFAULT_LOW_CUT_HZ
}
fn default_high_cut() -> f64 {
    DEFAULT_HIGH_CUT_HZ
}
fn default_order() -> usize {
    DEFAULT_FILTER_ORDER
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            low_cut_hz: DEFAULT_LOW_CUT_HZ,
            high_cut_hz: DEFAULT_HIGH_CUT_HZ,
            order: DEFAULT_FILTER_ORDER,
        }
    }
}

impl FilterSpec {
    /// Check `0 < low < high < sampling_rate / 2` and a non-zero order.
    pub fn validate(&self, sampling_rate: f64) -> Result<()> {
        if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
            return Err(HeartcamError::InvalidSamplingRate(sampling_rate));
        }
        if self.order == 0 {
            return Err(HeartcamError::InvalidFilter("order must be at least 1".into()));
        }
        if !self.low_cut_hz.is_finite() || self.low_cut_hz <= 0.0 {
            return Err(HeartcamError::InvalidFilter(format!(
                "low cutoff {} Hz must be positive",
                self.low_cut_hz
            )));
        }
        if !self.high_cut_hz.is_finite() || self.low_cut_hz >= self.high_cut_hz {
            return Err(HeartcamError::InvalidFilter(format!(
                "low cutoff {} Hz must be below high cutoff {} Hz",
                self.low_cut_hz, self.high_cut_hz
            )));
        }
        let nyquist = sampling_rate / 2.0;
        if self.high_cut_hz >= nyquist {
            return Err(HeartcamError::InvalidFilter(format!(
                "high cutoff {} Hz must be below Nyquist ({} Hz at {} fps)",
                self.high_cut_hz, nyquist, sampling_rate
            )));
        }
        Ok(())
    }

    pub fn low_cut_bpm(&self) -> f64 {
        self.low_cut_hz * crate::consts::SECONDS_PER_MINUTE
    }

    pub fn high_cut_bpm(&self) -> f64 {
        self.high_cut_hz * crate::consts::SECONDS_PER_MINUTE
    }
}

/// Second-order section, `a[0] == 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Biquad {
    pub b: [f64; 3],
    pub a: [f64; 3],
}

impl Biquad {
    fn from_pole_pair(p1: Complex<f64>, p2: Complex<f64>) -> Self {
        // Band-pass zeros: one at DC (z = 1) and one at Nyquist (z = -1).
        Self {
            b: [1.0, 0.0, -1.0],
            a: [1.0, -(p1 + p2).re, (p1 * p2).re],
        }
    }

    /// Direct form II transposed, zero initial state.
    fn process_in_place(&self, signal: &mut [f64]) {
        let [b0, b1, b2] = self.b;
        let [_, a1, a2] = self.a;
        let mut z1 = 0.0;
        let mut z2 = 0.0;
        for x in signal.iter_mut() {
            let input = *x;
            let y = b0 * input + z1;
            z1 = b1 * input - a1 * y + z2;
            z2 = b2 * input - a2 * y;
            *x = y;
        }
    }

    fn response(&self, z_inv: Complex<f64>) -> Complex<f64> {
        let z_inv2 = z_inv * z_inv;
        let num = self.b[0] + z_inv * self.b[1] + z_inv2 * self.b[2];
        let den = self.a[0] + z_inv * self.a[1] + z_inv2 * self.a[2];
        num / den
    }
}

/// Digital Butterworth band-pass filter for one (sampling rate, spec) pair.
#[derive(Clone, Debug)]
pub struct BandpassFilter {
    sections: Vec<Biquad>,
    sampling_rate: f64,
    spec: FilterSpec,
}

impl BandpassFilter {
    /// Derive coefficients. Fails with `InvalidFilter` / `InvalidSamplingRate`
    /// for a spec that cannot be realised at `sampling_rate`.
    pub fn design(sampling_rate: f64, spec: &FilterSpec) -> Result<Self> {
        spec.validate(sampling_rate)?;

        let order = spec.order;
        let nyquist = sampling_rate / 2.0;

        // Pre-warped analog band edges for a bilinear transform at fs = 2.
        let fs2 = 4.0;
        let warp = |hz: f64| fs2 * (PI * (hz / nyquist) / 2.0).tan();
        let w_low = warp(spec.low_cut_hz);
        let w_high = warp(spec.high_cut_hz);
        let bandwidth = w_high - w_low;
        let center_sq = w_low * w_high;

        // Analog low-pass prototype poles on the left half of the unit circle,
        // each split into a band-pass pole pair.
        let mut analog = Vec::with_capacity(2 * order);
        for k in 0..order {
            let m = (2 * k + 1) as f64 - order as f64;
            let proto = -Complex::from_polar(1.0, PI * m / (2 * order) as f64);
            let scaled = proto * (bandwidth / 2.0);
            let offset = (scaled * scaled - center_sq).sqrt();
            analog.push(scaled + offset);
            analog.push(scaled - offset);
        }

        // Bilinear transform. The band-pass has `order` analog zeros at the
        // origin (mapped to z = 1) and `order` at infinity (mapped to z = -1).
        let digital: Vec<Complex<f64>> = analog.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
        let denominator: Complex<f64> = analog.iter().map(|&p| fs2 - p).product();
        let gain =
            bandwidth.powi(order as i32) * (Complex::new(fs2.powi(order as i32), 0.0) / denominator).re;

        let mut sections = Vec::with_capacity(order);
        let mut real_poles = Vec::new();
        for &p in &digital {
            if p.im > POLE_IMAG_TOLERANCE {
                sections.push(Biquad::from_pole_pair(p, p.conj()));
            } else if p.im.abs() <= POLE_IMAG_TOLERANCE {
                real_poles.push(p.re);
            }
        }
        real_poles.sort_by(f64::total_cmp);
        if real_poles.len() % 2 != 0 {
            return Err(HeartcamError::InvalidFilter(
                "unpaired real pole in band-pass design".into(),
            ));
        }
        for pair in real_poles.chunks_exact(2) {
            sections.push(Biquad::from_pole_pair(
                Complex::new(pair[0], 0.0),
                Complex::new(pair[1], 0.0),
            ));
        }
        if sections.len() != order {
            return Err(HeartcamError::InvalidFilter(format!(
                "expected {} sections, paired {}",
                order,
                sections.len()
            )));
        }

        for coeff in sections[0].b.iter_mut() {
            *coeff *= gain;
        }

        Ok(Self {
            sections,
            sampling_rate,
            spec: spec.clone(),
        })
    }

    /// Filter causally from a zero initial state. Output length equals input length.
    pub fn apply(&self, signal: &[f64]) -> Vec<f64> {
        let mut out = signal.to_vec();
        for section in &self.sections {
            section.process_in_place(&mut out);
        }
        out
    }

    /// Magnitude of the frequency response at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / self.sampling_rate;
        let z_inv = Complex::from_polar(1.0, -omega);
        self.sections
            .iter()
            .map(|s| s.response(z_inv))
            .product::<Complex<f64>>()
            .norm()
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }
}
