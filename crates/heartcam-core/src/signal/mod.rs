//! Time-series side of the estimator: buffer, conditioning, spectral peak search.
//!
//! Everything downstream of [`SignalBuffer`] is a pure function of its
//! inputs; sampling rate and [`FilterSpec`] are always passed explicitly.

pub mod buffer;
pub mod butterworth;
pub mod condition;
pub mod detrend;
pub mod resample;
pub mod spectrum;

pub use buffer::SignalBuffer;
pub use butterworth::{BandpassFilter, Biquad, FilterSpec};
pub use condition::{condition, condition_with};
pub use detrend::detrend;
pub use resample::resample_uniform;
pub use spectrum::{estimate, magnitude_spectrum, SpectralEstimate, Spectrum};
