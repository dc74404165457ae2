use crate::error::Result;

use super::butterworth::{BandpassFilter, FilterSpec};
use super::detrend::detrend;

/// Detrend, then band-pass. Output length equals input length.
///
/// Designs the filter on every call; hold a [`BandpassFilter`] and use
/// [`condition_with`] when conditioning repeatedly at one rate.
pub fn condition(raw: &[f64], sampling_rate: f64, spec: &FilterSpec) -> Result<Vec<f64>> {
    let filter = BandpassFilter::design(sampling_rate, spec)?;
    Ok(condition_with(&filter, raw))
}

pub fn condition_with(filter: &BandpassFilter, raw: &[f64]) -> Vec<f64> {
    filter.apply(&detrend(raw))
}
